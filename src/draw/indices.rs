use crate::error::{DrawError, Result};

/// Largest vertex count drawn at once. Addressable with 16-bit indices and a
/// multiple of 12, so batches always hold whole quads.
pub const MAX_BATCH_VERTICES: usize = u16::MAX as usize - 3;

/// Builds the index buffer that splits every run of four vertices into the
/// triangles `[0, 1, 2]` and `[0, 2, 3]`.
///
/// # Errors
///
/// Returns [`DrawError::OutOfMemory`] if the buffer cannot be allocated and
/// [`DrawError::IndexOverflow`] if `vertex_count` exceeds the 16-bit range.
pub fn quad_indices(vertex_count: usize) -> Result<Vec<u16>> {
    let quads = vertex_count / 4;
    let last_index = (quads * 4).saturating_sub(1);
    if u16::try_from(last_index).is_err() {
        return Err(DrawError::IndexOverflow { vertex_count }.into());
    }

    let mut indices = Vec::new();
    indices
        .try_reserve_exact(quads * 6)
        .map_err(|_| DrawError::OutOfMemory)?;

    for base in (0..quads * 4).step_by(4) {
        let base = u16::try_from(base).map_err(|_| DrawError::IndexOverflow { vertex_count })?;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    Ok(indices)
}
