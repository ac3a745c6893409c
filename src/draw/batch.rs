use std::ops::Range;

use super::indices::MAX_BATCH_VERTICES;
use super::DrawMode;

/// Vertices shared by consecutive strip batches so no triangle is lost at a seam.
const STRIP_OVERLAP: usize = 2;

/// Splits `vertex_count` vertices into ranges small enough for 16-bit indices.
///
/// Strip batches overlap by two vertices. The advance is even, so every batch
/// starts with the same winding parity as the full strip.
#[must_use]
pub fn batch_ranges(vertex_count: usize, mode: DrawMode) -> Vec<Range<usize>> {
    let overlap = match mode {
        DrawMode::TriangleStrip => STRIP_OVERLAP,
        DrawMode::TriangleList => 0,
    };
    let advance = MAX_BATCH_VERTICES - overlap;

    (0..vertex_count)
        .step_by(advance)
        // a batch holding only the previous batch's tail draws nothing new
        .filter(|&start| start == 0 || vertex_count - start > overlap)
        .map(|start| start..(start + MAX_BATCH_VERTICES).min(vertex_count))
        .collect()
}
