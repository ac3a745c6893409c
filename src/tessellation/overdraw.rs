//! The antialiasing fringe: a ring of geometry around the sleeve whose
//! outer vertices are fully transparent.

use crate::draw::Color32;
use crate::math::vector_2d::normalized_to;
use crate::math::{Point2, Vector2};

use super::line_style::LineJoin;

/// The half width is reduced by this many pixels when a fringe is drawn, so
/// the fringe lies on the intended edge instead of widening the line.
pub const OVERDRAW_SHRINK: f32 = 0.3;

/// Fraction of the requested half width the sleeve keeps at least, so that
/// thin lines never shrink to zero width.
pub const MIN_CORE_FRACTION: f32 = 0.1;

/// Half width of the core sleeve when a fringe is drawn around it.
#[must_use]
pub fn shrunk_half_width(half_width: f32, pixel_size: f32) -> f32 {
    (half_width - pixel_size * OVERDRAW_SHRINK).max(half_width * MIN_CORE_FRACTION)
}

/// Number of fringe vertices for a sleeve of `core_count` vertices.
///
/// `core_count` is the sleeve length before [`LineJoin::None`] drops its
/// redundant end caps.
#[must_use]
pub fn overdraw_vertex_count(join: LineJoin, core_count: usize, is_looping: bool) -> usize {
    match join {
        LineJoin::None => 4 * core_count.saturating_sub(2),
        LineJoin::Miter | LineJoin::Bevel => 2 * core_count + if is_looping { 0 } else { 2 },
    }
}

/// Writes the fringe for `core` into `fringe`.
///
/// `normals` are the sleeve offsets `core` was built from; they are ignored
/// for [`LineJoin::None`], whose `core` must already be trimmed to whole quads.
pub fn render_overdraw(
    join: LineJoin,
    core: &[Point2],
    normals: &[Vector2],
    pixel_size: f32,
    is_looping: bool,
    fringe: &mut [Point2],
) {
    match join {
        LineJoin::None => render_quad_fringe(core, pixel_size, fringe),
        LineJoin::Miter | LineJoin::Bevel => {
            render_shared_fringe(core, normals, pixel_size, is_looping, fringe);
        }
    }
}

/// Returns `true` if fringe vertex `i` keeps the line's alpha.
#[must_use]
pub fn fringe_is_opaque(join: LineJoin, i: usize) -> bool {
    match join {
        LineJoin::None => (i + 1) % 4 < 2,
        LineJoin::Miter | LineJoin::Bevel => (i + 1) % 2 == 1,
    }
}

/// Fills the per-vertex colours of the fringe from the line colour.
pub fn fill_color_array(join: LineJoin, color: Color32, colors: &mut [Color32]) {
    for (i, c) in colors.iter_mut().enumerate() {
        *c = if fringe_is_opaque(join, i) {
            color
        } else {
            color.with_alpha(0)
        };
    }
}

/// Upper edge forward, then lower edge backward; every inner vertex is
/// followed by its outer companion one pixel further along its normal.
fn render_shared_fringe(
    core: &[Point2],
    normals: &[Vector2],
    pixel_size: f32,
    is_looping: bool,
    fringe: &mut [Point2],
) {
    let n = core.len();
    let outer = |k: usize| core[k] + normals[k] * (pixel_size / normals[k].norm());

    for i in (0..n.saturating_sub(1)).step_by(2) {
        fringe[i] = core[i];
        fringe[i + 1] = outer(i);

        let k = n - i - 1;
        fringe[n + i] = core[k];
        fringe[n + i + 1] = outer(k);
    }

    if is_looping {
        return;
    }

    // push the outer corners past the line ends so the caps are covered too
    let count = fringe.len();
    let spacer = normalized_to(fringe[1] - fringe[3], pixel_size);
    fringe[1] += spacer;
    fringe[count - 3] += spacer;

    let spacer = normalized_to(fringe[n - 1] - fringe[n - 3], pixel_size);
    fringe[n - 1] += spacer;
    fringe[n + 1] += spacer;

    // close the ring across the start cap
    fringe[count - 2] = fringe[0];
    fringe[count - 1] = fringe[1];
}

/// Four rings of four vertices around every independent quad.
fn render_quad_fringe(core: &[Point2], pixel_size: f32, fringe: &mut [Point2]) {
    let mut filled = 0;
    for (quad, ring) in core.chunks_exact(4).zip(fringe.chunks_exact_mut(16)) {
        let (v0, v1, v2, v3) = (quad[0], quad[1], quad[2], quad[3]);
        let s = normalized_to(v0 - v3, pixel_size);
        let t = normalized_to(v0 - v1, pixel_size);

        ring.copy_from_slice(&[
            v0,
            v0 + s + t,
            v1 + s - t,
            v1,
            v1,
            v1 + s - t,
            v2 - s - t,
            v2,
            v2,
            v2 - s - t,
            v3 - s + t,
            v3,
            v3,
            v3 - s + t,
            v0 + s + t,
            v0,
        ]);
        filled += 16;
    }

    // leftover slots collapse onto one point and rasterize nothing
    if let Some(last) = core.last() {
        fringe[filled..].fill(*last);
    }
}
