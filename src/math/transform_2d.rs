use super::{Affine2, Point2};

/// Returns `true` if `transform` is the identity (exactly).
#[must_use]
pub fn is_identity(transform: &Affine2) -> bool {
    *transform.matrix() == *Affine2::identity().matrix()
}

/// Approximate horizontal and vertical scale factors of an affine transform.
///
/// These are the lengths of the transformed unit axes, so rotation and
/// translation do not contribute.
#[must_use]
pub fn approximate_scale(transform: &Affine2) -> (f32, f32) {
    let m = transform.matrix();
    let sx = m[(0, 0)].hypot(m[(1, 0)]);
    let sy = m[(0, 1)].hypot(m[(1, 1)]);
    (sx, sy)
}

/// Transforms `points` into `out`, which is cleared first.
pub fn transform_points(transform: &Affine2, points: &[Point2], out: &mut Vec<Point2>) {
    out.clear();
    out.extend(points.iter().map(|p| transform * p));
}
