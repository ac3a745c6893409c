use super::{Point2, Vector2};

/// Scalar z-component of the 3D cross product `a × b`.
///
/// Positive when `b` turns left (counter-clockwise) relative to `a`.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Returns the left perpendicular of `v` multiplied by `scale`: `(-y, x) * scale`.
///
/// `perpendicular(v, hw / v.norm())` is the normal of length `hw`.
#[must_use]
pub fn perpendicular(v: &Vector2, scale: f32) -> Vector2 {
    Vector2::new(-v.y * scale, v.x * scale)
}

/// Rescales `v` to the given length. The zero vector is returned unchanged.
#[must_use]
pub fn normalized_to(v: Vector2, length: f32) -> Vector2 {
    let current = v.norm();
    if current > 0.0 {
        v * (length / current)
    } else {
        v
    }
}

/// Bitwise point equality: both coordinates must have identical bit patterns.
///
/// Unlike `==`, `0.0` and `-0.0` differ and a NaN equals itself.
#[must_use]
pub fn bit_identical(a: &Point2, b: &Point2) -> bool {
    a.x.to_bits() == b.x.to_bits() && a.y.to_bits() == b.y.to_bits()
}
