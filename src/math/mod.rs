pub mod transform_2d;
pub mod vector_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f32>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f32>;

/// 2D affine transformation (3x3 homogeneous matrix).
pub type Affine2 = nalgebra::Affine2<f32>;

/// 3x3 matrix, used to build affine transforms from raw components.
pub type Matrix3 = nalgebra::Matrix3<f32>;
