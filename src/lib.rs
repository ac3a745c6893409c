pub mod draw;
pub mod error;
pub mod graphics;
pub mod math;
pub mod tessellation;

pub use error::{PolystrokeError, Result};
