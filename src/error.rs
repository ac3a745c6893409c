use thiserror::Error;

/// Top-level error type for polyline tessellation and drawing.
#[derive(Debug, Error)]
pub enum PolystrokeError {
    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error(transparent)]
    Graphics(#[from] GraphicsError),
}

/// Errors related to building the sleeve geometry.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("degenerate polyline: {0}")]
    Degenerate(String),
}

/// Errors raised while submitting a tessellated line to a rasterizer.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("out of memory")]
    OutOfMemory,

    #[error("{vertex_count} vertices cannot be addressed with 16-bit indices")]
    IndexOverflow { vertex_count: usize },

    #[error("rasterizer failed: {0}")]
    Rasterizer(String),
}

/// Errors related to the line renderer state.
#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("maximum stack depth reached (more pushes than pops?)")]
    StackOverflow,

    #[error("minimum stack depth reached (more pops than pushes?)")]
    StackUnderflow,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Convenience type alias for results using [`PolystrokeError`].
pub type Result<T> = std::result::Result<T, PolystrokeError>;
