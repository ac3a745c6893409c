use crate::error::Result;
use crate::math::Point2;

use super::Color32;

/// Primitive topology of a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    /// Every vertex after the second forms a triangle with the two before it.
    TriangleStrip,
    /// Independent triangles, addressed through an index buffer.
    TriangleList,
}

/// One primitive submission.
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand<'a> {
    /// Topology of `positions` (or of `indices`, when present).
    pub mode: DrawMode,
    /// Vertex positions, already transformed.
    pub positions: &'a [Point2],
    /// Per-vertex colours. When `None` the rasterizer's constant colour applies.
    pub colors: Option<&'a [Color32]>,
    /// Triangle indices into `positions`.
    pub indices: Option<&'a [u16]>,
}

/// The caller-supplied draw path that turns vertex buffers into pixels.
pub trait Rasterizer {
    /// Issues one draw.
    ///
    /// # Errors
    ///
    /// Implementations report backend failures as
    /// [`DrawError::Rasterizer`](crate::error::DrawError::Rasterizer).
    fn draw(&mut self, command: &DrawCommand<'_>) -> Result<()>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &mut R {
    #[inline]
    fn draw(&mut self, command: &DrawCommand<'_>) -> Result<()> {
        (**self).draw(command)
    }
}

/// An owned copy of a [`DrawCommand`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub mode: DrawMode,
    pub positions: Vec<Point2>,
    pub colors: Option<Vec<Color32>>,
    pub indices: Option<Vec<u16>>,
}

impl RecordedDraw {
    /// Expands the submission into the triangles the GPU would rasterize,
    /// as index triples into `positions`.
    ///
    /// Strip triangles alternate winding so that every triple is listed in
    /// the strip's front-face order.
    #[must_use]
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        match (self.mode, &self.indices) {
            (DrawMode::TriangleList, Some(indices)) => indices
                .chunks_exact(3)
                .map(|t| [usize::from(t[0]), usize::from(t[1]), usize::from(t[2])])
                .collect(),
            (DrawMode::TriangleList, None) => (0..self.positions.len() / 3)
                .map(|i| [3 * i, 3 * i + 1, 3 * i + 2])
                .collect(),
            (DrawMode::TriangleStrip, _) => (2..self.positions.len())
                .map(|i| {
                    if i % 2 == 0 {
                        [i - 2, i - 1, i]
                    } else {
                        [i - 1, i - 2, i]
                    }
                })
                .collect(),
        }
    }
}

/// A [`Rasterizer`] that keeps every submission instead of drawing it.
#[derive(Debug, Default)]
pub struct RecordingRasterizer {
    draws: Vec<RecordedDraw>,
}

impl RecordingRasterizer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All submissions so far, in order.
    #[must_use]
    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Removes and returns the recorded submissions.
    pub fn take(&mut self) -> Vec<RecordedDraw> {
        std::mem::take(&mut self.draws)
    }
}

impl Rasterizer for RecordingRasterizer {
    fn draw(&mut self, command: &DrawCommand<'_>) -> Result<()> {
        self.draws.push(RecordedDraw {
            mode: command.mode,
            positions: command.positions.to_vec(),
            colors: command.colors.map(<[Color32]>::to_vec),
            indices: command.indices.map(<[u16]>::to_vec),
        });
        Ok(())
    }
}
