//! Submission of tessellated lines to a caller-supplied [`Rasterizer`].

mod batch;
mod color;
mod indices;
mod rasterizer;

pub use batch::batch_ranges;
pub use color::Color32;
pub use indices::{quad_indices, MAX_BATCH_VERTICES};
pub use rasterizer::{DrawCommand, DrawMode, Rasterizer, RecordedDraw, RecordingRasterizer};

use tracing::{trace, warn};

use crate::error::{DrawError, Result};
use crate::math::transform_2d::{is_identity, transform_points};
use crate::math::{Affine2, Point2};
use crate::tessellation::{fill_color_array, Polyline};

/// Render state a line is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    /// Constant colour of the line.
    pub color: Color32,
    /// Applied to every vertex before submission.
    pub transform: Option<Affine2>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            color: Color32::WHITE,
            transform: None,
        }
    }
}

impl DrawState {
    /// A state with the given colour and no transform.
    #[must_use]
    pub fn with_color(color: Color32) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

impl Polyline {
    /// Per-vertex colours for the whole buffer, or `None` without overdraw.
    ///
    /// Core and bridge vertices get `color`; the fringe alternates between
    /// `color` and its fully transparent variant.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::OutOfMemory`] if the colour buffer cannot be allocated.
    pub fn colors(&self, color: Color32) -> Result<Option<Vec<Color32>>> {
        let Some(fringe) = self.overdraw_range() else {
            return Ok(None);
        };

        let mut colors = Vec::new();
        colors
            .try_reserve_exact(self.vertex_count())
            .map_err(|_| DrawError::OutOfMemory)?;
        colors.resize(self.vertex_count(), color);
        fill_color_array(self.join(), color, &mut colors[fringe]);
        Ok(Some(colors))
    }

    /// Submits the line to `rasterizer`.
    ///
    /// Buffers of up to [`MAX_BATCH_VERTICES`] vertices are drawn with a
    /// single call; longer ones are split into batches.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::OutOfMemory`] if a buffer cannot be allocated, in
    /// which case nothing is drawn, and forwards rasterizer failures.
    pub fn draw<R: Rasterizer + ?Sized>(&self, rasterizer: &mut R, state: &DrawState) -> Result<()> {
        let transformed;
        let positions: &[Point2] = match &state.transform {
            Some(transform) if !is_identity(transform) => {
                let mut out = Vec::new();
                out.try_reserve_exact(self.vertex_count())
                    .map_err(|_| DrawError::OutOfMemory)?;
                transform_points(transform, self.vertices(), &mut out);
                transformed = out;
                &transformed
            }
            _ => self.vertices(),
        };

        let colors = self.colors(state.color)?;
        let mode = self.draw_mode();
        let indices = match mode {
            DrawMode::TriangleList => Some(quad_indices(positions.len().min(MAX_BATCH_VERTICES))?),
            DrawMode::TriangleStrip => None,
        };

        let batches = batch_ranges(positions.len(), mode);
        if batches.len() > 1 {
            warn!(
                vertices = positions.len(),
                batches = batches.len(),
                "polyline exceeds 16-bit indexing, drawing in batches"
            );
        }

        for range in batches {
            trace!(?mode, ?range, "draw batch");
            let len = range.len();
            rasterizer.draw(&DrawCommand {
                mode,
                positions: &positions[range.clone()],
                colors: colors.as_deref().map(|c| &c[range]),
                indices: indices.as_deref().map(|i| &i[..len / 4 * 6]),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::math::{Matrix3, Vector2};
    use crate::tessellation::LineJoin;

    const CORNER: [f32; 6] = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0];

    fn draw_one(line: &Polyline, state: &DrawState) -> RecordedDraw {
        let mut recorder = RecordingRasterizer::new();
        line.draw(&mut recorder, state).unwrap();
        let mut draws = recorder.take();
        assert_eq!(draws.len(), 1);
        draws.remove(0)
    }

    #[test]
    fn strip_without_overdraw() {
        let line = Polyline::tessellate(LineJoin::Miter, &CORNER, 1.0, 1.0, false).unwrap();
        let draw = draw_one(&line, &DrawState::default());

        assert_eq!(draw.mode, DrawMode::TriangleStrip);
        assert_eq!(draw.positions, line.vertices());
        assert_eq!(draw.colors, None);
        assert_eq!(draw.indices, None);
        assert_eq!(draw.triangles().len(), 4);
    }

    #[test]
    fn strip_overdraw_colors() {
        let color = Color32::new(200, 10, 10, 255);
        let line = Polyline::tessellate(LineJoin::Bevel, &CORNER, 1.0, 1.0, true).unwrap();
        let draw = draw_one(&line, &DrawState::with_color(color));

        let colors = draw.colors.unwrap();
        let fringe = line.overdraw_range().unwrap();
        assert_eq!(colors.len(), line.vertex_count());
        assert!(colors[..fringe.start].iter().all(|c| *c == color));
        assert_eq!(colors[fringe.start], color);
        assert_eq!(colors[fringe.start + 1], color.with_alpha(0));
    }

    #[test]
    fn list_uses_quad_indices() {
        let line = Polyline::tessellate(LineJoin::None, &CORNER, 1.0, 1.0, true).unwrap();
        let draw = draw_one(&line, &DrawState::default());

        assert_eq!(draw.mode, DrawMode::TriangleList);
        let indices = draw.indices.as_ref().unwrap();
        assert_eq!(indices.len(), line.vertex_count() / 4 * 6);
        assert_eq!(&indices[..6], &[0, 1, 2, 0, 2, 3]);

        let colors = draw.colors.unwrap();
        let fringe = line.overdraw_range().unwrap();
        assert_eq!(colors[fringe.start].a, 255);
        assert_eq!(colors[fringe.start + 1].a, 0);
        assert_eq!(colors[fringe.start + 2].a, 0);
        assert_eq!(colors[fringe.start + 3].a, 255);
    }

    #[test]
    fn transform_moves_positions() {
        let line = Polyline::tessellate(LineJoin::Miter, &CORNER, 1.0, 1.0, false).unwrap();
        let state = DrawState {
            transform: Some(Affine2::from_matrix_unchecked(Matrix3::new_translation(
                &Vector2::new(100.0, 0.0),
            ))),
            ..DrawState::default()
        };
        let draw = draw_one(&line, &state);
        assert_eq!(draw.positions[0], line.vertices()[0] + Vector2::new(100.0, 0.0));
    }

    #[test]
    fn long_strip_is_batched() {
        let coords: Vec<f32> = (0..40_000)
            .flat_map(|i| [i as f32, if i % 2 == 0 { 0.0 } else { 1.0 }])
            .collect();
        let line = Polyline::tessellate(LineJoin::Miter, &coords, 0.25, 1.0, false).unwrap();
        assert!(line.vertex_count() > MAX_BATCH_VERTICES);

        let mut recorder = RecordingRasterizer::new();
        line.draw(&mut recorder, &DrawState::default()).unwrap();
        let draws = recorder.draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].positions.len(), MAX_BATCH_VERTICES);
        assert_eq!(
            draws[1].positions[..2],
            line.vertices()[MAX_BATCH_VERTICES - 2..MAX_BATCH_VERTICES]
        );
    }

    struct Failing;

    impl Rasterizer for Failing {
        fn draw(&mut self, _command: &DrawCommand<'_>) -> Result<()> {
            Err(DrawError::Rasterizer("device lost".to_owned()).into())
        }
    }

    #[test]
    fn rasterizer_errors_propagate() {
        let line = Polyline::tessellate(LineJoin::Miter, &CORNER, 1.0, 1.0, false).unwrap();
        let err = line.draw(&mut Failing, &DrawState::default()).unwrap_err();
        assert_eq!(err.to_string(), "rasterizer failed: device lost");
    }
}
