use crate::error::Result;
use crate::math::Point2;

use super::line_style::StrokeStyle;
use super::polyline::Polyline;

/// Tessellates a point list with a [`StrokeStyle`].
///
/// The half width is half the style's width, and the overdraw fringe is
/// generated when the style is [`LineStyle::Smooth`](super::LineStyle::Smooth).
#[derive(Debug)]
pub struct TessellatePolyline<'a> {
    points: &'a [Point2],
    style: StrokeStyle,
    pixel_size: f32,
}

impl<'a> TessellatePolyline<'a> {
    /// Creates a new polyline tessellation operation.
    #[must_use]
    pub fn new(points: &'a [Point2], style: StrokeStyle, pixel_size: f32) -> Self {
        Self {
            points,
            style,
            pixel_size,
        }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 distinct points are provided, or if
    /// the pixel size is not positive while the style draws overdraw.
    pub fn execute(&self) -> Result<Polyline> {
        let join = self.style.join();
        Polyline::from_points(
            join,
            self.points,
            join.size_hint(self.points.len()),
            self.style.half_width(),
            self.pixel_size,
            self.style.style().draws_overdraw(),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tessellation::{LineJoin, LineStyle};

    fn corner() -> [Point2; 3] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        ]
    }

    #[test]
    fn smooth_style_draws_fringe() {
        let style = StrokeStyle::new(2.0, LineJoin::Bevel, LineStyle::Smooth).unwrap();
        let line = TessellatePolyline::new(&corner(), style, 1.0).execute().unwrap();
        assert_eq!(line.join(), LineJoin::Bevel);
        assert!(line.overdraw_vertices().is_some());
    }

    #[test]
    fn rough_style_skips_fringe() {
        let style = StrokeStyle::new(2.0, LineJoin::Miter, LineStyle::Rough).unwrap();
        let line = TessellatePolyline::new(&corner(), style, 1.0).execute().unwrap();
        assert!(line.overdraw_vertices().is_none());
        assert_eq!(line.core_vertices()[0], Point2::new(0.0, 1.0));
    }

    #[test]
    fn single_point_fails() {
        let points = [Point2::new(1.0, 1.0)];
        let op = TessellatePolyline::new(&points, StrokeStyle::default(), 1.0);
        assert!(op.execute().is_err());
    }
}
