use std::ops::Range;

use tracing::debug;

use crate::draw::DrawMode;
use crate::error::{Result, TessellationError};
use crate::math::vector_2d::bit_identical;
use crate::math::Point2;

use super::line_style::LineJoin;
use super::overdraw::{overdraw_vertex_count, render_overdraw, shrunk_half_width};
use super::segment::{SegmentState, SleeveBuilder};

/// Vertices in the degenerate strip that separates the core line from its fringe.
const BRIDGE_VERTEX_COUNT: usize = 2;

/// Sleeve vertices at each end of a [`LineJoin::None`] line that only cap the
/// virtual segments before the first and after the last point.
const NONE_JOIN_REDUNDANT_CAP: usize = 2;

impl LineJoin {
    /// Topology the sleeve of this join style is drawn with.
    #[must_use]
    pub fn draw_mode(self) -> DrawMode {
        match self {
            LineJoin::None => DrawMode::TriangleList,
            LineJoin::Miter | LineJoin::Bevel => DrawMode::TriangleStrip,
        }
    }
}

/// A tessellated thick line, ready to be drawn once.
///
/// All vertices live in one buffer laid out as `[core | bridge | fringe]`.
/// The bridge and fringe exist only when overdraw was requested; the bridge
/// only for strip topology.
#[derive(Debug, Clone)]
pub struct Polyline {
    join: LineJoin,
    vertices: Vec<Point2>,
    core_vertex_count: usize,
    overdraw: Option<Range<usize>>,
    is_looping: bool,
}

impl Polyline {
    /// Tessellates a flat `[x0, y0, x1, y1, ...]` coordinate list.
    ///
    /// `size_hint` pre-sizes the working buffers; `half_width` is half the
    /// line width and `pixel_size` the size of one device pixel in the same
    /// units, used for the overdraw fringe.
    ///
    /// # Errors
    ///
    /// Returns an error if `coords` has an odd length or fewer than two
    /// points, or if the widths are invalid (see [`Polyline::from_points`]).
    pub fn render(
        join: LineJoin,
        coords: &[f32],
        size_hint: usize,
        half_width: f32,
        pixel_size: f32,
        draw_overdraw: bool,
    ) -> Result<Self> {
        if coords.len() % 2 != 0 {
            return Err(TessellationError::InvalidParameters(format!(
                "coordinate count must be even, got {}",
                coords.len()
            ))
            .into());
        }
        let points: Vec<Point2> = coords
            .chunks_exact(2)
            .map(|xy| Point2::new(xy[0], xy[1]))
            .collect();
        Self::from_points(join, &points, size_hint, half_width, pixel_size, draw_overdraw)
    }

    /// Like [`Polyline::render`], with the buffer size hint derived from the join style.
    ///
    /// # Errors
    ///
    /// See [`Polyline::render`].
    pub fn tessellate(
        join: LineJoin,
        coords: &[f32],
        half_width: f32,
        pixel_size: f32,
        draw_overdraw: bool,
    ) -> Result<Self> {
        let size_hint = join.size_hint(coords.len() / 2);
        Self::render(join, coords, size_hint, half_width, pixel_size, draw_overdraw)
    }

    /// Tessellates a point list.
    ///
    /// The line is closed when its first and last points are bit-identical.
    /// Consecutive points that compare equal are collapsed, so `0.0` and
    /// `-0.0` never form a zero-length segment.
    ///
    /// # Errors
    ///
    /// - `TessellationError::InvalidParameters` if fewer than two points are
    ///   given, `half_width` is not positive, or overdraw is requested with a
    ///   non-positive `pixel_size`
    /// - `TessellationError::Degenerate` if all points coincide
    pub fn from_points(
        join: LineJoin,
        points: &[Point2],
        size_hint: usize,
        half_width: f32,
        pixel_size: f32,
        draw_overdraw: bool,
    ) -> Result<Self> {
        validate(points, half_width, pixel_size, draw_overdraw)?;

        let is_looping = bit_identical(&points[0], &points[points.len() - 1]);
        let mut path = points.to_vec();
        path.dedup_by(|a, b| a == b);
        if path.len() < 2 {
            return Err(TessellationError::Degenerate(format!(
                "all {} points coincide",
                points.len()
            ))
            .into());
        }

        let half_width = if draw_overdraw {
            shrunk_half_width(half_width, pixel_size)
        } else {
            half_width
        };

        let sleeve = build_sleeve(join, &path, is_looping, size_hint, half_width);
        let line = Self::assemble(join, &sleeve, is_looping, pixel_size, draw_overdraw);

        debug!(
            %join,
            points = path.len(),
            is_looping,
            core = line.core_vertex_count,
            total = line.vertices.len(),
            "tessellated polyline"
        );
        Ok(line)
    }

    /// Lays out `[core | bridge | fringe]` from the sleeve.
    fn assemble(
        join: LineJoin,
        sleeve: &SleeveBuilder,
        is_looping: bool,
        pixel_size: f32,
        draw_overdraw: bool,
    ) -> Self {
        let sleeve_len = sleeve.len();
        let core_range = match join {
            LineJoin::None => NONE_JOIN_REDUNDANT_CAP..sleeve_len - NONE_JOIN_REDUNDANT_CAP,
            LineJoin::Miter | LineJoin::Bevel => 0..sleeve_len,
        };
        let core_vertex_count = core_range.len();

        let (bridge, fringe) = if draw_overdraw {
            let bridge = match join.draw_mode() {
                DrawMode::TriangleStrip => BRIDGE_VERTEX_COUNT,
                DrawMode::TriangleList => 0,
            };
            (bridge, overdraw_vertex_count(join, sleeve_len, is_looping))
        } else {
            (0, 0)
        };
        let total = core_vertex_count + bridge + fringe;

        let mut vertices = Vec::with_capacity(total);
        vertices.extend(
            sleeve
                .positions()
                .skip(core_range.start)
                .take(core_vertex_count),
        );
        vertices.resize(total, Point2::origin());

        let overdraw = draw_overdraw.then(|| {
            let start = core_vertex_count + bridge;
            let (head, tail) = vertices.split_at_mut(start);
            render_overdraw(
                join,
                &head[..core_vertex_count],
                &sleeve.normals()[core_range.clone()],
                pixel_size,
                is_looping,
                tail,
            );
            if bridge == BRIDGE_VERTEX_COUNT {
                vertices[core_vertex_count] = vertices[core_vertex_count - 1];
                vertices[core_vertex_count + 1] = vertices[start];
            }
            start..total
        });

        Self {
            join,
            vertices,
            core_vertex_count,
            overdraw,
            is_looping,
        }
    }

    /// The join style this line was built with.
    #[must_use]
    pub fn join(&self) -> LineJoin {
        self.join
    }

    /// Topology of [`Polyline::vertices`].
    #[must_use]
    pub fn draw_mode(&self) -> DrawMode {
        self.join.draw_mode()
    }

    /// Whether the input path was closed.
    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    /// The whole vertex buffer: core, bridge and fringe.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Number of vertices in [`Polyline::vertices`].
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The sleeve around the path.
    #[must_use]
    pub fn core_vertices(&self) -> &[Point2] {
        &self.vertices[..self.core_vertex_count]
    }

    /// The degenerate vertices between core and fringe, empty without overdraw
    /// or for list topology.
    #[must_use]
    pub fn bridge_vertices(&self) -> &[Point2] {
        let end = self
            .overdraw
            .as_ref()
            .map_or(self.core_vertex_count, |fringe| fringe.start);
        &self.vertices[self.core_vertex_count..end]
    }

    /// The antialiasing fringe, if overdraw was requested.
    #[must_use]
    pub fn overdraw_vertices(&self) -> Option<&[Point2]> {
        self.overdraw.clone().map(|fringe| &self.vertices[fringe])
    }

    /// Range of the fringe inside [`Polyline::vertices`].
    #[must_use]
    pub fn overdraw_range(&self) -> Option<Range<usize>> {
        self.overdraw.clone()
    }
}

/// Walks the path and collects the boundary vertices of every corner.
fn build_sleeve(
    join: LineJoin,
    path: &[Point2],
    is_looping: bool,
    size_hint: usize,
    half_width: f32,
) -> SleeveBuilder {
    let n = path.len();
    // the segment before the first point: from the second-to-last point when
    // closed, otherwise the first segment mirrored through the first point
    let initial = if is_looping {
        path[0] - path[n - 2]
    } else {
        path[1] - path[0]
    };

    let mut sleeve = SleeveBuilder::with_capacity(size_hint);
    let mut state = SegmentState::new(initial, half_width);
    for pair in path.windows(2) {
        state = join.render_edge(&mut sleeve, state, pair[0], pair[1], half_width);
    }

    let q = path[n - 1];
    let r = if is_looping {
        path[1]
    } else {
        q + state.direction
    };
    join.render_edge(&mut sleeve, state, q, r, half_width);
    sleeve
}

fn validate(points: &[Point2], half_width: f32, pixel_size: f32, draw_overdraw: bool) -> Result<()> {
    if points.len() < 2 {
        return Err(TessellationError::InvalidParameters(
            "at least 2 points are required for polyline tessellation".to_owned(),
        )
        .into());
    }
    if !(half_width.is_finite() && half_width > 0.0) {
        return Err(TessellationError::InvalidParameters(format!(
            "half width must be positive, got {half_width}"
        ))
        .into());
    }
    if draw_overdraw && !(pixel_size.is_finite() && pixel_size > 0.0) {
        return Err(TessellationError::InvalidParameters(format!(
            "pixel size must be positive when drawing overdraw, got {pixel_size}"
        ))
        .into());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::tessellation::overdraw::fringe_is_opaque;

    const CORNER: [f32; 6] = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0];
    const SQUARE: [f32; 10] = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0, 0.0, 0.0];

    fn straight(points: usize) -> Vec<f32> {
        (0..points).flat_map(|i| [i as f32 * 5.0, 0.0]).collect()
    }

    #[test]
    fn miter_corner_example() {
        let line = Polyline::tessellate(LineJoin::Miter, &CORNER, 1.0, 1.0, false).unwrap();
        let v = line.core_vertices();

        assert_eq!(line.draw_mode(), DrawMode::TriangleStrip);
        assert_eq!(v.len(), 6);
        assert_relative_eq!(v[0], Point2::new(0.0, 1.0));
        assert_relative_eq!(v[1], Point2::new(0.0, -1.0));
        // d = ns + s * lambda with ns = (0, 1), s = (10, 0), lambda = -0.1
        assert_relative_eq!(v[2], Point2::new(9.0, 1.0), epsilon = 1e-5);
        assert_relative_eq!(v[3], Point2::new(11.0, -1.0), epsilon = 1e-5);
        assert_relative_eq!(v[4], Point2::new(9.0, 10.0), epsilon = 1e-5);
        assert_relative_eq!(v[5], Point2::new(11.0, 10.0), epsilon = 1e-5);
        assert!(line.overdraw_vertices().is_none());
        assert!(line.bridge_vertices().is_empty());
    }

    #[test]
    fn core_counts_follow_join_style() {
        for n in 2..6 {
            let coords = straight(n);
            let miter = Polyline::tessellate(LineJoin::Miter, &coords, 1.0, 1.0, false).unwrap();
            let bevel = Polyline::tessellate(LineJoin::Bevel, &coords, 1.0, 1.0, false).unwrap();
            let none = Polyline::tessellate(LineJoin::None, &coords, 1.0, 1.0, false).unwrap();
            assert_eq!(miter.core_vertices().len(), 2 * n);
            assert_eq!(bevel.core_vertices().len(), 2 * n);
            assert_eq!(none.core_vertices().len(), 4 * n - 4);
        }
    }

    #[test]
    fn core_count_is_always_even() {
        let zigzag = [0.0, 0.0, 3.0, 4.0, 6.0, 0.0, 9.0, 4.0, 9.5, -2.0];
        for join in LineJoin::ALL {
            let line = Polyline::tessellate(join, &zigzag, 0.5, 1.0, false).unwrap();
            assert_eq!(line.core_vertices().len() % 2, 0);
        }
    }

    #[test]
    fn collinear_points_stay_on_the_sleeve() {
        let coords = [0.0, 0.0, 5.0, 0.0, 10.0, 0.0];
        for join in [LineJoin::Miter, LineJoin::Bevel] {
            let line = Polyline::tessellate(join, &coords, 2.0, 1.0, false).unwrap();
            let v = line.core_vertices();
            assert_eq!(v.len(), 6);
            for (pair, x) in v.chunks_exact(2).zip([0.0, 5.0, 10.0]) {
                assert_eq!(pair[0], Point2::new(x, 2.0));
                assert_eq!(pair[1], Point2::new(x, -2.0));
            }
        }
    }

    #[test]
    fn none_join_quads() {
        let line = Polyline::tessellate(LineJoin::None, &CORNER, 1.0, 1.0, false).unwrap();
        let v = line.core_vertices();
        assert_eq!(line.draw_mode(), DrawMode::TriangleList);
        assert_eq!(v.len(), 8);
        // first segment: (0,0) -> (10,0)
        assert_eq!(&v[..4], &[
            Point2::new(0.0, -1.0),
            Point2::new(0.0, 1.0),
            Point2::new(10.0, 1.0),
            Point2::new(10.0, -1.0),
        ]);
        // second segment: (10,0) -> (10,10)
        assert_eq!(&v[4..], &[
            Point2::new(11.0, 0.0),
            Point2::new(9.0, 0.0),
            Point2::new(9.0, 10.0),
            Point2::new(11.0, 10.0),
        ]);
    }

    #[test]
    fn looping_path_closes_on_second_point() {
        let line = Polyline::tessellate(LineJoin::Miter, &SQUARE, 1.0, 1.0, false).unwrap();
        assert!(line.is_looping());
        let v = line.core_vertices();
        // one corner per input point; the first and last corners coincide
        assert_eq!(v.len(), 10);
        assert_relative_eq!(v[0], Point2::new(1.0, 1.0), epsilon = 1e-5);
        assert_relative_eq!(v[1], Point2::new(-1.0, -1.0), epsilon = 1e-5);
        assert_relative_eq!(v[8], v[0], epsilon = 1e-5);
        assert_relative_eq!(v[9], v[1], epsilon = 1e-5);
    }

    #[test]
    fn looping_fringe_has_no_end_caps() {
        let closed = Polyline::tessellate(LineJoin::Bevel, &SQUARE, 2.0, 1.0, true).unwrap();
        let core = closed.core_vertices().len();
        assert_eq!(closed.overdraw_vertices().unwrap().len(), 2 * core);

        let open = Polyline::tessellate(LineJoin::Bevel, &CORNER, 2.0, 1.0, true).unwrap();
        let core = open.core_vertices().len();
        assert_eq!(open.overdraw_vertices().unwrap().len(), 2 * core + 2);
    }

    #[test]
    fn overdraw_shrinks_the_sleeve() {
        let coords = [0.0, 0.0, 10.0, 0.0];
        let line = Polyline::tessellate(LineJoin::Miter, &coords, 2.0, 1.0, true).unwrap();
        assert_relative_eq!(line.core_vertices()[0], Point2::new(0.0, 1.7), epsilon = 1e-5);
    }

    #[test]
    fn strip_overdraw_layout() {
        let line = Polyline::tessellate(LineJoin::Miter, &CORNER, 1.0, 1.0, true).unwrap();
        let core = line.core_vertices().len();
        let fringe = line.overdraw_range().unwrap();

        assert_eq!(fringe.start, core + 2);
        assert_eq!(fringe.end, line.vertex_count());
        assert_eq!(line.overdraw_vertices().unwrap().len(), 2 * core + 2);

        let bridge = line.bridge_vertices();
        assert_eq!(bridge.len(), 2);
        assert_eq!(bridge[0], line.core_vertices()[core - 1]);
        assert_eq!(bridge[1], line.vertices()[fringe.start]);
    }

    #[test]
    fn list_overdraw_has_no_bridge() {
        let line = Polyline::tessellate(LineJoin::None, &CORNER, 1.0, 1.0, true).unwrap();
        let core = line.core_vertices().len();
        let fringe = line.overdraw_range().unwrap();

        assert!(line.bridge_vertices().is_empty());
        assert_eq!(fringe.start, core);
        assert_eq!(fringe.start % 4, 0);
        // 4 * (untrimmed core - 2)
        assert_eq!(fringe.len(), 4 * (core + 4 - 2));
        assert!(!fringe_is_opaque(LineJoin::None, 1));
    }

    #[test]
    fn repeated_points_are_skipped() {
        let coords = [0.0, 0.0, 10.0, 0.0, 10.0, 0.0, 10.0, 10.0];
        let line = Polyline::tessellate(LineJoin::Miter, &coords, 1.0, 1.0, false).unwrap();
        assert_eq!(line.core_vertices().len(), 6);
        assert!(line
            .core_vertices()
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn signed_zero_repeats_are_skipped() {
        let coords = [0.0, 0.0, -0.0, 0.0, 10.0, 0.0, 10.0, 10.0];
        for join in LineJoin::ALL {
            let line = Polyline::tessellate(join, &coords, 1.0, 1.0, false).unwrap();
            let reference = Polyline::tessellate(join, &CORNER, 1.0, 1.0, false).unwrap();
            assert_eq!(line.core_vertices().len(), reference.core_vertices().len());
            assert!(line
                .core_vertices()
                .iter()
                .all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn thin_smooth_line_stays_finite() {
        // the overdraw shrink alone would collapse the sleeve to zero width
        let coords = [0.0, 0.0, 10.0, 0.0];
        for join in LineJoin::ALL {
            let line = Polyline::tessellate(join, &coords, 0.3, 1.0, true).unwrap();
            assert!(line
                .vertices()
                .iter()
                .all(|p| p.x.is_finite() && p.y.is_finite()));
            assert!(line.core_vertices()[0].y.abs() > 0.0);
        }
    }

    #[test]
    fn render_respects_explicit_size_hint() {
        let line = Polyline::render(LineJoin::Bevel, &CORNER, 0, 1.0, 1.0, false).unwrap();
        assert_eq!(line.join(), LineJoin::Bevel);
        assert_eq!(line.core_vertices().len(), 8);
    }

    #[test]
    fn invalid_inputs_fail() {
        assert!(Polyline::tessellate(LineJoin::Miter, &[0.0, 0.0, 1.0], 1.0, 1.0, false).is_err());
        assert!(Polyline::tessellate(LineJoin::Miter, &[0.0, 0.0], 1.0, 1.0, false).is_err());
        assert!(Polyline::tessellate(LineJoin::Miter, &CORNER, 0.0, 1.0, false).is_err());
        assert!(Polyline::tessellate(LineJoin::Miter, &CORNER, 1.0, 0.0, true).is_err());
        assert!(Polyline::tessellate(LineJoin::Miter, &[1.0, 1.0, 1.0, 1.0], 1.0, 1.0, false).is_err());
    }
}
