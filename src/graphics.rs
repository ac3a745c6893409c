//! Stateful line drawing: stroke style, colour and a transform stack.

use tracing::debug;

use crate::draw::{Color32, DrawState, Rasterizer};
use crate::error::{GraphicsError, Result};
use crate::math::transform_2d::approximate_scale;
use crate::math::{Affine2, Matrix3, Point2, Vector2};
use crate::tessellation::{LineJoin, LineStyle, Polyline, StrokeStyle, TessellatePolyline};

/// Maximum number of nested [`LineRenderer::push`] calls.
pub const MAX_STACK_DEPTH: usize = 128;

/// Lower bound of the pixel scale, so the pixel size stays finite.
pub const MIN_PIXEL_SCALE: f32 = 1e-6;

/// Draws polylines with the current line state.
///
/// Each stack entry pairs a transform with the pixel scale it implies;
/// the pixel scale sizes the antialiasing fringe so that it stays about one
/// device pixel wide under scaling.
#[derive(Debug, Clone)]
pub struct LineRenderer {
    stroke: StrokeStyle,
    color: Color32,
    transforms: Vec<Affine2>,
    pixel_scales: Vec<f32>,
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineRenderer {
    /// Creates a renderer with the default stroke, white colour and identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stroke: StrokeStyle::default(),
            color: Color32::WHITE,
            transforms: vec![Affine2::identity()],
            pixel_scales: vec![1.0],
        }
    }

    /// Width, join and style lines are drawn with.
    #[must_use]
    pub fn stroke(&self) -> &StrokeStyle {
        &self.stroke
    }

    /// Sets the line width.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is not a positive finite number.
    pub fn set_line_width(&mut self, width: f32) -> Result<()> {
        self.stroke.set_width(width)
    }

    /// Full line width in local units.
    #[must_use]
    pub fn line_width(&self) -> f32 {
        self.stroke.width()
    }

    /// Sets how consecutive segments are connected.
    pub fn set_line_join(&mut self, join: LineJoin) {
        self.stroke.set_join(join);
    }

    /// The current join style.
    #[must_use]
    pub fn line_join(&self) -> LineJoin {
        self.stroke.join()
    }

    /// Sets whether lines get an antialiasing fringe.
    pub fn set_line_style(&mut self, style: LineStyle) {
        self.stroke.set_style(style);
    }

    /// The current line style.
    #[must_use]
    pub fn line_style(&self) -> LineStyle {
        self.stroke.style()
    }

    /// Sets the constant colour of subsequent lines.
    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    /// The current line colour.
    #[must_use]
    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Number of active [`LineRenderer::push`] calls.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.transforms.len() - 1
    }

    /// Saves the current transform and pixel scale.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::StackOverflow`] after [`MAX_STACK_DEPTH`] pushes.
    pub fn push(&mut self) -> Result<()> {
        if self.stack_depth() == MAX_STACK_DEPTH {
            return Err(GraphicsError::StackOverflow.into());
        }
        let transform = *self.transform();
        let pixel_scale = self.pixel_scale();
        self.transforms.push(transform);
        self.pixel_scales.push(pixel_scale);
        Ok(())
    }

    /// Restores the transform and pixel scale saved by the matching push.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::StackUnderflow`] without a matching push.
    pub fn pop(&mut self) -> Result<()> {
        if self.stack_depth() == 0 {
            return Err(GraphicsError::StackUnderflow.into());
        }
        self.transforms.pop();
        self.pixel_scales.pop();
        Ok(())
    }

    /// The current transform.
    #[must_use]
    pub fn transform(&self) -> &Affine2 {
        // the stack always holds the base entry
        &self.transforms[self.transforms.len() - 1]
    }

    /// Average scale of the current transform, as tracked by the stack.
    #[must_use]
    pub fn pixel_scale(&self) -> f32 {
        self.pixel_scales[self.pixel_scales.len() - 1]
    }

    /// Size of one device pixel in the current coordinate system.
    #[must_use]
    pub fn pixel_size(&self) -> f32 {
        1.0 / self.pixel_scale().max(MIN_PIXEL_SCALE)
    }

    /// Moves the origin by `(x, y)`.
    pub fn translate(&mut self, x: f32, y: f32) {
        self.compose(&Matrix3::new_translation(&Vector2::new(x, y)));
    }

    /// Rotates by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        self.compose(&Matrix3::new_rotation(angle));
    }

    /// Scales the axes by `sx` and `sy`.
    ///
    /// The pixel scale grows by the mean of the absolute factors.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.compose(&Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy)));
        *self.pixel_scale_mut() *= (sx.abs() + sy.abs()) / 2.0;
    }

    /// Shears x by `kx * y` and y by `ky * x`.
    pub fn shear(&mut self, kx: f32, ky: f32) {
        #[rustfmt::skip]
        let m = Matrix3::new(
            1.0, kx, 0.0,
            ky, 1.0, 0.0,
            0.0, 0.0, 1.0,
        );
        self.compose(&m);
    }

    /// Resets the current transform to the identity.
    pub fn origin(&mut self) {
        *self.transform_mut() = Affine2::identity();
        *self.pixel_scale_mut() = 1.0;
    }

    /// Multiplies the current transform by `transform`.
    pub fn apply_transform(&mut self, transform: &Affine2) {
        let current = *self.transform() * transform;
        self.set_transform_and_scale(current);
    }

    /// Replaces the current transform with `transform`.
    pub fn replace_transform(&mut self, transform: Affine2) {
        self.set_transform_and_scale(transform);
    }

    /// Maps a point from local coordinates to device coordinates.
    #[must_use]
    pub fn transform_point(&self, point: &Point2) -> Point2 {
        self.transform() * point
    }

    /// Maps a point from device coordinates back to local coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidParameter`] if the current transform is singular.
    pub fn inverse_transform_point(&self, point: &Point2) -> Result<Point2> {
        let inverse = self.transform().try_inverse().ok_or_else(|| {
            GraphicsError::InvalidParameter("current transform is not invertible".to_owned())
        })?;
        Ok(inverse * point)
    }

    /// Tessellates and draws a flat `[x0, y0, x1, y1, ...]` coordinate list
    /// with the current line state.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinates do not describe a polyline or the
    /// rasterizer fails.
    pub fn polyline<R: Rasterizer + ?Sized>(&self, coords: &[f32], rasterizer: &mut R) -> Result<()> {
        let join = self.line_join();
        let line = Polyline::tessellate(
            join,
            coords,
            self.stroke.half_width(),
            self.pixel_size(),
            self.line_style().draws_overdraw(),
        )?;
        self.submit(&line, rasterizer)
    }

    /// Like [`LineRenderer::polyline`], for a point list.
    ///
    /// # Errors
    ///
    /// See [`LineRenderer::polyline`].
    pub fn polyline_points<R: Rasterizer + ?Sized>(
        &self,
        points: &[Point2],
        rasterizer: &mut R,
    ) -> Result<()> {
        let line = TessellatePolyline::new(points, self.stroke, self.pixel_size()).execute()?;
        self.submit(&line, rasterizer)
    }

    fn submit<R: Rasterizer + ?Sized>(&self, line: &Polyline, rasterizer: &mut R) -> Result<()> {
        debug!(
            join = %self.line_join(),
            style = %self.line_style(),
            pixel_size = self.pixel_size(),
            "drawing polyline"
        );
        let state = DrawState {
            color: self.color,
            transform: Some(*self.transform()),
        };
        line.draw(rasterizer, &state)
    }

    fn compose(&mut self, m: &Matrix3) {
        let current = self.transform_mut();
        *current = *current * Affine2::from_matrix_unchecked(*m);
    }

    fn set_transform_and_scale(&mut self, transform: Affine2) {
        let (sx, sy) = approximate_scale(&transform);
        *self.transform_mut() = transform;
        *self.pixel_scale_mut() = (sx + sy) / 2.0;
    }

    fn transform_mut(&mut self) -> &mut Affine2 {
        let top = self.transforms.len() - 1;
        &mut self.transforms[top]
    }

    fn pixel_scale_mut(&mut self) -> &mut f32 {
        let top = self.pixel_scales.len() - 1;
        &mut self.pixel_scales[top]
    }
}
