use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TessellationError};

/// How consecutive segments of a polyline are connected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineJoin {
    /// Every segment is an independent quad; corners are left open.
    None,
    /// Segments meet at the intersection of their offset edges.
    #[default]
    Miter,
    /// The outer corner is cut flat between the two segment edges.
    Bevel,
}

impl LineJoin {
    /// All join styles, in declaration order.
    pub const ALL: [LineJoin; 3] = [LineJoin::None, LineJoin::Miter, LineJoin::Bevel];

    /// Expected number of sleeve vertices for `point_count` input points.
    ///
    /// Only a capacity hint; the exact count depends on the geometry.
    #[must_use]
    pub fn size_hint(self, point_count: usize) -> usize {
        match self {
            LineJoin::None | LineJoin::Bevel => (4 * point_count).saturating_sub(4),
            LineJoin::Miter => 2 * point_count,
        }
    }

    /// Returns the keyword used to name this join style.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LineJoin::None => "none",
            LineJoin::Miter => "miter",
            LineJoin::Bevel => "bevel",
        }
    }
}

impl fmt::Display for LineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineJoin {
    type Err = TessellationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "none" => Ok(LineJoin::None),
            "miter" => Ok(LineJoin::Miter),
            "bevel" => Ok(LineJoin::Bevel),
            other => Err(TessellationError::InvalidParameters(format!(
                "invalid line join mode '{other}', expected one of: none, miter, bevel"
            ))),
        }
    }
}

/// Whether lines get an alpha-faded fringe to fake antialiasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// Lines are drawn with an overdraw fringe.
    #[default]
    Smooth,
    /// Lines are drawn with hard edges.
    Rough,
}

impl LineStyle {
    /// Returns the keyword used to name this line style.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LineStyle::Smooth => "smooth",
            LineStyle::Rough => "rough",
        }
    }

    /// Returns `true` if this style requests the overdraw fringe.
    #[must_use]
    pub fn draws_overdraw(self) -> bool {
        matches!(self, LineStyle::Smooth)
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineStyle {
    type Err = TessellationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "smooth" => Ok(LineStyle::Smooth),
            "rough" => Ok(LineStyle::Rough),
            other => Err(TessellationError::InvalidParameters(format!(
                "invalid line style '{other}', expected one of: smooth, rough"
            ))),
        }
    }
}

/// Style parameters for polyline stroking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    width: f32,
    join: LineJoin,
    style: LineStyle,
}

impl StrokeStyle {
    /// Creates a new stroke style.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is not positive and finite.
    pub fn new(width: f32, join: LineJoin, style: LineStyle) -> Result<Self> {
        validate_width(width)?;
        Ok(Self { width, join, style })
    }

    /// Returns the stroke width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns half the stroke width.
    #[must_use]
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    /// Returns the join style.
    #[must_use]
    pub fn join(&self) -> LineJoin {
        self.join
    }

    /// Returns the line style.
    #[must_use]
    pub fn style(&self) -> LineStyle {
        self.style
    }

    /// Replaces the stroke width.
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is not positive and finite.
    pub fn set_width(&mut self, width: f32) -> Result<()> {
        validate_width(width)?;
        self.width = width;
        Ok(())
    }

    /// Replaces the join style.
    pub fn set_join(&mut self, join: LineJoin) {
        self.join = join;
    }

    /// Replaces the line style.
    pub fn set_style(&mut self, style: LineStyle) {
        self.style = style;
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            join: LineJoin::default(),
            style: LineStyle::default(),
        }
    }
}

fn validate_width(width: f32) -> Result<()> {
    if !(width.is_finite() && width > 0.0) {
        return Err(TessellationError::InvalidParameters(
            "stroke width must be positive".to_owned(),
        )
        .into());
    }
    Ok(())
}
