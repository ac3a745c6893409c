mod join;
mod line_style;
mod overdraw;
mod polyline;
mod segment;
mod tessellate_polyline;

pub use join::LINES_PARALLEL_EPS;
pub use line_style::{LineJoin, LineStyle, StrokeStyle};
pub use overdraw::{
    fill_color_array, fringe_is_opaque, overdraw_vertex_count, render_overdraw, shrunk_half_width,
    MIN_CORE_FRACTION, OVERDRAW_SHRINK,
};
pub use polyline::Polyline;
pub use segment::{SegmentState, SleeveBuilder};
pub use tessellate_polyline::TessellatePolyline;
