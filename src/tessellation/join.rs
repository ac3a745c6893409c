//! Per-corner boundary geometry for each [`LineJoin`].
//!
//! Every strategy receives the state of the incoming segment `p → q`, the
//! corner `q` and the next point `r`, appends the boundary vertices anchored
//! at `q`, and returns the state of the outgoing segment `q → r`.

use tracing::trace;

use crate::math::vector_2d::cross;
use crate::math::{Point2, Vector2};

use super::line_style::LineJoin;
use super::segment::{SegmentState, SleeveBuilder};

/// Adjacent segments whose directions differ by less than about 3 degrees
/// are treated as straight.
pub const LINES_PARALLEL_EPS: f32 = 0.05;

impl LineJoin {
    /// Emits the boundary vertices at corner `q` and advances to the segment `q → r`.
    pub fn render_edge(
        self,
        sleeve: &mut SleeveBuilder,
        incoming: SegmentState,
        q: Point2,
        r: Point2,
        half_width: f32,
    ) -> SegmentState {
        match self {
            LineJoin::None => none_edge(sleeve, incoming, q, r, half_width),
            LineJoin::Miter => miter_edge(sleeve, incoming, q, r, half_width),
            LineJoin::Bevel => bevel_edge(sleeve, incoming, q, r, half_width),
        }
    }
}

/// How the outgoing segment relates to the incoming one.
enum Corner {
    /// Nearly collinear, same heading.
    Straight,
    /// Nearly collinear, heading back the way it came.
    Reversal,
    /// A real turn; `det` is `s × t` (positive for a left turn).
    Turn { det: f32 },
}

fn classify(incoming: &SegmentState, outgoing: &SegmentState) -> Corner {
    let det = cross(&incoming.direction, &outgoing.direction);
    if det.abs() / (incoming.length * outgoing.length) < LINES_PARALLEL_EPS {
        if incoming.direction.dot(&outgoing.direction) > 0.0 {
            Corner::Straight
        } else {
            Corner::Reversal
        }
    } else {
        Corner::Turn { det }
    }
}

/// Closes the incoming segment with a cap and opens the outgoing one with another.
///
/// Emits `q + ns`, `q - ns`, `q - nt`, `q + nt`. After the first two vertices
/// of the whole sleeve are dropped, every run of four is one segment quad.
fn none_edge(
    sleeve: &mut SleeveBuilder,
    incoming: SegmentState,
    q: Point2,
    r: Point2,
    half_width: f32,
) -> SegmentState {
    sleeve.push_pair(q, incoming.normal);

    let outgoing = SegmentState::new(r - q, half_width);
    sleeve.push(q, -outgoing.normal);
    sleeve.push(q, outgoing.normal);
    outgoing
}

/// Offsets `q` to the intersection of the two offset edges.
///
/// With `s = q - p`, `t = r - q` and their half-width normals `ns`, `nt`, the
/// left boundary point solves
///
/// ```text
/// q + ns + lambda * s = q + nt + mu * t
///     lambda * s - mu * t = nt - ns
/// ```
///
/// By Cramer's rule `lambda = ((nt - ns) × t) / (s × t)` and the offset is
/// `d = ns + lambda * s`. The right boundary point is `q - d`.
fn miter_edge(
    sleeve: &mut SleeveBuilder,
    incoming: SegmentState,
    q: Point2,
    r: Point2,
    half_width: f32,
) -> SegmentState {
    let outgoing = SegmentState::new(r - q, half_width);

    match classify(&incoming, &outgoing) {
        Corner::Straight => sleeve.push_pair(q, incoming.normal),
        Corner::Reversal => {
            // zero-area quad absorbs the flip of the normals
            trace!(?q, "miter join at reversal");
            sleeve.push_pair(q, incoming.normal);
            sleeve.push_pair(q, outgoing.normal);
        }
        Corner::Turn { det } => {
            let d = miter_offset(&incoming, &outgoing, det);
            sleeve.push_pair(q, d);
        }
    }

    outgoing
}

/// Cuts the outer corner flat between `q + ns` and `q + nt`.
///
/// The inner corner is the miter point `q ∓ d`. The vertex order keeps the
/// strip winding consistent:
///
/// ```text
/// left turn  (det > 0): d, -ns, d, -nt
/// right turn (det < 0): ns, -d, nt, -d
/// ```
fn bevel_edge(
    sleeve: &mut SleeveBuilder,
    incoming: SegmentState,
    q: Point2,
    r: Point2,
    half_width: f32,
) -> SegmentState {
    let outgoing = SegmentState::new(r - q, half_width);
    let ns = incoming.normal;
    let nt = outgoing.normal;

    match classify(&incoming, &outgoing) {
        Corner::Straight => sleeve.push_pair(q, nt),
        Corner::Reversal => {
            trace!(?q, "bevel join at reversal");
            sleeve.push_pair(q, ns);
            sleeve.push_pair(q, nt);
        }
        Corner::Turn { det } => {
            let d = miter_offset(&incoming, &outgoing, det);
            if det > 0.0 {
                sleeve.push(q, d);
                sleeve.push(q, -ns);
                sleeve.push(q, d);
                sleeve.push(q, -nt);
            } else {
                sleeve.push(q, ns);
                sleeve.push(q, -d);
                sleeve.push(q, nt);
                sleeve.push(q, -d);
            }
        }
    }

    outgoing
}

fn miter_offset(incoming: &SegmentState, outgoing: &SegmentState, det: f32) -> Vector2 {
    let lambda = cross(&(outgoing.normal - incoming.normal), &outgoing.direction) / det;
    incoming.normal + incoming.direction * lambda
}
