use crate::math::vector_2d::perpendicular;
use crate::math::{Point2, Vector2};

/// Running description of the segment that ends at the current corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentState {
    /// Un-normalized direction of the segment.
    pub direction: Vector2,
    /// Length of `direction`.
    pub length: f32,
    /// Left normal of the segment, scaled to the half width.
    pub normal: Vector2,
}

impl SegmentState {
    /// Describes the segment with the given direction for a sleeve of `half_width`.
    #[must_use]
    pub fn new(direction: Vector2, half_width: f32) -> Self {
        let length = direction.norm();
        Self {
            direction,
            length,
            normal: perpendicular(&direction, half_width / length),
        }
    }
}

/// Parallel anchor/normal buffers collected while walking a polyline.
///
/// Vertex `i` of the sleeve is `anchors[i] + normals[i]`.
#[derive(Debug, Default)]
pub struct SleeveBuilder {
    anchors: Vec<Point2>,
    normals: Vec<Vector2>,
}

impl SleeveBuilder {
    /// Creates an empty builder with room for `capacity` vertices.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            anchors: Vec::with_capacity(capacity),
            normals: Vec::with_capacity(capacity),
        }
    }

    /// Appends one boundary vertex offset from `anchor` by `normal`.
    pub fn push(&mut self, anchor: Point2, normal: Vector2) {
        self.anchors.push(anchor);
        self.normals.push(normal);
    }

    /// Appends the left/right pair `anchor + normal`, `anchor - normal`.
    pub fn push_pair(&mut self, anchor: Point2, normal: Vector2) {
        self.push(anchor, normal);
        self.push(anchor, -normal);
    }

    /// Number of vertices collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.normals.len()
    }

    /// Returns `true` if no vertex has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normals.is_empty()
    }

    /// Anchor points, one per vertex.
    #[must_use]
    pub fn anchors(&self) -> &[Point2] {
        &self.anchors
    }

    /// Offset normals, one per vertex.
    #[must_use]
    pub fn normals(&self) -> &[Vector2] {
        &self.normals
    }

    /// Resolves the final vertex positions.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Point2> + '_ {
        self.anchors
            .iter()
            .zip(&self.normals)
            .map(|(anchor, normal)| anchor + normal)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn state_normal_has_half_width_length() {
        let state = SegmentState::new(Vector2::new(0.0, 4.0), 0.5);
        assert_eq!(state.length, 4.0);
        assert_eq!(state.normal, Vector2::new(-0.5, 0.0));
    }

    #[test]
    fn pair_mirrors_normal() {
        let mut sleeve = SleeveBuilder::with_capacity(2);
        assert!(sleeve.is_empty());
        sleeve.push_pair(Point2::new(1.0, 1.0), Vector2::new(0.0, 2.0));
        let positions: Vec<_> = sleeve.positions().collect();
        assert_eq!(positions, vec![Point2::new(1.0, 3.0), Point2::new(1.0, -1.0)]);
        assert_eq!(sleeve.len(), 2);
        assert_eq!(sleeve.anchors()[0], sleeve.anchors()[1]);
    }
}
