use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One straight stroke drawn by the turtle.
///
/// Segments are emitted in visitation order and never modified afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,

    /// `1 / (branch depth + 2)`: trunk strokes are thickest.
    pub width: f32,
}

impl LineSegment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Axis-aligned bounds of a set of segments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl SegmentBounds {
    /// Bounds over every endpoint, or `None` for an empty slice.
    pub fn from_segments(segments: &[LineSegment]) -> Option<Self> {
        let mut points = segments.iter().flat_map(|s| [s.start, s.end]);
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    /// Largest absolute coordinate, rounded up.
    ///
    /// Framing a cube of this half-width around the origin contains every
    /// segment; renderers use it as their scale.
    pub fn half_extent(&self) -> f32 {
        self.min.abs().max(self.max.abs()).max_element().ceil()
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}
