//! Axis-aligned bounding-box collision detection
//!
//! Every entity in the play field is a rectangle; overlap is the only
//! collision primitive the simulation needs.

use glam::Vec2;

/// An axis-aligned bounding box, stored as top-left corner + size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Overlap test. Boxes that merely share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_min = self.min();
        let a_max = self.max();
        let b_min = other.min();
        let b_max = other.max();

        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }

    /// Check if a point is inside the box (edges inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// True when the box lies fully outside a field of `width` × `height`,
    /// beyond the given margin on any side
    pub fn outside_field(&self, width: f32, height: f32, margin: f32) -> bool {
        let min = self.min();
        let max = self.max();
        max.x < -margin || min.x > width + margin || max.y < -margin || min.y > height + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_hit() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_miss() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_overlap_edge_touch_is_miss() {
        // Sharing an edge exactly should not count as a hit
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_overlap_containment() {
        let outer = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        let inner = Aabb::new(Vec2::new(40.0, 40.0), Vec2::new(10.0, 10.0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_contains_point() {
        let a = Aabb::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert!(a.contains_point(Vec2::new(15.0, 15.0)));
        assert!(a.contains_point(Vec2::new(10.0, 10.0)));
        assert!(!a.contains_point(Vec2::new(31.0, 15.0)));
    }

    #[test]
    fn test_outside_field() {
        // 100x100 field, margin 10
        let inside = Aabb::new(Vec2::new(50.0, 50.0), Vec2::new(10.0, 10.0));
        assert!(!inside.outside_field(100.0, 100.0, 10.0));

        // Straddling the edge is still inside
        let straddle = Aabb::new(Vec2::new(-5.0, 50.0), Vec2::new(10.0, 10.0));
        assert!(!straddle.outside_field(100.0, 100.0, 10.0));

        // Past the bottom margin
        let below = Aabb::new(Vec2::new(50.0, 111.0), Vec2::new(10.0, 10.0));
        assert!(below.outside_field(100.0, 100.0, 10.0));

        // Past the top margin
        let above = Aabb::new(Vec2::new(50.0, -25.0), Vec2::new(10.0, 10.0));
        assert!(above.outside_field(100.0, 100.0, 10.0));
    }
}
