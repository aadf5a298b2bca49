//! Scene geometry on the storyboard strip.
//!
//! Scenes are axis-aligned rectangles on an infinite horizontal strip sharing
//! a common `top`. The reconciler only ever moves scenes along the x axis, so
//! the operations here are mostly about horizontal intervals.

/// A scene rectangle in canvas units: position plus size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SceneRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl SceneRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    /// The right edge (exclusive): `left + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.left + self.width
    }

    /// The bottom edge (exclusive): `top + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.top + self.height
    }

    /// The same rectangle moved to a new left position.
    #[inline]
    pub const fn with_left(self, left: i32) -> SceneRect {
        SceneRect { left, ..self }
    }

    /// Whether the horizontal intervals `[left, right)` of the two rectangles
    /// overlap. Scenes that merely touch edges do not overlap.
    #[inline]
    pub const fn overlaps_horizontally(self, other: SceneRect) -> bool {
        self.left < other.right() && other.left < self.right()
    }

    /// Horizontal distance from this rectangle's left edge to `other`'s.
    #[inline]
    pub const fn left_gap_to(self, other: SceneRect) -> i32 {
        other.left - self.left
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_new_and_default() {
        let r = SceneRect::new(212, 128, 700, 759);
        assert_eq!(r.left, 212);
        assert_eq!(r.top, 128);
        assert_eq!(r.width, 700);
        assert_eq!(r.height, 759);
        assert_eq!(SceneRect::default(), SceneRect::new(0, 0, 0, 0));
    }

    #[test]
    fn rect_right_bottom() {
        let r = SceneRect::new(212, 128, 700, 759);
        assert_eq!(r.right(), 912);
        assert_eq!(r.bottom(), 887);
    }

    #[test]
    fn rect_with_left() {
        let r = SceneRect::new(1808, 128, 700, 700);
        let moved = r.with_left(992);
        assert_eq!(moved, SceneRect::new(992, 128, 700, 700));
        // Size and top are untouched.
        assert_eq!(moved.width, r.width);
        assert_eq!(moved.top, r.top);
    }

    #[test]
    fn rect_horizontal_overlap() {
        let a = SceneRect::new(212, 128, 700, 759);
        let b = SceneRect::new(900, 128, 700, 700);
        assert!(a.overlaps_horizontally(b));
        assert!(b.overlaps_horizontally(a));
    }

    #[test]
    fn rect_no_overlap_when_spaced() {
        // Standard layout spacing: 816 apart with width 700 leaves 116 clear.
        let a = SceneRect::new(992, 128, 700, 700);
        let b = SceneRect::new(1808, 128, 700, 700);
        assert!(!a.overlaps_horizontally(b));
    }

    #[test]
    fn rect_touching_edges_do_not_overlap() {
        let a = SceneRect::new(0, 0, 100, 100);
        let b = SceneRect::new(100, 0, 100, 100);
        assert!(!a.overlaps_horizontally(b));
    }

    #[test]
    fn rect_left_gap() {
        let a = SceneRect::new(212, 128, 700, 759);
        let b = SceneRect::new(992, 128, 744, 1133);
        assert_eq!(a.left_gap_to(b), 780);
        assert_eq!(b.left_gap_to(a), -780);
    }
}
