//! Points, sizes and rectangles with compile-time-unitful coordinate spaces.
//!
//! Mirrors the `smithay::utils::{Point<Kind>, Size<Kind>, Rectangle<Kind>}`
//! pattern: a zero-sized marker type distinguishes coordinate spaces so a
//! global-space rectangle and a parent-local `aux_rect` can never be mixed up
//! by accident. All arithmetic here is integer, matching this engine's
//! logical pixel model.

use std::marker::PhantomData;
use std::ops::{Add, Sub};

/// Marker for the global (display/output) coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Global;

/// Marker for a coordinate space local to a single parent surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Local;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point<Space> {
    pub x: i32,
    pub y: i32,
    _space: PhantomData<Space>,
}

impl<Space> Point<Space> {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y, _space: PhantomData }
    }

    pub const fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Re-labels this point into a different coordinate space without
    /// changing its components. Used where a local point is known to have
    /// already been translated into global coordinates by the caller.
    pub fn into_space<Other>(self) -> Point<Other> {
        Point::new(self.x, self.y)
    }
}

impl<Space> Add<Displacement<Space>> for Point<Space> {
    type Output = Point<Space>;
    fn add(self, rhs: Displacement<Space>) -> Point<Space> {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl<Space> Sub for Point<Space> {
    type Output = Displacement<Space>;
    fn sub(self, rhs: Point<Space>) -> Displacement<Space> {
        Displacement::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Displacement<Space> {
    pub dx: i32,
    pub dy: i32,
    _space: PhantomData<Space>,
}

impl<Space> Displacement<Space> {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Displacement { dx, dy, _space: PhantomData }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size<Space> {
    pub width: i32,
    pub height: i32,
    _space: PhantomData<Space>,
}

impl<Space> Size<Space> {
    pub const fn new(width: i32, height: i32) -> Self {
        Size { width, height, _space: PhantomData }
    }

    pub const fn zero() -> Self {
        Self::new(0, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rectangle<Space> {
    pub top_left: Point<Space>,
    pub size: Size<Space>,
}

impl<Space: Copy> Rectangle<Space> {
    pub const fn new(top_left: Point<Space>, size: Size<Space>) -> Self {
        Rectangle { top_left, size }
    }

    pub fn from_corners(top_left: Point<Space>, bottom_right: Point<Space>) -> Self {
        Rectangle::new(
            top_left,
            Size::new(bottom_right.x - top_left.x, bottom_right.y - top_left.y),
        )
    }

    pub fn top(&self) -> i32 {
        self.top_left.y
    }

    pub fn left(&self) -> i32 {
        self.top_left.x
    }

    pub fn right(&self) -> i32 {
        self.top_left.x + self.size.width
    }

    pub fn bottom(&self) -> i32 {
        self.top_left.y + self.size.height
    }

    pub fn top_right(&self) -> Point<Space> {
        Point::new(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> Point<Space> {
        Point::new(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> Point<Space> {
        Point::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Point<Space> {
        Point::new(
            self.top_left.x + self.size.width / 2,
            self.top_left.y + self.size.height / 2,
        )
    }

    pub fn contains(&self, p: Point<Space>) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    pub fn overlaps(&self, other: &Rectangle<Space>) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Returns the intersection of `self` and `other`, or `None` if they do
    /// not overlap (touching edges with zero-area overlap count as `None`).
    pub fn intersection_with(&self, other: &Rectangle<Space>) -> Option<Rectangle<Space>> {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left < right && top < bottom {
            Some(Rectangle::from_corners(Point::new(left, top), Point::new(right, bottom)))
        } else {
            None
        }
    }

    /// Translates this rectangle so its top-left moves by `d`.
    pub fn translated(&self, d: Displacement<Space>) -> Rectangle<Space> {
        Rectangle::new(self.top_left + d, self.size)
    }

    /// Re-labels this rectangle into a different coordinate space. Callers
    /// are responsible for having already translated the origin.
    pub fn into_space<Other: Copy>(self) -> Rectangle<Other> {
        Rectangle::new(self.top_left.into_space(), Size::new(self.size.width, self.size.height))
    }
}

/// Smallest rectangle containing every member of `rects`.
pub fn bounding_rectangle<Space: Copy>(rects: &[Rectangle<Space>]) -> Option<Rectangle<Space>> {
    let first = rects.first()?;
    let mut left = first.left();
    let mut top = first.top();
    let mut right = first.right();
    let mut bottom = first.bottom();
    for r in &rects[1..] {
        left = left.min(r.left());
        top = top.min(r.top());
        right = right.max(r.right());
        bottom = bottom.max(r.bottom());
    }
    Some(Rectangle::from_corners(Point::new(left, top), Point::new(right, bottom)))
}

/// One of the nine compass anchor points on a rectangle, used both for
/// popup placement gravity and for resize-corner selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gravity {
    NorthWest,
    North,
    NorthEast,
    West,
    Center,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Gravity {
    /// The point on `rect` this gravity refers to.
    pub fn anchor_point<Space: Copy>(self, rect: &Rectangle<Space>) -> Point<Space> {
        let x = match self {
            Gravity::NorthWest | Gravity::West | Gravity::SouthWest => rect.left(),
            Gravity::North | Gravity::Center | Gravity::South => rect.top_left.x + rect.size.width / 2,
            Gravity::NorthEast | Gravity::East | Gravity::SouthEast => rect.right(),
        };
        let y = match self {
            Gravity::NorthWest | Gravity::North | Gravity::NorthEast => rect.top(),
            Gravity::West | Gravity::Center | Gravity::East => rect.top_left.y + rect.size.height / 2,
            Gravity::SouthWest | Gravity::South | Gravity::SouthEast => rect.bottom(),
        };
        Point::new(x, y)
    }

    /// Mirrors this gravity across the horizontal axis (east <-> west).
    pub fn flipped_x(self) -> Gravity {
        match self {
            Gravity::NorthWest => Gravity::NorthEast,
            Gravity::NorthEast => Gravity::NorthWest,
            Gravity::West => Gravity::East,
            Gravity::East => Gravity::West,
            Gravity::SouthWest => Gravity::SouthEast,
            Gravity::SouthEast => Gravity::SouthWest,
            other => other,
        }
    }

    /// Mirrors this gravity across the vertical axis (north <-> south).
    pub fn flipped_y(self) -> Gravity {
        match self {
            Gravity::NorthWest => Gravity::SouthWest,
            Gravity::SouthWest => Gravity::NorthWest,
            Gravity::North => Gravity::South,
            Gravity::South => Gravity::North,
            Gravity::NorthEast => Gravity::SouthEast,
            Gravity::SouthEast => Gravity::NorthEast,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type R = Rectangle<Global>;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> R {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn corners_are_correct() {
        let r = rect(10, 20, 30, 40);
        assert_eq!(r.top_right(), Point::new(40, 20));
        assert_eq!(r.bottom_left(), Point::new(10, 60));
        assert_eq!(r.bottom_right(), Point::new(40, 60));
    }

    #[test]
    fn contains_is_half_open() {
        let r = rect(0, 0, 10, 10);
        assert!(r.contains(Point::new(0, 0)));
        assert!(r.contains(Point::new(9, 9)));
        assert!(!r.contains(Point::new(10, 0)));
        assert!(!r.contains(Point::new(0, 10)));
    }

    #[test]
    fn overlaps_detects_touching_vs_crossing() {
        let a = rect(0, 0, 10, 10);
        let touching = rect(10, 0, 10, 10);
        let crossing = rect(5, 5, 10, 10);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&crossing));
    }

    #[test]
    fn intersection_with_computes_overlap() {
        let a = rect(0, 0, 10, 10);
        let b = rect(5, 5, 10, 10);
        assert_eq!(a.intersection_with(&b), Some(rect(5, 5, 5, 5)));
        assert_eq!(a.intersection_with(&rect(100, 100, 1, 1)), None);
    }

    #[test]
    fn bounding_rectangle_spans_all_members() {
        let rects = vec![rect(30, 40, 1280, 720), rect(1400, 70, 640, 480)];
        let bounds = bounding_rectangle(&rects).unwrap();
        assert_eq!(bounds, rect(30, 40, 2010, 720));
    }

    #[test]
    fn gravity_anchor_points() {
        let r = rect(0, 0, 100, 200);
        assert_eq!(Gravity::NorthWest.anchor_point(&r), Point::new(0, 0));
        assert_eq!(Gravity::SouthEast.anchor_point(&r), Point::new(100, 200));
        assert_eq!(Gravity::Center.anchor_point(&r), Point::new(50, 100));
    }

    #[test]
    fn gravity_flips() {
        assert_eq!(Gravity::NorthEast.flipped_x(), Gravity::NorthWest);
        assert_eq!(Gravity::NorthEast.flipped_y(), Gravity::SouthEast);
        assert_eq!(Gravity::Center.flipped_x(), Gravity::Center);
    }
}
