use std::fmt::{Debug, Formatter};

use cgmath::{BaseNum, Point2, Vector2};

//////////
// RECT //
//////////

/// An axis-aligned rectangular region in 2D space
// Invariant: max.x >= min.x && max.y >= min.y
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect<S> {
    min: Point2<S>,
    max: Point2<S>,
}

impl<S: BaseNum> Rect<S> {
    /// Creates a [`Rect`] with a given size and where the minimum corner is the origin (i.e.
    /// `(0, 0)`)
    pub fn from_origin(width: S, height: S) -> Self {
        Self {
            min: Point2::new(S::zero(), S::zero()),
            max: Point2::new(width, height),
        }
    }

    pub fn from_min_size(min: Point2<S>, size: Vector2<S>) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn min(self) -> Point2<S> {
        self.min
    }

    pub fn max(self) -> Point2<S> {
        self.max
    }

    pub fn width(self) -> S {
        self.max.x - self.min.x
    }

    pub fn height(self) -> S {
        self.max.y - self.min.y
    }

    pub fn size(self) -> Vector2<S> {
        self.max - self.min
    }

    pub fn is_empty(self) -> bool {
        self.width() == S::zero() || self.height() == S::zero()
    }

    /// Grows a [`Rect`] by `by.x` on the left and right, and by `by.y` on the top and bottom.
    /// Padding must be non-negative.
    pub fn pad(self, by: Vector2<S>) -> Self {
        Self {
            min: self.min - by,
            max: self.max + by,
        }
    }
}

impl<S: PartialOrd + Copy> Rect<S> {
    /// The region covered by both `self` and `other`.  Disjoint rects give an empty [`Rect`]
    /// (with `max == min`).
    pub fn intersection(self, other: Self) -> Self {
        let min_x = partial_max(self.min.x, other.min.x);
        let min_y = partial_max(self.min.y, other.min.y);
        let max_x = partial_max(min_x, partial_min(self.max.x, other.max.x));
        let max_y = partial_max(min_y, partial_min(self.max.y, other.max.y));
        Self {
            min: Point2::new(min_x, min_y),
            max: Point2::new(max_x, max_y),
        }
    }
}

impl<S: Debug> Debug for Rect<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect(({:?}, {:?}) - ({:?}, {:?}))",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

fn partial_max<S: PartialOrd>(x: S, y: S) -> S {
    if x < y {
        y
    } else {
        x
    }
}

fn partial_min<S: PartialOrd>(x: S, y: S) -> S {
    if x < y {
        x
    } else {
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_grows_both_sides() {
        let r = Rect::from_origin(100.0f32, 50.0).pad(Vector2::new(10.0, 0.0));
        assert_eq!(r.min(), Point2::new(-10.0, 0.0));
        assert_eq!(r.size(), Vector2::new(120.0, 50.0));
    }

    #[test]
    fn intersection_of_overlapping_rects() {
        let a = Rect::from_origin(10, 10);
        let b = Rect::from_min_size(Point2::new(5, 5), Vector2::new(10, 10));
        let expected = Rect::from_min_size(Point2::new(5, 5), Vector2::new(5, 5));
        assert_eq!(a.intersection(b), expected);
        assert_eq!(b.intersection(a), expected);
    }

    #[test]
    fn intersection_of_disjoint_rects() {
        let a = Rect::from_origin(100.0f32, 100.0);
        let b = Rect::from_min_size(Point2::new(500.0, 20.0), Vector2::new(10.0, 10.0));
        let i = a.intersection(b);
        assert!(i.is_empty());
        assert!(i.width() >= 0.0 && i.height() >= 0.0);
        assert_eq!(i.min(), Point2::new(500.0, 20.0));
        assert_eq!(b.intersection(a).size(), Vector2::new(0.0, 10.0));
    }
}
