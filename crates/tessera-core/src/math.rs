use std::ops::{Add, Sub};

/// `true` when `value` lies in `[min, max]`.
pub fn value_in_range<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    value >= min && value <= max
}

fn partial_max<T: PartialOrd>(a: T, b: T) -> T {
    if b > a { b } else { a }
}

fn partial_min<T: PartialOrd>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T> {
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T> Rect<T>
where
    T: Copy + PartialOrd + Add<Output = T> + Sub<Output = T>,
{
    pub fn right(&self) -> T {
        self.x + self.width
    }

    pub fn bottom(&self) -> T {
        self.y + self.height
    }

    /// Overlap test. Rectangles that only share an edge count as
    /// intersecting.
    pub fn intersects(&self, other: &Rect<T>) -> bool {
        let x_overlap = value_in_range(self.x, other.x, other.right())
            || value_in_range(other.x, self.x, self.right());
        let y_overlap = value_in_range(self.y, other.y, other.bottom())
            || value_in_range(other.y, self.y, self.bottom());
        x_overlap && y_overlap
    }

    /// Width and height of the overlapping region, if any.
    pub fn intersection_depth(&self, other: &Rect<T>) -> Option<(T, T)> {
        if !self.intersects(other) {
            return None;
        }
        let left = partial_max(self.x, other.x);
        let top = partial_max(self.y, other.y);
        let right = partial_min(self.right(), other.right());
        let bottom = partial_min(self.bottom(), other.bottom());
        Some((right - left, bottom - top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_in_range_inclusive() {
        assert!(value_in_range(5, 0, 5));
        assert!(value_in_range(0, 0, 5));
        assert!(!value_in_range(6, 0, 5));
        assert!(value_in_range(0.5f32, 0.0, 1.0));
    }

    #[test]
    fn test_rect_intersection() {
        let player = Rect::new(0, 0, 10, 10);
        let wall = Rect::new(8, 5, 10, 10);
        let far = Rect::new(50, 50, 2, 2);

        assert!(player.intersects(&wall));
        assert!(wall.intersects(&player));
        assert!(!player.intersects(&far));

        assert_eq!(player.intersection_depth(&wall), Some((2, 5)));
        assert_eq!(player.intersection_depth(&far), None);
    }

    #[test]
    fn test_rect_touching_edges() {
        let a = Rect::new(0.0f32, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0f32, 0.0, 1.0, 1.0);
        assert!(a.intersects(&b));
        assert_eq!(a.intersection_depth(&b), Some((0.0, 1.0)));
    }
}
