//! Pointer positions and token bounding boxes

use serde::{Deserialize, Serialize};

/// Pointer position relative to the editor container
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    /// True when `other` is further than `distance` away on either axis
    pub fn is_over_distance(&self, other: &Point, distance: f64) -> bool {
        (self.x - other.x).abs() > distance || (self.y - other.y).abs() > distance
    }
}

/// Bounding box in container coordinates
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_distance_is_strict() {
        let start = Point::new(10.0, 10.0);
        assert!(!start.is_over_distance(&Point::new(15.0, 10.0), 5.0));
        assert!(start.is_over_distance(&Point::new(15.5, 10.0), 5.0));
        assert!(start.is_over_distance(&Point::new(10.0, 4.0), 5.0));
    }
}
