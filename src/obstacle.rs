use crate::math::Point2d;
use crate::util::Interval;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangular obstacle, such as a track wall or inner barrier.
/// The obstacle set is fixed at startup and never mutated during a run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
    /// The horizontal extent of the rectangle.
    x: Interval<f64>,
    /// The vertical extent of the rectangle.
    y: Interval<f64>,
}

impl Obstacle {
    /// Creates an obstacle from its top-left corner and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Interval::new(x, x + width),
            y: Interval::new(y, y + height),
        }
    }

    /// The top-left corner of the obstacle.
    pub fn position(&self) -> Point2d {
        Point2d::new(self.x.min, self.y.min)
    }

    /// The width of the obstacle.
    pub fn width(&self) -> f64 {
        self.x.length()
    }

    /// The height of the obstacle.
    pub fn height(&self) -> f64 {
        self.y.length()
    }

    /// Whether the obstacle covers the 1x1 cell at the given integer coordinates.
    /// Extents are half-open, so a cell touching the right or bottom edge is not a hit.
    pub(crate) fn contains_cell(&self, x: i32, y: i32) -> bool {
        self.x.contains_half_open(x as f64) && self.y.contains_half_open(y as f64)
    }
}
