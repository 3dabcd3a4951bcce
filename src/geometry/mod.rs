mod hit_testing;

pub use hit_testing::locate;

use serde::{Deserialize, Serialize};

/// A pixel coordinate local to one of the panel surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Truncates a fractional offset toward zero, the way pointer positions
    /// relative to a surface origin are reduced to pixels.
    pub fn from_offset(dx: f32, dy: f32) -> Self {
        Self {
            x: dx.trunc() as i32,
            y: dy.trunc() as i32,
        }
    }

    /// Whether the point lies on a square canvas of `size` pixels, half-open.
    pub fn is_within_square(&self, size: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < size && self.y < size
    }
}

/// Rectangle owned by one selectable action in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonRegion {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ButtonRegion {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}
