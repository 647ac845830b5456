// crates/stackflow-core/src/geometry.rs
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, origin at the top-left, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        position: Vec2::ZERO,
        size: Vec2::ZERO,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            position: center - size * 0.5,
            size,
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + self.size.x
            && point.y >= self.position.y
            && point.y <= self.position.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub fn min(&self) -> Vec2 {
        self.position
    }

    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    /// Shrinks the rectangle by the given insets. Never produces a negative size.
    pub fn inset(&self, insets: EdgeInsets) -> Rect {
        let position = self.position + Vec2::new(insets.leading, insets.top);
        let size = Vec2::new(
            (self.size.x - insets.leading - insets.trailing).max(0.0),
            (self.size.y - insets.top - insets.bottom).max(0.0),
        );
        Rect { position, size }
    }

    /// The same rectangle expressed relative to its own origin.
    pub fn local(&self) -> Rect {
        Rect {
            position: Vec2::ZERO,
            size: self.size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f32,
    pub bottom: f32,
    pub leading: f32,
    pub trailing: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        bottom: 0.0,
        leading: 0.0,
        trailing: 0.0,
    };

    pub fn new(top: f32, bottom: f32, leading: f32, trailing: f32) -> Self {
        Self {
            top,
            bottom,
            leading,
            trailing,
        }
    }
}
