// crates/stackflow-render/src/events.rs
use glam::Vec2;

/// Discrete gestures delivered by the host's gesture source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Swipe { direction: SwipeDirection },
    /// Position in content-container coordinates.
    Tap { position: Vec2 },
}

/// Screen direction the finger travelled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl std::str::FromStr for SwipeDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(SwipeDirection::Up),
            "down" => Ok(SwipeDirection::Down),
            "left" => Ok(SwipeDirection::Left),
            "right" => Ok(SwipeDirection::Right),
            other => Err(format!("unknown swipe direction '{}'", other)),
        }
    }
}
