// crates/stackflow-core/src/lib.rs
pub mod appearance;
pub mod config;
pub mod geometry;
pub mod ids;

pub use appearance::*;
pub use config::*;
pub use geometry::*;
pub use ids::*;

use glam::Vec2;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StackFlowError {
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, StackFlowError>;

/// User content pushed onto a stack. The core never looks inside it; it only
/// needs the size the content would like to occupy.
pub trait StackContent {
    fn preferred_size(&self) -> Vec2;
}

impl StackContent for Vec2 {
    fn preferred_size(&self) -> Vec2 {
        *self
    }
}

impl<T: StackContent + ?Sized> StackContent for Box<T> {
    fn preferred_size(&self) -> Vec2 {
        (**self).preferred_size()
    }
}
