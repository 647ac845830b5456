// crates/stackflow-render/src/lib.rs

use stackflow_core::{Color, ItemId, Rect};
use stackflow_layout::StackLayout;
use std::time::Duration;
use tracing::trace;

pub mod appearance;
pub mod events;
pub mod fade;
pub mod text;

pub use appearance::*;
pub use events::*;
pub use fade::*;
pub use text::*;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Render operation failed: {0}")]
    RenderFailed(String),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Directives sent to the external renderer/animator. A zero duration means
/// "apply immediately".
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Adds an item to the render tree at its entry frame.
    InsertItem {
        id: ItemId,
        frame: Rect,
        background: Color,
        header: Option<ResolvedHeader>,
    },
    /// Adds the separator keyed to `id` at its entry frame.
    InsertSeparator {
        id: ItemId,
        frame: Rect,
        color: Color,
    },
    /// Replaces every frame with the ones in `layout`, animating from the
    /// current ones.
    ApplyLayout {
        layout: StackLayout,
        duration: Duration,
    },
    ApplyFade {
        fade: FadeState,
        duration: Duration,
    },
    /// Animates the item and its separator to fully transparent.
    FadeOutItem {
        id: ItemId,
        duration: Duration,
    },
    /// Drops the item and its separator from the render tree.
    RemoveItem {
        id: ItemId,
    },
    UpdateHeader {
        id: ItemId,
        header: Option<ResolvedHeader>,
    },
}

impl RenderCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RenderCommand::InsertItem { .. } => "insert_item",
            RenderCommand::InsertSeparator { .. } => "insert_separator",
            RenderCommand::ApplyLayout { .. } => "apply_layout",
            RenderCommand::ApplyFade { .. } => "apply_fade",
            RenderCommand::FadeOutItem { .. } => "fade_out_item",
            RenderCommand::RemoveItem { .. } => "remove_item",
            RenderCommand::UpdateHeader { .. } => "update_header",
        }
    }
}

/// Trait for backends that draw and animate a stack
pub trait Renderer {
    /// Execute a batch of render commands
    fn execute_commands(&mut self, commands: &[RenderCommand]) -> RenderResult<()>;
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn execute_commands(&mut self, _commands: &[RenderCommand]) -> RenderResult<()> {
        Ok(())
    }
}

/// Keeps every batch it receives, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    batches: Vec<Vec<RenderCommand>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> &[Vec<RenderCommand>] {
        &self.batches
    }

    pub fn commands(&self) -> impl Iterator<Item = &RenderCommand> {
        self.batches.iter().flatten()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands().map(RenderCommand::name).collect()
    }

    pub fn last_layout(&self) -> Option<&StackLayout> {
        self.commands()
            .filter_map(|command| match command {
                RenderCommand::ApplyLayout { layout, .. } => Some(layout),
                _ => None,
            })
            .last()
    }

    pub fn last_fade(&self) -> Option<&FadeState> {
        self.commands()
            .filter_map(|command| match command {
                RenderCommand::ApplyFade { fade, .. } => Some(fade),
                _ => None,
            })
            .last()
    }

    pub fn clear(&mut self) {
        self.batches.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn execute_commands(&mut self, commands: &[RenderCommand]) -> RenderResult<()> {
        trace!("Recording batch {} ({} commands)", self.batches.len(), commands.len());
        self.batches.push(commands.to_vec());
        Ok(())
    }
}
