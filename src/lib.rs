// src/lib.rs
//! Stack-based navigation container: a push/pop state machine that derives
//! layout, fading and header state for an external renderer.

pub use stackflow_core::*;
pub use stackflow_layout::*;
pub use stackflow_runtime::*;

pub use stackflow_render::{
    button_width, compute_fade, resolve_header, FadeInput, FadeState, GestureEvent, GradientMask, HeaderButton,
    ItemFade, NullRenderer, RecordingRenderer, RenderCommand, RenderError, RenderResult, Renderer, ResolvedButton,
    ResolvedHeader, SimpleTextShaper, SwipeDirection, TextMetrics, TextShaper,
};

pub mod dump;
pub mod script;
