// src/dump.rs
//! Plain-text snapshot of a stack, used by `stackflow-debug` and the
//! integration tests. Items are listed by index, never by global id, so the
//! output is stable across runs.

use stackflow_core::{ItemId, Rect, StackContent};
use stackflow_layout::LayoutNode;
use stackflow_render::{GradientMask, Renderer};
use stackflow_runtime::StackFlow;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    pub show_layout: bool,
    pub show_fade: bool,
    pub show_constraints: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            show_layout: true,
            show_fade: true,
            show_constraints: false,
        }
    }
}

/// Renders the stack as a tree in paint order (bottom item first).
pub fn dump_stack<C, R>(stack: &StackFlow<C, R>, label: impl Fn(&C) -> String, options: &DumpOptions) -> String
where
    C: StackContent,
    R: Renderer,
{
    let mut out = String::new();
    let layout = stack.layout();
    let direction = stack.configuration().growth_direction;

    let _ = writeln!(
        out,
        "Stack {} growing {} content:{}",
        stack.state(),
        direction.name(),
        format_rect(&layout.content_bounds)
    );

    let index_of = |id: ItemId| stack.items().iter().position(|item| item.id() == id);
    let nodes: Vec<LayoutNode> = layout
        .z_order
        .iter()
        .copied()
        .filter(|node| options.show_layout || matches!(node, LayoutNode::Item(_)))
        .collect();

    for (position, node) in nodes.iter().enumerate() {
        let is_last_node = position + 1 == nodes.len();
        let connector = if is_last_node { "└── " } else { "├── " };
        let continuation = if is_last_node { "    " } else { "│   " };

        match *node {
            LayoutNode::Item(id) => {
                let Some(index) = index_of(id) else { continue };
                let item = &stack.items()[index];

                let mut line = format!("[{}] {}", index, label(item.content()));
                if let Some(title) = item.title() {
                    let _ = write!(line, " \"{}\"", title);
                }
                if item.is_first_in_stack() {
                    line.push_str(" first");
                }
                if item.is_last() {
                    line.push_str(" last");
                }
                if item.has_pop_affordance() {
                    line.push_str(" pop");
                }
                if item.has_push_affordance() {
                    line.push_str(" push");
                }
                if options.show_layout {
                    if let Some(frame) = layout.item_frame(id) {
                        let _ = write!(line, " {}", format_frame(&frame));
                    }
                }
                if options.show_fade {
                    if let Some(fade) = stack.fade().item(id) {
                        let _ = write!(line, " opacity:{:.2}", fade.opacity);
                        if fade.tint.is_some() {
                            line.push_str(" tint");
                        }
                        if fade.interactive {
                            line.push_str(" interactive");
                        }
                    }
                }
                let _ = writeln!(out, "{}{}", connector, line);

                if options.show_constraints {
                    for constraint in layout.constraints_for(*node) {
                        let _ = writeln!(out, "{}    {:?}", continuation, constraint);
                    }
                }
            }
            LayoutNode::Separator(id) => {
                let frame = layout.separator_frame(id).unwrap_or(Rect::ZERO);
                let _ = writeln!(out, "{}separator {}", connector, format_frame(&frame));
            }
            LayoutNode::Container => {}
        }
    }

    if options.show_fade {
        match &stack.fade().mask {
            Some(mask) => {
                let _ = writeln!(out, "mask: {}", format_mask(mask));
            }
            None => {
                let _ = writeln!(out, "mask: none");
            }
        }
    }

    out
}

fn format_frame(frame: &Rect) -> String {
    format!(
        "pos:({:.0},{:.0}) size:({:.0},{:.0})",
        frame.position.x, frame.position.y, frame.size.x, frame.size.y
    )
}

fn format_rect(rect: &Rect) -> String {
    format!(
        "({:.0},{:.0} {:.0}x{:.0})",
        rect.position.x, rect.position.y, rect.size.x, rect.size.y
    )
}

fn format_mask(mask: &GradientMask) -> String {
    let stops: Vec<String> = mask
        .stops
        .iter()
        .map(|(location, alpha)| format!("{:.2}:{:.2}", location, alpha))
        .collect();
    format!(
        "({:.2},{:.2})->({:.2},{:.2}) stops:[{}]",
        mask.start.x,
        mask.start.y,
        mask.end.x,
        mask.end.y,
        stops.join(", ")
    )
}
