// crates/stackflow-layout/src/lib.rs

use glam::Vec2;
use stackflow_core::{Color, Direction, ItemId, Rect, SeparationStyle};
use std::collections::HashMap;
use tracing::{debug, trace};

pub mod constraints;
pub mod container;

pub use constraints::*;
pub use container::*;

/// One entry of the ordered stack as the layout engine sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutItem {
    pub id: ItemId,
    /// Intrinsic size (content plus header).
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    /// Bottom (first pushed) to head (last pushed).
    pub items: &'a [LayoutItem],
    pub direction: Direction,
    pub separation: SeparationStyle,
    pub autoresize: bool,
    pub geometry: ContainerGeometry,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    pub computed_positions: HashMap<LayoutNode, Vec2>,
    pub computed_sizes: HashMap<LayoutNode, Vec2>,
}

impl LayoutResult {
    pub fn frame(&self, node: LayoutNode) -> Option<Rect> {
        let position = self.computed_positions.get(&node)?;
        let size = self.computed_sizes.get(&node)?;
        Some(Rect::from_position_size(*position, *size))
    }

    fn insert(&mut self, node: LayoutNode, frame: Rect) {
        self.computed_positions.insert(node, frame.position);
        self.computed_sizes.insert(node, frame.size);
    }
}

/// Complete spatial arrangement of a stack: the relationships, the frames
/// they resolve to, and the paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackLayout {
    /// Container rect in the stack view's coordinate space. Frames below are
    /// relative to its origin.
    pub content_bounds: Rect,
    pub direction: Direction,
    pub constraints: Vec<Constraint>,
    pub result: LayoutResult,
    /// Back to front.
    pub z_order: Vec<LayoutNode>,
    pub separator_thickness: f32,
    pub separator_color: Color,
    items: Vec<ItemId>,
}

impl StackLayout {
    pub fn item_frame(&self, id: ItemId) -> Option<Rect> {
        self.result.frame(LayoutNode::Item(id))
    }

    pub fn separator_frame(&self, id: ItemId) -> Option<Rect> {
        self.result.frame(LayoutNode::Separator(id))
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Head item extent along the growth axis.
    pub fn head_extent(&self) -> f32 {
        self.items
            .last()
            .and_then(|id| self.item_frame(*id))
            .map(|frame| {
                if self.direction.is_vertical() {
                    frame.height()
                } else {
                    frame.width()
                }
            })
            .unwrap_or(0.0)
    }

    /// Container extent along the growth axis.
    pub fn container_extent(&self) -> f32 {
        if self.direction.is_vertical() {
            self.content_bounds.height()
        } else {
            self.content_bounds.width()
        }
    }

    /// Item under a container-local point. When frames overlap the most
    /// recently pushed one wins.
    pub fn item_at(&self, point: Vec2) -> Option<(usize, ItemId)> {
        self.items
            .iter()
            .enumerate()
            .rev()
            .find(|(_, id)| self.item_frame(**id).map(|f| f.contains_point(point)).unwrap_or(false))
            .map(|(index, id)| (index, *id))
    }

    pub fn constraints_for(&self, node: LayoutNode) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter().filter(move |c| c.involves(node))
    }
}

pub trait LayoutEngine {
    fn compute_layout(&self, input: &LayoutInput<'_>) -> StackLayout;
}

/// Derives the stack arrangement from scratch on every call. Depths are
/// small, so nothing is diffed or updated in place.
#[derive(Debug, Default)]
pub struct StackLayoutEngine {
    debug: bool,
}

impl StackLayoutEngine {
    pub fn new() -> Self {
        Self { debug: false }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl LayoutEngine for StackLayoutEngine {
    fn compute_layout(&self, input: &LayoutInput<'_>) -> StackLayout {
        let content_bounds = content_bounds(&input.geometry, input.direction);
        let container = content_bounds.size;
        let (thickness, separator_color) = input.separation.size_and_color();
        let thickness = thickness.max(0.0);

        let constraints = derive_constraints(input, thickness);
        let result = resolve_frames(input, container, thickness);

        let mut z_order = Vec::with_capacity(input.items.len() * 2);
        for (index, item) in input.items.iter().enumerate() {
            if index > 0 {
                z_order.push(LayoutNode::Separator(item.id));
            }
            z_order.push(LayoutNode::Item(item.id));
        }

        trace!(
            "Derived {} constraints for {} items growing {}",
            constraints.len(),
            input.items.len(),
            input.direction.name()
        );

        if self.debug {
            for node in &z_order {
                if let Some(frame) = result.frame(*node) {
                    debug!("Layout {}: pos={:?}, size={:?}", node, frame.position, frame.size);
                }
            }
        }

        StackLayout {
            content_bounds,
            direction: input.direction,
            constraints,
            result,
            z_order,
            separator_thickness: thickness,
            separator_color,
            items: input.items.iter().map(|item| item.id).collect(),
        }
    }
}

fn derive_constraints(input: &LayoutInput<'_>, thickness: f32) -> Vec<Constraint> {
    use Attribute::*;
    use LayoutNode::Container;

    let vertical = input.direction.is_vertical();
    let count = input.items.len();
    let mut constraints = Vec::new();

    for (index, item) in input.items.iter().enumerate() {
        let node = LayoutNode::Item(item.id);
        let is_first = index == 0;
        let is_head = index + 1 == count;

        // Centre on the cross axis
        if vertical {
            constraints.push(Constraint::equal(node, CenterX, Container, CenterX));
        } else {
            constraints.push(Constraint::equal(node, CenterY, Container, CenterY));
        }

        // Intrinsic extent, replaced on the cross axis when autoresizing
        let (cross, main) = if vertical { (Width, Height) } else { (Height, Width) };
        let (cross_size, main_size) = if vertical {
            (item.size.x, item.size.y)
        } else {
            (item.size.y, item.size.x)
        };
        constraints.push(Constraint::fixed(node, main, main_size));
        if input.autoresize {
            constraints.push(Constraint::equal(node, cross, Container, cross));
        } else {
            constraints.push(Constraint::fixed(node, cross, cross_size));
        }

        if is_head {
            let edge = match input.direction {
                Direction::Up => Top,
                Direction::Down => Bottom,
                Direction::Left => Leading,
                Direction::Right => Trailing,
            };
            constraints.push(Constraint::equal(node, edge, Container, edge));
        }

        if is_first {
            continue;
        }

        let separator = LayoutNode::Separator(item.id);
        let previous = LayoutNode::Item(input.items[index - 1].id);

        // Separator spans the container on the cross axis
        if vertical {
            constraints.push(Constraint::equal(separator, Leading, Container, Leading));
            constraints.push(Constraint::equal(separator, Trailing, Container, Trailing));
            constraints.push(Constraint::fixed(separator, Height, thickness));
        } else {
            constraints.push(Constraint::equal(separator, Top, Container, Top));
            constraints.push(Constraint::equal(separator, Bottom, Container, Bottom));
            constraints.push(Constraint::fixed(separator, Width, thickness));
        }

        // ...and sits between the previous item and this one
        let (a, b) = match input.direction {
            Direction::Up => (
                Constraint::equal(separator, Bottom, previous, Top),
                Constraint::equal(separator, Top, node, Bottom),
            ),
            Direction::Down => (
                Constraint::equal(separator, Top, previous, Bottom),
                Constraint::equal(separator, Bottom, node, Top),
            ),
            Direction::Left => (
                Constraint::equal(separator, Leading, node, Trailing),
                Constraint::equal(separator, Trailing, previous, Leading),
            ),
            Direction::Right => (
                Constraint::equal(separator, Leading, previous, Trailing),
                Constraint::equal(separator, Trailing, node, Leading),
            ),
        };
        constraints.push(a);
        constraints.push(b);
    }

    constraints
}

fn resolve_frames(input: &LayoutInput<'_>, container: Vec2, thickness: f32) -> LayoutResult {
    let vertical = input.direction.is_vertical();
    let (main_container, cross_container) = if vertical {
        (container.y, container.x)
    } else {
        (container.x, container.y)
    };

    // Down/Right keep the head at the far edge and push older items towards
    // the origin; Up/Left do the opposite.
    let head_at_far_edge = matches!(input.direction, Direction::Down | Direction::Right);

    let make = |main_start: f32, main_size: f32, cross_start: f32, cross_size: f32| {
        if vertical {
            Rect::new(cross_start, main_start, cross_size, main_size)
        } else {
            Rect::new(main_start, cross_start, main_size, cross_size)
        }
    };

    let mut result = LayoutResult::default();
    let mut cursor = if head_at_far_edge { main_container } else { 0.0 };

    for (index, item) in input.items.iter().enumerate().rev() {
        let (main_extent, intrinsic_cross) = if vertical {
            (item.size.y, item.size.x)
        } else {
            (item.size.x, item.size.y)
        };
        let cross_extent = if input.autoresize { cross_container } else { intrinsic_cross };
        let cross_start = (cross_container - cross_extent) / 2.0;

        let item_start = if head_at_far_edge { cursor - main_extent } else { cursor };
        result.insert(
            LayoutNode::Item(item.id),
            make(item_start, main_extent, cross_start, cross_extent),
        );
        cursor = if head_at_far_edge { item_start } else { item_start + main_extent };

        if index > 0 {
            let separator_start = if head_at_far_edge { cursor - thickness } else { cursor };
            result.insert(
                LayoutNode::Separator(item.id),
                make(separator_start, thickness, 0.0, cross_container),
            );
            cursor = if head_at_far_edge { separator_start } else { separator_start + thickness };
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackflow_core::{color, EdgeInsets};

    fn items(sizes: &[(f32, f32)]) -> Vec<LayoutItem> {
        sizes
            .iter()
            .map(|(w, h)| LayoutItem {
                id: ItemId::next(),
                size: Vec2::new(*w, *h),
            })
            .collect()
    }

    fn input<'a>(items: &'a [LayoutItem], direction: Direction, autoresize: bool) -> LayoutInput<'a> {
        LayoutInput {
            items,
            direction,
            separation: SeparationStyle::Line {
                thickness: 2.0,
                color: color::WHITE,
            },
            autoresize,
            geometry: ContainerGeometry {
                bounds: Rect::new(0.0, 0.0, 300.0, 600.0),
                safe_area_insets: EdgeInsets::ZERO,
                seek_safe_area: true,
                head_padding: 0.0,
            },
        }
    }

    #[test]
    fn test_growth_down_stacks_towards_the_top() {
        let items = items(&[(200.0, 100.0), (200.0, 50.0), (100.0, 80.0)]);
        let layout = StackLayoutEngine::new().compute_layout(&input(&items, Direction::Down, false));

        assert_eq!(layout.item_frame(items[2].id), Some(Rect::new(100.0, 520.0, 100.0, 80.0)));
        assert_eq!(layout.separator_frame(items[2].id), Some(Rect::new(0.0, 518.0, 300.0, 2.0)));
        assert_eq!(layout.item_frame(items[1].id), Some(Rect::new(50.0, 468.0, 200.0, 50.0)));
        assert_eq!(layout.separator_frame(items[1].id), Some(Rect::new(0.0, 466.0, 300.0, 2.0)));
        assert_eq!(layout.item_frame(items[0].id), Some(Rect::new(50.0, 366.0, 200.0, 100.0)));
        assert_eq!(layout.separator_frame(items[0].id), None);
    }

    #[test]
    fn test_growth_up_stacks_towards_the_bottom() {
        let items = items(&[(200.0, 100.0), (200.0, 50.0)]);
        let layout = StackLayoutEngine::new().compute_layout(&input(&items, Direction::Up, true));

        assert_eq!(layout.item_frame(items[1].id), Some(Rect::new(0.0, 0.0, 300.0, 50.0)));
        assert_eq!(layout.separator_frame(items[1].id), Some(Rect::new(0.0, 50.0, 300.0, 2.0)));
        assert_eq!(layout.item_frame(items[0].id), Some(Rect::new(0.0, 52.0, 300.0, 100.0)));
    }

    #[test]
    fn test_horizontal_growth() {
        let items = items(&[(100.0, 200.0), (50.0, 200.0)]);

        let layout = StackLayoutEngine::new().compute_layout(&input(&items, Direction::Right, false));
        assert_eq!(layout.item_frame(items[1].id), Some(Rect::new(250.0, 200.0, 50.0, 200.0)));
        assert_eq!(layout.separator_frame(items[1].id), Some(Rect::new(248.0, 0.0, 2.0, 600.0)));
        assert_eq!(layout.item_frame(items[0].id), Some(Rect::new(148.0, 200.0, 100.0, 200.0)));

        let layout = StackLayoutEngine::new().compute_layout(&input(&items, Direction::Left, true));
        assert_eq!(layout.item_frame(items[1].id), Some(Rect::new(0.0, 0.0, 50.0, 600.0)));
        assert_eq!(layout.item_frame(items[0].id), Some(Rect::new(52.0, 0.0, 100.0, 600.0)));
    }

    #[test]
    fn test_only_head_is_anchored_to_container_edge() {
        let items = items(&[(200.0, 100.0), (200.0, 50.0), (200.0, 50.0)]);
        let layout = StackLayoutEngine::new().compute_layout(&input(&items, Direction::Down, false));

        let anchored: Vec<_> = layout
            .constraints
            .iter()
            .filter(|c| c.attribute == Attribute::Bottom && c.target == Some((LayoutNode::Container, Attribute::Bottom)))
            .map(|c| c.node)
            .collect();
        assert_eq!(anchored, vec![LayoutNode::Item(items[2].id)]);

        // Two separators, each bound to both neighbours
        let separator = LayoutNode::Separator(items[1].id);
        assert!(layout.constraints.contains(&Constraint::equal(
            separator,
            Attribute::Top,
            LayoutNode::Item(items[0].id),
            Attribute::Bottom
        )));
        assert!(layout.constraints.contains(&Constraint::equal(
            separator,
            Attribute::Bottom,
            LayoutNode::Item(items[1].id),
            Attribute::Top
        )));
    }

    #[test]
    fn test_autoresize_binds_cross_extent_to_container() {
        let items = items(&[(120.0, 100.0)]);
        let layout = StackLayoutEngine::new().compute_layout(&input(&items, Direction::Down, true));
        assert!(layout.constraints.contains(&Constraint::equal(
            LayoutNode::Item(items[0].id),
            Attribute::Width,
            LayoutNode::Container,
            Attribute::Width
        )));
        assert_eq!(layout.item_frame(items[0].id).unwrap().width(), 300.0);
    }

    #[test]
    fn test_none_separation_keeps_inert_separator() {
        let items = items(&[(200.0, 100.0), (200.0, 100.0)]);
        let mut input = input(&items, Direction::Down, false);
        input.separation = SeparationStyle::None;
        let layout = StackLayoutEngine::new().compute_layout(&input);

        let separator = layout.separator_frame(items[1].id).unwrap();
        assert_eq!(separator.height(), 0.0);
        assert_eq!(layout.separator_color, color::TRANSPARENT);
        assert_eq!(layout.item_frame(items[0].id).unwrap().max().y, 500.0);
    }

    #[test]
    fn test_z_order_and_hit_testing() {
        let items = items(&[(300.0, 100.0), (300.0, 100.0)]);
        let layout = StackLayoutEngine::new().compute_layout(&input(&items, Direction::Down, false));

        assert_eq!(
            layout.z_order,
            vec![
                LayoutNode::Item(items[0].id),
                LayoutNode::Separator(items[1].id),
                LayoutNode::Item(items[1].id)
            ]
        );
        assert_eq!(layout.item_at(Vec2::new(10.0, 550.0)), Some((1, items[1].id)));
        assert_eq!(layout.item_at(Vec2::new(10.0, 450.0)), Some((0, items[0].id)));
        assert_eq!(layout.item_at(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let items = items(&[(200.0, 100.0), (200.0, 50.0)]);
        let engine = StackLayoutEngine::new();
        let input = input(&items, Direction::Up, false);
        assert_eq!(engine.compute_layout(&input), engine.compute_layout(&input));
    }

    #[test]
    fn test_head_extent() {
        let items = items(&[(200.0, 100.0), (200.0, 50.0)]);
        let layout = StackLayoutEngine::new().compute_layout(&input(&items, Direction::Down, false));
        assert_eq!(layout.head_extent(), 50.0);
        assert_eq!(layout.container_extent(), 600.0);
    }
}
