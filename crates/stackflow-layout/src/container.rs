// crates/stackflow-layout/src/container.rs
use glam::Vec2;
use stackflow_core::{Direction, EdgeInsets, Rect};

/// Geometry of the view hosting the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerGeometry {
    pub bounds: Rect,
    pub safe_area_insets: EdgeInsets,
    pub seek_safe_area: bool,
    pub head_padding: f32,
}

impl Default for ContainerGeometry {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            safe_area_insets: EdgeInsets::ZERO,
            seek_safe_area: true,
            head_padding: 0.0,
        }
    }
}

/// Area available to items: the bounds, minus the safe-area insets when asked
/// to respect them, minus the head padding on the growth edge only.
pub fn content_bounds(geometry: &ContainerGeometry, direction: Direction) -> Rect {
    let base = if geometry.seek_safe_area {
        geometry.bounds.inset(geometry.safe_area_insets)
    } else {
        geometry.bounds
    };

    let padding = geometry.head_padding.max(0.0);
    let mut head = EdgeInsets::ZERO;
    match direction {
        Direction::Up => head.top = padding,
        Direction::Down => head.bottom = padding,
        Direction::Left => head.leading = padding,
        Direction::Right => head.trailing = padding,
    }

    base.inset(head)
}

/// Where a freshly pushed item (and its separator, if any) starts its entry
/// transition: centred on the cross axis, just outside the container on the
/// growth edge. Coordinates are container-local.
pub fn entry_frames(
    container: Vec2,
    direction: Direction,
    item_size: Vec2,
    separator_thickness: Option<f32>,
    autoresize: bool,
) -> (Rect, Option<Rect>) {
    let vertical = direction.is_vertical();
    let thickness = separator_thickness.unwrap_or(0.0);

    let cross_container = if vertical { container.x } else { container.y };
    let cross_extent = if autoresize {
        cross_container
    } else if vertical {
        item_size.x
    } else {
        item_size.y
    };
    let main_extent = if vertical { item_size.y } else { item_size.x };
    let main_container = if vertical { container.y } else { container.x };
    let cross_start = (cross_container - cross_extent) / 2.0;

    // (separator start, item start) along the growth axis
    let (separator_start, item_start) = match direction {
        Direction::Down | Direction::Right => (main_container, main_container + thickness),
        Direction::Up | Direction::Left => (-thickness, -thickness - main_extent),
    };

    let make = |main_start: f32, main_size: f32, cross_start: f32, cross_size: f32| {
        if vertical {
            Rect::new(cross_start, main_start, cross_size, main_size)
        } else {
            Rect::new(main_start, cross_start, main_size, cross_size)
        }
    };

    let item = make(item_start, main_extent, cross_start, cross_extent);
    let separator = separator_thickness.map(|t| make(separator_start, t, 0.0, cross_container));

    (item, separator)
}
