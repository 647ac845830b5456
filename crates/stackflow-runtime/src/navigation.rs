// crates/stackflow-runtime/src/navigation.rs
use glam::Vec2;
use stackflow_core::{Direction, ItemId, NavigationOptions};
use stackflow_layout::StackLayout;
use stackflow_render::{GestureEvent, SwipeDirection};

/// What a gesture asks the delegate to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRequest {
    Push,
    Pop(usize),
}

/// Turns raw gestures into push/pop requests.
#[derive(Debug, Clone, Copy)]
pub struct NavigationInputMapper {
    options: NavigationOptions,
    direction: Direction,
}

impl NavigationInputMapper {
    pub fn new(options: NavigationOptions, direction: Direction) -> Self {
        Self { options, direction }
    }

    pub fn set_options(&mut self, options: NavigationOptions) {
        self.options = options;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// `items` is the live stack, bottom first. It can be shorter than the
    /// layout while a popped item is still fading out.
    pub fn map(&self, event: &GestureEvent, layout: &StackLayout, items: &[ItemId]) -> Option<NavigationRequest> {
        match *event {
            GestureEvent::Swipe { direction } => self.map_swipe(direction),
            GestureEvent::Tap { position } => self.map_tap(position, layout, items),
        }
    }

    /// Swiping along the growth direction pops the head, swiping against it
    /// asks for a new item. Swipes across the stack axis mean nothing.
    pub fn map_swipe(&self, swipe: SwipeDirection) -> Option<NavigationRequest> {
        if !self.options.contains(NavigationOptions::SWIPE) {
            return None;
        }

        let request = match (self.direction, swipe) {
            (Direction::Down, SwipeDirection::Down)
            | (Direction::Up, SwipeDirection::Up)
            | (Direction::Left, SwipeDirection::Left)
            | (Direction::Right, SwipeDirection::Right) => NavigationRequest::Pop(1),
            (Direction::Down, SwipeDirection::Up)
            | (Direction::Up, SwipeDirection::Down)
            | (Direction::Left, SwipeDirection::Right)
            | (Direction::Right, SwipeDirection::Left) => NavigationRequest::Push,
            _ => return None,
        };
        Some(request)
    }

    /// Tapping a buried item asks to pop everything above it. Frames come
    /// from `layout`, depth and indices from `items`; a hit on an item that
    /// already left the stack is ignored.
    pub fn map_tap(&self, position: Vec2, layout: &StackLayout, items: &[ItemId]) -> Option<NavigationRequest> {
        if !self.options.contains(NavigationOptions::TAP) {
            return None;
        }

        let (_, hit) = layout.item_at(position)?;
        let index = items.iter().position(|id| *id == hit)?;
        let count = items.len() - 1 - index;
        if count == 0 {
            None
        } else {
            Some(NavigationRequest::Pop(count))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackflow_core::{EdgeInsets, ItemId, Rect, SeparationStyle};
    use stackflow_layout::{ContainerGeometry, LayoutEngine, LayoutInput, LayoutItem, StackLayoutEngine};

    fn layout(count: usize) -> StackLayout {
        let items: Vec<LayoutItem> = (0..count)
            .map(|_| LayoutItem {
                id: ItemId::next(),
                size: Vec2::new(300.0, 100.0),
            })
            .collect();
        StackLayoutEngine::new().compute_layout(&LayoutInput {
            items: &items,
            direction: Direction::Down,
            separation: SeparationStyle::None,
            autoresize: true,
            geometry: ContainerGeometry {
                bounds: Rect::new(0.0, 0.0, 300.0, 600.0),
                safe_area_insets: EdgeInsets::ZERO,
                seek_safe_area: false,
                head_padding: 0.0,
            },
        })
    }

    #[test]
    fn test_swipe_mapping_growth_down() {
        let mapper = NavigationInputMapper::new(NavigationOptions::all(), Direction::Down);
        assert_eq!(mapper.map_swipe(SwipeDirection::Up), Some(NavigationRequest::Push));
        assert_eq!(mapper.map_swipe(SwipeDirection::Down), Some(NavigationRequest::Pop(1)));
        assert_eq!(mapper.map_swipe(SwipeDirection::Left), None);
        assert_eq!(mapper.map_swipe(SwipeDirection::Right), None);
    }

    #[test]
    fn test_swipe_mapping_other_directions() {
        let mut mapper = NavigationInputMapper::new(NavigationOptions::SWIPE, Direction::Up);
        assert_eq!(mapper.map_swipe(SwipeDirection::Down), Some(NavigationRequest::Push));
        assert_eq!(mapper.map_swipe(SwipeDirection::Up), Some(NavigationRequest::Pop(1)));

        mapper.set_direction(Direction::Left);
        assert_eq!(mapper.map_swipe(SwipeDirection::Right), Some(NavigationRequest::Push));
        assert_eq!(mapper.map_swipe(SwipeDirection::Left), Some(NavigationRequest::Pop(1)));
        assert_eq!(mapper.map_swipe(SwipeDirection::Up), None);

        mapper.set_direction(Direction::Right);
        assert_eq!(mapper.map_swipe(SwipeDirection::Left), Some(NavigationRequest::Push));
        assert_eq!(mapper.map_swipe(SwipeDirection::Right), Some(NavigationRequest::Pop(1)));
    }

    #[test]
    fn test_disabled_options_ignore_gestures() {
        let layout = layout(3);
        let mapper = NavigationInputMapper::new(NavigationOptions::TAP, Direction::Down);
        assert_eq!(mapper.map_swipe(SwipeDirection::Down), None);

        let mapper = NavigationInputMapper::new(NavigationOptions::SWIPE, Direction::Down);
        assert_eq!(mapper.map_tap(Vec2::new(10.0, 350.0), &layout, layout.items()), None);
    }

    #[test]
    fn test_tap_pops_down_to_the_tapped_item() {
        // Head at 500..600, then 400..500 and so on down to index 0 at 100..200
        let layout = layout(5);
        let mapper = NavigationInputMapper::new(NavigationOptions::all(), Direction::Down);

        assert_eq!(mapper.map_tap(Vec2::new(10.0, 250.0), &layout, layout.items()), Some(NavigationRequest::Pop(3)));
        assert_eq!(mapper.map_tap(Vec2::new(10.0, 150.0), &layout, layout.items()), Some(NavigationRequest::Pop(4)));
        assert_eq!(mapper.map_tap(Vec2::new(10.0, 50.0), &layout, layout.items()), None);
        assert_eq!(
            mapper.map(&GestureEvent::Tap { position: Vec2::new(10.0, 450.0) }, &layout, layout.items()),
            Some(NavigationRequest::Pop(1))
        );
    }

    #[test]
    fn test_tap_counts_against_live_items() {
        // Head (index 4) already left the stack but is still laid out
        let layout = layout(5);
        let live = &layout.items()[..4];
        let mapper = NavigationInputMapper::new(NavigationOptions::all(), Direction::Down);

        assert_eq!(mapper.map_tap(Vec2::new(10.0, 250.0), &layout, live), Some(NavigationRequest::Pop(2)));
        assert_eq!(mapper.map_tap(Vec2::new(10.0, 450.0), &layout, live), None);
        assert_eq!(mapper.map_tap(Vec2::new(10.0, 550.0), &layout, live), None);
    }

    #[test]
    fn test_tap_on_head_or_empty_space_is_ignored() {
        let layout = layout(2);
        let mapper = NavigationInputMapper::new(NavigationOptions::all(), Direction::Down);
        assert_eq!(mapper.map_tap(Vec2::new(10.0, 550.0), &layout, layout.items()), None);
        assert_eq!(mapper.map_tap(Vec2::new(10.0, 100.0), &layout, layout.items()), None);
    }
}
