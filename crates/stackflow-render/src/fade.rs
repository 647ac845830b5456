// crates/stackflow-render/src/fade.rs
use glam::Vec2;
use stackflow_core::{Color, Direction, FadingStyle, ItemId};
use tracing::trace;

/// Visual state of a single item after fading rules are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemFade {
    pub id: ItemId,
    pub opacity: f32,
    /// Tint color of the rule that dimmed this item, `None` when no tint
    /// applies. Only `opacity` is applied to the item; renderers do not draw
    /// the color as an overlay.
    pub tint: Option<Color>,
    pub interactive: bool,
}

/// Linear alpha mask over the whole content container. Points are unit
/// coordinates of the container; stops are `(location, alpha)` pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientMask {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: [(f32, f32); 3],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FadeState {
    /// Same order as the stack, bottom first.
    pub items: Vec<ItemFade>,
    pub mask: Option<GradientMask>,
}

impl FadeState {
    pub fn item(&self, id: ItemId) -> Option<&ItemFade> {
        self.items.iter().find(|fade| fade.id == id)
    }

    pub fn interactive_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().filter(|fade| fade.interactive).map(|fade| fade.id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FadeInput<'a> {
    pub items: &'a [ItemId],
    pub direction: Direction,
    pub style: &'a FadingStyle,
    /// Head item extent along the growth axis.
    pub head_extent: f32,
    /// Container extent along the growth axis.
    pub container_extent: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TintRule {
    color: Color,
    base_alpha: f32,
    alpha_decrement: Option<f32>,
}

/// Leaf effects per channel. A `None` channel is reset to neutral.
#[derive(Debug, Default)]
struct Channels {
    tint: Option<TintRule>,
    mask: Option<f32>,
}

impl Channels {
    fn collect(style: &FadingStyle) -> Self {
        let mut channels = Channels::default();
        channels.visit(style);
        channels
    }

    fn visit(&mut self, style: &FadingStyle) {
        match style {
            FadingStyle::None => {}
            FadingStyle::Tint {
                color,
                base_alpha,
                alpha_decrement,
            } => {
                self.tint = Some(TintRule {
                    color: *color,
                    base_alpha: *base_alpha,
                    alpha_decrement: *alpha_decrement,
                })
            }
            FadingStyle::GradientMask { distance } => self.mask = Some(*distance),
            FadingStyle::Combined(styles) => styles.iter().for_each(|style| self.visit(style)),
        }
    }
}

/// Evaluates a fading style against the current stack. Pure: the output
/// depends on the input only.
pub fn compute_fade(input: &FadeInput<'_>) -> FadeState {
    let count = input.items.len();
    if count == 0 {
        return FadeState::default();
    }

    let channels = Channels::collect(input.style);

    let items = input
        .items
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let is_top = index + 1 == count;
            match channels.tint {
                Some(rule) if !is_top => ItemFade {
                    id: *id,
                    opacity: tint_opacity(&rule, count - index - 1),
                    tint: Some(rule.color),
                    interactive: false,
                },
                _ => ItemFade {
                    id: *id,
                    opacity: 1.0,
                    tint: None,
                    interactive: is_top,
                },
            }
        })
        .collect();

    let mask = channels
        .mask
        .and_then(|distance| gradient_mask(input.direction, distance, input.head_extent, input.container_extent));

    trace!("Fade over {} items (tint: {}, mask: {})", count, channels.tint.is_some(), mask.is_some());
    FadeState { items, mask }
}

/// `distance` is 1 for the item right below the head.
fn tint_opacity(rule: &TintRule, distance: usize) -> f32 {
    let alpha = match rule.alpha_decrement {
        Some(decrement) => rule.base_alpha - decrement * distance.saturating_sub(1) as f32,
        None => rule.base_alpha,
    };
    alpha.clamp(0.0, 1.0)
}

fn gradient_mask(direction: Direction, distance: f32, head_extent: f32, container_extent: f32) -> Option<GradientMask> {
    if container_extent <= 0.0 {
        return None;
    }

    let item_end = (head_extent / container_extent).clamp(0.0, 1.0);
    let effect_end = (item_end + distance / container_extent).clamp(item_end, 1.0);

    // The gradient starts at the head's edge of the container
    let (start, end) = match direction {
        Direction::Up => (Vec2::new(0.5, 0.0), Vec2::new(0.5, 1.0)),
        Direction::Down => (Vec2::new(0.5, 1.0), Vec2::new(0.5, 0.0)),
        Direction::Left => (Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5)),
        Direction::Right => (Vec2::new(1.0, 0.5), Vec2::new(0.0, 0.5)),
    };

    Some(GradientMask {
        start,
        end,
        stops: [(item_end, 1.0), (effect_end, 0.0), (1.0, 0.0)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackflow_core::color;

    fn ids(count: usize) -> Vec<ItemId> {
        (0..count).map(|_| ItemId::next()).collect()
    }

    fn fade(items: &[ItemId], style: &FadingStyle) -> FadeState {
        compute_fade(&FadeInput {
            items,
            direction: Direction::Down,
            style,
            head_extent: 100.0,
            container_extent: 600.0,
        })
    }

    fn tint(base_alpha: f32, alpha_decrement: Option<f32>) -> FadingStyle {
        FadingStyle::Tint {
            color: color::BLACK,
            base_alpha,
            alpha_decrement,
        }
    }

    #[test]
    fn test_none_leaves_everything_opaque() {
        let items = ids(3);
        let state = fade(&items, &FadingStyle::None);
        assert!(state.items.iter().all(|f| f.opacity == 1.0 && f.tint.is_none()));
        assert!(state.mask.is_none());
        assert_eq!(state.interactive_items().collect::<Vec<_>>(), vec![items[2]]);
    }

    #[test]
    fn test_tint_decrement_clamps_at_zero() {
        let items = ids(4);
        let state = fade(&items, &tint(0.9, Some(0.5)));

        let opacities: Vec<f32> = state.items.iter().map(|f| f.opacity).collect();
        assert!((opacities[2] - 0.9).abs() < 1e-6);
        assert!((opacities[1] - 0.4).abs() < 1e-6);
        assert_eq!(opacities[0], 0.0);
        assert_eq!(opacities[3], 1.0);
        assert_eq!(state.items[3].tint, None);
        assert_eq!(state.items[0].tint, Some(color::BLACK));
    }

    #[test]
    fn test_tint_without_decrement_is_flat() {
        let items = ids(3);
        let state = fade(&items, &tint(0.7, None));
        assert_eq!(state.items[0].opacity, 0.7);
        assert_eq!(state.items[1].opacity, 0.7);
        assert_eq!(state.items[2].opacity, 1.0);
    }

    #[test]
    fn test_gradient_mask_stops_and_direction() {
        let items = ids(2);
        let state = fade(&items, &FadingStyle::GradientMask { distance: 300.0 });
        let mask = state.mask.unwrap();

        assert_eq!(mask.start, Vec2::new(0.5, 1.0));
        assert_eq!(mask.end, Vec2::new(0.5, 0.0));
        assert!((mask.stops[0].0 - 100.0 / 600.0).abs() < 1e-6);
        assert!((mask.stops[1].0 - 400.0 / 600.0).abs() < 1e-6);
        assert_eq!(mask.stops[2], (1.0, 0.0));
        assert!(state.items.iter().all(|f| f.opacity == 1.0));
    }

    #[test]
    fn test_gradient_mask_needs_a_container() {
        let items = ids(1);
        let state = compute_fade(&FadeInput {
            items: &items,
            direction: Direction::Left,
            style: &FadingStyle::GradientMask { distance: 50.0 },
            head_extent: 10.0,
            container_extent: 0.0,
        });
        assert!(state.mask.is_none());
    }

    #[test]
    fn test_combined_missing_channel_is_reset() {
        let items = ids(3);
        let both = FadingStyle::Combined(vec![tint(0.9, None), FadingStyle::GradientMask { distance: 500.0 }]);
        let tint_only = FadingStyle::Combined(vec![tint(0.9, None)]);

        assert!(fade(&items, &both).mask.is_some());

        let state = fade(&items, &tint_only);
        assert!(state.mask.is_none());
        assert_eq!(state.items[0].opacity, 0.9);
    }

    #[test]
    fn test_nested_combined_last_leaf_wins() {
        let items = ids(2);
        let style = FadingStyle::Combined(vec![
            tint(0.9, None),
            FadingStyle::Combined(vec![FadingStyle::None, tint(0.3, None)]),
        ]);
        assert_eq!(fade(&items, &style).items[0].opacity, 0.3);
    }

    #[test]
    fn test_fade_is_deterministic() {
        let items = ids(5);
        let style = FadingStyle::default();
        assert_eq!(fade(&items, &style), fade(&items, &style));
    }

    #[test]
    fn test_empty_stack() {
        let state = fade(&[], &FadingStyle::default());
        assert!(state.items.is_empty());
        assert!(state.mask.is_none());
    }
}
