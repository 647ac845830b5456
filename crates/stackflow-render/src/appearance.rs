// crates/stackflow-render/src/appearance.rs
use crate::text::TextShaper;
use glam::Vec2;
use stackflow_core::{ButtonIdentity, Color, FontSpec, Rect, TopBarAppearance, HEADER_HEIGHT, HEADER_MARGIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderButton {
    Pop,
    Push,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedButton {
    pub identity: ButtonIdentity,
    /// Header-local.
    pub frame: Rect,
}

/// Everything a renderer needs to draw an item's header.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHeader {
    /// Item-local; the header sits at the top of the item.
    pub frame: Rect,
    pub background_color: Color,
    pub title: String,
    pub title_font: FontSpec,
    pub title_color: Color,
    /// Header-local.
    pub title_frame: Rect,
    pub pop_button: Option<ResolvedButton>,
    pub push_button: Option<ResolvedButton>,
}

impl ResolvedHeader {
    pub fn button(&self, button: HeaderButton) -> Option<&ResolvedButton> {
        match button {
            HeaderButton::Pop => self.pop_button.as_ref(),
            HeaderButton::Push => self.push_button.as_ref(),
        }
    }
}

/// Width a header button needs: the label plus a margin on each side, or for
/// an icon the header height scaled by the icon's aspect ratio plus margins.
/// A button with neither collapses to zero.
pub fn button_width(identity: &ButtonIdentity, font: &FontSpec, header_height: f32, shaper: &dyn TextShaper) -> f32 {
    if let Some(title) = &identity.title {
        shaper.measure_text(&title.text, font).width + HEADER_MARGIN * 2.0
    } else if let Some(icon) = &identity.icon {
        if icon.size.y <= 0.0 {
            return 0.0;
        }
        header_height * (icon.size.x / icon.size.y) + HEADER_MARGIN * 2.0
    } else {
        0.0
    }
}

/// Resolves the header of an item `width` wide. `pop` and `push` say which
/// affordances the item currently shows.
pub fn resolve_header(
    title: &str,
    appearance: &TopBarAppearance,
    width: f32,
    pop: bool,
    push: bool,
    shaper: &dyn TextShaper,
) -> ResolvedHeader {
    let height = HEADER_HEIGHT;
    let font = &appearance.title_font;

    let pop_width = if pop {
        Some(button_width(&appearance.pop_button, font, height, shaper))
    } else {
        None
    };
    let push_width = if push {
        Some(button_width(&appearance.push_button, font, height, shaper))
    } else {
        None
    };

    let longest = pop_width.unwrap_or(0.0).max(push_width.unwrap_or(0.0));
    let title_width = (width - longest * 2.0).max(0.0);

    let pop_button = pop_width.map(|_| ResolvedButton {
        identity: appearance.pop_button.clone(),
        frame: Rect::new(0.0, 0.0, longest, height),
    });
    let push_button = push_width.map(|_| ResolvedButton {
        identity: appearance.push_button.clone(),
        frame: Rect::new((width - longest).max(0.0), 0.0, longest, height),
    });

    ResolvedHeader {
        frame: Rect::from_position_size(Vec2::ZERO, Vec2::new(width, height)),
        background_color: appearance.background_color,
        title: title.to_string(),
        title_font: font.clone(),
        title_color: appearance.title_text_color,
        title_frame: Rect::new(longest, 0.0, title_width, height),
        pop_button,
        push_button,
    }
}
