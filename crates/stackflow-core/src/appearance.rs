// crates/stackflow-core/src/appearance.rs
use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// RGBA, each channel in 0..=1.
pub type Color = Vec4;

/// Color utilities
pub mod color {
    use glam::Vec4;

    pub const TRANSPARENT: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);
    pub const GRAY: Vec4 = Vec4::new(0.5, 0.5, 0.5, 1.0);
    pub const DARK_GRAY: Vec4 = Vec4::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0, 1.0);

    pub fn from_hex(hex: u32) -> Vec4 {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Vec4::new(r, g, b, a)
    }
}

/// Height of the navigation header shown above titled items.
pub const HEADER_HEIGHT: f32 = 44.0;

/// Horizontal margin around header button labels.
pub const HEADER_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Bold,
    Heavy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    pub const SYSTEM_FONT_SIZE: f32 = 14.0;

    pub fn system(size: f32) -> Self {
        Self {
            family: "system".to_string(),
            size,
            weight: FontWeight::Normal,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::system(Self::SYSTEM_FONT_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonTitle {
    pub text: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconRef {
    pub name: String,
    /// Intrinsic pixel size; only the aspect ratio matters for layout.
    pub size: Vec2,
}

/// What a header button shows. A title wins over an icon; with neither the
/// button collapses to zero width.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ButtonIdentity {
    pub title: Option<ButtonTitle>,
    pub icon: Option<IconRef>,
}

impl ButtonIdentity {
    pub fn titled(text: impl Into<String>, color: Color) -> Self {
        Self {
            title: Some(ButtonTitle {
                text: text.into(),
                color,
            }),
            icon: None,
        }
    }

    pub fn icon(name: impl Into<String>, size: Vec2) -> Self {
        Self {
            title: None,
            icon: Some(IconRef {
                name: name.into(),
                size,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.icon.is_none()
    }
}

/// Appearance of an item's navigation header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopBarAppearance {
    pub background_color: Color,
    pub title_font: FontSpec,
    pub title_text_color: Color,
    pub pop_button: ButtonIdentity,
    pub push_button: ButtonIdentity,
}

impl Default for TopBarAppearance {
    fn default() -> Self {
        Self {
            background_color: color::WHITE,
            title_font: FontSpec::default(),
            title_text_color: color::DARK_GRAY,
            pop_button: ButtonIdentity::titled("prev", color::BLUE),
            push_button: ButtonIdentity::titled("next", color::BLUE),
        }
    }
}

/// Appearance assigned to a pushed item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackItemAppearance {
    pub background_color: Color,
    pub top_bar: TopBarAppearance,
}

impl StackItemAppearance {
    pub fn default_preset() -> Self {
        Self {
            background_color: color::TRANSPARENT,
            top_bar: TopBarAppearance::default(),
        }
    }

    /// A custom background; without a top bar the preset one is used.
    pub fn new(background_color: Color, top_bar: Option<TopBarAppearance>) -> Self {
        Self {
            background_color,
            top_bar: top_bar.unwrap_or_default(),
        }
    }
}

impl Default for StackItemAppearance {
    fn default() -> Self {
        Self::default_preset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset() {
        let appearance = StackItemAppearance::default_preset();
        assert_eq!(appearance.background_color, color::TRANSPARENT);
        assert_eq!(appearance.top_bar.background_color, color::WHITE);
        assert_eq!(appearance.top_bar.title_font.size, 14.0);
        assert_eq!(
            appearance.top_bar.pop_button.title.as_ref().map(|t| t.text.as_str()),
            Some("prev")
        );
        assert_eq!(
            appearance.top_bar.push_button.title.as_ref().map(|t| t.text.as_str()),
            Some("next")
        );
    }

    #[test]
    fn test_missing_top_bar_falls_back_to_preset() {
        let appearance = StackItemAppearance::new(color::RED, None);
        assert_eq!(appearance.background_color, color::RED);
        assert_eq!(appearance.top_bar, TopBarAppearance::default());
    }

    #[test]
    fn test_button_identity_emptiness() {
        assert!(ButtonIdentity::default().is_empty());
        assert!(!ButtonIdentity::icon("back", Vec2::new(24.0, 24.0)).is_empty());
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(color::from_hex(0xFF0000FF), color::RED);
        assert_eq!(color::from_hex(0xFFFFFF80).w, 128.0 / 255.0);
    }
}
