// crates/stackflow-core/src/config.rs
use crate::appearance::{color, Color};
use crate::{Result, StackFlowError};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Edge of the container that newly pushed items advance towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = StackFlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(StackFlowError::InvalidConfiguration {
                field: "growth_direction",
                reason: format!("unknown direction '{}'", other),
            }),
        }
    }
}

/// Visual treatment between two adjacent items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparationStyle {
    None,
    Line { thickness: f32, color: Color },
    Padding { size: f32 },
}

impl Default for SeparationStyle {
    fn default() -> Self {
        SeparationStyle::Line {
            thickness: 1.0,
            color: color::WHITE,
        }
    }
}

impl SeparationStyle {
    /// Thickness along the growth axis and fill color of a separator.
    pub fn size_and_color(&self) -> (f32, Color) {
        match *self {
            SeparationStyle::None => (0.0, color::TRANSPARENT),
            SeparationStyle::Line { thickness, color } => (thickness, color),
            SeparationStyle::Padding { size } => (size, color::TRANSPARENT),
        }
    }
}

/// Rule set that de-emphasizes items buried under the head of the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadingStyle {
    None,
    Tint {
        color: Color,
        base_alpha: f32,
        #[serde(default)]
        alpha_decrement: Option<f32>,
    },
    GradientMask {
        distance: f32,
    },
    Combined(Vec<FadingStyle>),
}

impl Default for FadingStyle {
    fn default() -> Self {
        FadingStyle::Combined(vec![
            FadingStyle::Tint {
                color: color::BLACK,
                base_alpha: 0.9,
                alpha_decrement: None,
            },
            FadingStyle::GradientMask { distance: 500.0 },
        ])
    }
}

impl FadingStyle {
    fn validate(&self) -> Result<()> {
        match self {
            FadingStyle::None => Ok(()),
            FadingStyle::Tint {
                base_alpha,
                alpha_decrement,
                ..
            } => {
                if !(0.0..=1.0).contains(base_alpha) {
                    return Err(invalid("fading_style", format!("tint alpha {} is outside 0..=1", base_alpha)));
                }
                if let Some(decrement) = alpha_decrement {
                    ensure_non_negative("fading_style", *decrement)?;
                }
                Ok(())
            }
            FadingStyle::GradientMask { distance } => ensure_non_negative("fading_style", *distance),
            FadingStyle::Combined(styles) => styles.iter().try_for_each(FadingStyle::validate),
        }
    }
}

bitflags! {
    /// Built-in gestures the stack listens to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct NavigationOptions: u8 {
        const SWIPE = 1 << 1;
        const TAP = 1 << 2;
    }
}

impl Default for NavigationOptions {
    fn default() -> Self {
        NavigationOptions::SWIPE | NavigationOptions::TAP
    }
}

/// Everything the owner of a stack can tune. Changing any of it recomputes
/// layout and fading but never counts as a push or pop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfiguration {
    pub growth_direction: Direction,
    pub separation_style: SeparationStyle,
    pub fading_style: FadingStyle,
    pub navigation_options: NavigationOptions,
    pub autoresize_items: bool,
    pub seek_safe_area: bool,
    pub head_padding: f32,
    /// Seconds.
    pub transition_duration: f64,
}

impl Default for StackConfiguration {
    fn default() -> Self {
        Self {
            growth_direction: Direction::Down,
            separation_style: SeparationStyle::default(),
            fading_style: FadingStyle::default(),
            navigation_options: NavigationOptions::default(),
            autoresize_items: true,
            seek_safe_area: true,
            head_padding: 0.0,
            transition_duration: 0.25,
        }
    }
}

impl StackConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_growth_direction(mut self, direction: Direction) -> Self {
        self.growth_direction = direction;
        self
    }

    pub fn with_separation_style(mut self, style: SeparationStyle) -> Self {
        self.separation_style = style;
        self
    }

    pub fn with_fading_style(mut self, style: FadingStyle) -> Self {
        self.fading_style = style;
        self
    }

    pub fn with_navigation_options(mut self, options: NavigationOptions) -> Self {
        self.navigation_options = options;
        self
    }

    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration.as_secs_f64();
        self
    }

    pub fn with_head_padding(mut self, padding: f32) -> Self {
        self.head_padding = padding;
        self
    }

    pub fn with_autoresize_items(mut self, autoresize: bool) -> Self {
        self.autoresize_items = autoresize;
        self
    }

    pub fn with_seek_safe_area(mut self, seek: bool) -> Self {
        self.seek_safe_area = seek;
        self
    }

    /// Transition duration as a `Duration`; malformed values collapse to zero.
    pub fn transition_duration(&self) -> Duration {
        if self.transition_duration.is_finite() && self.transition_duration > 0.0 {
            Duration::from_secs_f64(self.transition_duration)
        } else {
            Duration::ZERO
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("head_padding", self.head_padding)?;

        if !self.transition_duration.is_finite() || self.transition_duration < 0.0 {
            return Err(invalid(
                "transition_duration",
                format!("{} is not a non-negative number of seconds", self.transition_duration),
            ));
        }

        match self.separation_style {
            SeparationStyle::Line { thickness, .. } => ensure_non_negative("separation_style", thickness)?,
            SeparationStyle::Padding { size } => ensure_non_negative("separation_style", size)?,
            SeparationStyle::None => {}
        }

        self.fading_style.validate()
    }
}

fn invalid(field: &'static str, reason: String) -> StackFlowError {
    StackFlowError::InvalidConfiguration { field, reason }
}

fn ensure_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{} must be a finite non-negative value", value)))
    }
}
