// src/script.rs
//! Tiny line-based language for replaying navigation sessions against a
//! stack wired to a [`RecordingRenderer`].

use glam::Vec2;
use stackflow_core::{color, Color, Direction, FadingStyle, Rect, SeparationStyle, StackConfiguration, StackContent};
use stackflow_render::{GestureEvent, RecordingRenderer, SwipeDirection};
use stackflow_runtime::{NavigationRequest, StackFlow};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' expects {expected}")]
    MissingArgument {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },

    #[error("line {line}: invalid value '{value}': {reason}")]
    InvalidValue { line: usize, value: String, reason: String },
}

/// Placeholder content used by scripts: a name and a preferred size.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub name: String,
    pub size: Vec2,
}

impl StackContent for Card {
    fn preferred_size(&self) -> Vec2 {
        self.size
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Push {
        name: String,
        size: Vec2,
        title: Option<String>,
    },
    Pop(usize),
    Clean,
    Swipe(SwipeDirection),
    Tap(Vec2),
    Direction(Direction),
    Separation(SeparationStyle),
    Fading(FadingStyle),
    Advance(Duration),
    Settle,
    Bounds(Vec2),
}

/// Parses a whole script. Blank lines and lines starting with `#` are skipped.
pub fn parse_script(source: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    let mut commands = Vec::new();
    for (index, line) in source.lines().enumerate() {
        if let Some(command) = parse_line(index + 1, line)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

pub fn parse_line(line: usize, text: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let mut tokens = Tokens {
        line,
        items: text.split_whitespace().collect(),
        position: 0,
    };
    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "push" => {
            let name = tokens.require("push", "<name> <width> <height> [title...]")?.to_string();
            let width = tokens.number("push", "<name> <width> <height> [title...]")?;
            let height = tokens.number("push", "<name> <width> <height> [title...]")?;
            let title = tokens.rest();
            ScriptCommand::Push {
                name,
                size: Vec2::new(width, height),
                title: if title.is_empty() { None } else { Some(title) },
            }
        }
        "pop" => match tokens.next() {
            Some(count) => ScriptCommand::Pop(parse_count(line, count)?),
            None => ScriptCommand::Pop(1),
        },
        "clean" => ScriptCommand::Clean,
        "swipe" => {
            let value = tokens.require("swipe", "up|down|left|right")?;
            let direction = value.parse::<SwipeDirection>().map_err(|reason| ScriptError::InvalidValue {
                line,
                value: value.to_string(),
                reason,
            })?;
            ScriptCommand::Swipe(direction)
        }
        "tap" => {
            let x = tokens.number("tap", "<x> <y>")?;
            let y = tokens.number("tap", "<x> <y>")?;
            ScriptCommand::Tap(Vec2::new(x, y))
        }
        "direction" => {
            let value = tokens.require("direction", "up|down|left|right")?;
            let direction = value.parse::<Direction>().map_err(|e| ScriptError::InvalidValue {
                line,
                value: value.to_string(),
                reason: e.to_string(),
            })?;
            ScriptCommand::Direction(direction)
        }
        "separation" => ScriptCommand::Separation(parse_separation(&mut tokens)?),
        "fading" => ScriptCommand::Fading(parse_fading(&mut tokens)?),
        "advance" => {
            let millis = tokens.number("advance", "<milliseconds>")?;
            if millis < 0.0 {
                return Err(tokens.invalid(&millis.to_string(), "time cannot run backwards"));
            }
            ScriptCommand::Advance(Duration::from_secs_f64(millis as f64 / 1000.0))
        }
        "settle" => ScriptCommand::Settle,
        "bounds" => {
            let width = tokens.number("bounds", "<width> <height>")?;
            let height = tokens.number("bounds", "<width> <height>")?;
            ScriptCommand::Bounds(Vec2::new(width, height))
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };

    Ok(Some(command))
}

struct Tokens<'a> {
    line: usize,
    items: Vec<&'a str>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn next(&mut self) -> Option<&'a str> {
        let token = self.items.get(self.position).copied();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn peek(&self) -> Option<&'a str> {
        self.items.get(self.position).copied()
    }

    fn rest(&mut self) -> String {
        let rest = self.items[self.position.min(self.items.len())..].join(" ");
        self.position = self.items.len();
        rest
    }

    fn require(&mut self, command: &'static str, expected: &'static str) -> Result<&'a str, ScriptError> {
        self.next().ok_or(ScriptError::MissingArgument {
            line: self.line,
            command,
            expected,
        })
    }

    fn number(&mut self, command: &'static str, expected: &'static str) -> Result<f32, ScriptError> {
        let value = self.require(command, expected)?;
        match value.parse::<f32>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(self.invalid(value, "not a number")),
        }
    }

    fn invalid(&self, value: &str, reason: &str) -> ScriptError {
        ScriptError::InvalidValue {
            line: self.line,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn parse_count(line: usize, value: &str) -> Result<usize, ScriptError> {
    value.parse::<usize>().map_err(|_| ScriptError::InvalidValue {
        line,
        value: value.to_string(),
        reason: "expected an item count".to_string(),
    })
}

/// `#RRGGBB` or `#RRGGBBAA`.
fn parse_color(tokens: &Tokens<'_>, value: &str) -> Result<Color, ScriptError> {
    let hex = value.trim_start_matches('#');
    let parsed = match hex.len() {
        6 => u32::from_str_radix(hex, 16).map(|rgb| (rgb << 8) | 0xFF),
        8 => u32::from_str_radix(hex, 16),
        _ => return Err(tokens.invalid(value, "expected #RRGGBB or #RRGGBBAA")),
    };
    parsed
        .map(color::from_hex)
        .map_err(|_| tokens.invalid(value, "expected #RRGGBB or #RRGGBBAA"))
}

fn parse_separation(tokens: &mut Tokens<'_>) -> Result<SeparationStyle, ScriptError> {
    const EXPECTED: &str = "none | line <thickness> [#color] | padding <size>";
    let kind = tokens.require("separation", EXPECTED)?;
    match kind {
        "none" => Ok(SeparationStyle::None),
        "line" => {
            let thickness = tokens.number("separation", EXPECTED)?;
            let color = match tokens.next() {
                Some(value) => parse_color(tokens, value)?,
                None => color::WHITE,
            };
            Ok(SeparationStyle::Line { thickness, color })
        }
        "padding" => Ok(SeparationStyle::Padding {
            size: tokens.number("separation", EXPECTED)?,
        }),
        other => Err(tokens.invalid(other, EXPECTED)),
    }
}

/// One or more effects; several are combined. `tint <alpha> [decrement] [#color]`,
/// `mask <distance>`, `none`, `default`.
fn parse_fading(tokens: &mut Tokens<'_>) -> Result<FadingStyle, ScriptError> {
    const EXPECTED: &str = "none | default | tint <alpha> [decrement] [#color] | mask <distance>";
    let mut styles = Vec::new();

    while let Some(kind) = tokens.next() {
        let style = match kind {
            "none" => FadingStyle::None,
            "default" => FadingStyle::default(),
            "tint" => {
                let base_alpha = tokens.number("fading", EXPECTED)?;
                let alpha_decrement = match tokens.peek().map(str::parse::<f32>) {
                    Some(Ok(decrement)) => {
                        tokens.next();
                        Some(decrement)
                    }
                    _ => None,
                };
                let color = match tokens.peek() {
                    Some(value) if value.starts_with('#') => {
                        tokens.next();
                        parse_color(tokens, value)?
                    }
                    _ => color::BLACK,
                };
                FadingStyle::Tint {
                    color,
                    base_alpha,
                    alpha_decrement,
                }
            }
            "mask" => FadingStyle::GradientMask {
                distance: tokens.number("fading", EXPECTED)?,
            },
            other => return Err(tokens.invalid(other, EXPECTED)),
        };
        styles.push(style);
    }

    match styles.len() {
        0 => Err(ScriptError::MissingArgument {
            line: tokens.line,
            command: "fading",
            expected: EXPECTED,
        }),
        1 => Ok(styles.remove(0)),
        _ => Ok(FadingStyle::Combined(styles)),
    }
}

/// Replays scripts against a stack and plays the delegate's part: requests
/// coming out of gestures are carried out straight away.
pub struct ScriptRunner {
    stack: StackFlow<Card, RecordingRenderer>,
    generated: usize,
    last_size: Vec2,
}

impl ScriptRunner {
    pub fn new(config: StackConfiguration, bounds: Vec2) -> Self {
        let mut stack = StackFlow::with_configuration(config, RecordingRenderer::new());
        stack.set_bounds(Rect::from_position_size(Vec2::ZERO, bounds));
        Self {
            stack,
            generated: 0,
            last_size: Vec2::new(bounds.x, 100.0),
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.stack = self.stack.with_debug(debug);
        self
    }

    pub fn stack(&self) -> &StackFlow<Card, RecordingRenderer> {
        &self.stack
    }

    pub fn run(&mut self, commands: &[ScriptCommand]) {
        for command in commands {
            self.execute(command);
        }
    }

    pub fn execute(&mut self, command: &ScriptCommand) {
        debug!("Executing {:?}", command);
        match command {
            ScriptCommand::Push { name, size, title } => {
                self.last_size = *size;
                self.stack.push(
                    Card {
                        name: name.clone(),
                        size: *size,
                    },
                    title.clone(),
                    None,
                );
            }
            ScriptCommand::Pop(count) => self.stack.pop(*count),
            ScriptCommand::Clean => self.stack.clean(),
            ScriptCommand::Swipe(direction) => {
                let request = self.stack.handle_gesture(GestureEvent::Swipe { direction: *direction });
                self.carry_out(request);
            }
            ScriptCommand::Tap(position) => {
                let request = self.stack.handle_gesture(GestureEvent::Tap { position: *position });
                self.carry_out(request);
            }
            ScriptCommand::Direction(direction) => self.stack.set_growth_direction(*direction),
            ScriptCommand::Separation(style) => self.stack.set_separation_style(*style),
            ScriptCommand::Fading(style) => self.stack.set_fading_style(style.clone()),
            ScriptCommand::Advance(delta) => self.stack.advance(*delta),
            ScriptCommand::Settle => self.stack.settle(),
            ScriptCommand::Bounds(size) => self.stack.set_bounds(Rect::from_position_size(Vec2::ZERO, *size)),
        }
    }

    fn carry_out(&mut self, request: Option<NavigationRequest>) {
        match request {
            Some(NavigationRequest::Push) => {
                self.generated += 1;
                let name = format!("card-{}", self.generated);
                info!("Gesture pushed {}", name);
                self.stack.push(
                    Card {
                        name,
                        size: self.last_size,
                    },
                    None,
                    None,
                );
            }
            Some(NavigationRequest::Pop(count)) => {
                info!("Gesture popped {}", count);
                self.stack.pop(count);
            }
            None => {}
        }
    }
}
