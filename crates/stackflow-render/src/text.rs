// crates/stackflow-render/src/text.rs
use stackflow_core::FontSpec;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
}

impl TextMetrics {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Text measurement trait. Header titles and button labels are sized through
/// it so the resolver never depends on a concrete font stack.
pub trait TextShaper {
    fn measure_text(&self, text: &str, font: &FontSpec) -> TextMetrics;
}

/// Fixed-ratio estimate, good enough for tests and the debug tool.
pub struct SimpleTextShaper {
    average_char_width: f32,
}

impl SimpleTextShaper {
    pub fn new() -> Self {
        Self {
            average_char_width: 0.5, // Approximate ratio of char width to font size
        }
    }

    pub fn with_char_width(average_char_width: f32) -> Self {
        Self { average_char_width }
    }
}

impl Default for SimpleTextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper for SimpleTextShaper {
    fn measure_text(&self, text: &str, font: &FontSpec) -> TextMetrics {
        let width = text.chars().count() as f32 * font.size * self.average_char_width;
        TextMetrics::new(width, font.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_shaper_scales_with_font_size() {
        let shaper = SimpleTextShaper::new();
        assert_eq!(shaper.measure_text("prev", &FontSpec::system(14.0)).width, 28.0);
        assert_eq!(shaper.measure_text("prev", &FontSpec::system(20.0)).width, 40.0);
        assert_eq!(shaper.measure_text("", &FontSpec::default()).width, 0.0);
    }
}
