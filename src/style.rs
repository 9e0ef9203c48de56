use serde::{Deserialize, Serialize};

/// Horizontal alignment of finished lines within the column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    /// Flush left; residual slack stays on the right.
    #[default]
    Left,
    /// Flush right; the line is offset by the full slack.
    Right,
    /// Centered; the line is offset by half the slack.
    Center,
    /// Slack is distributed across expanding spaces. The last line of a
    /// paragraph falls back to left alignment.
    Justified,
}

/// Paragraph-level configuration consumed by the layout engine.
///
/// Lengths are in the same unit as cluster widths (typically CSS pixels or
/// points); word-spacing bounds are ratios of the natural space width.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Line alignment within the column.
    pub alignment: Alignment,
    /// Inset from the column's left edge.
    pub left_margin: f32,
    /// Inset from the column's right edge.
    pub right_margin: f32,
    /// Extra inset applied to the first line of the text.
    pub first_line_indent: f32,
    /// Baseline step as a multiplier of the font size.
    pub line_spacing: f32,
    /// Lower word-spacing bound; expanding spaces may shrink to
    /// `min_word_spacing * natural_width`.
    pub min_word_spacing: f32,
    /// Upper word-spacing bound for the stretch budget.
    pub max_word_spacing: f32,
    /// Ask the hyphenator for mid-word break opportunities.
    pub hyphenate: bool,
    /// Maximum number of consecutive lines ending in a visible hyphen.
    pub hyphen_consecutive_limit: u8,
    /// Additive badness applied to hyphenation break candidates, in the same
    /// unit as cluster widths.
    pub hyphen_penalty: f32,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            left_margin: 0.0,
            right_margin: 0.0,
            first_line_indent: 0.0,
            line_spacing: 1.2,
            min_word_spacing: 0.8,
            max_word_spacing: 1.5,
            hyphenate: false,
            hyphen_consecutive_limit: 2,
            hyphen_penalty: 20.0,
        }
    }
}

/// Character-level style. The engine reads only `font_size`; the descriptive
/// fields are passed through to the shaper collaborator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharStyle {
    /// Font family hint for the shaper.
    pub family: String,
    /// Numeric weight (400 regular, 700 bold).
    pub weight: u16,
    /// Italic hint for the shaper.
    pub italic: bool,
    /// Font size; drives the default line height and the hyphen-width
    /// fallback.
    pub font_size: f32,
}

impl Default for CharStyle {
    fn default() -> Self {
        Self {
            family: "serif".to_string(),
            weight: 400,
            italic: false,
            font_size: 16.0,
        }
    }
}
