//! Shared fixtures for the layout regression tests.
//!
//! `FixedShaper` gives every cluster the same advance and vertical metrics
//! so expected line geometry can be computed by hand.

#![allow(dead_code)]

use std::sync::Arc;

use lineflow::{
    CharStyle, ClusterFlags, GlyphCluster, LayoutEngine, ParagraphStyle, Shaper,
};

/// Advance of every cluster produced by [`FixedShaper`].
pub const GLYPH_W: f32 = 10.0;
/// Ascent of every cluster produced by [`FixedShaper`].
pub const ASCENT: f32 = 8.0;
/// Descent of every cluster produced by [`FixedShaper`].
pub const DESCENT: f32 = 2.0;
/// Baseline step used by [`engine`]: font size 16 at 1.25 line spacing.
pub const LINE_H: f32 = 20.0;

/// Deterministic shaper: one cluster per character, all advances equal.
/// Flag assignment mirrors the production shaper.
pub struct FixedShaper;

impl Shaper for FixedShaper {
    fn shape(&self, text: &str, _style: &CharStyle) -> Vec<GlyphCluster> {
        text.chars()
            .enumerate()
            .map(|(index, ch)| {
                let mut flags = ClusterFlags::empty();
                let mut width = GLYPH_W;
                match ch {
                    '\n' => width = 0.0,
                    ' ' => {
                        flags.set(ClusterFlags::EXPANDING_SPACE);
                        flags.set(ClusterFlags::LINE_BOUNDARY);
                    }
                    '\u{00A0}' => flags.set(ClusterFlags::FIXED_SPACE),
                    '\u{00AD}' => {
                        width = 0.0;
                        flags.set(ClusterFlags::HYPHENATION_POSSIBLE);
                    }
                    '-' => flags.set(ClusterFlags::LINE_BOUNDARY),
                    '。' => {
                        flags.set(ClusterFlags::NO_BREAK_BEFORE);
                        flags.set(ClusterFlags::LINE_BOUNDARY);
                    }
                    '「' => flags.set(ClusterFlags::NO_BREAK_AFTER),
                    c if ('\u{4E00}'..='\u{9FFF}').contains(&c) => {
                        flags.set(ClusterFlags::LINE_BOUNDARY);
                    }
                    _ => {}
                }
                GlyphCluster {
                    first_char: index,
                    last_char: index,
                    text: ch.to_string(),
                    width,
                    ascent: ASCENT,
                    descent: DESCENT,
                    extra_width: 0.0,
                    flags,
                }
            })
            .collect()
    }

    fn hyphen_advance(&self, _style: &CharStyle) -> Option<f32> {
        Some(GLYPH_W)
    }
}

/// Style whose baseline step works out to [`LINE_H`] at font size 16.
pub fn base_style() -> ParagraphStyle {
    ParagraphStyle {
        line_spacing: 1.25,
        ..ParagraphStyle::default()
    }
}

/// Engine wired to [`FixedShaper`] with a 20-unit baseline step.
pub fn engine(style: ParagraphStyle) -> LayoutEngine {
    LayoutEngine::new()
        .with_shaper(Arc::new(FixedShaper))
        .with_paragraph_style(style)
        .with_char_style(CharStyle {
            font_size: 16.0,
            ..CharStyle::default()
        })
}
