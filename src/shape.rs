//! Shaping and hyphenation collaborators.
//!
//! The engine consumes pre-shaped clusters and never talks to a font
//! directly. `Shaper` turns text into measured clusters with
//! break-opportunity flags; `Hyphenator` adds mid-word break opportunities
//! in place. Both ship with heuristic defaults so the crate is usable
//! without a font stack: the default shaper measures with tiered advance
//! classes and the default hyphenator marks syllable boundaries.

use smallvec::SmallVec;

use crate::cluster::{ClusterFlags, GlyphCluster};
use crate::style::CharStyle;

/// Produces measured, flagged clusters from text.
///
/// Flag contract:
/// - `LINE_BOUNDARY` after every cluster where a normal line break is
///   permitted;
/// - `EXPANDING_SPACE` on whitespace participating in justification;
/// - `FIXED_SPACE` on non-breaking, fixed-advance whitespace;
/// - `NO_BREAK_BEFORE` / `NO_BREAK_AFTER` on clusters with directional
///   break restrictions;
/// - a cluster whose text is exactly `"\n"` is a mandatory hard break and
///   must NOT carry `LINE_BOUNDARY`.
pub trait Shaper: Send + Sync {
    /// Shape `text` into measured clusters.
    fn shape(&self, text: &str, style: &CharStyle) -> Vec<GlyphCluster>;

    /// Advance of the hyphen glyph shown when a hyphenation break is taken.
    ///
    /// Default returns `None`; the engine then falls back to
    /// `0.3 * font_size`.
    fn hyphen_advance(&self, style: &CharStyle) -> Option<f32> {
        let _ = style;
        None
    }
}

/// Adds `HYPHENATION_POSSIBLE` marks to shaped clusters in place. The only
/// contract is that a mark identifies a legal mid-word break.
pub trait Hyphenator: Send + Sync {
    /// Mark hyphenation opportunities on `clusters`.
    fn add_hyphenation(&self, clusters: &mut [GlyphCluster]);
}

/// Font-free shaper producing one cluster per character, measured with a
/// glyph-class width model. Ascent and descent default to `0.8`/`0.2` of the
/// font size.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicShaper;

impl Shaper for HeuristicShaper {
    fn shape(&self, text: &str, style: &CharStyle) -> Vec<GlyphCluster> {
        let size = style.font_size;
        let scale = style_scale(style);
        let mut clusters = Vec::with_capacity(text.chars().count());
        for (index, ch) in text.chars().enumerate() {
            let mut flags = ClusterFlags::empty();
            let mut width = glyph_em_width(ch) * size * scale;
            match ch {
                '\n' => {
                    // Hard break marker; handled by the driver, never a
                    // soft opportunity.
                    width = 0.0;
                }
                ' ' => {
                    flags.set(ClusterFlags::EXPANDING_SPACE);
                    flags.set(ClusterFlags::LINE_BOUNDARY);
                }
                '\t' => {
                    flags.set(ClusterFlags::EXPANDING_SPACE);
                    flags.set(ClusterFlags::LINE_BOUNDARY);
                }
                '\u{00A0}' | '\u{202F}' => {
                    flags.set(ClusterFlags::FIXED_SPACE);
                }
                '\u{00AD}' => {
                    // Invisible unless the break is taken.
                    width = 0.0;
                    flags.set(ClusterFlags::HYPHENATION_POSSIBLE);
                }
                '-' | '\u{2010}' | '\u{2013}' | '\u{2014}' => {
                    flags.set(ClusterFlags::LINE_BOUNDARY);
                }
                _ if is_cjk_ideograph(ch) => {
                    flags.set(ClusterFlags::LINE_BOUNDARY);
                }
                _ if is_cjk_closing(ch) => {
                    flags.set(ClusterFlags::NO_BREAK_BEFORE);
                    flags.set(ClusterFlags::LINE_BOUNDARY);
                }
                _ if is_cjk_opening(ch) => {
                    flags.set(ClusterFlags::NO_BREAK_AFTER);
                }
                _ if ch.is_whitespace() => {
                    flags.set(ClusterFlags::EXPANDING_SPACE);
                    flags.set(ClusterFlags::LINE_BOUNDARY);
                }
                _ => {}
            }
            clusters.push(GlyphCluster {
                first_char: index,
                last_char: index,
                text: ch.to_string(),
                width,
                ascent: 0.8 * size,
                descent: 0.2 * size,
                extra_width: 0.0,
                flags,
            });
        }
        clusters
    }

    fn hyphen_advance(&self, style: &CharStyle) -> Option<f32> {
        Some(glyph_em_width('-') * style.font_size * style_scale(style))
    }
}

/// Family/weight/italic width modifier, applied multiplicatively so the
/// effects compound the way real metrics do.
fn style_scale(style: &CharStyle) -> f32 {
    let family = style.family.to_ascii_lowercase();
    let mut scale = if family.contains("mono") || family.contains("fixed") {
        1.1
    } else if family.contains("sans") {
        0.98
    } else {
        // Serif and unknown families tend to run slightly wide.
        1.05
    };
    if style.weight >= 600 {
        scale *= 1.06;
    }
    if style.italic {
        scale *= 1.02;
    }
    scale
}

/// Coarse advance tiers in ems for a generic book face: quarter-em word
/// space, tabular digits on a half em, and the three dash kinds keeping
/// their distinct metric identities (hyphen, figure/en dash, em dash).
fn glyph_em_width(ch: char) -> f32 {
    match ch {
        ' ' | '\u{00A0}' | '\u{202F}' => 0.25,
        // Rendered as four word spaces.
        '\t' => 1.0,
        '\u{2014}' => 1.0,
        '\u{2012}' | '\u{2013}' => 0.5,
        '-' | '\u{2010}' | '\u{2011}' => 0.33,
        'i' | 'j' | 'l' | '.' | ',' | ';' | ':' | '!' | '|' | '\'' | '`' => 0.28,
        'f' | 'r' | 't' | 'I' | '"' | '(' | ')' | '[' | ']' | '{' | '}' | '/' | '\\' => 0.38,
        'm' | 'w' => 0.82,
        'M' | 'W' | '@' => 0.92,
        c if is_cjk_ideograph(c) || is_cjk_closing(c) || is_cjk_opening(c) => 1.0,
        c if c.is_ascii_digit() => 0.5,
        c if c.is_ascii_uppercase() => 0.67,
        c if c.is_ascii_lowercase() => 0.48,
        c if c.is_whitespace() => 0.25,
        _ => 0.6,
    }
}

fn is_cjk_ideograph(ch: char) -> bool {
    matches!(ch, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{3040}'..='\u{30FF}')
}

fn is_cjk_closing(ch: char) -> bool {
    matches!(
        ch,
        '\u{3001}' | '\u{3002}' | '\u{FF0C}' | '\u{FF0E}' | '\u{FF1A}' | '\u{FF1B}'
            | '\u{FF1F}' | '\u{FF01}' | '\u{300D}' | '\u{300F}' | '\u{FF09}' | '\u{3011}'
    )
}

fn is_cjk_opening(ch: char) -> bool {
    matches!(
        ch,
        '\u{300C}' | '\u{300E}' | '\u{FF08}' | '\u{3010}' | '\u{2018}' | '\u{201C}'
    )
}

/// Dictionary-free hyphenator splitting at syllable onsets (a consonant
/// carrying into a vowel, preceded by a vowel) and between doubled
/// consonants. Breaks keep at least two characters before the hyphen and
/// three after, the margins common in typesetting practice.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicHyphenator;

const MIN_HYPHENATION_WORD_LEN: usize = 6;
const LEFT_MIN: usize = 2;
const RIGHT_MIN: usize = 3;

impl Hyphenator for HeuristicHyphenator {
    fn add_hyphenation(&self, clusters: &mut [GlyphCluster]) {
        let mut word_start = 0;
        let mut index = 0;
        while index <= clusters.len() {
            let in_word = clusters
                .get(index)
                .is_some_and(|c| c.text.chars().all(|ch| ch.is_alphabetic()) && !c.text.is_empty());
            if in_word {
                index += 1;
                continue;
            }
            if index > word_start {
                mark_word(&mut clusters[word_start..index]);
            }
            word_start = index + 1;
            index += 1;
        }
    }
}

/// Mark split points within one word's clusters.
fn mark_word(word: &mut [GlyphCluster]) {
    if word.len() < MIN_HYPHENATION_WORD_LEN {
        return;
    }
    let chars: SmallVec<[char; 24]> = word
        .iter()
        .filter_map(|c| c.text.chars().next())
        .collect();
    let candidates = split_candidates(&chars);
    for split in candidates {
        // A split at `split` breaks after the cluster before it.
        let at = split - 1;
        if let Some(cluster) = word.get_mut(at) {
            if !cluster.flags.has(ClusterFlags::NO_BREAK_AFTER) {
                cluster.flags.set(ClusterFlags::HYPHENATION_POSSIBLE);
            }
        }
    }
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U')
}

/// Candidate split offsets (in characters) for a word.
///
/// A split at offset `i` (left fragment = `chars[..i]`) is allowed when it
/// lands on a syllable onset, a vowel followed by a consonant that carries
/// into a vowel ("repor-ter"), or falls between doubled consonants
/// ("hap-pen"). Offsets stay at least `LEFT_MIN` from the word start and
/// `RIGHT_MIN` from its end.
fn split_candidates(chars: &[char]) -> SmallVec<[usize; 8]> {
    let mut candidates: SmallVec<[usize; 8]> = SmallVec::new();
    if chars.len() < LEFT_MIN + RIGHT_MIN {
        return candidates;
    }
    for i in LEFT_MIN..=chars.len() - RIGHT_MIN {
        let prev = chars[i - 1];
        let cur = chars[i];
        if !prev.is_ascii_alphabetic() || !cur.is_ascii_alphabetic() {
            continue;
        }
        let onset = is_vowel(prev)
            && !is_vowel(cur)
            && chars.get(i + 1).is_some_and(|&c| is_vowel(c));
        let doubled = prev == cur && !is_vowel(cur);
        if onset || doubled {
            candidates.push(i);
        }
    }
    candidates
}
