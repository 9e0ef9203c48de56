//! Layout driver.
//!
//! Walks a shaped cluster sequence, feeds the single-line state machine,
//! detects overflow and hard breaks, rewinds to remembered break
//! opportunities, and steps the baseline. Single-column and multi-column
//! layout share one segment routine; the multi-column driver simply runs it
//! once per column with an x offset and a height budget.

use std::fmt;
use std::sync::Arc;

use crate::cluster::{ClusterFlags, GlyphCluster};
use crate::layout_ir::{ColumnSpec, LayoutResult, LineSpec, MultiColumnResult};
use crate::line_control::LineControl;
use crate::shape::{HeuristicHyphenator, HeuristicShaper, Hyphenator, Shaper};
use crate::style::{Alignment, CharStyle, ParagraphStyle};

/// Default gap between columns, in the same unit as cluster widths.
pub const DEFAULT_COLUMN_GAP: f32 = 20.0;

/// Hyphen advance as a fraction of the font size, used when the shaper does
/// not provide one.
const HYPHEN_WIDTH_RATIO: f32 = 0.3;

/// First-baseline fallback when the leading cluster has no measured ascent.
const FALLBACK_ASCENT_RATIO: f32 = 0.8;

/// Line-breaking and line-finishing engine for one rectangular text frame.
///
/// The engine is synchronous and single-threaded; one instance must not be
/// shared across concurrent layout calls, but distinct instances are fully
/// independent.
#[derive(Clone)]
pub struct LayoutEngine {
    paragraph_style: ParagraphStyle,
    char_style: CharStyle,
    shaper: Arc<dyn Shaper>,
    hyphenator: Arc<dyn Hyphenator>,
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("paragraph_style", &self.paragraph_style)
            .field("char_style", &self.char_style)
            .finish()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

struct SegmentParams {
    start: usize,
    col_left: f32,
    col_width: f32,
    max_height: Option<f32>,
    is_first_line: bool,
    column: usize,
}


impl LayoutEngine {
    /// Engine with default styles and the heuristic collaborators.
    pub fn new() -> Self {
        Self {
            paragraph_style: ParagraphStyle::default(),
            char_style: CharStyle::default(),
            shaper: Arc::new(HeuristicShaper),
            hyphenator: Arc::new(HeuristicHyphenator),
        }
    }

    /// Install a shaper collaborator.
    pub fn with_shaper(mut self, shaper: Arc<dyn Shaper>) -> Self {
        self.shaper = shaper;
        self
    }

    /// Install a hyphenator collaborator; consulted only when the paragraph
    /// style enables hyphenation.
    pub fn with_hyphenator(mut self, hyphenator: Arc<dyn Hyphenator>) -> Self {
        self.hyphenator = hyphenator;
        self
    }

    /// Builder form of [`set_paragraph_style`](Self::set_paragraph_style).
    pub fn with_paragraph_style(mut self, style: ParagraphStyle) -> Self {
        self.paragraph_style = style;
        self
    }

    /// Builder form of [`set_char_style`](Self::set_char_style).
    pub fn with_char_style(mut self, style: CharStyle) -> Self {
        self.char_style = style;
        self
    }

    /// Replace the paragraph style. Idempotent.
    pub fn set_paragraph_style(&mut self, style: ParagraphStyle) {
        self.paragraph_style = style;
    }

    /// Replace the character style. Idempotent.
    pub fn set_char_style(&mut self, style: CharStyle) {
        self.char_style = style;
    }

    /// Lay `text` into one column of `width`, optionally bounded by
    /// `max_height`.
    pub fn layout(&self, text: &str, width: f32, max_height: Option<f32>) -> LayoutResult {
        let mut clusters = self.shaper.shape(text, &self.char_style);
        if clusters.is_empty() {
            return LayoutResult::default();
        }
        if self.paragraph_style.hyphenate {
            self.hyphenator.add_hyphenation(&mut clusters);
        }

        let mut lines = Vec::new();
        let mut hyphen_run = 0u8;
        let cursor = self.layout_segment(
            &mut clusters,
            SegmentParams {
                start: 0,
                col_left: 0.0,
                col_width: width,
                max_height,
                is_first_line: true,
                column: 0,
            },
            &mut hyphen_run,
            &mut lines,
        );

        let overflow = cursor < clusters.len();
        LayoutResult {
            lines,
            overflow,
            last_char_index: if overflow { cursor } else { clusters.len() - 1 },
        }
    }

    /// Flow `text` through `column_count` columns partitioned evenly out of
    /// `total_width`, each with a `column_height` budget. The result always
    /// holds exactly `column_count` columns; trailing columns past the end
    /// of the text are empty.
    pub fn layout_columns(
        &self,
        text: &str,
        column_count: usize,
        total_width: f32,
        column_height: f32,
        column_gap: f32,
    ) -> MultiColumnResult {
        let count = column_count.max(1);
        let col_width =
            ((total_width - (count - 1) as f32 * column_gap) / count as f32).max(0.0);
        let column_frame = |index: usize| ColumnSpec {
            x: index as f32 * (col_width + column_gap),
            y: 0.0,
            width: col_width,
            height: column_height,
            lines: Vec::new(),
        };

        let mut clusters = self.shaper.shape(text, &self.char_style);
        if clusters.is_empty() {
            return MultiColumnResult {
                columns: (0..count).map(column_frame).collect(),
                overflow: false,
                last_char_index: 0,
            };
        }
        if self.paragraph_style.hyphenate {
            self.hyphenator.add_hyphenation(&mut clusters);
        }

        let mut columns = Vec::with_capacity(count);
        let mut hyphen_run = 0u8;
        let mut cursor = 0usize;
        for index in 0..count {
            let mut column = column_frame(index);
            if cursor < clusters.len() {
                cursor = self.layout_segment(
                    &mut clusters,
                    SegmentParams {
                        start: cursor,
                        col_left: column.x,
                        col_width,
                        max_height: Some(column_height),
                        is_first_line: cursor == 0,
                        column: index,
                    },
                    &mut hyphen_run,
                    &mut column.lines,
                );
            }
            columns.push(column);
        }

        let overflow = cursor < clusters.len();
        MultiColumnResult {
            columns,
            overflow,
            last_char_index: if overflow {
                cursor
            } else {
                clusters.len() - 1
            },
        }
    }

    /// Fill one segment: lay clusters from `params.start` into lines until
    /// the text or the height budget runs out.
    fn layout_segment(
        &self,
        clusters: &mut [GlyphCluster],
        params: SegmentParams,
        hyphen_run: &mut u8,
        lines: &mut Vec<LineSpec>,
    ) -> usize {
        let style = &self.paragraph_style;
        let font_size = self.char_style.font_size;
        let line_height = font_size * style.line_spacing;
        let hyphen_width = self
            .shaper
            .hyphen_advance(&self.char_style)
            .unwrap_or(HYPHEN_WIDTH_RATIO * font_size);

        let mut ctrl = LineControl::new(style.clone(), params.col_left, params.col_width);
        if ctrl.usable_width() <= 0.0 {
            log::warn!(
                "degenerate geometry: usable width {} in column {}; every cluster force-breaks",
                ctrl.usable_width(),
                params.column,
            );
        }

        let first_ascent = clusters[params.start].ascent;
        ctrl.set_baseline(if first_ascent > 0.0 {
            first_ascent
        } else {
            FALLBACK_ASCENT_RATIO * font_size
        });
        ctrl.start_line(params.start, params.is_first_line);

        let mut i = params.start;
        while i < clusters.len() {
            // Mandatory break: the marker cluster is consumed, never laid.
            if clusters[i].is_hard_break() {
                if !ctrl.is_empty() {
                    ctrl.break_line(i - 1);
                    self.finalize_line(&mut ctrl, params.column, true, lines);
                }
                *hyphen_run = 0;
                ctrl.next_line(line_height);
                if past_budget(ctrl.baseline(), params.max_height) {
                    return i + 1;
                }
                ctrl.start_line(i + 1, false);
                i += 1;
                continue;
            }

            let overflow_now = ctrl.is_end_of_line(clusters[i].width);

            // Soft break: commit at the remembered opportunity and rewind.
            // Incoming expanding spaces are exempt so they hang past the
            // margin and get suppressed instead of forcing an early cut.
            if !ctrl.is_empty()
                && overflow_now
                && !clusters[i].flags.has(ClusterFlags::EXPANDING_SPACE)
            {
                if let Some(break_index) = ctrl.break_index() {
                    let took_hyphen = ctrl.break_is_hyphenation()
                        && clusters[break_index]
                            .flags
                            .has(ClusterFlags::HYPHENATION_POSSIBLE);
                    if took_hyphen && *hyphen_run < style.hyphen_consecutive_limit {
                        clusters[break_index]
                            .flags
                            .set(ClusterFlags::SOFT_HYPHEN_VISIBLE);
                        ctrl.mark_break_hyphen_visible();
                        *hyphen_run += 1;
                    } else if !took_hyphen
                        && clusters[break_index].flags.has(ClusterFlags::LINE_BOUNDARY)
                    {
                        *hyphen_run = 0;
                    }

                    ctrl.suppress_trailing_spaces(clusters);
                    self.finalize_line(&mut ctrl, params.column, false, lines);

                    ctrl.next_line(line_height);
                    if past_budget(ctrl.baseline(), params.max_height) {
                        return break_index + 1;
                    }
                    ctrl.start_line(break_index + 1, false);
                    i = break_index + 1;
                    continue;
                }
            }

            let cluster = clusters[i].clone();
            ctrl.add_cluster(&cluster);
            if eligible_word_break(clusters, i) {
                ctrl.remember_break(i, ctrl.x_pos(), false);
            }
            if cluster.flags.has(ClusterFlags::HYPHENATION_POSSIBLE) {
                ctrl.remember_break(i, ctrl.x_pos() + hyphen_width, true);
            }

            // Overflow with no admissible opportunity: cut after the
            // current cluster; the line may end up wider than the column.
            if ctrl.is_end_of_line(0.0) && ctrl.break_index().is_none() {
                ctrl.break_line(i);
                self.finalize_line(&mut ctrl, params.column, false, lines);
                *hyphen_run = 0;
                ctrl.next_line(line_height);
                if past_budget(ctrl.baseline(), params.max_height) {
                    return i + 1;
                }
                ctrl.start_line(i + 1, false);
                i += 1;
                continue;
            }

            i += 1;
        }

        // Whatever is still accumulating becomes the final line of the
        // paragraph, which is never justified.
        if !ctrl.is_empty() {
            ctrl.break_line(clusters.len() - 1);
            self.finalize_line(&mut ctrl, params.column, true, lines);
        }
        log::debug!(
            "segment done: column={} lines={} cursor={}",
            params.column,
            lines.len(),
            clusters.len(),
        );
        clusters.len()
    }

    /// Commit the stored break and finish the line: fix geometry, then
    /// justify or align. `last_of_paragraph` lines fall back from justified
    /// to left alignment.
    fn finalize_line(
        &self,
        ctrl: &mut LineControl,
        column: usize,
        last_of_paragraph: bool,
        lines: &mut Vec<LineSpec>,
    ) {
        let end_x = ctrl.effective_right();
        ctrl.finish_line(end_x);
        let alignment = self.paragraph_style.alignment;
        if alignment == Alignment::Justified && !last_of_paragraph {
            ctrl.justify_line();
        } else {
            let effective = if alignment == Alignment::Justified {
                Alignment::Left
            } else {
                alignment
            };
            ctrl.align_line(effective);
        }
        lines.push(ctrl.create_line_spec(column));
    }
}

/// A `LINE_BOUNDARY` is admissible only when neither side forbids it.
fn eligible_word_break(clusters: &[GlyphCluster], index: usize) -> bool {
    let cluster = &clusters[index];
    cluster.flags.has(ClusterFlags::LINE_BOUNDARY)
        && !cluster.flags.has(ClusterFlags::NO_BREAK_AFTER)
        && !clusters
            .get(index + 1)
            .is_some_and(|next| next.flags.has(ClusterFlags::NO_BREAK_BEFORE))
}

fn past_budget(baseline: f32, budget: Option<f32>) -> bool {
    budget.is_some_and(|max| baseline > max)
}
