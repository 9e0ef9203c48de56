//! Single-line filling state machine.
//!
//! `LineControl` owns the geometry of exactly one in-progress line: the
//! current pen position, the accumulated clusters, the shrink/stretch budget
//! contributed by expanding spaces, and the best break opportunity seen so
//! far. The driver feeds it clusters and asks it to commit a line when
//! overflow is detected; committing produces a finalized [`LineSpec`].

use crate::cluster::{ClusterFlags, GlyphCluster};
use crate::layout_ir::LineSpec;
use crate::style::{Alignment, ParagraphStyle};

/// Cost of ending the line at `candidate_x`. Lower is better: breaks nearest
/// the right margin win, and hyphenation candidates carry an additive
/// penalty so comparable word breaks beat them on ties.
pub(crate) fn break_badness(effective_right: f32, candidate_x: f32, penalty: f32) -> f32 {
    (effective_right - candidate_x).abs() + penalty
}

/// Best break opportunity remembered on the current line.
#[derive(Clone, Copy, Debug)]
struct BreakCandidate {
    /// Global index of the cluster after which the line would end.
    index: usize,
    /// Pen position at the cut, including a trailing hyphen advance when the
    /// candidate is a hyphenation break.
    x_pos: f32,
    /// Additive badness carried by this candidate.
    penalty: f32,
    /// True when taking this break makes a soft hyphen visible.
    is_hyphenation: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct LineControl {
    style: ParagraphStyle,
    col_left: f32,
    col_right: f32,
    x_pos: f32,
    y_pos: f32,
    clusters: Vec<GlyphCluster>,
    max_shrink: f32,
    max_stretch: f32,
    brk: Option<BreakCandidate>,
    line: LineSpec,
}

impl LineControl {
    pub(crate) fn new(style: ParagraphStyle, col_left: f32, col_width: f32) -> Self {
        Self {
            style,
            col_left,
            col_right: col_left + col_width,
            x_pos: col_left,
            y_pos: 0.0,
            clusters: Vec::with_capacity(48),
            max_shrink: 0.0,
            max_stretch: 0.0,
            brk: None,
            line: LineSpec::default(),
        }
    }

    /// The x beyond which the line overflows.
    pub(crate) fn effective_right(&self) -> f32 {
        self.col_right - self.style.right_margin
    }

    /// Width actually available to line content; non-positive geometry is
    /// degenerate and degrades to force-breaking every cluster.
    pub(crate) fn usable_width(&self) -> f32 {
        self.effective_right() - (self.col_left + self.style.left_margin)
    }

    pub(crate) fn x_pos(&self) -> f32 {
        self.x_pos
    }

    pub(crate) fn baseline(&self) -> f32 {
        self.y_pos
    }

    pub(crate) fn set_baseline(&mut self, y: f32) {
        self.y_pos = y;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub(crate) fn break_index(&self) -> Option<usize> {
        self.brk.as_ref().map(|b| b.index)
    }

    pub(crate) fn break_is_hyphenation(&self) -> bool {
        self.brk.as_ref().is_some_and(|b| b.is_hyphenation)
    }

    /// Reset the accumulator and break memory and open a fresh line starting
    /// at `first_cluster`.
    pub(crate) fn start_line(&mut self, first_cluster: usize, is_first_line: bool) {
        self.clusters.clear();
        self.brk = None;
        self.max_shrink = 0.0;
        self.max_stretch = 0.0;
        let indent = if is_first_line {
            self.style.first_line_indent
        } else {
            0.0
        };
        self.x_pos = self.col_left + self.style.left_margin + indent;
        self.line = LineSpec {
            x: self.x_pos,
            y: self.y_pos,
            first_cluster,
            last_cluster: first_cluster,
            ..LineSpec::default()
        };
    }

    /// Append a cluster, advance the pen, and grow the shrink/stretch budget
    /// when the cluster is an expanding space.
    pub(crate) fn add_cluster(&mut self, cluster: &GlyphCluster) {
        if cluster.flags.has(ClusterFlags::EXPANDING_SPACE) {
            self.max_shrink += cluster.width * (1.0 - self.style.min_word_spacing);
            self.max_stretch += cluster.width * (self.style.max_word_spacing - 1.0);
        }
        self.line.ascent = self.line.ascent.max(cluster.ascent);
        self.line.descent = self.line.descent.max(cluster.descent);
        self.x_pos += cluster.width;
        self.clusters.push(cluster.clone());
    }

    /// Offer a break opportunity after the cluster at `index`.
    ///
    /// The candidate replaces the stored one iff its badness is strictly
    /// lower; ties keep the older, leftward candidate. Exception: when the
    /// line already reaches past the right margin and the newest cluster is
    /// an expanding space, the candidate replaces unconditionally so that
    /// every trailing space is folded into the hang and suppressed at finish
    /// time.
    pub(crate) fn remember_break(&mut self, index: usize, candidate_x: f32, is_hyphenation: bool) {
        let penalty = if is_hyphenation {
            self.style.hyphen_penalty
        } else {
            0.0
        };
        let right = self.effective_right();
        let hanging_space = candidate_x >= right
            && self
                .clusters
                .last()
                .is_some_and(|c| c.flags.has(ClusterFlags::EXPANDING_SPACE));
        let replace = match self.brk {
            None => true,
            Some(old) => {
                hanging_space
                    || break_badness(right, candidate_x, penalty)
                        < break_badness(right, old.x_pos, old.penalty)
            }
        };
        if replace {
            self.brk = Some(BreakCandidate {
                index,
                x_pos: candidate_x,
                penalty,
                is_hyphenation,
            });
        }
    }

    /// Force a break after the cluster at `last_index`, recomputing the cut
    /// position from the accumulated advances. Used for hard newlines, the
    /// end of the text, and overflow with no admissible opportunity.
    pub(crate) fn break_line(&mut self, last_index: usize) {
        let rel_end = last_index.saturating_sub(self.line.first_cluster);
        let mut x = self.line.x;
        for cluster in self.clusters.iter().take(rel_end + 1) {
            x += cluster.advance();
        }
        self.line.ascent = 0.0;
        self.line.descent = 0.0;
        for cluster in self.clusters.iter().take(rel_end + 1) {
            self.line.ascent = self.line.ascent.max(cluster.ascent);
            self.line.descent = self.line.descent.max(cluster.descent);
        }
        self.brk = Some(BreakCandidate {
            index: last_index,
            x_pos: x,
            penalty: 0.0,
            is_hyphenation: false,
        });
    }

    /// Overflow predicate: would the pen, advanced by `extra`, still sit at
    /// or past the effective right edge after shrinking every expanding
    /// space to its lower word-spacing bound?
    pub(crate) fn is_end_of_line(&self, extra: f32) -> bool {
        self.x_pos + extra - self.max_shrink >= self.effective_right()
    }

    /// Make the stored break's soft hyphen visible on the line's own copy of
    /// the break cluster. The driver mirrors the flag into the source
    /// sequence.
    pub(crate) fn mark_break_hyphen_visible(&mut self) {
        let Some(brk) = self.brk else { return };
        let rel = brk.index.saturating_sub(self.line.first_cluster);
        if let Some(cluster) = self.clusters.get_mut(rel) {
            cluster.flags.set(ClusterFlags::SOFT_HYPHEN_VISIBLE);
        }
    }

    /// Fold trailing expanding spaces into the hang: walking backward from
    /// the stored break, flag each consecutive expanding space as suppressed,
    /// mirroring the flag into `source`. Stops at the first non-space.
    pub(crate) fn suppress_trailing_spaces(&mut self, source: &mut [GlyphCluster]) {
        let Some(brk) = self.brk else { return };
        let first = self.line.first_cluster;
        let mut rel = brk.index.saturating_sub(first);
        loop {
            let Some(cluster) = self.clusters.get_mut(rel) else {
                break;
            };
            if !cluster.flags.has(ClusterFlags::EXPANDING_SPACE) {
                break;
            }
            cluster.flags.set(ClusterFlags::SUPPRESS_SPACE);
            if let Some(src) = source.get_mut(first + rel) {
                src.flags.set(ClusterFlags::SUPPRESS_SPACE);
            }
            if rel == 0 {
                break;
            }
            rel -= 1;
        }
    }

    /// Commit the stored break: truncate the accumulator to the break
    /// cluster, fix the line's allocated width against `end_x`, and recompute
    /// metrics and natural width from the kept clusters.
    pub(crate) fn finish_line(&mut self, end_x: f32) {
        let Some(brk) = self.brk else { return };
        self.line.last_cluster = brk.index;
        self.line.width = end_x - self.line.x;
        self.clusters
            .truncate(brk.index.saturating_sub(self.line.first_cluster) + 1);

        self.line.ascent = 0.0;
        self.line.descent = 0.0;
        self.line.natural_width = 0.0;
        for cluster in &self.clusters {
            self.line.ascent = self.line.ascent.max(cluster.ascent);
            self.line.descent = self.line.descent.max(cluster.descent);
            if !cluster.flags.has(ClusterFlags::SUPPRESS_SPACE) {
                self.line.natural_width += cluster.width;
            }
        }
        self.line.height = self.line.ascent + self.line.descent;
        log::trace!(
            "line committed: clusters={} natural={} shrink_budget={} stretch_budget={}",
            self.clusters.len(),
            self.line.natural_width,
            self.max_shrink,
            self.max_stretch,
        );
        self.max_shrink = 0.0;
        self.max_stretch = 0.0;
    }

    /// Distribute residual slack across expandable, non-suppressed spaces.
    /// No-op when the line is overfull or contains no such space.
    pub(crate) fn justify_line(&mut self) {
        let available = self.effective_right() - self.line.x;
        let slack = available - self.line.natural_width;
        if slack <= 0.0 {
            return;
        }
        let spaces = self.clusters.iter().filter(|c| c.is_live_space()).count();
        if spaces == 0 {
            return;
        }
        let per_space = slack / spaces as f32;
        for cluster in self.clusters.iter_mut() {
            if cluster.is_live_space() {
                cluster.extra_width = per_space;
            }
        }
        self.line.natural_width = available;
    }

    /// Offset the line for the non-justified alignments. A line that is
    /// already overfull is never shifted.
    pub(crate) fn align_line(&mut self, alignment: Alignment) {
        let slack = self.line.width - self.line.natural_width;
        let offset = match alignment {
            Alignment::Right => slack,
            Alignment::Center => slack / 2.0,
            Alignment::Left | Alignment::Justified => 0.0,
        };
        if offset > 0.0 {
            self.line.x += offset;
        }
    }

    /// Step the baseline down to the next line.
    pub(crate) fn next_line(&mut self, line_height: f32) {
        self.y_pos += line_height;
    }

    /// Deep copy of the finalized line, owning its clusters.
    pub(crate) fn create_line_spec(&self, column: usize) -> LineSpec {
        let mut spec = self.line.clone();
        spec.clusters = self.clusters.clone();
        spec.column = column;
        spec
    }
}
