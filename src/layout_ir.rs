//! Finalized layout output: lines, columns, and the result envelopes
//! returned by the engine. All types are plain data and serialize for
//! snapshotting layout output.

use serde::{Deserialize, Serialize};

use crate::cluster::GlyphCluster;

/// One finalized, horizontally positioned line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    /// Left edge after alignment.
    pub x: f32,
    /// Baseline.
    pub y: f32,
    /// Allocated width: right margin to left margin, minus indent.
    pub width: f32,
    /// Sum of visible cluster widths after suppression. Justification raises
    /// this to the full allocated width.
    pub natural_width: f32,
    /// `ascent + descent`.
    pub height: f32,
    /// Maximum ascent over the contained clusters.
    pub ascent: f32,
    /// Maximum descent over the contained clusters.
    pub descent: f32,
    /// Index of the first contained cluster in the source sequence.
    pub first_cluster: usize,
    /// Index of the last contained cluster in the source sequence
    /// (inclusive).
    pub last_cluster: usize,
    /// The contained clusters, owned by this line.
    pub clusters: Vec<GlyphCluster>,
    /// Index of the containing column; 0 for single-column layout.
    pub column: usize,
}

/// One column of a multi-column layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Left edge of the column.
    pub x: f32,
    /// Top edge of the column.
    pub y: f32,
    /// Column width.
    pub width: f32,
    /// Height budget the column was filled against.
    pub height: f32,
    /// Lines in top-to-bottom order; baselines strictly increasing.
    pub lines: Vec<LineSpec>,
}

/// Result of a single-column layout call.
///
/// `last_char_index` is the index of the last cluster consumed on full
/// success (`clusters.len() - 1`, or 0 for empty input); when `overflow` is
/// set it is the resume index, the first cluster NOT laid out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Finished lines in layout order.
    pub lines: Vec<LineSpec>,
    /// True iff the height budget prevented laying out all clusters.
    pub overflow: bool,
    /// See the type-level docs for the convention.
    pub last_char_index: usize,
}

/// Result of a multi-column layout call. Always contains exactly the
/// requested number of columns; columns past the end of the text are empty.
///
/// `last_char_index` follows the same convention as [`LayoutResult`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiColumnResult {
    /// Columns in flow order.
    pub columns: Vec<ColumnSpec>,
    /// True iff the combined column height budget prevented laying out all
    /// clusters.
    pub overflow: bool,
    /// See the type-level docs for the convention.
    pub last_char_index: usize,
}
