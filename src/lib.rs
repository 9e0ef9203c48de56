//! Line-breaking and line-finishing engine for rectangular text frames.
//!
//! `lineflow` takes a sequence of shaped glyph clusters with
//! break-opportunity flags and lays it into horizontally positioned lines
//! that fit a column width, optionally bounded by a height budget or flowed
//! across several columns. It decides where each line ends, how trailing
//! whitespace is treated, whether a soft hyphen becomes visible, how the
//! line is justified or aligned, and where the next baseline sits.
//!
//! Shaping, hyphenation dictionaries, font metrics, and drawing live behind
//! the [`Shaper`] and [`Hyphenator`] collaborator traits; heuristic
//! implementations of both ship with the crate so it is usable without a
//! font stack.

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod cluster;
mod layout_engine;
mod layout_ir;
mod line_control;
mod shape;
mod style;

pub use cluster::{ClusterFlags, GlyphCluster};
pub use layout_engine::{LayoutEngine, DEFAULT_COLUMN_GAP};
pub use layout_ir::{ColumnSpec, LayoutResult, LineSpec, MultiColumnResult};
pub use shape::{HeuristicHyphenator, HeuristicShaper, Hyphenator, Shaper};
pub use style::{Alignment, CharStyle, ParagraphStyle};
