use serde::{Deserialize, Serialize};

/// Bitset of break-opportunity and layout-phase marks carried by a cluster.
///
/// The shaper sets the break-opportunity flags (`LINE_BOUNDARY`,
/// `HYPHENATION_POSSIBLE`, the space kinds, the no-break pair); the layout
/// engine sets the phase marks (`SUPPRESS_SPACE`, `SOFT_HYPHEN_VISIBLE`)
/// while a frame is being filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterFlags(u16);

impl ClusterFlags {
    /// A normal line break is permitted after this cluster.
    pub const LINE_BOUNDARY: ClusterFlags = ClusterFlags(1 << 0);
    /// A hyphenation break is permitted after this cluster.
    pub const HYPHENATION_POSSIBLE: ClusterFlags = ClusterFlags(1 << 1);
    /// Whitespace that participates in justification.
    pub const EXPANDING_SPACE: ClusterFlags = ClusterFlags(1 << 2);
    /// Fixed-advance whitespace (non-breaking space and friends).
    pub const FIXED_SPACE: ClusterFlags = ClusterFlags(1 << 3);
    /// Expanding space folded into the line-end hang; excluded from the
    /// line's natural width. Only valid together with `EXPANDING_SPACE`.
    pub const SUPPRESS_SPACE: ClusterFlags = ClusterFlags(1 << 4);
    /// A hyphenation break was taken here; a hyphen glyph is displayed at
    /// line end. Only valid together with `HYPHENATION_POSSIBLE`.
    pub const SOFT_HYPHEN_VISIBLE: ClusterFlags = ClusterFlags(1 << 5);
    /// No line break may occur immediately before this cluster.
    pub const NO_BREAK_BEFORE: ClusterFlags = ClusterFlags(1 << 6);
    /// No line break may occur immediately after this cluster.
    pub const NO_BREAK_AFTER: ClusterFlags = ClusterFlags(1 << 7);

    /// Empty flag set.
    pub const fn empty() -> Self {
        ClusterFlags(0)
    }

    /// True when every flag in `flag` is set.
    pub const fn has(self, flag: ClusterFlags) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// Set all flags in `flag`.
    pub fn set(&mut self, flag: ClusterFlags) {
        self.0 |= flag.0;
    }

    /// Clear all flags in `flag`.
    pub fn clear(&mut self, flag: ClusterFlags) {
        self.0 &= !flag.0;
    }

    /// Union of two flag sets.
    pub const fn with(self, flag: ClusterFlags) -> Self {
        ClusterFlags(self.0 | flag.0)
    }
}

/// One atomic layout unit: one or more source code points shaped into one or
/// more glyphs, measured by the shaper.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlyphCluster {
    /// First source character covered by this cluster (inclusive).
    pub first_char: usize,
    /// Last source character covered by this cluster (inclusive).
    pub last_char: usize,
    /// Original substring. A cluster whose text is exactly `"\n"` is a
    /// mandatory hard break.
    pub text: String,
    /// Natural advance, never negative.
    pub width: f32,
    /// Distance from baseline to the cluster's top.
    pub ascent: f32,
    /// Distance from baseline to the cluster's bottom.
    pub descent: f32,
    /// Slack added by justification; zero until a line is justified.
    pub extra_width: f32,
    /// Break-opportunity and layout-phase marks.
    pub flags: ClusterFlags,
}

impl GlyphCluster {
    /// Advance including any justification slack.
    pub fn advance(&self) -> f32 {
        self.width + self.extra_width
    }

    /// True for the mandatory hard-break marker cluster.
    pub fn is_hard_break(&self) -> bool {
        self.text == "\n"
    }

    /// True for an expanding space that has not been folded into the hang.
    pub(crate) fn is_live_space(&self) -> bool {
        self.flags.has(ClusterFlags::EXPANDING_SPACE)
            && !self.flags.has(ClusterFlags::SUPPRESS_SPACE)
    }
}
