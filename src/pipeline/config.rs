//! Configuration for the layout pipeline.
//!
//! Every threshold used by the layout stages lives here, so that callers can
//! tune the engine for a document family without touching the algorithms.

/// Reading order strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadingOrderStrategyType {
    /// Tolerance-aware sort that resolves ambiguous row-band pairs
    /// recursively before splicing them back in.
    ///
    /// Use this unless you have a reason not to.
    #[default]
    Smart,

    /// Plain stable sort with the row-band comparator.
    ///
    /// Faster, but can misorder clusters of components whose vertical spans
    /// overlap only partially.
    Simple,
}

/// Default primitive limit per page.
pub const DEFAULT_MAX_PRIMITIVES: usize = 50_000;

/// Layout pipeline configuration.
///
/// # Example
///
/// ```
/// use page_oxide::pipeline::{LayoutConfig, ReadingOrderStrategyType};
///
/// let config = LayoutConfig::default()
///     .with_join_char_distance(1.5)
///     .with_reading_order(ReadingOrderStrategyType::Simple);
/// assert_eq!(config.join_char_distance, 1.5);
/// assert_eq!(config.row_tolerance_divisor, 20.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Row-band tolerance is a component's height divided by this (default: 20.0)
    pub row_tolerance_divisor: f32,
    /// Maximum gap between consecutive runs, in average character widths (default: 2.0)
    pub join_char_distance: f32,
    /// Maximum baseline offset between consecutive runs (default: 0.5)
    pub baseline_tolerance: f32,
    /// Vertical slack when looking for a glyph's underline (default: 0.5)
    pub underline_tolerance: f32,
    /// Maximum width difference between a glyph and its underline (default: 0.1)
    pub underline_width_tolerance: f32,
    /// Graphics wider than this fraction of the content width split regions (default: 0.5)
    pub separator_width_ratio: f32,
    /// Compose diacritics and ordinal indicators (default: true)
    pub fuse_glyphs: bool,
    /// Join consecutive runs on one line (default: true)
    pub merge_runs: bool,
    /// Reject pages with more graphics plus glyphs than this (default: 50 000)
    pub max_primitives: Option<usize>,
    /// Sibling ordering strategy (default: Smart)
    pub reading_order: ReadingOrderStrategyType,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_tolerance_divisor: 20.0,
            join_char_distance: 2.0,
            baseline_tolerance: 0.5,
            underline_tolerance: 0.5,
            underline_width_tolerance: 0.1,
            separator_width_ratio: 0.5,
            fuse_glyphs: true,
            merge_runs: true,
            max_primitives: Some(DEFAULT_MAX_PRIMITIVES),
            reading_order: ReadingOrderStrategyType::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a configuration with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row-band tolerance divisor.
    pub fn with_row_tolerance_divisor(mut self, divisor: f32) -> Self {
        self.row_tolerance_divisor = divisor;
        self
    }

    /// Set the consecutive-run join distance in average character widths.
    pub fn with_join_char_distance(mut self, distance: f32) -> Self {
        self.join_char_distance = distance;
        self
    }

    /// Set the baseline tolerance for run merging.
    pub fn with_baseline_tolerance(mut self, tolerance: f32) -> Self {
        self.baseline_tolerance = tolerance;
        self
    }

    /// Set underline detection tolerances (vertical slack, width match).
    pub fn with_underline_tolerance(mut self, vertical: f32, width: f32) -> Self {
        self.underline_tolerance = vertical;
        self.underline_width_tolerance = width;
        self
    }

    /// Set the region separator width ratio.
    pub fn with_separator_width_ratio(mut self, ratio: f32) -> Self {
        self.separator_width_ratio = ratio;
        self
    }

    /// Enable or disable glyph composition.
    pub fn with_glyph_fusion(mut self, enabled: bool) -> Self {
        self.fuse_glyphs = enabled;
        self
    }

    /// Enable or disable consecutive-run merging.
    pub fn with_run_merging(mut self, enabled: bool) -> Self {
        self.merge_runs = enabled;
        self
    }

    /// Set the primitive limit (`None` disables the check).
    pub fn with_max_primitives(mut self, limit: Option<usize>) -> Self {
        self.max_primitives = limit;
        self
    }

    /// Set the reading order strategy.
    pub fn with_reading_order(mut self, strategy: ReadingOrderStrategyType) -> Self {
        self.reading_order = strategy;
        self
    }
}
