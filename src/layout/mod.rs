//! Geometric layout reconstruction for one page.
//!
//! This module provides the stages that turn decoder primitives into a page
//! tree:
//! - Grid extension and classification of lines and rectangles
//! - Box (table cell) detection with per-side border flags
//! - Column (margin) detection from text clustering
//! - Connected-component grouping of graphics
//! - Containment tree construction
//! - Text consolidation (glyph fusion and run merging)
//!
//! The stages are wired together by [`crate::pipeline::LayoutAnalyzer`].

pub mod box_detector;
pub mod component;
pub mod consolidator;
pub mod containment;
pub mod grid;
pub mod grouping;
pub mod margin_detector;
pub mod page;

// Re-export main types
pub use box_detector::{detect_boxes, DetectedBox};
pub use component::{
    contains, vertical_extension, Borders, Component, ComponentArena, ComponentId, ComponentKind,
    TextContent,
};
pub use consolidator::{consolidate, fuse_glyphs, fusion, merge_consecutive, Consolidation};
pub use containment::{build_tree, place, smallest_container};
pub use grid::{extend_primitives, Grid, GridElement};
pub use grouping::{group_components, Group};
pub use margin_detector::{detect_margins, detect_regions, MarginCandidate};
pub use page::{LayoutSummary, PageLayout};
