//! Page layout pipeline with clean abstraction layers.
//!
//! ```text
//! PageInput (graphics + glyph runs)
//!     ↓
//! [Grid] (extension + classification)
//!     ↓
//! [Consolidator] (glyph fusion, run merging, underline consumption)
//!     ↓
//! [Box detector]
//!     ↓
//! [Containment] (groups, margins, smallest-container placement)
//!     ↓
//! [ReadingOrderStrategy] (every sibling list)
//!     ↓
//! PageLayout
//!     ↓
//! [OutputConverter] (plain text / JSON)
//! ```
//!
//! # Key Design Principles
//!
//! 1. **Pages are independent**: every stage is a pure function of one page's
//!    primitives, so pages can be analyzed in parallel.
//!
//! 2. **Arena ownership**: components live in one arena per page and refer to
//!    their children by id.
//!
//! 3. **Pluggable strategies**: reading order and output conversion are
//!    trait-based for extensibility.
//!
//! 4. **Unified configuration**: all thresholds live in [`LayoutConfig`].

pub mod config;
pub mod converters;
pub mod reading_order;

// Re-export main types
pub use config::{LayoutConfig, ReadingOrderStrategyType, DEFAULT_MAX_PRIMITIVES};
pub use converters::{JsonConverter, OutputConverter, PlainTextConverter};
pub use reading_order::{ReadingOrderStrategy, RowBand, SimpleStrategy, SmartStrategy};

use rayon::prelude::*;

use crate::elements::PageInput;
use crate::error::{Error, Result};
use crate::layout::{
    build_tree, consolidate, detect_boxes, Component, ComponentArena, ComponentId, Grid,
    GridElement, PageLayout,
};
use reading_order::{apply_to_tree, create_strategy};

/// The layout pipeline: orchestrates every stage for one page.
///
/// # Example
///
/// ```
/// use page_oxide::elements::{GraphicPrimitive, PageInput};
/// use page_oxide::layout::ComponentKind;
/// use page_oxide::pipeline::LayoutAnalyzer;
///
/// let page = PageInput::new(
///     vec![
///         GraphicPrimitive::line(0.0, 0.0, 20.0, 0.0),
///         GraphicPrimitive::line(0.0, 10.0, 20.0, 10.0),
///         GraphicPrimitive::line(0.0, 0.0, 0.0, 10.0),
///         GraphicPrimitive::line(20.0, 0.0, 20.0, 10.0),
///     ],
///     vec![],
/// );
/// let layout = LayoutAnalyzer::new().analyze_page(&page)?;
/// assert_eq!(layout.find_all(ComponentKind::Box).len(), 1);
/// # Ok::<(), page_oxide::Error>(())
/// ```
pub struct LayoutAnalyzer {
    config: LayoutConfig,
    reading_order_strategy: Box<dyn ReadingOrderStrategy>,
}

impl LayoutAnalyzer {
    /// Create an analyzer with default configuration.
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Create an analyzer with custom configuration.
    pub fn with_config(config: LayoutConfig) -> Self {
        let strategy = create_strategy(&config);
        Self {
            config,
            reading_order_strategy: strategy,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Run the full pipeline on one page.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeometry`] for a malformed rectangle and
    /// [`Error::TooManyPrimitives`] when the page exceeds the configured limit.
    pub fn analyze_page(&self, page: &PageInput) -> Result<PageLayout> {
        page.validate()?;
        if let Some(limit) = self.config.max_primitives {
            let count = page.primitive_count();
            if count > limit {
                log::warn!("page rejected: {} primitives over limit {}", count, limit);
                return Err(Error::TooManyPrimitives { count, limit });
            }
        }

        let grid = Grid::build(&page.graphics);
        let consolidation = consolidate(&page.text_runs, &grid, &self.config);
        let grid = grid.without(&consolidation.consumed_underlines);
        let boxes = detect_boxes(&grid);

        let mut arena = ComponentArena::new();
        let grid_ids: Vec<ComponentId> = grid
            .into_elements()
            .into_iter()
            .map(|element| push_grid_element(&mut arena, element))
            .collect();
        let box_ids: Vec<ComponentId> = boxes
            .into_iter()
            .map(|b| arena.push(Component::boxed(b.bbox, b.stroke_width, b.borders)))
            .collect();
        let text_ids: Vec<ComponentId> = consolidation
            .fragments
            .into_iter()
            .map(|fragment| arena.push(Component::text(fragment)))
            .collect();

        let roots = build_tree(
            &mut arena,
            &grid_ids,
            &box_ids,
            &text_ids,
            self.config.separator_width_ratio,
        );
        let roots = apply_to_tree(self.reading_order_strategy.as_ref(), &mut arena, roots);

        log::debug!(
            "page analyzed with {}: {} grid, {} boxes, {} texts, {} roots",
            self.reading_order_strategy.name(),
            grid_ids.len(),
            box_ids.len(),
            text_ids.len(),
            roots.len()
        );
        Ok(PageLayout::new(arena, roots))
    }

    /// Analyze independent pages in parallel, preserving page order.
    ///
    /// Fails with the first error in page order.
    pub fn analyze_pages(&self, pages: &[PageInput]) -> Result<Vec<PageLayout>> {
        pages.par_iter().map(|page| self.analyze_page(page)).collect()
    }
}

impl Default for LayoutAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Push a grid element; extension members become its children.
fn push_grid_element(arena: &mut ComponentArena, element: GridElement) -> ComponentId {
    let id = arena.push(Component::graphic(element.kind, element.bbox, element.stroke_width));
    for member in element.members {
        let child = push_grid_element(arena, member);
        arena.add_child(id, child);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Glyph, GraphicPrimitive, TextRun};
    use crate::geometry::Rect;
    use crate::layout::ComponentKind;

    #[test]
    fn test_limit_rejects_page() {
        let page = PageInput::new(
            vec![GraphicPrimitive::line(0.0, 0.0, 10.0, 0.0); 3],
            vec![],
        );
        let analyzer = LayoutAnalyzer::with_config(LayoutConfig::default().with_max_primitives(Some(2)));
        match analyzer.analyze_page(&page) {
            Err(Error::TooManyPrimitives { count, limit }) => {
                assert_eq!(count, 3);
                assert_eq!(limit, 2);
            },
            other => panic!("expected TooManyPrimitives, got {:?}", other.map(|p| p.roots().len())),
        }
    }

    #[test]
    fn test_invalid_geometry_rejected_before_pipeline() {
        let mut bad = GraphicPrimitive::line(0.0, 0.0, 10.0, 0.0);
        bad.bbox = Rect::new(0.0, 5.0, 10.0, 0.0);
        let page = PageInput::new(vec![bad], vec![]);
        assert!(matches!(
            LayoutAnalyzer::new().analyze_page(&page),
            Err(Error::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_empty_page() {
        let layout = LayoutAnalyzer::new().analyze_page(&PageInput::default()).unwrap();
        assert!(layout.is_empty());
        assert!(layout.roots().is_empty());
    }

    #[test]
    fn test_extension_members_are_children() {
        let page = PageInput::new(
            vec![
                GraphicPrimitive::line(0.0, 0.0, 10.0, 0.0),
                GraphicPrimitive::line(10.0, 0.0, 20.0, 0.0),
            ],
            vec![],
        );
        let layout = LayoutAnalyzer::new().analyze_page(&page).unwrap();
        assert_eq!(layout.roots().len(), 1);
        let root = layout.roots()[0];
        assert_eq!(layout.component(root).kind, ComponentKind::Extension);
        assert_eq!(layout.component(root).bbox, Rect::new(0.0, 0.0, 20.0, 0.0));
        assert_eq!(layout.children(root).len(), 2);
    }

    #[test]
    fn test_underlined_ordinal_removes_bar() {
        let run = TextRun::new(
            vec![
                Glyph::at_baseline("1", 0.0, 10.0, 5.0, 10.0),
                Glyph::at_baseline("o", 5.0, 6.0, 3.0, 4.0),
            ],
            "Times",
            10.0,
        );
        let page = PageInput::new(vec![GraphicPrimitive::line(5.0, 6.3, 8.0, 6.3)], vec![run]);
        let layout = LayoutAnalyzer::new().analyze_page(&page).unwrap();
        assert_eq!(layout.text_lines(), vec!["1º"]);
        assert_eq!(layout.summary().lines, 0);
    }

    #[test]
    fn test_analyze_pages_keeps_order() {
        let page = |text: &str| {
            PageInput::new(
                vec![],
                vec![TextRun::new(
                    vec![Glyph::at_baseline(text, 0.0, 10.0, 5.0, 10.0)],
                    "Times",
                    10.0,
                )],
            )
        };
        let pages = vec![page("a"), page("b"), page("c")];
        let layouts = LayoutAnalyzer::new().analyze_pages(&pages).unwrap();
        let texts: Vec<Vec<&str>> = layouts.iter().map(|l| l.text_lines()).collect();
        assert_eq!(texts, vec![vec!["a"], vec!["b"], vec!["c"]]);
    }
}
