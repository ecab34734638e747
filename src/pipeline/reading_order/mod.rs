//! Reading order strategies for the component tree.
//!
//! Siblings are ordered with a row-band comparator: components whose vertical
//! spans are clearly apart are ordered top to bottom, while components in the
//! same band (spans overlapping by more than a small tolerance) are ordered
//! left to right.
//!
//! # Available Strategies
//!
//! - [`SmartStrategy`]: resolves ambiguous same-band pairs recursively, so the
//!   non-transitive comparator never misorders a cluster (default)
//! - [`SimpleStrategy`]: plain stable sort with the row-band comparator

mod simple;
mod smart;

pub use simple::SimpleStrategy;
pub use smart::SmartStrategy;

use std::cmp::Ordering;

use crate::geometry::Rect;
use crate::layout::{ComponentArena, ComponentId};
use crate::pipeline::config::{LayoutConfig, ReadingOrderStrategyType};

/// Trait for ordering the children of one tree node.
///
/// Implementations must return a permutation of `siblings`.
pub trait ReadingOrderStrategy: Send + Sync {
    /// Order one sibling list.
    fn order(&self, arena: &ComponentArena, siblings: Vec<ComponentId>) -> Vec<ComponentId>;

    /// Return the name of this strategy for debugging.
    fn name(&self) -> &'static str;
}

/// The row-band comparator.
///
/// The tolerance of a component is its height divided by `divisor`.
/// Divisors below 2 are raised to 2, so a band never turns inside out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBand {
    divisor: f32,
}

impl Default for RowBand {
    fn default() -> Self {
        Self { divisor: 20.0 }
    }
}

impl RowBand {
    /// Create a comparator with the given tolerance divisor.
    pub fn new(divisor: f32) -> Self {
        Self { divisor: divisor.max(2.0) }
    }

    /// Vertical span shrunk by the tolerance at both ends.
    pub(crate) fn interval(&self, r: &Rect) -> (f32, f32) {
        let tolerance = r.height() / self.divisor;
        (r.y0 + tolerance, r.y1 - tolerance)
    }

    /// `a` ends above the start of `b`, within tolerance.
    pub fn vertically_before(&self, a: &Rect, b: &Rect) -> bool {
        self.interval(a).1 < self.interval(b).0
    }

    /// `a` starts below the end of `b`, within tolerance.
    pub fn vertically_after(&self, a: &Rect, b: &Rect) -> bool {
        self.interval(a).0 > self.interval(b).1
    }

    /// Neither vertical relation decides: `a` and `b` share a row band.
    pub fn same_band(&self, a: &Rect, b: &Rect) -> bool {
        !self.vertically_before(a, b) && !self.vertically_after(a, b)
    }

    /// Full comparator: vertical relation, else left edge, else top edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use page_oxide::geometry::Rect;
    /// use page_oxide::pipeline::reading_order::RowBand;
    ///
    /// let band = RowBand::default();
    /// let left = Rect::new(0.0, 0.0, 10.0, 10.0);
    /// let right = Rect::new(20.0, 0.5, 30.0, 10.5);
    /// let below = Rect::new(0.0, 20.0, 10.0, 30.0);
    /// assert_eq!(band.compare(&right, &left), Ordering::Greater);
    /// assert_eq!(band.compare(&right, &below), Ordering::Less);
    /// ```
    pub fn compare(&self, a: &Rect, b: &Rect) -> Ordering {
        if self.vertically_before(a, b) {
            Ordering::Less
        } else if self.vertically_after(a, b) {
            Ordering::Greater
        } else {
            edge_order(a.x0, b.x0).then_with(|| edge_order(a.y0, b.y0))
        }
    }
}

fn edge_order(a: f32, b: f32) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Order ids by (top, left, bottom, right, id) so results never depend on
/// the incoming order.
pub(crate) fn canonical_order(arena: &ComponentArena, ids: &mut [ComponentId]) {
    ids.sort_by(|&a, &b| {
        let (ra, rb) = (arena.bbox(a), arena.bbox(b));
        ra.y0
            .total_cmp(&rb.y0)
            .then(ra.x0.total_cmp(&rb.x0))
            .then(ra.y1.total_cmp(&rb.y1))
            .then(ra.x1.total_cmp(&rb.x1))
            .then(a.cmp(&b))
    });
}

/// Stable insertion sort that tolerates a non-transitive comparator.
///
/// The standard library sorts may panic when the comparison is not a total
/// order; this one only ever moves an element past neighbours it compares
/// strictly less than.
pub(crate) fn insertion_sort<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j], &items[j - 1]) == Ordering::Less {
            items.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Apply `strategy` to the root list and to the children of every node.
pub fn apply_to_tree(
    strategy: &dyn ReadingOrderStrategy,
    arena: &mut ComponentArena,
    roots: Vec<ComponentId>,
) -> Vec<ComponentId> {
    let parents: Vec<ComponentId> = arena
        .iter()
        .filter(|(_, c)| c.children.len() > 1)
        .map(|(id, _)| id)
        .collect();
    for parent in parents {
        let children = std::mem::take(&mut arena.get_mut(parent).children);
        let ordered = strategy.order(arena, children);
        arena.get_mut(parent).children = ordered;
    }
    log::trace!("{} ordered {} roots", strategy.name(), roots.len());
    strategy.order(arena, roots)
}

/// Create a reading order strategy based on configuration.
pub fn create_strategy(config: &LayoutConfig) -> Box<dyn ReadingOrderStrategy> {
    let band = RowBand::new(config.row_tolerance_divisor);
    match config.reading_order {
        ReadingOrderStrategyType::Smart => Box::new(SmartStrategy::new(band)),
        ReadingOrderStrategyType::Simple => Box::new(SimpleStrategy::new(band)),
    }
}
