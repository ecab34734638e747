//! Plain row-band reading order strategy.

use crate::layout::{ComponentArena, ComponentId};

use super::{canonical_order, insertion_sort, ReadingOrderStrategy, RowBand};

/// Simple top-to-bottom, left-to-right reading order.
///
/// Sorts once with the row-band comparator. Works well when every row is a
/// clean band; staircase layouts may come out differently than with
/// [`super::SmartStrategy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleStrategy {
    band: RowBand,
}

impl SimpleStrategy {
    /// Create a strategy with the given row-band comparator.
    pub fn new(band: RowBand) -> Self {
        Self { band }
    }
}

impl ReadingOrderStrategy for SimpleStrategy {
    fn order(&self, arena: &ComponentArena, mut siblings: Vec<ComponentId>) -> Vec<ComponentId> {
        canonical_order(arena, &mut siblings);
        insertion_sort(&mut siblings, |&a, &b| {
            self.band.compare(&arena.bbox(a), &arena.bbox(b))
        });
        siblings
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
