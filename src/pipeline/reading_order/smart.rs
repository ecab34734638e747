//! Tolerance-aware reading order.
//!
//! The row-band comparator is not transitive: `a` can share a band with `b`
//! and `b` with `c` while `a` is clearly above `c`. Sorting such a list
//! directly gives results that depend on the incoming order. Instead, every
//! same-band pair is split into an anchor (the later one) and a subject (the
//! earlier one). Components that are nobody's subject are sorted (they are
//! free of same-band pairs), and each of them gets the subjects it reaches
//! first, ordered the same way, spliced in right before it.
//!
//! The pair relation is never materialized. A subject belongs to the first
//! sorted anchor any of its ascending chains ends at, so one sweep from the
//! last component to the first, over an index of band intervals, assigns
//! every subject. Nested subject sets are resolved from an explicit work
//! stack, each one holding only its own members.

use std::cmp::Ordering;

use crate::geometry::Rect;
use crate::layout::{ComponentArena, ComponentId};

use super::{canonical_order, insertion_sort, ReadingOrderStrategy, RowBand};

/// Recursive partial-order resolution of same-band clusters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartStrategy {
    band: RowBand,
}

/// One sibling, in canonical position.
struct Entry {
    id: ComponentId,
    bbox: Rect,
    lo: f32,
    hi: f32,
}

enum Task {
    /// Members in ascending anchor order.
    Resolve(Vec<usize>),
    Emit(usize),
}

impl SmartStrategy {
    /// Create a strategy with the given row-band comparator.
    pub fn new(band: RowBand) -> Self {
        Self { band }
    }

    fn sort(&self, arena: &ComponentArena, mut ids: Vec<ComponentId>) -> Vec<ComponentId> {
        if ids.len() < 2 {
            return ids;
        }
        canonical_order(arena, &mut ids);

        let entries: Vec<Entry> = ids
            .iter()
            .map(|&id| {
                let bbox = arena.bbox(id);
                let (lo, hi) = self.band.interval(&bbox);
                // `+ 0.0` folds -0.0 into 0.0 for the coordinate index
                Entry { id, bbox, lo: lo + 0.0, hi: hi + 0.0 }
            })
            .collect();

        let mut members: Vec<usize> = (0..entries.len()).collect();
        members.sort_by(|&a, &b| anchor_order(&entries, a, b));

        let mut ordered = Vec::with_capacity(entries.len());
        let mut work = vec![Task::Resolve(members)];
        while let Some(task) = work.pop() {
            match task {
                Task::Emit(index) => ordered.push(entries[index].id),
                Task::Resolve(members) => self.resolve(&entries, members, &mut work),
            }
        }
        ordered
    }

    /// Split one member set into sorted anchors and their subject sets.
    ///
    /// Pushes the resulting tasks so that popping them yields, for every
    /// anchor in order, its resolved subjects followed by the anchor.
    fn resolve(&self, entries: &[Entry], members: Vec<usize>, work: &mut Vec<Task>) {
        if members.len() < 2 {
            work.extend(members.into_iter().map(Task::Emit));
            return;
        }

        // Intervals sharing a point pairwise overlap, so every member but the
        // last is a subject and the anchor order is the answer.
        let lo = members.iter().map(|&i| entries[i].lo).fold(f32::NEG_INFINITY, f32::max);
        let hi = members.iter().map(|&i| entries[i].hi).fold(f32::INFINITY, f32::min);
        if lo <= hi {
            work.extend(members.into_iter().rev().map(Task::Emit));
            return;
        }

        // Anchors: no later member shares their band.
        let mut index = BandIndex::new(entries, &members);
        let mut anchors = Vec::new();
        for (pos, &i) in members.iter().enumerate().rev() {
            if index.min_overlapping(entries[i].lo, entries[i].hi) == usize::MAX {
                anchors.push(pos);
            }
            index.insert(entries[i].lo, entries[i].hi, 0);
        }
        anchors.sort_by_key(|&pos| members[pos]);
        insertion_sort(&mut anchors, |&a, &b| {
            self.band.compare(&entries[members[a]].bbox, &entries[members[b]].bbox)
        });

        // Every subject takes the lowest rank among the anchors it reaches.
        let mut rank = vec![usize::MAX; members.len()];
        for (r, &pos) in anchors.iter().enumerate() {
            rank[pos] = r;
        }
        let mut index = BandIndex::new(entries, &members);
        for (pos, &i) in members.iter().enumerate().rev() {
            if rank[pos] == usize::MAX {
                rank[pos] = index.min_overlapping(entries[i].lo, entries[i].hi);
            }
            index.insert(entries[i].lo, entries[i].hi, rank[pos]);
        }

        let mut subjects: Vec<Vec<usize>> = vec![Vec::new(); anchors.len()];
        for (pos, &i) in members.iter().enumerate() {
            debug_assert!(rank[pos] < anchors.len());
            if let Some(set) = subjects.get_mut(rank[pos]) {
                if anchors[rank[pos]] != pos {
                    set.push(i);
                }
            }
        }

        for (r, &pos) in anchors.iter().enumerate().rev() {
            work.push(Task::Emit(members[pos]));
            let set = std::mem::take(&mut subjects[r]);
            if !set.is_empty() {
                work.push(Task::Resolve(set));
            }
        }
    }
}

/// Anchor direction of a same-band pair: left edge, then top edge, then
/// canonical position.
fn anchor_order(entries: &[Entry], a: usize, b: usize) -> Ordering {
    let (ra, rb) = (&entries[a].bbox, &entries[b].bbox);
    (ra.x0 + 0.0)
        .total_cmp(&(rb.x0 + 0.0))
        .then((ra.y0 + 0.0).total_cmp(&(rb.y0 + 0.0)))
        .then(a.cmp(&b))
}

/// Minimum value over inserted band intervals that overlap a query interval.
///
/// An inserted interval overlaps `[lo, hi]` when it starts inside it or covers
/// `lo`. The first case is a range query over start points, the second a point
/// query over covered ranges.
struct BandIndex {
    coords: Vec<f32>,
    starts: MinTree,
    covers: MinTree,
}

impl BandIndex {
    fn new(entries: &[Entry], members: &[usize]) -> Self {
        let mut coords: Vec<f32> =
            members.iter().flat_map(|&i| [entries[i].lo, entries[i].hi]).collect();
        coords.sort_by(f32::total_cmp);
        coords.dedup();
        let len = coords.len();
        Self { coords, starts: MinTree::new(len), covers: MinTree::new(len) }
    }

    fn slot(&self, value: f32) -> usize {
        self.coords.partition_point(|c| c.total_cmp(&value) == Ordering::Less)
    }

    fn insert(&mut self, lo: f32, hi: f32, value: usize) {
        let (first, last) = (self.slot(lo), self.slot(hi));
        self.starts.lower(first, value);
        self.covers.lower_range(first, last, value);
    }

    /// `usize::MAX` when nothing overlaps.
    fn min_overlapping(&self, lo: f32, hi: f32) -> usize {
        let (first, last) = (self.slot(lo), self.slot(hi));
        self.starts.range_min(first, last).min(self.covers.point_min(first))
    }
}

/// Bottom-up segment tree of `usize` minima.
///
/// `lower` pairs with `range_min`, `lower_range` with `point_min`.
struct MinTree {
    base: usize,
    nodes: Vec<usize>,
}

impl MinTree {
    fn new(len: usize) -> Self {
        let base = len.max(1).next_power_of_two();
        Self { base, nodes: vec![usize::MAX; 2 * base] }
    }

    fn lower(&mut self, slot: usize, value: usize) {
        let mut node = self.base + slot;
        while node > 0 {
            self.nodes[node] = self.nodes[node].min(value);
            node /= 2;
        }
    }

    /// Minimum over the slots `first..=last`.
    fn range_min(&self, first: usize, last: usize) -> usize {
        let mut best = usize::MAX;
        let (mut l, mut r) = (self.base + first, self.base + last + 1);
        while l < r {
            if l % 2 == 1 {
                best = best.min(self.nodes[l]);
                l += 1;
            }
            if r % 2 == 1 {
                r -= 1;
                best = best.min(self.nodes[r]);
            }
            l /= 2;
            r /= 2;
        }
        best
    }

    fn lower_range(&mut self, first: usize, last: usize, value: usize) {
        let (mut l, mut r) = (self.base + first, self.base + last + 1);
        while l < r {
            if l % 2 == 1 {
                self.nodes[l] = self.nodes[l].min(value);
                l += 1;
            }
            if r % 2 == 1 {
                r -= 1;
                self.nodes[r] = self.nodes[r].min(value);
            }
            l /= 2;
            r /= 2;
        }
    }

    fn point_min(&self, slot: usize) -> usize {
        let mut best = usize::MAX;
        let mut node = self.base + slot;
        while node > 0 {
            best = best.min(self.nodes[node]);
            node /= 2;
        }
        best
    }
}

impl ReadingOrderStrategy for SmartStrategy {
    fn order(&self, arena: &ComponentArena, siblings: Vec<ComponentId>) -> Vec<ComponentId> {
        self.sort(arena, siblings)
    }

    fn name(&self) -> &'static str {
        "SmartStrategy"
    }
}
