//! Connected-component grouping of graphics.
//!
//! Graphics and boxes that touch or overlap are unioned, so a whole table
//! (its rules plus its cells) or a framed figure ends up under one group.

use indexmap::IndexMap;

use crate::geometry::Rect;

/// One connected cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Bounding union of the members
    pub bbox: Rect,
    /// Indices into the grouped slice, ascending
    pub members: Vec<usize>,
}

/// Disjoint-set forest with path compression and union by size.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        while self.parent[x] != root {
            let next = self.parent[x];
            self.parent[x] = root;
            x = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] { (ra, rb) } else { (rb, ra) };
        self.parent[small] = big;
        self.size[big] += self.size[small];
    }
}

/// Group intersecting rectangles.
///
/// Rectangles that intersect nothing get no group. Groups are returned in
/// order of their lowest member index.
///
/// # Examples
///
/// ```
/// use page_oxide::geometry::Rect;
/// use page_oxide::layout::group_components;
///
/// let groups = group_components(&[
///     Rect::new(0.0, 0.0, 10.0, 10.0),
///     Rect::new(5.0, 5.0, 20.0, 15.0),
///     Rect::new(50.0, 50.0, 60.0, 60.0),
/// ]);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].bbox, Rect::new(0.0, 0.0, 20.0, 15.0));
/// ```
pub fn group_components(rects: &[Rect]) -> Vec<Group> {
    let mut sets = UnionFind::new(rects.len());
    let mut paired = vec![false; rects.len()];
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].intersects(&rects[j]) {
                sets.union(i, j);
                paired[i] = true;
                paired[j] = true;
            }
        }
    }

    let mut clusters: IndexMap<usize, Vec<usize>> = IndexMap::new();
    for i in (0..rects.len()).filter(|&i| paired[i]) {
        let root = sets.find(i);
        clusters.entry(root).or_default().push(i);
    }

    let groups: Vec<Group> = clusters
        .into_values()
        .filter_map(|members| {
            Rect::bounding(members.iter().map(|&i| &rects[i])).map(|bbox| Group { bbox, members })
        })
        .collect();
    log::debug!("grouping: {} components -> {} groups", rects.len(), groups.len());
    groups
}
