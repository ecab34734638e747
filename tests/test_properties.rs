//! Property-Based Tests
//!
//! Invariants of the layout engine checked over generated pages:
//! - The component tree is a forest that covers every component
//! - Every child lies inside its parent
//! - Placement picks the smallest container
//! - Reading order is a permutation, independent of the incoming order
//! - Same-band components read left to right, bands top to bottom
//! - Smart order equals resolving every same-band pair directly

use page_oxide::elements::{Glyph, GraphicPrimitive, PageInput, TextFragment, TextRun};
use page_oxide::geometry::Rect;
use page_oxide::layout::{contains, smallest_container, Component, ComponentArena, ComponentId};
use page_oxide::pipeline::{
    LayoutAnalyzer, ReadingOrderStrategy, RowBand, SimpleStrategy, SmartStrategy,
};
use proptest::prelude::*;
use std::cmp::Ordering;

// ============================================================================
// Generators
// ============================================================================

/// Axis-aligned lines on a coarse lattice so that many of them touch.
fn graphic() -> impl Strategy<Value = GraphicPrimitive> {
    (0u8..20, 0u8..20, 1u8..10, any::<bool>()).prop_map(|(x, y, len, horizontal)| {
        let (x, y, len) = (f32::from(x) * 10.0, f32::from(y) * 10.0, f32::from(len) * 10.0);
        if horizontal {
            GraphicPrimitive::line(x, y, x + len, y)
        } else {
            GraphicPrimitive::line(x, y, x, y + len)
        }
    })
}

fn text_run() -> impl Strategy<Value = TextRun> {
    (0u16..200, 0u16..200, 1usize..6).prop_map(|(x, y, n)| {
        let (x, baseline) = (f32::from(x), f32::from(y) + 8.0);
        let glyphs = (0..n)
            .map(|i| Glyph::at_baseline("x", x + i as f32 * 4.0, baseline, 4.0, 8.0))
            .collect();
        TextRun::new(glyphs, "Helvetica", 8.0)
    })
}

fn page() -> impl Strategy<Value = PageInput> {
    (prop::collection::vec(graphic(), 0..30), prop::collection::vec(text_run(), 0..15))
        .prop_map(|(graphics, runs)| PageInput::new(graphics, runs))
}

fn rect() -> impl Strategy<Value = Rect> {
    (0.0f32..500.0, 0.0f32..700.0, 1.0f32..80.0, 1.0f32..30.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
}

fn text_arena(rects: &[Rect]) -> (ComponentArena, Vec<ComponentId>) {
    let mut arena = ComponentArena::new();
    let ids = rects
        .iter()
        .map(|r| arena.push(Component::text(TextFragment::new("t", *r, "Times", 10.0))))
        .collect();
    (arena, ids)
}

/// Reference ordering that lists every same-band pair explicitly.
fn pairwise_order(
    arena: &ComponentArena,
    band: &RowBand,
    mut ids: Vec<ComponentId>,
) -> Vec<ComponentId> {
    if ids.len() < 2 {
        return ids;
    }
    ids.sort_by(|&a, &b| {
        let (ra, rb) = (arena.bbox(a), arena.bbox(b));
        ra.y0
            .total_cmp(&rb.y0)
            .then(ra.x0.total_cmp(&rb.x0))
            .then(ra.y1.total_cmp(&rb.y1))
            .then(ra.x1.total_cmp(&rb.x1))
            .then(a.cmp(&b))
    });

    let mut subjects_of: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];
    let mut is_subject = vec![false; ids.len()];
    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            let (a, b) = (arena.bbox(ids[i]), arena.bbox(ids[j]));
            if !band.same_band(&a, &b) {
                continue;
            }
            let (anchor, subject) = match band.compare(&a, &b) {
                Ordering::Greater => (i, j),
                _ => (j, i),
            };
            subjects_of[anchor].push(subject);
            is_subject[subject] = true;
        }
    }

    let mut remainder: Vec<usize> = (0..ids.len()).filter(|&i| !is_subject[i]).collect();
    // Stable insertion sort; the remainder holds no same-band pairs
    for i in 1..remainder.len() {
        let mut j = i;
        while j > 0
            && band.compare(&arena.bbox(ids[remainder[j]]), &arena.bbox(ids[remainder[j - 1]]))
                == Ordering::Less
        {
            remainder.swap(j, j - 1);
            j -= 1;
        }
    }

    let mut placed = vec![false; ids.len()];
    let mut ordered = Vec::with_capacity(ids.len());
    for anchor in remainder {
        let mut pulled = Vec::new();
        let mut stack = subjects_of[anchor].clone();
        while let Some(next) = stack.pop() {
            if !placed[next] {
                placed[next] = true;
                pulled.push(ids[next]);
                stack.extend(subjects_of[next].iter().copied());
            }
        }
        ordered.extend(pairwise_order(arena, band, pulled));
        placed[anchor] = true;
        ordered.push(ids[anchor]);
    }
    ordered
}

fn strategies() -> Vec<Box<dyn ReadingOrderStrategy>> {
    vec![Box::new(SmartStrategy::default()), Box::new(SimpleStrategy::default())]
}

// ============================================================================
// Tree Properties
// ============================================================================

/// Property: every component appears exactly once in the tree
#[test]
fn proptest_tree_is_a_covering_forest() {
    proptest!(ProptestConfig::with_cases(64), |(input in page())| {
        let layout = LayoutAnalyzer::new().analyze_page(&input).unwrap();
        let visited = layout.walk();
        prop_assert_eq!(visited.len(), layout.arena().len());

        let mut seen = vec![false; layout.arena().len()];
        for (id, _) in &visited {
            prop_assert!(!seen[id.index()], "component {} visited twice", id.index());
            seen[id.index()] = true;
        }
    });
}

/// Property: a child always lies inside its parent
#[test]
fn proptest_children_inside_parents() {
    proptest!(ProptestConfig::with_cases(64), |(input in page())| {
        let layout = LayoutAnalyzer::new().analyze_page(&input).unwrap();
        for (id, parent) in layout.arena().iter() {
            for &child in layout.children(id) {
                let child = layout.component(child);
                prop_assert!(
                    contains(&parent.bbox, &child.bbox, child.is_text()),
                    "{:?} not inside {:?}", child.bbox, parent.bbox
                );
            }
        }
    });
}

/// Property: the chosen container is never larger than another candidate
#[test]
fn proptest_smallest_container_is_minimal() {
    proptest!(|(pool in prop::collection::vec(rect(), 1..20), item in rect())| {
        let mut arena = ComponentArena::new();
        let ids: Vec<ComponentId> = pool.iter().map(|r| arena.push(Component::group(*r))).collect();
        let item = arena.push(Component::margin(item));

        match smallest_container(&arena, item, &ids) {
            Some(best) => {
                prop_assert!(arena.contains(best, item));
                for &other in &ids {
                    if arena.contains(other, item) {
                        prop_assert!(arena.bbox(best).area() <= arena.bbox(other).area());
                    }
                }
            },
            None => prop_assert!(ids.iter().all(|&other| !arena.contains(other, item))),
        }
    });
}

// ============================================================================
// Reading Order Properties
// ============================================================================

/// Property: ordering returns a permutation and ignores the incoming order
#[test]
fn proptest_order_is_a_stable_permutation() {
    proptest!(|(rects in prop::collection::vec(rect(), 0..25))| {
        let (arena, ids) = text_arena(&rects);
        for strategy in strategies() {
            let ordered = strategy.order(&arena, ids.clone());

            let mut sorted = ordered.clone();
            sorted.sort();
            prop_assert_eq!(&sorted, &ids);

            let reversed: Vec<ComponentId> = ids.iter().rev().copied().collect();
            prop_assert_eq!(&strategy.order(&arena, reversed), &ordered, "{}", strategy.name());
            prop_assert_eq!(&strategy.order(&arena, ordered.clone()), &ordered, "{}", strategy.name());
        }
    });
}

/// Property: one band reads left to right
#[test]
fn proptest_single_band_reads_left_to_right() {
    proptest!(|(cells in prop::collection::btree_map(0u16..400, 0.0f32..0.4, 1..20))| {
        let rects: Vec<Rect> = cells
            .iter()
            .rev()
            .map(|(&x, &jitter)| {
                let x = f32::from(x) * 5.0;
                Rect::new(x, jitter, x + 4.0, 10.0 + jitter)
            })
            .collect();
        let (arena, ids) = text_arena(&rects);
        let ordered = SmartStrategy::new(RowBand::default()).order(&arena, ids);
        let xs: Vec<f32> = ordered.iter().map(|&id| arena.bbox(id).x0).collect();
        prop_assert!(xs.windows(2).all(|w| w[0] < w[1]), "{:?}", xs);
    });
}

/// Property: bands read top to bottom regardless of horizontal position
#[test]
fn proptest_bands_read_top_to_bottom() {
    proptest!(|(cells in prop::collection::vec((0usize..6, 0.0f32..400.0), 1..30))| {
        let rects: Vec<Rect> = cells
            .iter()
            .map(|&(row, x)| {
                let y = row as f32 * 20.0;
                Rect::new(x, y, x + 15.0, y + 10.0)
            })
            .collect();
        let (arena, ids) = text_arena(&rects);
        let ordered = SmartStrategy::default().order(&arena, ids);
        let tops: Vec<f32> = ordered.iter().map(|&id| arena.bbox(id).y0).collect();
        prop_assert!(tops.windows(2).all(|w| w[0] <= w[1]), "{:?}", tops);
    });
}

/// Property: smart order matches direct pairwise resolution on crowded bands
#[test]
fn proptest_smart_matches_pairwise_resolution() {
    let crowded = (0.0f32..120.0, 0.0f32..60.0, 1.0f32..20.0, 1.0f32..30.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h));
    proptest!(|(rects in prop::collection::vec(crowded, 0..30))| {
        let (arena, ids) = text_arena(&rects);
        let band = RowBand::default();
        let expected = pairwise_order(&arena, &band, ids.clone());
        prop_assert_eq!(SmartStrategy::new(band).order(&arena, ids), expected);
    });
}
