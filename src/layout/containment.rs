//! Containment tree construction.
//!
//! Components are attached to their smallest enclosing container in a fixed
//! stage order. Containers for a stage are always drawn from components
//! created or placed by earlier stages, which keeps the result a forest.

use crate::layout::component::{Component, ComponentArena, ComponentId};
use crate::layout::grouping::group_components;
use crate::layout::margin_detector::{detect_margins, MarginCandidate};

/// Smallest-area component of `pool` that contains `item`.
///
/// The first container found wins ties, so pools list later (inner) stages
/// first.
pub fn smallest_container(
    arena: &ComponentArena,
    item: ComponentId,
    pool: &[ComponentId],
) -> Option<ComponentId> {
    let mut best: Option<(ComponentId, f32)> = None;
    for &candidate in pool {
        if !arena.contains(candidate, item) {
            continue;
        }
        let area = arena.bbox(candidate).area();
        if best.map_or(true, |(_, best_area)| area < best_area) {
            best = Some((candidate, area));
        }
    }
    best.map(|(id, _)| id)
}

/// Attach each item to its smallest container in `pool`.
///
/// Returns the items that found no container.
pub fn place(
    arena: &mut ComponentArena,
    items: &[ComponentId],
    pool: &[ComponentId],
) -> Vec<ComponentId> {
    let mut roots = Vec::new();
    for &item in items {
        match smallest_container(arena, item, pool) {
            Some(parent) => arena.add_child(parent, item),
            None => roots.push(item),
        }
    }
    roots
}

/// Build the page tree from grid elements, boxes and text already in `arena`.
///
/// Stages, each drawing containers only from the previous ones (a cell box
/// and its single-cell group share a rectangle; the box wins such ties):
///
/// 1. groups of intersecting grid elements and boxes (always roots);
/// 2. boxes into groups;
/// 3. grid elements into groups and boxes;
/// 4. margins, detected over the graphics plus the text no graphic contains,
///    into groups, boxes and grid elements;
/// 5. text into groups, boxes, grid elements and margins.
///
/// Returns the root components in stage order.
pub fn build_tree(
    arena: &mut ComponentArena,
    grid: &[ComponentId],
    boxes: &[ComponentId],
    text: &[ComponentId],
    separator_ratio: f32,
) -> Vec<ComponentId> {
    let graphics: Vec<ComponentId> = grid.iter().chain(boxes).copied().collect();
    let rects: Vec<_> = graphics.iter().map(|&id| arena.bbox(id)).collect();
    let groups: Vec<ComponentId> = group_components(&rects)
        .into_iter()
        .map(|group| arena.push(Component::group(group.bbox)))
        .collect();

    let mut roots = groups.clone();
    let mut pool = groups;

    roots.extend(place(arena, boxes, &pool));
    pool.splice(0..0, boxes.iter().copied());

    roots.extend(place(arena, grid, &pool));
    pool.splice(0..0, grid.iter().copied());

    let mut candidates: Vec<MarginCandidate> = pool
        .iter()
        .map(|&id| MarginCandidate::new(arena.kind(id), arena.bbox(id)))
        .collect();
    candidates.extend(
        text.iter()
            .filter(|&&t| smallest_container(arena, t, &pool).is_none())
            .map(|&t| MarginCandidate::new(arena.kind(t), arena.bbox(t))),
    );
    let margins: Vec<ComponentId> = detect_margins(&candidates, separator_ratio)
        .into_iter()
        .map(|bbox| arena.push(Component::margin(bbox)))
        .collect();

    roots.extend(place(arena, &margins, &pool));
    pool.splice(0..0, margins.iter().copied());

    roots.extend(place(arena, text, &pool));

    log::debug!(
        "containment: {} components, {} margins, {} roots",
        arena.len(),
        margins.len(),
        roots.len()
    );
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::TextFragment;
    use crate::geometry::Rect;
    use crate::layout::component::{Borders, ComponentKind};

    #[test]
    fn test_smallest_container_wins() {
        let mut arena = ComponentArena::new();
        let big = arena.push(Component::group(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let small = arena.push(Component::group(Rect::new(0.0, 0.0, 50.0, 50.0)));
        let item = arena.push(Component::margin(Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert_eq!(smallest_container(&arena, item, &[big, small]), Some(small));
        assert_eq!(smallest_container(&arena, item, &[small, big]), Some(small));
    }

    #[test]
    fn test_zero_area_container_is_smallest() {
        let mut arena = ComponentArena::new();
        let big = arena.push(Component::group(Rect::new(0.0, 0.0, 100.0, 10.0)));
        let rule = arena.push(Component::graphic(
            ComponentKind::Line,
            Rect::new(0.0, 5.0, 100.0, 5.0),
            1.0,
        ));
        let dot = arena.push(Component::graphic(
            ComponentKind::Line,
            Rect::new(10.0, 5.0, 10.0, 5.0),
            1.0,
        ));
        assert_eq!(smallest_container(&arena, dot, &[big, rule]), Some(rule));
    }

    #[test]
    fn test_ties_keep_first_found() {
        let mut arena = ComponentArena::new();
        let a = arena.push(Component::group(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let b = arena.push(Component::group(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let item = arena.push(Component::margin(Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert_eq!(smallest_container(&arena, item, &[b, a]), Some(b));
    }

    #[test]
    fn test_place_returns_roots() {
        let mut arena = ComponentArena::new();
        let cell = arena.push(Component::boxed(
            Rect::new(0.0, 0.0, 50.0, 20.0),
            1.0,
            Borders::all(),
        ));
        let inside = arena.push(Component::text(TextFragment::new(
            "in",
            Rect::new(2.0, 2.0, 10.0, 12.0),
            "Times",
            10.0,
        )));
        let outside = arena.push(Component::text(TextFragment::new(
            "out",
            Rect::new(60.0, 2.0, 70.0, 12.0),
            "Times",
            10.0,
        )));
        let roots = place(&mut arena, &[inside, outside], &[cell]);
        assert_eq!(roots, vec![outside]);
        assert_eq!(arena.children(cell), &[inside]);
    }

    #[test]
    fn test_build_tree_table_and_loose_text() {
        let mut arena = ComponentArena::new();
        let mut grid = Vec::new();
        for (x0, y0, x1, y1) in [
            (0.0, 0.0, 40.0, 0.0),
            (0.0, 20.0, 40.0, 20.0),
            (0.0, 0.0, 0.0, 20.0),
            (40.0, 0.0, 40.0, 20.0),
        ] {
            grid.push(arena.push(Component::graphic(
                ComponentKind::Line,
                Rect::new(x0, y0, x1, y1),
                1.0,
            )));
        }
        let cell = arena.push(Component::boxed(
            Rect::new(0.0, 0.0, 40.0, 20.0),
            1.0,
            Borders::all(),
        ));
        let in_cell = arena.push(Component::text(TextFragment::new(
            "cell",
            Rect::new(2.0, 5.0, 20.0, 15.0),
            "Times",
            10.0,
        )));
        let loose = arena.push(Component::text(TextFragment::new(
            "loose",
            Rect::new(2.0, 40.0, 30.0, 50.0),
            "Times",
            10.0,
        )));

        let roots = build_tree(&mut arena, &grid, &[cell], &[in_cell, loose], 0.5);

        // One group holding the cell and the rules, one margin holding the loose text
        let kinds: Vec<ComponentKind> = roots.iter().map(|&r| arena.kind(r)).collect();
        assert_eq!(kinds, vec![ComponentKind::Group, ComponentKind::Margin]);
        let group = roots[0];
        assert!(arena.children(group).contains(&cell));
        assert_eq!(arena.children(cell).len(), 5);
        assert!(arena.children(cell).contains(&in_cell));
        assert_eq!(arena.children(roots[1]), &[loose]);
        assert_eq!(arena.bbox(roots[1]), Rect::new(2.0, 40.0, 30.0, 50.0));
    }

    #[test]
    fn test_text_inside_open_group_joins_the_group() {
        // An L of two rules: the group spans the text, no box or margin does
        let mut arena = ComponentArena::new();
        let grid: Vec<ComponentId> = [(0.0, 0.0, 100.0, 0.0), (0.0, 0.0, 0.0, 50.0)]
            .into_iter()
            .map(|(x0, y0, x1, y1)| {
                arena.push(Component::graphic(ComponentKind::Line, Rect::new(x0, y0, x1, y1), 1.0))
            })
            .collect();
        let caption = arena.push(Component::text(TextFragment::new(
            "caption",
            Rect::new(10.0, 10.0, 40.0, 20.0),
            "Times",
            10.0,
        )));

        let roots = build_tree(&mut arena, &grid, &[], &[caption], 0.5);

        assert_eq!(roots.len(), 1);
        let group = roots[0];
        assert_eq!(arena.kind(group), ComponentKind::Group);
        assert_eq!(arena.bbox(group), Rect::new(0.0, 0.0, 100.0, 50.0));
        assert!(arena.children(group).contains(&caption));
        assert!(arena.iter().all(|(_, c)| c.kind != ComponentKind::Margin));
    }
}
