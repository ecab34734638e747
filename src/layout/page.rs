//! The finished page tree.

use std::fmt;

use serde::Serialize;

use crate::layout::component::{Component, ComponentArena, ComponentId, ComponentKind};

/// Result of analyzing one page: the component arena and the ordered roots.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageLayout {
    roots: Vec<ComponentId>,
    components: ComponentArena,
}

impl PageLayout {
    /// Wrap an arena and its root list.
    pub fn new(components: ComponentArena, roots: Vec<ComponentId>) -> Self {
        Self { roots, components }
    }

    /// Root components in reading order.
    pub fn roots(&self) -> &[ComponentId] {
        &self.roots
    }

    /// The component arena.
    pub fn arena(&self) -> &ComponentArena {
        &self.components
    }

    /// Borrow a component.
    pub fn component(&self, id: ComponentId) -> &Component {
        self.components.get(id)
    }

    /// Children of a component in reading order.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.components.children(id)
    }

    /// Whether the page has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Every component with its depth, depth-first in reading order.
    pub fn walk(&self) -> Vec<(ComponentId, usize)> {
        let mut out = Vec::with_capacity(self.components.len());
        let mut stack: Vec<(ComponentId, usize)> =
            self.roots.iter().rev().map(|&id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            stack.extend(self.children(id).iter().rev().map(|&child| (child, depth + 1)));
        }
        out
    }

    /// Ids of all components of `kind`, in reading order.
    pub fn find_all(&self, kind: ComponentKind) -> Vec<ComponentId> {
        self.walk()
            .into_iter()
            .filter(|&(id, _)| self.components.kind(id) == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// Text of every text component, in reading order.
    pub fn text_lines(&self) -> Vec<&str> {
        self.walk()
            .into_iter()
            .filter_map(|(id, _)| self.component(id).text.as_ref())
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Count the components of each kind reachable from the roots.
    pub fn summary(&self) -> LayoutSummary {
        let mut summary = LayoutSummary::default();
        for (id, depth) in self.walk() {
            summary.depth = summary.depth.max(depth + 1);
            let count = match self.components.kind(id) {
                ComponentKind::Line => &mut summary.lines,
                ComponentKind::FilledRect => &mut summary.filled_rects,
                ComponentKind::Extension => &mut summary.extensions,
                ComponentKind::Box => &mut summary.boxes,
                ComponentKind::Group => &mut summary.groups,
                ComponentKind::Margin => &mut summary.margins,
                ComponentKind::Text => &mut summary.texts,
            };
            *count += 1;
        }
        summary
    }
}

/// Component counts of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayoutSummary {
    /// Raw lines
    pub lines: usize,
    /// Raw rectangles
    pub filled_rects: usize,
    /// Merged bars
    pub extensions: usize,
    /// Detected boxes
    pub boxes: usize,
    /// Graphic groups
    pub groups: usize,
    /// Text columns
    pub margins: usize,
    /// Text fragments
    pub texts: usize,
    /// Levels of the deepest branch
    pub depth: usize,
}

impl LayoutSummary {
    /// Total number of components.
    pub fn total(&self) -> usize {
        self.lines
            + self.filled_rects
            + self.extensions
            + self.boxes
            + self.groups
            + self.margins
            + self.texts
    }
}

impl fmt::Display for LayoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} components ({} groups, {} boxes, {} margins, {} texts, {} grid), depth {}",
            self.total(),
            self.groups,
            self.boxes,
            self.margins,
            self.texts,
            self.lines + self.filled_rects + self.extensions,
            self.depth
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::TextFragment;
    use crate::geometry::Rect;

    fn sample() -> (PageLayout, [ComponentId; 4]) {
        let mut arena = ComponentArena::new();
        let margin = arena.push(Component::margin(Rect::new(0.0, 0.0, 100.0, 40.0)));
        let first = arena.push(Component::text(TextFragment::new(
            "first",
            Rect::new(0.0, 0.0, 50.0, 10.0),
            "Times",
            10.0,
        )));
        let second = arena.push(Component::text(TextFragment::new(
            "second",
            Rect::new(0.0, 20.0, 50.0, 30.0),
            "Times",
            10.0,
        )));
        let rule = arena.push(Component::graphic(
            ComponentKind::Line,
            Rect::new(0.0, 50.0, 100.0, 50.0),
            1.0,
        ));
        arena.add_child(margin, first);
        arena.add_child(margin, second);
        (PageLayout::new(arena, vec![margin, rule]), [margin, first, second, rule])
    }

    #[test]
    fn test_walk_is_depth_first() {
        let (page, [margin, first, second, rule]) = sample();
        assert_eq!(page.walk(), vec![(margin, 0), (first, 1), (second, 1), (rule, 0)]);
        assert_eq!(page.find_all(ComponentKind::Text), vec![first, second]);
    }

    #[test]
    fn test_text_lines() {
        let (page, _) = sample();
        assert_eq!(page.text_lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_summary() {
        let (page, _) = sample();
        let summary = page.summary();
        assert_eq!(summary.margins, 1);
        assert_eq!(summary.texts, 2);
        assert_eq!(summary.lines, 1);
        assert_eq!(summary.depth, 2);
        assert_eq!(summary.total(), 4);
        assert!(summary.to_string().starts_with("4 components"));
    }

    #[test]
    fn test_serialize_page() {
        let (page, _) = sample();
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["roots"], serde_json::json!([0, 3]));
        assert_eq!(json["components"][0]["kind"], "margin");
        assert_eq!(json["components"][0]["children"], serde_json::json!([1, 2]));
        assert_eq!(json["components"][1]["text"]["text"], "first");
        assert!(json["components"][1].get("borders").is_none());
    }
}
