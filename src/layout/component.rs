//! The per-page component arena.
//!
//! Every node of the reconstructed page tree lives in a [`ComponentArena`] and
//! is addressed by a [`ComponentId`]. Children are stored as id lists on the
//! parent; there are no parent back-pointers. When a parent lookup is needed,
//! [`ComponentArena::parent_table`] rebuilds it from the child lists.

use std::fmt;

use serde::Serialize;

use crate::elements::{PrimitiveKind, TextFragment};
use crate::geometry::Rect;

/// Stable index of a component inside its page arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ComponentId(pub(crate) usize);

impl ComponentId {
    /// Position of the component in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Type tag of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    /// Raw stroked line
    Line,
    /// Raw rectangle
    FilledRect,
    /// Collinear primitives merged into one bar
    Extension,
    /// Table cell or framed region
    Box,
    /// Connected cluster of graphics and boxes
    Group,
    /// Text column
    Margin,
    /// Consolidated text fragment
    Text,
}

impl ComponentKind {
    /// Lower-case tag used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::FilledRect => "filledRect",
            Self::Extension => "extension",
            Self::Box => "box",
            Self::Group => "group",
            Self::Margin => "margin",
            Self::Text => "text",
        }
    }

    /// Drawn or derived graphics, as opposed to text and margins.
    pub fn is_graphic(&self) -> bool {
        matches!(
            self,
            Self::Line | Self::FilledRect | Self::Extension | Self::Box | Self::Group
        )
    }
}

impl From<PrimitiveKind> for ComponentKind {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Line => Self::Line,
            PrimitiveKind::FilledRect => Self::FilledRect,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which sides of a box are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Borders {
    /// Left side drawn
    pub left: bool,
    /// Top side drawn
    pub top: bool,
    /// Right side drawn
    pub right: bool,
    /// Bottom side drawn
    pub bottom: bool,
}

impl Borders {
    /// Create a border set.
    pub fn new(left: bool, top: bool, right: bool, bottom: bool) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// All four sides drawn.
    pub fn all() -> Self {
        Self::new(true, true, true, true)
    }
}

impl fmt::Display for Borders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sides: Vec<&str> = [
            (self.left, "left"),
            (self.top, "top"),
            (self.right, "right"),
            (self.bottom, "bottom"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, name)| *name)
        .collect();
        if sides.is_empty() {
            f.write_str("no")
        } else {
            f.write_str(&sides.join(","))
        }
    }
}

/// Resolved text payload of a text component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    /// The text string
    pub text: String,
    /// Base font name
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
}

/// A node of the page tree.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    /// Type tag
    pub kind: ComponentKind,
    /// Bounding box
    pub bbox: Rect,
    /// Stroke width for graphics and boxes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
    /// Border flags (boxes only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Borders>,
    /// Text payload (text only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    /// Owned children in reading order once sorted
    pub children: Vec<ComponentId>,
}

impl Component {
    fn bare(kind: ComponentKind, bbox: Rect) -> Self {
        Self {
            kind,
            bbox,
            stroke_width: None,
            borders: None,
            text: None,
            children: Vec::new(),
        }
    }

    /// A line, rectangle or extension bar.
    pub fn graphic(kind: ComponentKind, bbox: Rect, stroke_width: f32) -> Self {
        Self {
            stroke_width: Some(stroke_width),
            ..Self::bare(kind, bbox)
        }
    }

    /// A detected box.
    pub fn boxed(bbox: Rect, stroke_width: f32, borders: Borders) -> Self {
        Self {
            stroke_width: Some(stroke_width),
            borders: Some(borders),
            ..Self::bare(ComponentKind::Box, bbox)
        }
    }

    /// A connected-component group.
    pub fn group(bbox: Rect) -> Self {
        Self::bare(ComponentKind::Group, bbox)
    }

    /// A text column.
    pub fn margin(bbox: Rect) -> Self {
        Self::bare(ComponentKind::Margin, bbox)
    }

    /// A text fragment.
    pub fn text(fragment: TextFragment) -> Self {
        Self {
            text: Some(TextContent {
                text: fragment.text,
                font_name: fragment.font_name,
                font_size: fragment.font_size,
            }),
            ..Self::bare(ComponentKind::Text, fragment.bbox)
        }
    }

    /// Whether this is a text component.
    pub fn is_text(&self) -> bool {
        self.kind == ComponentKind::Text
    }
}

/// Geometric containment used for tree assignment.
///
/// Plain closed containment, except that a text box only needs its bottom
/// edge (baseline) strictly below the container's top edge, so text that
/// starts exactly on a container's top border still belongs to it.
pub fn contains(container: &Rect, contained: &Rect, contained_is_text: bool) -> bool {
    if container.x0 > contained.x0 || container.x1 < contained.x1 {
        return false;
    }
    if contained_is_text {
        container.y0 < contained.y1 && container.y1 >= contained.y1
    } else {
        container.y0 <= contained.y0 && container.y1 >= contained.y1
    }
}

/// Same left and right edges and touching: one bar continues the other.
pub fn vertical_extension(a: &Rect, b: &Rect) -> bool {
    a.x0 == b.x0 && a.x1 == b.x1 && a.intersects(b)
}

/// Owner of every component of one page.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ComponentArena {
    nodes: Vec<Component>,
}

impl ComponentArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a component and return its id.
    pub fn push(&mut self, component: Component) -> ComponentId {
        self.nodes.push(component);
        ComponentId(self.nodes.len() - 1)
    }

    /// Borrow a component.
    ///
    /// Ids are only minted by [`ComponentArena::push`], so indexing cannot
    /// go out of bounds for ids from this arena.
    pub fn get(&self, id: ComponentId) -> &Component {
        &self.nodes[id.0]
    }

    /// Mutably borrow a component.
    pub fn get_mut(&mut self, id: ComponentId) -> &mut Component {
        &mut self.nodes[id.0]
    }

    /// Bounding box of a component.
    pub fn bbox(&self, id: ComponentId) -> Rect {
        self.nodes[id.0].bbox
    }

    /// Kind of a component.
    pub fn kind(&self, id: ComponentId) -> ComponentKind {
        self.nodes[id.0].kind
    }

    /// Children of a component.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        &self.nodes[id.0].children
    }

    /// Append `child` to `parent`'s child list.
    pub fn add_child(&mut self, parent: ComponentId, child: ComponentId) {
        self.nodes[parent.0].children.push(child);
    }

    /// Iterate over all components with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.nodes.iter().enumerate().map(|(i, c)| (ComponentId(i), c))
    }

    /// `a` contains `b` (never itself).
    pub fn contains(&self, a: ComponentId, b: ComponentId) -> bool {
        a != b && contains(&self.bbox(a), &self.bbox(b), self.get(b).is_text())
    }

    /// `a` and `b` are distinct and touch or overlap.
    pub fn intersects(&self, a: ComponentId, b: ComponentId) -> bool {
        a != b && self.bbox(a).intersects(&self.bbox(b))
    }

    /// `a` and `b` are distinct and their X ranges overlap.
    pub fn intersects_horizontally(&self, a: ComponentId, b: ComponentId) -> bool {
        a != b && self.bbox(a).overlaps_horizontally(&self.bbox(b))
    }

    /// `a` and `b` are distinct and their Y ranges overlap.
    pub fn intersects_vertically(&self, a: ComponentId, b: ComponentId) -> bool {
        a != b && self.bbox(a).overlaps_vertically(&self.bbox(b))
    }

    /// Parent of every component, rebuilt from the child lists.
    pub fn parent_table(&self) -> Vec<Option<ComponentId>> {
        let mut parents = vec![None; self.nodes.len()];
        for (id, component) in self.iter() {
            for &child in &component.children {
                parents[child.0] = Some(id);
            }
        }
        parents
    }

    /// All descendants of `id` in depth-first pre-order (excluding `id`).
    pub fn descendants(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut out = Vec::new();
        let mut stack: Vec<ComponentId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }
}
