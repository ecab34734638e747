//! Grid extension and classification.
//!
//! Tables are often drawn as many short collinear strokes (one per cell edge)
//! instead of one rule per row or column. This module chains touching
//! collinear bars into single [`ComponentKind::Extension`] bars and classifies
//! the result into horizontal and vertical bars for box detection.

use std::cmp::Ordering;

use serde::Serialize;

use crate::elements::GraphicPrimitive;
use crate::geometry::Rect;
use crate::layout::component::ComponentKind;

/// A bar or shape of the page grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridElement {
    /// `Line`, `FilledRect` or `Extension`
    pub kind: ComponentKind,
    /// Bounding box
    pub bbox: Rect,
    /// Stroke width in points
    pub stroke_width: f32,
    /// Chained members (extensions only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<GridElement>,
}

impl GridElement {
    /// Wrap a decoder primitive.
    pub fn from_primitive(primitive: &GraphicPrimitive) -> Self {
        Self {
            kind: primitive.kind.into(),
            bbox: primitive.bbox,
            stroke_width: primitive.stroke_width,
            members: Vec::new(),
        }
    }

    /// Merge a chain of at least two collinear bars.
    fn extension(members: Vec<GridElement>) -> Self {
        let bbox = Rect::bounding(members.iter().map(|m| &m.bbox)).unwrap_or(members[0].bbox);
        let stroke_width = members.iter().map(|m| m.stroke_width).fold(0.0_f32, f32::max);
        Self {
            kind: ComponentKind::Extension,
            bbox,
            stroke_width,
            members,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn accepts(self, r: &Rect) -> bool {
        match self {
            Axis::Horizontal => r.is_horizontal(),
            Axis::Vertical => r.is_vertical(),
        }
    }

    fn same_span(self, a: &Rect, b: &Rect) -> bool {
        match self {
            Axis::Horizontal => a.y0 == b.y0 && a.y1 == b.y1,
            Axis::Vertical => a.x0 == b.x0 && a.x1 == b.x1,
        }
    }

    /// Span first, then position along the bar.
    fn order(self, a: &Rect, b: &Rect) -> Ordering {
        let (ka, kb) = match self {
            Axis::Horizontal => ([a.y0, a.y1, a.x0, a.x1], [b.y0, b.y1, b.x0, b.x1]),
            Axis::Vertical => ([a.x0, a.x1, a.y0, a.y1], [b.x0, b.x1, b.y0, b.y1]),
        };
        ka.iter()
            .zip(kb.iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

/// Chain collinear touching bars along one axis.
fn chain_pass(elements: Vec<GridElement>, axis: Axis) -> Vec<GridElement> {
    let mut slots: Vec<Option<GridElement>> = elements.into_iter().map(Some).collect();
    let boxes: Vec<Rect> = slots.iter().flatten().map(|e| e.bbox).collect();

    let mut candidates: Vec<usize> = (0..boxes.len()).filter(|&i| axis.accepts(&boxes[i])).collect();
    candidates.sort_by(|&a, &b| axis.order(&boxes[a], &boxes[b]));

    let mut out = Vec::with_capacity(boxes.len());
    let mut pos = 0;
    while pos < candidates.len() {
        let first = candidates[pos];
        let mut envelope = boxes[first];
        let mut chain = vec![first];
        let mut next = pos + 1;
        while next < candidates.len() {
            let candidate = &boxes[candidates[next]];
            if !axis.same_span(&boxes[first], candidate) || !envelope.intersects(candidate) {
                break;
            }
            envelope = envelope.union(candidate);
            chain.push(candidates[next]);
            next += 1;
        }
        pos = next;

        let mut members: Vec<GridElement> =
            chain.iter().filter_map(|&i| slots[i].take()).collect();
        if members.len() == 1 {
            out.extend(members.pop());
        } else {
            log::trace!(
                "{:?} extension of {} bars -> ({:.1}, {:.1}, {:.1}, {:.1})",
                axis,
                members.len(),
                envelope.x0,
                envelope.y0,
                envelope.x1,
                envelope.y1
            );
            out.push(GridElement::extension(members));
        }
    }

    // Elements of the other orientation (and square-ish shapes) pass through
    out.extend(slots.into_iter().flatten());
    out
}

/// Merge collinear touching primitives: first horizontal chains, then vertical.
pub fn extend_primitives(primitives: &[GraphicPrimitive]) -> Vec<GridElement> {
    let elements = primitives.iter().map(GridElement::from_primitive).collect();
    chain_pass(chain_pass(elements, Axis::Horizontal), Axis::Vertical)
}

fn by_y_then_x(a: &Rect, b: &Rect) -> Ordering {
    a.y0.total_cmp(&b.y0).then(a.x0.total_cmp(&b.x0))
}

fn by_x_then_y(a: &Rect, b: &Rect) -> Ordering {
    a.x0.total_cmp(&b.x0).then(a.y0.total_cmp(&b.y0))
}

/// The classified page grid.
///
/// Horizontal bars are kept sorted by (top, left) and vertical bars by
/// (left, top); box detection relies on both orders.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    elements: Vec<GridElement>,
    horizontal: Vec<usize>,
    vertical: Vec<usize>,
}

impl Grid {
    /// Extend and classify decoder primitives.
    pub fn build(primitives: &[GraphicPrimitive]) -> Self {
        Self::from_elements(extend_primitives(primitives))
    }

    /// Classify already extended elements.
    pub fn from_elements(elements: Vec<GridElement>) -> Self {
        let mut horizontal: Vec<usize> =
            (0..elements.len()).filter(|&i| elements[i].bbox.is_horizontal()).collect();
        horizontal.sort_by(|&a, &b| by_y_then_x(&elements[a].bbox, &elements[b].bbox));

        let mut vertical: Vec<usize> =
            (0..elements.len()).filter(|&i| elements[i].bbox.is_vertical()).collect();
        vertical.sort_by(|&a, &b| by_x_then_y(&elements[a].bbox, &elements[b].bbox));

        Self {
            elements,
            horizontal,
            vertical,
        }
    }

    /// All grid elements, including shapes that are neither horizontal nor vertical.
    pub fn elements(&self) -> &[GridElement] {
        &self.elements
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Horizontal bars sorted by (top, left).
    pub fn horizontal(&self) -> impl Iterator<Item = &GridElement> + '_ {
        self.horizontal.iter().map(move |&i| &self.elements[i])
    }

    /// Vertical bars sorted by (left, top).
    pub fn vertical(&self) -> impl Iterator<Item = &GridElement> + '_ {
        self.vertical.iter().map(move |&i| &self.elements[i])
    }

    /// Horizontal bar boxes sorted by (top, left).
    pub fn horizontal_rects(&self) -> Vec<Rect> {
        self.horizontal().map(|e| e.bbox).collect()
    }

    /// Vertical bar boxes sorted by (left, top).
    pub fn vertical_rects(&self) -> Vec<Rect> {
        self.vertical().map(|e| e.bbox).collect()
    }

    /// Drop the elements whose boxes appear in `consumed` (one element per box).
    pub fn without(self, consumed: &[Rect]) -> Self {
        if consumed.is_empty() {
            return self;
        }
        let mut pending = consumed.to_vec();
        let kept = self
            .elements
            .into_iter()
            .filter(|e| match pending.iter().position(|r| *r == e.bbox) {
                Some(pos) => {
                    pending.swap_remove(pos);
                    false
                },
                None => true,
            })
            .collect();
        Self::from_elements(kept)
    }

    /// Consume the grid, returning its elements.
    pub fn into_elements(self) -> Vec<GridElement> {
        self.elements
    }
}
