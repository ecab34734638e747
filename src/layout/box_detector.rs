//! Box and table cell detection.
//!
//! Every horizontal bar of the grid is scanned against the vertical bars it
//! touches. Consecutive vertical bounds close a cell above the bar (when they
//! reach higher than it) or below it (when they reach lower). A missing outer
//! border is replaced by a synthetic bound at the bar's end, and the box is
//! flagged as open on that side.
//!
//! Vertical bounds are followed transitively through collinear continuations,
//! so a cell edge drawn as several stacked strokes still reaches the true top
//! or bottom of the cell.

use serde::Serialize;

use crate::geometry::Rect;
use crate::layout::component::{vertical_extension, Borders};
use crate::layout::grid::Grid;

/// Smallest tolerance used when matching the two sides of a box.
///
/// Hairline bars have zero height; without a floor, two exactly equal tops
/// would never satisfy the strict comparison.
const MIN_SIDE_TOLERANCE: f32 = 1e-3;

/// A detected cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectedBox {
    /// Cell bounds, outer edges of the bounding bars
    pub bbox: Rect,
    /// Stroke width of the bar that closed the cell
    pub stroke_width: f32,
    /// Which sides are real bars
    pub borders: Borders,
}

/// Detect boxes on a classified grid, sorted by (top, left).
///
/// # Examples
///
/// ```
/// use page_oxide::elements::GraphicPrimitive;
/// use page_oxide::layout::{detect_boxes, Grid};
///
/// let grid = Grid::build(&[
///     GraphicPrimitive::line(0.0, 0.0, 20.0, 0.0),
///     GraphicPrimitive::line(0.0, 10.0, 20.0, 10.0),
///     GraphicPrimitive::line(0.0, 0.0, 0.0, 10.0),
///     GraphicPrimitive::line(20.0, 0.0, 20.0, 10.0),
/// ]);
/// let boxes = detect_boxes(&grid);
/// assert_eq!(boxes.len(), 1);
/// assert!(boxes[0].borders.right);
/// ```
pub fn detect_boxes(grid: &Grid) -> Vec<DetectedBox> {
    let scan = Scan {
        horizontal: grid.horizontal().map(|e| (e.bbox, e.stroke_width)).collect(),
        vertical: grid.vertical_rects(),
    };

    let mut boxes: Vec<DetectedBox> = Vec::new();
    for &(bar, stroke) in &scan.horizontal {
        for found in scan.boxes_along(bar, stroke) {
            if !boxes.contains(&found) {
                boxes.push(found);
            }
        }
    }

    boxes.sort_by(|a, b| {
        a.bbox
            .y0
            .total_cmp(&b.bbox.y0)
            .then(a.bbox.x0.total_cmp(&b.bbox.x0))
    });
    log::debug!(
        "box detection: {} horizontal, {} vertical bars -> {} boxes",
        scan.horizontal.len(),
        scan.vertical.len(),
        boxes.len()
    );
    boxes
}

struct Scan {
    /// Sorted by (top, left)
    horizontal: Vec<(Rect, f32)>,
    /// Sorted by (left, top)
    vertical: Vec<Rect>,
}

impl Scan {
    fn boxes_along(&self, bar: Rect, stroke: f32) -> Vec<DetectedBox> {
        let mut out = Vec::new();
        let mut prev_above: Option<Rect> = None;
        let mut prev_below: Option<Rect> = None;

        let bounds = self.vertical.iter().filter(|v| bar.intersects(v));
        for &bound in bounds {
            if bound.y0 < bar.y0 {
                out.extend(self.box_above(bar, stroke, prev_above, Some(bound)));
                prev_above = Some(bound);
            }
            if bound.y1 > bar.y1 {
                out.extend(self.box_below(bar, stroke, prev_below, Some(bound)));
                prev_below = Some(bound);
            }
        }

        // Open right side: the last bound stops short of the bar's end
        if let Some(last) = prev_above.filter(|p| p.x1 < bar.x1 - p.width()) {
            out.extend(self.box_above(bar, stroke, Some(last), None));
        }
        if let Some(last) = prev_below.filter(|p| p.x1 < bar.x1 - p.width()) {
            out.extend(self.box_below(bar, stroke, Some(last), None));
        }
        out
    }

    fn box_above(
        &self,
        bar: Rect,
        stroke: f32,
        left: Option<Rect>,
        right: Option<Rect>,
    ) -> Option<DetectedBox> {
        let (left_side, right_side) = (left.is_some(), right.is_some());
        let (left, right) = match (left, right) {
            (Some(l), Some(r)) => (l, r),
            (None, Some(r)) => (Rect::new(bar.x0, r.y0, bar.x0 + r.width(), bar.y0), r),
            (Some(l), None) => (l, Rect::new(bar.x1 - l.width(), l.y0, bar.x1, bar.y0)),
            (None, None) => return None,
        };
        if left.x1 >= right.x0 {
            return None;
        }

        let upper = self.next_upper_horizontal(&bar, left.x1, right.x0);
        let min_top = upper.map_or(f32::NEG_INFINITY, |u| u.y0);
        let top_left = self.transitive_top(left).max(min_top);
        let top_right = self.transitive_top(right).max(min_top);
        if (top_left - top_right).abs() >= side_tolerance(&bar) {
            return None;
        }

        let top = top_left.max(top_right);
        let top_side = upper.is_some_and(|u| u.y1 >= top);
        Some(DetectedBox {
            bbox: Rect::new(left.x0, top, right.x1, bar.y1),
            stroke_width: stroke,
            borders: Borders::new(left_side, top_side, right_side, true),
        })
    }

    fn box_below(
        &self,
        bar: Rect,
        stroke: f32,
        left: Option<Rect>,
        right: Option<Rect>,
    ) -> Option<DetectedBox> {
        let (left_side, right_side) = (left.is_some(), right.is_some());
        let (left, right) = match (left, right) {
            (Some(l), Some(r)) => (l, r),
            (None, Some(r)) => (Rect::new(bar.x0, bar.y1, bar.x0 + r.width(), r.y1), r),
            (Some(l), None) => (l, Rect::new(bar.x1 - l.width(), bar.y1, bar.x1, l.y1)),
            (None, None) => return None,
        };
        if left.x1 >= right.x0 {
            return None;
        }

        let lower = self.next_lower_horizontal(&bar, left.x1, right.x0);
        let max_bottom = lower.map_or(f32::INFINITY, |l| l.y1);
        let bottom_left = self.transitive_bottom(left).min(max_bottom);
        let bottom_right = self.transitive_bottom(right).min(max_bottom);
        let bottom = bottom_left.min(bottom_right);

        // A closing bar below means the cell is emitted when that bar is scanned
        let bottom_side = lower.is_some_and(|l| l.y0 <= bottom);
        if bottom_side || (bottom_left - bottom_right).abs() >= side_tolerance(&bar) {
            return None;
        }

        Some(DetectedBox {
            bbox: Rect::new(left.x0, bar.y0, right.x1, bottom),
            stroke_width: stroke,
            borders: Borders::new(left_side, true, right_side, false),
        })
    }

    /// Closest bar above `bar` spanning `[max_left, min_right]`.
    fn next_upper_horizontal(&self, bar: &Rect, max_left: f32, min_right: f32) -> Option<Rect> {
        let mut found = None;
        for (candidate, _) in &self.horizontal {
            if candidate.y1 >= bar.y0 {
                break;
            }
            if candidate.x0 <= max_left && candidate.x1 >= min_right {
                found = Some(*candidate);
            }
        }
        found
    }

    /// Closest bar below `bar` spanning `[max_left, min_right]`.
    fn next_lower_horizontal(&self, bar: &Rect, max_left: f32, min_right: f32) -> Option<Rect> {
        self.horizontal
            .iter()
            .map(|(candidate, _)| *candidate)
            .find(|c| c.y0 > bar.y1 && c.x0 <= max_left && c.x1 >= min_right)
    }

    fn transitive_top(&self, bound: Rect) -> f32 {
        let mut current = bound;
        while let Some(next) = self
            .vertical
            .iter()
            .find(|c| vertical_extension(&current, c) && c.y0 < current.y0)
        {
            current = *next;
        }
        current.y0
    }

    fn transitive_bottom(&self, bound: Rect) -> f32 {
        let mut current = bound;
        while let Some(next) = self
            .vertical
            .iter()
            .find(|c| vertical_extension(&current, c) && c.y0 > current.y0)
        {
            current = *next;
        }
        current.y1
    }
}

fn side_tolerance(bar: &Rect) -> f32 {
    bar.height().max(MIN_SIDE_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::GraphicPrimitive;

    fn frame(with_right: bool) -> Grid {
        let mut primitives = vec![
            GraphicPrimitive::line(0.0, 0.0, 20.0, 0.0),
            GraphicPrimitive::line(0.0, 10.0, 20.0, 10.0),
            GraphicPrimitive::line(0.0, 0.0, 0.0, 10.0),
        ];
        if with_right {
            primitives.push(GraphicPrimitive::line(20.0, 0.0, 20.0, 10.0));
        }
        Grid::build(&primitives)
    }

    #[test]
    fn test_closed_frame_is_one_box() {
        let boxes = detect_boxes(&frame(true));
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].bbox, Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(boxes[0].borders, Borders::all());
    }

    #[test]
    fn test_missing_right_border() {
        let boxes = detect_boxes(&frame(false));
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].bbox, Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(boxes[0].borders, Borders::new(true, true, false, true));
    }

    #[test]
    fn test_stroke_width_comes_from_closing_bar() {
        let grid = Grid::build(&[
            GraphicPrimitive::line(0.0, 0.0, 20.0, 0.0),
            GraphicPrimitive::line(0.0, 10.0, 20.0, 10.0).with_stroke_width(0.75),
            GraphicPrimitive::line(0.0, 0.0, 0.0, 10.0),
            GraphicPrimitive::line(20.0, 0.0, 20.0, 10.0),
        ]);
        let boxes = detect_boxes(&grid);
        assert_eq!(boxes[0].stroke_width, 0.75);
    }

    #[test]
    fn test_open_bottom_box() {
        // Top rule with two legs hanging down and nothing closing them
        let grid = Grid::build(&[
            GraphicPrimitive::line(0.0, 0.0, 20.0, 0.0),
            GraphicPrimitive::line(0.0, 0.0, 0.0, 10.0),
            GraphicPrimitive::line(20.0, 0.0, 20.0, 10.0),
        ]);
        let boxes = detect_boxes(&grid);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].bbox, Rect::new(0.0, 0.0, 20.0, 10.0));
        assert_eq!(boxes[0].borders, Borders::new(true, true, true, false));
    }

    #[test]
    fn test_stacked_legs_reach_transitive_top() {
        let grid = Grid::from_elements(
            [
                GraphicPrimitive::line(0.0, 0.0, 20.0, 0.0),
                GraphicPrimitive::line(0.0, 10.0, 20.0, 10.0),
                GraphicPrimitive::line(0.0, 0.0, 0.0, 4.0),
                GraphicPrimitive::line(0.0, 4.0, 0.0, 10.0),
                GraphicPrimitive::line(20.0, 0.0, 20.0, 10.0),
            ]
            .iter()
            .map(crate::layout::grid::GridElement::from_primitive)
            .collect(),
        );
        let boxes = detect_boxes(&grid);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].bbox, Rect::new(0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_two_cells_sorted_by_position() {
        let grid = Grid::build(&[
            GraphicPrimitive::line(0.0, 0.0, 40.0, 0.0),
            GraphicPrimitive::line(0.0, 10.0, 40.0, 10.0),
            GraphicPrimitive::line(0.0, 0.0, 0.0, 10.0),
            GraphicPrimitive::line(20.0, 0.0, 20.0, 10.0),
            GraphicPrimitive::line(40.0, 0.0, 40.0, 10.0),
        ]);
        let boxes = detect_boxes(&grid);
        let rects: Vec<Rect> = boxes.iter().map(|b| b.bbox).collect();
        assert_eq!(
            rects,
            vec![Rect::new(0.0, 0.0, 20.0, 10.0), Rect::new(20.0, 0.0, 40.0, 10.0)]
        );
    }

    #[test]
    fn test_no_verticals_no_boxes() {
        let grid = Grid::build(&[
            GraphicPrimitive::line(0.0, 0.0, 40.0, 0.0),
            GraphicPrimitive::line(0.0, 10.0, 40.0, 10.0),
        ]);
        assert!(detect_boxes(&grid).is_empty());
    }
}
