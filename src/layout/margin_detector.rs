//! Column (margin) detection.
//!
//! The page is first cut into horizontal regions by wide rules: any graphic
//! wider than a fraction of the content width closes the region above it and
//! opens a new one below. Inside each region, text fragments that overlap
//! horizontally are collected into one column, so two side-by-side columns
//! stay apart while the lines of one column fuse into a single margin.

use std::cmp::Ordering;

use crate::geometry::Rect;
use crate::layout::component::{contains, ComponentKind};

/// A component considered by the margin detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginCandidate {
    /// Component kind
    pub kind: ComponentKind,
    /// Component bounds
    pub bbox: Rect,
}

impl MarginCandidate {
    /// Create a candidate.
    pub fn new(kind: ComponentKind, bbox: Rect) -> Self {
        Self { kind, bbox }
    }

    fn is_text(&self) -> bool {
        self.kind == ComponentKind::Text
    }
}

fn by_y_then_x(a: &Rect, b: &Rect) -> Ordering {
    a.y0.total_cmp(&b.y0).then(a.x0.total_cmp(&b.x0))
}

/// Cut the page into horizontal bands separated by wide graphics.
///
/// A graphic is a separator when its width exceeds `separator_ratio` times
/// the content width (the horizontal extent of all candidates). The last band
/// is unbounded below.
pub fn detect_regions(candidates: &[MarginCandidate], separator_ratio: f32) -> Vec<Rect> {
    let content_width = Rect::bounding(candidates.iter().map(|c| &c.bbox)).map_or(0.0, |r| r.width());

    let mut separators: Vec<Rect> = candidates
        .iter()
        .filter(|c| c.kind.is_graphic() && c.bbox.width() > separator_ratio * content_width)
        .map(|c| c.bbox)
        .collect();
    separators.sort_by(by_y_then_x);

    let mut regions = Vec::with_capacity(separators.len() + 1);
    let mut from = f32::NEG_INFINITY;
    for separator in &separators {
        regions.push(Rect::new(f32::NEG_INFINITY, from, f32::INFINITY, separator.y0));
        from = from.max(separator.y1);
    }
    regions.push(Rect::new(f32::NEG_INFINITY, from, f32::INFINITY, f32::INFINITY));
    regions
}

/// Detect text columns.
///
/// Returns one rectangle per column per region, regions top to bottom and
/// columns within a region by (top, left).
///
/// # Examples
///
/// ```
/// use page_oxide::geometry::Rect;
/// use page_oxide::layout::{detect_margins, ComponentKind, MarginCandidate};
///
/// let text = |x0, y0, x1, y1| MarginCandidate::new(ComponentKind::Text, Rect::new(x0, y0, x1, y1));
/// let margins = detect_margins(
///     &[
///         text(0.0, 0.0, 40.0, 10.0),
///         text(0.0, 12.0, 35.0, 22.0),
///         text(60.0, 0.0, 100.0, 10.0),
///     ],
///     0.5,
/// );
/// assert_eq!(margins, vec![Rect::new(0.0, 0.0, 40.0, 22.0), Rect::new(60.0, 0.0, 100.0, 10.0)]);
/// ```
pub fn detect_margins(candidates: &[MarginCandidate], separator_ratio: f32) -> Vec<Rect> {
    let regions = detect_regions(candidates, separator_ratio);
    let mut margins = Vec::new();
    for region in &regions {
        let mut fragments: Vec<Rect> = candidates
            .iter()
            .filter(|c| c.is_text() && contains(region, &c.bbox, true))
            .map(|c| c.bbox)
            .collect();
        fragments.sort_by(by_y_then_x);

        let mut columns = columns_of(&fragments);
        columns.sort_by(by_y_then_x);
        margins.extend(columns);
    }
    log::debug!(
        "margin detection: {} candidates, {} regions -> {} margins",
        candidates.len(),
        regions.len(),
        margins.len()
    );
    margins
}

fn columns_of(fragments: &[Rect]) -> Vec<Rect> {
    let mut columns: Vec<Rect> = Vec::new();
    for fragment in fragments {
        if columns.iter().any(|m| contains(m, fragment, true)) {
            continue;
        }
        // Absorbing margins can widen the span and reach further margins
        let mut span = *fragment;
        loop {
            let (overlapping, rest): (Vec<Rect>, Vec<Rect>) =
                columns.into_iter().partition(|m| m.overlaps_horizontally(&span));
            columns = rest;
            if overlapping.is_empty() {
                break;
            }
            span = overlapping.iter().fold(span, |acc, m| acc.union(m));
        }
        columns.push(span);
    }
    columns
}
