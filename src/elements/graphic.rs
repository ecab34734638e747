//! Graphic primitive element types.
//!
//! The decoder reduces path painting to two shapes: stroked line segments and
//! filled (or stroked) rectangles, each already transformed to page space.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Shape reported by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveKind {
    /// A stroked line segment (`l` operator)
    Line,
    /// An appended rectangle (`re` operator)
    FilledRect,
}

fn default_stroke_width() -> f32 {
    1.0
}

/// A line or rectangle from the page graphics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphicPrimitive {
    /// Shape kind
    pub kind: PrimitiveKind,
    /// Bounding box in page space
    pub bbox: Rect,
    /// Stroke width in points
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
}

impl GraphicPrimitive {
    /// Create a primitive with the default 1pt stroke.
    pub fn new(kind: PrimitiveKind, bbox: Rect) -> Self {
        Self {
            kind,
            bbox,
            stroke_width: default_stroke_width(),
        }
    }

    /// Create a line path from (x1, y1) to (x2, y2).
    ///
    /// # Example
    ///
    /// ```
    /// use page_oxide::elements::GraphicPrimitive;
    ///
    /// let line = GraphicPrimitive::line(100.0, 10.0, 10.0, 10.0);
    /// assert_eq!(line.bbox.x0, 10.0);
    /// assert_eq!(line.bbox.x1, 100.0);
    /// ```
    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(PrimitiveKind::Line, Rect::from_corners(x1, y1, x2, y2))
    }

    /// Create a rectangle from its edges.
    pub fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(PrimitiveKind::FilledRect, Rect::from_corners(x0, y0, x1, y1))
    }

    /// Set stroke width.
    pub fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }
}
