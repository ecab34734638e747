//! Geometric primitives for layout analysis.
//!
//! This module provides the axis-aligned rectangle used by every layout stage.
//! Rectangles are stored by their edges so that edge equality (used to detect
//! collinear bars) is exact and never goes through width arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An axis-aligned rectangle in page space.
///
/// Y grows downwards: `y0` is the top edge, `y1` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from its edges.
    ///
    /// No validation is performed; use [`Rect::try_new`] at input boundaries.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width(), 100.0);
    /// assert_eq!(rect.height(), 50.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle, rejecting inverted or non-finite edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::geometry::Rect;
    ///
    /// assert!(Rect::try_new(0.0, 0.0, 10.0, 10.0).is_ok());
    /// assert!(Rect::try_new(10.0, 0.0, 0.0, 10.0).is_err());
    /// ```
    pub fn try_new(x0: f32, y0: f32, x1: f32, y1: f32) -> Result<Self> {
        let rect = Self::new(x0, y0, x1, y1);
        rect.validate("rectangle")?;
        Ok(rect)
    }

    /// Create the smallest rectangle enclosing two arbitrary corner points.
    pub fn from_corners(ax: f32, ay: f32, bx: f32, by: f32) -> Self {
        Self::new(ax.min(bx), ay.min(by), ax.max(bx), ay.max(by))
    }

    /// Whether the edges are finite and ordered.
    pub fn is_valid(&self) -> bool {
        [self.x0, self.y0, self.x1, self.y1].iter().all(|v| v.is_finite())
            && self.x0 <= self.x1
            && self.y0 <= self.y1
    }

    /// Fail with [`Error::InvalidGeometry`] unless [`Rect::is_valid`] holds.
    pub fn validate(&self, context: &str) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidGeometry {
                context: context.to_string(),
                rect: *self,
            })
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x0
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x1
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y0
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y1
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Compute the area of the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.area(), 5000.0);
    /// ```
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Wider than tall.
    pub fn is_horizontal(&self) -> bool {
        self.width() > self.height()
    }

    /// Taller than wide.
    pub fn is_vertical(&self) -> bool {
        self.height() > self.width()
    }

    /// Closed overlap of the X ranges (shared edges count).
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.x0 <= other.x1 && self.x1 >= other.x0
    }

    /// Closed overlap of the Y ranges (shared edges count).
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.y0 <= other.y1 && self.y1 >= other.y0
    }

    /// Check if this rectangle touches or overlaps another.
    ///
    /// Both axes use closed intervals, so rectangles sharing only an edge or a
    /// corner intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let r2 = Rect::new(100.0, 50.0, 150.0, 60.0);
    /// let r3 = Rect::new(200.0, 200.0, 300.0, 300.0);
    ///
    /// assert!(r1.intersects(&r2));
    /// assert!(!r1.intersects(&r3));
    /// ```
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_horizontally(other) && self.overlaps_vertically(other)
    }

    /// Open overlap: the two rectangles share interior area.
    pub fn overlaps_interior(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && self.x1 > other.x0 && self.y0 < other.y1 && self.y1 > other.y0
    }

    /// Closed geometric containment of `other` inside `self`.
    pub fn encloses(&self, other: &Rect) -> bool {
        self.x0 <= other.x0 && self.x1 >= other.x1 && self.y0 <= other.y0 && self.y1 >= other.y1
    }

    /// Compute the union of this rectangle with another.
    ///
    /// Returns the smallest rectangle that contains both rectangles.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 50.0, 50.0);
    /// let r2 = Rect::new(25.0, 25.0, 75.0, 75.0);
    /// let union = r1.union(&r2);
    ///
    /// assert_eq!(union, Rect::new(0.0, 0.0, 75.0, 75.0));
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Grow the rectangle by `amount` above and below.
    pub fn expand_vertically(&self, amount: f32) -> Rect {
        Rect::new(self.x0, self.y0 - amount, self.x1, self.y1 + amount)
    }

    /// Bounding union of a sequence of rectangles, `None` when empty.
    pub fn bounding<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects.into_iter().fold(None, |acc, r| match acc {
            None => Some(*r),
            Some(b) => Some(b.union(r)),
        })
    }
}
