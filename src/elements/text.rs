//! Text element types.
//!
//! A [`TextRun`] is what one "show text" operation produced: glyphs in drawing
//! order sharing a font. Glyph fusion turns runs into [`TextFragment`]s, the
//! unit the rest of the layout engine works with.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// One positioned glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// Unicode text the glyph maps to (usually one character)
    pub text: String,
    /// Glyph box; `y1` is the baseline
    pub bbox: Rect,
}

impl Glyph {
    /// Create a glyph from its box.
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }

    /// Create a glyph from its baseline origin and advance box.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::elements::Glyph;
    ///
    /// let g = Glyph::at_baseline("A", 10.0, 100.0, 6.0, 12.0);
    /// assert_eq!(g.bbox.y0, 88.0);
    /// assert_eq!(g.bbox.y1, 100.0);
    /// ```
    pub fn at_baseline(
        text: impl Into<String>,
        x: f32,
        baseline: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self::new(text, Rect::new(x, baseline - height, x + width, baseline))
    }
}

/// Glyphs emitted by one decoder text operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Glyphs in drawing order
    pub glyphs: Vec<Glyph>,
    /// Base font name
    #[serde(default)]
    pub font_name: String,
    /// Font size in points
    #[serde(default)]
    pub font_size: f32,
}

impl TextRun {
    /// Create a run.
    pub fn new(glyphs: Vec<Glyph>, font_name: impl Into<String>, font_size: f32) -> Self {
        Self {
            glyphs,
            font_name: font_name.into(),
            font_size,
        }
    }
}

/// A consolidated piece of text on one visual line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Bounding box
    pub bbox: Rect,
    /// Resolved text
    pub text: String,
    /// Base font name
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
}

impl TextFragment {
    /// Create a fragment.
    pub fn new(
        text: impl Into<String>,
        bbox: Rect,
        font_name: impl Into<String>,
        font_size: f32,
    ) -> Self {
        Self {
            bbox,
            text: text.into(),
            font_name: font_name.into(),
            font_size,
        }
    }

    /// Number of Unicode scalar values in the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Width divided by the character count (at least one).
    ///
    /// # Examples
    ///
    /// ```
    /// use page_oxide::elements::TextFragment;
    /// use page_oxide::geometry::Rect;
    ///
    /// let f = TextFragment::new("AB", Rect::new(0.0, 0.0, 5.0, 5.0), "Times", 5.0);
    /// assert_eq!(f.avg_char_width(), 2.5);
    /// ```
    pub fn avg_char_width(&self) -> f32 {
        self.bbox.width() / self.char_count().max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_char_width_empty_text() {
        let f = TextFragment::new("", Rect::new(0.0, 0.0, 4.0, 5.0), "Times", 5.0);
        assert_eq!(f.char_count(), 0);
        assert_eq!(f.avg_char_width(), 4.0);
    }

    #[test]
    fn test_avg_char_width_multibyte() {
        let f = TextFragment::new("ºª", Rect::new(0.0, 0.0, 4.0, 5.0), "Times", 5.0);
        assert_eq!(f.char_count(), 2);
        assert_eq!(f.avg_char_width(), 2.0);
    }
}
