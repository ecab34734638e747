//! Decoder-facing page elements.
//!
//! These are the primitives an external content-stream decoder hands to the
//! layout engine for one page: stroked lines, filled rectangles and runs of
//! positioned glyphs. After glyph fusion, runs become [`TextFragment`]s.
//!
//! ## Example
//!
//! ```
//! use page_oxide::elements::{GraphicPrimitive, Glyph, TextRun};
//!
//! let rule = GraphicPrimitive::line(0.0, 100.0, 500.0, 100.0);
//! let run = TextRun::new(
//!     vec![Glyph::at_baseline("H", 10.0, 90.0, 6.0, 10.0)],
//!     "Times-Roman",
//!     10.0,
//! );
//! assert!(rule.bbox.is_horizontal());
//! assert_eq!(run.glyphs.len(), 1);
//! ```

mod graphic;
mod text;

pub use graphic::{GraphicPrimitive, PrimitiveKind};
pub use text::{Glyph, TextFragment, TextRun};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Everything the decoder reports for one page, in extraction order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageInput {
    /// Stroked lines and filled rectangles
    #[serde(default)]
    pub graphics: Vec<GraphicPrimitive>,
    /// Glyph runs, one per "show text" operation
    #[serde(default)]
    pub text_runs: Vec<TextRun>,
}

impl PageInput {
    /// Create an input from graphics and text runs.
    pub fn new(graphics: Vec<GraphicPrimitive>, text_runs: Vec<TextRun>) -> Self {
        Self {
            graphics,
            text_runs,
        }
    }

    /// Number of graphic primitives plus glyphs.
    pub fn primitive_count(&self) -> usize {
        self.graphics.len() + self.text_runs.iter().map(|r| r.glyphs.len()).sum::<usize>()
    }

    /// Reject malformed rectangles before any layout stage sees them.
    pub fn validate(&self) -> Result<()> {
        for (i, graphic) in self.graphics.iter().enumerate() {
            graphic.bbox.validate(&format!("graphic #{}", i))?;
        }
        for (r, run) in self.text_runs.iter().enumerate() {
            for (g, glyph) in run.glyphs.iter().enumerate() {
                glyph.bbox.validate(&format!("glyph #{} of text run #{}", g, r))?;
            }
        }
        Ok(())
    }
}
