//! Output converters for analyzed pages.
//!
//! This module provides converters that render a [`PageLayout`] as text:
//! - **Plain text**: one line per text component, in reading order
//! - **JSON**: the full component tree

mod json;
mod plain_text;

pub use json::JsonConverter;
pub use plain_text::PlainTextConverter;

use crate::error::Result;
use crate::layout::PageLayout;

/// Trait for rendering an analyzed page.
pub trait OutputConverter: Send + Sync {
    /// Render one page.
    fn convert(&self, page: &PageLayout) -> Result<String>;

    /// Render several pages, one after the other.
    fn convert_all(&self, pages: &[PageLayout]) -> Result<String> {
        let mut out = String::new();
        for page in pages {
            out.push_str(&self.convert(page)?);
        }
        Ok(out)
    }

    /// Return the name of this converter for debugging.
    fn name(&self) -> &'static str;
}
