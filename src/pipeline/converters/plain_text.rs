//! Plain text output converter.

use crate::error::Result;
use crate::layout::PageLayout;

use super::OutputConverter;

/// Renders the text of a page in reading order, one line per text component.
#[derive(Debug, Clone, Default)]
pub struct PlainTextConverter {
    indent: bool,
}

impl PlainTextConverter {
    /// Create a converter that emits bare lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent every line by two spaces per tree level above it.
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }
}

impl OutputConverter for PlainTextConverter {
    fn convert(&self, page: &PageLayout) -> Result<String> {
        let mut out = String::new();
        for (id, depth) in page.walk() {
            let Some(text) = page.component(id).text.as_ref() else {
                continue;
            };
            if self.indent {
                out.push_str(&"  ".repeat(depth));
            }
            out.push_str(&text.text);
            out.push('\n');
        }
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "PlainTextConverter"
    }
}
