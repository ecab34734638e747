//! JSON output converter.

use crate::error::Result;
use crate::layout::PageLayout;

use super::OutputConverter;

/// Serializes the full component tree of a page.
#[derive(Debug, Clone, Default)]
pub struct JsonConverter {
    pretty: bool,
}

impl JsonConverter {
    /// Create a compact JSON converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty-print the output.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl OutputConverter for JsonConverter {
    fn convert(&self, page: &PageLayout) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(page)?
        } else {
            serde_json::to_string(page)?
        };
        Ok(json)
    }

    fn convert_all(&self, pages: &[PageLayout]) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(pages)?
        } else {
            serde_json::to_string(pages)?
        };
        Ok(json)
    }

    fn name(&self) -> &'static str {
        "JsonConverter"
    }
}
