//! Error types for the layout engine.
//!
//! The layout pipeline is a pure transformation over decoder output, so the
//! only failures are rejected inputs and resource limits.

use crate::geometry::Rect;

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing a page layout.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rectangle violates `x0 <= x1`, `y0 <= y1` or has non-finite coordinates.
    #[error("Invalid geometry in {context}: ({:.3}, {:.3}, {:.3}, {:.3})", rect.x0, rect.y0, rect.x1, rect.y1)]
    InvalidGeometry {
        /// Where the rectangle was found (e.g. "graphic #3")
        context: String,
        /// The offending rectangle
        rect: Rect,
    },

    /// A page carries more primitives than the configured limit.
    #[error("Page has {count} primitives, limit is {limit}")]
    TooManyPrimitives {
        /// Number of graphic primitives plus glyphs on the page
        count: usize,
        /// Configured maximum
        limit: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
