//! Core error types for the evalex-util crate.

use thiserror::Error;

/// Error type for symbol interning operations.
#[derive(Debug, Error)]
pub enum SymbolError {
    /// Symbol not found in the interner
    #[error("symbol not found: index {index}")]
    NotFound { index: u32 },
}

/// Result type alias for symbol operations
pub type SymbolResult<T> = std::result::Result<T, SymbolError>;
