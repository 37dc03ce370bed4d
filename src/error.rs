//! Error types for pith operations.
//!
//! Analysis itself never fails: every strategy degrades to a lower-confidence
//! result or a terminal "not found". These errors surface only from
//! individual strategies inside the fallback chain (where they are logged and
//! swallowed) and from the CLI's I/O.

use thiserror::Error;

/// Errors that can occur during content extraction.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CSS selector: {0}")]
    SelectorParse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
