//! slashc-manifest: serialization of slash-command manifests.
//!
//! A manifest is a small TOML document:
//!
//! ```text
//! description = "Write a conventional commit message for staged changes"
//!
//! prompt = """
//! <prompt body, escaped>
//! """
//! ```
//!
//! The prompt body is embedded in a multi-line basic string, so it is
//! escaped with [`escape_prompt_body`] first. [`unescape_prompt_body`] is
//! the exact inverse.

pub mod document;
pub mod escape;

use thiserror::Error;

pub use document::{ManifestDocument, check_description, serialize};
pub use escape::{DELIMITER, escape_prompt_body, unescape_prompt_body};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Invalid description {description:?}: {reason}")]
    InvalidDescription {
        description: String,
        reason: &'static str,
    },
    #[error("Invalid escape at byte {position}: {reason}")]
    InvalidEscape {
        position: usize,
        reason: &'static str,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ManifestError>;
