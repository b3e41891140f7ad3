//! Prompt document loading.

use std::io::ErrorKind;
use std::path::PathBuf;

use slashc_catalog::CommandRef;

use crate::error::{BuildError, Result};
use crate::layout::Layout;

/// Raw prompt text for one command entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDocument {
    pub entry: CommandRef,
    pub path: PathBuf,
    /// File content, unmodified.
    pub body: String,
}

/// Load the prompt document for `entry`.
///
/// Returns `Ok(None)` when no document exists at the conventional path.
/// Any other read failure is an error.
pub fn load_prompt(layout: &Layout, entry: &CommandRef) -> Result<Option<PromptDocument>> {
    let path = layout.source_path(entry);
    match std::fs::read_to_string(&path) {
        Ok(body) => Ok(Some(PromptDocument {
            entry: entry.clone(),
            path,
            body,
        })),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(BuildError::Read { path, source }),
    }
}
