//! slashc-build: turns prompt documents into slash-command manifests.
//!
//! For every entry of a [`Catalog`](slashc_catalog::Catalog) the
//! [`Pipeline`] reads `commands/<category>/<command>.md`, resolves the
//! entry's description, serializes a manifest and writes it to
//! `.gemini/commands/<category>/<command>.toml`. Entries without a prompt
//! document are skipped and reported; filesystem failures abort the run.
//!
//! Progress is reported through [`BuildObserver`] events rather than
//! printed, so front ends decide how to render it.

pub mod check;
pub mod error;
pub mod events;
pub mod layout;
pub mod loader;
pub mod pipeline;

pub use check::{CheckReport, CheckedEntry, EntryStatus};
pub use error::{BuildError, Result};
pub use events::{BuildEvent, BuildObserver, EventLog, NoopObserver};
pub use layout::{DEFAULT_COMMANDS_DIR, DEFAULT_OUTPUT_DIR, Layout};
pub use loader::{PromptDocument, load_prompt};
pub use pipeline::{ArtifactGroup, BuildReport, EntryOutcome, Pipeline, WrittenManifest};
