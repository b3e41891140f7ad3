//! Build events and the observer interface the pipeline reports through.
//!
//! The pipeline never prints. Front ends subscribe with a [`BuildObserver`]
//! and render events however they like.

use std::path::PathBuf;

use serde::Serialize;
use slashc_catalog::CommandRef;

use crate::pipeline::BuildReport;

/// Progress events emitted during a build, in order.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildEvent {
    /// The output directory of a category is ready and its entries follow.
    CategoryStarted {
        category: String,
        output_dir: PathBuf,
    },
    /// A manifest was written (or overwritten).
    EntryWritten { entry: CommandRef, path: PathBuf },
    /// No prompt document exists for the entry; nothing was written.
    EntrySkipped {
        entry: CommandRef,
        source_path: PathBuf,
    },
    /// Every entry has been processed.
    RunComplete { report: BuildReport },
}

impl BuildEvent {
    /// Event type name, as used in the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            BuildEvent::CategoryStarted { .. } => "category_started",
            BuildEvent::EntryWritten { .. } => "entry_written",
            BuildEvent::EntrySkipped { .. } => "entry_skipped",
            BuildEvent::RunComplete { .. } => "run_complete",
        }
    }
}

/// Receives build events synchronously, in emission order.
pub trait BuildObserver {
    fn notify(&mut self, event: &BuildEvent);
}

impl<F> BuildObserver for F
where
    F: FnMut(&BuildEvent),
{
    fn notify(&mut self, event: &BuildEvent) {
        self(event)
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {
    fn notify(&mut self, _event: &BuildEvent) {}
}

/// Observer that records every event.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<BuildEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BuildEvent] {
        &self.events
    }

    /// Entries reported as written, in order.
    pub fn written(&self) -> Vec<&CommandRef> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BuildEvent::EntryWritten { entry, .. } => Some(entry),
                _ => None,
            })
            .collect()
    }

    /// Entries reported as skipped, in order.
    pub fn skipped(&self) -> Vec<&CommandRef> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BuildEvent::EntrySkipped { entry, .. } => Some(entry),
                _ => None,
            })
            .collect()
    }
}

impl BuildObserver for EventLog {
    fn notify(&mut self, event: &BuildEvent) {
        self.events.push(event.clone());
    }
}
