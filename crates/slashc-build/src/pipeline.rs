//! The emission pipeline: load, describe, serialize and write every entry.

use std::path::{Path, PathBuf};

use serde::Serialize;
use slashc_catalog::{Catalog, CommandRef};
use tracing::{debug, info, warn};

use crate::error::{BuildError, Result};
use crate::events::{BuildEvent, BuildObserver};
use crate::layout::Layout;
use crate::loader::{PromptDocument, load_prompt};

/// A manifest written by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenManifest {
    pub entry: CommandRef,
    pub path: PathBuf,
}

/// Manifests produced for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactGroup {
    pub category: String,
    pub output_dir: PathBuf,
    pub commands: Vec<String>,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub written: Vec<WrittenManifest>,
    pub skipped: Vec<CommandRef>,
    /// Categories with at least one manifest, in build order.
    pub groups: Vec<ArtifactGroup>,
}

impl BuildReport {
    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// True when no entry was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// What happened to a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Written { path: PathBuf },
    Skipped { source_path: PathBuf },
}

/// Builds manifests for every entry of a catalog.
pub struct Pipeline<'a> {
    catalog: &'a Catalog,
    layout: Layout,
}

impl<'a> Pipeline<'a> {
    pub fn new(catalog: &'a Catalog, layout: Layout) -> Self {
        Self { catalog, layout }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Run the build.
    ///
    /// Every entry is visited exactly once, in catalog order. Missing prompt
    /// documents are reported and skipped; I/O failures abort the run.
    pub fn run(&self, observer: &mut dyn BuildObserver) -> Result<BuildReport> {
        self.catalog.validate()?;
        for key in self.catalog.orphan_descriptions() {
            warn!(key, "Description has no matching command");
        }

        info!(
            categories = self.catalog.categories().len(),
            commands = self.catalog.len(),
            output = %self.layout.output_root.display(),
            "Building slash command manifests"
        );

        let mut report = BuildReport::default();

        for category in self.catalog.categories() {
            let output_dir = self.layout.category_output_dir(&category.name);
            ensure_dir(&output_dir)?;
            observer.notify(&BuildEvent::CategoryStarted {
                category: category.name.clone(),
                output_dir: output_dir.clone(),
            });

            let mut produced = Vec::new();
            for command in &category.commands {
                let entry = CommandRef::new(&category.name, command);
                match self.build_entry(&entry)? {
                    EntryOutcome::Written { path } => {
                        observer.notify(&BuildEvent::EntryWritten {
                            entry: entry.clone(),
                            path: path.clone(),
                        });
                        produced.push(command.clone());
                        report.written.push(WrittenManifest { entry, path });
                    }
                    EntryOutcome::Skipped { source_path } => {
                        observer.notify(&BuildEvent::EntrySkipped {
                            entry: entry.clone(),
                            source_path,
                        });
                        report.skipped.push(entry);
                    }
                }
            }

            if !produced.is_empty() {
                report.groups.push(ArtifactGroup {
                    category: category.name.clone(),
                    output_dir,
                    commands: produced,
                });
            }
        }

        info!(
            written = report.written_count(),
            skipped = report.skipped_count(),
            "Build finished"
        );
        observer.notify(&BuildEvent::RunComplete {
            report: report.clone(),
        });

        Ok(report)
    }

    /// Load and serialize one entry without touching the output tree.
    ///
    /// Returns `None` when the entry has no prompt document.
    pub fn render_entry(&self, entry: &CommandRef) -> Result<Option<(PromptDocument, String)>> {
        let Some(document) = load_prompt(&self.layout, entry)? else {
            return Ok(None);
        };
        let description = self
            .catalog
            .resolve_description(&entry.category, &entry.command);
        let text = slashc_manifest::serialize(&description, &document.body).map_err(|source| {
            BuildError::Manifest {
                entry: entry.clone(),
                source,
            }
        })?;
        Ok(Some((document, text)))
    }

    fn build_entry(&self, entry: &CommandRef) -> Result<EntryOutcome> {
        debug!(%entry, "Processing command");

        let Some((document, text)) = self.render_entry(entry)? else {
            let source_path = self.layout.source_path(entry);
            warn!(
                %entry,
                path = %source_path.display(),
                "Prompt document not found, skipping"
            );
            return Ok(EntryOutcome::Skipped { source_path });
        };

        let path = self.layout.output_path(entry);
        std::fs::write(&path, text).map_err(|source| BuildError::Write {
            path: path.clone(),
            source,
        })?;
        info!(%entry, from = %document.path.display(), to = %path.display(), "Wrote manifest");

        Ok(EntryOutcome::Written { path })
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| BuildError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventLog, NoopObserver};

    fn write_source(layout: &Layout, category: &str, command: &str, body: &str) {
        let path = layout.source_path(&CommandRef::new(category, command));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn test_event_order() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::rooted_at(tmp.path());
        write_source(&layout, "alpha", "foo", "foo body");
        write_source(&layout, "beta", "baz", "baz body");

        let catalog = Catalog::new()
            .with_category("alpha", ["foo", "bar"])
            .with_category("beta", ["baz"]);
        let mut log = EventLog::new();
        Pipeline::new(&catalog, layout).run(&mut log).unwrap();

        let kinds: Vec<&str> = log.events().iter().map(BuildEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "category_started",
                "entry_written",
                "entry_skipped",
                "category_started",
                "entry_written",
                "run_complete",
            ]
        );
    }

    #[test]
    fn test_groups_only_list_produced_categories() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::rooted_at(tmp.path());
        write_source(&layout, "beta", "baz", "baz body");

        let catalog = Catalog::new()
            .with_category("alpha", ["foo"])
            .with_category("beta", ["baz", "qux"]);
        let report = Pipeline::new(&catalog, layout.clone())
            .run(&mut NoopObserver)
            .unwrap();

        assert_eq!(
            report.groups,
            vec![ArtifactGroup {
                category: "beta".into(),
                output_dir: layout.category_output_dir("beta"),
                commands: vec!["baz".into()],
            }]
        );
        // Category directories are created even when nothing lands in them.
        assert!(layout.category_output_dir("alpha").is_dir());
        assert!(!report.is_complete());
    }

    #[test]
    fn test_invalid_catalog_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::rooted_at(tmp.path());
        let catalog = Catalog::new()
            .with_category("alpha", ["foo"])
            .with_description("alpha", "foo", "bad \"quote\"");

        let err = Pipeline::new(&catalog, layout.clone())
            .run(&mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, BuildError::Catalog(_)));
        assert!(!layout.output_root.exists());
    }

    #[test]
    fn test_existing_manifest_is_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::rooted_at(tmp.path());
        write_source(&layout, "alpha", "foo", "fresh body");
        let out = layout.output_path(&CommandRef::new("alpha", "foo"));
        std::fs::create_dir_all(out.parent().unwrap()).unwrap();
        std::fs::write(&out, "stale").unwrap();

        let catalog = Catalog::new().with_category("alpha", ["foo"]);
        Pipeline::new(&catalog, layout)
            .run(&mut NoopObserver)
            .unwrap();

        let text = std::fs::read_to_string(out).unwrap();
        assert!(text.contains("fresh body"));
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_output_dir_blocked_by_file_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::rooted_at(tmp.path());
        write_source(&layout, "alpha", "foo", "body");
        std::fs::create_dir_all(&layout.output_root).unwrap();
        std::fs::write(layout.category_output_dir("alpha"), "not a dir").unwrap();

        let catalog = Catalog::new().with_category("alpha", ["foo"]);
        let err = Pipeline::new(&catalog, layout.clone())
            .run(&mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, BuildError::CreateDir { .. }));
        assert_eq!(err.path(), Some(layout.category_output_dir("alpha").as_path()));
    }

    #[test]
    fn test_write_failure_is_fatal_and_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::rooted_at(tmp.path());
        write_source(&layout, "alpha", "foo", "body");
        let out = layout.output_path(&CommandRef::new("alpha", "foo"));
        // A directory where the manifest should go.
        std::fs::create_dir_all(&out).unwrap();

        let catalog = Catalog::new().with_category("alpha", ["foo"]);
        let mut log = EventLog::new();
        let err = Pipeline::new(&catalog, layout)
            .run(&mut log)
            .unwrap_err();

        assert!(matches!(err, BuildError::Write { .. }));
        assert_eq!(err.path(), Some(out.as_path()));
        assert!(err.to_string().contains(&out.display().to_string()));

        let kinds: Vec<&str> = log.events().iter().map(BuildEvent::kind).collect();
        assert_eq!(kinds, vec!["category_started"]);
    }

    #[test]
    fn test_render_entry_does_not_write() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::rooted_at(tmp.path());
        write_source(&layout, "alpha", "foo", "body");
        let catalog = Catalog::new().with_category("alpha", ["foo"]);
        let pipeline = Pipeline::new(&catalog, layout.clone());

        let (doc, text) = pipeline
            .render_entry(&CommandRef::new("alpha", "foo"))
            .unwrap()
            .unwrap();
        assert_eq!(doc.body, "body");
        assert!(text.starts_with("description = \"Execute foo command\"\n"));
        assert!(!layout.output_root.exists());
    }
}
