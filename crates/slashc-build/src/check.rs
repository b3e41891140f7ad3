//! Up-to-date check: compare what a build would write with what is on disk.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use slashc_catalog::CommandRef;
use tracing::{debug, warn};

use crate::error::{BuildError, Result};
use crate::pipeline::Pipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// The manifest on disk matches a fresh build byte for byte.
    UpToDate,
    /// The manifest exists but differs.
    Stale,
    /// The prompt document exists but no manifest was written for it.
    Missing,
    /// No prompt document, so nothing is expected on disk.
    SourceMissing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedEntry {
    pub entry: CommandRef,
    pub output_path: PathBuf,
    pub status: EntryStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub entries: Vec<CheckedEntry>,
}

impl CheckReport {
    /// True when every manifest that a build would write is present and current.
    pub fn is_clean(&self) -> bool {
        self.out_of_date().next().is_none()
    }

    pub fn count(&self, status: EntryStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// Entries whose manifest is stale or missing.
    pub fn out_of_date(&self) -> impl Iterator<Item = &CheckedEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, EntryStatus::Stale | EntryStatus::Missing))
    }
}

impl Pipeline<'_> {
    /// Render every entry in memory and compare against the output tree.
    ///
    /// Nothing is written.
    pub fn check(&self) -> Result<CheckReport> {
        self.catalog().validate()?;

        let mut report = CheckReport::default();
        for entry in self.catalog().entries() {
            let output_path = self.layout().output_path(&entry);
            let status = match self.render_entry(&entry)? {
                None => EntryStatus::SourceMissing,
                Some((_, expected)) => match std::fs::read(&output_path) {
                    Ok(actual) if actual == expected.as_bytes() => EntryStatus::UpToDate,
                    Ok(_) => EntryStatus::Stale,
                    Err(e) if e.kind() == ErrorKind::NotFound => EntryStatus::Missing,
                    Err(source) => {
                        return Err(BuildError::Read {
                            path: output_path,
                            source,
                        });
                    }
                },
            };

            match status {
                EntryStatus::Stale | EntryStatus::Missing => {
                    warn!(%entry, path = %output_path.display(), ?status, "Manifest out of date")
                }
                _ => debug!(%entry, ?status, "Checked manifest"),
            }

            report.entries.push(CheckedEntry {
                entry,
                output_path,
                status,
            });
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoopObserver;
    use crate::layout::Layout;
    use slashc_catalog::Catalog;

    fn write_source(layout: &Layout, category: &str, command: &str, body: &str) {
        let path = layout.source_path(&CommandRef::new(category, command));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn test_check_before_and_after_build() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::rooted_at(tmp.path());
        write_source(&layout, "alpha", "foo", "foo body");
        let catalog = Catalog::new().with_category("alpha", ["foo", "bar"]);
        let pipeline = Pipeline::new(&catalog, layout);

        let before = pipeline.check().unwrap();
        assert!(!before.is_clean());
        assert_eq!(before.count(EntryStatus::Missing), 1);
        assert_eq!(before.count(EntryStatus::SourceMissing), 1);

        pipeline.run(&mut NoopObserver).unwrap();

        let after = pipeline.check().unwrap();
        assert!(after.is_clean());
        assert_eq!(after.count(EntryStatus::UpToDate), 1);
        assert_eq!(after.count(EntryStatus::SourceMissing), 1);
    }

    #[test]
    fn test_check_detects_edited_source() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::rooted_at(tmp.path());
        write_source(&layout, "alpha", "foo", "v1");
        let catalog = Catalog::new().with_category("alpha", ["foo"]);
        let pipeline = Pipeline::new(&catalog, layout.clone());
        pipeline.run(&mut NoopObserver).unwrap();

        write_source(&layout, "alpha", "foo", "v2");
        let report = pipeline.check().unwrap();
        let stale: Vec<&CheckedEntry> = report.out_of_date().collect();
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].status, EntryStatus::Stale);
        assert_eq!(stale[0].entry, CommandRef::new("alpha", "foo"));
    }

    #[test]
    fn test_check_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = Layout::rooted_at(tmp.path());
        write_source(&layout, "alpha", "foo", "body");
        let catalog = Catalog::new().with_category("alpha", ["foo"]);
        Pipeline::new(&catalog, layout.clone()).check().unwrap();
        assert!(!layout.output_root.exists());
    }
}
