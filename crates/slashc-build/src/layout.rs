//! Where prompt documents are read from and manifests are written to.

use std::path::{Path, PathBuf};

use slashc_catalog::CommandRef;

/// Source root, relative to the project root.
pub const DEFAULT_COMMANDS_DIR: &str = "commands";
/// Output root the external host scans for manifests.
pub const DEFAULT_OUTPUT_DIR: &str = ".gemini/commands";

/// Input and output locations of a build.
///
/// Paths are derived from `(category, command)` alone:
/// `<commands_root>/<category>/<command>.<source_extension>` in,
/// `<output_root>/<category>/<command>.<manifest_extension>` out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub commands_root: PathBuf,
    pub output_root: PathBuf,
    pub source_extension: String,
    pub manifest_extension: String,
}

fn default_source_extension() -> String {
    "md".to_string()
}

fn default_manifest_extension() -> String {
    "toml".to_string()
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            commands_root: PathBuf::from(DEFAULT_COMMANDS_DIR),
            output_root: PathBuf::from(DEFAULT_OUTPUT_DIR),
            source_extension: default_source_extension(),
            manifest_extension: default_manifest_extension(),
        }
    }
}

impl Layout {
    /// Default layout under a project root.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            commands_root: root.join(DEFAULT_COMMANDS_DIR),
            output_root: root.join(DEFAULT_OUTPUT_DIR),
            ..Self::default()
        }
    }

    pub fn source_path(&self, entry: &CommandRef) -> PathBuf {
        self.commands_root
            .join(&entry.category)
            .join(format!("{}.{}", entry.command, self.source_extension))
    }

    pub fn category_output_dir(&self, category: &str) -> PathBuf {
        self.output_root.join(category)
    }

    pub fn output_path(&self, entry: &CommandRef) -> PathBuf {
        self.category_output_dir(&entry.category)
            .join(format!("{}.{}", entry.command, self.manifest_extension))
    }
}
