//! Command registry: categories and the command ids each one must produce.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid category name '{0}'")]
    InvalidCategory(String),
    #[error("Invalid command id '{command}' in category '{category}'")]
    InvalidCommand { category: String, command: String },
    #[error("Duplicate category '{0}'")]
    DuplicateCategory(String),
    #[error("Duplicate command '{command}' in category '{category}'")]
    DuplicateCommand { category: String, command: String },
    #[error("Invalid description for {key}: {reason}")]
    InvalidDescription { key: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Identity of a single command entry.
///
/// Command ids are only unique within their category, so both halves are
/// needed to address an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CommandRef {
    pub category: String,
    pub command: String,
}

impl CommandRef {
    pub fn new(category: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            command: command.into(),
        }
    }

    /// Composite key used by the description table (`category/command`).
    pub fn key(&self) -> String {
        format!("{}/{}", self.category, self.command)
    }

    /// How the external host invokes this command (`/category:command`).
    pub fn invocation(&self) -> String {
        format!("/{}:{}", self.category, self.command)
    }
}

impl fmt::Display for CommandRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.command)
    }
}

/// A named group of command ids, in build order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub commands: Vec<String>,
}

/// The immutable set of commands a build is expected to produce, together
/// with their one-line descriptions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    /// Keyed by `category/command`.
    pub(crate) descriptions: HashMap<String, String>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a category with its ordered command ids.
    pub fn with_category<I, S>(mut self, name: impl Into<String>, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.push(Category {
            name: name.into(),
            commands: commands.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Register an explicit description for `category/command`.
    pub fn with_description(
        mut self,
        category: &str,
        command: &str,
        text: impl Into<String>,
    ) -> Self {
        self.descriptions
            .insert(format!("{category}/{command}"), text.into());
        self
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every entry, in category order then command order.
    pub fn entries(&self) -> impl Iterator<Item = CommandRef> + '_ {
        self.categories.iter().flat_map(|category| {
            category
                .commands
                .iter()
                .map(move |command| CommandRef::new(&category.name, command))
        })
    }

    /// Number of command entries across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.commands.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Description keys that name no registry entry, sorted.
    pub fn orphan_descriptions(&self) -> Vec<&str> {
        let known: HashSet<String> = self.entries().map(|e| e.key()).collect();
        let mut orphans: Vec<&str> = self
            .descriptions
            .keys()
            .filter(|key| !known.contains(key.as_str()))
            .map(String::as_str)
            .collect();
        orphans.sort_unstable();
        orphans
    }

    /// Check identifier and description rules.
    ///
    /// Identifiers end up as path components and inside the fallback
    /// description, descriptions are emitted verbatim inside a quoted string.
    pub fn validate(&self) -> Result<()> {
        let mut seen_categories = HashSet::new();
        for category in &self.categories {
            if !is_valid_identifier(&category.name) {
                return Err(CatalogError::InvalidCategory(category.name.clone()));
            }
            if !seen_categories.insert(category.name.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }

            let mut seen_commands = HashSet::new();
            for command in &category.commands {
                if !is_valid_identifier(command) {
                    return Err(CatalogError::InvalidCommand {
                        category: category.name.clone(),
                        command: command.clone(),
                    });
                }
                if !seen_commands.insert(command.as_str()) {
                    return Err(CatalogError::DuplicateCommand {
                        category: category.name.clone(),
                        command: command.clone(),
                    });
                }
            }
        }

        let mut keys: Vec<&String> = self.descriptions.keys().collect();
        keys.sort_unstable();
        for key in keys {
            slashc_manifest::check_description(&self.descriptions[key]).map_err(|reason| {
                CatalogError::InvalidDescription {
                    key: key.clone(),
                    reason,
                }
            })?;
        }

        Ok(())
    }
}

/// Category names and command ids: ASCII alphanumerics, `-` and `_`,
/// not starting with `-`.
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
