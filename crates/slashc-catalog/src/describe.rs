//! Description resolution with a generated fallback.

use std::borrow::Cow;

use crate::registry::Catalog;

/// Description used when the table has no entry for a command.
pub fn fallback_description(command: &str) -> String {
    format!("Execute {command} command")
}

impl Catalog {
    /// Explicit description for `category/command`, if the table has one.
    pub fn description_for(&self, category: &str, command: &str) -> Option<&str> {
        self.descriptions
            .get(&format!("{category}/{command}"))
            .map(String::as_str)
    }

    /// Resolve the one-line description for an entry.
    ///
    /// Never fails: table misses fall back to [`fallback_description`].
    pub fn resolve_description(&self, category: &str, command: &str) -> Cow<'_, str> {
        match self.description_for(category, command) {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(fallback_description(command)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_description_wins() {
        let catalog = Catalog::new()
            .with_category("alpha", ["foo", "bar"])
            .with_description("alpha", "foo", "Do foo");
        assert_eq!(catalog.resolve_description("alpha", "foo"), "Do foo");
    }

    #[test]
    fn test_missing_description_uses_fallback() {
        let catalog = Catalog::new()
            .with_category("alpha", ["foo", "bar"])
            .with_description("alpha", "foo", "Do foo");
        assert_eq!(
            catalog.resolve_description("alpha", "bar"),
            "Execute bar command"
        );
        assert!(catalog.description_for("alpha", "bar").is_none());
    }

    #[test]
    fn test_lookup_is_scoped_by_category() {
        let catalog = Catalog::new()
            .with_category("alpha", ["foo"])
            .with_category("beta", ["foo"])
            .with_description("alpha", "foo", "Do foo");
        assert_eq!(catalog.resolve_description("beta", "foo"), "Execute foo command");
    }
}
