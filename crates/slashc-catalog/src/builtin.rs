//! The command catalogue compiled into `slashc`.
//!
//! Adding or removing an id here is the only way to change what a build
//! produces. A command without a row in [`BUILTIN_DESCRIPTIONS`] gets the
//! generated fallback description.

use crate::registry::Catalog;

/// Categories and their command ids, in build order.
pub const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "analyze",
        &["architecture", "dependencies", "performance", "security", "complexity"],
    ),
    ("dev", &["implement", "refactor", "debug", "review", "explain"]),
    ("docs", &["api", "readme", "changelog", "adr", "review"]),
    ("git", &["commit", "pr", "branch-cleanup", "release-notes"]),
    ("test", &["unit", "integration", "e2e", "coverage", "fix-flaky"]),
    ("ops", &["deploy", "dockerize", "ci", "incident"]),
];

/// Descriptions as `(category, command, text)`.
pub const BUILTIN_DESCRIPTIONS: &[(&str, &str, &str)] = &[
    ("analyze", "architecture", "Map the system architecture and its module boundaries"),
    ("analyze", "dependencies", "Audit third-party dependencies for risk and bloat"),
    ("analyze", "performance", "Find performance bottlenecks and propose fixes"),
    ("analyze", "security", "Review the codebase for security vulnerabilities"),
    ("dev", "implement", "Implement a feature from a written description"),
    ("dev", "refactor", "Refactor code while preserving its behavior"),
    ("dev", "debug", "Diagnose a bug from symptoms to root cause"),
    ("dev", "review", "Review code changes for correctness and style"),
    ("docs", "api", "Generate API reference documentation"),
    ("docs", "readme", "Write or update the project README"),
    ("docs", "changelog", "Draft changelog entries from recent changes"),
    ("docs", "adr", "Record an architecture decision"),
    ("git", "commit", "Write a conventional commit message for staged changes"),
    ("git", "pr", "Prepare a pull request title and description"),
    ("git", "branch-cleanup", "List and prune merged or stale branches"),
    ("test", "unit", "Write unit tests for the selected code"),
    ("test", "integration", "Write integration tests across module boundaries"),
    ("test", "e2e", "Write end-to-end tests for a user flow"),
    ("test", "coverage", "Find untested code paths and cover them"),
    ("ops", "deploy", "Walk through a safe deployment checklist"),
    ("ops", "dockerize", "Containerize the application with a production Dockerfile"),
    ("ops", "ci", "Set up or fix the continuous integration pipeline"),
];

/// Build the compiled-in catalogue.
pub fn builtin_catalog() -> Catalog {
    let catalog = BUILTIN_CATEGORIES
        .iter()
        .fold(Catalog::new(), |catalog, (name, commands)| {
            catalog.with_category(*name, commands.iter().copied())
        });

    BUILTIN_DESCRIPTIONS
        .iter()
        .fold(catalog, |catalog, (category, command, text)| {
            catalog.with_description(category, command, *text)
        })
}
