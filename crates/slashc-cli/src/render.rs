//! Text and JSON rendering of build events.

use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use slashc_build::{BuildEvent, BuildObserver, BuildReport, CheckReport, EntryStatus};

/// How many example invocations the summary lists.
const MAX_EXAMPLES: usize = 3;

/// Prints a human-readable progress report to stdout.
pub struct ConsoleReporter {
    root: PathBuf,
}

impl ConsoleReporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BuildObserver for ConsoleReporter {
    fn notify(&mut self, event: &BuildEvent) {
        emit(&render_event(event, &self.root));
    }
}

/// Prints every event as one JSON object per line.
pub struct JsonLines;

impl BuildObserver for JsonLines {
    fn notify(&mut self, event: &BuildEvent) {
        match serde_json::to_string(event) {
            Ok(line) => emit(&format!("{line}\n")),
            Err(e) => tracing::error!(kind = event.kind(), "Failed to serialize event: {e}"),
        }
    }
}

/// Write report text to stdout.
///
/// A reader that went away (`slashc | head`) ends the output quietly.
pub fn emit(text: &str) {
    let mut out = io::stdout().lock();
    if let Err(e) = write_report(&mut out, text) {
        tracing::error!("Failed to write report: {e}");
    }
}

fn write_report(out: &mut impl io::Write, text: &str) -> io::Result<()> {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Text for one event. Paths are shown relative to `root` when possible.
pub fn render_event(event: &BuildEvent, root: &Path) -> String {
    match event {
        BuildEvent::CategoryStarted { category, .. } => format!("\n📁 {category}\n"),
        BuildEvent::EntryWritten { entry, path } => {
            format!("  ✓ {} → {}\n", entry.command, display_path(path, root))
        }
        BuildEvent::EntrySkipped { entry, source_path } => format!(
            "  ⚠ {entry}: {} not found, skipping\n",
            display_path(source_path, root)
        ),
        BuildEvent::RunComplete { report } => render_summary(report, root),
    }
}

/// Final block: count, produced directories and example invocations.
pub fn render_summary(report: &BuildReport, root: &Path) -> String {
    let mut out = String::new();

    let _ = write!(out, "\nGenerated {} command manifests", report.written_count());
    if report.skipped_count() > 0 {
        let _ = write!(out, " ({} skipped)", report.skipped_count());
    }
    out.push('\n');

    if report.groups.is_empty() {
        return out;
    }

    out.push_str("\nOutput:\n");
    for group in &report.groups {
        let _ = writeln!(
            out,
            "  {}/  {}",
            display_path(&group.output_dir, root),
            group.commands.join(", ")
        );
    }

    out.push_str("\nTry:\n");
    for written in report.written.iter().take(MAX_EXAMPLES) {
        let _ = writeln!(out, "  {}", written.entry.invocation());
    }

    out
}

/// Text report for `--check`.
pub fn render_check(report: &CheckReport, root: &Path) -> String {
    let mut out = String::new();

    for checked in report.out_of_date() {
        let label = match checked.status {
            EntryStatus::Stale => "stale",
            _ => "missing",
        };
        let _ = writeln!(
            out,
            "  ✗ {} ({label}): {}",
            checked.entry,
            display_path(&checked.output_path, root)
        );
    }

    if report.is_clean() {
        let _ = writeln!(
            out,
            "All {} manifests are up to date",
            report.count(EntryStatus::UpToDate)
        );
    } else {
        let _ = writeln!(
            out,
            "{} stale, {} missing; run slashc to regenerate",
            report.count(EntryStatus::Stale),
            report.count(EntryStatus::Missing)
        );
    }

    out
}

/// JSON report for `--check --json`: one object on one line.
pub fn render_check_json(report: &CheckReport) -> serde_json::Result<String> {
    Ok(format!("{}\n", serde_json::to_string(report)?))
}

fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
