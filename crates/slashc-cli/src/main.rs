mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use slashc_build::{Layout, Pipeline};
use slashc_catalog::builtin_catalog;

use crate::render::{ConsoleReporter, JsonLines};

const EXIT_OK: u8 = 0;
/// Fatal error, or `--check` found stale manifests.
const EXIT_FAILURE: u8 = 1;
/// `--strict` run that skipped commands.
const EXIT_SKIPPED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "slashc",
    about = "Compile prompt documents into slash command manifests",
    version
)]
struct Cli {
    /// Project root holding `commands/` (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Verify the manifests are up to date without writing anything
    #[arg(long)]
    check: bool,

    /// Exit with status 2 when any command had no prompt document
    #[arg(long)]
    strict: bool,

    /// Print events as JSON lines instead of the text report
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr, stdout carries the report.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let root = match &cli.root {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to resolve the current directory")?,
    };

    let catalog = builtin_catalog();
    let pipeline = Pipeline::new(&catalog, Layout::rooted_at(&root));

    if cli.check {
        let report = pipeline.check().context("manifest check failed")?;
        if cli.json {
            render::emit(&render::render_check_json(&report)?);
        } else {
            render::emit(&render::render_check(&report, &root));
        }
        return Ok(if report.is_clean() {
            EXIT_OK
        } else {
            EXIT_FAILURE
        });
    }

    let report = if cli.json {
        pipeline.run(&mut JsonLines)
    } else {
        pipeline.run(&mut ConsoleReporter::new(&root))
    }
    .context("manifest build failed")?;

    if cli.strict && !report.is_complete() {
        tracing::warn!(
            skipped = report.skipped_count(),
            "Strict mode: some commands were skipped"
        );
        return Ok(EXIT_SKIPPED);
    }

    Ok(EXIT_OK)
}
