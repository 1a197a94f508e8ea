//! srcgraph command-line entry point.
//!
//! Usage: `srcgraph --root <path> [--projectName <name>] [--repoId <id>]
//! [--out <path>]`. Diagnostics go to stderr (filtered via `RUST_LOG`);
//! stdout carries only the JSON document when `--out` is absent.

mod args;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use srcgraph_core::pipeline::{extract, ExtractOptions};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let flags = args::parse(std::env::args().skip(1));

    // The only fatal precondition: a usable --root.
    let Some(root) = flags.get_non_blank("root") else {
        eprintln!("Missing required arg: --root");
        return ExitCode::from(2);
    };

    match run(root, &flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("srcgraph: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(root: &str, flags: &args::Flags) -> anyhow::Result<()> {
    let options = ExtractOptions {
        project_name: flags.get_non_blank("projectName").map(str::to_string),
        repo_id: flags.get_non_blank("repoId").map(str::to_string),
    };

    let graph = extract(Path::new(root), &options)
        .with_context(|| format!("failed to extract graph from {root}"))?;
    let json = graph.to_json_pretty().context("failed to serialize graph")?;

    match flags.get_non_blank("out") {
        Some(out) => std::fs::write(out, json)
            .with_context(|| format!("failed to write output to {out}"))?,
        None => println!("{json}"),
    }
    Ok(())
}
