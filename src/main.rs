//! `license-tally` — list the licenses of a Node project's installed dependencies.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and resolve the render settings ([`config`]).
//! 2. Walk the installed `node_modules` tree ([`analyzer`]).
//! 3. Inspect every package concurrently ([`scanner`]): normalize the declared
//!    license ([`license::spdx`]) and recognize the license file ([`detector`]).
//! 4. Print the summary or the per-package list ([`report`]).
//!
//! Any failure that escapes the per-package handling is printed as
//! `Error: <message>` and the process exits `1`.

mod analyzer;
mod cli;
mod config;
mod detector;
mod license;
mod models;
mod report;
mod scanner;

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use analyzer::node::NodeAnalyzer;
use analyzer::Analyzer;
use cli::Cli;
use config::RenderConfig;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()).await {
        println!("{} {:#}", "Error:".red(), err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = RenderConfig::from_cli(&cli);

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let root = path.clone();
    let entries = tokio::task::spawn_blocking(move || NodeAnalyzer::new().analyze(&root))
        .await
        .context("dependency walk panicked")??;

    eprintln!("  {} Node {} dependencies", "→".cyan(), entries.len());

    let records = scanner::scan(&entries, std::io::stderr().is_terminal()).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::terminal::render(&records, &config, &mut out)?;

    Ok(())
}
