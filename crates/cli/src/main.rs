//! Recast CLI
//!
//! Runs a refactoring job against a local project directory, without the
//! HTTP server. Connection settings for the rewrite service come from the
//! `RECAST_API_URL` / `RECAST_API_KEY` environment variables.
//!
//! ```text
//! recast --language java --source ./legacy --out ./modernized --archive
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use recast_pipeline::{run_job, JobLimits, LanguageMode};
use recast_rewrite::{OpenAiRewriter, RewriteConfig};

#[derive(Parser, Debug)]
#[command(
    name = "recast",
    about = "Rewrites a legacy project tree through an external code-modernization service"
)]
struct Cli {
    /// Target language mode: java or nodejs.
    #[arg(long)]
    language: String,

    /// Project directory to read.
    #[arg(long)]
    source: PathBuf,

    /// Destination directory for the rewritten tree (created if missing).
    #[arg(long)]
    out: PathBuf,

    /// Also produce a zip archive next to the destination tree.
    #[arg(long)]
    archive: bool,

    /// Print the destination file tree as JSON.
    #[arg(long)]
    tree: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mode = LanguageMode::parse(&cli.language).with_context(|| {
        format!(
            "unsupported language '{}': use 'java' or 'nodejs'",
            cli.language
        )
    })?;

    let config = RewriteConfig::from_env()?;
    let rewriter = Arc::new(OpenAiRewriter::new(config)?);

    let result = run_job(
        &cli.source,
        &cli.out,
        mode,
        rewriter,
        &JobLimits::from_env(),
    )
    .await?;

    println!(
        "Rewrote {} files ({} fell back to original), copied {} verbatim",
        result.stats.transformed, result.stats.fallback, result.stats.copied
    );

    if cli.archive {
        let out_parent = cli
            .out
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let zip_path = recast_project::create_zip_archive(&cli.out, &out_parent)?;
        println!("Archive written to {}", zip_path.display());
    }

    if cli.tree {
        println!("{}", serde_json::to_string_pretty(&result.structure)?);
    }

    Ok(())
}
