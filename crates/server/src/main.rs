//! Recast HTTP server
//!
//! Accepts a source-code project (GitHub URL or zip upload), rewrites every
//! eligible file through an external modernization service, and serves the
//! result as a browsable tree plus a downloadable archive.
//!
//! ## Endpoints
//!
//! - `POST /refactor-repo` — multipart `language` + (`github_url` | `zip_file`)
//! - `GET /file-content/:session_id?file_path=...` — one rewritten file
//! - `GET /download/:zip_name` — the zipped destination tree
//! - `GET /health` — liveness probe

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

mod cleanup;
mod handlers;
mod paths;
mod runtime_env;
mod sessions;

use handlers::AppState;
use sessions::SessionStore;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Parser, Debug)]
#[command(
    name = "recast-server",
    about = "HTTP API for AI-assisted codebase modernization"
)]
struct ServeArgs {
    /// Address to bind the HTTP API on.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = ServeArgs::parse();

    let temp_base = runtime_env::temp_base_dir();
    std::fs::create_dir_all(&temp_base)?;
    let ttl = runtime_env::session_ttl();
    if let Err(err) = cleanup::purge_stale(&temp_base, ttl) {
        log::warn!("startup cleanup failed: {err}");
    }

    let rewrite_config = recast_rewrite::RewriteConfig::from_env()?;
    let rewriter = recast_rewrite::OpenAiRewriter::new(rewrite_config)?;

    let state = AppState {
        sessions: SessionStore::new(ttl),
        rewriter: Arc::new(rewriter),
        temp_base,
        limits: recast_pipeline::JobLimits::from_env(),
    };

    let sweeper = state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let evicted = sweeper.purge_expired().await;
            if evicted > 0 {
                log::info!("evicted {evicted} expired sessions");
            }
        }
    });

    let app = handlers::router(state);
    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    log::info!("Serving refactor API on http://{}", args.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
