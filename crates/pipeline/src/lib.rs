//! # Recast Pipeline
//!
//! Project ingestion and concurrent rewrite fan-out.
//!
//! ## Pipeline
//!
//! ```text
//! Source tree
//!     │
//!     ├──> Walker (excluded segments pruned)
//!     │      ├─> COPY files materialized verbatim
//!     │      └─> TRANSFORM obligations (content held in memory)
//!     │
//!     ├──> Scheduler (bounded concurrent rewrite calls)
//!     │      └─> one outcome per obligation, failures contained
//!     │
//!     ├──> Writer (atomic commit, fallback to original on failure)
//!     │
//!     └──> Snapshot (nested file tree of the finished destination)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use recast_pipeline::{run_job, JobLimits, LanguageMode, Rewriter};
//!
//! # async fn demo(rewriter: Arc<dyn Rewriter>) -> anyhow::Result<()> {
//! let result = run_job(
//!     "legacy_project".as_ref(),
//!     "modernized".as_ref(),
//!     LanguageMode::Java,
//!     rewriter,
//!     &JobLimits::from_env(),
//! )
//! .await?;
//!
//! println!("rewrote {} files", result.stats.transformed);
//! # Ok(())
//! # }
//! ```

mod classify;
mod error;
mod invoker;
mod job;
mod limits;
mod scheduler;
mod snapshot;
mod walker;
mod writer;

pub use classify::{classify, FileAction, LanguageMode};
pub use error::{PipelineError, Result};
pub use invoker::Rewriter;
pub use job::{run_job, JobResult, JobStats};
pub use limits::JobLimits;
pub use scheduler::{execute, TransformOutcome};
pub use snapshot::{file_count, snapshot, FileTree, TreeNode};
pub use walker::{walk, TransformObligation, EXCLUDED_SEGMENTS};
pub use writer::commit;
