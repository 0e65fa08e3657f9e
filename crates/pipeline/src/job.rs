use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::classify::LanguageMode;
use crate::error::{PipelineError, Result};
use crate::invoker::Rewriter;
use crate::limits::JobLimits;
use crate::scheduler;
use crate::snapshot::{self, FileTree};
use crate::walker;
use crate::writer;

/// Counters for one finished job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobStats {
    /// Files committed with rewritten content.
    pub transformed: usize,
    /// Files whose rewrite failed and were committed with original content.
    pub fallback: usize,
    /// Files copied verbatim (out of scope for the mode, or unreadable).
    pub copied: usize,
}

/// Completed-job view handed back to the submission layer. The archive
/// reference, if any, is attached by that layer.
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub destination_root: PathBuf,
    pub structure: FileTree,
    pub stats: JobStats,
}

/// Runs one refactoring job end to end: walk, schedule, commit, snapshot.
///
/// The destination root must be freshly allocated and exclusively owned by
/// this job. Rewrite failures never fail the job; they fall back to original
/// content. Filesystem failures while materializing are fatal, and the
/// caller discards the partial destination tree.
pub async fn run_job(
    source_root: &Path,
    dest_root: &Path,
    mode: LanguageMode,
    rewriter: Arc<dyn Rewriter>,
    limits: &JobLimits,
) -> Result<JobResult> {
    let obligations = walker::walk(source_root, dest_root, mode)?;
    log::info!(
        "walked {}: {} files queued for {mode} rewrite",
        source_root.display(),
        obligations.len()
    );

    let outcomes = scheduler::execute(&obligations, mode, rewriter, limits).await;

    let originals: HashMap<&Path, &str> = obligations
        .iter()
        .map(|o| (o.relative_path.as_path(), o.content.as_str()))
        .collect();

    let mut stats = JobStats::default();
    for (relative_path, outcome) in &outcomes {
        let Some(original) = originals.get(relative_path.as_path()).copied() else {
            return Err(PipelineError::Other(format!(
                "outcome for unknown path: {}",
                relative_path.display()
            )));
        };
        if writer::commit(dest_root, relative_path, outcome, original)? {
            stats.transformed += 1;
        } else {
            stats.fallback += 1;
        }
    }

    let structure = snapshot::snapshot(dest_root)?;
    stats.copied = snapshot::file_count(&structure)
        .saturating_sub(stats.transformed + stats.fallback);

    log::info!(
        "job finished: {} rewritten, {} fallback, {} copied",
        stats.transformed,
        stats.fallback,
        stats.copied
    );

    Ok(JobResult {
        destination_root: dest_root.to_path_buf(),
        structure,
        stats,
    })
}
