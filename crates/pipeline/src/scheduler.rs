use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::time::Instant;

use crate::classify::LanguageMode;
use crate::invoker::Rewriter;
use crate::limits::JobLimits;
use crate::walker::TransformObligation;

/// Resolved result of one obligation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutcome {
    /// Rewritten file content.
    Success(String),
    /// Human-readable failure detail; the caller commits the original
    /// content instead.
    Failure(String),
}

/// Runs every obligation's rewrite call concurrently and waits for all of
/// them to resolve.
///
/// Fan-out is gated by a semaphore sized from `limits.rewrite_concurrency`.
/// Obligations are independent: one failure never cancels or blocks another,
/// and no outcome is discarded. A panic inside a rewrite task resolves to
/// `Failure` for that path only. When a job deadline is configured, tasks
/// that have not resolved by then fail with a deadline message.
pub async fn execute(
    obligations: &[TransformObligation],
    mode: LanguageMode,
    rewriter: Arc<dyn Rewriter>,
    limits: &JobLimits,
) -> Vec<(PathBuf, TransformOutcome)> {
    if obligations.is_empty() {
        return Vec::new();
    }

    let semaphore = Arc::new(Semaphore::new(limits.rewrite_concurrency));
    let deadline = limits.job_deadline.map(|budget| Instant::now() + budget);

    let mut tasks = Vec::with_capacity(obligations.len());
    for obligation in obligations {
        let obligation = obligation.clone();
        let relative_path = obligation.relative_path.clone();
        let semaphore = semaphore.clone();
        let rewriter = rewriter.clone();
        let task = tokio::spawn(async move {
            match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(
                        deadline,
                        resolve(&obligation, mode, semaphore, rewriter),
                    )
                    .await
                    {
                        Ok(outcome) => outcome,
                        Err(_) => TransformOutcome::Failure("job deadline exceeded".to_string()),
                    }
                }
                None => resolve(&obligation, mode, semaphore, rewriter).await,
            }
        });
        tasks.push((relative_path, task));
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    for (relative_path, task) in tasks {
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(err) => TransformOutcome::Failure(format!("rewrite task panicked: {err}")),
        };
        outcomes.push((relative_path, outcome));
    }
    outcomes
}

async fn resolve(
    obligation: &TransformObligation,
    mode: LanguageMode,
    semaphore: Arc<Semaphore>,
    rewriter: Arc<dyn Rewriter>,
) -> TransformOutcome {
    // The semaphore lives for the whole fan-out; it is never closed.
    let _permit = match semaphore.acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => return TransformOutcome::Failure("rewrite scheduler shut down".to_string()),
    };
    match rewriter
        .rewrite(&obligation.content, mode, &obligation.filename)
        .await
    {
        Ok(text) => TransformOutcome::Success(text),
        Err(err) => TransformOutcome::Failure(format!("{err:#}")),
    }
}
