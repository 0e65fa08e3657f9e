use std::time::Duration;

const DEFAULT_REWRITE_CONCURRENCY: usize = 16;
const MAX_REWRITE_CONCURRENCY: usize = 64;

pub const REWRITE_CONCURRENCY_ENV: &str = "RECAST_REWRITE_CONCURRENCY";
pub const JOB_TIMEOUT_ENV: &str = "RECAST_JOB_TIMEOUT_SECS";

/// Tuning knobs for a single refactoring job.
#[derive(Debug, Clone, Copy)]
pub struct JobLimits {
    /// Maximum in-flight rewrite calls. Bounded so a large tree cannot flood
    /// the rewrite service or exhaust local sockets.
    pub rewrite_concurrency: usize,
    /// Optional whole-job deadline. Obligations still pending at the deadline
    /// resolve to failure and fall back to their original content.
    pub job_deadline: Option<Duration>,
}

impl JobLimits {
    pub fn from_env() -> Self {
        let concurrency = std::env::var(REWRITE_CONCURRENCY_ENV).ok();
        let deadline = std::env::var(JOB_TIMEOUT_ENV).ok();
        Self {
            rewrite_concurrency: parse_concurrency(concurrency.as_deref()),
            job_deadline: parse_deadline(deadline.as_deref()),
        }
    }
}

impl Default for JobLimits {
    fn default() -> Self {
        Self {
            rewrite_concurrency: DEFAULT_REWRITE_CONCURRENCY,
            job_deadline: None,
        }
    }
}

fn parse_concurrency(raw: Option<&str>) -> usize {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_REWRITE_CONCURRENCY)
        .clamp(1, MAX_REWRITE_CONCURRENCY)
}

fn parse_deadline(raw: Option<&str>) -> Option<Duration> {
    let secs = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)?;
    Some(Duration::from_secs(secs))
}
