use std::path::PathBuf;
use std::time::Duration;

pub const TEMP_DIR_ENV: &str = "RECAST_TEMP_DIR";
pub const SESSION_TTL_ENV: &str = "RECAST_SESSION_TTL_SECS";

const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Base directory for per-job working trees and downloadable archives.
pub fn temp_base_dir() -> PathBuf {
    std::env::var(TEMP_DIR_ENV)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("recast"))
}

/// How long a finished job stays browsable and downloadable.
pub fn session_ttl() -> Duration {
    let raw = std::env::var(SESSION_TTL_ENV).ok();
    parse_ttl(raw.as_deref())
}

fn parse_ttl(raw: Option<&str>) -> Duration {
    let secs = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_SESSION_TTL_SECS);
    Duration::from_secs(secs)
}
