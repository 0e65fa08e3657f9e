use async_trait::async_trait;

use crate::classify::LanguageMode;

/// Seam to the external code-rewriting service.
///
/// The pipeline calls `rewrite` at most once per obligation and never
/// retries: a failure is reported to the caller, which falls back to the
/// original content. Implementations must tolerate arbitrary latency; the
/// pipeline tolerates arbitrary failure.
#[async_trait]
pub trait Rewriter: Send + Sync {
    async fn rewrite(
        &self,
        content: &str,
        mode: LanguageMode,
        filename: &str,
    ) -> anyhow::Result<String>;
}
