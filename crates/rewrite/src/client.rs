use async_trait::async_trait;
use recast_pipeline::{LanguageMode, Rewriter};
use serde::Deserialize;
use serde_json::json;

use crate::config::RewriteConfig;
use crate::error::{Result, RewriteError};
use crate::fence::strip_code_fence;
use crate::prompt;

const TEMPERATURE: f64 = 0.3;

/// HTTP client for an OpenAI-compatible chat-completions rewrite endpoint.
///
/// One request per obligation, never retried; the pipeline decides what to
/// do with a failure.
pub struct OpenAiRewriter {
    client: reqwest::Client,
    config: RewriteConfig,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

impl OpenAiRewriter {
    pub fn new(config: RewriteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let body = json!({
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": TEMPERATURE,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Content-Type", "application/json")
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = excerpt(&response.text().await.unwrap_or_default());
            log::warn!("rewrite service returned {status}: {detail}");
            return Err(RewriteError::Api { status, detail });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RewriteError::MalformedResponse("empty choices array".to_string()))?;

        Ok(strip_code_fence(&content))
    }
}

#[async_trait]
impl Rewriter for OpenAiRewriter {
    async fn rewrite(
        &self,
        content: &str,
        mode: LanguageMode,
        filename: &str,
    ) -> anyhow::Result<String> {
        let prompt = prompt::build(content, mode, filename);
        Ok(self.complete(prompt).await?)
    }
}

fn excerpt(text: &str) -> String {
    const MAX_CHARS: usize = 200;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX_CHARS).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_truncates_long_bodies() {
        let long = "x".repeat(500);
        let cut = excerpt(&long);
        assert!(cut.chars().count() <= 201);
        assert!(cut.ends_with('…'));
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn chat_response_shape_parses() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "done"}}]}"#,
        )
        .expect("parse");
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].message.content, "done");
    }
}
