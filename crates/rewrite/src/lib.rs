//! # Recast Rewrite
//!
//! Adapter for an OpenAI-compatible chat-completions endpoint that rewrites
//! one file at a time. The pipeline treats this as an opaque collaborator:
//! text in, text out, failures reported as-is.

mod client;
mod config;
mod error;
mod fence;
mod prompt;

pub use client::OpenAiRewriter;
pub use config::{RewriteConfig, API_KEY_ENV, API_URL_ENV};
pub use error::{Result, RewriteError};
pub use fence::strip_code_fence;
