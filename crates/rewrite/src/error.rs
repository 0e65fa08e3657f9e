use thiserror::Error;

pub type Result<T> = std::result::Result<T, RewriteError>;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("missing configuration: set {name}")]
    MissingConfig { name: &'static str },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rewrite service returned {status}: {detail}")]
    Api {
        status: reqwest::StatusCode,
        detail: String,
    },

    #[error("malformed rewrite response: {0}")]
    MalformedResponse(String),
}
