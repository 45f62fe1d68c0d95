/// Error types shared across Derb server crates.
///
/// These cover infrastructure the content engine itself never touches
/// (Redis, the external links service). Server-specific errors wrap
/// `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("links service request failed: {0}")]
    LinksRequest(#[from] reqwest::Error),

    #[error("links service returned status {status}: {body}")]
    LinksStatus { status: u16, body: String },
}
