/// Errors raised while loading the content dataset.
///
/// Lookups, search, related selection and zone layout never fail; a missing
/// key is an absent value, not an error. Only the data-load boundary rejects
/// input.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate question slug: {0}")]
    DuplicateKey(String),

    #[error("question {0} has no sections")]
    NoSections(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),
}
