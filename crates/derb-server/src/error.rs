#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Content(#[from] derb_content::ContentError),

    #[error(transparent)]
    Common(#[from] derb_common::error::CommonError),
}
