use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),

    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),

    #[error("Reply token cannot be empty")]
    EmptyReplyToken,

    #[error("LINE API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LINE API error ({status}): {body}")]
    Api { status: u16, body: String },
}
