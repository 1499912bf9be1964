use thiserror::Error;

/// Typed errors for the Box token exchange and upload path.
///
/// All of these are caught by the single top-level guard in `main`: the
/// report file is already persisted locally, so none of them are fatal to
/// the run.
#[derive(Debug, Error)]
pub enum BoxError {
    #[error("Box token exchange failed ({status}): {body}")]
    TokenExchange { status: u16, body: String },

    #[error("Box token response missing access_token: {0}")]
    MissingAccessToken(String),

    #[error("Failed to load Box private key: {0}")]
    InvalidKey(String),

    #[error("Box upload conflict without file id: {0}")]
    ConflictWithoutId(String),

    #[error("Box upload failed ({status}): {body}")]
    UploadFailed { status: u16, body: String },

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
