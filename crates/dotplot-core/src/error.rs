pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid item list JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of items, got {found}")]
    NotAnArray { found: &'static str },
}
