use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("address {0} has no first and last name")]
    NotEnriched(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
