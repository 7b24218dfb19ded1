use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("invalid stored data: {0}")]
    InvalidData(String),
}
