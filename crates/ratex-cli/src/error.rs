use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ratex_core::ValidationError),

    #[error("{0}")]
    InvalidOption(String),

    #[error(transparent)]
    Ingest(#[from] ratex_core::IngestError),

    #[error(transparent)]
    Warehouse(#[from] ratex_core::WarehouseError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::InvalidOption(_) => 2,
            Self::Ingest(_) | Self::Warehouse(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
