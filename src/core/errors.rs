use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("Unknown pointer action code: {0}")]
    UnknownAction(i32),

    #[error("Unknown tool type code: {0}")]
    UnknownToolType(i32),

    #[error("Unknown preference key: {0}")]
    UnknownPreference(String),
}
