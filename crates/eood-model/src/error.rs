use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown OOD type: {0}")]
    UnknownOodType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
