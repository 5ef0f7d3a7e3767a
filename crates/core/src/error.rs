use medtrack_types::ValueError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Value(#[from] ValueError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
