use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}
