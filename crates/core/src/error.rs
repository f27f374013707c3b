use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChimeError {
    #[error("Invalid calendar zone: {0}")]
    InvalidZone(String),

    #[error("Invalid week start: {0}")]
    InvalidWeekStart(String),

    #[error("Invalid reference time: {0}")]
    InvalidReference(String),

    #[error("Invalid postpone limit: {0}")]
    InvalidPostponeLimit(String),
}

pub type Result<T> = std::result::Result<T, ChimeError>;
