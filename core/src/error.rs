use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid clue position")]
    InvalidPosition,
    #[error("No categories available")]
    NoCategories,
    #[error("Category source failed: {0}")]
    Source(String),
    #[error("Storage failed: {0}")]
    Storage(String),
    #[error("Could not serialize game: {0}")]
    Serialize(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
