//! Shared error types for the dev stack

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Health contract violated: {message}")]
    ContractViolation { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
