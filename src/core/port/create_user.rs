use async_trait::async_trait;
use thiserror::Error;

use crate::core::domain::command::CommandError;
use crate::core::domain::entity::user::user::{
    CreateUserValidationError, UnvalidatedCreateUserInput,
};
use crate::core::domain::error_kind::{Classify, ErrorKind};
use crate::core::domain::transaction::TransactionError;

#[async_trait]
pub trait CreateUserInputBoundary: Send + Sync {
    async fn execute(
        &self,
        input: UnvalidatedCreateUserInput,
        output_boundary: &mut dyn CreateUserOutputBoundary,
    ) -> Result<(), CreateUserError>;
}

#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error(transparent)]
    ValidationError(#[from] CreateUserValidationError),

    #[error(transparent)]
    CommandError(#[from] CommandError),

    #[error(transparent)]
    TransactionError(#[from] TransactionError),

    #[error("Failed to process output: {0}")]
    OutputError(#[from] CreateUserOutputError),
}

impl Classify for CreateUserError {
    fn kind(&self) -> ErrorKind {
        match self {
            CreateUserError::ValidationError(e) => e.kind(),
            CreateUserError::CommandError(e) => e.kind(),
            CreateUserError::TransactionError(e) => e.kind(),
            CreateUserError::OutputError(_) => ErrorKind::from_static("output"),
        }
    }
}

pub trait CreateUserOutputBoundary: Send + Sync {
    fn execute(&mut self, output: i32) -> Result<(), CreateUserOutputError>;
}

#[derive(Debug, Error)]
pub enum CreateUserOutputError {
    #[error("Output already set: {0}")]
    AlreadySet(i32),
}
