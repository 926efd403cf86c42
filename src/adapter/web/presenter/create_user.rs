use axum::http::StatusCode;
use tracing::warn;

use crate::core::domain::command::CommandError;
use crate::core::port::create_user::{
    CreateUserError, CreateUserOutputBoundary, CreateUserOutputError,
};

pub struct CreateUserPresenter {
    pub(crate) output: Option<i32>,
}

impl CreateUserPresenter {
    pub fn new() -> Self {
        Self { output: None }
    }

    pub(crate) fn success(&self, _id: i32) -> Result<StatusCode, (StatusCode, String)> {
        Ok(StatusCode::CREATED)
    }

    pub(crate) fn failure(&self, error: CreateUserError) -> (StatusCode, String) {
        let status = match &error {
            CreateUserError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CreateUserError::CommandError(CommandError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            CreateUserError::CommandError(CommandError::ConcurrencyError { .. }) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!(%error, "create user failed");
        }
        (status, format!("Failed to create user: {}", error))
    }
}

impl Default for CreateUserPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateUserOutputBoundary for CreateUserPresenter {
    fn execute(&mut self, output: i32) -> Result<(), CreateUserOutputError> {
        if let Some(existing) = self.output {
            return Err(CreateUserOutputError::AlreadySet(existing));
        }
        self.output = Some(output);
        Ok(())
    }
}
