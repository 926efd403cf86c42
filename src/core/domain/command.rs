use thiserror::Error;

use crate::core::domain::error_kind::{Classify, ErrorKind};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Entity already exists: {entity_type} - {details}")]
    AlreadyExists {
        entity_type: String,
        details: String
    },

    #[error("Entity not found: {entity_type} - {details}")]
    NotFound {
        entity_type: String,
        details: String
    },

    #[error("ConCurrent modification detected: {entity_type}")]
    ConcurrencyError {
        entity_type: String,
    },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

pub const COMMAND: ErrorKind = ErrorKind::from_static("command");

impl CommandError {
    pub fn user_not_found(id: i32) -> Self {
        CommandError::NotFound {
            entity_type: "User".to_string(),
            details: format!("id: {}", id),
        }
    }

    pub fn user_already_exists(id: i32) -> Self {
        CommandError::AlreadyExists {
            entity_type: "User".to_string(),
            details: format!("id: {}", id),
        }
    }
}

impl Classify for CommandError {
    fn kind(&self) -> ErrorKind {
        match self {
            CommandError::AlreadyExists { .. } => COMMAND.child("already_exists"),
            CommandError::NotFound { .. } => COMMAND.child("not_found"),
            CommandError::ConcurrencyError { .. } => COMMAND.child("concurrency"),
            CommandError::DatabaseError(_) => COMMAND.child("database"),
        }
    }
}
