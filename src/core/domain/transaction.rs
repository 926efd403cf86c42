use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::domain::error_kind::{Classify, ErrorKind};

/// A transactional database session.
///
/// Nested `begin` calls are allowed; the session tracks how many are pending
/// and reports itself active until the outermost one is resolved.
#[async_trait]
pub trait TransactionHandle: Send + Sync {
    async fn is_active(&self) -> bool;
    async fn begin(&self) -> Result<(), TransactionError>;
    async fn commit(&self) -> Result<(), TransactionError>;
    async fn rollback(&self) -> Result<(), TransactionError>;
    /// Releases the session. It cannot be used afterwards.
    async fn close(&self) -> Result<(), TransactionError>;
    async fn execute(
        &self,
        query: &str,
        params: Vec<Box<dyn ToSql>>,
    ) -> Result<(), TransactionError>;
}

/// Hands out the current session and replaces it once it has been discarded.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    async fn session(&self) -> Arc<dyn TransactionHandle>;
    async fn reset(&self) -> Result<(), TransactionError>;
}

pub trait ToSql: Send + Sync + std::fmt::Debug {
    fn as_i32(&self) -> Option<i32> {
        None
    }
    fn as_string(&self) -> Option<String> {
        None
    }
}

impl ToSql for i32 {
    fn as_i32(&self) -> Option<i32> {
        Some(*self)
    }
}

impl ToSql for String {
    fn as_string(&self) -> Option<String> {
        Some(self.clone())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Failed to execute query: {0}")]
    ExecutionError(String),
    #[error("Failed to begin transaction: {0}")]
    BeginError(String),
    #[error("Failed to commit transaction: {0}")]
    CommitError(String),
    #[error("Failed to rollback transaction: {0}")]
    RollbackError(String),
    #[error("Connection error: {0}")]
    ConnectionError(String),
    #[error("Parameter binding error: {0}")]
    BindError(String),
    #[error("No transaction is active")]
    NoActiveTransaction,
    #[error("Transaction is marked rollback-only")]
    RollbackOnly,
    #[error("Session is closed")]
    SessionClosed,
}

pub const TRANSACTION: ErrorKind = ErrorKind::from_static("transaction");

impl Classify for TransactionError {
    fn kind(&self) -> ErrorKind {
        let segment = match self {
            TransactionError::ExecutionError(_) => "execution",
            TransactionError::BeginError(_) => "begin",
            TransactionError::CommitError(_) => "commit",
            TransactionError::RollbackError(_) => "rollback",
            TransactionError::ConnectionError(_) => "connection",
            TransactionError::BindError(_) => "bind",
            TransactionError::NoActiveTransaction => "no_active_transaction",
            TransactionError::RollbackOnly => "rollback_only",
            TransactionError::SessionClosed => "session_closed",
        };
        TRANSACTION.child(segment)
    }
}
