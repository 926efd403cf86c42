use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::core::domain::error_kind::ErrorKind;
use crate::core::domain::policy::Policy;

/// A transactional declaration as written on a type or an operation.
/// Unset fields fall back to the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Declaration {
    #[serde(default)]
    pub policy: Option<Policy>,
    #[serde(default)]
    pub no_rollback_exceptions: Option<Vec<ErrorKind>>,
}

impl Declaration {
    pub fn with_policy(policy: Policy) -> Self {
        Self {
            policy: Some(policy),
            no_rollback_exceptions: None,
        }
    }

    pub fn no_rollback_for(mut self, kinds: Vec<ErrorKind>) -> Self {
        self.no_rollback_exceptions = Some(kinds);
        self
    }
}

/// The declaration governing one intercepted call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDeclaration {
    pub policy: Policy,
    /// `None` means the configured default list applies.
    pub no_rollback_exceptions: Option<Vec<ErrorKind>>,
}

impl TransactionDeclaration {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            no_rollback_exceptions: None,
        }
    }

    pub fn no_rollback_for(mut self, kinds: Vec<ErrorKind>) -> Self {
        self.no_rollback_exceptions = Some(kinds);
        self
    }
}

/// Read access to declarations, keyed by type and operation identity.
pub trait DeclarationSource: Send + Sync {
    fn operation_declaration(&self, type_name: &str, operation: &str) -> Option<&Declaration>;
    fn type_declaration(&self, type_name: &str) -> Option<&Declaration>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeclarationError {
    #[error("operation key '{0}' must look like 'Type::operation'")]
    InvalidOperationKey(String),
}

/// Declarations registered in code or loaded from configuration.
///
/// Operations are keyed as `Type::operation`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarationTable {
    #[serde(default)]
    types: HashMap<String, Declaration>,
    #[serde(default)]
    operations: HashMap<String, Declaration>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_type(mut self, type_name: impl Into<String>, declaration: Declaration) -> Self {
        self.types.insert(type_name.into(), declaration);
        self
    }

    pub fn declare_operation(
        mut self,
        type_name: &str,
        operation: &str,
        declaration: Declaration,
    ) -> Self {
        self.operations
            .insert(operation_key(type_name, operation), declaration);
        self
    }

    pub fn validate(&self) -> Result<(), DeclarationError> {
        for key in self.operations.keys() {
            let valid = key
                .rsplit_once("::")
                .is_some_and(|(ty, op)| !ty.is_empty() && !op.is_empty());
            if !valid {
                return Err(DeclarationError::InvalidOperationKey(key.clone()));
            }
        }
        Ok(())
    }
}

impl DeclarationSource for DeclarationTable {
    fn operation_declaration(&self, type_name: &str, operation: &str) -> Option<&Declaration> {
        self.operations.get(&operation_key(type_name, operation))
    }

    fn type_declaration(&self, type_name: &str) -> Option<&Declaration> {
        self.types.get(type_name)
    }
}

fn operation_key(type_name: &str, operation: &str) -> String {
    format!("{type_name}::{operation}")
}
