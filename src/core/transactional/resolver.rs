use std::sync::Arc;

use tracing::debug;

use crate::core::domain::declaration::{Declaration, DeclarationSource, TransactionDeclaration};
use crate::core::domain::invocation::{InvocationContext, OperationMetadata, TypeMetadata};
use crate::core::domain::transactional_config::TransactionalConfig;

/// Decides which operations are transactional and under which declaration.
///
/// Operation-level declarations take precedence over type-level ones. A
/// declaration that leaves its policy unset gets the configured default
/// policy; an unset no-rollback list is left unset so the interceptor applies
/// the configured default list when the call fails.
pub struct PolicyResolver {
    config: Arc<TransactionalConfig>,
    source: Arc<dyn DeclarationSource>,
}

impl PolicyResolver {
    pub fn new(config: Arc<TransactionalConfig>, source: Arc<dyn DeclarationSource>) -> Self {
        Self { config, source }
    }

    pub fn resolve(&self, operation: &OperationMetadata) -> Option<TransactionDeclaration> {
        let declaration = self.find_declaration(operation)?;
        Some(TransactionDeclaration {
            policy: declaration.policy.unwrap_or(self.config.default_policy),
            no_rollback_exceptions: declaration.no_rollback_exceptions.clone(),
        })
    }

    /// Any type qualifies unless strict mode requires the `TransactionalAware` marker.
    pub fn matches_type(&self, owner: &TypeMetadata) -> bool {
        !self.config.strict_mode || owner.transactional_aware
    }

    /// Public operations with an operation-level or type-level declaration qualify.
    pub fn matches_operation(&self, operation: &OperationMetadata) -> bool {
        if !operation.public {
            return false;
        }
        let Some(declaration) = self.find_declaration(operation) else {
            return false;
        };

        let policy = declaration
            .policy
            .map_or_else(|| "default".to_string(), |p| p.to_string());
        let no_rollback = declaration.no_rollback_exceptions.as_ref().map_or_else(
            || "default".to_string(),
            |kinds| {
                kinds
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            },
        );
        debug!(
            operation = %InvocationContext::from(operation),
            %policy,
            %no_rollback,
            "transactional operation matched"
        );
        true
    }

    pub fn is_eligible(&self, operation: &OperationMetadata) -> bool {
        self.matches_type(&operation.owner) && self.matches_operation(operation)
    }

    fn find_declaration(&self, operation: &OperationMetadata) -> Option<&Declaration> {
        self.source
            .operation_declaration(&operation.owner.name, &operation.name)
            .or_else(|| self.source.type_declaration(&operation.owner.name))
    }
}
