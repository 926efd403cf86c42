use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use crate::core::domain::error_kind::Classify;
use crate::core::domain::invocation::{InvocationContext, OperationMetadata};
use crate::core::domain::transaction::{SessionRegistry, TransactionError};
use crate::core::transactional::interceptor::TransactionalInterceptor;
use crate::core::transactional::resolver::PolicyResolver;

/// Dispatches operations, intercepting only those the resolver matches.
pub struct TransactionalExecutor {
    resolver: PolicyResolver,
    interceptor: TransactionalInterceptor,
}

impl TransactionalExecutor {
    pub fn new(resolver: PolicyResolver, interceptor: TransactionalInterceptor) -> Self {
        Self {
            resolver,
            interceptor,
        }
    }

    pub fn sessions(&self) -> Arc<dyn SessionRegistry> {
        self.interceptor.sessions()
    }

    pub async fn run<T, E, F, Fut>(&self, operation: &OperationMetadata, call: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Classify + Display + From<TransactionError>,
    {
        if !self.resolver.is_eligible(operation) {
            return call().await;
        }
        let declaration = self.resolver.resolve(operation);
        let ctx = InvocationContext::from(operation);
        self.interceptor
            .intercept(declaration.as_ref(), &ctx, call)
            .await
    }
}
