use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::core::domain::declaration::TransactionDeclaration;
use crate::core::domain::error_kind::{Classify, ErrorKind};
use crate::core::domain::invocation::InvocationContext;
use crate::core::domain::policy::Policy;
use crate::core::domain::transaction::{SessionRegistry, TransactionError};
use crate::core::domain::transactional_config::TransactionalConfig;

/// Wraps calls with begin/commit/rollback according to their declaration.
///
/// The interceptor keeps no state between calls. Whether a transaction is
/// active is always read from the current session, which is how nested
/// intercepted calls see the transaction opened by their caller.
pub struct TransactionalInterceptor {
    sessions: Arc<dyn SessionRegistry>,
    config: Arc<TransactionalConfig>,
}

impl TransactionalInterceptor {
    pub fn new(sessions: Arc<dyn SessionRegistry>, config: Arc<TransactionalConfig>) -> Self {
        Self { sessions, config }
    }

    pub fn sessions(&self) -> Arc<dyn SessionRegistry> {
        self.sessions.clone()
    }

    /// Runs `call` under `declaration`.
    ///
    /// An error from `call` is returned as is once the after phase is done.
    /// A failing commit after a successful call goes through the same
    /// rollback handling as a call error, then is returned. A failing
    /// begin/rollback/close/reset is returned as well, converted into `E`.
    pub async fn intercept<T, E, F, Fut>(
        &self,
        declaration: Option<&TransactionDeclaration>,
        ctx: &InvocationContext,
        call: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Classify + Display + From<TransactionError>,
    {
        // Decided once: the session's active flag changes during the call.
        let transaction_required = match declaration {
            Some(declaration) => {
                let active = self.sessions.session().await.is_active().await;
                declaration.policy.opens_transaction(active)
            }
            None => {
                warn!(
                    operation = %ctx,
                    policy = %Policy::NotRequired,
                    "transactional interceptor invoked but no declaration was found"
                );
                false
            }
        };

        if transaction_required {
            self.begin(ctx).await?;
        }

        debug!(operation = %ctx, "invoking");
        let no_rollback = self.no_rollback_exceptions(declaration);
        match call().await {
            Ok(value) => {
                if transaction_required {
                    if let Err(commit_err) = self.commit(ctx).await {
                        if let Err(handle_err) = self
                            .after_failure(ctx, transaction_required, &commit_err, no_rollback)
                            .await
                        {
                            error!(
                                operation = %ctx,
                                error = %commit_err,
                                "discarding commit error after transaction failure: {handle_err}"
                            );
                            return Err(handle_err.into());
                        }
                        return Err(commit_err.into());
                    }
                }
                Ok(value)
            }
            Err(err) => {
                if let Err(handle_err) = self
                    .after_failure(ctx, transaction_required, &err, no_rollback)
                    .await
                {
                    error!(
                        operation = %ctx,
                        error = %err,
                        "discarding call error after transaction failure: {handle_err}"
                    );
                    return Err(handle_err.into());
                }
                Err(err)
            }
        }
    }

    /// Exemptions for a failing call; none without a declaration, since no
    /// transaction can have been opened for it.
    fn no_rollback_exceptions<'a>(
        &'a self,
        declaration: Option<&'a TransactionDeclaration>,
    ) -> &'a [ErrorKind] {
        match declaration {
            None => &[],
            Some(declaration) => declaration
                .no_rollback_exceptions
                .as_deref()
                .unwrap_or(self.config.default_no_rollback_exceptions.as_slice()),
        }
    }

    async fn after_failure<E>(
        &self,
        ctx: &InvocationContext,
        transaction_required: bool,
        err: &E,
        no_rollback: &[ErrorKind],
    ) -> Result<(), TransactionError>
    where
        E: Classify,
    {
        if !transaction_required {
            return Ok(());
        }
        let kind = err.kind();
        if kind.matches_any(no_rollback) {
            debug!(operation = %ctx, %kind, "no rollback for error");
            self.commit(ctx).await
        } else {
            debug!(operation = %ctx, %kind, "error causes rollback");
            self.rollback(ctx).await
        }
    }

    async fn begin(&self, ctx: &InvocationContext) -> Result<(), TransactionError> {
        debug!(operation = %ctx, "begin transaction");
        self.sessions.session().await.begin().await
    }

    async fn commit(&self, ctx: &InvocationContext) -> Result<(), TransactionError> {
        debug!(operation = %ctx, "commit transaction");
        self.sessions.session().await.commit().await
    }

    /// Rolls back and, when that leaves no transaction active, closes the
    /// session and asks the registry for a fresh one.
    async fn rollback(&self, ctx: &InvocationContext) -> Result<(), TransactionError> {
        debug!(operation = %ctx, "rollback transaction");
        let session = self.sessions.session().await;
        session.rollback().await?;
        if !session.is_active().await {
            debug!(operation = %ctx, "closing session after outermost rollback");
            session.close().await?;
            self.sessions.reset().await?;
        }
        Ok(())
    }
}
