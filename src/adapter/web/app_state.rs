use std::sync::Arc;

use sqlx::PgPool;

use crate::adapter::store::pg::command::user::PgUserRepository;
use crate::adapter::store::pg::session_registry::PgSessionRegistry;
use crate::core::domain::declaration::DeclarationSource;
use crate::core::domain::entity::user::UserCommand;
use crate::core::domain::transactional_config::TransactionalConfig;
use crate::core::port::create_user::CreateUserInputBoundary;
use crate::core::transactional::{PolicyResolver, TransactionalExecutor, TransactionalInterceptor};
use crate::core::use_case::create_user::CreateUserUseCase;

pub struct AppState {
    pub pool: PgPool,
    pub transactional: Arc<TransactionalConfig>,
    pub declarations: Arc<dyn DeclarationSource>,
    pub create_user_repository: Arc<dyn UserCommand>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        transactional: TransactionalConfig,
        declarations: Arc<dyn DeclarationSource>,
    ) -> Self {
        Self {
            pool,
            transactional: Arc::new(transactional),
            declarations,
            create_user_repository: Arc::new(PgUserRepository),
        }
    }

    /// Executor over a session registry owned by a single request.
    pub fn unit_of_work(&self) -> Arc<TransactionalExecutor> {
        let sessions = Arc::new(PgSessionRegistry::new(self.pool.clone()));
        Arc::new(TransactionalExecutor::new(
            PolicyResolver::new(self.transactional.clone(), self.declarations.clone()),
            TransactionalInterceptor::new(sessions, self.transactional.clone()),
        ))
    }

    pub fn user_create_use_case(&self) -> Arc<dyn CreateUserInputBoundary> {
        Arc::new(CreateUserUseCase::new(
            self.create_user_repository.clone(),
            self.unit_of_work(),
        ))
    }
}
