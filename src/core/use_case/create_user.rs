use async_trait::async_trait;
use std::sync::Arc;

use crate::core::domain::entity::user::user::UnvalidatedCreateUserInput;
use crate::core::domain::entity::user::{User, UserCommand};
use crate::core::domain::invocation::{OperationMetadata, TransactionalAware};
use crate::core::port::create_user::{
    CreateUserError, CreateUserInputBoundary, CreateUserOutputBoundary,
};
use crate::core::transactional::TransactionalExecutor;

pub struct CreateUserUseCase {
    repository: Arc<dyn UserCommand>,
    executor: Arc<TransactionalExecutor>,
    operation: OperationMetadata,
}

impl TransactionalAware for CreateUserUseCase {
    const TYPE_NAME: &'static str = "UserService";
}

impl CreateUserUseCase {
    pub fn new(repository: Arc<dyn UserCommand>, executor: Arc<TransactionalExecutor>) -> Self {
        Self {
            repository,
            executor,
            operation: OperationMetadata::of_aware::<Self>("create_user"),
        }
    }

    async fn persist(&self, user: User) -> Result<(), CreateUserError> {
        let sessions = self.executor.sessions();
        let repository = self.repository.clone();
        self.executor
            .run(&self.operation, || async move {
                let session = sessions.session().await;
                repository.insert(session.as_ref(), user).await?;
                Ok::<(), CreateUserError>(())
            })
            .await
    }
}

#[async_trait]
impl CreateUserInputBoundary for CreateUserUseCase {
    async fn execute(
        &self,
        input: UnvalidatedCreateUserInput,
        output_boundary: &mut dyn CreateUserOutputBoundary,
    ) -> Result<(), CreateUserError> {
        let user = User::try_from(input)?;
        let id = user.id;
        self.persist(user).await?;

        output_boundary.execute(id)?;

        Ok(())
    }
}
