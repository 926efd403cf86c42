use async_trait::async_trait;

use crate::core::domain::command::CommandError;
use crate::core::domain::entity::user::{User, UserCommand};
use crate::core::domain::transaction::{ToSql, TransactionHandle};

pub struct PgUserRepository;

#[async_trait]
impl UserCommand for PgUserRepository {
    async fn insert(
        &self,
        session: &dyn TransactionHandle,
        user: User,
    ) -> Result<(), CommandError> {
        let query = "INSERT INTO users (id, name, email) VALUES ($1, $2, $3)";
        let id = user.id;
        let params: Vec<Box<dyn ToSql>> = vec![
            Box::new(user.id) as Box<dyn ToSql>,
            Box::new(user.name) as Box<dyn ToSql>,
            Box::new(user.email) as Box<dyn ToSql>,
        ];
        match session.execute(query, params).await {
            Ok(_) => Ok(()),
            Err(e) => {
                let message = e.to_string();
                if message.contains("unique constraint") {
                    Err(CommandError::user_already_exists(id))
                } else if message.contains("deadlock") {
                    Err(CommandError::ConcurrencyError {
                        entity_type: "User".to_string(),
                    })
                } else {
                    Err(CommandError::DatabaseError(message))
                }
            }
        }
    }
}
