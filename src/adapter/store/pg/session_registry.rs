use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::debug;

use crate::adapter::store::pg::session::PgSession;
use crate::core::domain::transaction::{SessionRegistry, TransactionError, TransactionHandle};

/// Shares one [`PgSession`] until it is reset.
pub struct PgSessionRegistry {
    pool: PgPool,
    current: RwLock<Arc<PgSession>>,
}

impl PgSessionRegistry {
    pub fn new(pool: PgPool) -> Self {
        let current = RwLock::new(Arc::new(PgSession::new(pool.clone())));
        Self { pool, current }
    }
}

#[async_trait]
impl SessionRegistry for PgSessionRegistry {
    async fn session(&self) -> Arc<dyn TransactionHandle> {
        let session: Arc<dyn TransactionHandle> = self.current.read().await.clone();
        session
    }

    async fn reset(&self) -> Result<(), TransactionError> {
        *self.current.write().await = Arc::new(PgSession::new(self.pool.clone()));
        debug!("session registry reset");
        Ok(())
    }
}
