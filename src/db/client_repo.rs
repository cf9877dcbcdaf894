// src/db/client_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::client::Client};

// Somente leitura: a ficha do cliente decide o que uma conta `client` enxerga
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError>;

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Client>, AppError>;
}

#[derive(Clone)]
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE user_id = $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(client)
    }
}
