// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{NewUser, User, UserChanges},
};

// Interações com a tabela `users`
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn create(&self, user: &NewUser) -> Result<User, AppError>;

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>, AppError>;

    /// `true` se havia uma linha para apagar
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, full_name, email, role, created_at, updated_at";

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, full_name, email, role) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Converte violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("Cet e-mail".into());
                }
            }
            e.into()
        })
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET updated_at = NOW()");
        if let Some(full_name) = &changes.full_name {
            qb.push(", full_name = ").push_bind(full_name.clone());
        }
        if let Some(role) = changes.role {
            qb.push(", role = ").push_bind(role);
        }
        qb.push(" WHERE id = ").push_bind(id);
        qb.push(format!(" RETURNING {USER_COLUMNS}"));

        let user = qb
            .build_query_as::<User>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
