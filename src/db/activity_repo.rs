// src/db/activity_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::activity::{Comment, MissionUpdate, NewComment, NewMissionUpdate, NewRating, Rating},
};

// Comentários, atualizações de campo e avaliações: só inserção e leitura
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn add_comment(&self, comment: &NewComment) -> Result<Comment, AppError>;

    async fn add_mission_update(&self, update: &NewMissionUpdate)
    -> Result<MissionUpdate, AppError>;

    async fn add_rating(&self, rating: &NewRating) -> Result<Rating, AppError>;

    async fn rating_for_mission(&self, mission_id: Uuid) -> Result<Option<Rating>, AppError>;

    async fn ratings_for_staff(&self, staff_ids: &[Uuid]) -> Result<Vec<Rating>, AppError>;
}

#[derive(Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    async fn add_comment(&self, comment: &NewComment) -> Result<Comment, AppError> {
        let created = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (mission_id, user_id, content) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(comment.mission_id)
        .bind(comment.user_id)
        .bind(&comment.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn add_mission_update(
        &self,
        update: &NewMissionUpdate,
    ) -> Result<MissionUpdate, AppError> {
        let created = sqlx::query_as::<_, MissionUpdate>(
            r#"
            INSERT INTO mission_updates (mission_id, staff_id, update_type, content, photo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(update.mission_id)
        .bind(update.staff_id)
        .bind(&update.update_type)
        .bind(&update.content)
        .bind(&update.photo_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn add_rating(&self, rating: &NewRating) -> Result<Rating, AppError> {
        sqlx::query_as::<_, Rating>(
            r#"
            INSERT INTO ratings (mission_id, staff_id, client_id, rating, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(rating.mission_id)
        .bind(rating.staff_id)
        .bind(rating.client_id)
        .bind(rating.rating)
        .bind(&rating.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Uma avaliação por missão (UNIQUE mission_id)
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("L'évaluation de cette mission".into());
                }
            }
            e.into()
        })
    }

    async fn rating_for_mission(&self, mission_id: Uuid) -> Result<Option<Rating>, AppError> {
        let rating = sqlx::query_as::<_, Rating>("SELECT * FROM ratings WHERE mission_id = $1")
            .bind(mission_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(rating)
    }

    async fn ratings_for_staff(&self, staff_ids: &[Uuid]) -> Result<Vec<Rating>, AppError> {
        if staff_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ratings = sqlx::query_as::<_, Rating>("SELECT * FROM ratings WHERE staff_id = ANY($1)")
            .bind(staff_ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        Ok(ratings)
    }
}
