// src/models/activity.rs
//
// Filhos somente-inserção: comentários e atualizações de missão, avaliações do pessoal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub mission_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct MissionUpdate {
    pub id: Uuid,
    pub mission_id: Uuid,
    pub staff_id: Option<Uuid>,
    #[schema(example = "photo")]
    pub update_type: String,
    pub content: Option<String>,
    pub photo_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Rating {
    pub id: Uuid,
    pub mission_id: Uuid,
    pub staff_id: Uuid,
    pub client_id: Uuid,
    #[schema(example = 5)]
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentPayload {
    #[validate(
        required(message = "content est requis"),
        custom(function = "crate::validation::not_blank")
    )]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMissionUpdatePayload {
    #[validate(
        required(message = "update_type est requis"),
        custom(function = "crate::validation::not_blank")
    )]
    pub update_type: Option<String>,
    pub content: Option<String>,
    #[validate(url(message = "photo_url doit être une URL"))]
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRatingPayload {
    #[validate(
        required(message = "rating est requis"),
        range(min = 1, max = 5, message = "rating doit être entre 1 et 5")
    )]
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub mission_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct NewMissionUpdate {
    pub mission_id: Uuid,
    pub staff_id: Option<Uuid>,
    pub update_type: String,
    pub content: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewRating {
    pub mission_id: Uuid,
    pub staff_id: Uuid,
    pub client_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}
