// src/models/client.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;
use utoipa::ToSchema;

// Empresa atendida. `user_id` liga o cliente à conta com papel `client`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Client {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    #[schema(example = "Boulangerie Dupont")]
    pub company_name: String,
    pub contact_person: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub contract_type: Option<String>,
    pub contract_start_date: Option<NaiveDate>,
    pub contract_end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
