// src/models/staff.rs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "staff_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    Active,
    Inactive,
    OnLeave,
}

impl_label!(StaffStatus {
    Active => "active",
    Inactive => "inactive",
    OnLeave => "on_leave",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Availability {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

// Segunda a sexta
impl Default for Availability {
    fn default() -> Self {
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmergencyContact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub relation: Option<String>,
}

// `id` é o próprio `users.id` (chave primária compartilhada)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct StaffProfile {
    pub id: Uuid,
    #[schema(example = "Lucas")]
    pub first_name: String,
    #[schema(example = "Bernard")]
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub hire_date: NaiveDate,
    #[schema(example = "Chauffeur")]
    pub position: String,
    pub department: Option<String>,
    #[schema(example = "18.50")]
    pub hourly_rate: Option<Decimal>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    #[schema(value_type = Availability)]
    pub availability: Json<Availability>,
    pub status: StaffStatus,
    #[schema(value_type = Option<EmergencyContact>)]
    pub emergency_contact: Option<Json<EmergencyContact>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StaffProfile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// Perfil + agregados calculados pelo shaper
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StaffWithStats {
    #[serde(flatten)]
    pub profile: StaffProfile,
    #[schema(example = 4.5)]
    pub average_rating: Option<f64>,
    pub total_ratings: usize,
    pub active_missions: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StaffStatistics {
    pub status_counts: BTreeMap<String, usize>,
    pub department_counts: BTreeMap<String, usize>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaffListResponse {
    pub staff: Vec<StaffWithStats>,
    pub count: usize,
    pub statistics: StaffStatistics,
    pub filters: StaffFilter,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StaffResponse {
    pub staff: StaffProfile,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct StaffFilter {
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: Option<StaffStatus>,
    /// Competência que o perfil precisa conter
    pub skills: Option<String>,
    #[validate(range(min = 0, message = "limit doit être positif"))]
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStaffPayload {
    /// Id do usuário no provedor de identidade
    #[validate(required(message = "id (utilisateur) est requis"))]
    pub id: Option<Uuid>,

    #[validate(
        required(message = "first_name est requis"),
        custom(function = "crate::validation::not_blank")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "last_name est requis"),
        custom(function = "crate::validation::not_blank")
    )]
    pub last_name: Option<String>,

    #[validate(
        required(message = "position est requis"),
        custom(function = "crate::validation::not_blank")
    )]
    pub position: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub department: Option<String>,

    #[validate(custom(function = "crate::validation::non_negative"))]
    pub hourly_rate: Option<Decimal>,

    pub skills: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub availability: Option<Availability>,

    #[validate(custom(function = "crate::validation::staff_status"))]
    pub status: Option<String>,

    pub emergency_contact: Option<EmergencyContact>,
}

// Modo parcial: nada é obrigatório, mas o que vier precisa estar bem formado
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStaffPayload {
    /// Usado apenas na forma `PUT /api/staff` (id no corpo)
    pub id: Option<Uuid>,

    #[validate(custom(function = "crate::validation::not_blank"))]
    pub first_name: Option<String>,

    #[validate(custom(function = "crate::validation::not_blank"))]
    pub last_name: Option<String>,

    #[validate(custom(function = "crate::validation::not_blank"))]
    pub position: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub department: Option<String>,

    #[validate(custom(function = "crate::validation::non_negative"))]
    pub hourly_rate: Option<Decimal>,

    pub skills: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub availability: Option<Availability>,

    #[validate(custom(function = "crate::validation::staff_status"))]
    pub status: Option<String>,

    pub emergency_contact: Option<EmergencyContact>,
}

#[derive(Debug, Clone)]
pub struct NewStaffProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub hire_date: NaiveDate,
    pub position: String,
    pub department: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub availability: Availability,
    pub status: StaffStatus,
    pub emergency_contact: Option<EmergencyContact>,
}

// Lista de campos mutáveis de um perfil; o resto nunca sai do payload
#[derive(Debug, Clone, Default)]
pub struct StaffChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub hourly_rate: Option<Decimal>,
    pub skills: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub availability: Option<Availability>,
    pub status: Option<StaffStatus>,
    pub emergency_contact: Option<EmergencyContact>,
}

impl StaffChanges {
    /// Campos que só um admin pode alterar (vínculo empregatício).
    pub fn touches_employment(&self) -> bool {
        self.status.is_some()
            || self.position.is_some()
            || self.department.is_some()
            || self.hourly_rate.is_some()
    }
}
