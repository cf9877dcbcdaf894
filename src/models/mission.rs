// src/models/mission.rs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;
use utoipa::{IntoParams, ToSchema};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "service_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Ramassage,
    Recyclage,
    DechetsSpeciaux,
    Urgence,
}

impl_label!(ServiceType {
    Ramassage => "ramassage",
    Recyclage => "recyclage",
    DechetsSpeciaux => "dechets_speciaux",
    Urgence => "urgence",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "mission_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl_label!(MissionStatus {
    Pending => "pending",
    Assigned => "assigned",
    InProgress => "in_progress",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl MissionStatus {
    /// pending → assigned → in_progress → completed, e cancelled a partir de
    /// pending/assigned. Permanecer no mesmo status é sempre aceito.
    pub fn can_transition_to(self, next: MissionStatus) -> bool {
        use MissionStatus::*;
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Assigned)
                | (Assigned, InProgress)
                | (InProgress, Completed)
                | (Pending, Cancelled)
                | (Assigned, Cancelled)
        )
    }

    pub fn is_deletable(self) -> bool {
        matches!(
            self,
            MissionStatus::Pending | MissionStatus::Assigned | MissionStatus::Cancelled
        )
    }

    /// Conta como carga de trabalho ativa de um membro do pessoal.
    pub fn is_active(self) -> bool {
        matches!(self, MissionStatus::Assigned | MissionStatus::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "mission_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl_label!(Priority {
    Low => "low",
    Medium => "medium",
    High => "high",
    Urgent => "urgent",
});

// --- Entidade ---

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Mission {
    pub id: Uuid,
    #[schema(example = "Collecte X")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "Paris")]
    pub location: String,
    pub service_type: ServiceType,
    pub status: MissionStatus,
    pub priority: Priority,
    pub client_id: Uuid,
    pub assigned_staff_id: Option<Uuid>,
    pub scheduled_date: Option<NaiveDate>,
    #[schema(example = "09:30")]
    pub scheduled_time: Option<String>,
    /// Minutos
    pub estimated_duration: Option<i32>,
    pub special_instructions: Option<String>,
    pub equipment_needed: Vec<String>,
    #[schema(value_type = Option<Object>)]
    pub gps_location: Option<Value>,
    pub zone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Missão + nomes das relações, para a listagem
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct MissionListItem {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub mission: Mission,
    pub client_company_name: Option<String>,
    pub assigned_staff_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MissionStatistics {
    pub status_counts: BTreeMap<String, usize>,
    pub priority_counts: BTreeMap<String, usize>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MissionListResponse {
    pub missions: Vec<MissionListItem>,
    pub count: usize,
    pub statistics: MissionStatistics,
    pub filters: MissionFilter,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MissionResponse {
    pub mission: Mission,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MissionFilter {
    pub client_id: Option<Uuid>,
    pub assigned_staff_id: Option<Uuid>,
    pub status: Option<MissionStatus>,
    pub service_type: Option<ServiceType>,
    pub priority: Option<Priority>,
    pub zone: Option<String>,
    #[validate(range(min = 0, message = "limit doit être positif"))]
    pub limit: Option<i64>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMissionPayload {
    #[validate(
        required(message = "title est requis"),
        custom(function = "crate::validation::not_blank")
    )]
    #[schema(example = "Collecte X")]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(required(message = "client_id est requis"))]
    pub client_id: Option<Uuid>,

    pub assigned_staff_id: Option<Uuid>,

    #[validate(
        required(message = "location est requis"),
        custom(function = "crate::validation::not_blank")
    )]
    #[schema(example = "Paris")]
    pub location: Option<String>,

    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,

    #[validate(range(min = 0, message = "estimated_duration doit être positif"))]
    pub estimated_duration: Option<i32>,

    #[validate(custom(function = "crate::validation::priority"))]
    pub priority: Option<String>,

    #[validate(
        required(message = "service_type est requis"),
        custom(function = "crate::validation::service_type")
    )]
    #[schema(example = "ramassage")]
    pub service_type: Option<String>,

    pub zone: Option<String>,
    pub equipment_needed: Option<Vec<String>>,
    #[schema(value_type = Option<Object>)]
    pub gps_location: Option<Value>,
    pub special_instructions: Option<String>,
}

// Pedido aberto pelo próprio cliente (ou por um admin em nome dele)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequestPayload {
    #[validate(
        required(message = "title est requis"),
        custom(function = "crate::validation::not_blank")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "description est requis"),
        custom(function = "crate::validation::not_blank")
    )]
    pub description: Option<String>,

    /// Ignorado quando quem chama é um cliente
    pub client_id: Option<Uuid>,

    #[validate(
        required(message = "location est requis"),
        custom(function = "crate::validation::not_blank")
    )]
    pub location: Option<String>,

    #[validate(
        required(message = "service_type est requis"),
        custom(function = "crate::validation::service_type")
    )]
    pub service_type: Option<String>,

    #[validate(custom(function = "crate::validation::priority"))]
    pub priority: Option<String>,

    pub scheduled_date: Option<NaiveDate>,
    pub zone: Option<String>,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMissionPayload {
    /// Usado apenas na forma `PUT /api/missions` (id no corpo)
    pub id: Option<Uuid>,

    #[validate(custom(function = "crate::validation::not_blank"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "crate::validation::not_blank"))]
    pub location: Option<String>,

    #[validate(custom(function = "crate::validation::service_type"))]
    pub service_type: Option<String>,

    #[validate(custom(function = "crate::validation::mission_status"))]
    pub status: Option<String>,

    #[validate(custom(function = "crate::validation::priority"))]
    pub priority: Option<String>,

    pub assigned_staff_id: Option<Uuid>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,

    #[validate(range(min = 0, message = "estimated_duration doit être positif"))]
    pub estimated_duration: Option<i32>,

    pub special_instructions: Option<String>,
    pub equipment_needed: Option<Vec<String>>,
    #[schema(value_type = Option<Object>)]
    pub gps_location: Option<Value>,
    pub zone: Option<String>,
}

// --- Escrita ---

#[derive(Debug, Clone)]
pub struct NewMission {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub service_type: ServiceType,
    pub status: MissionStatus,
    pub priority: Priority,
    pub client_id: Uuid,
    pub assigned_staff_id: Option<Uuid>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub estimated_duration: Option<i32>,
    pub special_instructions: Option<String>,
    pub equipment_needed: Vec<String>,
    pub gps_location: Option<Value>,
    pub zone: Option<String>,
}

// Campos mutáveis de uma missão; `client_id` nunca muda depois da criação
#[derive(Debug, Clone, Default)]
pub struct MissionChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<ServiceType>,
    pub status: Option<MissionStatus>,
    pub priority: Option<Priority>,
    pub assigned_staff_id: Option<Uuid>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub estimated_duration: Option<i32>,
    pub special_instructions: Option<String>,
    pub equipment_needed: Option<Vec<String>>,
    pub gps_location: Option<Value>,
    pub zone: Option<String>,
}
