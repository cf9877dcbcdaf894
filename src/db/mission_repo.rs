// src/db/mission_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::RecordScope,
    models::mission::{Mission, MissionChanges, MissionFilter, MissionListItem, NewMission},
};

#[async_trait]
pub trait MissionRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mission>, AppError>;

    /// Listagem com nomes de cliente/responsável, já recortada pelo `scope`.
    async fn list(
        &self,
        filter: &MissionFilter,
        scope: RecordScope,
    ) -> Result<Vec<MissionListItem>, AppError>;

    /// Missões atribuídas a qualquer um dos membros informados.
    async fn list_for_staff(&self, staff_ids: &[Uuid]) -> Result<Vec<Mission>, AppError>;

    async fn create(&self, mission: &NewMission) -> Result<Mission, AppError>;

    async fn update(&self, id: Uuid, changes: &MissionChanges)
    -> Result<Option<Mission>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgMissionRepository {
    pool: PgPool,
}

impl PgMissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_scope(qb: &mut QueryBuilder<'_, Postgres>, scope: RecordScope) {
    match scope {
        RecordScope::All => {}
        RecordScope::Client(client_id) => {
            qb.push(" AND m.client_id = ").push_bind(client_id);
        }
        RecordScope::StaffOrUnassigned(staff_id) => {
            qb.push(" AND (m.assigned_staff_id = ")
                .push_bind(staff_id)
                .push(" OR m.assigned_staff_id IS NULL)");
        }
        RecordScope::Nothing => {
            qb.push(" AND FALSE");
        }
    }
}

#[async_trait]
impl MissionRepository for PgMissionRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mission>, AppError> {
        let mission = sqlx::query_as::<_, Mission>("SELECT * FROM missions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(mission)
    }

    async fn list(
        &self,
        filter: &MissionFilter,
        scope: RecordScope,
    ) -> Result<Vec<MissionListItem>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT
                m.*,
                c.company_name AS client_company_name,
                CASE WHEN s.id IS NULL THEN NULL
                     ELSE s.first_name || ' ' || s.last_name END AS assigned_staff_name
            FROM missions m
            LEFT JOIN clients c ON c.id = m.client_id
            LEFT JOIN staff_profiles s ON s.id = m.assigned_staff_id
            WHERE 1 = 1
            "#,
        );

        push_scope(&mut qb, scope);

        if let Some(client_id) = filter.client_id {
            qb.push(" AND m.client_id = ").push_bind(client_id);
        }
        if let Some(staff_id) = filter.assigned_staff_id {
            qb.push(" AND m.assigned_staff_id = ").push_bind(staff_id);
        }
        if let Some(status) = filter.status {
            qb.push(" AND m.status = ").push_bind(status);
        }
        if let Some(service_type) = filter.service_type {
            qb.push(" AND m.service_type = ").push_bind(service_type);
        }
        if let Some(priority) = filter.priority {
            qb.push(" AND m.priority = ").push_bind(priority);
        }
        if let Some(zone) = &filter.zone {
            qb.push(" AND m.zone = ").push_bind(zone.clone());
        }

        qb.push(" ORDER BY m.created_at DESC");

        if let Some(limit) = filter.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let missions = qb
            .build_query_as::<MissionListItem>()
            .fetch_all(&self.pool)
            .await?;
        Ok(missions)
    }

    async fn list_for_staff(&self, staff_ids: &[Uuid]) -> Result<Vec<Mission>, AppError> {
        if staff_ids.is_empty() {
            return Ok(Vec::new());
        }
        let missions = sqlx::query_as::<_, Mission>(
            "SELECT * FROM missions WHERE assigned_staff_id = ANY($1)",
        )
        .bind(staff_ids.to_vec())
        .fetch_all(&self.pool)
        .await?;
        Ok(missions)
    }

    async fn create(&self, mission: &NewMission) -> Result<Mission, AppError> {
        let created = sqlx::query_as::<_, Mission>(
            r#"
            INSERT INTO missions (
                title, description, location, service_type, status, priority, client_id,
                assigned_staff_id, scheduled_date, scheduled_time, estimated_duration,
                special_instructions, equipment_needed, gps_location, zone
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&mission.title)
        .bind(&mission.description)
        .bind(&mission.location)
        .bind(mission.service_type)
        .bind(mission.status)
        .bind(mission.priority)
        .bind(mission.client_id)
        .bind(mission.assigned_staff_id)
        .bind(mission.scheduled_date)
        .bind(&mission.scheduled_time)
        .bind(mission.estimated_duration)
        .bind(&mission.special_instructions)
        .bind(&mission.equipment_needed)
        .bind(mission.gps_location.clone().map(Json))
        .bind(&mission.zone)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &MissionChanges,
    ) -> Result<Option<Mission>, AppError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE missions SET updated_at = NOW()");

        if let Some(v) = &changes.title {
            qb.push(", title = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.description {
            qb.push(", description = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.location {
            qb.push(", location = ").push_bind(v.clone());
        }
        if let Some(v) = changes.service_type {
            qb.push(", service_type = ").push_bind(v);
        }
        if let Some(v) = changes.status {
            qb.push(", status = ").push_bind(v);
        }
        if let Some(v) = changes.priority {
            qb.push(", priority = ").push_bind(v);
        }
        if let Some(v) = changes.assigned_staff_id {
            qb.push(", assigned_staff_id = ").push_bind(v);
        }
        if let Some(v) = changes.scheduled_date {
            qb.push(", scheduled_date = ").push_bind(v);
        }
        if let Some(v) = &changes.scheduled_time {
            qb.push(", scheduled_time = ").push_bind(v.clone());
        }
        if let Some(v) = changes.estimated_duration {
            qb.push(", estimated_duration = ").push_bind(v);
        }
        if let Some(v) = &changes.special_instructions {
            qb.push(", special_instructions = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.equipment_needed {
            qb.push(", equipment_needed = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.gps_location {
            qb.push(", gps_location = ").push_bind(Json(v.clone()));
        }
        if let Some(v) = &changes.zone {
            qb.push(", zone = ").push_bind(v.clone());
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let mission = qb
            .build_query_as::<Mission>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(mission)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM missions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
