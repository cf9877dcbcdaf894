// src/db/staff_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::staff::{NewStaffProfile, StaffChanges, StaffFilter, StaffProfile},
};

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffProfile>, AppError>;

    async fn list(&self, filter: &StaffFilter) -> Result<Vec<StaffProfile>, AppError>;

    async fn create(&self, profile: &NewStaffProfile) -> Result<StaffProfile, AppError>;

    async fn update(&self, id: Uuid, changes: &StaffChanges)
    -> Result<Option<StaffProfile>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgStaffRepository {
    pool: PgPool,
}

impl PgStaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffRepository for PgStaffRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffProfile>, AppError> {
        let profile =
            sqlx::query_as::<_, StaffProfile>("SELECT * FROM staff_profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(profile)
    }

    async fn list(&self, filter: &StaffFilter) -> Result<Vec<StaffProfile>, AppError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM staff_profiles WHERE 1 = 1");

        if let Some(department) = &filter.department {
            qb.push(" AND department = ").push_bind(department.clone());
        }
        if let Some(position) = &filter.position {
            qb.push(" AND position = ").push_bind(position.clone());
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(skill) = &filter.skills {
            qb.push(" AND ").push_bind(skill.clone()).push(" = ANY(skills)");
        }

        qb.push(" ORDER BY last_name ASC, first_name ASC");

        if let Some(limit) = filter.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }

        let profiles = qb
            .build_query_as::<StaffProfile>()
            .fetch_all(&self.pool)
            .await?;
        Ok(profiles)
    }

    async fn create(&self, profile: &NewStaffProfile) -> Result<StaffProfile, AppError> {
        sqlx::query_as::<_, StaffProfile>(
            r#"
            INSERT INTO staff_profiles (
                id, first_name, last_name, phone, address, hire_date, position, department,
                hourly_rate, skills, certifications, availability, status, emergency_contact
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.phone)
        .bind(&profile.address)
        .bind(profile.hire_date)
        .bind(&profile.position)
        .bind(&profile.department)
        .bind(profile.hourly_rate)
        .bind(&profile.skills)
        .bind(&profile.certifications)
        .bind(Json(profile.availability))
        .bind(profile.status)
        .bind(profile.emergency_contact.clone().map(Json))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::AlreadyExists("Le profil du personnel".into());
                }
            }
            e.into()
        })
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &StaffChanges,
    ) -> Result<Option<StaffProfile>, AppError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE staff_profiles SET updated_at = NOW()");

        if let Some(v) = &changes.first_name {
            qb.push(", first_name = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.last_name {
            qb.push(", last_name = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.phone {
            qb.push(", phone = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.address {
            qb.push(", address = ").push_bind(v.clone());
        }
        if let Some(v) = changes.hire_date {
            qb.push(", hire_date = ").push_bind(v);
        }
        if let Some(v) = &changes.position {
            qb.push(", position = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.department {
            qb.push(", department = ").push_bind(v.clone());
        }
        if let Some(v) = changes.hourly_rate {
            qb.push(", hourly_rate = ").push_bind(v);
        }
        if let Some(v) = &changes.skills {
            qb.push(", skills = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.certifications {
            qb.push(", certifications = ").push_bind(v.clone());
        }
        if let Some(v) = changes.availability {
            qb.push(", availability = ").push_bind(Json(v));
        }
        if let Some(v) = changes.status {
            qb.push(", status = ").push_bind(v);
        }
        if let Some(v) = &changes.emergency_contact {
            qb.push(", emergency_contact = ").push_bind(Json(v.clone()));
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let profile = qb
            .build_query_as::<StaffProfile>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM staff_profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
