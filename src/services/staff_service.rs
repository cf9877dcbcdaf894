// src/services/staff_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{error::AppError, shaper},
    config::AppState,
    db::{ActivityRepository, MissionRepository, StaffRepository, UserRepository},
    middleware::{auth::Actor, rbac::require_ownership_or_role},
    models::{
        auth::Role,
        staff::{
            CreateStaffPayload, NewStaffProfile, StaffChanges, StaffFilter, StaffListResponse,
            StaffProfile, StaffStatus, UpdateStaffPayload,
        },
    },
    services::identity::IdentityProvider,
    validation::{check, parse_label, require},
};

#[derive(Clone)]
pub struct StaffService {
    staff: Arc<dyn StaffRepository>,
    users: Arc<dyn UserRepository>,
    missions: Arc<dyn MissionRepository>,
    activity: Arc<dyn ActivityRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl StaffService {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            staff: app_state.staff.clone(),
            users: app_state.users.clone(),
            missions: app_state.missions.clone(),
            activity: app_state.activity.clone(),
            identity: app_state.identity.clone(),
        }
    }

    /// Lista o pessoal com média de avaliações e missões ativas de cada um.
    pub async fn list(&self, filter: StaffFilter) -> Result<StaffListResponse, AppError> {
        check(&filter)?;
        let profiles = self.staff.list(&filter).await?;
        let ids: Vec<Uuid> = profiles.iter().map(|p| p.id).collect();

        let ratings = self.activity.ratings_for_staff(&ids).await?;
        let missions = self.missions.list_for_staff(&ids).await?;

        let staff = shaper::shape_staff(profiles, &ratings, &missions);
        Ok(StaffListResponse {
            count: staff.len(),
            statistics: shaper::staff_statistics(&staff),
            staff,
            filters: filter,
        })
    }

    pub async fn create(
        &self,
        actor: &Actor,
        payload: CreateStaffPayload,
    ) -> Result<StaffProfile, AppError> {
        check(&payload)?;

        // O perfil pendura numa conta já provisionada (provedor + `users`)
        let id = require("id", payload.id)?;
        if self.identity.get_user_by_id(id).await?.is_none()
            || self.users.find_by_id(id).await?.is_none()
        {
            return Err(AppError::not_found("Utilisateur"));
        }
        if self.staff.find_by_id(id).await?.is_some() {
            return Err(AppError::AlreadyExists("Le profil du personnel".into()));
        }

        let status = parse_label::<StaffStatus>("status", payload.status.as_deref())?
            .unwrap_or(StaffStatus::Active);

        let profile = self
            .staff
            .create(&NewStaffProfile {
                id,
                first_name: require("first_name", payload.first_name)?,
                last_name: require("last_name", payload.last_name)?,
                phone: payload.phone,
                address: payload.address,
                hire_date: payload.hire_date.unwrap_or_else(|| Utc::now().date_naive()),
                position: require("position", payload.position)?,
                department: payload.department,
                hourly_rate: payload.hourly_rate,
                skills: payload.skills.unwrap_or_default(),
                certifications: payload.certifications.unwrap_or_default(),
                availability: payload.availability.unwrap_or_default(),
                status,
                emergency_contact: payload.emergency_contact,
            })
            .await?;

        tracing::info!("Perfil de pessoal {} criado por {}", profile.id, actor.id);
        Ok(profile)
    }

    /// Admin edita tudo; o próprio membro só os dados pessoais.
    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        payload: UpdateStaffPayload,
    ) -> Result<StaffProfile, AppError> {
        require_ownership_or_role(actor, Some(id), &[Role::Admin])?;
        check(&payload)?;

        let changes = StaffChanges {
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.phone,
            address: payload.address,
            hire_date: payload.hire_date,
            position: payload.position,
            department: payload.department,
            hourly_rate: payload.hourly_rate,
            skills: payload.skills,
            certifications: payload.certifications,
            availability: payload.availability,
            status: parse_label("status", payload.status.as_deref())?,
            emergency_contact: payload.emergency_contact,
        };

        if actor.role != Role::Admin && changes.touches_employment() {
            tracing::warn!("{} tentou alterar o próprio vínculo (status/cargo/salário)", actor.id);
            return Err(AppError::forbidden(
                "Seul un administrateur peut modifier le statut, le poste, le département ou le taux horaire",
            ));
        }

        let profile = self
            .staff
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Membre du personnel"))?;

        tracing::info!("Perfil de pessoal {} atualizado por {}", id, actor.id);
        Ok(profile)
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), AppError> {
        if self.staff.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("Membre du personnel"));
        }

        let active = self
            .missions
            .list_for_staff(&[id])
            .await?
            .iter()
            .filter(|m| m.status.is_active())
            .count();
        if active > 0 {
            return Err(AppError::conflict(format!(
                "Ce membre du personnel a encore {} mission(s) en cours",
                active
            )));
        }

        if !self.staff.delete(id).await? {
            return Err(AppError::not_found("Membre du personnel"));
        }

        tracing::info!("Perfil de pessoal {} removido por {}", id, actor.id);
        Ok(())
    }
}
