// src/services/mission_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, shaper},
    config::AppState,
    db::{ClientRepository, MissionRepository, StaffRepository},
    middleware::{
        auth::Actor,
        rbac::{require_ownership_or_role, scope_for},
    },
    models::{
        auth::Role,
        mission::{
            CreateMissionPayload, CreateRequestPayload, Mission, MissionChanges, MissionFilter,
            MissionListResponse, MissionStatus, NewMission, Priority, UpdateMissionPayload,
        },
        staff::StaffStatus,
    },
    validation::{check, field_error, parse_label, require, require_label},
};

#[derive(Clone)]
pub struct MissionService {
    missions: Arc<dyn MissionRepository>,
    clients: Arc<dyn ClientRepository>,
    staff: Arc<dyn StaffRepository>,
}

impl MissionService {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            missions: app_state.missions.clone(),
            clients: app_state.clients.clone(),
            staff: app_state.staff.clone(),
        }
    }

    pub async fn list(
        &self,
        actor: &Actor,
        filter: MissionFilter,
    ) -> Result<MissionListResponse, AppError> {
        check(&filter)?;
        let scope = scope_for(self.clients.as_ref(), actor).await?;
        let missions = self.missions.list(&filter, scope).await?;

        Ok(MissionListResponse {
            count: missions.len(),
            statistics: shaper::mission_statistics(&missions),
            missions,
            filters: filter,
        })
    }

    pub async fn find(&self, id: Uuid) -> Result<Mission, AppError> {
        self.missions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Mission"))
    }

    // Criação completa (admin): com responsável já nasce `assigned`
    pub async fn create(
        &self,
        actor: &Actor,
        payload: CreateMissionPayload,
    ) -> Result<Mission, AppError> {
        check(&payload)?;

        let service_type = require_label("service_type", payload.service_type.as_deref())?;
        let priority = parse_label::<Priority>("priority", payload.priority.as_deref())?
            .unwrap_or(Priority::Medium);
        let client_id = require("client_id", payload.client_id)?;

        self.ensure_client(client_id).await?;
        if let Some(staff_id) = payload.assigned_staff_id {
            self.ensure_assignable(staff_id).await?;
        }

        let status = if payload.assigned_staff_id.is_some() {
            MissionStatus::Assigned
        } else {
            MissionStatus::Pending
        };

        let mission = self
            .missions
            .create(&NewMission {
                title: require("title", payload.title)?,
                description: payload.description,
                location: require("location", payload.location)?,
                service_type,
                status,
                priority,
                client_id,
                assigned_staff_id: payload.assigned_staff_id,
                scheduled_date: payload.scheduled_date,
                scheduled_time: payload.scheduled_time,
                estimated_duration: payload.estimated_duration,
                special_instructions: payload.special_instructions,
                equipment_needed: payload.equipment_needed.unwrap_or_default(),
                gps_location: payload.gps_location,
                zone: payload.zone,
            })
            .await?;

        tracing::info!("Missão {} criada por {} ({})", mission.id, actor.id, mission.status);
        Ok(mission)
    }

    // Pedido de serviço: sempre `pending`, sem responsável. Um cliente só pede para si.
    pub async fn create_request(
        &self,
        actor: &Actor,
        payload: CreateRequestPayload,
    ) -> Result<Mission, AppError> {
        check(&payload)?;

        let client_id = match actor.role {
            Role::Client => {
                self.clients
                    .find_by_user_id(actor.id)
                    .await?
                    .ok_or_else(|| {
                        AppError::forbidden(
                            "Impossible de trouver le profil client associé à cet utilisateur",
                        )
                    })?
                    .id
            }
            _ => {
                let client_id = payload
                    .client_id
                    .ok_or_else(|| field_error("client_id", "client_id est requis"))?;
                self.ensure_client(client_id).await?;
                client_id
            }
        };

        let service_type = require_label("service_type", payload.service_type.as_deref())?;
        let priority = parse_label::<Priority>("priority", payload.priority.as_deref())?
            .unwrap_or(Priority::Medium);

        let mission = self
            .missions
            .create(&NewMission {
                title: require("title", payload.title)?,
                description: payload.description,
                location: require("location", payload.location)?,
                service_type,
                status: MissionStatus::Pending,
                priority,
                client_id,
                assigned_staff_id: None,
                scheduled_date: payload.scheduled_date,
                scheduled_time: None,
                estimated_duration: None,
                special_instructions: payload.special_instructions,
                equipment_needed: Vec::new(),
                gps_location: None,
                zone: payload.zone,
            })
            .await?;

        tracing::info!("Pedido {} aberto por {} para o cliente {}", mission.id, actor.id, client_id);
        Ok(mission)
    }

    /// Atualização parcial: admin ou o responsável atual da missão.
    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        payload: UpdateMissionPayload,
    ) -> Result<Mission, AppError> {
        let current = self.find(id).await?;
        require_ownership_or_role(actor, current.assigned_staff_id, &[Role::Admin])?;
        check(&payload)?;

        let requested_status = parse_label::<MissionStatus>("status", payload.status.as_deref())?;

        // Só um admin troca o responsável
        let new_assignee = payload
            .assigned_staff_id
            .filter(|staff_id| Some(*staff_id) != current.assigned_staff_id);
        if let Some(staff_id) = new_assignee {
            if actor.role != Role::Admin {
                return Err(AppError::forbidden(
                    "Seul un administrateur peut assigner une mission",
                ));
            }
            self.ensure_assignable(staff_id).await?;
        }

        let assignee = new_assignee.or(current.assigned_staff_id);
        let next_status = match requested_status {
            Some(status) => Some(status),
            None if new_assignee.is_some() && current.status == MissionStatus::Pending => {
                Some(MissionStatus::Assigned)
            }
            None => None,
        };

        if let Some(status) = next_status {
            if !current.status.can_transition_to(status) {
                return Err(AppError::conflict(format!(
                    "Transition de statut invalide: {} → {}",
                    current.status, status
                )));
            }
            if matches!(status, MissionStatus::Assigned | MissionStatus::InProgress)
                && assignee.is_none()
            {
                return Err(AppError::conflict(
                    "Une mission assignée doit avoir un membre du personnel",
                ));
            }
        }

        let changes = MissionChanges {
            title: payload.title,
            description: payload.description,
            location: payload.location,
            service_type: parse_label("service_type", payload.service_type.as_deref())?,
            status: next_status,
            priority: parse_label("priority", payload.priority.as_deref())?,
            assigned_staff_id: new_assignee,
            scheduled_date: payload.scheduled_date,
            scheduled_time: payload.scheduled_time,
            estimated_duration: payload.estimated_duration,
            special_instructions: payload.special_instructions,
            equipment_needed: payload.equipment_needed,
            gps_location: payload.gps_location,
            zone: payload.zone,
        };

        let mission = self
            .missions
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Mission"))?;

        tracing::info!("Missão {} atualizada por {}", id, actor.id);
        Ok(mission)
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), AppError> {
        let mission = self.find(id).await?;

        if !mission.status.is_deletable() {
            return Err(AppError::conflict(format!(
                "Impossible de supprimer une mission au statut {}",
                mission.status
            )));
        }

        if !self.missions.delete(id).await? {
            return Err(AppError::not_found("Mission"));
        }

        tracing::info!("Missão {} removida por {}", id, actor.id);
        Ok(())
    }

    async fn ensure_client(&self, client_id: Uuid) -> Result<(), AppError> {
        self.clients
            .find_by_id(client_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Client"))
    }

    // O responsável precisa existir e estar ativo
    async fn ensure_assignable(&self, staff_id: Uuid) -> Result<(), AppError> {
        let member = self
            .staff
            .find_by_id(staff_id)
            .await?
            .ok_or_else(|| AppError::not_found("Membre du personnel"))?;

        if member.status != StaffStatus::Active {
            return Err(AppError::conflict(format!(
                "{} n'est pas actif ({})",
                member.display_name(),
                member.status
            )));
        }
        Ok(())
    }
}
