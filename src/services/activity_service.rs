// src/services/activity_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    db::{ActivityRepository, ClientRepository, MissionRepository},
    middleware::{
        auth::Actor,
        rbac::{require_ownership_or_role, scope_for},
    },
    models::{
        activity::{
            Comment, CreateCommentPayload, CreateMissionUpdatePayload, CreateRatingPayload,
            MissionUpdate, NewComment, NewMissionUpdate, NewRating, Rating,
        },
        auth::Role,
        mission::{Mission, MissionStatus},
    },
    validation::{check, require},
};

#[derive(Clone)]
pub struct ActivityService {
    activity: Arc<dyn ActivityRepository>,
    missions: Arc<dyn MissionRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl ActivityService {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            activity: app_state.activity.clone(),
            missions: app_state.missions.clone(),
            clients: app_state.clients.clone(),
        }
    }

    async fn mission(&self, id: Uuid) -> Result<Mission, AppError> {
        self.missions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Mission"))
    }

    /// Qualquer ator que enxergue a missão pode comentar.
    pub async fn add_comment(
        &self,
        actor: &Actor,
        mission_id: Uuid,
        payload: CreateCommentPayload,
    ) -> Result<Comment, AppError> {
        let mission = self.mission(mission_id).await?;

        let scope = scope_for(self.clients.as_ref(), actor).await?;
        if !scope.admits_mission(mission.client_id, mission.assigned_staff_id) {
            return Err(AppError::forbidden("Accès refusé à cette mission"));
        }
        check(&payload)?;

        self.activity
            .add_comment(&NewComment {
                mission_id,
                user_id: actor.id,
                content: require("content", payload.content)?,
            })
            .await
    }

    /// Relatório de campo: admin ou o responsável da missão.
    pub async fn add_mission_update(
        &self,
        actor: &Actor,
        mission_id: Uuid,
        payload: CreateMissionUpdatePayload,
    ) -> Result<MissionUpdate, AppError> {
        let mission = self.mission(mission_id).await?;
        require_ownership_or_role(actor, mission.assigned_staff_id, &[Role::Admin])?;
        check(&payload)?;

        let staff_id = match actor.role {
            Role::Staff => Some(actor.id),
            _ => mission.assigned_staff_id,
        };

        self.activity
            .add_mission_update(&NewMissionUpdate {
                mission_id,
                staff_id,
                update_type: require("update_type", payload.update_type)?,
                content: payload.content,
                photo_url: payload.photo_url,
            })
            .await
    }

    /// Avaliação do responsável, feita pelo cliente dono de uma missão concluída.
    pub async fn rate_mission(
        &self,
        actor: &Actor,
        mission_id: Uuid,
        payload: CreateRatingPayload,
    ) -> Result<Rating, AppError> {
        let mission = self.mission(mission_id).await?;

        let client = self
            .clients
            .find_by_user_id(actor.id)
            .await?
            .ok_or_else(|| AppError::forbidden("Aucun profil client associé à cet utilisateur"))?;
        if client.id != mission.client_id {
            return Err(AppError::forbidden("Cette mission ne vous appartient pas"));
        }
        check(&payload)?;

        if mission.status != MissionStatus::Completed {
            return Err(AppError::conflict(
                "Seule une mission terminée peut être évaluée",
            ));
        }
        let staff_id = mission
            .assigned_staff_id
            .ok_or_else(|| AppError::conflict("Aucun membre du personnel à évaluer"))?;

        if self.activity.rating_for_mission(mission_id).await?.is_some() {
            return Err(AppError::AlreadyExists("L'évaluation de cette mission".into()));
        }

        let rating = self
            .activity
            .add_rating(&NewRating {
                mission_id,
                staff_id,
                client_id: client.id,
                rating: require("rating", payload.rating)?,
                comment: payload.comment,
            })
            .await?;

        tracing::info!("Missão {} avaliada com {} por {}", mission_id, rating.rating, actor.id);
        Ok(rating)
    }
}
