// src/services/user_service.rs
//
// Contas de acesso. Cada usuário existe em dois lugares (provedor de identidade
// e tabela `users`) sem transação entre eles: a criação desfaz a identidade se
// a linha não puder ser gravada.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    db::UserRepository,
    middleware::auth::Actor,
    models::auth::{
        CreateUserPayload, NewIdentity, NewUser, Role, UpdateUserPayload, User, UserChanges,
    },
    services::identity::IdentityProvider,
    validation::{check, parse_label, require, require_label},
};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl UserService {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            users: app_state.users.clone(),
            identity: app_state.identity.clone(),
        }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    /// Provisiona identidade + linha em `users`.
    pub async fn create(&self, actor: &Actor, payload: CreateUserPayload) -> Result<User, AppError> {
        check(&payload)?;

        let role: Role = require_label("role", payload.role.as_deref())?;
        let email = require("email", payload.email)?;
        let full_name = require("full_name", payload.full_name)?;

        let identity = self
            .identity
            .create_user(&NewIdentity {
                email: email.clone(),
                password: require("password", payload.password)?,
                full_name: full_name.clone(),
                role,
            })
            .await?;

        let created = self
            .users
            .create(&NewUser {
                id: identity.id,
                full_name,
                email,
                role,
            })
            .await;

        match created {
            Ok(user) => {
                tracing::info!("Usuário {} ({}) criado por {}", user.id, user.role, actor.id);
                Ok(user)
            }
            Err(err) => {
                // Compensação: sem a linha em `users` a identidade fica órfã
                tracing::error!("Falha ao gravar o usuário {}: {}", identity.id, err);
                if let Err(undo) = self.identity.delete_user(identity.id).await {
                    tracing::error!(
                        "Identidade {} ficou órfã (falha ao desfazer): {}",
                        identity.id,
                        undo
                    );
                }
                Err(err)
            }
        }
    }

    /// Metadados no provedor primeiro, depois a linha.
    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        payload: UpdateUserPayload,
    ) -> Result<User, AppError> {
        check(&payload)?;

        let changes = UserChanges {
            full_name: payload.full_name,
            role: parse_label("role", payload.role.as_deref())?,
        };

        let current = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Utilisateur"))?;
        if changes.is_empty() {
            return Ok(current);
        }

        self.identity.update_user_by_id(id, &changes).await?;

        let user = self
            .users
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Utilisateur"))?;

        tracing::info!("Usuário {} atualizado por {}", id, actor.id);
        Ok(user)
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), AppError> {
        if actor.id == id {
            return Err(AppError::conflict(
                "Vous ne pouvez pas supprimer votre propre compte",
            ));
        }
        if self.users.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("Utilisateur"));
        }

        self.identity.delete_user(id).await?;
        self.users.delete(id).await?;

        tracing::info!("Usuário {} removido por {}", id, actor.id);
        Ok(())
    }
}
