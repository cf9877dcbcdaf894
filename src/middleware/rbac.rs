// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, RecordScope},
    middleware::auth::{Actor, AuthenticatedUser},
    models::{Label, auth::Role},
};

/// Conjunto de papéis aceitos por uma rota.
pub trait RoleSet: Send + Sync + 'static {
    fn allowed() -> &'static [Role];
}

/// Extractor: só deixa passar quem tem um dos papéis de `R`.
pub struct RequireRole<R>(pub AuthenticatedUser, pub PhantomData<R>);

impl<R> RequireRole<R> {
    pub fn actor(&self) -> Actor {
        self.0.actor()
    }
}

impl<R, S> FromRequestParts<S> for RequireRole<R>
where
    R: RoleSet,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        require_role(&user.actor(), R::allowed())?;
        Ok(RequireRole(user, PhantomData))
    }
}

pub struct AdminOnly;
impl RoleSet for AdminOnly {
    fn allowed() -> &'static [Role] {
        &[Role::Admin]
    }
}

pub struct AdminOrStaff;
impl RoleSet for AdminOrStaff {
    fn allowed() -> &'static [Role] {
        &[Role::Admin, Role::Staff]
    }
}

pub struct AdminOrClient;
impl RoleSet for AdminOrClient {
    fn allowed() -> &'static [Role] {
        &[Role::Admin, Role::Client]
    }
}

pub struct ClientOnly;
impl RoleSet for ClientOnly {
    fn allowed() -> &'static [Role] {
        &[Role::Client]
    }
}

pub fn require_role(actor: &Actor, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&actor.role) {
        return Ok(());
    }
    tracing::warn!(
        "Acesso negado: {} ({}) fora de [{}]",
        actor.id,
        actor.role,
        allowed.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ")
    );
    Err(AppError::forbidden("Accès refusé: rôle insuffisant"))
}

/// Passa se o papel está em `allowed` ou se `owner` é o próprio ator.
pub fn require_ownership_or_role(
    actor: &Actor,
    owner: Option<Uuid>,
    allowed: &[Role],
) -> Result<(), AppError> {
    if allowed.contains(&actor.role) || owner == Some(actor.id) {
        return Ok(());
    }
    tracing::warn!(
        "Acesso negado: {} ({}) não é dono do recurso",
        actor.id,
        actor.role
    );
    Err(AppError::forbidden(
        "Accès refusé: vous ne pouvez modifier que vos propres ressources",
    ))
}

/// Recorte das listagens: admin vê tudo, cliente só o que é da sua ficha,
/// pessoal as suas missões e as sem responsável.
pub async fn scope_for(
    clients: &dyn ClientRepository,
    actor: &Actor,
) -> Result<RecordScope, AppError> {
    match actor.role {
        Role::Admin => Ok(RecordScope::All),
        Role::Staff => Ok(RecordScope::StaffOrUnassigned(actor.id)),
        Role::Client => Ok(match clients.find_by_user_id(actor.id).await? {
            Some(client) => RecordScope::Client(client.id),
            None => RecordScope::Nothing,
        }),
    }
}
