// src/services/payment_service.rs

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{error::AppError, shaper},
    config::AppState,
    db::{ClientRepository, MissionRepository, PaymentRepository, RecordScope},
    middleware::{auth::Actor, rbac::scope_for},
    models::{
        auth::Role,
        payment::{
            CreatePaymentPayload, NewPayment, Payment, PaymentChanges, PaymentFilter,
            PaymentListResponse, PaymentStatus, UpdatePaymentPayload,
        },
    },
    validation::{check, parse_label, require, require_label},
};

const DEFAULT_CURRENCY: &str = "EUR";

#[derive(Clone)]
pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    missions: Arc<dyn MissionRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl PaymentService {
    pub fn new(app_state: &AppState) -> Self {
        Self {
            payments: app_state.payments.clone(),
            missions: app_state.missions.clone(),
            clients: app_state.clients.clone(),
        }
    }

    /// Cliente vê os seus, admin vê tudo (com filtros), pessoal não vê nada.
    pub async fn list(
        &self,
        actor: &Actor,
        filter: PaymentFilter,
    ) -> Result<PaymentListResponse, AppError> {
        let (scope, filter) = match actor.role {
            Role::Admin => (RecordScope::All, filter),
            Role::Client => (
                scope_for(self.clients.as_ref(), actor).await?,
                PaymentFilter::default(),
            ),
            Role::Staff => (RecordScope::Nothing, PaymentFilter::default()),
        };

        let payments = self.payments.list(&filter, scope).await?;
        Ok(PaymentListResponse {
            count: payments.len(),
            statistics: shaper::payment_statistics(&payments),
            payments,
        })
    }

    pub async fn create(
        &self,
        actor: &Actor,
        payload: CreatePaymentPayload,
    ) -> Result<Payment, AppError> {
        check(&payload)?;

        let mission_id = require("mission_id", payload.mission_id)?;
        let client_id = require("client_id", payload.client_id)?;

        let mission = self
            .missions
            .find_by_id(mission_id)
            .await?
            .ok_or_else(|| AppError::not_found("Mission"))?;

        // O pagamento pertence ao mesmo cliente da missão
        if mission.client_id != client_id {
            return Err(AppError::conflict(
                "Le client du paiement ne correspond pas au client de la mission",
            ));
        }

        let payment = self
            .payments
            .create(&NewPayment {
                mission_id,
                client_id,
                amount: require("amount", payload.amount)?,
                currency: payload
                    .currency
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
                payment_method: require_label("payment_method", payload.payment_method.as_deref())?,
                due_date: payload.due_date,
                invoice_ref: payload.invoice_ref,
                description: payload.description,
            })
            .await?;

        tracing::info!(
            "Pagamento {} ({} {}) criado por {}",
            payment.id,
            payment.amount,
            payment.currency,
            actor.id
        );
        Ok(payment)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: Uuid,
        payload: UpdatePaymentPayload,
    ) -> Result<Payment, AppError> {
        check(&payload)?;

        let current = self.find(id).await?;
        let next_status =
            parse_label::<PaymentStatus>("payment_status", payload.payment_status.as_deref())?;

        let mut paid_at = None;
        if let Some(status) = next_status {
            if !current.payment_status.can_transition_to(status) {
                return Err(AppError::conflict(format!(
                    "Transition de statut invalide: {} → {}",
                    current.payment_status, status
                )));
            }
            // Entrar em `completed` carimba `paid_at` se ainda não houver
            if status == PaymentStatus::Completed
                && current.payment_status != PaymentStatus::Completed
                && current.paid_at.is_none()
            {
                paid_at = Some(Utc::now());
            }
        }

        let changes = PaymentChanges {
            amount: payload.amount,
            currency: payload.currency,
            payment_method: parse_label("payment_method", payload.payment_method.as_deref())?,
            payment_status: next_status,
            due_date: payload.due_date,
            paid_at,
            invoice_ref: payload.invoice_ref,
            description: payload.description,
        };

        let payment = self
            .payments
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Paiement"))?;

        tracing::info!("Pagamento {} atualizado por {}", id, actor.id);
        Ok(payment)
    }

    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), AppError> {
        let payment = self.find(id).await?;

        if !payment.payment_status.is_deletable() {
            return Err(AppError::conflict(
                "Impossible de supprimer un paiement complété",
            ));
        }

        if !self.payments.delete(id).await? {
            return Err(AppError::not_found("Paiement"));
        }

        tracing::info!("Pagamento {} removido por {}", id, actor.id);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Payment, AppError> {
        self.payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Paiement"))
    }
}
