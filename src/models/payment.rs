// src/models/payment.rs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Stripe,
    Paypal,
    BankTransfer,
    Cash,
}

impl_label!(PaymentMethod {
    Stripe => "stripe",
    Paypal => "paypal",
    BankTransfer => "bank_transfer",
    Cash => "cash",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl_label!(PaymentStatus {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
    Refunded => "refunded",
});

impl PaymentStatus {
    /// pending → {completed, failed}, completed → refunded.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Completed) | (Pending, Failed) | (Completed, Refunded)
        )
    }

    pub fn is_deletable(self) -> bool {
        self != PaymentStatus::Completed
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub mission_id: Uuid,
    pub client_id: Uuid,
    #[schema(example = "150.00")]
    pub amount: Decimal,
    #[schema(example = "EUR")]
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub due_date: Option<NaiveDate>,
    pub paid_at: Option<DateTime<Utc>>,
    pub invoice_ref: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct PaymentListItem {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub payment: Payment,
    pub mission_title: Option<String>,
    pub client_company_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentStatistics {
    pub status_counts: BTreeMap<String, usize>,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentListResponse {
    pub payments: Vec<PaymentListItem>,
    pub count: usize,
    pub statistics: PaymentStatistics,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub payment: Payment,
    pub message: String,
}

// Filtros aceitos apenas para admins
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PaymentFilter {
    pub payment_status: Option<PaymentStatus>,
    pub client_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentPayload {
    #[validate(required(message = "client_id est requis"))]
    pub client_id: Option<Uuid>,

    #[validate(required(message = "mission_id est requis"))]
    pub mission_id: Option<Uuid>,

    #[validate(
        required(message = "amount est requis"),
        custom(function = "crate::validation::positive")
    )]
    #[schema(value_type = Option<f64>, example = 150.0)]
    pub amount: Option<Decimal>,

    #[validate(custom(function = "crate::validation::currency"))]
    pub currency: Option<String>,

    #[validate(
        required(message = "payment_method est requis"),
        custom(function = "crate::validation::payment_method")
    )]
    #[schema(example = "bank_transfer")]
    pub payment_method: Option<String>,

    pub due_date: Option<NaiveDate>,
    pub invoice_ref: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePaymentPayload {
    #[validate(custom(function = "crate::validation::positive"))]
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,

    #[validate(custom(function = "crate::validation::currency"))]
    pub currency: Option<String>,

    #[validate(custom(function = "crate::validation::payment_method"))]
    pub payment_method: Option<String>,

    #[validate(custom(function = "crate::validation::payment_status"))]
    pub payment_status: Option<String>,

    pub due_date: Option<NaiveDate>,
    pub invoice_ref: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub mission_id: Uuid,
    pub client_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub due_date: Option<NaiveDate>,
    pub invoice_ref: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentChanges {
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
    pub due_date: Option<NaiveDate>,
    pub paid_at: Option<DateTime<Utc>>,
    pub invoice_ref: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use PaymentStatus::*;

    #[test]
    fn settlement_transitions() {
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Failed));
        assert!(Completed.can_transition_to(Refunded));
        assert!(!Failed.can_transition_to(Completed));
        assert!(!Refunded.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Refunded));
    }

    #[test]
    fn completed_payments_are_kept() {
        assert!(!Completed.is_deletable());
        assert!(Pending.is_deletable());
        assert!(Refunded.is_deletable());
    }
}
