// src/db/payment_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::RecordScope,
    models::payment::{NewPayment, Payment, PaymentChanges, PaymentFilter, PaymentListItem},
};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError>;

    async fn list(
        &self,
        filter: &PaymentFilter,
        scope: RecordScope,
    ) -> Result<Vec<PaymentListItem>, AppError>;

    async fn create(&self, payment: &NewPayment) -> Result<Payment, AppError>;

    async fn update(&self, id: Uuid, changes: &PaymentChanges)
    -> Result<Option<Payment>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(payment)
    }

    async fn list(
        &self,
        filter: &PaymentFilter,
        scope: RecordScope,
    ) -> Result<Vec<PaymentListItem>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT
                p.*,
                m.title AS mission_title,
                c.company_name AS client_company_name
            FROM payments p
            LEFT JOIN missions m ON m.id = p.mission_id
            LEFT JOIN clients c ON c.id = p.client_id
            WHERE 1 = 1
            "#,
        );

        match scope {
            RecordScope::All => {}
            RecordScope::Client(client_id) => {
                qb.push(" AND p.client_id = ").push_bind(client_id);
            }
            // Pagamentos não têm responsável: pessoal não enxerga nenhum
            RecordScope::StaffOrUnassigned(_) | RecordScope::Nothing => {
                qb.push(" AND FALSE");
            }
        }

        if let Some(status) = filter.payment_status {
            qb.push(" AND p.payment_status = ").push_bind(status);
        }
        if let Some(client_id) = filter.client_id {
            qb.push(" AND p.client_id = ").push_bind(client_id);
        }

        qb.push(" ORDER BY p.created_at DESC");

        let payments = qb
            .build_query_as::<PaymentListItem>()
            .fetch_all(&self.pool)
            .await?;
        Ok(payments)
    }

    async fn create(&self, payment: &NewPayment) -> Result<Payment, AppError> {
        let created = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (
                mission_id, client_id, amount, currency, payment_method, payment_status,
                due_date, invoice_ref, description
            )
            VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(payment.mission_id)
        .bind(payment.client_id)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(payment.payment_method)
        .bind(payment.due_date)
        .bind(&payment.invoice_ref)
        .bind(&payment.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &PaymentChanges,
    ) -> Result<Option<Payment>, AppError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE payments SET updated_at = NOW()");

        if let Some(v) = changes.amount {
            qb.push(", amount = ").push_bind(v);
        }
        if let Some(v) = &changes.currency {
            qb.push(", currency = ").push_bind(v.clone());
        }
        if let Some(v) = changes.payment_method {
            qb.push(", payment_method = ").push_bind(v);
        }
        if let Some(v) = changes.payment_status {
            qb.push(", payment_status = ").push_bind(v);
        }
        if let Some(v) = changes.due_date {
            qb.push(", due_date = ").push_bind(v);
        }
        if let Some(v) = changes.paid_at {
            qb.push(", paid_at = ").push_bind(v);
        }
        if let Some(v) = &changes.invoice_ref {
            qb.push(", invoice_ref = ").push_bind(v.clone());
        }
        if let Some(v) = &changes.description {
            qb.push(", description = ").push_bind(v.clone());
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let payment = qb
            .build_query_as::<Payment>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(payment)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
