use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

#[derive(Clone)]
pub struct PaymentsRepo {
    pub pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct StoredPayment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: Decimal,
    pub status: String,
    pub provider_ref: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl PaymentsRepo {
    pub async fn find_by_provider_ref(&self, provider_ref: &str) -> Result<Option<StoredPayment>> {
        let row = sqlx::query(
            r#"
            SELECT id, order_id, amount, status, provider_ref, paid_at
            FROM payments
            WHERE provider_ref = $1
            "#,
        )
        .bind(provider_ref)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| StoredPayment {
            id: r.get("id"),
            order_id: r.get("order_id"),
            amount: r.get("amount"),
            status: r.get("status"),
            provider_ref: r.get("provider_ref"),
            paid_at: r.get("paid_at"),
        }))
    }

    /// Conditional settle; the status guard makes a raced duplicate delivery
    /// observe zero affected rows instead of double-applying.
    pub async fn mark_success(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = 'success', paid_at = now(), updated_at = now()
            WHERE id = $1 AND status IN ('pending', 'processing')
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn mark_failed(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = 'failed', updated_at = now()
            WHERE id = $1 AND status IN ('pending', 'processing')
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_provider_ref(&self, id: Uuid, provider_ref: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET provider_ref = $2, updated_at = now()
            WHERE id = $1 AND status IN ('pending', 'processing')
            "#,
        )
        .bind(id)
        .bind(provider_ref)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
