use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct OrdersRepo {
    pub pool: PgPool,
}

impl OrdersRepo {
    /// One version bump per reconciler transition; the counter backs the
    /// order layer's optimistic concurrency.
    pub async fn mark_paid(&self, id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE orders
            SET payment_status = 'paid', version = version + 1, paid_at = now(), updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn revert_unpaid(&self, id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE orders
            SET payment_status = 'unpaid', version = version + 1, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
