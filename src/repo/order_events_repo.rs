use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Append-only audit log; rows are never updated or deleted.
#[derive(Clone)]
pub struct OrderEventsRepo {
    pub pool: PgPool,
}

impl OrderEventsRepo {
    pub async fn append(
        &self,
        order_id: Uuid,
        event_type: &str,
        metadata: serde_json::Value,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO order_events (order_id, event_type, metadata)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(order_id)
        .bind(event_type)
        .bind(metadata)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
