use axum::routing::{get, post};
use axum::Router;
use pos_payments::config::AppConfig;
use pos_payments::gateways::paymongo::PayMongoGateway;
use pos_payments::repo::order_events_repo::OrderEventsRepo;
use pos_payments::repo::orders_repo::OrdersRepo;
use pos_payments::repo::payments_repo::PaymentsRepo;
use pos_payments::service::reconciler::PaymentReconciler;
use pos_payments::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    if cfg.webhook_secret.is_none() {
        tracing::warn!("PAYMONGO_WEBHOOK_SECRET is not set, webhook deliveries will be rejected");
    }

    let paymongo = Arc::new(PayMongoGateway {
        base_url: cfg.paymongo_base_url.clone(),
        secret_key: cfg.paymongo_secret_key.clone(),
        timeout_ms: cfg.gateway_timeout_ms,
        client: reqwest::Client::new(),
    });

    let reconciler = PaymentReconciler {
        payments_repo: PaymentsRepo { pool: pool.clone() },
        orders_repo: OrdersRepo { pool: pool.clone() },
        order_events_repo: OrderEventsRepo { pool: pool.clone() },
        charger: paymongo,
        currency: cfg.currency.clone(),
    };

    let state = AppState {
        reconciler,
        pool: pool.clone(),
        webhook_secret: cfg.webhook_secret.clone(),
    };

    let app = Router::new()
        .route("/health", get(pos_payments::http::handlers::ops::health))
        .route(
            "/webhooks/paymongo",
            post(pos_payments::http::handlers::webhooks::paymongo),
        )
        .route("/ops/readiness", get(pos_payments::http::handlers::ops::readiness))
        .route("/ops/liveness", get(pos_payments::http::handlers::ops::liveness))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
