pub mod config;
pub mod domain {
    pub mod event;
    pub mod payment;
    pub mod transition;
}
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod ops;
        pub mod webhooks;
    }
}
pub mod repo {
    pub mod order_events_repo;
    pub mod orders_repo;
    pub mod payments_repo;
}
pub mod service {
    pub mod reconciler;
}
pub mod webhook {
    pub mod signature;
}

#[derive(Clone)]
pub struct AppState {
    pub reconciler: service::reconciler::PaymentReconciler,
    pub pool: sqlx::PgPool,
    pub webhook_secret: Option<String>,
}
