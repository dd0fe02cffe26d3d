use crate::domain::event::parse_event;
use crate::domain::payment::{ErrorEnvelope, ErrorPayload};
use crate::webhook::signature::verify_signature;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

pub async fn paymongo(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(secret) = state.webhook_secret.as_deref() else {
        tracing::error!("PAYMONGO_WEBHOOK_SECRET is not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(err("MISSING_WEBHOOK_SECRET", "webhook secret is not configured")),
        )
            .into_response();
    };

    let signature = headers
        .get("paymongo-signature")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    if !verify_signature(&body, signature, secret) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(err("INVALID_SIGNATURE", "missing or invalid webhook signature")),
        )
            .into_response();
    }

    let event = match parse_event(&body) {
        Ok(event) => event,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(err("MALFORMED_EVENT", &e.to_string())),
            )
                .into_response();
        }
    };

    // Business-rule outcomes (no-op, dropped, mismatch) are success-shaped so
    // the provider's retry machinery is never provoked.
    match state.reconciler.apply(event).await {
        Ok(outcome) => {
            tracing::debug!(?outcome, "webhook processed");
            (StatusCode::OK, Json(serde_json::json!({"received": true}))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "webhook processing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(err("INTERNAL_ERROR", &e.to_string())),
            )
                .into_response()
        }
    }
}

fn err(code: &str, message: &str) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        },
    }
}
