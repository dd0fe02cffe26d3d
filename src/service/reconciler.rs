use crate::domain::event::WebhookEvent;
use crate::domain::payment::PaymentStatus;
use crate::domain::transition::{self, ChargeAction, ConfirmAction, FailAction};
use crate::gateways::{ChargeDisposition, ChargeRequest, SourceCharger};
use crate::repo::order_events_repo::OrderEventsRepo;
use crate::repo::orders_repo::OrdersRepo;
use crate::repo::payments_repo::{PaymentsRepo, StoredPayment};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Settled,
    MarkedFailed,
    ReferenceUpdated,
    ChargeFailed,
    ChargeDropped,
    Skipped,
    AmountMismatch,
    NotFound,
    Ignored,
}

#[derive(Clone)]
pub struct PaymentReconciler {
    pub payments_repo: PaymentsRepo,
    pub orders_repo: OrdersRepo,
    pub order_events_repo: OrderEventsRepo,
    pub charger: Arc<dyn SourceCharger>,
    pub currency: String,
}

impl PaymentReconciler {
    pub async fn apply(&self, event: WebhookEvent) -> anyhow::Result<ReconcileOutcome> {
        match event {
            WebhookEvent::SourceChargeable {
                source_id,
                amount_minor,
            } => self.handle_source_chargeable(&source_id, amount_minor).await,
            WebhookEvent::PaymentPaid {
                payment_id,
                source_id,
                amount_minor,
            } => {
                self.handle_payment_paid(&payment_id, source_id.as_deref(), amount_minor)
                    .await
            }
            WebhookEvent::PaymentFailed {
                payment_id,
                source_id,
            } => {
                self.handle_payment_failed(&payment_id, source_id.as_deref())
                    .await
            }
            WebhookEvent::Unknown { event_type } => {
                tracing::info!(event_type = %event_type, "ignoring unsupported webhook event");
                Ok(ReconcileOutcome::Ignored)
            }
        }
    }

    async fn handle_source_chargeable(
        &self,
        source_id: &str,
        amount_minor: Option<i64>,
    ) -> anyhow::Result<ReconcileOutcome> {
        let Some(record) = self.payments_repo.find_by_provider_ref(source_id).await? else {
            tracing::warn!(provider_ref = %source_id, "no payment for chargeable source, dropping event");
            return Ok(ReconcileOutcome::NotFound);
        };
        let Some(status) = parse_status(&record) else {
            return Ok(ReconcileOutcome::Skipped);
        };

        if transition::on_source_chargeable(status) == ChargeAction::Skip {
            tracing::info!(payment = %record.id, status = %record.status, "payment already settled, skipping charge");
            return Ok(ReconcileOutcome::Skipped);
        }

        let amount_minor = amount_minor.unwrap_or_else(|| transition::to_minor_units(record.amount));
        let result = self
            .charger
            .create_payment(ChargeRequest {
                source_id: source_id.to_string(),
                amount_minor,
                currency: self.currency.clone(),
                description: format!("order {}", record.order_id),
            })
            .await?;

        match result.disposition() {
            ChargeDisposition::UpdateReference(payment_ref) => {
                // status stays non-terminal; settlement is confirmed by a
                // later payment.paid event
                self.payments_repo.set_provider_ref(record.id, &payment_ref).await?;
                self.append_event(
                    record.order_id,
                    "payment_charge_created",
                    json!({
                        "source_id": source_id,
                        "payment_ref": payment_ref,
                        "amount_minor": amount_minor,
                        "gateway": self.charger.name(),
                    }),
                )
                .await;
                Ok(ReconcileOutcome::ReferenceUpdated)
            }
            ChargeDisposition::Drop => {
                tracing::warn!(
                    payment = %record.id,
                    provider_ref = %source_id,
                    "charge created but provider response carried no payment id, leaving payment untouched"
                );
                Ok(ReconcileOutcome::ChargeDropped)
            }
            ChargeDisposition::MarkFailed => {
                tracing::warn!(
                    payment = %record.id,
                    error_code = result.error_code.as_deref().unwrap_or("UNKNOWN"),
                    error_message = result.error_message.as_deref().unwrap_or(""),
                    "charge creation failed, marking payment failed"
                );
                self.payments_repo.mark_failed(record.id).await?;
                Ok(ReconcileOutcome::ChargeFailed)
            }
        }
    }

    async fn handle_payment_paid(
        &self,
        payment_id: &str,
        source_id: Option<&str>,
        amount_minor: i64,
    ) -> anyhow::Result<ReconcileOutcome> {
        let Some(record) = self.lookup(payment_id, source_id).await? else {
            tracing::warn!(provider_ref = %payment_id, "no payment for paid event, dropping");
            return Ok(ReconcileOutcome::NotFound);
        };
        let Some(status) = parse_status(&record) else {
            return Ok(ReconcileOutcome::Skipped);
        };

        match transition::on_payment_paid(status, record.amount, amount_minor) {
            ConfirmAction::Skip => {
                tracing::info!(
                    payment = %record.id,
                    status = %record.status,
                    paid_at = ?record.paid_at,
                    "duplicate paid event, no-op"
                );
                Ok(ReconcileOutcome::Skipped)
            }
            ConfirmAction::AmountMismatch {
                expected_minor,
                received_minor,
            } => {
                tracing::warn!(
                    payment = %record.id,
                    expected_minor,
                    received_minor,
                    "paid amount does not match expected amount, leaving payment untouched"
                );
                Ok(ReconcileOutcome::AmountMismatch)
            }
            ConfirmAction::Settle => {
                if !self.payments_repo.mark_success(record.id).await? {
                    // lost the conditional update to a concurrent delivery
                    tracing::info!(payment = %record.id, "payment settled concurrently, no-op");
                    return Ok(ReconcileOutcome::Skipped);
                }
                self.orders_repo.mark_paid(record.order_id).await?;
                self.append_event(
                    record.order_id,
                    "payment_received",
                    json!({
                        "payment_ref": payment_id,
                        "amount_minor": amount_minor,
                        "gateway": self.charger.name(),
                    }),
                )
                .await;
                Ok(ReconcileOutcome::Settled)
            }
        }
    }

    async fn handle_payment_failed(
        &self,
        payment_id: &str,
        source_id: Option<&str>,
    ) -> anyhow::Result<ReconcileOutcome> {
        let Some(record) = self.lookup(payment_id, source_id).await? else {
            tracing::warn!(provider_ref = %payment_id, "no payment for failed event, dropping");
            return Ok(ReconcileOutcome::NotFound);
        };
        let Some(status) = parse_status(&record) else {
            return Ok(ReconcileOutcome::Skipped);
        };

        if transition::on_payment_failed(status) == FailAction::Skip {
            tracing::info!(payment = %record.id, status = %record.status, "failed event on settled payment, no-op");
            return Ok(ReconcileOutcome::Skipped);
        }

        if !self.payments_repo.mark_failed(record.id).await? {
            tracing::info!(payment = %record.id, "payment settled concurrently, no-op");
            return Ok(ReconcileOutcome::Skipped);
        }
        self.orders_repo.revert_unpaid(record.order_id).await?;
        self.append_event(
            record.order_id,
            "payment_failed",
            json!({
                "payment_ref": payment_id,
                "gateway": self.charger.name(),
            }),
        )
        .await;
        Ok(ReconcileOutcome::MarkedFailed)
    }

    /// Events reference the provider payment id, but a record that never saw
    /// source.chargeable processing still holds its source id.
    async fn lookup(
        &self,
        payment_id: &str,
        source_id: Option<&str>,
    ) -> anyhow::Result<Option<StoredPayment>> {
        if let Some(found) = self.payments_repo.find_by_provider_ref(payment_id).await? {
            return Ok(Some(found));
        }
        if let Some(source_id) = source_id {
            return self.payments_repo.find_by_provider_ref(source_id).await;
        }
        Ok(None)
    }

    // best-effort: audit failures never fail the webhook response
    async fn append_event(&self, order_id: Uuid, event_type: &str, metadata: serde_json::Value) {
        if let Err(err) = self
            .order_events_repo
            .append(order_id, event_type, metadata)
            .await
        {
            tracing::warn!(error = %err, event_type, "failed to append order event");
        }
    }
}

fn parse_status(record: &StoredPayment) -> Option<PaymentStatus> {
    let status = PaymentStatus::parse(&record.status);
    if status.is_none() {
        tracing::warn!(payment = %record.id, status = %record.status, "unrecognized payment status, skipping event");
    }
    status
}
