use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Envelope {
    data: EnvelopeData,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    attributes: EventAttributes,
}

#[derive(Debug, Deserialize)]
struct EventAttributes {
    #[serde(rename = "type")]
    event_type: String,
    data: Value,
}

/// Provider webhook event, decoded once at the edge so downstream code never
/// branches on raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    SourceChargeable {
        source_id: String,
        amount_minor: Option<i64>,
    },
    PaymentPaid {
        payment_id: String,
        source_id: Option<String>,
        amount_minor: i64,
    },
    PaymentFailed {
        payment_id: String,
        source_id: Option<String>,
    },
    Unknown {
        event_type: String,
    },
}

pub fn parse_event(raw: &[u8]) -> Result<WebhookEvent> {
    let envelope: Envelope = serde_json::from_slice(raw)?;
    let attrs = envelope.data.attributes;
    let resource = attrs.data;

    match attrs.event_type.as_str() {
        "source.chargeable" => Ok(WebhookEvent::SourceChargeable {
            source_id: resource_id(&resource)?,
            amount_minor: resource_amount(&resource),
        }),
        "payment.paid" => Ok(WebhookEvent::PaymentPaid {
            payment_id: resource_id(&resource)?,
            source_id: embedded_source_id(&resource),
            amount_minor: resource_amount(&resource)
                .ok_or_else(|| anyhow!("payment.paid event missing amount"))?,
        }),
        "payment.failed" => Ok(WebhookEvent::PaymentFailed {
            payment_id: resource_id(&resource)?,
            source_id: embedded_source_id(&resource),
        }),
        other => Ok(WebhookEvent::Unknown {
            event_type: other.to_string(),
        }),
    }
}

fn resource_id(resource: &Value) -> Result<String> {
    resource
        .get("id")
        .and_then(|id| id.as_str())
        .map(ToString::to_string)
        .ok_or_else(|| anyhow!("event resource missing id"))
}

fn resource_amount(resource: &Value) -> Option<i64> {
    resource
        .get("attributes")
        .and_then(|a| a.get("amount"))
        .and_then(Value::as_i64)
}

fn embedded_source_id(resource: &Value) -> Option<String> {
    resource
        .get("attributes")
        .and_then(|a| a.get("source"))
        .and_then(|s| s.get("id"))
        .and_then(|id| id.as_str())
        .map(ToString::to_string)
}
