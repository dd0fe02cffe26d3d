use crate::gateways::{ChargeRequest, ChargeResult, ChargeStatus, SourceCharger};
use anyhow::Result;
use serde_json::json;

pub struct PayMongoGateway {
    pub base_url: String,
    pub secret_key: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl SourceCharger for PayMongoGateway {
    fn name(&self) -> &'static str {
        "paymongo"
    }

    async fn create_payment(&self, request: ChargeRequest) -> Result<ChargeResult> {
        let payments_url = format!("{}/v1/payments", self.base_url);
        let body = json!({
            "data": {
                "attributes": {
                    "amount": request.amount_minor,
                    "currency": request.currency,
                    "description": request.description,
                    "source": {
                        "id": request.source_id,
                        "type": "source"
                    }
                }
            }
        });

        let resp = self
            .client
            .post(payments_url)
            .basic_auth(&self.secret_key, None::<&str>)
            .json(&body)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await;

        let result = match resp {
            Ok(r) if r.status().is_success() => {
                let v: serde_json::Value = r.json().await.unwrap_or_default();
                ChargeResult {
                    status: ChargeStatus::Created,
                    payment_id: v
                        .get("data")
                        .and_then(|d| d.get("id"))
                        .and_then(|id| id.as_str())
                        .map(ToString::to_string),
                    error_code: None,
                    error_message: None,
                }
            }
            Ok(r) => {
                let status = r.status();
                let body = r.text().await.unwrap_or_default();
                ChargeResult {
                    status: ChargeStatus::Failed,
                    payment_id: None,
                    error_code: Some(format!("HTTP_{}", status.as_u16())),
                    error_message: Some(body.chars().take(200).collect()),
                }
            }
            Err(e) if e.is_timeout() => ChargeResult {
                status: ChargeStatus::Failed,
                payment_id: None,
                error_code: Some("TIMEOUT".to_string()),
                error_message: Some("gateway timeout".to_string()),
            },
            Err(e) => ChargeResult {
                status: ChargeStatus::Failed,
                payment_id: None,
                error_code: Some("NETWORK_ERROR".to_string()),
                error_message: Some(e.to_string()),
            },
        };

        Ok(result)
    }
}
