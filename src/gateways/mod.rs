use anyhow::Result;

pub mod paymongo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStatus {
    Created,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub source_id: String,
    pub amount_minor: i64,
    pub currency: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct ChargeResult {
    pub status: ChargeStatus,
    pub payment_id: Option<String>,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargeDisposition {
    UpdateReference(String),
    MarkFailed,
    /// The source was charged but the response carried no payment id; the
    /// record must stay open for the confirmation event, not fail.
    Drop,
}

impl ChargeResult {
    pub fn disposition(&self) -> ChargeDisposition {
        match (self.status, &self.payment_id) {
            (ChargeStatus::Created, Some(payment_ref)) => {
                ChargeDisposition::UpdateReference(payment_ref.clone())
            }
            (ChargeStatus::Created, None) => ChargeDisposition::Drop,
            (ChargeStatus::Failed, _) => ChargeDisposition::MarkFailed,
        }
    }
}

#[async_trait::async_trait]
pub trait SourceCharger: Send + Sync {
    fn name(&self) -> &'static str;

    async fn create_payment(&self, request: ChargeRequest) -> Result<ChargeResult>;
}
