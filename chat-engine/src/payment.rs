//! Payment gateway and staff notification contracts
//!
//! The gateway mirrors a redirect-style processor: `create_payment`
//! returns an approval URL the visitor is sent to, `capture` finalizes
//! once the external return event arrives. Webhook plumbing is the
//! embedder's concern.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Order summary handed to the payment gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: String,
    pub order_number: i64,
    pub description: String,
    pub total: Decimal,
    pub currency: String,
}

/// Redirect reference for an initiated payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentApproval {
    pub approval_url: String,
    pub payment_id: String,
}

/// Result of a captured payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedPayment {
    pub transaction_id: String,
}

/// Payment gateway error types
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("gateway error: {0}")]
    Gateway(String),

    #[error("payment rejected: {0}")]
    Rejected(String),
}

/// External payment processor
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment(
        &self,
        summary: &OrderSummary,
        return_url: &str,
        cancel_url: &str,
    ) -> Result<PaymentApproval, PaymentError>;

    async fn capture(
        &self,
        payment_id: &str,
        payer_id: &str,
    ) -> Result<CapturedPayment, PaymentError>;
}

/// Kind tag for staff notifications
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    NewOrder,
    NewReservation,
    PaymentCaptured,
    ChatAlert,
}

/// Fire-and-forget channel to the staff (kitchen group, admin chat).
/// The engine logs and swallows any failure.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, kind: NotificationKind, payload: Value) -> anyhow::Result<()>;
}
