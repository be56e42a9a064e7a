//! Order Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fulfillment mode, chosen once per session before ordering
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentMode {
    DineIn,
    Takeaway,
    Delivery,
}

impl FulfillmentMode {
    /// Dine-in settles in person; takeaway and delivery pre-pay online.
    pub fn payment_method(&self) -> PaymentMethod {
        match self {
            FulfillmentMode::DineIn => PaymentMethod::InPerson,
            FulfillmentMode::Takeaway | FulfillmentMode::Delivery => PaymentMethod::Online,
        }
    }

    pub fn requires_prepayment(&self) -> bool {
        self.payment_method() == PaymentMethod::Online
    }

    /// Spanish label used in replies and notifications
    pub fn label_es(&self) -> &'static str {
        match self {
            FulfillmentMode::DineIn => "en restaurante",
            FulfillmentMode::Takeaway => "para llevar",
            FulfillmentMode::Delivery => "delivery",
        }
    }
}

/// Settlement method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    InPerson,
    Online,
}

/// Order status lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    /// Created and handed to the payment gateway, not yet captured
    AwaitingPayment,
    Confirmed,
    Cancelled,
}

/// Identifiers returned by `OrderRepository::create`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub order_id: String,
    /// Short human-facing number shown to the visitor
    pub order_number: i64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub order_number: i64,
    pub customer_id: i64,
    pub fulfillment: FulfillmentMode,
    pub status: OrderStatus,
    pub total: Decimal,
}

/// One line of a persisted order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Customization note, e.g. "sin cebolla, sin tomate"
    pub note: Option<String>,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
