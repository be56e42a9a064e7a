//! Restaurant configuration
//!
//! Loading (env, file, admin backend) is the embedder's concern; the
//! engine only consumes the resolved values. Defaults mirror the
//! production configuration this engine was first deployed with.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level restaurant configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantConfig {
    pub restaurant_id: i64,
    pub name: String,
    pub contact: ContactConfig,
    pub hours: HoursConfig,
    pub delivery: DeliveryConfig,
    /// Minimum order for takeaway, independent of the delivery block
    pub takeaway_minimum: Decimal,
    pub reservation: ReservationConfig,
    pub tables: TableRange,
    pub payment: PaymentConfig,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            restaurant_id: 1,
            name: "Restaurante Giants".to_string(),
            contact: ContactConfig::default(),
            hours: HoursConfig::default(),
            delivery: DeliveryConfig::default(),
            takeaway_minimum: Decimal::from(50),
            reservation: ReservationConfig::default(),
            tables: TableRange::default(),
            payment: PaymentConfig::default(),
        }
    }
}

/// Contact card shown by the info replies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
    pub address: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: "+52 961 123 4567".to_string(),
            whatsapp: "+52 961 123 4567".to_string(),
            email: "contacto@giants.com".to_string(),
            address: "Av. Central Norte 123, Tuxtla Gutiérrez, Chiapas".to_string(),
        }
    }
}

/// Display strings for opening hours
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HoursConfig {
    pub weekdays: String,
    pub saturday: String,
    pub sunday: String,
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            weekdays: "11:00 AM - 10:00 PM".to_string(),
            saturday: "12:00 PM - 11:00 PM".to_string(),
            sunday: "12:00 PM - 9:00 PM".to_string(),
        }
    }
}

/// Delivery pricing rules and display info
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Base delivery fee, waived at `free_threshold`
    pub fee: Decimal,
    /// Minimum subtotal for delivery orders
    pub minimum: Decimal,
    /// Subtotal at or above which the fee is waived
    pub free_threshold: Decimal,
    pub coverage: String,
    pub eta: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            fee: Decimal::from(35),
            minimum: Decimal::from(150),
            free_threshold: Decimal::from(300),
            coverage: "Tuxtla Gutiérrez centro y alrededores".to_string(),
            eta: "30-45 minutos".to_string(),
        }
    }
}

/// Reservation acceptance window and suggested slots
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationConfig {
    pub opens: NaiveTime,
    pub closes: NaiveTime,
    /// Slots advertised in the hours reply
    pub suggested_slots: Vec<String>,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            opens: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default(),
            closes: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or_default(),
            suggested_slots: ["13:00", "14:00", "15:00", "19:00", "20:00", "21:00"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ReservationConfig {
    pub fn accepts(&self, time: NaiveTime) -> bool {
        time >= self.opens && time <= self.closes
    }
}

/// Valid dine-in table numbers, inclusive
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRange {
    pub min: u32,
    pub max: u32,
}

impl Default for TableRange {
    fn default() -> Self {
        Self { min: 1, max: 40 }
    }
}

impl TableRange {
    pub fn contains(&self, table: u32) -> bool {
        table >= self.min && table <= self.max
    }
}

/// Redirect URLs handed to the payment gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub return_url: String,
    pub cancel_url: String,
    pub currency: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            return_url: "https://giants.example.com/pago/retorno".to_string(),
            cancel_url: "https://giants.example.com/pago/cancelado".to_string(),
            currency: "MXN".to_string(),
        }
    }
}
