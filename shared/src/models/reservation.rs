//! Reservation Models

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Occasion tag attached to a reservation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Occasion {
    Birthday,
    Anniversary,
    Business,
    Other { detail: String },
}

impl Occasion {
    pub fn label_es(&self) -> String {
        match self {
            Occasion::Birthday => "Cumpleaños".to_string(),
            Occasion::Anniversary => "Aniversario".to_string(),
            Occasion::Business => "Negocios".to_string(),
            Occasion::Other { detail } => detail.clone(),
        }
    }
}

/// Fields handed to `ReservationRepository::create`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: u32,
    pub occasion: Option<Occasion>,
    pub notes: Option<String>,
}

/// Persisted reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub id: String,
    /// Short code the visitor presents on arrival
    pub code: String,
    pub customer_id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: u32,
    pub occasion: Option<Occasion>,
    pub notes: Option<String>,
}
