//! Session aggregate and session store
//!
//! One [`Session`] per visitor conversation. `DialogueState` encodes the
//! sub-flow that currently owns inbound messages as mutually exclusive
//! variants, so "exactly one active sub-flow" holds structurally. The
//! store hands out `Arc<Mutex<Session>>` cells; holding the lock for the
//! whole `handle` call gives single-flight per session key while
//! distinct sessions proceed concurrently.

use crate::cart::Cart;
use chrono::{NaiveDate, NaiveTime};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use shared::models::{CatalogItem, FulfillmentMode, Occasion};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Registration ladder position; the sequence depends on the chosen
/// fulfillment mode (see `flows::registration`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStep {
    Name,
    TableNumber,
    PartySize,
    Phone,
    Address,
    Email,
}

/// Reservation ladder position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStep {
    Date,
    Time,
    PartySize,
    Occasion,
    Notes,
    Confirm,
}

/// Which flow consumes the next inbound message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogueState {
    /// Initial 4-way choice: dine-in, takeaway, delivery, information
    ChoosingFulfillment,
    /// Read-only info sub-menu reachable from the fulfillment choice
    InfoMenu,
    Registering(RegistrationStep),
    /// Registered, no sub-flow active; intents are matched here
    Idle,
    AwaitingQuantity,
    AwaitingIngredients,
    Reserving(ReservationStep),
}

/// A cart line under construction during the customization dialogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLine {
    pub item: CatalogItem,
    pub quantity: Option<u32>,
    pub removed: Vec<String>,
}

impl PendingLine {
    pub fn new(item: CatalogItem) -> Self {
        Self {
            item,
            quantity: None,
            removed: Vec::new(),
        }
    }
}

/// In-progress reservation fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub party_size: Option<u32>,
    pub occasion: Option<Occasion>,
    pub notes: Option<String>,
}

/// Per-visitor conversation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque key from the transport (chat id, web session id)
    pub key: String,
    /// Numeric visitor handle derived from the key
    pub visitor_handle: u64,
    /// Set once registration completes; registration fields are
    /// immutable for the rest of the session
    pub customer_id: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub table_number: Option<u32>,
    pub party_size: Option<u32>,
    pub fulfillment: Option<FulfillmentMode>,
    pub state: DialogueState,
    pub cart: Cart,
    /// Non-None iff `state` is AwaitingQuantity or AwaitingIngredients
    pub pending: Option<PendingLine>,
    /// Present only while `state` is Reserving(_)
    pub reservation: Option<ReservationDraft>,
    /// Order awaiting payment confirmation, if any
    pub order_id: Option<String>,
}

impl Session {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let visitor_handle = hasher.finish() % 1_000_000;
        Self {
            key,
            visitor_handle,
            customer_id: None,
            name: None,
            phone: None,
            address: None,
            email: None,
            table_number: None,
            party_size: None,
            fulfillment: None,
            state: DialogueState::ChoosingFulfillment,
            cart: Cart::default(),
            pending: None,
            reservation: None,
            order_id: None,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.customer_id.is_some()
    }
}

/// Session storage abstraction; swap for a distributed store without
/// touching dialogue logic.
pub trait SessionStore: Send + Sync {
    /// Look up or create the session cell for `key`
    fn get_or_create(&self, key: &str) -> Arc<Mutex<Session>>;

    /// Drop the session for `key`, if present
    fn reset(&self, key: &str);
}

/// Process-local session store
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, Arc<Mutex<Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get_or_create(&self, key: &str) -> Arc<Mutex<Session>> {
        self.sessions
            .entry(key.to_string())
            .or_insert_with(|| {
                tracing::info!(session_key = %key, "session created");
                Arc::new(Mutex::new(Session::new(key)))
            })
            .clone()
    }

    fn reset(&self, key: &str) {
        self.sessions.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_fulfillment_choice() {
        let s = Session::new("abc");
        assert_eq!(s.state, DialogueState::ChoosingFulfillment);
        assert!(!s.is_registered());
        assert!(s.pending.is_none());
        assert!(s.reservation.is_none());
        assert!(s.cart.is_empty());
    }

    #[test]
    fn test_visitor_handle_is_stable_and_bounded() {
        let a = Session::new("web-1");
        let b = Session::new("web-1");
        assert_eq!(a.visitor_handle, b.visitor_handle);
        assert!(a.visitor_handle < 1_000_000);
    }

    #[test]
    fn test_store_returns_same_cell_for_same_key() {
        let store = InMemorySessionStore::new();
        let a = store.get_or_create("k1");
        let b = store.get_or_create("k1");
        assert!(Arc::ptr_eq(&a, &b));

        store.reset("k1");
        let c = store.get_or_create("k1");
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
