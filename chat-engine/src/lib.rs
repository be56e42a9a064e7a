//! Conversational ordering engine
//!
//! Stateful dialogue engine for a restaurant chat channel: fulfillment
//! choice and registration, menu browsing, free-text item resolution,
//! per-item customization, cart and pricing, reservations, and the
//! checkout handoff to a redirect-style payment gateway.
//!
//! The embedding process owns the transport (Telegram, WhatsApp, web
//! chat) and the persistence layer; it injects both through
//! [`Collaborators`] and calls [`Engine::handle`] once per inbound
//! message.
//!
//! Module layout:
//! - `dispatcher`: [`Engine`], intent matching, per-session routing
//! - `flows`: registration, customization, reservation, checkout
//! - `catalog`: free-text item resolution
//! - `cart` / `pricing`: cart lines and mode-dependent quotes
//! - `session`: dialogue state and the session store
//! - `repository` / `payment`: collaborator contracts
//! - `replies`: every user-facing string
//! - `config` / `text` / `error`: rules, normalization, error funnel

pub mod cart;
pub mod catalog;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod flows;
pub mod payment;
pub mod pricing;
pub mod replies;
pub mod repository;
pub mod session;
pub mod text;

pub use cart::{Cart, CartLine};
pub use catalog::CatalogResolver;
pub use config::RestaurantConfig;
pub use dispatcher::{Collaborators, Engine, Intent};
pub use error::{EngineError, EngineResult};
pub use payment::{
    CapturedPayment, NotificationKind, NotificationSink, OrderSummary, PaymentApproval,
    PaymentError, PaymentGateway,
};
pub use pricing::{price, Quote};
pub use repository::{
    CatalogRepository, CustomerRepository, OrderRepository, RepoError, RepoResult,
    ReservationRepository,
};
pub use session::{DialogueState, InMemorySessionStore, Session, SessionStore};
