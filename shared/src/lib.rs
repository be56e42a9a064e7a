//! Shared domain types for the conversational ordering engine
//!
//! Records exchanged with the external collaborators (catalog, customer,
//! order and reservation repositories). Plain serde types only; all
//! behavior lives in the `chat-engine` crate.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
