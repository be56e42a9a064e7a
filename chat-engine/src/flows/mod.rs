//! Conversation sub-flows
//!
//! Each flow owns the messages that arrive while its dialogue state is
//! active, validates input, and never advances state on a validation
//! failure.

pub mod checkout;
pub mod customization;
pub mod registration;
pub mod reservation;
