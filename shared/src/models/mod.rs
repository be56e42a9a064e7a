//! Data models
//!
//! Owned by the external repositories; the engine reads them and never
//! mutates them in place. All money fields are `Decimal`.

pub mod catalog;
pub mod customer;
pub mod order;
pub mod reservation;

// Re-exports
pub use catalog::*;
pub use customer::*;
pub use order::*;
pub use reservation::*;
