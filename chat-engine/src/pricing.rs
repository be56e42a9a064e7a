//! Pricing and fulfillment engine
//!
//! Pure calculation over a cart and the configured rules. No rounding
//! beyond two-decimal display formatting, which lives in `replies`.

use crate::cart::Cart;
use crate::config::RestaurantConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::FulfillmentMode;

/// Priced cart under one fulfillment mode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub subtotal: Decimal,
    pub fee: Decimal,
    pub total: Decimal,
    /// Amount missing to reach the applicable minimum, if any
    pub shortfall: Option<Decimal>,
}

impl Quote {
    pub fn violates_minimum(&self) -> bool {
        self.shortfall.is_some()
    }
}

/// Price a cart under the given fulfillment mode.
///
/// - dine-in: no fee, no minimum
/// - takeaway: no fee, configured takeaway minimum
/// - delivery: configured fee, waived at `free_threshold`; configured minimum
pub fn price(cart: &Cart, mode: FulfillmentMode, config: &RestaurantConfig) -> Quote {
    let subtotal = cart.subtotal();

    let (fee, minimum) = match mode {
        FulfillmentMode::DineIn => (Decimal::ZERO, None),
        FulfillmentMode::Takeaway => (Decimal::ZERO, Some(config.takeaway_minimum)),
        FulfillmentMode::Delivery => {
            let fee = if subtotal >= config.delivery.free_threshold {
                Decimal::ZERO
            } else {
                config.delivery.fee
            };
            (fee, Some(config.delivery.minimum))
        }
    };

    let shortfall = minimum
        .map(|min| min - subtotal)
        .filter(|missing| *missing > Decimal::ZERO);

    Quote {
        subtotal,
        fee,
        total: subtotal + fee,
        shortfall,
    }
}
