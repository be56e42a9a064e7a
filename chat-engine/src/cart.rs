//! Cart and cart lines
//!
//! One cart per session; lines keep the customization chosen during the
//! add dialogue. The cart is purely in-memory until checkout hands it to
//! the order repository.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::OrderLine;

/// Allowed quantity range per line
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 20;

/// One customized, quantified item in the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub item_id: i64,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Removed ingredients, subset of the item's ingredient list
    pub removed: Vec<String>,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Kitchen note, e.g. "sin cebolla, sin tomate"
    pub fn note(&self) -> Option<String> {
        if self.removed.is_empty() {
            None
        } else {
            Some(
                self.removed
                    .iter()
                    .map(|i| format!("sin {i}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        }
    }

    /// Repository line for checkout
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            item_id: self.item_id,
            name: self.name.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            note: self.note(),
        }
    }
}

/// Ordered collection of cart lines for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn push(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, price: i64, qty: u32) -> CartLine {
        CartLine {
            item_id: 1,
            name: name.to_string(),
            unit_price: Decimal::from(price),
            quantity: qty,
            removed: vec![],
        }
    }

    #[test]
    fn test_line_subtotal_is_price_times_quantity() {
        assert_eq!(line("Pizza", 120, 2).subtotal(), Decimal::from(240));
        assert_eq!(line("Pizza", 120, 1).subtotal(), Decimal::from(120));
    }

    #[test]
    fn test_cart_subtotal_sums_lines() {
        let mut cart = Cart::default();
        cart.push(line("Pizza", 120, 2));
        cart.push(line("Lasaña", 95, 1));
        assert_eq!(cart.subtotal(), Decimal::from(335));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_note_lists_removed_ingredients() {
        let mut l = line("Ensalada", 80, 1);
        assert_eq!(l.note(), None);
        l.removed = vec!["cebolla".to_string(), "tomate".to_string()];
        assert_eq!(l.note().as_deref(), Some("sin cebolla, sin tomate"));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::default();
        cart.push(line("Pizza", 120, 1));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }
}
