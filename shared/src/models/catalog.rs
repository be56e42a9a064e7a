//! Catalog Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Emoji shown in front of the category name, e.g. "🍕"
    pub icon: Option<String>,
    pub description: Option<String>,
    pub sort_order: i32,
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Unit price
    pub price: Decimal,
    /// Unavailable items stay visible in listings marked "AGOTADO"
    pub is_available: bool,
    /// Removable ingredients, in kitchen order
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Category name snapshot
    pub category: String,
    /// Preparation time for display, e.g. "15 min"
    pub prep_time: Option<String>,
}

/// One category together with its items, as returned by the catalog
/// repository in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWithItems {
    pub category: Category,
    pub items: Vec<CatalogItem>,
}

impl CategoryWithItems {
    /// Lowest item price in this category, if any
    pub fn min_price(&self) -> Option<Decimal> {
        self.items.iter().map(|i| i.price).min()
    }

    /// Highest item price in this category, if any
    pub fn max_price(&self) -> Option<Decimal> {
        self.items.iter().map(|i| i.price).max()
    }
}
