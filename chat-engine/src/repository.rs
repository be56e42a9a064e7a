//! Repository contracts
//!
//! Abstract interfaces over the external persistence layer. The engine
//! never owns storage; implementations live with the embedding process
//! (SQL, HTTP, in-memory for tests) and are injected into [`crate::Engine`].

use async_trait::async_trait;
use shared::models::{
    CatalogItem, CategoryWithItems, CreatedOrder, CustomerRecord, CustomerUpdate, FulfillmentMode,
    OrderLine, OrderRecord, OrderStatus, ReservationCreate, ReservationRecord,
};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Read-only access to the menu catalog
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Full menu in display order, unavailable items included
    async fn list_categories_with_items(
        &self,
        restaurant_id: i64,
    ) -> RepoResult<Vec<CategoryWithItems>>;

    /// Candidate items for a normalized free-text query, in catalog order.
    /// The resolver re-scores candidates; repositories may over-return.
    async fn search_items(
        &self,
        restaurant_id: i64,
        normalized_query: &str,
    ) -> RepoResult<Vec<CatalogItem>>;
}

/// Customer identity records
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Find the customer linked to this session identity key, or create one
    async fn get_or_create(
        &self,
        restaurant_id: i64,
        identity_key: &str,
        name: &str,
    ) -> RepoResult<CustomerRecord>;

    async fn update(&self, customer_id: i64, fields: CustomerUpdate) -> RepoResult<()>;
}

/// Order records and their lines
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(
        &self,
        restaurant_id: i64,
        customer_id: i64,
        fulfillment: FulfillmentMode,
    ) -> RepoResult<CreatedOrder>;

    async fn add_line(&self, order_id: &str, line: &OrderLine) -> RepoResult<()>;

    async fn set_status(&self, order_id: &str, status: OrderStatus) -> RepoResult<()>;

    async fn get(&self, order_id: &str) -> RepoResult<OrderRecord>;

    async fn get_lines(&self, order_id: &str) -> RepoResult<Vec<OrderLine>>;
}

/// Table reservations
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn create(
        &self,
        restaurant_id: i64,
        customer_id: i64,
        fields: ReservationCreate,
    ) -> RepoResult<ReservationRecord>;
}
