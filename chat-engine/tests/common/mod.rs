//! Shared test fixtures: an in-memory menu plus recording fakes for
//! every engine collaborator.

use async_trait::async_trait;
use chat_engine::payment::{
    CapturedPayment, NotificationKind, NotificationSink, OrderSummary, PaymentApproval,
    PaymentError, PaymentGateway,
};
use chat_engine::repository::{
    CatalogRepository, CustomerRepository, OrderRepository, RepoError, RepoResult,
    ReservationRepository,
};
use chat_engine::{Collaborators, Engine, RestaurantConfig};
use rust_decimal::Decimal;
use serde_json::Value;
use shared::models::{
    CatalogItem, Category, CategoryWithItems, CreatedOrder, CustomerRecord, CustomerUpdate,
    FulfillmentMode, OrderLine, OrderRecord, OrderStatus, ReservationCreate, ReservationRecord,
};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

pub fn item(id: i64, name: &str, price: i64, available: bool, ingredients: &[&str]) -> CatalogItem {
    CatalogItem {
        id,
        name: name.to_string(),
        description: String::new(),
        price: Decimal::from(price),
        is_available: available,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        category: String::new(),
        prep_time: Some("15 min".to_string()),
    }
}

pub fn menu() -> Vec<CategoryWithItems> {
    let category = |id: i64, name: &str| Category {
        id,
        name: name.to_string(),
        icon: None,
        description: None,
        sort_order: id as i32,
    };
    vec![
        CategoryWithItems {
            category: category(1, "Pizzas"),
            items: vec![
                item(1, "Pizza Margherita", 120, true, &["tomate", "mozzarella", "albahaca"]),
                item(2, "Pizza Pepperoni", 145, true, &["pepperoni", "mozzarella"]),
            ],
        },
        CategoryWithItems {
            category: category(2, "Pastas"),
            items: vec![item(3, "Lasaña Clásica", 95, false, &[])],
        },
        CategoryWithItems {
            category: category(3, "Bebidas"),
            items: vec![item(4, "Agua Mineral", 25, true, &[])],
        },
    ]
}

pub struct FakeCatalog(pub Vec<CategoryWithItems>);

#[async_trait]
impl CatalogRepository for FakeCatalog {
    async fn list_categories_with_items(
        &self,
        _restaurant_id: i64,
    ) -> RepoResult<Vec<CategoryWithItems>> {
        Ok(self.0.clone())
    }

    async fn search_items(
        &self,
        _restaurant_id: i64,
        _normalized_query: &str,
    ) -> RepoResult<Vec<CatalogItem>> {
        Ok(self.0.iter().flat_map(|c| c.items.clone()).collect())
    }
}

#[derive(Default)]
pub struct RecordingCustomers {
    pub updates: Mutex<Vec<(i64, CustomerUpdate)>>,
}

#[async_trait]
impl CustomerRepository for RecordingCustomers {
    async fn get_or_create(
        &self,
        _restaurant_id: i64,
        identity_key: &str,
        name: &str,
    ) -> RepoResult<CustomerRecord> {
        Ok(CustomerRecord {
            id: 1,
            name: name.to_string(),
            phone: None,
            address: None,
            email: Some(format!("{identity_key}@test")),
        })
    }

    async fn update(&self, customer_id: i64, fields: CustomerUpdate) -> RepoResult<()> {
        self.updates.lock().unwrap().push((customer_id, fields));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingOrders {
    next_number: AtomicI64,
    pub orders: Mutex<Vec<OrderRecord>>,
    pub lines: Mutex<Vec<(String, OrderLine)>>,
}

impl RecordingOrders {
    pub fn status_of(&self, order_id: &str) -> Option<OrderStatus> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == order_id)
            .map(|o| o.status)
    }

    pub fn lines_of(&self, order_id: &str) -> Vec<OrderLine> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == order_id)
            .map(|(_, l)| l.clone())
            .collect()
    }
}

#[async_trait]
impl OrderRepository for RecordingOrders {
    async fn create(
        &self,
        _restaurant_id: i64,
        customer_id: i64,
        fulfillment: FulfillmentMode,
    ) -> RepoResult<CreatedOrder> {
        let number = 100 + self.next_number.fetch_add(1, Ordering::SeqCst);
        let order_id = format!("ord-{number}");
        self.orders.lock().unwrap().push(OrderRecord {
            id: order_id.clone(),
            order_number: number,
            customer_id,
            fulfillment,
            status: OrderStatus::Pending,
            total: Decimal::ZERO,
        });
        Ok(CreatedOrder {
            order_id,
            order_number: number,
        })
    }

    async fn add_line(&self, order_id: &str, line: &OrderLine) -> RepoResult<()> {
        self.lines
            .lock()
            .unwrap()
            .push((order_id.to_string(), line.clone()));
        Ok(())
    }

    async fn set_status(&self, order_id: &str, status: OrderStatus) -> RepoResult<()> {
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| RepoError::NotFound(order_id.to_string()))?;
        order.status = status;
        Ok(())
    }

    async fn get(&self, order_id: &str) -> RepoResult<OrderRecord> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(order_id.to_string()))
    }

    async fn get_lines(&self, order_id: &str) -> RepoResult<Vec<OrderLine>> {
        Ok(self.lines_of(order_id))
    }
}

/// Order repository whose `create` always fails
pub struct FailingOrders;

#[async_trait]
impl OrderRepository for FailingOrders {
    async fn create(
        &self,
        _restaurant_id: i64,
        _customer_id: i64,
        _fulfillment: FulfillmentMode,
    ) -> RepoResult<CreatedOrder> {
        Err(RepoError::Database("connection refused".to_string()))
    }

    async fn add_line(&self, _order_id: &str, _line: &OrderLine) -> RepoResult<()> {
        Err(RepoError::Database("connection refused".to_string()))
    }

    async fn set_status(&self, _order_id: &str, _status: OrderStatus) -> RepoResult<()> {
        Err(RepoError::Database("connection refused".to_string()))
    }

    async fn get(&self, order_id: &str) -> RepoResult<OrderRecord> {
        Err(RepoError::NotFound(order_id.to_string()))
    }

    async fn get_lines(&self, _order_id: &str) -> RepoResult<Vec<OrderLine>> {
        Err(RepoError::Database("connection refused".to_string()))
    }
}

/// Creates orders through the recorder but fails every line write
pub struct LineFailingOrders(pub Arc<RecordingOrders>);

#[async_trait]
impl OrderRepository for LineFailingOrders {
    async fn create(
        &self,
        restaurant_id: i64,
        customer_id: i64,
        fulfillment: FulfillmentMode,
    ) -> RepoResult<CreatedOrder> {
        self.0.create(restaurant_id, customer_id, fulfillment).await
    }

    async fn add_line(&self, _order_id: &str, _line: &OrderLine) -> RepoResult<()> {
        Err(RepoError::Database("disk full".to_string()))
    }

    async fn set_status(&self, order_id: &str, status: OrderStatus) -> RepoResult<()> {
        self.0.set_status(order_id, status).await
    }

    async fn get(&self, order_id: &str) -> RepoResult<OrderRecord> {
        self.0.get(order_id).await
    }

    async fn get_lines(&self, order_id: &str) -> RepoResult<Vec<OrderLine>> {
        self.0.get_lines(order_id).await
    }
}

#[derive(Default)]
pub struct RecordingReservations {
    pub created: Mutex<Vec<ReservationCreate>>,
}

#[async_trait]
impl ReservationRepository for RecordingReservations {
    async fn create(
        &self,
        _restaurant_id: i64,
        customer_id: i64,
        fields: ReservationCreate,
    ) -> RepoResult<ReservationRecord> {
        let record = ReservationRecord {
            id: "res-1".to_string(),
            code: "RES-123".to_string(),
            customer_id,
            date: fields.date,
            time: fields.time,
            party_size: fields.party_size,
            occasion: fields.occasion.clone(),
            notes: fields.notes.clone(),
        };
        self.created.lock().unwrap().push(fields);
        Ok(record)
    }
}

#[derive(Default)]
pub struct FakeGateway {
    pub created: Mutex<Vec<OrderSummary>>,
    pub captured: Mutex<Vec<String>>,
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_payment(
        &self,
        summary: &OrderSummary,
        _return_url: &str,
        _cancel_url: &str,
    ) -> Result<PaymentApproval, PaymentError> {
        self.created.lock().unwrap().push(summary.clone());
        Ok(PaymentApproval {
            approval_url: format!("https://pay.test/approve/{}", summary.order_id),
            payment_id: "PAY-1".to_string(),
        })
    }

    async fn capture(
        &self,
        payment_id: &str,
        _payer_id: &str,
    ) -> Result<CapturedPayment, PaymentError> {
        self.captured.lock().unwrap().push(payment_id.to_string());
        Ok(CapturedPayment {
            transaction_id: "TX-1".to_string(),
        })
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub sent: Mutex<Vec<(NotificationKind, Value)>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, kind: NotificationKind, payload: Value) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push((kind, payload));
        Ok(())
    }
}

/// Engine wired to recording fakes, plus handles to inspect them
pub struct Harness {
    pub engine: Engine,
    pub orders: Arc<RecordingOrders>,
    pub reservations: Arc<RecordingReservations>,
    pub gateway: Arc<FakeGateway>,
    pub sink: Arc<RecordingSink>,
}

fn build(order_repo: Arc<dyn OrderRepository>, orders: Arc<RecordingOrders>) -> Harness {
    let reservations = Arc::new(RecordingReservations::default());
    let gateway = Arc::new(FakeGateway::default());
    let sink = Arc::new(RecordingSink::default());
    let engine = Engine::new(
        RestaurantConfig::default(),
        Collaborators {
            catalog: Arc::new(FakeCatalog(menu())),
            customers: Arc::new(RecordingCustomers::default()),
            orders: order_repo,
            reservations: reservations.clone(),
            payments: gateway.clone(),
            notifier: sink.clone(),
        },
    );
    Harness {
        engine,
        orders,
        reservations,
        gateway,
        sink,
    }
}

pub fn harness() -> Harness {
    let orders = Arc::new(RecordingOrders::default());
    build(orders.clone(), orders)
}

pub fn harness_with_failing_orders() -> Harness {
    build(Arc::new(FailingOrders), Arc::new(RecordingOrders::default()))
}

pub fn harness_with_failing_lines() -> Harness {
    let orders = Arc::new(RecordingOrders::default());
    build(Arc::new(LineFailingOrders(orders.clone())), orders)
}

/// Walk a fresh session through delivery registration.
pub async fn register_delivery(engine: &Engine, key: &str) {
    engine.handle(key, "hola").await;
    engine.handle(key, "3").await;
    engine.handle(key, "Ana Ruiz").await;
    engine.handle(key, "9611234567").await;
    engine.handle(key, "Calle Primavera 123, Centro").await;
    let done = engine.handle(key, "ana@example.com").await;
    assert!(done.contains("Registro completado"), "got: {done}");
}

/// Walk a fresh session through takeaway registration.
pub async fn register_takeaway(engine: &Engine, key: &str) {
    engine.handle(key, "2").await;
    engine.handle(key, "Eva López").await;
    engine.handle(key, "9619876543").await;
    let done = engine.handle(key, "eva@example.com").await;
    assert!(done.contains("Registro completado"), "got: {done}");
}

/// Walk a fresh session through dine-in registration.
pub async fn register_dine_in(engine: &Engine, key: &str) {
    engine.handle(key, "1").await;
    engine.handle(key, "Luis Mora").await;
    engine.handle(key, "5").await;
    engine.handle(key, "4").await;
    let done = engine.handle(key, "omitir").await;
    assert!(done.contains("Registro completado"), "got: {done}");
}
