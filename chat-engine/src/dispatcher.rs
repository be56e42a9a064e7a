//! Engine and intent dispatch
//!
//! [`Engine`] is the single entry point: one `handle` call per inbound
//! message, one reply out. It locks the session for the whole call, so
//! messages for the same visitor are processed one at a time while
//! distinct visitors proceed concurrently. While a sub-flow is active
//! its handler consumes the message; in the idle state the message is
//! matched against [`Intent`].

use crate::catalog::CatalogResolver;
use crate::config::RestaurantConfig;
use crate::error::EngineResult;
use crate::flows::{checkout, customization, registration, reservation};
use crate::payment::{NotificationKind, NotificationSink, PaymentGateway};
use crate::replies;
use crate::repository::{
    CatalogRepository, CustomerRepository, OrderRepository, ReservationRepository,
};
use crate::session::{DialogueState, InMemorySessionStore, Session, SessionStore};
use crate::text::{contains_any, normalize};
use serde_json::{json, Value};
use shared::models::CategoryWithItems;
use std::sync::Arc;

/// Keywords that escalate a message to the staff chat
const ALERT_KEYWORDS: &[&str] = &["problema", "queja", "urgente", "reclamo", "ayuda"];

/// What an idle-state message asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ConfirmOrder,
    CancelOrder,
    StartReservation,
    BrowseMenu,
    /// 1-based category index from the menu overview
    ViewCategory(usize),
    /// Free text to resolve against the catalog
    AddItem(String),
    ViewCart,
    ViewPrices,
    DeliveryInfo,
    Hours,
    Contact,
    Greeting,
    Farewell,
    Thanks,
    Unknown,
}

impl Intent {
    /// Keyword matching over normalized text; first match wins, so the
    /// more specific intents are checked before the broad ones.
    pub fn parse(text: &str) -> Intent {
        let n = normalize(text);

        if n.contains("confirmar") && n.contains("pedido") {
            return Intent::ConfirmOrder;
        }
        if n.contains("cancelar") && n.contains("pedido") {
            return Intent::CancelOrder;
        }
        if n.contains("reserva") {
            return Intent::StartReservation;
        }
        if contains_any(&n, &["carrito", "pedido actual", "mi pedido"]) {
            return Intent::ViewCart;
        }
        if contains_any(&n, &["menu", "carta", "platillos"]) {
            return Intent::BrowseMenu;
        }
        if let Ok(idx) = n.trim().parse::<usize>() {
            return Intent::ViewCategory(idx);
        }
        if contains_any(&n, &["quiero", "quisiera", "pedir", "ordenar", "dame", "me gustaria"]) {
            return Intent::AddItem(text.to_string());
        }
        if contains_any(&n, &["precio", "costo", "cuanto", "barato", "caro"]) {
            return Intent::ViewPrices;
        }
        if contains_any(&n, &["delivery", "domicilio", "envio", "entregar", "llevar"]) {
            return Intent::DeliveryInfo;
        }
        if contains_any(&n, &["horario", "abierto", "cerrado", "abren", "cierran"]) {
            return Intent::Hours;
        }
        if contains_any(&n, &["donde", "direccion", "ubicacion", "telefono", "contacto", "llamar"]) {
            return Intent::Contact;
        }
        if contains_any(&n, &["hola", "buenas", "buenos dias", "que tal", "hey"]) {
            return Intent::Greeting;
        }
        if contains_any(&n, &["adios", "hasta luego", "chao", "bye", "nos vemos"]) {
            return Intent::Farewell;
        }
        if n.contains("gracias") {
            return Intent::Thanks;
        }
        Intent::Unknown
    }
}

/// External collaborators injected into the engine
pub struct Collaborators {
    pub catalog: Arc<dyn CatalogRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub payments: Arc<dyn PaymentGateway>,
    pub notifier: Arc<dyn NotificationSink>,
}

/// Conversational ordering engine for one restaurant
pub struct Engine {
    pub config: RestaurantConfig,
    store: Arc<dyn SessionStore>,
    pub(crate) catalog: Arc<dyn CatalogRepository>,
    pub(crate) customers: Arc<dyn CustomerRepository>,
    pub(crate) orders: Arc<dyn OrderRepository>,
    pub(crate) reservations: Arc<dyn ReservationRepository>,
    pub(crate) payments: Arc<dyn PaymentGateway>,
    notifier: Arc<dyn NotificationSink>,
    resolver: CatalogResolver,
}

impl Engine {
    pub fn new(config: RestaurantConfig, collaborators: Collaborators) -> Self {
        Self::with_store(config, collaborators, Arc::new(InMemorySessionStore::new()))
    }

    pub fn with_store(
        config: RestaurantConfig,
        collaborators: Collaborators,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let resolver = CatalogResolver::new(collaborators.catalog.clone(), config.restaurant_id);
        Self {
            config,
            store,
            catalog: collaborators.catalog,
            customers: collaborators.customers,
            orders: collaborators.orders,
            reservations: collaborators.reservations,
            payments: collaborators.payments,
            notifier: collaborators.notifier,
            resolver,
        }
    }

    /// Handle one inbound message and produce the reply.
    pub async fn handle(&self, key: &str, text: &str) -> String {
        let cell = self.store.get_or_create(key);
        let mut session = cell.lock().await;

        // Mid-flow an empty message falls through to the active step,
        // which re-prompts with its own expected format.
        if text.trim().is_empty() && session.state == DialogueState::Idle {
            return replies::help();
        }
        self.alert_if_flagged(&session, text).await;

        match self.route(&mut session, text).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(session_key = %key, error = %err, "message handling failed");
                replies::apology()
            }
        }
    }

    /// Handle the payment gateway's return redirect for this visitor.
    pub async fn confirm_payment(&self, key: &str, payment_id: &str, payer_id: &str) -> String {
        let cell = self.store.get_or_create(key);
        let mut session = cell.lock().await;

        match checkout::capture_payment(self, &mut session, payment_id, payer_id).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(session_key = %key, error = %err, "payment capture failed");
                replies::apology()
            }
        }
    }

    /// Forget everything about this visitor.
    pub fn reset(&self, key: &str) {
        self.store.reset(key);
    }

    async fn route(&self, session: &mut Session, text: &str) -> EngineResult<String> {
        match session.state {
            DialogueState::ChoosingFulfillment
            | DialogueState::InfoMenu
            | DialogueState::Registering(_) => registration::handle(self, session, text).await,
            DialogueState::AwaitingQuantity => customization::handle_quantity(session, text),
            DialogueState::AwaitingIngredients => customization::handle_ingredients(session, text),
            DialogueState::Reserving(step) => reservation::handle(self, session, step, text).await,
            DialogueState::Idle => self.dispatch_intent(session, text).await,
        }
    }

    async fn dispatch_intent(&self, session: &mut Session, text: &str) -> EngineResult<String> {
        match Intent::parse(text) {
            Intent::ConfirmOrder => checkout::confirm_order(self, session).await,
            Intent::CancelOrder => {
                session.cart.clear();
                Ok(replies::order_cancelled())
            }
            Intent::StartReservation => Ok(reservation::start(session)),
            Intent::ViewCart => Ok(replies::cart_view(&session.cart)),
            Intent::BrowseMenu => {
                let menu = self.menu().await?;
                Ok(replies::menu_overview(&self.config, &menu))
            }
            Intent::ViewCategory(idx) => {
                let menu = self.menu().await?;
                match idx.checked_sub(1).and_then(|i| menu.get(i)) {
                    Some(cat) => Ok(replies::category_detail(cat)),
                    None => Ok(replies::category_not_found(menu.len())),
                }
            }
            Intent::AddItem(query) => match self.resolver.resolve(&query).await? {
                None => Ok(replies::item_not_found()),
                Some(item) if !item.is_available => Ok(replies::item_out_of_stock(&item.name)),
                Some(item) => Ok(customization::start(session, item)),
            },
            Intent::ViewPrices => {
                let menu = self.menu().await?;
                Ok(replies::prices_overview(&self.config, &menu))
            }
            Intent::DeliveryInfo => Ok(replies::delivery_info(&self.config)),
            Intent::Hours => Ok(replies::hours(&self.config)),
            Intent::Contact => Ok(replies::contact(&self.config)),
            Intent::Greeting => Ok(replies::greeting(&self.config, session.name.as_deref())),
            Intent::Farewell => Ok(replies::farewell(&self.config)),
            Intent::Thanks => Ok(replies::thanks()),
            Intent::Unknown => Ok(replies::help()),
        }
    }

    pub(crate) async fn menu(&self) -> EngineResult<Vec<CategoryWithItems>> {
        Ok(self
            .catalog
            .list_categories_with_items(self.config.restaurant_id)
            .await?)
    }

    /// Notify the staff; failures are logged and swallowed.
    pub(crate) async fn notify_silent(&self, kind: NotificationKind, payload: Value) {
        if let Err(err) = self.notifier.notify(kind, payload).await {
            tracing::warn!(?kind, error = %err, "staff notification failed");
        }
    }

    async fn alert_if_flagged(&self, session: &Session, text: &str) {
        let n = normalize(text);
        if contains_any(&n, ALERT_KEYWORDS) {
            self.notify_silent(
                NotificationKind::ChatAlert,
                json!({
                    "visitor": session.visitor_handle,
                    "registered": session.is_registered(),
                    "message": text,
                }),
            )
            .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_commands_win_over_add_keywords() {
        assert_eq!(Intent::parse("quiero confirmar mi pedido"), Intent::ConfirmOrder);
        assert_eq!(Intent::parse("cancelar pedido"), Intent::CancelOrder);
        assert_eq!(Intent::parse("quiero reservar una mesa"), Intent::StartReservation);
    }

    #[test]
    fn test_add_item_captures_free_text() {
        assert_eq!(
            Intent::parse("Quiero una pizza margherita"),
            Intent::AddItem("Quiero una pizza margherita".to_string())
        );
        assert_eq!(
            Intent::parse("me gustaría la lasaña"),
            Intent::AddItem("me gustaría la lasaña".to_string())
        );
    }

    #[test]
    fn test_digits_select_a_category() {
        assert_eq!(Intent::parse("2"), Intent::ViewCategory(2));
        assert_eq!(Intent::parse(" 10 "), Intent::ViewCategory(10));
    }

    #[test]
    fn test_info_intents() {
        assert_eq!(Intent::parse("ver el menú"), Intent::BrowseMenu);
        assert_eq!(Intent::parse("¿cuánto cuesta?"), Intent::ViewPrices);
        assert_eq!(Intent::parse("hacen envío a domicilio?"), Intent::DeliveryInfo);
        assert_eq!(Intent::parse("a qué hora abren"), Intent::Hours);
        assert_eq!(Intent::parse("dónde están ubicados"), Intent::Contact);
        assert_eq!(Intent::parse("ver mi carrito"), Intent::ViewCart);
    }

    #[test]
    fn test_social_intents_and_fallback() {
        assert_eq!(Intent::parse("hola!"), Intent::Greeting);
        assert_eq!(Intent::parse("adiós"), Intent::Farewell);
        assert_eq!(Intent::parse("muchas gracias"), Intent::Thanks);
        assert_eq!(Intent::parse("xyzzy"), Intent::Unknown);
    }
}
