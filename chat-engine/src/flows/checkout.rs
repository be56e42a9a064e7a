//! Checkout flow
//!
//! Turns the session cart into a persisted order. Dine-in orders confirm
//! immediately and are paid in person; takeaway and delivery orders go
//! to the payment gateway and sit in `AwaitingPayment` until the capture
//! callback arrives. The cart is cleared only after every external call
//! has succeeded; an order abandoned mid-write is cancelled so the staff
//! never sees half-written lines.

use crate::dispatcher::Engine;
use crate::error::{EngineError, EngineResult};
use crate::payment::{NotificationKind, OrderSummary};
use crate::pricing::{price, Quote};
use crate::replies;
use crate::session::Session;
use serde_json::json;
use shared::models::{CreatedOrder, FulfillmentMode, OrderStatus};

pub(crate) async fn confirm_order(engine: &Engine, session: &mut Session) -> EngineResult<String> {
    if session.cart.is_empty() {
        return Ok(replies::cart_empty());
    }
    let mode = session
        .fulfillment
        .ok_or(EngineError::Invariant("checkout without fulfillment mode"))?;
    let customer_id = session
        .customer_id
        .ok_or(EngineError::Invariant("checkout without customer"))?;

    let quote = price(&session.cart, mode, &engine.config);
    if quote.violates_minimum() {
        let minimum = match mode {
            FulfillmentMode::Takeaway => engine.config.takeaway_minimum,
            _ => engine.config.delivery.minimum,
        };
        return Ok(replies::shortfall(&quote, mode, minimum));
    }

    let created = engine
        .orders
        .create(engine.config.restaurant_id, customer_id, mode)
        .await?;
    let reply = match persist_and_handoff(engine, session, &created, mode, &quote).await {
        Ok(reply) => reply,
        Err(err) => {
            cancel_abandoned(engine, &created.order_id).await;
            return Err(err);
        }
    };
    if mode.requires_prepayment() {
        session.order_id = Some(created.order_id.clone());
    }

    tracing::info!(
        session_key = %session.key,
        order_id = %created.order_id,
        order_number = created.order_number,
        total = %quote.total,
        "order placed"
    );
    engine
        .notify_silent(
            NotificationKind::NewOrder,
            json!({
                "order_number": created.order_number,
                "mode": mode,
                "customer_id": customer_id,
                "total": quote.total,
                "lines": session.cart.lines().len(),
            }),
        )
        .await;

    session.cart.clear();
    Ok(reply)
}

/// Write the cart lines, move the order to its post-checkout status and
/// build the confirmation reply. Any failure here leaves the order to be
/// cancelled by the caller.
async fn persist_and_handoff(
    engine: &Engine,
    session: &Session,
    created: &CreatedOrder,
    mode: FulfillmentMode,
    quote: &Quote,
) -> EngineResult<String> {
    for line in session.cart.lines() {
        engine
            .orders
            .add_line(&created.order_id, &line.to_order_line())
            .await?;
    }

    if mode.requires_prepayment() {
        let summary = OrderSummary {
            order_id: created.order_id.clone(),
            order_number: created.order_number,
            description: format!("Pedido #{} - {}", created.order_number, engine.config.name),
            total: quote.total,
            currency: engine.config.payment.currency.clone(),
        };
        let approval = engine
            .payments
            .create_payment(
                &summary,
                &engine.config.payment.return_url,
                &engine.config.payment.cancel_url,
            )
            .await?;
        engine
            .orders
            .set_status(&created.order_id, OrderStatus::AwaitingPayment)
            .await?;

        Ok(format!(
            "✅ ¡Pedido #{} registrado!\n\n\
             {}\n💰 Total a pagar: {}\n\n\
             💳 Completa tu pago aquí:\n{}\n\n\
             Tu pedido entrará a cocina en cuanto se confirme el pago.",
            created.order_number,
            replies::cart_summary(&session.cart),
            replies::money(quote.total),
            approval.approval_url
        ))
    } else {
        engine
            .orders
            .set_status(&created.order_id, OrderStatus::Confirmed)
            .await?;

        let mesa = session
            .table_number
            .map(|t| format!("🪑 Mesa: {t}\n"))
            .unwrap_or_default();
        Ok(format!(
            "✅ ¡Pedido #{} confirmado!\n\n\
             {mesa}{}\n💰 Total: {}\n\n\
             💵 Pagarás directamente en el restaurante.\n\
             🍳 ¡Tu pedido ya está en cocina!",
            created.order_number,
            replies::cart_summary(&session.cart),
            replies::money(quote.total)
        ))
    }
}

/// Best-effort cancel; the checkout error is what reaches the visitor.
async fn cancel_abandoned(engine: &Engine, order_id: &str) {
    if let Err(err) = engine.orders.set_status(order_id, OrderStatus::Cancelled).await {
        tracing::warn!(order_id = %order_id, error = %err, "failed to cancel abandoned order");
    }
}

/// Finalize a prepaid order once the gateway's return event arrives.
pub(crate) async fn capture_payment(
    engine: &Engine,
    session: &mut Session,
    payment_id: &str,
    payer_id: &str,
) -> EngineResult<String> {
    let Some(order_id) = session.order_id.clone() else {
        return Ok("🤔 No tienes ningún pago pendiente.".to_string());
    };

    let captured = engine.payments.capture(payment_id, payer_id).await?;
    engine
        .orders
        .set_status(&order_id, OrderStatus::Confirmed)
        .await?;
    session.order_id = None;

    tracing::info!(
        session_key = %session.key,
        order_id = %order_id,
        transaction_id = %captured.transaction_id,
        "payment captured"
    );
    engine
        .notify_silent(
            NotificationKind::PaymentCaptured,
            json!({
                "order_id": order_id,
                "transaction_id": captured.transaction_id,
            }),
        )
        .await;

    Ok(
        "✅ ¡Pago confirmado!\n\n🍳 Tu pedido ya está en cocina.\n\n¡Gracias por tu preferencia! 🎉"
            .to_string(),
    )
}
