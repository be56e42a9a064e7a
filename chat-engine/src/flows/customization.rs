//! Item customization flow
//!
//! Owns the two-step dialogue after an add-item intent resolves: a
//! quantity prompt (1-20) and, for items with ingredients, an
//! ingredient-removal prompt that accepts "sin X" clauses. Items without
//! ingredients finalize straight after the quantity. "cancelar" at
//! either step drops the pending item and returns to idle.

use crate::cart::{CartLine, MAX_QUANTITY, MIN_QUANTITY};
use crate::error::{EngineError, EngineResult};
use crate::replies;
use crate::session::{DialogueState, PendingLine, Session};
use crate::text::{contains_any, normalize};
use shared::models::CatalogItem;

/// Begin customizing an available item; returns the quantity prompt.
pub(crate) fn start(session: &mut Session, item: CatalogItem) -> String {
    let prompt = format!(
        "📦 {} - {}\n\n🔢 ¿Cuántos deseas? ({MIN_QUANTITY}-{MAX_QUANTITY})",
        item.name,
        replies::money(item.price)
    );
    session.pending = Some(PendingLine::new(item));
    session.state = DialogueState::AwaitingQuantity;
    prompt
}

pub(crate) fn handle_quantity(session: &mut Session, text: &str) -> EngineResult<String> {
    if wants_cancel(text) {
        return Ok(abort(session));
    }
    let pending = session
        .pending
        .as_mut()
        .ok_or(EngineError::Invariant("quantity step without pending item"))?;

    let quantity = match text.trim().parse::<u32>() {
        Ok(q) if (MIN_QUANTITY..=MAX_QUANTITY).contains(&q) => q,
        _ => {
            return Ok(format!(
                "❌ Ingresa una cantidad válida entre {MIN_QUANTITY} y {MAX_QUANTITY}"
            ));
        }
    };
    pending.quantity = Some(quantity);

    if pending.item.ingredients.is_empty() {
        return finalize(session);
    }

    let name = pending.item.name.clone();
    let list = pending.item.ingredients.join(", ");
    session.state = DialogueState::AwaitingIngredients;
    Ok(format!(
        "🥗 {name} lleva: {list}\n\n\
         ¿Deseas quitar algún ingrediente?\n\
         - Escribe \"sin [ingrediente]\" (ejemplo: \"sin cebolla, sin tomate\")\n\
         - O escribe \"nada\" para dejarlo completo"
    ))
}

pub(crate) fn handle_ingredients(session: &mut Session, text: &str) -> EngineResult<String> {
    if wants_cancel(text) {
        return Ok(abort(session));
    }
    let pending = session
        .pending
        .as_mut()
        .ok_or(EngineError::Invariant("ingredient step without pending item"))?;

    let n = normalize(text);
    let trimmed = n.trim();
    let opted_out = matches!(trimmed, "nada" | "no" | "ninguno" | "ninguna" | "completo")
        || contains_any(trimmed, &["sin nada", "nada que quitar", "asi esta bien"]);

    if !opted_out {
        let extractions = extract_removals(text);
        if extractions.is_empty() {
            let list = pending.item.ingredients.join(", ");
            return Ok(format!(
                "🤔 No entendí qué deseas quitar.\n\n\
                 Ingredientes: {list}\n\n\
                 Escribe \"sin [ingrediente]\" (ejemplo: \"sin cebolla\") o \"nada\" para dejarlo completo"
            ));
        }

        // All clauses must match; a single unknown word rejects the
        // whole message so the removed set never half-updates.
        let mut matched = Vec::new();
        for word in &extractions {
            match match_ingredient(&pending.item.ingredients, word) {
                Some(ing) => matched.push(ing.clone()),
                None => {
                    let list = pending.item.ingredients.join(", ");
                    return Ok(format!(
                        "🤔 No encontré \"{word}\" entre los ingredientes.\n\n\
                         {} lleva: {list}\n\n\
                         Escribe \"sin [ingrediente]\" (ejemplo: \"sin cebolla\") o \"nada\" para dejarlo completo",
                        pending.item.name
                    ));
                }
            }
        }
        for ing in matched {
            if !pending.removed.contains(&ing) {
                pending.removed.push(ing);
            }
        }
    }

    finalize(session)
}

/// Append the finished pending line to the cart and return the summary.
fn finalize(session: &mut Session) -> EngineResult<String> {
    let pending = session
        .pending
        .take()
        .ok_or(EngineError::Invariant("finalize called with no pending item"))?;
    let quantity = pending
        .quantity
        .ok_or(EngineError::Invariant("finalize called before quantity"))?;

    let line = CartLine {
        item_id: pending.item.id,
        name: pending.item.name.clone(),
        unit_price: pending.item.price,
        quantity,
        removed: pending.removed,
    };
    session.cart.push(line);
    session.state = DialogueState::Idle;
    Ok(replies::item_added(&session.cart, &pending.item.name))
}

fn wants_cancel(text: &str) -> bool {
    contains_any(&normalize(text), &["cancelar", "olvidalo"])
}

/// Drop the pending item without touching the cart.
fn abort(session: &mut Session) -> String {
    session.pending = None;
    session.state = DialogueState::Idle;
    "❌ Sin problema, no lo agrego.\n\nEscribe \"menú\" para seguir viendo opciones.".to_string()
}

/// Extract the X of every "sin X" clause, split on commas and "y".
pub(crate) fn extract_removals(text: &str) -> Vec<String> {
    let n = normalize(text);
    n.split("sin ")
        .skip(1)
        .filter_map(|seg| seg.split([',', ';']).next())
        .map(|s| {
            s.trim()
                .trim_end_matches(" y")
                .trim()
                .to_string()
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Match an extracted word against the ingredient list: word-prefix
/// first, containment second.
fn match_ingredient<'a>(ingredients: &'a [String], word: &str) -> Option<&'a String> {
    let q = normalize(word);
    let q = q.trim();
    if q.is_empty() {
        return None;
    }
    if let Some(ing) = ingredients
        .iter()
        .find(|i| normalize(i).split_whitespace().any(|w| w.starts_with(q)))
    {
        return Some(ing);
    }
    ingredients
        .iter()
        .find(|i| normalize(i).contains(q) || q.contains(&normalize(i)))
}
