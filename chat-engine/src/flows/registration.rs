//! Registration flow
//!
//! Captures identity and fulfillment-specific contact fields before
//! ordering is allowed. The ladder branches on the fulfillment mode
//! chosen at entry; validation failures re-prompt the same step.
//! Once completed, registration fields are immutable for the session.

use crate::dispatcher::Engine;
use crate::error::{EngineError, EngineResult};
use crate::replies;
use crate::session::{DialogueState, RegistrationStep, Session};
use crate::text::{contains_any, normalize};
use shared::models::{CustomerUpdate, FulfillmentMode};
use validator::ValidateEmail;

pub(crate) async fn handle(engine: &Engine, session: &mut Session, text: &str) -> EngineResult<String> {
    match session.state {
        DialogueState::ChoosingFulfillment => Ok(choose_fulfillment(engine, session, text)),
        DialogueState::InfoMenu => info_menu(engine, session, text).await,
        DialogueState::Registering(step) => step_input(engine, session, step, text).await,
        _ => Err(EngineError::Invariant("registration handler outside registration state")),
    }
}

fn choose_fulfillment(engine: &Engine, session: &mut Session, text: &str) -> String {
    let n = normalize(text);
    let mode = if n == "1" || contains_any(&n, &["restaurante", "mesa", "comer aqui"]) {
        Some(FulfillmentMode::DineIn)
    } else if n == "2" || contains_any(&n, &["llevar", "takeaway", "recoger"]) {
        Some(FulfillmentMode::Takeaway)
    } else if n == "3" || contains_any(&n, &["delivery", "domicilio", "envio"]) {
        Some(FulfillmentMode::Delivery)
    } else {
        None
    };

    if let Some(mode) = mode {
        session.fulfillment = Some(mode);
        session.state = DialogueState::Registering(RegistrationStep::Name);
        return mode_intro(engine, mode);
    }

    if n == "4" || contains_any(&n, &["informacion", "info"]) {
        session.state = DialogueState::InfoMenu;
        return replies::info_menu();
    }

    // First contact and anything unrecognized both land here
    if contains_any(&n, &["hola", "buenas", "buenos dias", "hi", "hello"]) || n == "inicio" {
        replies::welcome(&engine.config)
    } else {
        replies::fulfillment_retry()
    }
}

fn mode_intro(engine: &Engine, mode: FulfillmentMode) -> String {
    let intro = match mode {
        FulfillmentMode::DineIn => {
            "🍽️ En Restaurante - ¡Buena elección!\n\nTe prepararemos una mesa especial.".to_string()
        }
        FulfillmentMode::Takeaway => {
            "🏠 Para Llevar - ¡Perfecto!\n\nTu pedido estará listo en 20-25 minutos.".to_string()
        }
        FulfillmentMode::Delivery => format!(
            "🚗 Delivery - ¡Excelente!\n\nEnvío: {} | Pedido mínimo: {}",
            replies::money(engine.config.delivery.fee),
            replies::money(engine.config.delivery.minimum)
        ),
    };
    format!("{intro}\n\n👤 Por favor, dime tu nombre completo:")
}

async fn info_menu(engine: &Engine, session: &mut Session, text: &str) -> EngineResult<String> {
    let n = normalize(text);
    if contains_any(&n, &["volver", "regresar", "atras"]) {
        session.state = DialogueState::ChoosingFulfillment;
        return Ok(replies::welcome(&engine.config));
    }
    let card = if n == "1" || contains_any(&n, &["horario", "hora"]) {
        replies::hours(&engine.config)
    } else if n == "2" || contains_any(&n, &["ubicacion", "contacto", "direccion"]) {
        replies::contact(&engine.config)
    } else if n == "3" || contains_any(&n, &["precio", "costo"]) {
        let menu = engine.menu().await?;
        replies::prices_overview(&engine.config, &menu)
    } else if n == "4" || contains_any(&n, &["delivery", "envio", "domicilio"]) {
        replies::delivery_info(&engine.config)
    } else {
        return Ok(replies::info_menu());
    };
    Ok(format!("{card}\n\nEscribe \"volver\" para regresar."))
}

async fn step_input(
    engine: &Engine,
    session: &mut Session,
    step: RegistrationStep,
    text: &str,
) -> EngineResult<String> {
    let mode = session
        .fulfillment
        .ok_or(EngineError::Invariant("registration step without fulfillment mode"))?;
    let input = text.trim();

    match step {
        RegistrationStep::Name => {
            if input.chars().count() < 3 {
                return Ok("❌ Por favor ingresa un nombre válido (mínimo 3 caracteres)".to_string());
            }
            session.name = Some(input.to_string());
            advance(engine, session, mode, step).await
        }
        RegistrationStep::TableNumber => {
            let tables = engine.config.tables;
            match input.parse::<u32>() {
                Ok(t) if tables.contains(t) => {
                    session.table_number = Some(t);
                    advance(engine, session, mode, step).await
                }
                _ => Ok(format!(
                    "❌ Ingresa un número de mesa válido (entre {} y {})",
                    tables.min, tables.max
                )),
            }
        }
        RegistrationStep::PartySize => {
            let n = normalize(input);
            if contains_any(&n, &["omitir", "skip"]) {
                return advance(engine, session, mode, step).await;
            }
            match n.parse::<u32>() {
                Ok(p) if (1..=20).contains(&p) => {
                    session.party_size = Some(p);
                    advance(engine, session, mode, step).await
                }
                _ => Ok(
                    "❌ El número de personas debe ser entre 1 y 20, o escribe \"omitir\""
                        .to_string(),
                ),
            }
        }
        RegistrationStep::Phone => {
            let n = normalize(input);
            if mode == FulfillmentMode::DineIn && contains_any(&n, &["omitir", "skip"]) {
                return advance(engine, session, mode, step).await;
            }
            let digits: String = input.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
            if digits.chars().all(|c| c.is_ascii_digit()) && digits.len() == 10 {
                session.phone = Some(digits);
                advance(engine, session, mode, step).await
            } else {
                Ok("❌ Por favor ingresa un número de teléfono válido (10 dígitos)".to_string())
            }
        }
        RegistrationStep::Address => {
            if input.chars().count() < 10 {
                return Ok("❌ Por favor proporciona una dirección más completa".to_string());
            }
            session.address = Some(input.to_string());
            advance(engine, session, mode, step).await
        }
        RegistrationStep::Email => {
            if !input.validate_email() {
                return Ok("❌ Por favor ingresa un correo electrónico válido".to_string());
            }
            session.email = Some(input.to_string());
            advance(engine, session, mode, step).await
        }
    }
}

/// Move to the next step of this mode's ladder, or complete registration.
async fn advance(
    engine: &Engine,
    session: &mut Session,
    mode: FulfillmentMode,
    current: RegistrationStep,
) -> EngineResult<String> {
    match next_step(mode, current) {
        Some(next) => {
            session.state = DialogueState::Registering(next);
            Ok(prompt_for(engine, mode, next, session))
        }
        None => complete(engine, session, mode).await,
    }
}

fn next_step(mode: FulfillmentMode, current: RegistrationStep) -> Option<RegistrationStep> {
    use FulfillmentMode::*;
    use RegistrationStep::*;
    match (mode, current) {
        (DineIn, Name) => Some(TableNumber),
        (DineIn, TableNumber) => Some(PartySize),
        (DineIn, PartySize) => Some(Phone),
        (DineIn, Phone) => None,
        (Takeaway, Name) => Some(Phone),
        (Takeaway, Phone) => Some(Email),
        (Takeaway, Email) => None,
        (Delivery, Name) => Some(Phone),
        (Delivery, Phone) => Some(Address),
        (Delivery, Address) => Some(Email),
        (Delivery, Email) => None,
        _ => None,
    }
}

fn prompt_for(
    engine: &Engine,
    mode: FulfillmentMode,
    step: RegistrationStep,
    session: &Session,
) -> String {
    let saludo = session
        .name
        .as_deref()
        .map(|n| format!("Mucho gusto, {n}! 😊\n\n"))
        .unwrap_or_default();
    match step {
        RegistrationStep::Name => "👤 Por favor, dime tu nombre completo:".to_string(),
        RegistrationStep::TableNumber => format!(
            "{saludo}🪑 ¿En qué mesa te encuentras? ({}-{})",
            engine.config.tables.min, engine.config.tables.max
        ),
        RegistrationStep::PartySize => {
            "👥 ¿Cuántas personas son? (1-20, o escribe \"omitir\")".to_string()
        }
        RegistrationStep::Phone => match mode {
            FulfillmentMode::DineIn => {
                "📱 ¿Tu número de teléfono? (10 dígitos, o escribe \"omitir\")".to_string()
            }
            _ => format!("{saludo}📱 Ahora, ¿cuál es tu número de teléfono?\n(Ejemplo: 9611234567)"),
        },
        RegistrationStep::Address => {
            "Perfecto! 📞\n\n📍 ¿Cuál es tu dirección de entrega?\n(Calle, número, colonia)"
                .to_string()
        }
        RegistrationStep::Email => "📧 Por último, ¿cuál es tu correo electrónico?".to_string(),
    }
}

/// Create/link the customer record and open the ordering dialogue.
async fn complete(
    engine: &Engine,
    session: &mut Session,
    mode: FulfillmentMode,
) -> EngineResult<String> {
    let name = session
        .name
        .clone()
        .ok_or(EngineError::Invariant("registration completed without a name"))?;

    let customer = engine
        .customers
        .get_or_create(engine.config.restaurant_id, &session.key, &name)
        .await?;
    engine
        .customers
        .update(
            customer.id,
            CustomerUpdate {
                phone: session.phone.clone(),
                address: session.address.clone(),
                email: session.email.clone(),
            },
        )
        .await?;

    session.customer_id = Some(customer.id);
    session.state = DialogueState::Idle;
    tracing::info!(
        session_key = %session.key,
        customer_id = customer.id,
        mode = ?mode,
        "registration completed"
    );

    let mut datos = format!("👤 Nombre: {name}\n");
    if let Some(t) = session.table_number {
        datos.push_str(&format!("🪑 Mesa: {t}\n"));
    }
    if let Some(p) = session.party_size {
        datos.push_str(&format!("👥 Personas: {p}\n"));
    }
    if let Some(tel) = &session.phone {
        datos.push_str(&format!("📱 Teléfono: {tel}\n"));
    }
    if let Some(dir) = &session.address {
        datos.push_str(&format!("📍 Dirección: {dir}\n"));
    }
    if let Some(mail) = &session.email {
        datos.push_str(&format!("📧 Email: {mail}\n"));
    }
    let pago = match mode {
        FulfillmentMode::DineIn => "💵 Pagarás directamente en el restaurante.",
        _ => "💳 El pago se realiza en línea al confirmar tu pedido.",
    };

    Ok(format!(
        "✅ ¡Registro completado!\n\n📝 Tus datos:\n{datos}\n{pago}\n\n🎉 ¡Perfecto! Ahora ya puedes hacer tu pedido.\n\nEscribe \"menu\" para ver nuestras deliciosas opciones 🍽"
    ))
}
