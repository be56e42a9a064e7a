//! Reservation flow
//!
//! Date, time, party size, occasion and notes, gathered one step at a
//! time, then a confirm gate before anything is persisted. "cancelar"
//! aborts at any step and discards the draft.

use crate::dispatcher::Engine;
use crate::error::{EngineError, EngineResult};
use crate::session::{DialogueState, ReservationDraft, ReservationStep, Session};
use crate::text::{contains_any, normalize};
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use serde_json::json;
use shared::models::{Occasion, ReservationCreate};

/// Open the reservation dialogue; requires a registered session.
pub(crate) fn start(session: &mut Session) -> String {
    session.reservation = Some(ReservationDraft::default());
    session.state = DialogueState::Reserving(ReservationStep::Date);
    "📅 ¡Hagamos tu reservación!\n\n\
     ¿Para qué fecha? Escribe \"hoy\", \"mañana\" o una fecha (DD/MM/AAAA).\n\n\
     Puedes escribir \"cancelar\" en cualquier momento."
        .to_string()
}

pub(crate) async fn handle(
    engine: &Engine,
    session: &mut Session,
    step: ReservationStep,
    text: &str,
) -> EngineResult<String> {
    let n = normalize(text);
    if contains_any(&n, &["cancelar", "salir", "olvidalo"]) {
        session.reservation = None;
        session.state = DialogueState::Idle;
        return Ok("❌ Reservación cancelada. ¿En qué más puedo ayudarte?".to_string());
    }

    let draft = session
        .reservation
        .as_mut()
        .ok_or(EngineError::Invariant("reservation step without a draft"))?;

    match step {
        ReservationStep::Date => {
            let today = Local::now().date_naive();
            let date = if contains_any(&n, &["hoy"]) {
                Some(today)
            } else if contains_any(&n, &["manana"]) {
                Some(today + Duration::days(1))
            } else {
                NaiveDate::parse_from_str(text.trim(), "%d/%m/%Y").ok()
            };
            match date {
                Some(d) if d >= today => {
                    draft.date = Some(d);
                    session.state = DialogueState::Reserving(ReservationStep::Time);
                    Ok(time_prompt(engine))
                }
                Some(_) => Ok("❌ Esa fecha ya pasó. Elige hoy o una fecha futura.".to_string()),
                None => Ok(
                    "❌ No entendí la fecha. Escribe \"hoy\", \"mañana\" o DD/MM/AAAA (ejemplo: 25/12/2026)"
                        .to_string(),
                ),
            }
        }
        ReservationStep::Time => match NaiveTime::parse_from_str(text.trim(), "%H:%M") {
            Ok(t) if engine.config.reservation.accepts(t) => {
                draft.time = Some(t);
                session.state = DialogueState::Reserving(ReservationStep::PartySize);
                Ok("👥 ¿Para cuántas personas? (1-20)".to_string())
            }
            Ok(_) => Ok(format!(
                "❌ Solo aceptamos reservaciones entre las {} y las {}.",
                engine.config.reservation.opens.format("%H:%M"),
                engine.config.reservation.closes.format("%H:%M")
            )),
            Err(_) => Ok(time_prompt(engine)),
        },
        ReservationStep::PartySize => match n.parse::<u32>() {
            Ok(p) if (1..=20).contains(&p) => {
                draft.party_size = Some(p);
                session.state = DialogueState::Reserving(ReservationStep::Occasion);
                Ok("🎉 ¿Alguna ocasión especial?\n\n\
                    1️⃣ Cumpleaños\n2️⃣ Aniversario\n3️⃣ Negocios\n\n\
                    Escribe el número, descríbela, o escribe \"ninguna\""
                    .to_string())
            }
            _ => Ok("❌ El número de personas debe ser entre 1 y 20".to_string()),
        },
        ReservationStep::Occasion => {
            draft.occasion = if n == "1" || contains_any(&n, &["cumple"]) {
                Some(Occasion::Birthday)
            } else if n == "2" || contains_any(&n, &["aniversario"]) {
                Some(Occasion::Anniversary)
            } else if n == "3" || contains_any(&n, &["negocio", "trabajo"]) {
                Some(Occasion::Business)
            } else if matches!(n.trim(), "ninguna" | "ninguno" | "nada" | "no") {
                None
            } else {
                Some(Occasion::Other {
                    detail: text.trim().to_string(),
                })
            };
            session.state = DialogueState::Reserving(ReservationStep::Notes);
            Ok("📝 ¿Alguna petición especial? (mesa junto a la ventana, silla para bebé...)\n\nO escribe \"ninguna\"".to_string())
        }
        ReservationStep::Notes => {
            draft.notes = if matches!(n.trim(), "ninguna" | "ninguno" | "nada" | "no") {
                None
            } else {
                Some(text.trim().to_string())
            };
            session.state = DialogueState::Reserving(ReservationStep::Confirm);
            Ok(summary(draft))
        }
        ReservationStep::Confirm => {
            let accepted = n.trim() == "si" || contains_any(&n, &["confirmar", "correcto"]);
            if !accepted {
                return Ok("Escribe \"confirmar\" para reservar o \"cancelar\" para descartar.".to_string());
            }
            confirm(engine, session).await
        }
    }
}

fn time_prompt(engine: &Engine) -> String {
    format!(
        "🕐 ¿A qué hora? (formato HH:MM, entre {} y {})\n\nHorarios sugeridos: {}",
        engine.config.reservation.opens.format("%H:%M"),
        engine.config.reservation.closes.format("%H:%M"),
        engine.config.reservation.suggested_slots.join(", ")
    )
}

fn summary(draft: &ReservationDraft) -> String {
    let mut lines = String::new();
    if let Some(d) = draft.date {
        lines.push_str(&format!("📅 Fecha: {}\n", d.format("%d/%m/%Y")));
    }
    if let Some(t) = draft.time {
        lines.push_str(&format!("🕐 Hora: {}\n", t.format("%H:%M")));
    }
    if let Some(p) = draft.party_size {
        lines.push_str(&format!("👥 Personas: {p}\n"));
    }
    if let Some(o) = &draft.occasion {
        lines.push_str(&format!("🎉 Ocasión: {}\n", o.label_es()));
    }
    if let Some(notes) = &draft.notes {
        lines.push_str(&format!("📝 Notas: {notes}\n"));
    }
    format!(
        "📋 Resumen de tu reservación:\n\n{lines}\nEscribe \"confirmar\" para reservar o \"cancelar\" para descartar."
    )
}

/// Persist the completed draft and notify the staff.
async fn confirm(engine: &Engine, session: &mut Session) -> EngineResult<String> {
    let customer_id = session
        .customer_id
        .ok_or(EngineError::Invariant("reservation confirm without customer"))?;
    // Cloned, not taken: a failed create leaves the draft in place so
    // the visitor can retry the confirm.
    let draft = session
        .reservation
        .clone()
        .ok_or(EngineError::Invariant("reservation confirm without a draft"))?;
    let (date, time, party_size) = match (draft.date, draft.time, draft.party_size) {
        (Some(d), Some(t), Some(p)) => (d, t, p),
        _ => return Err(EngineError::Invariant("reservation confirm with missing fields")),
    };

    let created = engine
        .reservations
        .create(
            engine.config.restaurant_id,
            customer_id,
            ReservationCreate {
                date,
                time,
                party_size,
                occasion: draft.occasion.clone(),
                notes: draft.notes.clone(),
            },
        )
        .await?;

    session.reservation = None;
    session.state = DialogueState::Idle;
    tracing::info!(
        session_key = %session.key,
        reservation_id = %created.id,
        "reservation created"
    );
    engine
        .notify_silent(
            crate::payment::NotificationKind::NewReservation,
            json!({
                "code": created.code,
                "customer_id": customer_id,
                "date": date.format("%d/%m/%Y").to_string(),
                "time": time.format("%H:%M").to_string(),
                "party_size": party_size,
                "occasion": draft.occasion.as_ref().map(|o| o.label_es()),
            }),
        )
        .await;

    Ok(format!(
        "✅ ¡Reservación confirmada!\n\n\
         🎫 Código: {}\n📅 {} a las {}\n👥 {party_size} personas\n\n\
         Presenta tu código al llegar. ¡Te esperamos! 🎉",
        created.code,
        date.format("%d/%m/%Y"),
        time.format("%H:%M")
    ))
}
