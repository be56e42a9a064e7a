//! Reply builders
//!
//! Every user-facing string the engine produces. Texts keep the voice of
//! the production bot: Spanish, short lines, light emoji, always ending
//! with a next-action hint.

use crate::cart::Cart;
use crate::config::RestaurantConfig;
use crate::pricing::Quote;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use shared::models::{CatalogItem, CategoryWithItems, FulfillmentMode};

/// Two-decimal money display
pub fn money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

pub fn welcome(config: &RestaurantConfig) -> String {
    format!(
        "¡Hola! Bienvenido a {} 🍽\n\n\
         ¿Cómo deseas disfrutar tu experiencia hoy?\n\n\
         1⃣ En restaurante\n\
         2⃣ Para llevar\n\
         3⃣ Delivery\n\
         4⃣ Información\n\n\
         Responde con el número de tu elección.",
        config.name
    )
}

pub fn fulfillment_retry() -> String {
    "🤔 No entendí tu elección.\n\n\
     1⃣ En restaurante\n\
     2⃣ Para llevar\n\
     3⃣ Delivery\n\
     4⃣ Información\n\n\
     Responde con el número de tu elección."
        .to_string()
}

pub fn info_menu() -> String {
    "ℹ️ INFORMACIÓN\n\n\
     1⃣ Horarios\n\
     2⃣ Ubicación y contacto\n\
     3⃣ Precios\n\
     4⃣ Delivery\n\n\
     Escribe \"volver\" para regresar."
        .to_string()
}

pub fn hours(config: &RestaurantConfig) -> String {
    format!(
        "🕐 HORARIOS DE SERVICIO\n\n\
         📅 Lunes a Viernes: {}\n\
         📅 Sábado: {}\n\
         📅 Domingo: {}\n\n\
         🚗 Delivery: mismo horario del restaurante\n\
         ⏰ Última orden: 30 minutos antes del cierre\n\n\
         🪑 Reservaciones disponibles:\n{}\n\n\
         ¡Te esperamos!",
        config.hours.weekdays,
        config.hours.saturday,
        config.hours.sunday,
        config.reservation.suggested_slots.join(", ")
    )
}

pub fn contact(config: &RestaurantConfig) -> String {
    format!(
        "📞 INFORMACIÓN DE CONTACTO\n\n\
         🏨 {}\n\n\
         📍 Dirección:\n{}\n\n\
         📱 Teléfono: {}\n\
         💬 WhatsApp: {}\n\
         📧 Email: {}\n\n\
         ¡Estamos aquí para servirte!",
        config.name,
        config.contact.address,
        config.contact.phone,
        config.contact.whatsapp,
        config.contact.email
    )
}

pub fn delivery_info(config: &RestaurantConfig) -> String {
    format!(
        "🚗 SERVICIO DE DELIVERY\n\n\
         📍 Cobertura: {}\n\
         ⏱ Tiempo: {}\n\
         💰 Costo de envío: {} (gratis desde {})\n\
         🛒 Pedido mínimo: {}\n\n\
         Escribe \"menú\" para hacer tu pedido.",
        config.delivery.coverage,
        config.delivery.eta,
        money(config.delivery.fee),
        money(config.delivery.free_threshold),
        money(config.delivery.minimum)
    )
}

pub fn menu_overview(config: &RestaurantConfig, menu: &[CategoryWithItems]) -> String {
    if menu.is_empty() {
        return "❌ Lo siento, no hay menú disponible en este momento.".to_string();
    }

    let mut out = format!(
        "🍽 ¡Bienvenido a {}!\n\nEstas son nuestras categorías disponibles:\n\n",
        config.name
    );
    for (idx, cat) in menu.iter().enumerate() {
        let icon = cat.category.icon.as_deref().unwrap_or("🍴");
        out.push_str(&format!("{}⃣ {} {}", idx + 1, icon, cat.category.name));
        if let Some(min) = cat.min_price() {
            out.push_str(&format!(" (desde {})", money(min)));
        }
        out.push('\n');
        for item in cat.items.iter().take(3) {
            out.push_str(&format!("   • {}\n", item.name));
        }
        if cat.items.len() > 3 {
            out.push_str(&format!("   • ... y {} más\n", cat.items.len() - 3));
        }
        out.push('\n');
    }
    out.push_str(
        "💡 Escribe el número de la categoría que te interesa\nEjemplo: '1' para ver la primera categoría",
    );
    out
}

pub fn category_detail(cat: &CategoryWithItems) -> String {
    let icon = cat.category.icon.as_deref().unwrap_or("🍴");
    let mut out = format!("{} {}\n\n", icon, cat.category.name.to_uppercase());
    if let Some(desc) = &cat.category.description {
        out.push_str(&format!("{desc}\n\n"));
    }
    for item in &cat.items {
        let estado = if item.is_available { "✅" } else { "❌ AGOTADO" };
        out.push_str(&format!("{} {}\n", estado, item.name));
        out.push_str(&format!(
            "   💰 {} • ⏱ {}\n",
            money(item.price),
            item.prep_time.as_deref().unwrap_or("N/A")
        ));
        out.push_str(&format!("   {}\n\n", item.description));
    }
    out.push_str("📝 Para ordenar, escribe:\n'Quiero [nombre del platillo]'\n\n");
    out.push_str("📙 Escribe 'menú' para regresar");
    out
}

pub fn category_not_found(count: usize) -> String {
    format!(
        "🤔 Esa categoría no existe. Tenemos {count} categorías.\n\n\
         Escribe \"menú\" para verlas todas."
    )
}

pub fn prices_overview(config: &RestaurantConfig, menu: &[CategoryWithItems]) -> String {
    if menu.is_empty() {
        return "❌ No puedo consultar los precios en este momento.".to_string();
    }
    let mut out = "💰 NUESTROS PRECIOS\n\n".to_string();
    for cat in menu {
        let (Some(min), Some(max)) = (cat.min_price(), cat.max_price()) else {
            continue;
        };
        let icon = cat.category.icon.as_deref().unwrap_or("🍴");
        out.push_str(&format!("{} {}: {}", icon, cat.category.name, money(min)));
        if min != max {
            out.push_str(&format!(" - {}", money(max)));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "\n🚗 Delivery: {} (pedido mínimo {})\n\n\
         Escribe 'menú' para ver el menú completo con todos los detalles.",
        money(config.delivery.fee),
        money(config.delivery.minimum)
    ));
    out
}

pub fn item_out_of_stock(name: &str) -> String {
    format!(
        "😔 Lo siento, {name} está temporalmente agotado.\n\n\
         Escribe 'menú' para ver otras opciones."
    )
}

pub fn item_not_found() -> String {
    "🤔 No logré identificar ese platillo.\n\n\
     Por favor, escribe 'menú' para ver todas las opciones disponibles."
        .to_string()
}

pub fn cart_summary(cart: &Cart) -> String {
    let mut out = format!("🛒 Tu pedido ({} items):\n", cart.len());
    for line in cart.lines() {
        out.push_str(&format!(
            "• {} x{} - {}",
            line.name,
            line.quantity,
            money(line.subtotal())
        ));
        if let Some(note) = line.note() {
            out.push_str(&format!(" ({note})"));
        }
        out.push('\n');
    }
    out.push_str(&format!("\n💵 Total actual: {}", money(cart.subtotal())));
    out
}

pub fn cart_view(cart: &Cart) -> String {
    if cart.is_empty() {
        return cart_empty();
    }
    format!(
        "{}\n\n\
         Opciones:\n\
         - Escribe \"confirmar pedido\" para finalizar\n\
         - Escribe \"menú\" para agregar más items\n\
         - Escribe \"cancelar pedido\" para limpiar",
        cart_summary(cart)
    )
}

pub fn cart_empty() -> String {
    "🛒 Tu carrito está vacío\n\n\
     Aún no has agregado ningún platillo a tu pedido.\n\n\
     Escribe \"menú\" para ver nuestras opciones."
        .to_string()
}

pub fn item_added(cart: &Cart, item_name: &str) -> String {
    format!(
        "✅ ¡Excelente elección!\n\n\
         📦 {} agregado a tu pedido\n\n\
         {}\n\n\
         ¿Deseas agregar algo más?\n\
         - Escribe 'menú' para ver más opciones\n\
         - Escribe 'confirmar pedido' para finalizar",
        item_name,
        cart_summary(cart)
    )
}

pub fn order_cancelled() -> String {
    "🗑 Pedido cancelado\n\n\
     Tu carrito ha sido limpiado.\n\n\
     ¿Deseas empezar un nuevo pedido?\n\
     Escribe \"menú\" para ver nuestras opciones."
        .to_string()
}

pub fn shortfall(quote: &Quote, mode: FulfillmentMode, minimum: Decimal) -> String {
    let missing = quote.shortfall.unwrap_or_default();
    format!(
        "🛒 Tu pedido aún no alcanza el mínimo {}.\n\n\
         💵 Subtotal: {}\n\
         📉 Mínimo requerido: {}\n\
         ➕ Te faltan: {}\n\n\
         Escribe \"menú\" para agregar algo más.",
        mode.label_es(),
        money(quote.subtotal),
        money(minimum),
        money(missing)
    )
}

pub fn greeting(config: &RestaurantConfig, name: Option<&str>) -> String {
    let options = [
        format!(
            "¡Bienvenido a {}! ¿Listo para una experiencia culinaria única?",
            config.name
        ),
        "¡Buen día! Me da mucho gusto saludarte. ¿Qué se te antoja hoy?".to_string(),
        "¡Has llegado al lugar correcto para disfrutar de deliciosa comida!".to_string(),
    ];
    let base = options
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_else(|| options[0].clone());
    match name {
        Some(n) => format!("¡Hola {n}! {base}\n\nEscribe 'menú' para ver todas nuestras opciones."),
        None => format!("{base}\n\nEscribe 'menú' para ver todas nuestras opciones."),
    }
}

pub fn farewell(config: &RestaurantConfig) -> String {
    let options = [
        format!("¡Adiós! Esperamos verte pronto en {}!", config.name),
        "¡Hasta pronto! Que tengas un día delicioso".to_string(),
        "¡Chao! Gracias por visitarnos. Te esperamos con los brazos abiertos!".to_string(),
    ];
    options
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_else(|| options[0].clone())
}

pub fn thanks() -> String {
    "¡Muchas gracias!\n\n\
     Nos hace muy felices poder ayudarte. Tu satisfacción es nuestra mayor recompensa.\n\n\
     ¿Hay algo más en lo que pueda asistirte?\n\
     Escribe \"menú\" para ver nuestras opciones."
        .to_string()
}

pub fn help() -> String {
    "¿Te puedo ayudar con algo específico?\n\n\
     Puedo ayudarte con:\n\
     • Ver el menú (escribe \"menú\")\n\
     • Consultar precios\n\
     • Información de delivery y horarios\n\
     • Ver tu carrito actual\n\
     • Reservar una mesa (escribe \"reservar\")\n\n\
     Para ordenar, escribe:\n\
     \"Quiero [nombre del platillo]\"\n\n\
     ¿Qué necesitas? 🍽️"
        .to_string()
}

pub fn apology() -> String {
    "Lo siento, hubo un error al procesar tu mensaje. ¿Podrías intentarlo de nuevo?".to_string()
}
