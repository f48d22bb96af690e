//! Outbound WhatsApp deep links

use url::form_urlencoded;

use crate::quote::Quote;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// `https://wa.me/<digits>?text=<percent-encoded text>`
///
/// Non-digits are dropped from the phone number. Spaces encode as `%20`.
pub fn whatsapp_link(phone: &str, text: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if text.is_empty() {
        return format!("{}{}", WHATSAPP_BASE, digits);
    }
    format!("{}{}?text={}", WHATSAPP_BASE, digits, encode_component(text))
}

pub fn quote_link(phone: &str, quote: &Quote) -> String {
    whatsapp_link(phone, &quote.summary)
}

// form_urlencoded writes spaces as '+' and escapes a literal '+' as %2B,
// so every remaining '+' is a space.
fn encode_component(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
