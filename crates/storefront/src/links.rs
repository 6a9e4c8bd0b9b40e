//! WhatsApp deep links.

use twist_taste_core::{CartItem, Price};
use url::Url;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Build `https://wa.me/<number>` with optional prefilled text.
///
/// Anything other than digits is stripped from `number`, so `+974 3382 4737`
/// and `97433824737` give the same link.
///
/// # Errors
///
/// Returns [`url::ParseError::EmptyHost`] if `number` contains no digits.
pub fn whatsapp_link(number: &str, text: Option<&str>) -> Result<Url, url::ParseError> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(url::ParseError::EmptyHost);
    }

    let mut url = Url::parse(WHATSAPP_BASE)?.join(&digits)?;
    if let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) {
        url.query_pairs_mut().append_pair("text", text);
    }
    Ok(url)
}

/// Message listing the cart, for prefilling a chat with the store.
#[must_use]
pub fn order_message(items: &[CartItem], total: Price) -> String {
    let mut message = String::from("مرحباً، أود طلب:\n");
    for item in items {
        message.push_str(&format!(
            "- {} ({}x) {}\n",
            item.product.name,
            item.quantity,
            Price::qar(item.line_total())
        ));
    }
    message.push_str(&format!("المجموع: {total}"));
    message
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use twist_taste_core::{Product, ProductId};

    use super::*;

    #[test]
    fn test_plain_link() {
        let url = whatsapp_link("97433824737", None).unwrap();
        assert_eq!(url.as_str(), "https://wa.me/97433824737");
    }

    #[test]
    fn test_number_is_normalized() {
        let url = whatsapp_link("+974 3382-4737", None).unwrap();
        assert_eq!(url.as_str(), "https://wa.me/97433824737");
    }

    #[test]
    fn test_text_is_encoded() {
        let url = whatsapp_link("97433824737", Some("Hi & welcome")).unwrap();
        assert_eq!(url.path(), "/97433824737");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert_eq!(value, "Hi & welcome");
    }

    #[test]
    fn test_blank_text_is_dropped() {
        let url = whatsapp_link("97433824737", Some("   ")).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_number_without_digits() {
        assert!(whatsapp_link("call us", None).is_err());
    }

    #[test]
    fn test_order_message_lists_rows() {
        let item = CartItem::new(
            Product {
                id: ProductId::new(1),
                name: "Croissant".to_string(),
                price: Decimal::from(12),
                description: String::new(),
                image: String::new(),
                category: String::new(),
            },
            2,
        );
        let message = order_message(&[item], Price::qar(Decimal::from(24)));
        assert!(message.contains("- Croissant (2x) 24 ر.ق"));
        assert!(message.ends_with("24 ر.ق"));
    }
}
