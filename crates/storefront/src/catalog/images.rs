//! Product image validation and repair.
//!
//! A product image is either a remote `http(s)` link or an inline `data:` URI.
//! Anything else (relative paths left over from older builds, truncated
//! uploads, oversized payloads) is replaced so a dead reference never reaches
//! the product listing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use twist_taste_core::Product;
use url::Url;

/// Inline payloads longer than this are treated as broken.
pub const MAX_INLINE_IMAGE_CHARS: usize = 500_000;

const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/800x600?text=";

/// How an image reference resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef {
    /// `http://` or `https://` link with a host.
    Remote,
    /// `data:` URI with a decodable payload.
    Inline,
    /// Anything else.
    Unsupported,
}

/// Classify an image reference.
#[must_use]
pub fn classify(image: &str) -> ImageRef {
    let image = image.trim();
    if image.starts_with("data:") {
        return if is_valid_inline(image) {
            ImageRef::Inline
        } else {
            ImageRef::Unsupported
        };
    }

    match Url::parse(image) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
            ImageRef::Remote
        }
        _ => ImageRef::Unsupported,
    }
}

fn is_valid_inline(image: &str) -> bool {
    if image.len() > MAX_INLINE_IMAGE_CHARS {
        return false;
    }
    let Some((header, payload)) = image.split_once(',') else {
        return false;
    };
    if payload.is_empty() {
        return false;
    }
    if header.ends_with(";base64") {
        STANDARD.decode(payload).is_ok()
    } else {
        true
    }
}

/// Placeholder image that shows the product name.
#[must_use]
pub fn placeholder_for(name: &str) -> String {
    format!("{PLACEHOLDER_BASE}{}", urlencoding::encode(name))
}

/// Replace an unsupported image in place.
///
/// Prefers the image of a default product with the same name, falling back to
/// a placeholder. Returns `true` if the image was replaced.
pub fn repair(product: &mut Product, defaults: &[Product]) -> bool {
    if classify(&product.image) != ImageRef::Unsupported {
        return false;
    }

    let replacement = defaults
        .iter()
        .find(|d| d.name == product.name && classify(&d.image) != ImageRef::Unsupported)
        .map_or_else(|| placeholder_for(&product.name), |d| d.image.clone());

    tracing::debug!(
        product_id = %product.id,
        name = %product.name,
        "Replacing unsupported product image"
    );
    product.image = replacement;
    true
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use twist_taste_core::ProductId;

    use super::*;

    fn product(name: &str, image: &str) -> Product {
        Product {
            id: ProductId::new(500),
            name: name.to_string(),
            price: Decimal::from(10),
            description: String::new(),
            image: image.to_string(),
            category: "Sweets".to_string(),
        }
    }

    #[test]
    fn test_classify_remote() {
        assert_eq!(classify("https://images.example.com/a.jpg"), ImageRef::Remote);
        assert_eq!(classify("http://cdn.example.com/b.png"), ImageRef::Remote);
    }

    #[test]
    fn test_classify_inline() {
        assert_eq!(classify("data:image/png;base64,iVBORw0KGgo="), ImageRef::Inline);
        assert_eq!(
            classify("data:image/svg+xml,%3Csvg%3E%3C/svg%3E"),
            ImageRef::Inline
        );
    }

    #[test]
    fn test_classify_unsupported() {
        assert_eq!(classify("images/croissant.jpg"), ImageRef::Unsupported);
        assert_eq!(classify("/static/a.png"), ImageRef::Unsupported);
        assert_eq!(classify(""), ImageRef::Unsupported);
        assert_eq!(classify("ftp://example.com/a.png"), ImageRef::Unsupported);
        assert_eq!(classify("data:image/png;base64,"), ImageRef::Unsupported);
        assert_eq!(classify("data:image/png;base64,@@@"), ImageRef::Unsupported);
    }

    #[test]
    fn test_oversized_inline_is_unsupported() {
        let payload = "A".repeat(MAX_INLINE_IMAGE_CHARS);
        let image = format!("data:image/png;base64,{payload}");
        assert_eq!(classify(&image), ImageRef::Unsupported);
    }

    #[test]
    fn test_placeholder_encodes_name() {
        assert_eq!(
            placeholder_for("Date Cake"),
            "https://via.placeholder.com/800x600?text=Date%20Cake"
        );
    }

    #[test]
    fn test_repair_leaves_valid_images() {
        let mut p = product("Cake", "https://example.com/cake.jpg");
        assert!(!repair(&mut p, &[]));
        assert_eq!(p.image, "https://example.com/cake.jpg");
    }

    #[test]
    fn test_repair_prefers_default_with_same_name() {
        let defaults = vec![product("Cake", "https://example.com/default-cake.jpg")];
        let mut p = product("Cake", "uploads/cake.jpg");
        assert!(repair(&mut p, &defaults));
        assert_eq!(p.image, "https://example.com/default-cake.jpg");
    }

    #[test]
    fn test_repair_falls_back_to_placeholder() {
        let mut p = product("Cake", "uploads/cake.jpg");
        assert!(repair(&mut p, &[]));
        assert_eq!(p.image, placeholder_for("Cake"));
        assert_eq!(classify(&p.image), ImageRef::Remote);
    }
}
