//! Catalog merge, reload and reset against a file-backed store.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use serde_json::json;
use twist_taste_core::{NewProduct, ProductId};
use twist_taste_integration_tests::TestContext;
use twist_taste_storefront::Durability;
use twist_taste_storefront::catalog::{PRODUCTS_KEY, default_catalog};

fn new_product(name: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price: Decimal::from(18),
        description: "Soft sponge with date syrup".to_string(),
        image: "https://example.com/date-cake.jpg".to_string(),
        category: "حلويات".to_string(),
    }
}

#[test]
fn test_first_load_shows_defaults_without_writing() {
    let ctx = TestContext::new().unwrap();
    let storefront = ctx.open().unwrap();

    assert_eq!(storefront.catalog().products(), default_catalog().as_slice());
    assert!(!ctx.record_path(PRODUCTS_KEY).exists());
}

#[test]
fn test_added_product_survives_reload() {
    let ctx = TestContext::new().unwrap();

    let id = {
        let mut storefront = ctx.open().unwrap();
        let (id, durability) = storefront.catalog_mut().add(new_product("Date Cake"));
        assert_eq!(durability, Durability::Persisted);
        id
    };

    let storefront = ctx.open().unwrap();
    let reloaded = storefront.catalog().get(id).unwrap();
    assert_eq!(reloaded.name, "Date Cake");
    assert_eq!(reloaded.price, Decimal::from(18));
    assert_eq!(
        storefront.catalog().products().len(),
        default_catalog().len() + 1
    );
}

#[test]
fn test_defaults_win_over_persisted_copies() {
    let ctx = TestContext::new().unwrap();

    {
        let mut storefront = ctx.open().unwrap();
        let mut edited = storefront.catalog().get(ProductId::new(1)).unwrap().clone();
        edited.price = Decimal::from(99);
        assert!(storefront.catalog_mut().edit(edited).is_persisted());
        assert_eq!(
            storefront.catalog().get(ProductId::new(1)).unwrap().price,
            Decimal::from(99)
        );
    }

    let storefront = ctx.open().unwrap();
    assert_eq!(
        storefront.catalog().get(ProductId::new(1)),
        default_catalog().iter().find(|p| p.id == ProductId::new(1))
    );
}

#[test]
fn test_reload_dedupes_and_repairs_images() {
    let ctx = TestContext::new().unwrap();
    std::fs::create_dir_all(ctx.data_dir()).unwrap();

    let default_two = default_catalog()
        .into_iter()
        .find(|p| p.id == ProductId::new(2))
        .unwrap();
    let record = json!([
        { "id": 1, "name": "Impostor", "price": 1, "description": "", "image": "https://example.com/x.jpg", "category": "x" },
        { "id": 500, "name": "Kunafa", "price": 30, "description": "", "image": "images/kunafa.jpg", "category": "حلويات" },
        { "id": 500, "name": "Kunafa again", "price": 31, "description": "", "image": "https://example.com/k.jpg", "category": "حلويات" },
        { "id": 600, "name": default_two.name, "price": 15, "description": "", "image": "data:image/png;base64,", "category": "معجنات" }
    ]);
    std::fs::write(ctx.record_path(PRODUCTS_KEY), record.to_string()).unwrap();

    let storefront = ctx.open().unwrap();
    let catalog = storefront.catalog();

    assert_eq!(catalog.products().len(), default_catalog().len() + 2);
    assert_ne!(catalog.get(ProductId::new(1)).unwrap().name, "Impostor");

    let kunafa = catalog.get(ProductId::new(500)).unwrap();
    assert_eq!(kunafa.name, "Kunafa");
    assert!(kunafa.image.starts_with("https://via.placeholder.com/"));

    assert_eq!(catalog.get(ProductId::new(600)).unwrap().image, default_two.image);
}

#[test]
fn test_corrupt_record_falls_back_to_defaults() {
    let ctx = TestContext::new().unwrap();
    std::fs::create_dir_all(ctx.data_dir()).unwrap();
    std::fs::write(ctx.record_path(PRODUCTS_KEY), "{ not json").unwrap();

    let storefront = ctx.open().unwrap();
    assert_eq!(storefront.catalog().products(), default_catalog().as_slice());
}

#[test]
fn test_reset_removes_record() {
    let ctx = TestContext::new().unwrap();

    {
        let mut storefront = ctx.open().unwrap();
        let _ = storefront.catalog_mut().add(new_product("Date Cake"));
        assert!(ctx.record_path(PRODUCTS_KEY).exists());

        assert!(storefront.catalog_mut().reset().is_persisted());
        assert_eq!(storefront.catalog().products(), default_catalog().as_slice());
    }

    assert!(!ctx.record_path(PRODUCTS_KEY).exists());
    let storefront = ctx.open().unwrap();
    assert_eq!(storefront.catalog().products(), default_catalog().as_slice());
}

#[test]
fn test_full_store_keeps_changes_for_session_and_warns_once() {
    let ctx = TestContext::new().unwrap().with_quota(64);

    {
        let mut storefront = ctx.open().unwrap();
        let (first, durability) = storefront.catalog_mut().add(new_product("Date Cake"));
        assert_eq!(durability, Durability::SessionOnly { warn_user: true });

        let (_, durability) = storefront.catalog_mut().add(new_product("Kunafa"));
        assert_eq!(durability, Durability::SessionOnly { warn_user: false });

        assert!(storefront.catalog().get(first).is_some());
        assert_eq!(
            storefront.catalog().products().len(),
            default_catalog().len() + 2
        );
    }

    let storefront = ctx.open().unwrap();
    assert_eq!(storefront.catalog().products(), default_catalog().as_slice());
}

#[test]
fn test_categories_follow_catalog() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().unwrap();

    let mut product = new_product("Karak Tea");
    product.category = "مشروبات".to_string();
    let (id, _) = storefront.catalog_mut().add(product);

    assert!(storefront.catalog().categories().contains(&"مشروبات"));
    let drinks: Vec<_> = storefront
        .catalog()
        .in_category(Some("مشروبات"))
        .map(|p| p.id)
        .collect();
    assert_eq!(drinks, vec![id]);
    assert_eq!(
        storefront.catalog().in_category(None).count(),
        storefront.catalog().products().len()
    );
}

#[test]
fn test_added_product_with_broken_image_gets_placeholder() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().unwrap();

    let mut product = new_product("Date Cake");
    product.image = "images/date-cake.jpg".to_string();
    let (id, _) = storefront.catalog_mut().add(product);

    let stored = storefront.catalog().get(id).unwrap();
    assert_ne!(stored.image, "images/date-cake.jpg");
    assert!(stored.image.starts_with("https://via.placeholder.com/"));
}
