//! Admin panel gate and catalog editing, checked through a reload.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use secrecy::SecretString;
use twist_taste_admin::form::{ProductFormError, inline_image};
use twist_taste_admin::services::auth::{AuthError, PassphraseAuthenticator};
use twist_taste_admin::{AdminConfig, AdminError, AdminSession, ProductForm};
use twist_taste_core::{Confirmation, ProductId};
use twist_taste_integration_tests::TestContext;
use twist_taste_storefront::catalog::default_catalog;

const PASSPHRASE: &str = "kunafa-at-midnight";

fn session() -> AdminSession<PassphraseAuthenticator> {
    let config = AdminConfig::from_vars(|key| {
        (key == "TT_ADMIN_PASSPHRASE").then(|| PASSPHRASE.to_string())
    })
    .unwrap();
    AdminSession::new(PassphraseAuthenticator::new(&config.passphrase).unwrap())
}

fn form(name: &str) -> ProductForm {
    ProductForm {
        name: name.to_string(),
        price: "22.5".to_string(),
        description: "Cheese kunafa".to_string(),
        category: "حلويات".to_string(),
        image: "https://example.com/kunafa.jpg".to_string(),
    }
}

#[test]
fn test_wrong_passphrase_keeps_console_locked() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().unwrap();
    let mut session = session();

    let err = session.unlock(&SecretString::from("not-the-passphrase")).unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(matches!(
        session.console(storefront.catalog_mut()),
        Err(AuthError::Locked)
    ));
}

#[test]
fn test_admin_changes_reach_the_storefront() {
    let ctx = TestContext::new().unwrap();
    let mut session = session();
    session.unlock(&SecretString::from(PASSPHRASE)).unwrap();

    let id = {
        let mut storefront = ctx.open().unwrap();
        let mut console = session.console(storefront.catalog_mut()).unwrap();
        let (id, durability) = console.add(&form("Kunafa")).unwrap();
        assert!(durability.is_persisted());

        let mut edit = form("Kunafa Nabulsia");
        edit.price = "25".to_string();
        assert!(console.edit(id, &edit).unwrap().is_persisted());
        id
    };

    let storefront = ctx.open().unwrap();
    let product = storefront.catalog().get(id).unwrap();
    assert_eq!(product.name, "Kunafa Nabulsia");
    assert_eq!(product.price, Decimal::from(25));
}

#[test]
fn test_uploaded_image_is_stored_inline() {
    let ctx = TestContext::new().unwrap();
    let mut session = session();
    session.unlock(&SecretString::from(PASSPHRASE)).unwrap();

    let mut storefront = ctx.open().unwrap();
    let mut console = session.console(storefront.catalog_mut()).unwrap();
    let mut upload = form("Maamoul");
    upload.image = inline_image(b"\x89PNG\r\n\x1a\n", "image/png").unwrap();
    let (id, _) = console.add(&upload).unwrap();

    let product = storefront.catalog().get(id).unwrap();
    assert!(product.image.starts_with("data:image/png;base64,"));
}

#[test]
fn test_invalid_form_is_rejected_without_saving() {
    let ctx = TestContext::new().unwrap();
    let mut session = session();
    session.unlock(&SecretString::from(PASSPHRASE)).unwrap();
    let mut storefront = ctx.open().unwrap();
    let mut console = session.console(storefront.catalog_mut()).unwrap();

    let mut bad = form("Kunafa");
    bad.price = "free".to_string();
    let err = console.add(&bad).unwrap_err();

    assert!(matches!(
        err,
        AdminError::Form(ProductFormError::InvalidPrice(_))
    ));
    assert_eq!(console.products().len(), default_catalog().len());
}

#[test]
fn test_delete_and_reset_need_confirmation() {
    let ctx = TestContext::new().unwrap();
    let mut session = session();
    session.unlock(&SecretString::from(PASSPHRASE)).unwrap();

    {
        let mut storefront = ctx.open().unwrap();
        let mut console = session.console(storefront.catalog_mut()).unwrap();
        let (id, _) = console.add(&form("Kunafa")).unwrap();

        let _ = console.delete(id, Confirmation::Declined).unwrap();
        assert!(console.products().iter().any(|p| p.id == id));

        assert!(console.delete(id, Confirmation::Confirmed).unwrap().is_persisted());
        assert!(!console.products().iter().any(|p| p.id == id));

        let missing = console.delete(ProductId::new(404), Confirmation::Confirmed);
        assert!(matches!(missing, Err(AdminError::NotFound(_))));

        let _ = console.add(&form("Maamoul")).unwrap();
        let _ = console.reset(Confirmation::Declined);
        assert_eq!(console.products().len(), default_catalog().len() + 1);
        assert!(console.reset(Confirmation::Confirmed).is_persisted());
    }

    let storefront = ctx.open().unwrap();
    assert_eq!(storefront.catalog().products(), default_catalog().as_slice());
}

#[test]
fn test_highest_price_survives_reload() {
    let ctx = TestContext::new().unwrap();
    let mut session = session();
    session.unlock(&SecretString::from(PASSPHRASE)).unwrap();

    let id = {
        let mut storefront = ctx.open().unwrap();
        let mut console = session.console(storefront.catalog_mut()).unwrap();
        let mut priced = form("Wedding Cake");
        priced.price = "999999999.99".to_string();
        let (id, durability) = console.add(&priced).unwrap();
        assert!(durability.is_persisted());

        let mut too_high = form("Gold Cake");
        too_high.price = "100000000000000000000".to_string();
        assert!(matches!(
            console.add(&too_high),
            Err(AdminError::Form(ProductFormError::PriceTooHigh { .. }))
        ));
        id
    };

    let storefront = ctx.open().unwrap();
    let product = storefront.catalog().get(id).unwrap();
    assert_eq!(product.price, "999999999.99".parse::<Decimal>().unwrap());
}
