//! Checkout from review to completion with the file-backed invoice renderer.

#![allow(clippy::unwrap_used)]

use twist_taste_core::{CheckoutStep, OrderDetails, ProductId};
use twist_taste_integration_tests::TestContext;
use twist_taste_storefront::checkout::NotificationOutcome;
use twist_taste_storefront::{CheckoutError, CheckoutSession};

fn details() -> OrderDetails {
    OrderDetails {
        name: "مريم".to_string(),
        phone: "55512345".to_string(),
        address: "الدوحة، الخليج الغربي".to_string(),
        notes: Some("  ".to_string()),
    }
}

#[tokio::test]
async fn test_checkout_writes_invoice_and_clears_cart() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().unwrap();
    let _ = storefront.add_to_cart(ProductId::new(1), 2);
    let _ = storefront.add_to_cart(ProductId::new(6), 1);
    let expected_total = storefront.cart().total_price();

    let mut session = CheckoutSession::new();
    session.update_details(details()).unwrap();
    session.proceed_to_review().unwrap();
    let receipt = storefront.submit(&mut session).await.unwrap();

    assert_eq!(session.step(), CheckoutStep::Completed);
    assert_eq!(receipt.notification, NotificationOutcome::Delivered);
    assert!(receipt.cart_cleared);
    assert_eq!(receipt.total, expected_total);
    assert!(storefront.cart().is_empty());

    let invoices = ctx.invoices().unwrap();
    assert_eq!(invoices, vec![receipt.invoice.path.clone()]);
    let html = std::fs::read_to_string(&receipt.invoice.path).unwrap();
    assert!(html.contains(receipt.invoice.number.as_str()));
    assert!(html.contains("مريم"));
    assert!(html.contains(&expected_total.to_string()));

    assert!(ctx.open().unwrap().cart().is_empty());
}

#[tokio::test]
async fn test_checkout_without_destination_still_completes() {
    let ctx = TestContext::new().unwrap().without_notifications();
    let mut storefront = ctx.open().unwrap();
    let _ = storefront.add_to_cart(ProductId::new(2), 1);

    let mut session = CheckoutSession::new();
    session.update_details(details()).unwrap();
    session.proceed_to_review().unwrap();
    let receipt = storefront.submit(&mut session).await.unwrap();

    assert_eq!(receipt.notification, NotificationOutcome::Skipped);
    assert!(receipt.cart_cleared);
}

#[tokio::test]
async fn test_missing_details_block_review() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().unwrap();
    let _ = storefront.add_to_cart(ProductId::new(2), 1);

    let mut session = CheckoutSession::new();
    session
        .update_details(OrderDetails {
            phone: String::new(),
            ..details()
        })
        .unwrap();

    assert!(matches!(
        session.proceed_to_review(),
        Err(CheckoutError::MissingDetails(_))
    ));
    assert_eq!(session.step(), CheckoutStep::CollectingDetails);

    let err = storefront.submit(&mut session).await.unwrap_err();
    assert!(matches!(err, CheckoutError::InvalidTransition { .. }));
    assert_eq!(storefront.cart().items().len(), 1);
    assert!(ctx.invoices().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_cart_cannot_be_submitted() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().unwrap();

    let mut session = CheckoutSession::new();
    session.update_details(details()).unwrap();
    session.proceed_to_review().unwrap();

    let err = storefront.submit(&mut session).await.unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));
    assert_eq!(session.step(), CheckoutStep::Reviewing);
}

#[tokio::test]
async fn test_back_to_details_keeps_input() {
    let ctx = TestContext::new().unwrap();
    let mut storefront = ctx.open().unwrap();
    let _ = storefront.add_to_cart(ProductId::new(3), 1);

    let mut session = CheckoutSession::new();
    session.update_details(details()).unwrap();
    session.proceed_to_review().unwrap();
    session.back_to_details().unwrap();

    assert_eq!(session.step(), CheckoutStep::CollectingDetails);
    assert_eq!(session.details(), &details());

    session.proceed_to_review().unwrap();
    assert!(storefront.submit(&mut session).await.is_ok());

    session.close();
    assert_eq!(session.step(), CheckoutStep::CollectingDetails);
    assert_eq!(session.details(), &OrderDetails::default());
}
