//! Integration tests for the product submission flow.
//!
//! Forms are built through the edit reducer and submitted to an in-memory
//! backend, so the whole path from edit to stored product is exercised.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use storeroom_admin::api::{ProductApi, ProductQuery, UNEXPECTED_FAILURE};
use storeroom_admin::submit_product;
use storeroom_core::form::{
    ColorEdit, FieldEdit, FormEdit, ImageEdit, PriceEdit, ProductForm, VariationEdit,
};
use storeroom_core::{CurrencyCode, PublishStatus};
use storeroom_integration_tests::fixtures::two_color_tee;
use storeroom_integration_tests::{ApiCall, InMemoryProductApi};

// =============================================================================
// Successful Submission
// =============================================================================

#[tokio::test]
async fn test_submit_creates_product_and_resets_form() {
    let api = InMemoryProductApi::new();
    let (form, _, _) = two_color_tee();

    let outcome = submit_product(&api, form).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.notice.message, "Product created successfully!");
    assert_eq!(outcome.form, ProductForm::new(CurrencyCode::INR));

    let stored = api.stored().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id.as_ref().unwrap().as_str(), "prod-1");
}

#[tokio::test]
async fn test_submitted_payload_shape() {
    let api = InMemoryProductApi::new();
    let (form, _, _) = two_color_tee();

    submit_product(&api, form).await;

    let created = api.created();
    let product = &created[0];
    assert_eq!(product.name, "Organic Crew Tee");
    assert_eq!(product.vendor_name, "Fashion Forward Co.");
    assert_eq!(product.keywords, ["tee", "organic", "cotton"]);
    assert_eq!(product.return_policy_days, 7);
    assert_eq!(product.variations.len(), 2);

    let navy = &product.variations[0];
    assert_eq!(navy.color.as_str(), "#1E3A8A");
    assert_eq!(navy.slug, "organic-crew-tee-1e3a8a");
    assert!(navy.has_prime_color());
    assert!(navy.in_stock);
    let price = navy.price().unwrap();
    assert_eq!(price.mrp, Decimal::from(1499));
    assert_eq!(price.selling_price, Decimal::new(119_920, 2));
    assert_eq!(navy.specifications[0].key, "Material");

    let sand = &product.variations[1];
    assert!(!sand.has_prime_color());
    assert!(!sand.in_stock);
    assert_eq!(sand.stock_label(), "Out of Stock");
    assert_eq!(sand.price().unwrap().selling_price, Decimal::from(1299));
}

#[tokio::test]
async fn test_rows_without_sku_are_not_submitted() {
    let api = InMemoryProductApi::new();
    let (form, _, _) = two_color_tee();
    let form = form.apply(FormEdit::Variation(VariationEdit::Add));

    let outcome = submit_product(&api, form).await;

    assert!(outcome.is_success());
    assert_eq!(api.created()[0].variations.len(), 2);
}

// =============================================================================
// Validation Failures
// =============================================================================

#[tokio::test]
async fn test_missing_vendor_blocks_submission() {
    let api = InMemoryProductApi::new();
    let (form, _, _) = two_color_tee();
    let form = form.apply(FormEdit::Field(FieldEdit::Vendor(String::new())));

    let outcome = submit_product(&api, form.clone()).await;

    assert!(!outcome.is_success());
    assert_eq!(
        outcome.notice.message,
        "Error: Please fill in all required fields (Product Name, Vendor, Category). Missing: Vendor."
    );
    assert_eq!(outcome.form, form);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_zero_price_blocks_submission() {
    let api = InMemoryProductApi::new();
    let (form, _, sand) = two_color_tee();
    let form = form.apply(FormEdit::Price {
        color: sand,
        edit: PriceEdit::Mrp("0".to_string()),
    });

    let outcome = submit_product(&api, form).await;

    assert_eq!(
        outcome.notice.message,
        "Error: MRP and Selling Price must be greater than zero (color #D6C29C)."
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_full_discount_blocks_submission() {
    let api = InMemoryProductApi::new();
    let (form, navy, _) = two_color_tee();
    let form = form.apply(FormEdit::Price {
        color: navy,
        edit: PriceEdit::DiscountPercent("100".to_string()),
    });

    let outcome = submit_product(&api, form).await;

    assert!(outcome.notice.message.contains("greater than zero"));
}

#[tokio::test]
async fn test_color_without_image_blocks_submission() {
    let api = InMemoryProductApi::new();
    let (form, navy, _) = two_color_tee();
    let form = form.apply(FormEdit::Image {
        color: navy,
        edit: ImageEdit::Url {
            index: 0,
            url: String::new(),
        },
    });

    let outcome = submit_product(&api, form).await;

    assert!(!outcome.is_success());
    assert!(outcome.notice.message.contains("#1E3A8A"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_sku_row_without_size_blocks_submission() {
    let api = InMemoryProductApi::new();
    let (form, _, _) = two_color_tee();
    let form = form.apply(FormEdit::Variation(VariationEdit::Size {
        index: 1,
        size: " ".to_string(),
    }));

    let outcome = submit_product(&api, form).await;

    assert_eq!(
        outcome.notice.message,
        "Error: Variations with an SKU must have a selected Color and Size (SKU TEE-SAND-L)."
    );
}

#[tokio::test]
async fn test_removing_prime_color_promotes_next() {
    let api = InMemoryProductApi::new();
    let (form, navy, sand) = two_color_tee();
    let form = form.apply(FormEdit::Color(ColorEdit::Remove { id: navy }));

    assert_eq!(form.prime_color().unwrap().id, sand);
    assert!(form.details.get(&navy).is_none());

    let outcome = submit_product(&api, form).await;

    assert!(outcome.is_success());
    let created = api.created();
    assert_eq!(created[0].variations.len(), 1);
    assert!(created[0].variations[0].has_prime_color());
}

// =============================================================================
// Backend Failures
// =============================================================================

#[tokio::test]
async fn test_backend_error_message_is_shown() {
    let api = InMemoryProductApi::failing(409, "SKU TEE-NAVY-M already exists");
    let (form, _, _) = two_color_tee();

    let outcome = submit_product(&api, form.clone()).await;

    assert!(!outcome.is_success());
    assert_eq!(
        outcome.notice.message,
        "Error: SKU TEE-NAVY-M already exists"
    );
    assert!(outcome.response.is_none());
    assert_eq!(outcome.form, form);
    assert_eq!(api.created().len(), 1);
}

#[tokio::test]
async fn test_blank_backend_error_uses_fallback() {
    let api = InMemoryProductApi::failing(500, "");
    let (form, _, _) = two_color_tee();

    let outcome = submit_product(&api, form).await;

    assert_eq!(outcome.notice.message, format!("Error: {UNEXPECTED_FAILURE}"));
}

// =============================================================================
// Product Lifecycle
// =============================================================================

#[tokio::test]
async fn test_lifecycle_after_submission() {
    let api = InMemoryProductApi::new();
    let (form, _, _) = two_color_tee();
    let outcome = submit_product(&api, form).await;
    let id = outcome.response.unwrap().product.unwrap().id.unwrap();

    let response = api
        .update_product_status(&id, PublishStatus::Published)
        .await
        .unwrap();
    assert_eq!(response.message, "Status updated to Published");

    let page = api
        .list_products(&ProductQuery {
            publish_status: Some(PublishStatus::Published),
            ..ProductQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, Some(1));

    let drafts = api
        .list_products(&ProductQuery {
            publish_status: Some(PublishStatus::Draft),
            ..ProductQuery::default()
        })
        .await
        .unwrap();
    assert!(drafts.products.is_empty());

    let fetched = api.get_product_by_slug("organic-crew-tee-d6c29c").await.unwrap();
    assert_eq!(fetched.id.as_ref(), Some(&id));

    let renamed = storeroom_core::Product {
        name: "Organic Crew Tee v2".to_string(),
        ..fetched
    };
    let updated = api.update_product(&id, &renamed).await.unwrap();
    assert_eq!(updated.product.unwrap().name, "Organic Crew Tee v2");
    assert_eq!(api.stored().await[0].name, "Organic Crew Tee v2");

    api.delete_product(&id).await.unwrap();
    assert!(api.stored().await.is_empty());
    assert!(matches!(api.calls().last(), Some(ApiCall::Delete(deleted)) if deleted == &id));
}
