//! Persistence of the cart across store instances ("page reloads").

#![allow(clippy::unwrap_used)]

use techstore_core::{CartLineItem, Price, ProductId};
use techstore_integration_tests::{
    HEADPHONES, LAPTOP, PHONE, cart_with, cart_with_storage, empty_cart, init_test_tracing,
};
use techstore_storefront::persistence::PersistenceError;
use techstore_storefront::{
    CartConfig, FileStorage, HydrateReport, MemoryStorage, PersistenceAdapter, StorageSink,
};

const KEY: &str = "shopping-cart";

fn stored_lines(storage: &MemoryStorage) -> Vec<CartLineItem> {
    serde_json::from_str(storage.peek(KEY).unwrap()).unwrap()
}

// =============================================================================
// Adapter
// =============================================================================

#[test]
fn test_scenario_f_not_json_loads_empty() {
    init_test_tracing();
    let mut storage = MemoryStorage::new();
    storage.set_item(KEY, "not json").unwrap();
    let adapter = PersistenceAdapter::new(storage, KEY);

    assert!(adapter.load().is_empty());
    assert!(matches!(
        adapter.try_load(),
        Err(PersistenceError::Malformed(_))
    ));
}

#[test]
fn test_round_trip_through_file_storage() {
    init_test_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local-storage.json");
    let items = vec![
        CartLineItem {
            id: ProductId::new(5),
            name: "WatchSmart Smart Watch".to_string(),
            price: Price::new(19_990),
            quantity: 3,
            image: "images/product5-large.jpg".to_string(),
        },
        CartLineItem {
            id: ProductId::new(6),
            name: "ActionPro Action Camera".to_string(),
            price: Price::new(24_990),
            quantity: 1,
            image: "images/product6-large.jpg".to_string(),
        },
    ];

    let mut writer = PersistenceAdapter::new(FileStorage::new(&path), KEY);
    writer.try_save(&items).unwrap();

    let reader = PersistenceAdapter::new(FileStorage::new(&path), KEY);
    assert_eq!(reader.load(), items);
}

#[test]
fn test_store_writes_the_persisted_layout() {
    let mut cart = empty_cart();
    cart.add_item(PHONE).unwrap();
    cart.add_item(PHONE).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(cart.persistence().storage().peek(KEY).unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!([{
            "id": 1,
            "name": "XTech Pro Smartphone",
            "price": 29990,
            "quantity": 2,
            "image": "images/product1-large.jpg"
        }])
    );
}

// =============================================================================
// Store across reloads
// =============================================================================

#[test]
fn test_cart_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local-storage.json");

    let mut first = cart_with_storage(FileStorage::new(&path));
    first.hydrate();
    first.add_item(LAPTOP).unwrap();
    first.add_item(HEADPHONES).unwrap();
    first.set_quantity(HEADPHONES, 2);
    let before = first.snapshot();
    drop(first);

    let mut second = cart_with_storage(FileStorage::new(&path));
    let report = second.hydrate();

    assert_eq!(report, HydrateReport {
        restored: 2,
        dropped: 0,
        merged: 0
    });
    assert_eq!(second.snapshot(), before);
    assert_eq!(second.display().last(), Some(&before));
    assert!(second.notifier().messages.is_empty());
}

#[test]
fn test_hydrate_from_malformed_blob_starts_empty() {
    let mut storage = MemoryStorage::new();
    storage.set_item(KEY, "{\"id\": 1").unwrap();
    let mut cart = cart_with_storage(storage);

    let report = cart.hydrate();

    assert_eq!(report, HydrateReport::default());
    assert!(cart.snapshot().items.is_empty());
    assert_eq!(cart.display().renders.len(), 1);
}

#[test]
fn test_hydrate_rewrites_cleaned_list() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            KEY,
            r#"[
                {"id":3,"name":"AudioMax Headphones","price":12990,"quantity":1,"image":"c.jpg"},
                {"id":42,"name":"Retired","price":100,"quantity":1,"image":"r.jpg"}
            ]"#,
        )
        .unwrap();
    let mut cart = cart_with_storage(storage);

    cart.hydrate();

    let stored = stored_lines(cart.persistence().storage());
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, HEADPHONES);
}

#[test]
fn test_custom_storage_key() {
    let config = CartConfig {
        storage_key: "techstore-cart".to_string(),
        ..CartConfig::default()
    };
    let mut cart = cart_with(MemoryStorage::new(), config);
    cart.add_item(PHONE).unwrap();

    let storage = cart.persistence().storage();
    assert!(storage.peek("techstore-cart").is_some());
    assert!(storage.peek(KEY).is_none());
}

// =============================================================================
// Degraded storage
// =============================================================================

#[test]
fn test_quota_exceeded_keeps_cart_in_memory() {
    let mut cart = cart_with_storage(MemoryStorage::with_quota(32));

    cart.add_item(PHONE).unwrap();
    cart.add_item(LAPTOP).unwrap();

    assert_eq!(cart.snapshot().total_count, 2);
    assert_eq!(cart.snapshot().total_price, Price::new(119_980));
    assert!(cart.persistence().is_memory_only());
    assert_eq!(cart.notifier().messages.len(), 2);

    cart.clear();
    assert!(!cart.persistence().is_memory_only());
    assert_eq!(cart.persistence().storage().peek(KEY), Some("[]"));
}

#[test]
fn test_disabled_storage_never_blocks_operations() {
    let mut cart = cart_with_storage(MemoryStorage::disabled());

    cart.hydrate();
    cart.add_item(PHONE).unwrap();
    cart.set_quantity(PHONE, 4);
    cart.remove_item(PHONE);
    cart.add_item(HEADPHONES).unwrap();

    assert_eq!(cart.snapshot().total_price, Price::new(12_990));
    assert!(cart.persistence().is_memory_only());
}
