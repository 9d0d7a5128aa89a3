//! End-to-end seeding against the in-memory platform.

use std::sync::Mutex;

use vivero_commerce::prelude::*;
use vivero_platform::{InMemoryPlatform, PlatformError, PlatformOp};
use vivero_seed::{SeedData, SeedError, SeedObserver, SeedStep, Seeder};

fn data() -> SeedData {
    SeedData::builtin().expect("builtin dataset parses")
}

#[tokio::test]
async fn seeds_an_empty_store() {
    let platform = InMemoryPlatform::new();
    let report = Seeder::new(&platform, data()).run().await.unwrap();
    let snapshot = platform.snapshot().await;

    assert_eq!(snapshot.sales_channels.len(), 1);
    assert_eq!(snapshot.sales_channels[0].name, "Default Sales Channel");

    assert_eq!(snapshot.regions.len(), 1);
    assert_eq!(snapshot.regions[0].currency_code, Currency::USD);
    assert_eq!(snapshot.regions[0].countries, vec!["us"]);
    assert_eq!(snapshot.tax_regions.len(), 1);
    assert_eq!(snapshot.tax_regions[0].provider_id, "tp_system");

    assert_eq!(snapshot.stock_locations.len(), 1);
    let location = &snapshot.stock_locations[0];
    assert_eq!(location.fulfillment_provider_ids, vec!["manual_manual"]);
    assert_eq!(location.fulfillment_set_ids.len(), 1);
    assert!(location.sales_channel_ids.contains(&report.sales_channel_id));

    assert_eq!(snapshot.fulfillment_sets.len(), 1);
    assert!(snapshot.fulfillment_sets[0]
        .zone_for_country("US")
        .is_some());

    assert_eq!(snapshot.shipping_options.len(), 2);
    assert_eq!(snapshot.product_categories.len(), 3);
    assert_eq!(snapshot.products.len(), 4);
    assert!(snapshot.products.iter().all(|p| p.is_published()));

    assert_eq!(snapshot.api_keys.len(), 1);
    let key = &snapshot.api_keys[0];
    assert_eq!(key.key_type, ApiKeyType::Publishable);
    assert_eq!(key.created_by.as_deref(), Some("seed-script"));
    assert!(key.is_linked_to(&report.sales_channel_id));

    assert_eq!(snapshot.inventory_items.len(), 4);
    assert_eq!(snapshot.inventory_levels.len(), 4);
    for item in &snapshot.inventory_items {
        let levels: Vec<_> = snapshot
            .inventory_levels
            .iter()
            .filter(|l| l.inventory_item_id == item.id)
            .collect();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].location_id, location.id);
        assert_eq!(levels[0].stocked_quantity, 250);
    }

    let store = &snapshot.stores[0];
    assert_eq!(store.default_currency(), Some(Currency::USD));
    assert_eq!(store.supported_currencies.len(), 1);
    assert_eq!(store.default_sales_channel_id.as_ref(), Some(&report.sales_channel_id));
    assert_eq!(store.default_location_id.as_ref(), Some(&location.id));

    assert!(!report.sales_channel_reused);
    assert!(!report.shipping_profile_reused);
    assert_eq!(report.inventory_levels, 4);
    assert!(report.key_file.is_none());
}

#[tokio::test]
async fn products_reference_seeded_records() {
    let platform = InMemoryPlatform::new();
    let report = Seeder::new(&platform, data()).run().await.unwrap();
    let snapshot = platform.snapshot().await;

    let interior = find_category(&snapshot.product_categories, "Plantas de interior").unwrap();
    let monstera = snapshot
        .products
        .iter()
        .find(|p| p.handle == "monstera-deliciosa")
        .unwrap();

    assert_eq!(monstera.category_ids, vec![interior.id.clone()]);
    assert_eq!(monstera.shipping_profile_id.as_ref(), Some(&report.shipping_profile_id));
    assert_eq!(monstera.sales_channel_ids, vec![report.sales_channel_id.clone()]);
    assert_eq!(
        monstera.from_price(Currency::USD),
        Some(Money::new(3499, Currency::USD))
    );
    assert!(monstera.variant_by_sku("PLANT-MONSTERA-15").is_some());
}

#[tokio::test]
async fn rerun_reuses_channel_and_profile_but_duplicates_the_rest() {
    let platform = InMemoryPlatform::new();
    let first = Seeder::new(&platform, data()).run().await.unwrap();
    let second = Seeder::new(&platform, data()).run().await.unwrap();
    let snapshot = platform.snapshot().await;

    assert_eq!(snapshot.sales_channels.len(), 1);
    assert_eq!(snapshot.shipping_profiles.len(), 1);
    assert!(second.sales_channel_reused);
    assert!(second.shipping_profile_reused);
    assert_eq!(first.sales_channel_id, second.sales_channel_id);
    assert_eq!(first.shipping_profile_id, second.shipping_profile_id);

    assert_eq!(snapshot.regions.len(), 2);
    assert_eq!(snapshot.tax_regions.len(), 2);
    assert_eq!(snapshot.stock_locations.len(), 2);
    assert_eq!(snapshot.shipping_options.len(), 4);
    assert_eq!(snapshot.api_keys.len(), 2);
    assert_eq!(snapshot.product_categories.len(), 6);
    assert_eq!(snapshot.products.len(), 8);
    assert_ne!(first.product_ids, second.product_ids);

    // The second run stocks every known item, old and new, at its new location.
    assert_eq!(second.inventory_levels, 8);
    assert_eq!(snapshot.inventory_levels.len(), 12);
}

#[tokio::test]
async fn shipping_prices_prefer_the_seeded_region() {
    let platform = InMemoryPlatform::new();
    let report = Seeder::new(&platform, data()).run().await.unwrap();
    let snapshot = platform.snapshot().await;
    let region = &report.region_ids[0];

    let amount = |code: &str, ctx: &PriceContext| {
        snapshot
            .shipping_options
            .iter()
            .find(|o| o.option_type.code == code)
            .and_then(|o| o.price_for(ctx))
            .map(|m| m.amount)
    };

    let in_region = PriceContext::in_region(region.clone(), Currency::USD);
    assert_eq!(amount("standard", &in_region), Some(900));
    assert_eq!(amount("express", &in_region), Some(1900));

    let elsewhere = PriceContext::in_region(RegionId::new("reg_other"), Currency::USD);
    assert_eq!(amount("standard", &elsewhere), Some(900));
    assert_eq!(amount("express", &PriceContext::new(Currency::USD)), Some(1900));
    assert_eq!(amount("standard", &PriceContext::new(Currency::EUR)), None);

    for option in &snapshot.shipping_options {
        assert!(option
            .prices
            .iter()
            .any(|p| p.target == PriceTarget::Region { region_id: region.clone() }));
        assert_eq!(option.rules.len(), 2);
    }
}

#[tokio::test]
async fn shipping_options_apply_to_store_deliveries_only() {
    let platform = InMemoryPlatform::new();
    Seeder::new(&platform, data()).run().await.unwrap();
    let snapshot = platform.snapshot().await;

    let store: std::collections::HashMap<String, String> = [
        ("enabled_in_store".to_string(), "true".to_string()),
        ("is_return".to_string(), "false".to_string()),
    ]
    .into();
    let returns: std::collections::HashMap<String, String> = [
        ("enabled_in_store".to_string(), "true".to_string()),
        ("is_return".to_string(), "true".to_string()),
    ]
    .into();

    for option in &snapshot.shipping_options {
        assert!(option.is_applicable(&store));
        assert!(!option.is_applicable(&returns));
    }
}

#[tokio::test]
async fn key_file_is_not_written_when_unset() {
    let platform = InMemoryPlatform::new();
    let report = Seeder::new(&platform, data())
        .key_file(None)
        .run()
        .await
        .unwrap();

    assert_eq!(report.key_file, None);
    assert!(report.publishable_key_token.starts_with("pk_"));
}

#[tokio::test]
async fn key_file_is_not_written_for_an_empty_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("publishable.txt");

    let platform = InMemoryPlatform::new().with_empty_tokens();
    let report = Seeder::new(&platform, data())
        .key_file(Some(path.clone()))
        .run()
        .await
        .unwrap();

    assert_eq!(report.key_file, None);
    assert_eq!(report.publishable_key_token, "");
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn key_file_is_written_to_a_nested_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront").join("keys").join("publishable.txt");

    let platform = InMemoryPlatform::new();
    let report = Seeder::new(&platform, data())
        .key_file(Some(path.clone()))
        .run()
        .await
        .unwrap();

    let key = &platform.snapshot().await.api_keys[0];
    let token = key.token.clone().unwrap();
    assert!(token.starts_with("pk_"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), token);
    assert_eq!(report.key_file.as_deref(), Some(path.as_path()));
    assert_eq!(report.publishable_key_token, token);
}

#[tokio::test]
async fn key_file_falls_back_to_the_key_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("publishable.txt");

    let platform = InMemoryPlatform::new().without_tokens();
    let report = Seeder::new(&platform, data())
        .key_file(Some(path.clone()))
        .run()
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        report.publishable_key_id.as_str()
    );
}

#[tokio::test]
async fn missing_category_aborts_before_products() {
    let mut data = data();
    data.products[2].category = "Plantas colgantes".to_string();

    let platform = InMemoryPlatform::new();
    let err = Seeder::new(&platform, data).run().await.unwrap_err();

    assert_eq!(err.step(), Some(SeedStep::Products));
    assert!(matches!(
        err.root(),
        SeedError::Commerce(CommerceError::CategoryNotFound(name)) if name == "Plantas colgantes"
    ));

    let snapshot = platform.snapshot().await;
    assert_eq!(snapshot.product_categories.len(), 3);
    assert!(snapshot.products.is_empty());
    assert!(!platform.journal().await.contains(&PlatformOp::CreateProducts));
}

#[tokio::test]
async fn platform_failure_aborts_the_run() {
    let platform = InMemoryPlatform::new().fail_on(PlatformOp::CreateShippingOptions);
    let err = Seeder::new(&platform, data()).run().await.unwrap_err();

    assert_eq!(err.step(), Some(SeedStep::ShippingOptions));
    assert!(matches!(
        err.root(),
        SeedError::Platform(PlatformError::Injected(PlatformOp::CreateShippingOptions))
    ));

    // Earlier steps are kept, later ones never run.
    let snapshot = platform.snapshot().await;
    assert_eq!(snapshot.regions.len(), 1);
    assert_eq!(snapshot.fulfillment_sets.len(), 1);
    assert!(snapshot.api_keys.is_empty());
    assert!(snapshot.products.is_empty());
    assert_eq!(
        platform.journal().await.last(),
        Some(&PlatformOp::CreateShippingOptions)
    );
}

#[tokio::test]
async fn missing_store_is_fatal() {
    let platform = InMemoryPlatform::empty();
    let err = Seeder::new(&platform, data()).run().await.unwrap_err();

    assert!(matches!(err, SeedError::NoStore));
    assert_eq!(platform.journal().await, vec![PlatformOp::ListStores]);
}

#[tokio::test]
async fn calls_are_strictly_ordered() {
    let platform = InMemoryPlatform::new();
    Seeder::new(&platform, data()).run().await.unwrap();

    use PlatformOp::*;
    assert_eq!(
        platform.journal().await,
        vec![
            ListStores,
            ListSalesChannels,
            CreateSalesChannels,
            UpdateStore,
            UpdateStore,
            CreateRegions,
            CreateTaxRegions,
            CreateStockLocations,
            UpdateStore,
            LinkFulfillmentProvider,
            ListShippingProfiles,
            CreateShippingProfiles,
            CreateFulfillmentSet,
            CreateShippingOptions,
            LinkSalesChannelsToLocation,
            CreateApiKeys,
            LinkSalesChannelsToApiKey,
            CreateProductCategories,
            CreateProducts,
            ListInventoryItems,
            CreateInventoryLevels,
        ]
    );
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<(SeedStep, bool)>>,
}

impl SeedObserver for Recorder {
    fn step_started(&self, step: SeedStep) {
        self.events.lock().unwrap().push((step, false));
    }

    fn step_finished(&self, step: SeedStep) {
        self.events.lock().unwrap().push((step, true));
    }
}

#[tokio::test]
async fn observer_sees_every_step_in_order() {
    let platform = InMemoryPlatform::new();
    let recorder = Recorder::default();
    Seeder::new(&platform, data())
        .observer(&recorder)
        .run()
        .await
        .unwrap();

    let events = recorder.events.lock().unwrap().clone();
    let expected: Vec<_> = SeedStep::ALL
        .iter()
        .flat_map(|&s| [(s, false), (s, true)])
        .collect();
    assert_eq!(events, expected);
}
