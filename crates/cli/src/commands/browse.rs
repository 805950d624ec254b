//! Read-only listing commands.

use chrono::Utc;
use tracing::info;

use campus_canteen_admin::{MerchantOrderService, OrderFilter, SalesSummary};
use campus_canteen_core::CampusLocation;
use campus_canteen_datastore::{ChangeNotifier, DataStore};
use campus_canteen_storefront::CatalogService;

/// List listed stores, optionally filtered by location.
pub fn stores(
    store: &DataStore,
    location: Option<CampusLocation>,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CatalogService::new(store);
    let stores = catalog.stores(location);

    if stores.is_empty() {
        info!("no stores listed");
        return Ok(());
    }

    for shop in stores {
        info!(
            name = %shop.name,
            location = %shop.location,
            open = shop.is_open,
            "store"
        );
    }
    Ok(())
}

/// Show a store's menu by exact store name.
pub fn menu(store: &DataStore, store_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = CatalogService::new(store);
    let shop = catalog
        .stores(None)
        .into_iter()
        .find(|s| s.name == store_name)
        .ok_or_else(|| format!("no listed store named {store_name}"))?;

    for dish in catalog.menu(shop.id) {
        info!(
            name = %dish.name,
            price = %dish.price,
            available = dish.is_available,
            "dish"
        );
    }
    Ok(())
}

/// Show a merchant's order queue and sales summary.
pub fn orders(
    store: &DataStore,
    notifier: &ChangeNotifier,
    merchant: &str,
    filter: OrderFilter,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = store.load();
    let owner = db
        .find_user(merchant)
        .ok_or_else(|| format!("no account named {merchant}"))?;

    let service = MerchantOrderService::new(store, notifier);
    let orders = service.orders(owner.id, filter)?;
    for order in &orders {
        info!(
            order_id = %order.id,
            status = %order.status,
            total = %order.total_price,
            items = order.items.len(),
            "order"
        );
    }

    let all_orders = service.orders(owner.id, OrderFilter::All)?;
    let summary = SalesSummary::compute(&all_orders, Utc::now());
    info!(
        revenue = %summary.total_revenue,
        completed = summary.completed_orders,
        average = %summary.average_order_value,
        "sales summary"
    );
    Ok(())
}

/// Show the live window sessions.
pub fn sessions(store: &DataStore) -> Result<(), Box<dyn std::error::Error>> {
    let db = store.load();
    let now = Utc::now();

    if db.sessions.is_empty() {
        info!("no live window sessions");
        return Ok(());
    }

    for session in &db.sessions {
        let age = now
            .signed_duration_since(session.last_heartbeat)
            .num_seconds();
        info!(
            window_id = %session.window_id,
            heartbeat_age_secs = age,
            "session"
        );
    }
    Ok(())
}
