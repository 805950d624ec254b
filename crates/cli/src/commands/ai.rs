//! AI-backed commands: demand prediction and merchant advice.

use tracing::info;

use campus_canteen_admin::AdviceService;
use campus_canteen_ai::{GeminiClient, GeminiConfig};
use campus_canteen_datastore::DataStore;
use campus_canteen_storefront::ForecastService;

/// Predict campus order demand for every area and horizon.
pub async fn predict(
    store: &DataStore,
    gemini: Option<&GeminiConfig>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = gemini.map(GeminiClient::new);
    let forecast = ForecastService::new(store, client.as_ref());

    for point in forecast.forecast().await {
        info!(
            area = point.area.token(),
            horizon_mins = point.horizon.minutes(),
            value = point.value,
            "forecast"
        );
    }
    Ok(())
}

/// Fetch AI advice for a merchant's store.
pub async fn advise(
    store: &DataStore,
    gemini: Option<&GeminiConfig>,
    merchant: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = store.load();
    let owner = db
        .find_user(merchant)
        .ok_or_else(|| format!("no account named {merchant}"))?;
    let shop = db
        .store_for_owner(owner.id)
        .ok_or_else(|| format!("{merchant} owns no store"))?;

    let client = gemini.map(GeminiClient::new);
    let advice = AdviceService::new(store.clone(), client);
    let result = advice.advice_for(shop.id).await;

    info!(keywords = ?result.keywords, "advice keywords");
    for (index, tip) in result.tips.iter().enumerate() {
        info!(tip = %tip, number = index + 1, "advice tip");
    }
    Ok(())
}
