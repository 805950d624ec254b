//! AI merchant advice.
//!
//! Builds a review digest for one store, asks the model for keywords and
//! improvement tips, and falls back to a fixed placeholder whenever the
//! call fails. Results are cached per store for a few minutes so repeated
//! dashboard visits do not re-spend the API quota.

use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use campus_canteen_ai::GeminiClient;
use campus_canteen_core::StoreId;
use campus_canteen_datastore::{DataStore, Database};

/// How long one store's advice stays cached.
const ADVICE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of stores with cached advice.
const ADVICE_CACHE_CAPACITY: u64 = 64;

/// Keywords and tips for one store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MerchantAdvice {
    /// High-frequency themes extracted from reviews.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Concrete improvement suggestions.
    #[serde(default)]
    pub tips: Vec<String>,
}

impl MerchantAdvice {
    /// The fixed fallback shown when no advice could be produced.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            keywords: vec!["loading".to_owned()],
            tips: vec!["no advice available".to_owned()],
        }
    }
}

/// One review as presented to the model.
#[derive(Debug, Serialize)]
struct ReviewDigest {
    dish: String,
    rating: u8,
    comment: String,
}

/// AI advice for the merchant window.
///
/// Owns cheap clones of the store and client plus the response cache, so
/// one instance can live for the whole window lifetime.
pub struct AdviceService {
    store: DataStore,
    client: Option<GeminiClient>,
    cache: Cache<StoreId, MerchantAdvice>,
}

impl std::fmt::Debug for AdviceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceService").finish_non_exhaustive()
    }
}

impl AdviceService {
    /// Create a new advice service.
    ///
    /// Without a client every request returns the placeholder.
    #[must_use]
    pub fn new(store: DataStore, client: Option<GeminiClient>) -> Self {
        Self {
            store,
            client,
            cache: Cache::builder()
                .time_to_live(ADVICE_TTL)
                .max_capacity(ADVICE_CACHE_CAPACITY)
                .build(),
        }
    }

    /// Advice for one store, cached per store id.
    ///
    /// Never fails: any problem resolves to the placeholder, logged at warn
    /// level. Placeholder results share the cache TTL, so a failed call is
    /// retried once the entry expires.
    pub async fn advice_for(&self, store_id: StoreId) -> MerchantAdvice {
        self.cache
            .get_with(store_id, async { self.fetch(store_id).await })
            .await
    }

    async fn fetch(&self, store_id: StoreId) -> MerchantAdvice {
        let Some(client) = &self.client else {
            debug!("no AI client configured, returning placeholder advice");
            return MerchantAdvice::placeholder();
        };

        let prompt = build_prompt(&self.store.load(), store_id);

        match client
            .generate_json(client.flash_model(), &prompt, response_schema())
            .await
        {
            Ok(text) => match serde_json::from_str::<MerchantAdvice>(&text) {
                Ok(advice) => advice,
                Err(e) => {
                    warn!(error = %e, "advice response unparsable, returning placeholder");
                    MerchantAdvice::placeholder()
                }
            },
            Err(e) => {
                warn!(error = %e, "advice call failed, returning placeholder");
                MerchantAdvice::placeholder()
            }
        }
    }
}

/// Build the advice prompt from a store's reviews.
fn build_prompt(db: &Database, store_id: StoreId) -> String {
    let store_name = db
        .store_by_id(store_id)
        .map_or("unknown store", |s| s.name.as_str());

    let orders = db.orders_for_store(store_id);
    let digests: Vec<ReviewDigest> = db
        .reviews
        .iter()
        .filter_map(|review| {
            let order = orders.iter().find(|o| o.id == review.order_id)?;
            let dish = if order.items.is_empty() {
                "unknown dish".to_owned()
            } else {
                order
                    .items
                    .iter()
                    .map(|i| i.dish_name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            Some(ReviewDigest {
                dish,
                rating: review.rating.value(),
                comment: review.comment.clone(),
            })
        })
        .collect();

    let reviews_json = serde_json::to_string(&digests).unwrap_or_else(|_| "[]".to_owned());

    format!(
        "Task: product optimization from customer reviews.\n\
         Store: {store_name}\n\
         Reviews: {reviews_json}\n\n\
         Extract the high-frequency issues as short keywords and provide 3 \
         specific optimization tips. Output JSON with 'keywords' and 'tips' \
         (both arrays of strings)."
    )
}

/// Response schema constraining the model's JSON output.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "keywords": { "type": "ARRAY", "items": { "type": "STRING" } },
            "tips": { "type": "ARRAY", "items": { "type": "STRING" } }
        }
    })
}
