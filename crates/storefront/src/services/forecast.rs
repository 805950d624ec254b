//! Campus demand forecasting.
//!
//! Forecasts come from a Gemini call over a small context summary of the
//! aggregate. The model is an opaque collaborator: when the call fails,
//! returns junk, or fewer than [`MIN_LIVE_POINTS`] usable points, a
//! deterministic synthetic generator covers every (area, horizon) pair
//! instead. Nothing on this path ever surfaces an error to the caller.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use campus_canteen_ai::GeminiClient;
use campus_canteen_core::CampusLocation;
use campus_canteen_datastore::{DataStore, Database};

/// Minimum number of usable live points before the fallback takes over.
pub const MIN_LIVE_POINTS: usize = 3;

/// Prediction horizon in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Horizon {
    Min15,
    Min30,
    Min60,
}

impl Horizon {
    /// All horizons, shortest first.
    pub const ALL: [Self; 3] = [Self::Min15, Self::Min30, Self::Min60];

    /// The horizon length in minutes.
    #[must_use]
    pub const fn minutes(&self) -> u16 {
        match self {
            Self::Min15 => 15,
            Self::Min30 => 30,
            Self::Min60 => 60,
        }
    }
}

impl TryFrom<u16> for Horizon {
    type Error = String;

    fn try_from(minutes: u16) -> Result<Self, Self::Error> {
        match minutes {
            15 => Ok(Self::Min15),
            30 => Ok(Self::Min30),
            60 => Ok(Self::Min60),
            other => Err(format!("unsupported horizon: {other} minutes")),
        }
    }
}

impl From<Horizon> for u16 {
    fn from(horizon: Horizon) -> Self {
        horizon.minutes()
    }
}

/// What a forecast point covers: the whole campus or one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ForecastArea {
    All,
    Location(CampusLocation),
}

impl ForecastArea {
    /// Every area a complete forecast covers: ALL plus each location.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut areas = vec![Self::All];
        areas.extend(CampusLocation::ALL.into_iter().map(Self::Location));
        areas
    }

    /// Wire token ("ALL" or the location token).
    #[must_use]
    pub const fn token(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Location(location) => location.token(),
        }
    }
}

impl TryFrom<String> for ForecastArea {
    type Error = String;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        if token.eq_ignore_ascii_case("ALL") {
            return Ok(Self::All);
        }
        token.parse::<CampusLocation>().map(Self::Location)
    }
}

impl From<ForecastArea> for String {
    fn from(area: ForecastArea) -> Self {
        area.token().to_owned()
    }
}

/// One predicted order volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub horizon: Horizon,
    #[serde(rename = "location")]
    pub area: ForecastArea,
    pub value: u32,
}

/// Context summary handed to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandContext {
    /// Windows with a heartbeat in the last minute.
    pub active_sessions: usize,
    /// Orders created in the last hour.
    pub recent_orders: usize,
    /// Listed stores currently open.
    pub open_stores: usize,
    /// When the context was captured.
    pub captured_at: DateTime<Utc>,
}

impl DemandContext {
    /// Capture a context summary from the aggregate as of `now`.
    ///
    /// Sessions heartbeated within the last minute count as active users;
    /// orders from the last hour count as recent.
    #[must_use]
    pub fn capture(db: &Database, now: DateTime<Utc>) -> Self {
        Self {
            active_sessions: db.active_session_count(now, chrono::Duration::seconds(60)),
            recent_orders: db.orders_since(now - chrono::Duration::hours(1)),
            open_stores: db.open_store_count(),
            captured_at: now,
        }
    }
}

/// Raw point shape the model responds with.
#[derive(Debug, Deserialize)]
struct RawPrediction {
    horizon: f64,
    location: String,
    value: f64,
}

/// Raw response envelope.
#[derive(Debug, Deserialize)]
struct RawForecast {
    #[serde(default)]
    predictions: Vec<RawPrediction>,
}

/// Demand forecasting for the student window.
pub struct ForecastService<'a> {
    store: &'a DataStore,
    client: Option<&'a GeminiClient>,
}

impl<'a> ForecastService<'a> {
    /// Create a forecast service.
    ///
    /// Without a client every forecast comes from the synthetic generator,
    /// which keeps the feature usable when no API key is configured.
    #[must_use]
    pub const fn new(store: &'a DataStore, client: Option<&'a GeminiClient>) -> Self {
        Self { store, client }
    }

    /// Predict order volumes for every area and horizon.
    ///
    /// Never fails: any problem with the live call degrades to the
    /// synthetic generator, logged at warn level.
    pub async fn forecast(&self) -> Vec<ForecastPoint> {
        let context = DemandContext::capture(&self.store.load(), Utc::now());

        let Some(client) = self.client else {
            debug!("no AI client configured, using synthetic forecast");
            return fallback_points();
        };

        match live_forecast(client, &context).await {
            Ok(points) if points.len() >= MIN_LIVE_POINTS => points,
            Ok(points) => {
                warn!(
                    usable = points.len(),
                    "live forecast too sparse, using synthetic forecast"
                );
                fallback_points()
            }
            Err(e) => {
                warn!(error = %e, "live forecast failed, using synthetic forecast");
                fallback_points()
            }
        }
    }
}

/// One live round-trip: prompt the model, parse, drop malformed points.
async fn live_forecast(
    client: &GeminiClient,
    context: &DemandContext,
) -> Result<Vec<ForecastPoint>, campus_canteen_ai::GeminiError> {
    let text = client
        .generate_json(client.pro_model(), &prompt(context), response_schema())
        .await?;

    let raw: RawForecast = serde_json::from_str(&text)
        .map_err(|e| campus_canteen_ai::GeminiError::Parse(e.to_string()))?;

    Ok(raw.predictions.iter().filter_map(parse_point).collect())
}

/// Build the prediction prompt from a context summary.
fn prompt(context: &DemandContext) -> String {
    let locations = CampusLocation::ALL
        .iter()
        .map(|l| l.token())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Task: Act as a demand regression model for a campus food ordering system.\n\
         Locations: {locations}.\n\
         Current state:\n\
         - Active user windows: {}\n\
         - Orders in the last hour: {}\n\
         - Open stores: {}\n\
         - Time: {}\n\n\
         Predict the order volume for the whole campus ('ALL') and for each \
         location, over 15, 30, and 60 minute horizons. You MUST provide one \
         data point for every (location, horizon) combination, horizons as \
         numbers 15, 30, 60. Output strictly JSON.",
        context.active_sessions,
        context.recent_orders,
        context.open_stores,
        context.captured_at.format("%H:%M:%S"),
    )
}

/// Response schema constraining the model's JSON output.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "predictions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "horizon": { "type": "NUMBER" },
                        "location": { "type": "STRING" },
                        "value": { "type": "NUMBER" }
                    },
                    "required": ["horizon", "location", "value"]
                }
            }
        },
        "required": ["predictions"]
    })
}

/// Convert one raw model point, dropping anything malformed.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_point(raw: &RawPrediction) -> Option<ForecastPoint> {
    if !raw.horizon.is_finite() || raw.horizon < 0.0 || raw.horizon > f64::from(u16::MAX) {
        return None;
    }
    let horizon = Horizon::try_from(raw.horizon.round() as u16).ok()?;
    let area = ForecastArea::try_from(raw.location.clone()).ok()?;
    let value = if raw.value.is_finite() && raw.value > 0.0 {
        raw.value.round() as u32
    } else {
        0
    };
    Some(ForecastPoint {
        horizon,
        area,
        value,
    })
}

/// Synthetic forecast covering every (area, horizon) pair.
///
/// Base rate 15 for the whole campus and 5 per location, mild decay by
/// horizon, bounded noise, floor of 1.
#[must_use]
pub fn fallback_points() -> Vec<ForecastPoint> {
    let mut rng = rand::rng();
    let areas = ForecastArea::all();
    let mut points = Vec::with_capacity(areas.len() * Horizon::ALL.len());

    for area in areas {
        let base: i64 = if area == ForecastArea::All { 15 } else { 5 };
        for horizon in Horizon::ALL {
            let noise: i64 = rng.random_range(0..10);
            let value = (base + noise - i64::from(horizon.minutes()) / 20).max(1);
            points.push(ForecastPoint {
                horizon,
                area,
                value: u32::try_from(value).unwrap_or(1),
            });
        }
    }
    points
}
