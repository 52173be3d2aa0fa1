//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::config::{ConfigError, ConfigSource};
use crate::domain::{Poi, StationId};
use crate::fares::{FareError, FareEstimate, RailFareEstimate};
use crate::geo::Coordinate;
use crate::itinerary::{
    EntryId, ItineraryBackend, ItineraryEntry, ItineraryError, ItineraryStore,
};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S: ConfigSource>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/fares/road", get(road_fare::<S>))
        .route("/api/fares/road/between", get(road_fare_between::<S>))
        .route("/api/fares/rail", post(rail_fare::<S>))
        .route("/api/rail/stations", get(list_stations::<S>))
        .route("/api/rail/lines", get(list_lines::<S>))
        .route("/api/pois", get(list_pois::<S>))
        .route(
            "/api/itinerary",
            get(get_itinerary::<S>)
                .post(add_entry::<S>)
                .delete(clear_itinerary::<S>),
        )
        .route("/api/itinerary/reorder", post(reorder_itinerary::<S>))
        .route("/api/itinerary/total-minutes", get(total_minutes::<S>))
        .route("/api/itinerary/:entry_id", delete(remove_entry::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Road fares for a known distance.
async fn road_fare<S: ConfigSource>(
    State(state): State<AppState<S>>,
    Query(req): Query<RoadFareQuery>,
) -> Result<Json<FareEstimate>, AppError> {
    let distance_km = req.distance_km.unwrap_or(0.0);
    Ok(Json(state.fares.road_estimate(distance_km).await?))
}

/// Road fares between two coordinates.
async fn road_fare_between<S: ConfigSource>(
    State(state): State<AppState<S>>,
    Query(req): Query<RoadFareBetweenQuery>,
) -> Result<Json<FareEstimate>, AppError> {
    let from = Coordinate::new(req.from_lat, req.from_lng);
    let to = Coordinate::new(req.to_lat, req.to_lng);
    Ok(Json(state.fares.road_estimate_between(from, to).await?))
}

/// Rail fare between two stations.
async fn rail_fare<S: ConfigSource>(
    State(state): State<AppState<S>>,
    Json(req): Json<RailFareRequest>,
) -> Result<Json<RailFareEstimate>, AppError> {
    let from = StationId::new(req.from);
    let to = StationId::new(req.to);
    let estimate = state
        .fares
        .rail_estimate(&from, &to, req.class.as_deref())
        .await?;
    Ok(Json(estimate))
}

async fn list_stations<S: ConfigSource>(
    State(state): State<AppState<S>>,
    Query(req): Query<StationListQuery>,
) -> Result<Json<StationListResponse>, AppError> {
    let network = state.fares.rail_network().await?;
    let locale = req.locale.as_deref().unwrap_or("en");

    let stations = network
        .stations()
        .iter()
        .map(|s| StationResult::from_station(s, locale))
        .collect();

    Ok(Json(StationListResponse { stations }))
}

async fn list_lines<S: ConfigSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<LineListResponse>, AppError> {
    let network = state.fares.rail_network().await?;
    let lines = network.lines().iter().map(LineResult::from).collect();
    Ok(Json(LineListResponse { lines }))
}

async fn list_pois<S: ConfigSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Poi>>, AppError> {
    let catalog = state.config.pois().await?;
    Ok(Json(catalog.all().to_vec()))
}

fn itinerary_response<B: ItineraryBackend>(
    store: &ItineraryStore<B>,
    entries: Vec<ItineraryEntry>,
) -> ItineraryResponse {
    ItineraryResponse {
        title: store.title().to_string(),
        created_at: store.created_at(),
        entries,
    }
}

async fn get_itinerary<S: ConfigSource>(State(state): State<AppState<S>>) -> Json<ItineraryResponse> {
    let store = state.itinerary.lock().await;
    Json(itinerary_response(&store, store.list()))
}

/// Append a POI from the catalog to the itinerary.
async fn add_entry<S: ConfigSource>(
    State(state): State<AppState<S>>,
    Json(req): Json<AddEntryRequest>,
) -> Result<(StatusCode, Json<ItineraryResponse>), AppError> {
    // Load the catalog before taking the lock
    let catalog = state.config.pois().await?;
    let mut store = state.itinerary.lock().await;
    let entries = store.add_checked(&req.poi_id, &catalog)?;
    Ok((StatusCode::CREATED, Json(itinerary_response(&store, entries))))
}

async fn remove_entry<S: ConfigSource>(
    State(state): State<AppState<S>>,
    Path(entry_id): Path<u64>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let mut store = state.itinerary.lock().await;
    let entries = store.remove(EntryId(entry_id))?;
    Ok(Json(itinerary_response(&store, entries)))
}

async fn reorder_itinerary<S: ConfigSource>(
    State(state): State<AppState<S>>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let mut store = state.itinerary.lock().await;
    let entries = store.reorder(req.from_index, req.to_index)?;
    Ok(Json(itinerary_response(&store, entries)))
}

async fn clear_itinerary<S: ConfigSource>(
    State(state): State<AppState<S>>,
) -> Result<StatusCode, AppError> {
    state.itinerary.lock().await.clear()?;
    Ok(StatusCode::NO_CONTENT)
}

async fn total_minutes<S: ConfigSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<TotalMinutesResponse>, AppError> {
    let catalog = state.config.pois().await?;
    let store = state.itinerary.lock().await;
    Ok(Json(TotalMinutesResponse {
        total_minutes: store.total_minutes(&catalog),
        entry_count: store.len(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<FareError> for AppError {
    fn from(e: FareError) -> Self {
        if e.is_caller_error() {
            AppError::BadRequest {
                message: e.to_string(),
            }
        } else {
            AppError::Internal {
                message: e.to_string(),
            }
        }
    }
}

impl From<ItineraryError> for AppError {
    fn from(e: ItineraryError) -> Self {
        match e {
            ItineraryError::EntryNotFound(_) | ItineraryError::PositionOutOfRange { .. } => {
                AppError::NotFound {
                    message: e.to_string(),
                }
            }
            ItineraryError::UnknownPoi(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            ItineraryError::Persistence { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
