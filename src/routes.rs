use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::advisory::advise_for;
use crate::config::AdvisoryConfig;
use crate::error::Error;
use crate::geo::{distance, GeoPoint};
use crate::junctions::{Junction, JunctionRegistry};
use crate::predictor::SignalPredictor;
use crate::types::{AdvisoryRequest, AdvisoryResponse};

type ApiError = (StatusCode, Json<Value>);

// ---------- Server state ----------

pub struct AppState<P> {
    pub predictor: Arc<P>,
    pub junctions: Arc<dyn JunctionRegistry>,
    pub advisory: Arc<AdvisoryConfig>,
}

impl<P> AppState<P> {
    pub fn new(predictor: P, junctions: impl JunctionRegistry + 'static, advisory: AdvisoryConfig) -> Self {
        Self {
            predictor: Arc::new(predictor),
            junctions: Arc::new(junctions),
            advisory: Arc::new(advisory),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            predictor: Arc::clone(&self.predictor),
            junctions: Arc::clone(&self.junctions),
            advisory: Arc::clone(&self.advisory),
        }
    }
}

pub fn router<P: SignalPredictor + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/junctions", get(list_junctions::<P>))
        .route("/api/advisory", post(advisory::<P>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn reject(e: Error) -> ApiError {
    let status = match &e {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::JunctionNotFound(_) => StatusCode::NOT_FOUND,
        Error::Predictor(_) => StatusCode::BAD_GATEWAY,
        Error::Config(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() })))
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

// ---------- Handlers ----------

async fn root() -> Json<Value> {
    Json(json!({ "message": "GLOSA advisory service is running" }))
}

async fn list_junctions<P>(State(state): State<AppState<P>>) -> Json<Vec<Junction>> {
    Json(state.junctions.all().to_vec())
}

async fn advisory<P: SignalPredictor>(
    State(state): State<AppState<P>>,
    Json(req): Json<AdvisoryRequest>,
) -> Result<Json<AdvisoryResponse>, ApiError> {
    let vehicle = GeoPoint::new(req.lat, req.lng).map_err(reject)?;
    let junction = state
        .junctions
        .get(&req.junction_id)
        .cloned()
        .ok_or_else(|| reject(Error::JunctionNotFound(req.junction_id.clone())))?;
    let distance_m = distance(&vehicle, &junction.position().map_err(reject)?);

    let timestamp = req.timestamp.unwrap_or_else(now_secs);
    let prediction = state
        .predictor
        .predict(&junction.id, timestamp)
        .await
        .map_err(|e| {
            tracing::warn!("prediction failed for junction {}: {}", junction.id, e);
            reject(e)
        })?;

    let advisory = advise_for(&prediction, distance_m, &state.advisory).map_err(reject)?;
    tracing::debug!(
        "advisory junction={} dist={:.1}m phase={} t_change={:.1}s speed={:.1}kmh kind={:?}",
        junction.id,
        distance_m,
        prediction.phase,
        prediction.seconds_to_change,
        advisory.recommended_speed_kmh,
        advisory.kind
    );

    Ok(Json(AdvisoryResponse {
        junction: junction.name,
        distance: distance_m.round(),
        signal_status: prediction.phase,
        seconds_to_change: prediction.seconds_to_change,
        recommended_speed: advisory.recommended_speed_kmh.round(),
        message: advisory.message,
        kind: advisory.kind,
    }))
}
