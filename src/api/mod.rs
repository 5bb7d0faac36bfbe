pub mod error;
pub mod types;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::db::{models::PredictionRecord, Database};
use crate::estimator::{self, overs, MatchState};
use crate::model::{score, BaseModel, BasePrediction, TossDecision};
use error::{require, ApiError};
use types::*;

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 500;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub model: Arc<dyn BaseModel>,
    /// Format length used for every live prediction.
    pub total_overs: f64,
    /// Requests give `current_overs` in scorecard notation (`12.3`).
    pub cricket_overs_notation: bool,
}

/// Build the Axum router for the prediction API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/predict", post(predict_handler))
        .route("/predict-live", post(predict_live_handler))
        .route("/predict-score", post(predict_score_handler))
        .route("/metadata", get(metadata_handler))
        .route("/health", get(health_handler))
        .route("/api/predictions", get(predictions_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// GET /
async fn index_handler() -> impl IntoResponse {
    Json(json!({
        "message": "Cricket Match Winner Prediction API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "predict": "/predict [POST] - Base model prediction",
            "predict_live": "/predict-live [POST] - Context-aware live prediction",
            "predict_score": "/predict-score [POST] - Score prediction",
            "metadata": "/metadata [GET]",
            "health": "/health [GET]",
            "predictions": "/api/predictions [GET] - Recent live predictions",
        }
    }))
}

/// POST /predict
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(req) = payload?;
    let ctx = req.into_context()?;
    info!("Base prediction: {} vs {} at {}", ctx.team1, ctx.team2, ctx.venue);

    let base = state.model.predict(&ctx)?;
    Ok(Json(PredictResponse {
        success: true,
        predicted_winner: base.winner,
        confidence: round2(base.confidence),
        team1: ctx.team1,
        team2: ctx.team2,
        venue: ctx.venue,
        model: state.model.name().to_string(),
    }))
}

/// POST /predict-live
async fn predict_live_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LiveRequest>, JsonRejection>,
) -> Result<Json<LiveResponse>, ApiError> {
    let Json(req) = payload?;
    let ctx = req.match_info.into_context()?;
    let batting_team = req.batting_team.unwrap_or_else(|| ctx.team1.clone());
    let current_overs = if state.cricket_overs_notation {
        overs::cricket_to_decimal(req.current_overs)?
    } else {
        req.current_overs
    };

    info!(
        "Live prediction request: {} vs {} at {}, innings {}: {}/{} in {} overs, {} batting",
        ctx.team1,
        ctx.team2,
        ctx.venue,
        req.innings,
        req.current_score,
        req.current_wickets,
        current_overs,
        batting_team
    );

    let base = state.model.predict(&ctx)?;
    info!("Base model: {} ({:.1}%)", base.winner, base.confidence);

    let match_state = MatchState {
        innings: req.innings,
        current_score: req.current_score,
        current_wickets: req.current_wickets,
        current_overs,
        target_score: req.target_score,
        total_overs: state.total_overs,
        batting_team: batting_team.clone(),
        team1: ctx.team1.clone(),
        team2: ctx.team2.clone(),
    };
    let base_batting = base.batting_side_probability(&ctx.team1, &batting_team);
    let estimate = estimator::estimate_live(&match_state, base_batting);
    let insights = estimator::insights(&match_state, estimate.confidence);

    info!(
        "Live prediction: {} ({:.1}%) | {} {:.1}% - {} {:.1}%",
        estimate.predicted_winner,
        estimate.confidence,
        ctx.team1,
        estimate.team1_probability,
        ctx.team2,
        estimate.team2_probability
    );

    let record = PredictionRecord {
        id: None,
        team1: ctx.team1.clone(),
        team2: ctx.team2.clone(),
        venue: ctx.venue.clone(),
        batting_team: batting_team.clone(),
        innings: req.innings,
        current_score: req.current_score,
        current_wickets: req.current_wickets,
        current_overs,
        target_score: req.target_score,
        team1_probability: estimate.team1_probability,
        team2_probability: estimate.team2_probability,
        predicted_winner: estimate.predicted_winner.clone(),
        confidence: estimate.confidence,
        base_winner: base.winner.clone(),
        base_confidence: base.confidence,
        created_at: Utc::now(),
    };
    if let Err(e) = state.db.insert_prediction(&record) {
        warn!("Failed to log prediction: {}", e);
    }

    Ok(Json(LiveResponse {
        success: true,
        predicted_winner: estimate.predicted_winner,
        confidence: round2(estimate.confidence),
        probabilities: Probabilities {
            team1: round2(estimate.team1_probability),
            team2: round2(estimate.team2_probability),
        },
        base_ml_prediction: BasePrediction {
            winner: base.winner,
            confidence: round2(base.confidence),
        },
        context: LiveContext {
            innings: req.innings,
            current_score: req.current_score,
            current_wickets: req.current_wickets,
            current_overs,
            target_score: req.target_score,
            batting_team,
        },
        analysis: estimate.phase,
        insights,
        model: state.model.name().to_string(),
    }))
}

/// POST /predict-score
async fn predict_score_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ApiError> {
    if !state.model.has_score_model() {
        return Err(ApiError::ScoreModelUnavailable);
    }
    let Json(req) = payload?;
    let team = require("team", req.team.or(req.team1))?;
    let venue = require("venue", req.venue)?;
    require("toss_winner", req.toss_winner)?;
    let toss_decision = require("toss_decision", req.toss_decision)?;
    TossDecision::parse(&toss_decision)?;

    let current_overs = if state.cricket_overs_notation {
        overs::cricket_to_decimal(req.current_overs)?
    } else {
        req.current_overs
    };
    info!(
        "Score prediction for {} at {}: {}/{} in {} overs",
        team, venue, req.current_score, req.current_wickets, current_overs
    );

    let par = state
        .model
        .par_score(&team, &venue)?
        .ok_or(ApiError::ScoreModelUnavailable)?;
    let predicted_score = score::live_adjusted_score(
        par,
        req.current_score,
        req.current_wickets,
        current_overs,
        state.total_overs,
    );
    info!("Predicted final score: {}", predicted_score);

    Ok(Json(ScoreResponse {
        success: true,
        predicted_score,
        current_score: req.current_score,
        current_overs,
        team,
        venue,
    }))
}

/// GET /metadata
async fn metadata_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": state.model.metadata(),
    }))
}

/// GET /health
async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.db.get_stats()?;
    let score_status = if state.model.has_score_model() {
        "loaded"
    } else {
        "not available"
    };
    Ok(Json(json!({
        "status": "healthy",
        "models": {
            "winner_prediction": state.model.name(),
            "score_prediction": score_status,
            "live_prediction": "enabled",
        },
        "accuracy": format!("{:.2}%", state.model.metadata().accuracy * 100.0),
        "predictions_logged": stats.total_predictions,
        "chase_predictions_logged": stats.chase_predictions,
    })))
}

/// GET /api/predictions?limit=50
async fn predictions_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let rows = state.db.list_recent_predictions(limit)?;
    Ok(Json(rows))
}
