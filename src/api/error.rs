use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::estimator::overs::OversError;
use crate::model::ModelError;

/// Errors surfaced to API callers as `{"success": false, "error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),
    #[error("Invalid request body: {0}")]
    InvalidJson(#[from] JsonRejection),
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryRejection),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Overs(#[from] OversError),
    #[error("Score prediction model not available")]
    ScoreModelUnavailable,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_)
            | ApiError::InvalidJson(_)
            | ApiError::InvalidQuery(_)
            | ApiError::Model(_)
            | ApiError::Overs(_) => StatusCode::BAD_REQUEST,
            ApiError::ScoreModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:#}", self);
        } else {
            warn!("Rejected request: {}", self);
        }
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

/// Unwrap a required request field.
pub fn require(field: &'static str, value: Option<String>) -> Result<String, ApiError> {
    value.ok_or(ApiError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::MissingField("venue").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Model(ModelError::UnknownVenue("X".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ScoreModelUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("disk full")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_match_wire_format() {
        assert_eq!(
            ApiError::MissingField("team2").to_string(),
            "Missing field: team2"
        );
        assert_eq!(
            ApiError::Model(ModelError::UnknownTeam {
                field: "team1",
                team: "Kochi".into()
            })
            .to_string(),
            "Invalid team1: Kochi"
        );
    }

    #[test]
    fn require_reports_field_name() {
        assert_eq!(require("venue", Some("Eden".into())).unwrap(), "Eden");
        assert!(matches!(
            require("venue", None),
            Err(ApiError::MissingField("venue"))
        ));
    }
}
