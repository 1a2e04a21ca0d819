//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::domain::{LineId, StationId};
use crate::service::ServiceError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations).post(create_station))
        .route("/stations/:id", get(show_station).delete(delete_station))
        .route("/lines", get(list_lines).post(create_line))
        .route(
            "/lines/:id",
            get(show_line).put(update_line).delete(delete_line),
        )
        .route("/lines/:id/stations", get(line_stations))
        .route(
            "/lines/:id/sections",
            post(add_section).delete(remove_section),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, logging it on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "rejected JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

async fn create_station(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: StationCreateRequest = parse_json(&body)?;
    let station = state.stations.create(req.into_name()?);

    Ok((
        StatusCode::CREATED,
        Json(StationResponse::from_station(&station)),
    )
        .into_response())
}

async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResponse>> {
    Json(
        state
            .stations
            .stations()
            .iter()
            .map(StationResponse::from_station)
            .collect(),
    )
}

async fn show_station(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<StationResponse>, AppError> {
    let Path(id) = path?;
    let station = state.stations.station(StationId(id))?;
    Ok(Json(StationResponse::from_station(&station)))
}

async fn delete_station(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.stations.delete(StationId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_line(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: LineCreateRequest = parse_json(&body)?;
    let line = state.lines.create_line(req.into_domain()?)?;

    Ok((StatusCode::CREATED, Json(LineResponse::from_line(&line)?)).into_response())
}

async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineResponse>>, AppError> {
    let lines = state
        .lines
        .lines()
        .iter()
        .map(LineResponse::from_line)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(lines))
}

async fn show_line(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<LineResponse>, AppError> {
    let Path(id) = path?;
    let line = state.lines.line(LineId(id))?;
    Ok(Json(LineResponse::from_line(&line)?))
}

/// Stations of a line in running order, without the line itself.
async fn line_stations(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Vec<StationResponse>>, AppError> {
    let Path(id) = path?;
    let stations = state.lines.ordered_stations(LineId(id))?;
    Ok(Json(
        stations.iter().map(StationResponse::from_station).collect(),
    ))
}

async fn update_line(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    body: Bytes,
) -> Result<Json<LineResponse>, AppError> {
    let Path(id) = path?;
    let req: LineUpdateRequest = parse_json(&body)?;
    let (name, color) = req.into_domain()?;
    let line = state.lines.update_line(LineId(id), name, color)?;
    Ok(Json(LineResponse::from_line(&line)?))
}

async fn delete_line(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.lines.delete_line(LineId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn add_section(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    body: Bytes,
) -> Result<Response, AppError> {
    let Path(id) = path?;
    let req: SectionCreateRequest = parse_json(&body)?;
    let line = state.lines.add_section(LineId(id), req.into_domain()?)?;

    Ok((StatusCode::CREATED, Json(LineResponse::from_line(&line)?)).into_response())
}

async fn remove_section(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    query: Result<Query<SectionRemoveQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let Query(query) = query?;
    state
        .lines
        .remove_section(LineId(id), StationId(query.station_id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        let message = e.to_string();
        if e.is_not_found() {
            AppError::NotFound { message }
        } else if e.is_internal() {
            AppError::Internal { message }
        } else {
            AppError::BadRequest { message }
        }
    }
}

// Extractor rejections would otherwise answer in plain text.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid path: {}", rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: format!("Invalid query: {}", rejection.body_text()),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GraphError, LineError, SectionError};

    #[test]
    fn service_errors_map_to_status() {
        let status = |e: ServiceError| AppError::from(e).into_response().status();

        assert_eq!(status(ServiceError::NoSuchLine(LineId(1))), StatusCode::NOT_FOUND);
        assert_eq!(
            status(ServiceError::NoSuchStation(StationId(1))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(SectionError::NotConnected(StationId(1), StationId(2)).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ServiceError::StationInUse(StationId(1), LineId(1))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(LineError::from(GraphError::Cycle).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_json_is_bad_request() {
        let body = Bytes::from_static(b"{not json");
        let err = parse_json::<LineUpdateRequest>(&body).unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
