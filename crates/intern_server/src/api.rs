//! JSON API handlers under `/api`.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use intern_core::{
    AppliedFilters, DashboardInputs, InternDraft, InternListQuery, Pagination, SortField,
    SortOrder,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const SERVER_NAME: &str = "Intern Dashboard API";
const HEALTH_MESSAGE: &str = "Intern Dashboard Server is running";

/// Success envelope shared by all `/api/interns` and dashboard responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<AppliedFilters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_fields: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            filters: None,
            pagination: None,
            updated_fields: None,
            deleted_at: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Raw list query string; everything arrives as text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub department: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    /// Converts to a core query. Unknown `sortBy`/`order` values fall back to
    /// defaults; malformed `page`/`limit` are rejected.
    pub fn into_query(self) -> Result<InternListQuery, ApiError> {
        Ok(InternListQuery {
            search: self.search,
            status: self.status,
            department: self.department,
            sort_by: self.sort_by.as_deref().and_then(SortField::parse),
            order: self
                .order
                .as_deref()
                .and_then(SortOrder::parse)
                .unwrap_or_default(),
            page: parse_positive("page", self.page)?,
            limit: parse_positive("limit", self.limit)?,
        })
    }
}

fn parse_positive(name: &str, value: Option<String>) -> Result<Option<u32>, ApiError> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match value.parse::<u32>() {
        Ok(number) if number > 0 => Ok(Some(number)),
        _ => Err(ApiError::bad_request(format!(
            "{name} must be a positive integer"
        ))),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    pub confirm: Option<String>,
}

impl DeleteParams {
    pub fn confirmed(&self) -> bool {
        self.confirm
            .as_deref()
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "message": HEALTH_MESSAGE,
        "timestamp": Utc::now(),
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "environment": state.config.environment.as_str(),
    }))
}

pub async fn status() -> Json<serde_json::Value> {
    Json(json!({
        "server": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "active",
    }))
}

pub async fn list_interns(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let query = params.into_query()?;
    let list = state.with_service(|service| service.list_interns(&query))?;

    let mut body = ApiResponse::ok(list.items);
    body.filters = Some(list.filters);
    body.pagination = list.pagination;
    Ok(Json(body).into_response())
}

pub async fn get_intern(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let intern = state.with_service(|service| service.get_intern(&id))?;
    Ok(Json(ApiResponse::ok(intern)).into_response())
}

pub async fn create_intern(
    State(state): State<AppState>,
    payload: Result<Json<InternDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = payload.map_err(ApiError::from_json_rejection)?;
    let created = state.with_service(|service| service.create_intern(&draft))?;

    let body = ApiResponse::ok(created).with_message("Intern created successfully");
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

pub async fn update_intern(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<InternDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(patch) = payload.map_err(ApiError::from_json_rejection)?;
    let outcome = state.with_service(|service| service.update_intern(&id, &patch))?;

    let mut body = ApiResponse::ok(outcome.intern).with_message("Intern updated successfully");
    body.updated_fields = Some(outcome.updated_fields);
    Ok(Json(body).into_response())
}

pub async fn delete_intern(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<Response, ApiError> {
    let confirm = params.confirmed();
    let outcome = state.with_service(|service| service.delete_intern(&id, confirm))?;

    let mut body = ApiResponse::ok(json!({ "id": outcome.id }))
        .with_message("Intern deleted successfully");
    body.deleted_at = Some(outcome.deleted_at);
    Ok(Json(body).into_response())
}

pub async fn dashboard_stats(State(state): State<AppState>) -> Result<Response, ApiError> {
    let inputs = DashboardInputs {
        interviews_scheduled: state.config.interviews_scheduled,
    };
    let stats = state.with_service(|service| service.dashboard_stats(&inputs))?;
    Ok(Json(ApiResponse::ok(stats)).into_response())
}

/// 404 for unmatched paths and unsupported methods. API paths get a JSON
/// body echoing the request.
pub async fn not_found(method: Method, uri: Uri) -> Response {
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        let body = json!({
            "success": false,
            "error": "API endpoint not found",
            "path": uri.path(),
            "method": method.as_str(),
        });
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
