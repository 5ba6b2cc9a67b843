//! HTML page and fragment handlers.
//!
//! Each handler builds its view-model from a fresh service call; nothing is
//! cached between requests. Failures render as notice fragments with the
//! status code the JSON API would have used.
//!
//! Form posts run the same service calls as the JSON API and answer with an
//! info notice on success.

use crate::api::{DeleteParams, ListParams};
use crate::error::ApiError;
use crate::render::{
    metric_cards, render_dashboard_page, render_intern_detail, render_intern_form,
    render_intern_rows, render_metric_cards, render_notice, FilterForm, NoticeKind,
};
use crate::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use intern_core::{DashboardInputs, Department, InternDraft, InternListQuery};

pub async fn dashboard_page(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let form = FilterForm {
        search: params.search.clone().unwrap_or_default(),
        status: params.status.clone().unwrap_or_default(),
        department: params.department.clone().unwrap_or_default(),
    };
    let metrics = metrics_markup(&state).unwrap_or_else(|err| error_notice(&err));
    let rows = params
        .into_query()
        .and_then(|query| rows_markup(&state, &query))
        .unwrap_or_else(|err| error_row(&err));

    let departments: Vec<&str> = Department::ALL.iter().map(|d| d.as_str()).collect();
    Html(render_dashboard_page(&metrics, &rows, &form, &departments)).into_response()
}

pub async fn metrics_fragment(State(state): State<AppState>) -> Response {
    match metrics_markup(&state) {
        Ok(html) => Html(html).into_response(),
        Err(err) => notice_response(&err),
    }
}

pub async fn interns_fragment(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    match params
        .into_query()
        .and_then(|query| rows_markup(&state, &query))
    {
        Ok(html) => Html(html).into_response(),
        Err(err) => notice_response(&err),
    }
}

pub async fn intern_detail_fragment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.with_service(|service| service.get_intern(&id)) {
        Ok(intern) => Html(render_intern_detail(&intern)).into_response(),
        Err(err) => notice_response(&err),
    }
}

pub async fn new_intern_form() -> Html<String> {
    Html(render_intern_form(None))
}

pub async fn edit_intern_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.with_service(|service| service.get_intern(&id)) {
        Ok(intern) => Html(render_intern_form(Some(&intern.record))).into_response(),
        Err(err) => notice_response(&err),
    }
}

pub async fn create_intern_form(
    State(state): State<AppState>,
    form: Result<Form<InternDraft>, FormRejection>,
) -> Response {
    let created = form
        .map_err(ApiError::from_form_rejection)
        .and_then(|Form(draft)| state.with_service(|service| service.create_intern(&draft)));
    match created {
        Ok(intern) => info_response(
            StatusCode::CREATED,
            &format!(
                "Intern created successfully: {} ({})",
                intern.full_name, intern.record.id
            ),
        ),
        Err(err) => notice_response(&err),
    }
}

pub async fn update_intern_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<InternDraft>, FormRejection>,
) -> Response {
    let updated = form
        .map_err(ApiError::from_form_rejection)
        .and_then(|Form(patch)| state.with_service(|service| service.update_intern(&id, &patch)));
    match updated {
        Ok(outcome) if outcome.updated_fields.is_empty() => {
            info_response(StatusCode::OK, "No changes to save")
        }
        Ok(outcome) => info_response(
            StatusCode::OK,
            &format!(
                "Intern updated successfully: {}",
                outcome.updated_fields.join(", ")
            ),
        ),
        Err(err) => notice_response(&err),
    }
}

pub async fn delete_intern_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<DeleteParams>, FormRejection>,
) -> Response {
    let deleted = form
        .map_err(ApiError::from_form_rejection)
        .and_then(|Form(params)| {
            let confirm = params.confirmed();
            state.with_service(|service| service.delete_intern(&id, confirm))
        });
    match deleted {
        Ok(outcome) => info_response(
            StatusCode::OK,
            &format!("Intern {} deleted successfully", outcome.id),
        ),
        Err(err) => notice_response(&err),
    }
}

fn metrics_markup(state: &AppState) -> Result<String, ApiError> {
    let inputs = DashboardInputs {
        interviews_scheduled: state.config.interviews_scheduled,
    };
    let stats = state.with_service(|service| service.dashboard_stats(&inputs))?;
    Ok(render_metric_cards(&metric_cards(&stats)))
}

fn rows_markup(state: &AppState, query: &InternListQuery) -> Result<String, ApiError> {
    let list = state.with_service(|service| service.list_interns(query))?;
    Ok(render_intern_rows(&list.items))
}

fn error_notice(err: &ApiError) -> String {
    render_notice(NoticeKind::Error, &err.summary())
}

fn error_row(err: &ApiError) -> String {
    format!(r#"<tr><td colspan="5">{}</td></tr>"#, error_notice(err))
}

fn info_response(status: StatusCode, message: &str) -> Response {
    (status, Html(render_notice(NoticeKind::Info, message))).into_response()
}

fn notice_response(err: &ApiError) -> Response {
    let status = if err.status.is_client_error() || err.status.is_server_error() {
        err.status
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Html(error_notice(err))).into_response()
}
