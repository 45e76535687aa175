//! Entry endpoint handlers.
//!
//! Submission is the one public write in the system: the form must exist,
//! the payload is validated against the declared field schema, and every
//! key and value is sanitized to plain text before storage.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::info;

use domain::models::entry::{Entry, EntryData, EntryResponse, EntryValue, SubmitEntryRequest, SubmitEntryResponse};
use domain::models::form::AckResponse;
use domain::services::{csv, submission};
use persistence::entities::FormEntity;
use persistence::repositories::{EntryRepository, FormRepository};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_entry_submitted;

/// Accept a public submission.
///
/// POST /api/v1/entries
pub async fn submit_entry(
    State(state): State<AppState>,
    Json(request): Json<SubmitEntryRequest>,
) -> Result<Json<SubmitEntryResponse>, ApiError> {
    let repo = FormRepository::new(state.pool.clone());
    let form = repo
        .find_by_id(request.form_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    let (entry_id, message) = store_submission(&state, &form, request.data).await?;

    Ok(Json(SubmitEntryResponse {
        success: true,
        entry_id,
        message,
    }))
}

/// Fetch one entry with parsed data.
///
/// GET /api/v1/entries/:id
pub async fn get_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
) -> Result<Json<EntryResponse>, ApiError> {
    let repo = EntryRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(entry_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Entry not found".to_string()))?;

    let entry: Entry = entity.into();
    Ok(Json(entry.into()))
}

/// List a form's entries, newest first.
///
/// Listing a nonexistent form yields an empty list rather than an error:
/// entries may outlive their form.
///
/// GET /api/v1/forms/:id/entries
pub async fn list_form_entries(
    State(state): State<AppState>,
    Path(form_id): Path<i64>,
) -> Result<Json<Vec<EntryResponse>>, ApiError> {
    let repo = EntryRepository::new(state.pool.clone());
    let entities = repo.find_by_form_id(form_id).await?;

    let entries: Vec<EntryResponse> = entities
        .into_iter()
        .map(|e| {
            let entry: Entry = e.into();
            entry.into()
        })
        .collect();

    Ok(Json(entries))
}

/// Delete one entry.
///
/// DELETE /api/v1/entries/:id
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i64>,
) -> Result<Json<AckResponse>, ApiError> {
    let repo = EntryRepository::new(state.pool.clone());
    let rows_affected = repo.delete(entry_id).await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Entry not found".to_string()));
    }

    info!(entry_id, "Entry deleted");
    Ok(Json(AckResponse {
        success: true,
        id: entry_id,
    }))
}

/// Download a form's entries as CSV.
///
/// GET /api/v1/forms/:id/entries/export
pub async fn export_form_entries(
    State(state): State<AppState>,
    Path(form_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = EntryRepository::new(state.pool.clone());
    let entries: Vec<Entry> = repo
        .find_by_form_id(form_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let body = csv::entries_csv(&entries);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"entries-{form_id}.csv\""),
            ),
        ],
        body,
    ))
}

/// Shared submission path: enforce limits, validate against the declared
/// schema, sanitize, store. Returns the new entry id and the configured
/// success message.
pub(crate) async fn store_submission(
    state: &AppState,
    form: &FormEntity,
    data: EntryData,
) -> Result<(i64, String), ApiError> {
    enforce_limits(state, &data)?;

    let form_repo = FormRepository::new(state.pool.clone());
    let fields: Vec<_> = form_repo
        .fields_for_form(form.id)
        .await?
        .into_iter()
        .map(|f| f.into_stored().field_meta)
        .collect();

    submission::validate_submission(&fields, &data)
        .map_err(|errors| ApiError::Validation(errors.join(", ")))?;

    let sanitized = submission::sanitize_entry_data(&data);
    let payload = serde_json::to_value(&sanitized)
        .map_err(|e| ApiError::Internal(format!("Failed to encode entry data: {e}")))?;

    let entry_repo = EntryRepository::new(state.pool.clone());
    let entry_id = entry_repo.insert(form.id, &payload).await?;

    record_entry_submitted(form.id);
    info!(form_id = form.id, entry_id, "Entry submitted");

    Ok((entry_id, form.parsed_settings().success_message))
}

fn enforce_limits(state: &AppState, data: &EntryData) -> Result<(), ApiError> {
    let limits = &state.config.limits;

    if data.len() > limits.max_entry_values {
        return Err(ApiError::Validation(format!(
            "A submission may carry at most {} values",
            limits.max_entry_values
        )));
    }

    let too_long = data.values().any(|value| match value {
        EntryValue::Single(s) => s.len() > limits.max_value_length,
        EntryValue::Many(list) => list.iter().any(|s| s.len() > limits.max_value_length),
    });
    if too_long {
        return Err(ApiError::Validation(format!(
            "Values may be at most {} bytes",
            limits.max_value_length
        )));
    }

    Ok(())
}
