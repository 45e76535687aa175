//! Form endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::collections::HashSet;
use tracing::info;
use validator::Validate;

use domain::models::field::FieldDef;
use domain::models::form::{
    AckResponse, CreateFormRequest, CreatedFormResponse, FormResponse, FormSummary,
    ReorderFieldsRequest, UpdateFormRequest,
};
use domain::services::builder::{validate_order, BuilderError};
use persistence::repositories::{FormRepository, NewField};

use crate::app::AppState;
use crate::error::ApiError;

/// List all forms, newest first.
///
/// GET /api/v1/forms
pub async fn list_forms(State(state): State<AppState>) -> Result<Json<Vec<FormSummary>>, ApiError> {
    let repo = FormRepository::new(state.pool.clone());
    let forms = repo.list().await?;
    Ok(Json(forms.into_iter().map(Into::into).collect()))
}

/// Create a new form with a title only.
///
/// POST /api/v1/forms
pub async fn create_form(
    State(state): State<AppState>,
    Json(request): Json<CreateFormRequest>,
) -> Result<(StatusCode, Json<CreatedFormResponse>), ApiError> {
    request.validate()?;

    let title = shared::sanitize::text_field(&request.title);
    if title.is_empty() {
        return Err(ApiError::Validation("Title is required".to_string()));
    }

    let repo = FormRepository::new(state.pool.clone());
    let id = repo.create(&title).await?;

    info!(form_id = id, title = %title, "Form created");
    Ok((StatusCode::CREATED, Json(CreatedFormResponse { id })))
}

/// Fetch a form with its fields (ordered by position) and parsed settings.
///
/// GET /api/v1/forms/:id
pub async fn get_form(
    State(state): State<AppState>,
    Path(form_id): Path<i64>,
) -> Result<Json<FormResponse>, ApiError> {
    let repo = FormRepository::new(state.pool.clone());
    let response = load_form(&repo, form_id).await?;
    Ok(Json(response))
}

/// Full-replace update: title, settings, and the complete field set.
///
/// PUT /api/v1/forms/:id
pub async fn update_form(
    State(state): State<AppState>,
    Path(form_id): Path<i64>,
    Json(request): Json<UpdateFormRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    request.validate()?;

    if request.fields.len() > state.config.limits.max_fields_per_form {
        return Err(ApiError::Validation(format!(
            "A form may have at most {} fields",
            state.config.limits.max_fields_per_form
        )));
    }

    let title = shared::sanitize::text_field(&request.title);
    if title.is_empty() {
        return Err(ApiError::Validation("Title is required".to_string()));
    }

    let rows = field_rows(&request.fields)?;
    let settings = serde_json::to_value(&request.settings)
        .map_err(|e| ApiError::Internal(format!("Failed to encode settings: {e}")))?;

    let repo = FormRepository::new(state.pool.clone());
    let replaced = repo.replace(form_id, &title, &settings, &rows).await?;
    if !replaced {
        return Err(ApiError::NotFound("Form not found".to_string()));
    }

    info!(form_id, fields = rows.len(), "Form updated");
    Ok(Json(AckResponse {
        success: true,
        id: form_id,
    }))
}

/// Apply a new field order given as the complete list of field ids.
///
/// The order is accepted only when it is set-equal to the stored field keys;
/// an unknown, missing, or duplicated id rejects the whole command.
///
/// POST /api/v1/forms/:id/reorder
pub async fn reorder_fields(
    State(state): State<AppState>,
    Path(form_id): Path<i64>,
    Json(request): Json<ReorderFieldsRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    let repo = FormRepository::new(state.pool.clone());
    repo.find_by_id(form_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    let existing = repo.field_keys(form_id).await?;
    validate_order(&request.field_ids, &existing).map_err(|e| match e {
        BuilderError::UnknownField(id) => {
            ApiError::Validation(format!("Unknown field id: {id}"))
        }
        BuilderError::IncompleteOrder => ApiError::Validation(
            "Reorder must list every existing field id exactly once".to_string(),
        ),
    })?;

    repo.set_positions(form_id, &request.field_ids).await?;

    info!(form_id, "Fields reordered");
    Ok(Json(AckResponse {
        success: true,
        id: form_id,
    }))
}

/// Delete a form and its fields. Entries are retained so past submissions
/// stay queryable by id.
///
/// DELETE /api/v1/forms/:id
pub async fn delete_form(
    State(state): State<AppState>,
    Path(form_id): Path<i64>,
) -> Result<Json<AckResponse>, ApiError> {
    let repo = FormRepository::new(state.pool.clone());
    let deleted = repo.delete(form_id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Form not found".to_string()));
    }

    info!(form_id, "Form deleted");
    Ok(Json(AckResponse {
        success: true,
        id: form_id,
    }))
}

/// Loads a full form payload: row, parsed settings, ordered fields.
pub(crate) async fn load_form(
    repo: &FormRepository,
    form_id: i64,
) -> Result<FormResponse, ApiError> {
    let form = repo
        .find_by_id(form_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found".to_string()))?;

    let fields = repo.fields_for_form(form_id).await?;
    let settings = form.parsed_settings();

    Ok(FormResponse {
        id: form.id,
        title: form.title,
        settings,
        created_at: form.created_at,
        fields: fields.into_iter().map(|f| f.into_stored()).collect(),
    })
}

/// Converts field definitions into insertable rows, rejecting duplicate ids.
pub(crate) fn field_rows(fields: &[FieldDef]) -> Result<Vec<NewField>, ApiError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(fields.len());
    let mut rows = Vec::with_capacity(fields.len());

    for field in fields {
        if !seen.insert(field.id.as_str()) {
            return Err(ApiError::Validation(format!(
                "Duplicate field id: {}",
                field.id
            )));
        }
        let field_key = shared::sanitize::text_field(&field.id);
        if field_key.is_empty() {
            return Err(ApiError::Validation("Field id must not be empty".to_string()));
        }
        rows.push(NewField {
            field_key,
            field_type: field.field_type.as_str().to_string(),
            field_meta: serde_json::to_value(field)
                .map_err(|e| ApiError::Internal(format!("Failed to encode field: {e}")))?,
        });
    }

    Ok(rows)
}
