//! Form export/import endpoint handlers.
//!
//! Export produces a portable JSON document of full form payloads; entries
//! are intentionally excluded. Import accepts the same document (or any
//! payload carrying a `forms` array) and recreates each form with an
//! " (Imported)" title suffix.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use domain::models::export::{ExportDocument, ImportDocument, ImportSummary, IMPORTED_TITLE_SUFFIX};
use persistence::repositories::FormRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::forms::{field_rows, load_form};

/// Query parameters for export: a comma-separated id list, or everything.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub ids: Option<String>,
}

/// Export selected forms (or all forms) as one document.
///
/// GET /api/v1/export?ids=1,2
pub async fn export_forms(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<ExportDocument>, ApiError> {
    let repo = FormRepository::new(state.pool.clone());

    let ids: Vec<i64> = match &query.ids {
        Some(raw) => parse_ids(raw)?,
        None => repo.list().await?.into_iter().map(|f| f.id).collect(),
    };

    let mut forms = Vec::with_capacity(ids.len());
    for id in ids {
        forms.push(load_form(&repo, id).await?);
    }

    info!(forms = forms.len(), "Forms exported");
    Ok(Json(ExportDocument::new(forms)))
}

/// Import forms from an export document.
///
/// POST /api/v1/import
pub async fn import_forms(
    State(state): State<AppState>,
    Json(document): Json<ImportDocument>,
) -> Result<(StatusCode, Json<ImportSummary>), ApiError> {
    let repo = FormRepository::new(state.pool.clone());
    let mut imported = 0;

    for form in document.forms {
        let (title, fields, settings) = form.field_defs();
        let title = shared::sanitize::text_field(&title);
        if title.is_empty() {
            return Err(ApiError::Validation(
                "Every imported form needs a title".to_string(),
            ));
        }
        let title = format!("{title}{IMPORTED_TITLE_SUFFIX}");

        let rows = field_rows(&fields)?;
        let settings = serde_json::to_value(&settings)
            .map_err(|e| ApiError::Internal(format!("Failed to encode settings: {e}")))?;

        let id = repo.create(&title).await?;
        repo.replace(id, &title, &settings, &rows).await?;
        imported += 1;
    }

    info!(imported, "Forms imported");
    Ok((StatusCode::CREATED, Json(ImportSummary { imported })))
}

fn parse_ids(raw: &str) -> Result<Vec<i64>, ApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| ApiError::Validation(format!("Invalid form id: {s}")))
        })
        .collect()
}
