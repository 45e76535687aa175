//! Embeddable form endpoints: the server-rendered HTML fragment, the
//! no-script urlencoded submission fallback, and the client script.
//!
//! These are the public faces of the renderer/collector protocol: the names
//! the renderer emits are exactly the keys the collector folds back into
//! entry data.

use axum::{
    extract::{Form, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};

use domain::services::{collect, render};
use persistence::repositories::FormRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::entries::store_submission;

const CLIENT_SCRIPT: &str = include_str!("../../assets/embed.js");

/// Render a form as an embeddable HTML fragment.
///
/// GET /embed/:id
pub async fn render_embed(
    State(state): State<AppState>,
    Path(form_id): Path<i64>,
) -> Response {
    let repo = FormRepository::new(state.pool.clone());

    let form = match repo.find_by_id(form_id).await {
        Ok(Some(form)) => form,
        Ok(None) => return embed_error(StatusCode::NOT_FOUND, "Form not found"),
        Err(e) => return ApiError::from(e).into_response(),
    };

    let fields = match repo.fields_for_form(form_id).await {
        Ok(fields) => fields,
        Err(e) => return ApiError::from(e).into_response(),
    };
    let defs: Vec<_> = fields.into_iter().map(|f| f.into_stored().field_meta).collect();

    let settings = form.parsed_settings();
    let token = shared::crypto::generate_token(32);

    let mut html = render::render_form(form.id, &token, &settings, &defs);
    html.push_str("<script src=\"/embed/client.js\" defer></script>\n");

    Html(html).into_response()
}

/// Accept a plain-HTML form post (the no-script fallback).
///
/// The urlencoded pairs run through the collector, then the same
/// validate/sanitize/store path as the JSON endpoint. On success the
/// visitor is redirected to the configured URL, or shown the success
/// message.
///
/// POST /embed/:id
pub async fn submit_embed(
    State(state): State<AppState>,
    Path(form_id): Path<i64>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let repo = FormRepository::new(state.pool.clone());

    let form = match repo.find_by_id(form_id).await {
        Ok(Some(form)) => form,
        Ok(None) => return embed_error(StatusCode::NOT_FOUND, "Form not found"),
        Err(e) => return ApiError::from(e).into_response(),
    };

    let fields = match repo.fields_for_form(form_id).await {
        Ok(fields) => fields,
        Err(e) => return ApiError::from(e).into_response(),
    };
    let defs: Vec<_> = fields.into_iter().map(|f| f.into_stored().field_meta).collect();

    let data = collect::collect(&defs, &pairs);

    match store_submission(&state, &form, data).await {
        Ok((_, message)) => {
            let settings = form.parsed_settings();
            if let Some(url) = settings.redirect_url.as_deref() {
                Redirect::to(url).into_response()
            } else {
                Html(format!(
                    "<p class=\"fs-success\">{}</p>",
                    shared::escape::html_text(&message)
                ))
                .into_response()
            }
        }
        Err(ApiError::Validation(message)) => embed_error(StatusCode::BAD_REQUEST, &message),
        Err(e) => e.into_response(),
    }
}

/// Serve the client submission script.
///
/// GET /embed/client.js
pub async fn client_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        CLIENT_SCRIPT,
    )
}

fn embed_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Html(format!(
            "<p class=\"fs-error\">{}</p>",
            shared::escape::html_text(message)
        )),
    )
        .into_response()
}
