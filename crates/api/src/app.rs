use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, security_headers_middleware,
    submission_rate_limit, trace_id, RateLimiterState,
};
use crate::routes::{embed, entries, export, forms, health};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    // Submission rate limiting is opt-in (rate_limit_per_minute > 0)
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (embedded forms post from arbitrary hosts)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Admin routes (require the admin capability key)
    let admin_routes = Router::new()
        .route("/api/v1/forms", get(forms::list_forms).post(forms::create_form))
        .route(
            "/api/v1/forms/:id",
            get(forms::get_form)
                .put(forms::update_form)
                .delete(forms::delete_form),
        )
        .route("/api/v1/forms/:id/reorder", post(forms::reorder_fields))
        .route("/api/v1/forms/:id/entries", get(entries::list_form_entries))
        .route(
            "/api/v1/forms/:id/entries/export",
            get(entries::export_form_entries),
        )
        .route(
            "/api/v1/entries/:id",
            get(entries::get_entry).delete(entries::delete_entry),
        )
        .route("/api/v1/export", get(export::export_forms))
        .route("/api/v1/import", post(export::import_forms))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // Public submission routes (rate limited when configured)
    let submission_routes = Router::new()
        .route("/api/v1/entries", post(entries::submit_entry))
        .route("/embed/:id", post(embed::submit_embed))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            submission_rate_limit,
        ));

    // Public read routes (no authentication)
    let public_routes = Router::new()
        .route("/embed/:id", get(embed::render_embed))
        .route("/embed/client.js", get(embed::client_script))
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(submission_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
