use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{any::Any, sync::Arc};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers;
use crate::middleware::ResponseBuilder;
use crate::services::{ContactService, Ports};

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ContactService>,
    pub responses: ResponseBuilder,
}

impl AppState {
    pub fn new(config: &AppConfig, ports: Ports) -> anyhow::Result<Self> {
        let responses = ResponseBuilder::new(&config.api.cors_origin).map_err(|e| {
            anyhow::anyhow!("CORS_ORIGIN is not a valid header value ({}): {}", config.api.cors_origin, e)
        })?;

        let service = ContactService::new(ports.store, ports.notifier, config.contact.clone());

        Ok(Self {
            service: Arc::new(service),
            responses,
        })
    }
}

pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    let panic_responses = state.responses.clone();

    Router::new()
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .merge(contact_routes())
        .fallback(handlers::not_found)
        .with_state(state)
        // Global middleware
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CatchPanicLayer::custom(
            move |payload: Box<dyn Any + Send + 'static>| panic_responses.panic_response(payload),
        ))
        .layer(TraceLayer::new_for_http())
}

fn contact_routes() -> Router<AppState> {
    // The endpoint is mounted at the root as well, matching API gateway deployments
    let contact = || {
        post(handlers::contact_post)
            .options(handlers::contact_options)
            .fallback(handlers::method_not_allowed)
    };

    Router::new()
        .route("/", contact())
        .route("/contact", contact())
}
