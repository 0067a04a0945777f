use std::net::SocketAddr;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use utoipa::OpenApi;

use crate::{
    error::ValidationErrorResponse,
    middleware::{
        method_not_allowed::method_not_allowed, not_found::not_found,
        trace_response_body::trace_response_body,
    },
    route::books,
    state::ApiState,
    store::Book,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::route::books::create_book::create_book,
        crate::route::books::list_books::list_books,
        crate::route::books::get_book::get_book,
        crate::route::books::update_book::update_book,
        crate::route::books::delete_book::delete_book,
    ),
    components(schemas(
        Book,
        ValidationErrorResponse,
        crate::route::books::create_book::CreateBookResponse,
        crate::route::books::list_books::ListBooksResponse,
        crate::route::books::get_book::GetBookResponse,
        crate::route::books::update_book::UpdateBookResponse,
        crate::route::books::delete_book::DeleteBookResponse,
    ))
)]
struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Builds the application router around the given state.
///
/// Split out of [`Server::run`] so tests can drive the full middleware stack
/// against a substituted store.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .nest("/books", books::app::app())
        .route("/api-docs/openapi.json", get(openapi))
        .layer(middleware::from_fn(method_not_allowed))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace_response_body,
        ))
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                        .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                )
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
}

pub struct ServerConfig {
    socket_address: SocketAddr,
}

impl ServerConfig {
    pub fn new(socket_address: SocketAddr) -> Self {
        Self { socket_address }
    }
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub async fn run(self, state: ApiState) -> anyhow::Result<()> {
        let app = router(state);

        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");

        tracing::info!("CTRL+C received");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;

        tracing::info!("SIGTERM received");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
