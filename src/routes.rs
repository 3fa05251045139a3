use axum::{
    extract::MatchedPath,
    http::{header, HeaderValue, Method, Request},
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::CorsLayer;

use crate::api;
use crate::config::Config;
use crate::db::Db;

async fn health_check() -> &'static str {
    "OK"
}

/// Resource routes, mounted under `/api` by [`app`].
pub fn api_router() -> Router {
    Router::new()
        .route("/pets", get(api::pet::list_pets).post(api::pet::create_pet))
        .route(
            "/pets/:id",
            get(api::pet::get_pet)
                .put(api::pet::update_pet)
                .delete(api::pet::delete_pet),
        )
        .route(
            "/adotantes",
            get(api::adotante::list_adotantes).post(api::adotante::create_adotante),
        )
        .route(
            "/adotantes/:id",
            get(api::adotante::get_adotante)
                .put(api::adotante::update_adotante)
                .delete(api::adotante::delete_adotante),
        )
        .route(
            "/adotantes/:id/adocoes",
            get(api::adocao::list_adocoes_by_adotante),
        )
        .route(
            "/adocoes",
            get(api::adocao::list_adocoes).post(api::adocao::create_adocao),
        )
        .route(
            "/adocoes/:id",
            get(api::adocao::get_adocao)
                .put(api::adocao::update_adocao)
                .delete(api::adocao::delete_adocao),
        )
        .route("/signup", post(api::auth::signup))
        .route("/login", post(api::auth::login))
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    match origin.map(str::parse::<HeaderValue>) {
        Some(Ok(origin)) => cors.allow_origin(origin).allow_credentials(true),
        Some(Err(_)) => {
            tracing::warn!("ignoring unparsable CORS_ALLOW_ORIGIN");
            cors
        }
        None => cors,
    }
}

/// Full application router without the Prometheus layer, which the binary
/// adds since its recorder is process-global.
pub fn app(db: Db, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_router())
        .layer(Extension(db))
        .layer(tower_cookies::CookieManagerLayer::new())
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &Request<axum::body::Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|matched| matched.as_str());

                    // "METHOD /path", e.g. "POST /api/adocoes"
                    let span_name = match matched_path {
                        Some(path) => format!("{} {}", request.method(), path),
                        None => format!("{} {}", request.method(), request.uri().path()),
                    };

                    let user_ip = request
                        .headers()
                        .get("x-forwarded-for")
                        .and_then(|v| v.to_str().ok())
                        .or_else(|| {
                            request
                                .headers()
                                .get("x-real-ip")
                                .and_then(|v| v.to_str().ok())
                        })
                        .unwrap_or("unknown");

                    // Handlers fill the empty fields in.
                    tracing::info_span!(
                        "request",
                        "otel.name" = span_name,
                        user_ip = user_ip,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        table = tracing::field::Empty,
                        action = tracing::field::Empty,
                        pet_id = tracing::field::Empty,
                        adotante_id = tracing::field::Empty,
                        adocao_id = tracing::field::Empty,
                        business_event = tracing::field::Empty,
                        error = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_request(|_request: &Request<axum::body::Body>, _span: &tracing::Span| {})
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                        span.record("status", tracing::field::display(response.status()));
                        span.record("latency", tracing::field::debug(latency));
                        tracing::info!("request completed");
                    },
                ),
        )
        .layer(cors_layer(config.cors_origin.as_deref()))
}
