use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Credentialed CORS for a known front-end origin; permissive otherwise.
pub fn dashboard_cors(allowed_origin: Option<&str>) -> CorsLayer {
    match allowed_origin.and_then(|origin| HeaderValue::from_str(origin).ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true),
        None => CorsLayer::new()
            .allow_methods(Any)
            .allow_headers(Any)
            .allow_origin(Any),
    }
}
