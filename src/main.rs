use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use unidraft_dashboard::{
    config::{get_config, init_config},
    docs,
    middleware::{auth::require_session, cors::dashboard_cors, rate_limit},
    routes, AppState,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    init_config()?;
    let config = get_config();

    let app_state = AppState::new(config)?;

    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/recruiters", post(routes::auth::register_recruiter))
        .route(
            "/api/enterprises",
            get(routes::enterprises::list_enterprises),
        )
        .route("/api/quiz/ranking", get(routes::quiz::ranking))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.public_rps),
            rate_limit::rps_middleware,
        ));

    let dashboard_api = Router::new()
        .route("/api/students", get(routes::students::list_students))
        .route("/api/students/:id", get(routes::students::get_student))
        .route(
            "/api/students/:id/proposals",
            post(routes::proposals::create_proposal),
        )
        .route("/api/dashboard", get(routes::dashboard::get_dashboard))
        .route("/api/quiz/questions", get(routes::quiz::list_unanswered))
        .route("/api/quiz/questions/:id", get(routes::quiz::get_question))
        .route(
            "/api/quiz/questions/:id/answer",
            post(routes::quiz::answer_question),
        )
        .layer(axum::middleware::from_fn_with_state(
            app_state.session_verifier.clone(),
            require_session,
        ))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(config.dashboard_rps),
            rate_limit::rps_middleware,
        ));

    let app = public_api
        .merge(dashboard_api)
        .with_state(app_state)
        .layer(dashboard_cors(config.allowed_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
