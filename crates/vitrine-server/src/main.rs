//! Demo authentication scaffold backing the component showcase.
//!
//! Verifies the fixed demo/demo credential pair, hands out cookie-backed
//! in-memory sessions, and exposes a health probe. Not a real user store.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

mod config;
mod session;

use config::{load_settings, Settings};
use session::{SessionStore, SessionUser};

const SESSION_COOKIE: &str = "vitrine_session";

#[derive(Clone)]
struct AppState {
    sessions: Arc<SessionStore>,
    session_ttl: Duration,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    user: SessionUser,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    if settings.session_secret == Settings::default().session_secret {
        warn!("using the default session secret; set VITRINE_SESSION_SECRET");
    }
    let app = build_router(&settings);

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(settings: &Settings) -> Router {
    let session_ttl = Duration::from_secs(settings.session_ttl_seconds);
    let state = AppState {
        sessions: Arc::new(SessionStore::new(session_ttl)),
        session_ttl,
    };
    Router::new()
        .route("/api/health", get(health))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/user", get(current_user))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "Server is running" }))
}

/// Placeholder credential check against the fixed demo account.
fn verify_credentials(username: &str, password: &str) -> Option<SessionUser> {
    if username == "demo" && password == "demo" {
        Some(SessionUser {
            id: "1".to_string(),
            username: "demo".to_string(),
        })
    } else {
        None
    }
}

async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    let Some(user) = verify_credentials(&req.username, &req.password) else {
        info!(username = %req.username, "login rejected");
        return unauthorized();
    };

    let session_id = state.sessions.create(user.clone());
    info!(username = %user.username, "login accepted");

    let cookie = format!(
        "{SESSION_COOKIE}={session_id}; HttpOnly; Path=/; Max-Age={}",
        state.session_ttl.as_secs()
    );
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse { user }),
    )
        .into_response()
}

async fn current_user(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match session_from_headers(&state, &headers) {
        Some((_, user)) => Json(user).into_response(),
        None => unauthorized(),
    }
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some((session_id, _)) = session_from_headers(&state, &headers) {
        state.sessions.remove(&session_id);
    }
    let expired = format!("{SESSION_COOKIE}=; HttpOnly; Path=/; Max-Age=0");
    (
        StatusCode::OK,
        [(header::SET_COOKIE, expired)],
        Json(json!({ "message": "Logged out" })),
    )
        .into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthorized" })),
    )
        .into_response()
}

fn session_from_headers(state: &AppState, headers: &HeaderMap) -> Option<(String, SessionUser)> {
    let session_id = session_cookie(headers)?;
    let user = state.sessions.get(&session_id)?;
    Some((session_id, user))
}

/// Extract the session id from the `Cookie` header, if present.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
