use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::{debug, warn};

use crate::{
    adapters::inbound::http::{dto::ErrorResponseDto, router::AppState, views},
    domain::models::Session,
};

/// Name of the cookie holding the admin access token
pub const SESSION_COOKIE: &str = "catalog_session";

/// The validated session, handed to admin handlers as a request extension
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub session: Session,
}

/// Access token from `Authorization: Bearer` or, failing that, the session cookie
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

pub fn session_cookie(session: &Session) -> String {
    let max_age = (session.expires_at - Utc::now()).num_seconds().max(0);
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, session.access_token, max_age
    )
}

pub fn clear_session_cookie() -> String {
    format!("{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Look up the session behind the request's token, if there is a live one
pub async fn resolve_session(state: &AppState, headers: &HeaderMap) -> Option<Session> {
    let token = access_token(headers)?;

    match state.auth.session(&token).await {
        Ok(Some(session)) if !session.is_expired_at(Utc::now()) => Some(session),
        Ok(_) => {
            debug!("Rejected unknown or expired session token");
            None
        }
        Err(e) => {
            warn!(error = %e, "Session check failed");
            None
        }
    }
}

/// Middleware that rejects requests without a live admin session
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match resolve_session(&state, request.headers()).await {
        Some(session) => {
            request.extensions_mut().insert(AdminContext { session });
            next.run(request).await
        }
        None if request.uri().path().starts_with("/api/") => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponseDto::unauthorized("Authentication required")),
        )
            .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Html(views::login_page(None).into_string()),
        )
            .into_response(),
    }
}
