mod auth;

pub use auth::{
    access_token, clear_session_cookie, require_admin, resolve_session, session_cookie,
    AdminContext, SESSION_COOKIE,
};
