use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Email/password pair submitted by the admin login form
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// An authenticated admin session issued by the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_email: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Session transitions broadcast to subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn { email: String },
    SignedOut,
}
