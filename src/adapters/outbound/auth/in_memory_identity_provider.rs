use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::{
        errors::{AuthError, AuthResult},
        models::{Credentials, Session},
    },
    ports::auth::IdentityProvider,
};

/// Default lifetime of an issued session
pub const DEFAULT_SESSION_TTL_SECS: i64 = 3600;

/// Single-account identity provider holding sessions in memory
#[derive(Clone)]
pub struct InMemoryIdentityProvider {
    admin_email: String,
    admin_password: String,
    ttl: Duration,
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemoryIdentityProvider {
    pub fn new(admin_email: impl Into<String>, admin_password: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
            admin_password: admin_password.into(),
            ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session> {
        if !credentials.email.eq_ignore_ascii_case(&self.admin_email)
            || credentials.password != self.admin_password
        {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let session = Session {
            access_token: Uuid::new_v4().simple().to_string(),
            user_email: self.admin_email.clone(),
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        // Tokens that are never presented again would otherwise stay forever
        sessions.retain(|_, existing| !existing.is_expired_at(now));
        sessions.insert(session.access_token.clone(), session.clone());

        Ok(session)
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(access_token);
        Ok(())
    }

    async fn get_session(&self, access_token: &str) -> AuthResult<Option<Session>> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        match sessions.get(access_token) {
            Some(session) if session.is_expired_at(now) => {
                sessions.remove(access_token);
                Ok(None)
            }
            Some(session) => Ok(Some(session.clone())),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_issues_a_live_session() {
        let provider = InMemoryIdentityProvider::new("admin@example.com", "secret");

        let session = provider
            .sign_in(&credentials("admin@example.com", "secret"))
            .await
            .unwrap();

        let found = provider.get_session(&session.access_token).await.unwrap();
        assert_eq!(found, Some(session));
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let provider = InMemoryIdentityProvider::new("admin@example.com", "secret");

        let result = provider
            .sign_in(&credentials("admin@example.com", "nope"))
            .await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_sign_out_drops_the_session() {
        let provider = InMemoryIdentityProvider::new("admin@example.com", "secret");
        let session = provider
            .sign_in(&credentials("admin@example.com", "secret"))
            .await
            .unwrap();

        provider.sign_out(&session.access_token).await.unwrap();

        assert!(provider
            .get_session(&session.access_token)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_not_returned() {
        let provider = InMemoryIdentityProvider::new("admin@example.com", "secret")
            .with_ttl(Duration::seconds(-1));
        let session = provider
            .sign_in(&credentials("admin@example.com", "secret"))
            .await
            .unwrap();

        assert!(provider
            .get_session(&session.access_token)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_sign_in_prunes_expired_sessions() {
        let provider = InMemoryIdentityProvider::new("admin@example.com", "secret")
            .with_ttl(Duration::seconds(-1));

        for _ in 0..3 {
            provider
                .sign_in(&credentials("admin@example.com", "secret"))
                .await
                .unwrap();
        }

        // Only the session issued by the last sign-in is left
        assert_eq!(provider.sessions.read().await.len(), 1);
    }
}
