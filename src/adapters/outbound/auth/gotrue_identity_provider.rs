use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{
    domain::{
        errors::{AuthError, AuthResult},
        models::{Credentials, Session},
    },
    ports::auth::IdentityProvider,
};

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Transport {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    user: UserResponse,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(alias = "error_description", alias = "msg")]
    message: Option<String>,
}

/// Identity provider backed by a GoTrue-compatible auth endpoint
#[derive(Clone)]
pub struct GoTrueIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoTrueIdentityProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn rejection(response: reqwest::Response) -> AuthError {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| "no message".to_string());

        AuthError::Rejected { status, message }
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session> {
        let response = self
            .client
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", &self.api_key)
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let token: TokenResponse = response.json().await?;
                Ok(Session {
                    access_token: token.access_token,
                    user_email: token.user.email.unwrap_or_else(|| credentials.email.clone()),
                    expires_at: Utc::now() + Duration::seconds(token.expires_in),
                })
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                Err(AuthError::InvalidCredentials)
            }
            _ => Err(Self::rejection(response).await),
        }
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        // An already-revoked token is as signed out as it gets
        if response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(Self::rejection(response).await)
        }
    }

    async fn get_session(&self, access_token: &str) -> AuthResult<Option<Session>> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: UserResponse = response.json().await?;
                debug!("Session verified for {:?}", user.email);
                // /user does not report expiry; the token was valid just now
                Ok(Some(Session {
                    access_token: access_token.to_string(),
                    user_email: user.email.unwrap_or_default(),
                    expires_at: Utc::now() + Duration::seconds(60),
                }))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Err(Self::rejection(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = GoTrueIdentityProvider::new("https://auth.example.com/", "key");
        assert_eq!(
            provider.endpoint("user"),
            "https://auth.example.com/auth/v1/user"
        );
    }

    #[test]
    fn test_token_response_deserializes() {
        let body = r#"{
            "access_token": "abc",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "def",
            "user": { "id": "1", "email": "admin@example.com" }
        }"#;

        let token: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, 3600);
        assert_eq!(token.user.email.as_deref(), Some("admin@example.com"));
    }
}
