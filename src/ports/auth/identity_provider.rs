use async_trait::async_trait;

use crate::domain::{
    errors::AuthResult,
    models::{Credentials, Session},
};

/// Port for the external identity provider (email/password accounts)
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Exchange credentials for a session
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session>;

    /// Invalidate the session behind `access_token`
    async fn sign_out(&self, access_token: &str) -> AuthResult<()>;

    /// Look up a live session. Unknown or expired tokens give None
    async fn get_session(&self, access_token: &str) -> AuthResult<Option<Session>>;
}
