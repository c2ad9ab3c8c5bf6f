use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    domain::{
        errors::{AuthError, AuthResult},
        models::{Credentials, Session, SessionEvent},
    },
    ports::auth::IdentityProvider,
};

const EVENT_CAPACITY: usize = 32;

/// Gateway over the identity provider.
///
/// Session changes are pushed to subscribers instead of living in shared
/// mutable state; handlers get the validated session through `AdminContext`.
#[derive(Clone)]
pub struct AuthGateway {
    provider: Arc<dyn IdentityProvider>,
    events: broadcast::Sender<SessionEvent>,
}

impl AuthGateway {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { provider, events }
    }

    /// Sign in. Every failure, network or password, becomes `InvalidCredentials`
    pub async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session> {
        match self.provider.sign_in(credentials).await {
            Ok(session) => {
                info!(email = %session.user_email, "Admin signed in");
                // No subscribers is fine
                let _ = self.events.send(SessionEvent::SignedIn {
                    email: session.user_email.clone(),
                });
                Ok(session)
            }
            Err(e) => {
                warn!(email = %credentials.email, error = %e, "Sign-in failed");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    pub async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        self.provider.sign_out(access_token).await.map_err(|e| {
            warn!(error = %e, "Sign-out failed");
            e
        })?;

        info!("Admin signed out");
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }

    /// The single session check done for every admin request
    pub async fn session(&self, access_token: &str) -> AuthResult<Option<Session>> {
        self.provider.get_session(access_token).await
    }

    /// Receive every sign-in and sign-out from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
