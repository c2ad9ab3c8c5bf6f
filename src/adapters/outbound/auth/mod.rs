mod gotrue_identity_provider;
mod in_memory_identity_provider;

pub use gotrue_identity_provider::GoTrueIdentityProvider;
pub use in_memory_identity_provider::{InMemoryIdentityProvider, DEFAULT_SESSION_TTL_SECS};
