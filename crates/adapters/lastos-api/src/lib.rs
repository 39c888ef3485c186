pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod poller;
pub mod types;

pub use auth::{Authenticator, IdentityProvider, IdentityUser, TokenRefreshHandle};
pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, AuthError};
pub use poller::{GameStatePoller, PollSnapshot};
