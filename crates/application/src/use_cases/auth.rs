//! Login and logout.

use std::sync::Arc;

use freemate_domain::{LoginRequest, LoginResponse};
use tracing::{info, warn};

use crate::auth::TokenStore;
use crate::client::{ApiClient, AuthMode};
use crate::error::ApiResult;
use crate::messages;
use crate::ports::Notifier;

use super::LoadingGuard;

/// Starts and ends sessions.
pub struct AuthService {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
}

impl AuthService {
    /// Creates the service.
    #[must_use]
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    fn tokens(&self) -> &TokenStore {
        self.client.tokens()
    }

    /// Logs in and stores the issued tokens.
    ///
    /// Returns the user's nickname.
    ///
    /// # Errors
    ///
    /// Returns the client error after notifying the user; the session is left
    /// untouched.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<String> {
        let _loading = LoadingGuard::show(self.notifier.as_ref());
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = match self
            .client
            .post_json(&self.client.config().api_paths.auth.login, &request, AuthMode::Anonymous)
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(username, %error, "Login failed");
                self.notifier.show_error(messages::LOGIN_FAILED);
                return Err(error);
            }
        };

        let (tokens, nickname) = response.into_parts();
        self.tokens().save(tokens, &nickname).await;
        info!(username, %nickname, "Logged in");
        Ok(nickname)
    }

    /// Ends the session.
    pub async fn logout(&self) {
        self.tokens().clear().await;
    }

    /// Nickname of the logged-in user.
    #[must_use]
    pub fn nickname(&self) -> Option<String> {
        self.tokens().nickname()
    }
}
