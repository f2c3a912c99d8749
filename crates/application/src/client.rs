//! Authenticated JSON API client.
//!
//! [`ApiClient`] turns a path, a payload and an [`AuthMode`] into a single
//! HTTP exchange. When an authenticated call comes back `401`, the client
//! runs one refresh cycle and re-issues the original request once with the
//! new access token. A `401` on that retry is returned as-is.
//!
//! # Example
//!
//! ```ignore
//! let client = ApiClient::new(config, transport, tokens, notifier);
//!
//! let params = QueryParams::new().with("username", "neo");
//! let taken = client.get("/api/auth/duplicate/username", &params, AuthMode::Anonymous).await?;
//! ```

use std::sync::Arc;

use freemate_domain::request::AUTHORIZATION;
use freemate_domain::{
    ClientConfig, HttpMethod, OutgoingRequest, QueryParams, RawResponse, ResponseBody,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::{TokenStore, token_preview};
use crate::error::{ApiError, ApiResult, AuthError};
use crate::messages;
use crate::ports::{HttpTransport, Notifier};

/// HTTP status that triggers the refresh cycle.
const UNAUTHORIZED: u16 = 401;

/// Whether a request should carry the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Attach the access token and recover from `401` by refreshing.
    #[default]
    Required,
    /// Send without credentials; `401` is an ordinary error.
    Anonymous,
}

impl AuthMode {
    /// Returns true for [`AuthMode::Required`].
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Required)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// JSON API client with bearer authentication and single-retry refresh.
pub struct ApiClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<TokenStore>,
    notifier: Arc<dyn Notifier>,
    /// Serializes refresh cycles so concurrent 401s share one refresh call.
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    /// Creates a client.
    #[must_use]
    pub fn new(
        config: Arc<ClientConfig>,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<TokenStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            transport,
            tokens,
            notifier,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session store used for bearer tokens.
    #[must_use]
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Sends a `GET`, appending `params` as a query string.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn get(
        &self,
        path: &str,
        params: &QueryParams,
        auth: AuthMode,
    ) -> ApiResult<ResponseBody> {
        self.request(HttpMethod::Get, &params.append_to(path), None, auth)
            .await
    }

    /// Sends a `POST` with `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: AuthMode,
    ) -> ApiResult<ResponseBody> {
        let body = encode(body)?;
        self.request(HttpMethod::Post, path, Some(body), auth).await
    }

    /// Sends a `PUT` with `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: AuthMode,
    ) -> ApiResult<ResponseBody> {
        let body = encode(body)?;
        self.request(HttpMethod::Put, path, Some(body), auth).await
    }

    /// Sends a `DELETE`, with a JSON body only when one is given.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        auth: AuthMode,
    ) -> ApiResult<ResponseBody> {
        let body = body.map(encode).transpose()?;
        self.request(HttpMethod::Delete, path, body, auth).await
    }

    /// `GET` and decode the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; a body that does not match `T` is [`ApiError::Decode`].
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
        auth: AuthMode,
    ) -> ApiResult<T> {
        Ok(self.get(path, params, auth).await?.decode()?)
    }

    /// `POST` and decode the JSON response into `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; a body that does not match `T` is [`ApiError::Decode`].
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        auth: AuthMode,
    ) -> ApiResult<T> {
        Ok(self.post(path, body, auth).await?.decode()?)
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// Fails with [`AuthError::NoRefreshToken`] without touching the network
    /// when no refresh token is held. Any failure clears the whole session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] describing why the refresh failed.
    pub async fn refresh_access_token(&self) -> ApiResult<()> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    async fn request(
        &self,
        method: HttpMethod,
        target: &str,
        body: Option<String>,
        auth: AuthMode,
    ) -> ApiResult<ResponseBody> {
        let mut request = OutgoingRequest::new(method, self.config.resolve_url(target));
        request.body = body;

        let sent_token = if auth.is_required() {
            self.tokens.valid_access_token().await
        } else {
            None
        };
        if let Some(token) = &sent_token {
            request.set_bearer(token);
        }

        let response = self.dispatch(&request).await?;
        if response.status != UNAUTHORIZED || !auth.is_required() {
            return finish(&response);
        }

        warn!(method = %request.method, url = %request.url, "Request unauthorized, refreshing access token");
        if let Err(error) = self.refresh_after_unauthorized(sent_token.as_deref()).await {
            warn!(%error, "Access token refresh failed, redirecting to login");
            self.notifier.show_error(messages::SESSION_EXPIRED);
            self.notifier.redirect(&self.config.page_urls.login);
            return Err(error);
        }

        match self.tokens.access_token().await {
            Some(token) => request.set_bearer(&token),
            None => request.remove_header(AUTHORIZATION),
        }
        let response = self.dispatch(&request).await?;
        finish(&response)
    }

    /// Runs the refresh cycle on behalf of a request that got `401` while
    /// carrying `stale` (or no token).
    ///
    /// If another request refreshed the session while this one waited for the
    /// lock, the new token is reused and no refresh call is made.
    async fn refresh_after_unauthorized(&self, stale: Option<&str>) -> ApiResult<()> {
        let _guard = self.refresh_lock.lock().await;
        if let Some(current) = self.tokens.valid_access_token().await
            && stale != Some(current.as_str())
        {
            debug!(
                access_token = %token_preview(&current),
                "Access token already refreshed by a concurrent request"
            );
            return Ok(());
        }
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> ApiResult<()> {
        let Some(refresh_token) = self.tokens.refresh_token().await else {
            self.tokens.clear().await;
            return Err(AuthError::NoRefreshToken.into());
        };

        match self.exchange_refresh_token(&refresh_token).await {
            Ok(access_token) => {
                debug!(access_token = %token_preview(&access_token), "Access token refreshed");
                self.tokens.update_access_token(access_token).await;
                Ok(())
            }
            Err(error) => {
                self.tokens.clear().await;
                Err(error.into())
            }
        }
    }

    /// Posts the refresh token without credentials and extracts the new
    /// access token.
    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<String, AuthError> {
        let fail = |error: ApiError| AuthError::RefreshFailed(Box::new(error));

        let body = encode(&RefreshRequest { refresh_token }).map_err(fail)?;
        let request = OutgoingRequest::new(
            HttpMethod::Post,
            self.config.resolve_url(&self.config.api_paths.auth.refresh),
        )
        .with_body(body);

        let response = self.dispatch(&request).await.map_err(fail)?;
        let body = finish(&response).map_err(fail)?;

        body.str_field("accessToken")
            .map(ToString::to_string)
            .ok_or(AuthError::MalformedRefreshResponse)
    }

    async fn dispatch(&self, request: &OutgoingRequest) -> ApiResult<RawResponse> {
        debug!(method = %request.method, url = %request.url, "Sending request");
        let response = self.transport.execute(request).await.map_err(|error| {
            warn!(method = %request.method, url = %request.url, %error, "Request failed");
            ApiError::from(error)
        })?;
        debug!(status = response.status, url = %request.url, "Received response");
        Ok(response)
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<String> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Parses the body and maps non-2xx statuses to [`ApiError::Status`].
fn finish(response: &RawResponse) -> ApiResult<ResponseBody> {
    let body = ResponseBody::parse(response)?;
    if response.is_success() {
        Ok(body)
    } else {
        Err(ApiError::Status {
            status: response.status,
            body,
        })
    }
}
