// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the catalog backend.
//!
//! Provides [`HttpGateway`], the single point of outbound communication:
//! bearer credential attachment, the fixed request timeout, and the
//! session-wide reaction to `401 Unauthorized`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tagflow_config::model::ClientConfig;
use tagflow_core::{Location, TagflowError};
use tagflow_session::SessionStore;
use tracing::{debug, warn};

/// Path of the login view; a 401 redirects here unless already on it.
pub const LOGIN_PATH: &str = "/login";

/// Mediates every request to the backend.
///
/// Requests are never retried. Every failure, including a 401, is returned
/// to the caller; a 401 additionally invalidates the session.
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    session: Arc<SessionStore>,
    location: Option<Arc<dyn Location>>,
    login_path: String,
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("login_path", &self.login_path)
            .finish()
    }
}

impl HttpGateway {
    /// Creates a gateway for `config.base_url` sharing `session`.
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> Result<Self, TagflowError> {
        Url::parse(&config.base_url).map_err(|e| {
            TagflowError::Config(format!("invalid base URL `{}`: {e}", config.base_url))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(timeout)
            .build()
            .map_err(|e| TagflowError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
            session,
            location: None,
            login_path: LOGIN_PATH.to_string(),
        })
    }

    /// Lets the gateway see where the client currently is, so a 401 on the
    /// login view does not redirect to itself.
    pub fn with_location(mut self, location: Arc<dyn Location>) -> Self {
        self.location = Some(location);
        self
    }

    /// Overrides the login destination used for 401 redirects.
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Sends `method base_url+path` and returns the response untouched on
    /// success.
    ///
    /// The bearer token is read from the session immediately before
    /// dispatch, so a login or logout between calls is always observed.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, TagflowError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path, query)?;
        let mut builder = self.client.request(method.clone(), url);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.send_error(path, e))?;

        let status = response.status();
        debug!(%method, path, status = %status, "response received");

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized(path);
            return Err(TagflowError::Unauthorized {
                path: path.to_string(),
            });
        }

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(path, error = %e, "failed to read error response body");
                    String::new()
                }
            };
            return Err(TagflowError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// `GET path` decoded as JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TagflowError> {
        let response = self
            .request::<()>(Method::GET, path, None, query)
            .await?;
        self.decode(path, response).await
    }

    /// `POST path` with a JSON body; the response is returned as-is.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, TagflowError> {
        self.request(Method::POST, path, Some(body), &[]).await
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, TagflowError> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| TagflowError::Config(format!("invalid request path `{path}`: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    pub(crate) async fn decode<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, TagflowError> {
        let bytes = response.bytes().await.map_err(|e| self.send_error(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| TagflowError::Decode {
            message: format!("failed to parse response from {path}: {e}"),
            source: Some(Box::new(e)),
        })
    }

    fn send_error(&self, path: &str, e: reqwest::Error) -> TagflowError {
        if e.is_timeout() {
            warn!(path, timeout = ?self.timeout, "request timed out");
            TagflowError::Timeout {
                duration: self.timeout,
            }
        } else {
            TagflowError::Transport {
                message: format!("request to {path} failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }

    /// Logs out, then asks the host for a hard navigation to the login
    /// view unless the client is already showing it.
    fn handle_unauthorized(&self, path: &str) {
        let current = self.location.as_ref().map(|l| l.current_path());
        let already_at_login = current.as_deref() == Some(self.login_path.as_str());
        warn!(path, ?current, "backend rejected session credential");
        self.session
            .invalidate((!already_at_login).then_some(self.login_path.as_str()));
    }
}
