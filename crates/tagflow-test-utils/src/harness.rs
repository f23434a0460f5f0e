// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the whole client stack (session, navigator,
//! gateway and resource cache) against a wiremock backend, with the
//! session kept in memory.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tagflow_config::model::{ClientConfig, SessionBackend, SessionConfig, TagflowConfig};
use tagflow_core::{FileItem, TagNode, TagflowError};
use tagflow_gateway::{FILES_ENDPOINT, HttpGateway, TAG_TREE_ENDPOINT};
use tagflow_resource::ResourceCache;
use tagflow_router::{NavigationGuard, Navigator, Route};
use tagflow_session::{MemoryStorage, SessionStore};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    credential: Option<(String, String)>,
    route: Route,
    timeout_secs: u64,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            credential: None,
            route: Route::Home,
            timeout_secs: ClientConfig::default().timeout_secs,
        }
    }

    /// Start with a stored credential.
    pub fn with_logged_in(mut self, token: &str, username: &str) -> Self {
        self.credential = Some((token.to_string(), username.to_string()));
        self
    }

    /// Route the navigator should try to open first (still guarded).
    pub fn at(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Start the mock backend and wire every component to it.
    pub async fn build(self) -> Result<TestHarness, TagflowError> {
        let server = MockServer::start().await;
        tracing::debug!(uri = %server.uri(), "mock backend started");

        let config = TagflowConfig {
            client: ClientConfig {
                base_url: server.uri(),
                timeout_secs: self.timeout_secs,
                ..ClientConfig::default()
            },
            session: SessionConfig {
                backend: SessionBackend::Memory,
                ..SessionConfig::default()
            },
            ..TagflowConfig::default()
        };

        let session = Arc::new(SessionStore::open(Box::new(MemoryStorage::new())));
        if let Some((token, username)) = &self.credential {
            session.login(token, username)?;
        }

        let navigator = Arc::new(Navigator::new(
            NavigationGuard::new(session.clone()),
            self.route,
        ));
        let gateway = Arc::new(
            HttpGateway::new(&config.client, session.clone())?.with_location(navigator.clone()),
        );
        let cache = Arc::new(ResourceCache::new(gateway.clone()));

        Ok(TestHarness {
            server,
            session,
            navigator,
            gateway,
            cache,
            config,
        })
    }
}

/// A complete client stack talking to a mock backend.
pub struct TestHarness {
    /// The mock backend. Mount expectations on it directly for anything the
    /// helpers below do not cover.
    pub server: MockServer,
    pub session: Arc<SessionStore>,
    pub navigator: Arc<Navigator>,
    pub gateway: Arc<HttpGateway>,
    pub cache: Arc<ResourceCache>,
    pub config: TagflowConfig,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Serve `tree` from the tag tree endpoint.
    pub async fn mount_tag_tree(&self, tree: &[TagNode]) {
        Mock::given(method("GET"))
            .and(path(TAG_TREE_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(tree))
            .mount(&self.server)
            .await;
    }

    /// Serve `files` for listings of `tag_id`, answering after `delay`.
    pub async fn mount_files(&self, tag_id: i64, files: &[FileItem], delay: Duration) {
        let body = json!({ "items": files, "total": files.len() });
        Mock::given(method("GET"))
            .and(path(FILES_ENDPOINT))
            .and(query_param("tag_id", tag_id.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Answer `verb endpoint` with a bare status code.
    pub async fn mount_status(&self, verb: &str, endpoint: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}
