// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembles the client stack and reacts to session events.

use std::sync::Arc;

use tagflow_config::TagflowConfig;
use tagflow_core::{SessionStorage, TagflowError};
use tagflow_gateway::{HttpGateway, LOGIN_PATH};
use tagflow_resource::ResourceCache;
use tagflow_router::{NavigationGuard, Navigator, Route};
use tagflow_session::{open_storage, SessionEvent, SessionStore};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

/// Every component of one client instance, sharing a single session.
pub struct App {
    pub config: TagflowConfig,
    pub session: Arc<SessionStore>,
    pub navigator: Arc<Navigator>,
    pub gateway: Arc<HttpGateway>,
    pub cache: Arc<ResourceCache>,
    events: broadcast::Receiver<SessionEvent>,
}

impl App {
    /// Builds the stack over the storage backend selected in `[session]`.
    pub fn build(config: TagflowConfig) -> Result<Self, TagflowError> {
        let storage = open_storage(&config.session);
        Self::with_storage(config, storage)
    }

    pub fn with_storage(
        config: TagflowConfig,
        storage: Box<dyn SessionStorage>,
    ) -> Result<Self, TagflowError> {
        let session = Arc::new(SessionStore::open(storage));
        let events = session.subscribe();

        let navigator = Arc::new(Navigator::new(
            NavigationGuard::new(session.clone()),
            Route::HOME,
        ));
        let gateway = Arc::new(
            HttpGateway::new(&config.client, session.clone())?.with_location(navigator.clone()),
        );
        let cache = Arc::new(ResourceCache::new(gateway.clone()));

        Ok(Self {
            config,
            session,
            navigator,
            gateway,
            cache,
            events,
        })
    }

    /// Applies every session event published since the last call and
    /// returns them in order.
    ///
    /// An `Invalidated` event drops the resource cache and hard-navigates
    /// to its target.
    pub fn drain_session_events(&mut self) -> Vec<SessionEvent> {
        let mut handled = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.apply(&event);
                    handled.push(event);
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "session events dropped");
                    if !self.session.is_logged_in() {
                        self.reset(LOGIN_PATH);
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        handled
    }

    fn apply(&self, event: &SessionEvent) {
        match event {
            SessionEvent::Invalidated { redirect_to } => self.reset(redirect_to),
            SessionEvent::LoggedIn { username } => debug!(username, "session opened"),
            SessionEvent::LoggedOut => debug!("session closed"),
        }
    }

    fn reset(&self, path: &str) {
        self.cache.clear();
        let landed = self.navigator.hard_navigate(path);
        warn!(?landed, "session expired, client state reset");
    }
}
