// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed wrappers over [`HttpGateway::request`] for each backend endpoint.

use async_trait::async_trait;
use tagflow_core::{
    CatalogApi, FileListing, LoginRequest, LoginResponse, ResourceQuery, TagNode, TagflowError,
    UpdatePasswordRequest,
};
use tracing::info;

use crate::client::HttpGateway;

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const UPDATE_PASSWORD_ENDPOINT: &str = "/auth/update-password";
pub const TAG_TREE_ENDPOINT: &str = "/v1/tags/tree";
pub const FILES_ENDPOINT: &str = "/v1/files";

impl HttpGateway {
    /// `POST /auth/login`. Does not touch the session; see [`HttpGateway::login`].
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, TagflowError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.post_json(LOGIN_ENDPOINT, &body).await?;
        self.decode(LOGIN_ENDPOINT, response).await
    }

    /// Authenticates and, on success, stores the returned token in the
    /// session under `username`.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), TagflowError> {
        let LoginResponse { token } = self.authenticate(username, password).await?;
        self.session().login(&token, username)
    }

    /// `POST /auth/update-password`. The backend answers with an empty body.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), TagflowError> {
        let body = UpdatePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.post_json(UPDATE_PASSWORD_ENDPOINT, &body).await?;
        info!("password updated");
        Ok(())
    }

    /// `GET /v1/tags/tree`.
    pub async fn fetch_tag_tree(&self) -> Result<Vec<TagNode>, TagflowError> {
        self.get_json(TAG_TREE_ENDPOINT, &[]).await
    }

    /// `GET /v1/files` with `query` encoded as query-string parameters.
    pub async fn list_files(&self, query: &ResourceQuery) -> Result<FileListing, TagflowError> {
        self.get_json(FILES_ENDPOINT, &query.to_pairs()).await
    }
}

#[async_trait]
impl CatalogApi for HttpGateway {
    async fn fetch_tag_tree(&self) -> Result<Vec<TagNode>, TagflowError> {
        HttpGateway::fetch_tag_tree(self).await
    }

    async fn list_files(&self, query: &ResourceQuery) -> Result<FileListing, TagflowError> {
        HttpGateway::list_files(self, query).await
    }
}
