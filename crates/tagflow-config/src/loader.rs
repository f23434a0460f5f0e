// SPDX-FileCopyrightText: 2026 Tagflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order, later wins: compiled defaults, `/etc/tagflow/tagflow.toml`,
//! `~/.config/tagflow/tagflow.toml`, `./tagflow.toml`, `TAGFLOW_*` env vars.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TagflowConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/tagflow/tagflow.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "tagflow.toml";

/// Per-user config file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tagflow").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<TagflowConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string on top of the defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<TagflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TagflowConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TagflowConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TagflowConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full Figment before extraction, exposed for diagnostics.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(TagflowConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Sections reachable through `TAGFLOW_<SECTION>_<KEY>` variables.
const ENV_SECTIONS: [&str; 3] = ["client", "session", "log"];

/// Other `TAGFLOW_*` variables (such as `TAGFLOW_PASSWORD`) are not config.
fn env_provider() -> Env {
    Env::prefixed("TAGFLOW_")
        .filter(|key| env_key_to_path(key.as_str()).is_some())
        .map(|key| env_key_to_path(key.as_str()).unwrap_or_default().into())
}

/// `<SECTION>_<KEY>` -> `<section>.<key>`.
///
/// Only the first underscore after the section name is a separator, so
/// `CLIENT_BASE_URL` maps to `client.base_url`.
fn env_key_to_path(key: &str) -> Option<String> {
    let key = key.to_ascii_lowercase();
    ENV_SECTIONS.iter().find_map(|section| {
        key.strip_prefix(*section)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|rest| !rest.is_empty())
            .map(|rest| format!("{section}.{rest}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn env_var_maps_underscored_key_to_section() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TAGFLOW_CLIENT_BASE_URL", "https://catalog.example/api");
            jail.set_env("TAGFLOW_LOG_LEVEL", "debug");
            let config: TagflowConfig = Figment::new()
                .merge(Serialized::defaults(TagflowConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.client.base_url, "https://catalog.example/api");
            assert_eq!(config.log.level, "debug");
            Ok(())
        });
    }

    #[test]
    #[serial_test::serial]
    fn unrelated_prefixed_vars_are_ignored() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TAGFLOW_PASSWORD", "hunter2");
            jail.set_env("TAGFLOW_CLIENT", "dangling");
            let config = load_config()?;
            assert_eq!(config.client.timeout_secs, 10);
            Ok(())
        });
    }

    #[test]
    fn env_keys_map_to_dotted_paths() {
        assert_eq!(env_key_to_path("SESSION_PATH").as_deref(), Some("session.path"));
        assert_eq!(env_key_to_path("client_timeout_secs").as_deref(), Some("client.timeout_secs"));
        assert_eq!(env_key_to_path("LOGGING"), None);
        assert_eq!(env_key_to_path("PASSWORD"), None);
    }

    #[test]
    #[serial_test::serial]
    fn local_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(LOCAL_CONFIG_FILE, "[client]\ntimeout_secs = 3\n")?;
            let config = load_config()?;
            assert_eq!(config.client.timeout_secs, 3);
            Ok(())
        });
    }
}
