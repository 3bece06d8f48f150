//! Configuration management for Alertrix
//!
//! This module defines the Matrix provider configuration and its group-based
//! resolution. It uses the `figment` crate to load configuration from a YAML
//! file and merge it with environment variables.
//!
//! Validation is advisory and meant to run at load time; the dispatcher does
//! not re-validate per send.

use anyhow::Result;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Homeserver used when the configuration leaves `homeserver-url` empty.
pub const DEFAULT_HOMESERVER_URL: &str = "https://matrix-client.matrix.org";

/// Top-level Matrix provider configuration: the default destination plus an
/// ordered list of group-keyed overrides.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct MatrixProviderConfig {
    /// Custom homeserver to use (optional).
    #[serde(default)]
    pub homeserver_url: String,
    /// The bot user's access token to send messages.
    #[serde(default)]
    pub access_token: String,
    /// The room that the bot user has permissions to send messages to.
    #[serde(default)]
    pub internal_room_id: String,
    /// Default alert settings, passed through to the caller unmodified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_alert: Option<serde_json::Value>,
    /// Group-specific configurations prioritized over the defaults.
    #[serde(default)]
    pub overrides: Vec<Override>,
}

/// A case under which the default configuration is overridden.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Override {
    pub group: String,
    #[serde(default)]
    pub homeserver_url: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub internal_room_id: String,
}

/// The effective destination for one send: homeserver, credential, and room.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub homeserver_url: String,
    pub access_token: String,
    pub internal_room_id: String,
}

impl MatrixProviderConfig {
    /// Loads the provider configuration from the specified YAML file, with
    /// `ALERTRIX_`-prefixed environment variables layered on top.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config: MatrixProviderConfig = Figment::new()
            .merge(Yaml::file(config_path))
            // Environment keys use underscores, the schema uses kebab-case.
            .merge(Env::prefixed("ALERTRIX_").map(|key| key.as_str().replace('_', "-").into()))
            .extract()?;
        Ok(config)
    }

    /// Returns whether the provider's configuration is valid.
    ///
    /// Fails on the first duplicate override group, on any override with an
    /// empty group, access token, or room id, and when the default access
    /// token or room id is missing.
    pub fn is_valid(&self) -> bool {
        let mut registered_groups: HashSet<&str> = HashSet::new();
        for entry in &self.overrides {
            if entry.group.is_empty()
                || entry.access_token.is_empty()
                || entry.internal_room_id.is_empty()
                || !registered_groups.insert(&entry.group)
            {
                return false;
            }
        }
        !self.access_token.is_empty() && !self.internal_room_id.is_empty()
    }

    /// Returns the appropriate configuration for a given group.
    ///
    /// The first override whose group matches exactly wins, in declaration
    /// order; otherwise the defaults apply. An empty homeserver URL resolves
    /// to [`DEFAULT_HOMESERVER_URL`].
    pub fn config_for_group(&self, group: &str) -> ResolvedConfig {
        let (homeserver_url, access_token, internal_room_id) =
            match self.overrides.iter().find(|entry| entry.group == group) {
                Some(entry) => (
                    &entry.homeserver_url,
                    &entry.access_token,
                    &entry.internal_room_id,
                ),
                None => (
                    &self.homeserver_url,
                    &self.access_token,
                    &self.internal_room_id,
                ),
            };
        ResolvedConfig {
            homeserver_url: if homeserver_url.is_empty() {
                DEFAULT_HOMESERVER_URL.to_string()
            } else {
                homeserver_url.clone()
            },
            access_token: access_token.clone(),
            internal_room_id: internal_room_id.clone(),
        }
    }

    /// Returns the provider's default alert settings, if configured.
    pub fn default_alert(&self) -> Option<&serde_json::Value> {
        self.default_alert.as_ref()
    }
}
