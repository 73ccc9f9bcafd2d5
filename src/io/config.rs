/*
    Constellation client, scenario data access for constellation views
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use super::{ConfigError, ConfigRepr, InvalidBaseUrlSnafu, InvalidConfigSnafu};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::env::var;
use typed_builder::TypedBuilder;
use url::Url;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
/// Environment variable holding the base URL of the scenario backend.
pub const BASE_URL_VAR: &str = "CONSTELLATION_API_BASE_URL";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Configuration of a [`crate::ScenarioDataClient`].
///
/// Resolved once, then handed to the client which never changes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct ClientConfig {
    /// Origin and path prefix of the REST API, e.g. `http://localhost:8000/api`.
    #[builder(default = default_base_url(), setter(into))]
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ConfigRepr for ClientConfig {}

impl ClientConfig {
    /// Reads the base URL from `CONSTELLATION_API_BASE_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        Self::from_env_value(var(BASE_URL_VAR).ok())
    }

    /// Same as [`ClientConfig::from_env`] for an already fetched value: unset or blank means default.
    pub fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(base_url) if !base_url.trim().is_empty() => Self {
                base_url: base_url.trim().to_string(),
            },
            _ => Self::default(),
        }
    }

    /// Parses the base URL, which must be an absolute http(s) URL.
    /// Any query string or fragment is dropped since endpoints are appended to the path.
    pub fn endpoint_root(&self) -> Result<Url, ConfigError> {
        ensure!(
            !self.base_url.trim().is_empty(),
            InvalidConfigSnafu {
                msg: "base URL is empty".to_string()
            }
        );

        let mut url = Url::parse(self.base_url.trim()).context(InvalidBaseUrlSnafu {
            base_url: self.base_url.clone(),
        })?;

        ensure!(
            matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base(),
            InvalidConfigSnafu {
                msg: format!("base URL `{}` is not an http(s) URL", self.base_url)
            }
        );

        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }
}
