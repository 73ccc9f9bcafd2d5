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

use crate::errors::{
    ClientError, ConfigSnafu, DecodeSnafu, Operation, RemoteFetchSnafu, TransportSnafu,
};
use crate::io::config::ClientConfig;
use serde::de::DeserializeOwned;
use snafu::prelude::*;
use url::Url;

mod bundle;
pub use bundle::{Satellite, Scenario, ScenarioBundle, ScenarioId};

mod join;
use join::try_join_started;

mod transport;
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportError};

/// Fetches scenarios and satellites from the scenario backend.
///
/// Every call issues fresh requests: nothing is cached, nothing is retried, and payloads are returned exactly
/// as the backend sent them.
#[derive(Clone, Debug)]
pub struct ScenarioDataClient<T: Transport = ReqwestTransport> {
    base: Url,
    transport: T,
}

impl ScenarioDataClient<ReqwestTransport> {
    /// Builds a client targeting the configured base URL.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_transport(config, ReqwestTransport::default())
    }

    /// Builds a client from `CONSTELLATION_API_BASE_URL`, or `http://localhost:8000/api` if unset.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(&ClientConfig::from_env())
    }
}

impl<T: Transport> ScenarioDataClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self, ClientError> {
        let base = config.endpoint_root().context(ConfigSnafu)?;
        info!("scenario backend at {base}");
        Ok(Self { base, transport })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET {base}/scenarios/`
    pub async fn list_scenarios(&self) -> Result<Vec<Scenario>, ClientError> {
        self.fetch_json(Operation::ListScenarios, self.endpoint(&["scenarios"]))
            .await
    }

    /// `GET {base}/scenarios/{id}/`
    pub async fn get_scenario(&self, scenario_id: &ScenarioId) -> Result<Scenario, ClientError> {
        self.fetch_json(
            Operation::GetScenario,
            self.endpoint(&["scenarios", scenario_id.as_str()]),
        )
        .await
    }

    /// `GET {base}/scenarios/{id}/satellites/`, in the order returned by the backend.
    pub async fn list_satellites_for_scenario(
        &self,
        scenario_id: &ScenarioId,
    ) -> Result<Vec<Satellite>, ClientError> {
        self.fetch_json(
            Operation::ListScenarioSatellites,
            self.endpoint(&["scenarios", scenario_id.as_str(), "satellites"]),
        )
        .await
    }

    /// Fetches the scenario and its satellites concurrently.
    ///
    /// Both requests are in flight at the same time. The first failure is returned as is and the other
    /// outcome is dropped, so no partial bundle is ever built.
    pub async fn get_scenario_bundle(
        &self,
        scenario_id: &ScenarioId,
    ) -> Result<ScenarioBundle, ClientError> {
        let (scenario, satellites) = try_join_started(
            self.get_scenario(scenario_id),
            self.list_satellites_for_scenario(scenario_id),
        )
        .await?;

        debug!(
            "scenario {scenario_id} bundled with {} satellites",
            satellites.len()
        );

        Ok(ScenarioBundle {
            scenario,
            satellites,
        })
    }

    /// `GET {base}/satellites/`, or `GET {base}/satellites/?scenario_id={id}` when filtered.
    pub async fn list_satellites(
        &self,
        scenario_id: Option<&ScenarioId>,
    ) -> Result<Vec<Satellite>, ClientError> {
        let mut url = self.endpoint(&["satellites"]);
        if let Some(scenario_id) = scenario_id {
            url.query_pairs_mut()
                .append_pair("scenario_id", scenario_id.as_str());
        }
        self.fetch_json(Operation::ListSatellites, url).await
    }

    /// `GET {base}/satellites/{id}/`
    pub async fn get_satellite(&self, satellite_id: &str) -> Result<Satellite, ClientError> {
        self.fetch_json(
            Operation::GetSatellite,
            self.endpoint(&["satellites", satellite_id]),
        )
        .await
    }

    /// Appends the segments to the base path, each percent-encoded, with the trailing slash the backend expects.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // The base was checked to be a base URL when the client was built.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url
    }

    async fn fetch_json<D: DeserializeOwned>(
        &self,
        operation: Operation,
        url: Url,
    ) -> Result<D, ClientError> {
        debug!("{operation}: GET {url}");

        let response = self
            .transport
            .get(&url)
            .await
            .context(TransportSnafu { operation })?;

        if !response.is_success() {
            warn!(
                "{operation}: GET {url} answered {} {}",
                response.status, response.status_text
            );
            return RemoteFetchSnafu {
                operation,
                status: response.status,
                status_text: response.status_text,
            }
            .fail();
        }

        serde_json::from_slice(&response.body).context(DecodeSnafu { operation })
    }
}
