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

use crate::client::ScenarioId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A Walker-like constellation scenario, as stored by the backend.
///
/// Times are kept as the backend's strings. The list endpoint omits `sensor_config`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub id: ScenarioId,
    pub name: String,
    pub epoch: String,
    pub start_time: String,
    pub end_time: String,
    pub alt_km: f64,
    pub inc_deg: f64,
    pub n_planes: u32,
    pub n_sats_per_plane: u32,
    #[serde(default)]
    pub sensor_config: Option<Value>,
    #[serde(default)]
    pub satellites_count: Option<u32>,
}

impl ScenarioRecord {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Number of satellites implied by the constellation layout, planes times satellites per plane.
    pub fn nominal_satellite_count(&self) -> u64 {
        u64::from(self.n_planes) * u64::from(self.n_sats_per_plane)
    }
}

/// One satellite of a scenario with its initial Keplerian elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SatelliteRecord {
    pub id: i64,
    /// Identifier of the owning scenario
    pub scenario: ScenarioId,
    pub sat_id: String,
    pub stk_name: String,
    pub plane_index: i64,
    pub sat_index_in_plane: i64,
    pub alt_km: f64,
    pub sma_km: f64,
    pub ecc: f64,
    pub inc_deg: f64,
    pub raan_deg: f64,
    pub argp_deg: f64,
    pub ta_deg: f64,
}

impl SatelliteRecord {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

/// Groups satellites by orbital plane, keeping their relative order within each plane.
pub fn group_by_plane(satellites: &[SatelliteRecord]) -> BTreeMap<i64, Vec<&SatelliteRecord>> {
    let mut planes: BTreeMap<i64, Vec<&SatelliteRecord>> = BTreeMap::new();
    for sat in satellites {
        planes.entry(sat.plane_index).or_default().push(sat);
    }
    planes
}
