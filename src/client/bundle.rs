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

use crate::io::records::{SatelliteRecord, ScenarioRecord};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// A scenario as served by the backend. Its shape is not inspected by the client.
pub type Scenario = Value;
/// A satellite as served by the backend. Its shape is not inspected by the client.
pub type Satellite = Value;

/// Identifier of a scenario, kept verbatim. The backend uses integers but any string is forwarded as is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScenarioId(String);

impl ScenarioId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ScenarioId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ScenarioId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for ScenarioId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for ScenarioId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<u32> for ScenarioId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for ScenarioId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ScenarioId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum IdRepr {
            Signed(i64),
            Unsigned(u64),
            Text(String),
        }

        Ok(match IdRepr::deserialize(deserializer)? {
            IdRepr::Signed(id) => id.into(),
            IdRepr::Unsigned(id) => id.into(),
            IdRepr::Text(id) => id.into(),
        })
    }
}

/// A scenario along with all of its satellites, both fetched with the same scenario identifier.
///
/// Built fresh by [`crate::ScenarioDataClient::get_scenario_bundle`], never cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBundle {
    pub scenario: Scenario,
    /// In the order returned by the backend.
    pub satellites: Vec<Satellite>,
}

impl ScenarioBundle {
    /// Decodes the opaque payloads into their typed records.
    pub fn records(&self) -> Result<(ScenarioRecord, Vec<SatelliteRecord>), serde_json::Error> {
        let scenario = ScenarioRecord::from_value(&self.scenario)?;
        let satellites = self
            .satellites
            .iter()
            .map(SatelliteRecord::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((scenario, satellites))
    }
}
