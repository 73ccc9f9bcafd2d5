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

/*! # constellation-client

Data access for satellite constellation scenarios: fetches scenarios and their satellites from the scenario backend's REST API
and hands them, untouched, to the globe and topology views.

The entry point is [`ScenarioDataClient`]. Scenario and satellite payloads are opaque [`serde_json::Value`]s; typed projections
are available in [`io::records`] for consumers which want them.
*/

/// The scenario data client, its transport seam, and the payload types it returns.
pub mod client;

mod errors;
/// Functions which may fail return a [`ClientError`], a non-success HTTP status is always a [`ClientError::RemoteFetch`].
pub use self::errors::{ClientError, Operation};

/// Configuration loading and the typed representations of the backend payloads.
pub mod io;

#[macro_use]
extern crate log;

/// Re-export some useful things
pub use self::client::{
    ReqwestTransport, Satellite, Scenario, ScenarioBundle, ScenarioDataClient, ScenarioId,
    Transport,
};
pub use self::io::config::ClientConfig;
