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

use crate::client::TransportError;
use crate::io::ConfigError;
use snafu::prelude::*;
use std::fmt;

/// The backend operations issued by the client, used to name what failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /scenarios/`
    ListScenarios,
    /// `GET /scenarios/{id}/`
    GetScenario,
    /// `GET /scenarios/{id}/satellites/`
    ListScenarioSatellites,
    /// `GET /satellites/`, optionally filtered by scenario
    ListSatellites,
    /// `GET /satellites/{id}/`
    GetSatellite,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Operation::ListScenarios => write!(f, "fetch scenario list"),
            Operation::GetScenario => write!(f, "fetch scenario details"),
            Operation::ListScenarioSatellites => write!(f, "fetch satellite data"),
            Operation::ListSatellites => write!(f, "fetch satellite list"),
            Operation::GetSatellite => write!(f, "fetch satellite details"),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ClientError {
    /// The backend answered with a non-2xx status.
    #[snafu(display("failed to {operation}: {status_text} (HTTP {status})"))]
    RemoteFetch {
        operation: Operation,
        status: u16,
        status_text: String,
    },
    /// The request never got an HTTP answer (DNS, refused connection, ...). The source is the transport's own error.
    #[snafu(display("transport error while trying to {operation}: {source}"))]
    Transport {
        operation: Operation,
        source: TransportError,
    },
    #[snafu(display("could not {operation}, body is not valid JSON: {source}"))]
    Decode {
        operation: Operation,
        source: serde_json::Error,
    },
    #[snafu(display("client configuration rejected: {source}"))]
    Config { source: ConfigError },
}

impl ClientError {
    /// Returns the operation which failed, if this error stems from a request.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::RemoteFetch { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
            Self::Config { .. } => None,
        }
    }

    /// Returns the HTTP status of a [`ClientError::RemoteFetch`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteFetch { status, .. } => Some(*status),
            _ => None,
        }
    }
}
