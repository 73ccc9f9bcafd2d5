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

extern crate constellation_client as cc;
extern crate pretty_env_logger;
#[macro_use]
extern crate log;

use cc::io::records::{group_by_plane, ScenarioRecord};
use cc::io::{ConfigError, ConfigRepr};
use cc::{ClientConfig, ClientError, ScenarioBundle, ScenarioDataClient, ScenarioId};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use snafu::prelude::*;
use std::env::{set_var, var};
use std::path::PathBuf;
use std::process::ExitCode;

const LOG_VAR: &str = "CONSTELLATION_LOG";

#[derive(Parser, Debug)]
#[command(name = "constellation")]
#[command(version, about = "Fetch constellation scenarios and their satellites from the scenario backend")]
struct Cli {
    /// YAML file with the client configuration, defaults to CONSTELLATION_API_BASE_URL or http://localhost:8000/api
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pick a named entry of the configuration file instead of reading it as a single configuration
    #[arg(long, global = true, requires = "config")]
    profile: Option<String>,

    #[arg(long, value_enum, global = true, default_value_t = Format::Json)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all scenarios
    Scenarios,
    /// Show one scenario
    Scenario { id: String },
    /// List the satellites of a scenario
    Satellites { id: String },
    /// Fetch a scenario and its satellites together
    Bundle {
        id: String,
        /// Print a per-plane summary instead of the payload
        #[arg(long)]
        summary: bool,
    },
    /// Show one satellite
    Satellite { id: String },
    /// List all satellites, optionally of a single scenario
    AllSatellites {
        #[arg(long)]
        scenario: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Debug, Snafu)]
enum CliError {
    #[snafu(display("{source}"))]
    Client { source: ClientError },
    #[snafu(display("could not load {}: {source}", path.display()))]
    LoadConfig { path: PathBuf, source: ConfigError },
    #[snafu(display("no profile `{profile}` in {}", path.display()))]
    UnknownProfile { path: PathBuf, profile: String },
    #[snafu(display("could not render JSON: {source}"))]
    RenderJson { source: serde_json::Error },
    #[snafu(display("could not render YAML: {source}"))]
    RenderYaml { source: serde_yaml::Error },
    #[snafu(display("payload is not a scenario bundle: {source}"))]
    Summary { source: serde_json::Error },
}

fn load_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let Some(path) = &cli.config else {
        return Ok(ClientConfig::from_env());
    };

    match &cli.profile {
        Some(profile) => {
            let mut named = ClientConfig::load_named(path).context(LoadConfigSnafu { path })?;
            named.remove(profile).context(UnknownProfileSnafu { path, profile })
        }
        None => ClientConfig::load(path).context(LoadConfigSnafu { path }),
    }
}

fn render<T: Serialize>(payload: &T, format: Format) -> Result<String, CliError> {
    match format {
        Format::Json => serde_json::to_string_pretty(payload).context(RenderJsonSnafu),
        Format::Yaml => serde_yaml::to_string(payload).context(RenderYamlSnafu),
    }
}

/// The nominal satellite count of the scenario, if the backend returned a different number.
fn unexpected_count(scenario: &ScenarioRecord, returned: usize) -> Option<u64> {
    let expected = scenario.nominal_satellite_count();
    match u64::try_from(returned) {
        Ok(returned) if returned == expected => None,
        _ => Some(expected),
    }
}

fn summarize(bundle: &ScenarioBundle) -> Result<String, CliError> {
    let (scenario, satellites) = bundle.records().context(SummarySnafu)?;

    let mut lines = vec![format!(
        "{} (#{}): {} planes x {} satellites at {} km, {} deg, from {} to {}",
        scenario.name,
        scenario.id,
        scenario.n_planes,
        scenario.n_sats_per_plane,
        scenario.alt_km,
        scenario.inc_deg,
        scenario.start_time,
        scenario.end_time
    )];

    if let Some(expected) = unexpected_count(&scenario, satellites.len()) {
        warn!(
            "scenario {} expects {expected} satellites but the backend returned {}",
            scenario.id,
            satellites.len()
        );
    }

    for (plane, members) in group_by_plane(&satellites) {
        let names = members
            .iter()
            .map(|sat| sat.stk_name.as_str())
            .collect::<Vec<_>>();
        lines.push(format!(
            "  plane {plane}: {} satellites [{}]",
            members.len(),
            names.join(", ")
        ));
    }

    Ok(lines.join("\n"))
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let config = load_config(&cli)?;
    let client = ScenarioDataClient::new(&config).context(ClientSnafu)?;

    match cli.command {
        Command::Scenarios => {
            let scenarios = client.list_scenarios().await.context(ClientSnafu)?;
            info!("{} scenarios", scenarios.len());
            render(&scenarios, cli.format)
        }
        Command::Scenario { id } => {
            let scenario = client
                .get_scenario(&ScenarioId::from(id))
                .await
                .context(ClientSnafu)?;
            render(&scenario, cli.format)
        }
        Command::Satellites { id } => {
            let satellites = client
                .list_satellites_for_scenario(&ScenarioId::from(id))
                .await
                .context(ClientSnafu)?;
            info!("{} satellites", satellites.len());
            render(&satellites, cli.format)
        }
        Command::Bundle { id, summary } => {
            let bundle = client
                .get_scenario_bundle(&ScenarioId::from(id))
                .await
                .context(ClientSnafu)?;
            if summary {
                summarize(&bundle)
            } else {
                render(&bundle, cli.format)
            }
        }
        Command::Satellite { id } => {
            let satellite = client.get_satellite(&id).await.context(ClientSnafu)?;
            render(&satellite, cli.format)
        }
        Command::AllSatellites { scenario } => {
            let scenario = scenario.map(ScenarioId::from);
            let satellites = client
                .list_satellites(scenario.as_ref())
                .await
                .context(ClientSnafu)?;
            info!("{} satellites", satellites.len());
            render(&satellites, cli.format)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }

    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        eprintln!("could not init logger");
    }

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
