use crate::{test_client, ScriptedTransport, TEST_BASE_URL};
use cc::{ClientError, Operation, ScenarioId};
use rstest::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const PATIENCE: Duration = Duration::from_secs(5);

#[rstest]
#[case("7")]
#[case("42")]
#[case("walker-72")]
#[tokio::test]
async fn bundle_uses_one_identifier(#[case] id: &str) {
    let backend = Arc::new(
        ScriptedTransport::new()
            .json(&format!("/scenarios/{id}/"), json!({"id": id, "name": "Walker"}))
            .json(
                &format!("/scenarios/{id}/satellites/"),
                json!([{"id": 2, "scenario": id}, {"id": 1, "scenario": id}]),
            ),
    );
    let client = test_client(&backend);

    let bundle = client.get_scenario_bundle(&id.into()).await.unwrap();
    assert_eq!(bundle.scenario["id"], json!(id));
    assert_eq!(
        bundle.satellites,
        vec![json!({"id": 2, "scenario": id}), json!({"id": 1, "scenario": id})]
    );

    let mut requested = backend.requested();
    requested.sort();
    assert_eq!(
        requested,
        vec![
            format!("{TEST_BASE_URL}/scenarios/{id}/"),
            format!("{TEST_BASE_URL}/scenarios/{id}/satellites/")
        ]
    );
}

#[tokio::test]
async fn bundle_requests_are_concurrent() {
    // Each request blocks until both are in flight, so a sequential bundle would never finish.
    let backend = Arc::new(
        ScriptedTransport::new()
            .json("/scenarios/7/", json!({"id": 7}))
            .json("/scenarios/7/satellites/", json!([{"id": 70}]))
            .gated(2),
    );
    let client = test_client(&backend);

    let bundle = timeout(PATIENCE, client.get_scenario_bundle(&ScenarioId::from(7_i64)))
        .await
        .expect("bundle requests were issued sequentially")
        .unwrap();

    assert_eq!(bundle.scenario, json!({"id": 7}));
    assert_eq!(bundle.satellites, vec![json!({"id": 70})]);
    assert_eq!(backend.requested().len(), 2);
}

#[tokio::test]
async fn failing_satellites_fail_the_bundle() {
    let backend = Arc::new(
        ScriptedTransport::new()
            .json("/scenarios/7/", json!({"id": 7}))
            .status("/scenarios/7/satellites/", 500, "Internal Server Error"),
    );
    let client = test_client(&backend);

    let err = client.get_scenario_bundle(&"7".into()).await.unwrap_err();
    assert!(
        matches!(
            err,
            ClientError::RemoteFetch {
                operation: Operation::ListScenarioSatellites,
                status: 500,
                ..
            }
        ),
        "{err:?}"
    );
    assert!(err.to_string().contains("Internal Server Error"));
}

#[tokio::test]
async fn failing_scenario_does_not_wait_for_satellites() {
    let backend = Arc::new(
        ScriptedTransport::new()
            .status("/scenarios/7/", 404, "Not Found")
            .hang("/scenarios/7/satellites/"),
    );
    let client = test_client(&backend);

    let err = timeout(PATIENCE, client.get_scenario_bundle(&"7".into()))
        .await
        .expect("bundle waited on the pending satellites request")
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::GetScenario));
    assert_eq!(err.status(), Some(404));
    assert_eq!(backend.requested().len(), 2, "satellites were never requested");
}

#[tokio::test]
async fn failing_satellites_do_not_wait_for_scenario() {
    let backend = Arc::new(
        ScriptedTransport::new()
            .hang("/scenarios/7/")
            .status("/scenarios/7/satellites/", 502, "Bad Gateway"),
    );
    let client = test_client(&backend);

    let err = timeout(PATIENCE, client.get_scenario_bundle(&"7".into()))
        .await
        .expect("bundle waited on the pending scenario request")
        .unwrap_err();

    assert_eq!(err.operation(), Some(Operation::ListScenarioSatellites));
    assert!(err.to_string().contains("Bad Gateway"));
}

#[tokio::test]
async fn unreachable_half_fails_the_bundle() {
    let backend = Arc::new(ScriptedTransport::new().json("/scenarios/7/", json!({"id": 7})));
    let client = test_client(&backend);

    let err = client.get_scenario_bundle(&"7".into()).await.unwrap_err();
    assert!(
        matches!(
            err,
            ClientError::Transport {
                operation: Operation::ListScenarioSatellites,
                ..
            }
        ),
        "{err:?}"
    );
}

#[tokio::test]
async fn bundle_records_decode() {
    let backend = Arc::new(
        ScriptedTransport::new()
            .json(
                "/scenarios/3/",
                json!({
                    "id": 3, "name": "Walker 53:4/2/1", "epoch": "2024-01-01T00:00:00",
                    "start_time": "2024-01-01T00:00:00", "end_time": "2024-01-02T00:00:00",
                    "alt_km": 550.0, "inc_deg": 53.0, "n_planes": 2, "n_sats_per_plane": 2,
                    "sensor_config": null, "satellites_count": 2
                }),
            )
            .json(
                "/scenarios/3/satellites/",
                json!([
                    {"id": 11, "scenario": 3, "sat_id": "11", "stk_name": "Sat11", "plane_index": 1,
                     "sat_index_in_plane": 1, "alt_km": 550.0, "sma_km": 6928.137, "ecc": 0.0,
                     "inc_deg": 53.0, "raan_deg": 0.0, "argp_deg": 0.0, "ta_deg": 0.0},
                    {"id": 21, "scenario": 3, "sat_id": "21", "stk_name": "Sat21", "plane_index": 2,
                     "sat_index_in_plane": 1, "alt_km": 550.0, "sma_km": 6928.137, "ecc": 0.0,
                     "inc_deg": 53.0, "raan_deg": 180.0, "argp_deg": 0.0, "ta_deg": 90.0}
                ]),
            ),
    );
    let client = test_client(&backend);

    let bundle = client.get_scenario_bundle(&3_i64.into()).await.unwrap();
    let (scenario, satellites) = bundle.records().unwrap();
    assert_eq!(scenario.name, "Walker 53:4/2/1");
    assert_eq!(scenario.sensor_config, None);
    assert_eq!(satellites.len(), 2);
    assert!(satellites.iter().all(|sat| sat.scenario == scenario.id));
    assert_eq!(satellites[1].raan_deg, 180.0);
}
