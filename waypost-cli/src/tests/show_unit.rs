//! Unit tests for `show` configuration and rendering.

use super::helpers::{StubBuilder, UNION_STATION, capture, show_config};
use super::*;
use crate::show::{ShowArgs, ShowConfig, config_from_layers_for_test, run_show_with};
use rstest::rstest;
use std::time::Duration;
use waypost_core::{EtaError, NO_LOCATION_PLACEHOLDER, TransportMode};

#[rstest]
fn converting_show_without_name_errors() {
    let err = ShowConfig::try_from(ShowArgs::default()).expect_err("missing name should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SHOW_NAME);
            assert_eq!(env, ENV_SHOW_NAME);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn show_config_fills_defaults() {
    let args = ShowArgs {
        name: Some("CN Tower".to_owned()),
        ..ShowArgs::default()
    };

    let config = ShowConfig::try_from(args).expect("config should build");

    assert_eq!(config.mode, TransportMode::Driving);
    assert_eq!(config.osrm_base_url, "http://localhost:5000");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.location, None);
}

#[rstest]
fn show_config_parses_mode_case_insensitively() {
    let args = ShowArgs {
        name: Some("CN Tower".to_owned()),
        mode: Some("WALKING".to_owned()),
        timeout_secs: Some(3),
        ..ShowArgs::default()
    };

    let config = ShowConfig::try_from(args).expect("config should build");

    assert_eq!(config.mode, TransportMode::Walking);
    assert_eq!(config.timeout, Duration::from_secs(3));
}

#[rstest]
fn unknown_mode_is_rejected() {
    let args = ShowArgs {
        name: Some("CN Tower".to_owned()),
        mode: Some("cycling".to_owned()),
        ..ShowArgs::default()
    };

    let err = ShowConfig::try_from(args).expect_err("unknown mode");
    assert!(matches!(err, CliError::InvalidMode(_)), "got {err:?}");
}

#[rstest]
fn resolved_estimate_is_rendered_in_minutes() {
    let config = show_config("CN Tower", Some(UNION_STATION), TransportMode::Driving);
    let builder = StubBuilder::answering(Duration::from_secs(420));

    let output = capture(|writer| run_show_with(&config, &builder, OutputFormat::Text, writer))
        .expect("show runs");
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.first(), Some(&"CN Tower"));
    assert!(lines.contains(&"Category: Landmark"), "{output}");
    assert!(lines.contains(&"Distance: 0.60 km"), "{output}");
    assert!(lines.contains(&"Mode: Driving"), "{output}");
    assert!(lines.contains(&"ETA: 7 min"), "{output}");
}

#[rstest]
#[case(TransportMode::Transit, StubBuilder::answering(Duration::from_secs(420)))]
#[case(TransportMode::Driving, StubBuilder::failing(EtaError::NoRoute))]
fn failed_estimates_render_unavailable(#[case] mode: TransportMode, #[case] builder: StubBuilder) {
    let config = show_config("Toronto Zoo", Some(UNION_STATION), mode);

    let output = capture(|writer| run_show_with(&config, &builder, OutputFormat::Text, writer))
        .expect("show runs");

    assert!(output.lines().any(|line| line == "ETA: N/A"), "{output}");
}

#[rstest]
fn without_location_shows_placeholder_and_no_eta() {
    let config = show_config("High Park", None, TransportMode::Walking);
    let builder = StubBuilder::answering(Duration::from_secs(60));

    let output = capture(|writer| run_show_with(&config, &builder, OutputFormat::Text, writer))
        .expect("show runs");

    assert!(output.contains(NO_LOCATION_PLACEHOLDER), "{output}");
    assert!(!output.contains("ETA:"), "{output}");
    assert!(!output.contains("Distance:"), "{output}");
}

#[rstest]
fn json_report_carries_seconds_and_label() {
    let config = show_config("cn tower", Some(UNION_STATION), TransportMode::Walking);
    let builder = StubBuilder::answering(Duration::from_secs(610));

    let output = capture(|writer| run_show_with(&config, &builder, OutputFormat::Json, writer))
        .expect("show runs");
    let report: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");

    assert_eq!(report.get("name").and_then(|v| v.as_str()), Some("CN Tower"));
    assert_eq!(
        report.get("transport_mode").and_then(|v| v.as_str()),
        Some("walking")
    );
    assert_eq!(report.get("eta").and_then(|v| v.as_str()), Some("10 min"));
    assert_eq!(report.get("eta_seconds").and_then(serde_json::Value::as_u64), Some(610));
    assert_eq!(
        report.get("distance_km").and_then(serde_json::Value::as_f64),
        Some(0.6)
    );
}

#[rstest]
fn unknown_poi_is_reported() {
    let config = show_config("Casa Loma", Some(UNION_STATION), TransportMode::Driving);
    let builder = StubBuilder::answering(Duration::from_secs(60));

    let err = capture(|writer| run_show_with(&config, &builder, OutputFormat::Text, writer))
        .expect_err("unknown POI");

    match err {
        CliError::UnknownPoi { name } => assert_eq!(name, "Casa Loma"),
        other => panic!("expected UnknownPoi, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_map_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "timeout_secs": "soon" }));

    let err = config_from_layers_for_test(composer.layers()).expect_err("invalid layer should fail");
    assert!(matches!(err, CliError::Configuration(_)), "got {err:?}");
}

#[rstest]
fn merge_layers_prefer_cli_over_environment() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({ "osrm_base_url": "http://from-file:5000", "mode": "transit" }),
        None,
    );
    composer.push_environment(json!({ "name": "High Park", "mode": "walking" }));
    composer.push_cli(json!({ "mode": "driving" }));

    let config = config_from_layers_for_test(composer.layers()).expect("layers merge");

    assert_eq!(config.name, "High Park");
    assert_eq!(config.mode, TransportMode::Driving);
    assert_eq!(config.osrm_base_url, "http://from-file:5000");
}
