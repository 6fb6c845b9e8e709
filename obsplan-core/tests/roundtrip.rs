//! Mapping and document roundtrip tests for `Project`.
//!
//! Each `#[case]` is isolated; no shared state.

use std::sync::Arc;

use assert_fs::prelude::*;
use obsplan_core::{
    document::{decode_project, encode_project},
    DocumentFormat, NullObserver, Observation, ObservationType, Project, ProjectError,
};
use predicates::prelude::predicate;
use rstest::rstest;
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build(name: &str, observations: Vec<Observation>) -> Project {
    Project::with_observer(name, observations, Arc::new(NullObserver)).expect("project")
}

fn minimal_project() -> Project {
    build("Alpha", vec![])
}

fn full_project() -> Project {
    let mut calibrated = Observation::new("OBS1", true);
    calibrated
        .set_calculated_data("uv_coverage", json!([[0.5, 1.25], [2.0, -3.5]]))
        .unwrap();
    calibrated.set_calculated_data("snr", json!(41.5)).unwrap();
    build(
        "Alpha",
        vec![
            calibrated,
            Observation::new("OBS2", false).with_type(ObservationType::SingleDish),
            Observation::new("OBS3", true),
        ],
    )
}

fn unicode_project() -> Project {
    build(
        "アプリ-проект-项目",
        vec![Observation::new("観測-🚀 <>&\"'", true)],
    )
}

fn duplicate_codes_project() -> Project {
    build(
        "Dupes",
        vec![
            Observation::new("SAME", true),
            Observation::new("SAME", false),
            Observation::new("SAME", true),
        ],
    )
}

// ---------------------------------------------------------------------------
// Parameterised roundtrip test
// ---------------------------------------------------------------------------

#[rstest]
#[case("minimal", minimal_project())]
#[case("all_fields", full_project())]
#[case("unicode_strings", unicode_project())]
#[case("duplicate_codes", duplicate_codes_project())]
fn mapping_roundtrip(#[case] label: &str, #[case] project: Project) {
    let value = project.to_value();
    let back: Project = Project::from_value(&value)
        .unwrap_or_else(|e| panic!("[{label}] from_value failed: {e}"));
    assert_eq!(project.get_name(), back.get_name(), "[{label}] name");
    assert_eq!(project.len(), back.len(), "[{label}] observation count");
    for (orig, got) in project.iter().zip(back.iter()) {
        assert_eq!(orig, got, "[{label}] observation");
    }
}

#[rstest]
#[case(DocumentFormat::Json)]
#[case(DocumentFormat::Yaml)]
fn document_roundtrip(#[case] format: DocumentFormat) {
    let project = full_project();
    let text = encode_project(&project, format).expect("encode");
    let back: Project = decode_project(&text, format).expect("decode");
    assert_eq!(project, back, "[{format}]");
}

#[test]
fn serde_impls_use_the_mapping() {
    let project = full_project();
    let json = serde_json::to_value(&project).expect("serialize");
    assert_eq!(json, project.to_value());
    let back: Project = serde_json::from_value(json).expect("deserialize");
    assert_eq!(project, back);
}

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

#[test]
fn mapping_has_exactly_name_and_observations() {
    let value = full_project().to_value();
    let object = value.as_object().expect("mapping");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["name", "observations"]);
    let codes: Vec<&str> = value["observations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["observation_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, ["OBS1", "OBS2", "OBS3"]);
}

#[test]
fn json_and_yaml_documents_describe_the_same_project() {
    let json_text = r#"{
        "name": "Alpha",
        "observations": [
            {"observation_code": "OBS1", "observation_type": "VLBI", "isactive": true},
            {"observation_code": "OBS2", "observation_type": "SINGLE_DISH", "isactive": false}
        ]
    }"#;
    let yaml_text = "\
name: Alpha
observations:
  - observation_code: OBS1
    observation_type: VLBI
    isactive: true
  - observation_code: OBS2
    observation_type: SINGLE_DISH
    isactive: false
";
    let from_json: Project = decode_project(json_text, DocumentFormat::Json).unwrap();
    let from_yaml: Project = decode_project(yaml_text, DocumentFormat::Yaml).unwrap();
    assert_eq!(from_json, from_yaml);
}

// ---------------------------------------------------------------------------
// Reconstruction failures
// ---------------------------------------------------------------------------

#[rstest]
#[case(json!({ "observations": [] }), "name")]
#[case(json!({ "name": "Alpha" }), "observations")]
#[case(json!(["not", "a", "mapping"]), "name")]
fn missing_keys_are_reported(#[case] value: serde_json::Value, #[case] field: &str) {
    let err = Project::<Observation>::from_value(&value).unwrap_err();
    match err {
        ProjectError::MissingField { field: got } => assert_eq!(got, field),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn wrong_shapes_are_malformed() {
    let err = Project::<Observation>::from_value(&json!({ "name": 7, "observations": [] }))
        .unwrap_err();
    assert!(matches!(err, ProjectError::Malformed { field: "name", .. }));

    let err = Project::<Observation>::from_value(&json!({ "name": "A", "observations": {} }))
        .unwrap_err();
    assert!(matches!(err, ProjectError::Malformed { field: "observations", .. }));
}

#[test]
fn observation_errors_propagate_unchanged() {
    let value = json!({
        "name": "Alpha",
        "observations": [{ "observation_code": "OBS1" }, { "isactive": true }],
    });
    let err = Project::<Observation>::from_value(&value).unwrap_err();
    assert!(matches!(err, ProjectError::MissingField { field: "observation_code" }));
}

#[test]
fn empty_name_in_document_is_a_validation_error() {
    let err = Project::<Observation>::from_value(&json!({ "name": "", "observations": [] }))
        .unwrap_err();
    assert!(err.is_validation());
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn yaml_file_written_from_project_reads_back() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("alpha.yaml");
    let format = DocumentFormat::from_path(file.path());
    file.write_str(&encode_project(&full_project(), format).unwrap())
        .expect("write");

    file.assert(predicate::str::contains("observation_code: OBS2"));
    let text = std::fs::read_to_string(file.path()).expect("read");
    let back: Project = decode_project(&text, format).expect("decode");
    assert_eq!(back, full_project());
}
