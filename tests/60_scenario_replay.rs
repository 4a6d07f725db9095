mod common;

use std::path::Path;

use anyhow::Result;

use pistac_gate::script::Scenario;
use pistac_gate::{GateMode, MarkerConfig};

#[test]
fn course_page_scenario() -> Result<()> {
    let scenario = Scenario::load(Path::new("tests/fixtures/course_page.yaml"))?;
    let report = scenario.run(&MarkerConfig::default(), &common::copy())?;
    let steps = &report.steps;
    assert_eq!(report.name, "course page");
    assert_eq!(steps.len(), 8);

    assert!(steps[0].suppressed);
    assert_eq!(steps[0].prompt.message, "Sign in to enroll in this course");
    assert!(!steps[1].prompt.is_open);

    assert!(steps[2].suppressed);
    assert_eq!(steps[2].prompt.message, "Sign in to use this feature");

    assert!(!steps[3].suppressed);
    assert_eq!(steps[3].handlers, vec!["preview".to_string()]);
    assert!(steps[3].prompt.is_open);

    assert_eq!(steps[4].sign_in_requests, 1);

    assert_eq!(steps[5].mode, GateMode::Authenticated);
    assert!(!steps[5].prompt.is_open);

    assert!(!steps[6].suppressed);
    assert_eq!(steps[6].handlers, vec!["bookmark".to_string()]);
    assert_eq!(steps[7].handlers, vec!["syllabus".to_string()]);

    assert_eq!(report.suppressed_count(), 2);
    Ok(())
}

#[test]
fn report_serializes_to_json() -> Result<()> {
    let scenario = Scenario::load(Path::new("tests/fixtures/course_page.yaml"))?;
    let report = scenario.run(&MarkerConfig::default(), &common::copy())?;
    let json = serde_json::to_value(&report)?;
    assert_eq!(json["steps"][0]["classification"]["classification"], "restricted");
    assert_eq!(json["steps"][0]["classification"]["kind"], "primary_action");
    assert_eq!(json["steps"][5]["mode"], "authenticated");
    Ok(())
}
