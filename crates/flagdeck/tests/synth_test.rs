use assert_cmd::Command;
use predicates::prelude::*;

fn flagdeck() -> Command {
    let mut cmd = Command::cargo_bin("flagdeck").unwrap();
    // keep ambient configuration out of the tests
    for var in [
        "FLAGDECK_REGION",
        "FLAGDECK_DOMAIN_NAME",
        "FLAGDECK_HOSTED_ZONE_ID",
        "FLAGDECK_HOSTED_ZONE_NAME",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn synth_writes_template_and_prints_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("template.json");

    let mut cmd = flagdeck();
    cmd.arg("synth")
        .arg("--region")
        .arg("us-east-1")
        .arg("--output")
        .arg(&template_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ApiUrl"))
        .stdout(predicate::str::contains("UserPoolId"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&template_path).unwrap()).unwrap();
    assert_eq!(json["version"], 1);
}

#[test]
fn synth_with_custom_domain_emits_domain_url() {
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("template.json");

    let mut cmd = flagdeck();
    cmd.arg("synth")
        .arg("--domain-name")
        .arg("query.example.com")
        .arg("--hosted-zone-id")
        .arg("Z123")
        .arg("--hosted-zone-name")
        .arg("example.com")
        .arg("--output")
        .arg(&template_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("https://query.example.com"));
}

#[test]
fn partial_domain_flags_fail_before_synthesis() {
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("template.json");

    let mut cmd = flagdeck();
    cmd.arg("synth")
        .arg("--domain-name")
        .arg("query.example.com")
        .arg("--output")
        .arg(&template_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("hosted-zone-id"));

    // nothing was synthesized
    assert!(!template_path.exists());
}
