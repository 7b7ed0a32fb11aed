use assert_cmd::cargo::{self};
use predicates::prelude::*;
use predicates::str::contains;

const SIGNUP: &str = r#"{
    "submitLabel": "Sign up",
    "fields": [
        { "name": "name", "label": "Name", "required": true },
        { "kind": "select", "name": "plan", "placeholder": "Pick a plan", "options": ["free", "pro"], "required": true },
        { "kind": "checkbox", "name": "terms", "label": "I agree", "required": true }
    ]
}"#;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("formui");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("formui"))
        .stdout(contains("submit"));
}

#[test]
fn prints_definition_schema() {
    let mut cmd = cargo::cargo_bin_cmd!("formui");
    cmd.arg("schema")
        .assert()
        .success()
        .stdout(contains("\"fields\""))
        .stdout(contains("submitLabel"));
}

#[test]
fn renders_inline_definition() {
    let mut cmd = cargo::cargo_bin_cmd!("formui");
    cmd.args(["render", SIGNUP])
        .assert()
        .success()
        .stdout(contains("<form class=\"Form\" novalidate>"))
        .stdout(contains("FormField InputField"))
        .stdout(contains("<option value=\"\" selected>Pick a plan</option>"))
        .stdout(contains("Sign up</button>"));
}

#[test]
fn renders_node_tree() {
    let mut cmd = cargo::cargo_bin_cmd!("formui");
    cmd.args(["render", "--tree", SIGNUP])
        .assert()
        .success()
        .stdout(contains("\"form\""))
        .stdout(contains("<form").not());
}

#[test]
fn submits_filled_form() {
    let mut cmd = cargo::cargo_bin_cmd!("formui");
    cmd.args([
        "submit", SIGNUP, "-s", "name=Ann", "-s", "plan=pro", "-s", "terms=true", "--no-pretty",
    ])
    .assert()
    .success()
    .stdout(contains(r#"{"name":"Ann","plan":"pro","terms":"on"}"#));
}

#[test]
fn submits_urlencoded() {
    let mut cmd = cargo::cargo_bin_cmd!("formui");
    cmd.args([
        "submit",
        SIGNUP,
        "--set",
        "name=Ann Lee",
        "--set",
        "plan=free",
        "--set",
        "terms=on",
        "--urlencoded",
    ])
    .assert()
    .success()
    .stdout(contains("name=Ann+Lee&plan=free&terms=on"));
}

#[test]
fn rejected_submission_lists_errors() {
    let mut cmd = cargo::cargo_bin_cmd!("formui");
    cmd.args(["submit", SIGNUP, "-s", "name=Ann"])
        .assert()
        .failure()
        .stderr(contains("plan: Please select an item in the list."))
        .stderr(contains("terms: Please check this box if you want to proceed."))
        .stderr(contains("2 invalid field(s)"));
}

#[test]
fn reports_invalid_definitions() {
    let mut cmd = cargo::cargo_bin_cmd!("formui");
    cmd.args(["render", r#"{"fields": [{"name": "n", "kind": "checkbox", "options": ["a"]}]}"#])
        .assert()
        .failure()
        .stderr(contains("input (definition)"))
        .stderr(contains("options"));
}

#[test]
fn reads_definition_from_stdin() {
    let mut cmd = cargo::cargo_bin_cmd!("formui");
    cmd.args(["submit", "-", "-s", "name=Bo"])
        .write_stdin(r#"{"fields": [{"name": "name"}]}"#)
        .assert()
        .success()
        .stdout(contains("\"name\": \"Bo\""));
}
