#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn specgate(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("specgate").unwrap();
    cmd.current_dir(dir.path())
        .env("SPECGATE_ROOT", dir.path())
        .env_remove("SPECGATE_CATALOG")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Every spec section present, but only 45 lines long.
fn short_complete_spec() -> String {
    let mut lines: Vec<String> = [
        "# Feature: Team Invitations",
        "",
        "## Overview",
        "Team owners can invite colleagues by email so workspaces grow without manual setup.",
        "",
        "## User Stories",
        "- As a team owner, I want to invite a colleague by email so they can join.",
        "- As an invitee, I want a single link that creates my account and joins the team.",
        "",
        "## Requirements",
        "- The system sends an invitation email containing a one-time link.",
        "- Links expire after seven days.",
        "- Owners can revoke pending invitations.",
        "",
        "## Acceptance Criteria",
        "- Given a pending invitation, when the invitee opens the link, then they join.",
        "- Given an expired link, when it is opened, then an explanatory error is shown.",
        "",
        "## Non-Functional Requirements",
        "- Invitation emails are sent within one minute.",
        "",
        "## Scope",
        "In scope: email invitations for existing teams.",
        "Out of scope: bulk import and SSO provisioning.",
        "",
        "## Notes",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    let mut i = 1;
    while lines.len() < 45 {
        lines.push(format!("- Note {i}: captured during the design review."));
        i += 1;
    }
    lines.join("\n")
}

fn task_list(with_checkboxes: bool) -> String {
    let bullet = if with_checkboxes { "- [ ]" } else { "-" };
    [
        "# Tasks: Team Invitations".to_string(),
        String::new(),
        "## Phase 1: Setup".to_string(),
        format!("{bullet} T001 Create invitation model in src/models/invitation.rs"),
        format!("{bullet} T002 [P] Add migration in migrations/002_invitations.sql"),
        String::new(),
        "## Phase 2: Core".to_string(),
        format!("{bullet} T003 Implement invite endpoint in src/api/invite.rs (depends on T001)"),
        format!("{bullet} T004 Send invitation email from src/mail/invite.rs"),
        format!("{bullet} T005 Expire links after seven days in src/jobs/expire.rs"),
    ]
    .join("\n")
}

// ---------------------------------------------------------------------------
// validate-spec / validate-plan / validate-tasks
// ---------------------------------------------------------------------------

#[test]
fn short_spec_passes_with_warning() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "spec.md", &short_complete_spec());

    specgate(&dir)
        .arg("validate-spec")
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "specification validation: PASS (score 90/100)",
        ))
        .stdout(predicate::str::contains("reasonable_length"));
}

#[test]
fn short_spec_json_report() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "spec.md", &short_complete_spec());

    let output = specgate(&dir)
        .args(["--json", "validate-spec", "--file"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let v = json_stdout(&output);
    assert_eq!(v["status"], "pass");
    assert_eq!(v["score"], 90);
    assert_eq!(v["passed"], 9);
    assert_eq!(v["failed"], 0);
    assert_eq!(v["warnings"], 1);
    assert_eq!(v["checks"].as_array().unwrap().len(), 10);
    assert_eq!(v["recommendations"].as_array().unwrap().len(), 1);
}

#[test]
fn strict_mode_exits_two_on_warning() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "spec.md", &short_complete_spec());

    specgate(&dir)
        .args(["--strict", "validate-spec"])
        .arg(&path)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("WARN"));
}

#[test]
fn strict_mode_respects_warn_tolerance() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".specgate")).unwrap();
    write(&dir, ".specgate/config.yaml", "validation:\n  warn_tolerance: 1\n");
    let path = write(&dir, "spec.md", &short_complete_spec());

    specgate(&dir)
        .args(["--strict", "validate-spec"])
        .arg(&path)
        .assert()
        .code(0);
}

#[test]
fn empty_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "empty.md", "  \n\n");

    specgate(&dir)
        .arg("validate-plan")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("input is empty"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    specgate(&dir)
        .args(["validate-spec", "nope.md"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("input not found"));
}

#[test]
fn task_list_without_checkboxes_fails() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "tasks.md", &task_list(false));

    let output = specgate(&dir)
        .args(["-j", "validate-tasks"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let v = json_stdout(&output);
    assert_eq!(v["status"], "fail");
    let checks = v["checks"].as_array().unwrap();
    let boxes = checks
        .iter()
        .find(|c| c["id"] == "uses_checkboxes")
        .unwrap();
    assert_eq!(boxes["passed"], false);
    assert_eq!(boxes["severity"], "required");
    assert!(v["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r.as_str().unwrap().starts_with("BLOCKING: ")));
}

#[test]
fn complete_task_list_passes() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "tasks.md", &task_list(true));

    specgate(&dir)
        .args(["--strict", "validate-tasks"])
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("task list validation: PASS (score 100/100)"));
}

#[test]
fn inline_text_input() {
    let dir = TempDir::new().unwrap();
    specgate(&dir)
        .args(["validate-spec", "--text", "# Tiny spec\n\nNothing else."])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL"));
}

#[test]
fn text_flag_takes_precedence_over_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "spec.md", &short_complete_spec());

    specgate(&dir)
        .args(["validate-spec", "--text", "# Tiny spec", "--file"])
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL"));
}

#[test]
fn stdin_input() {
    let dir = TempDir::new().unwrap();
    specgate(&dir)
        .args(["validate-spec", "-"])
        .write_stdin(short_complete_spec())
        .assert()
        .code(0);
}

#[test]
fn verbose_lists_passing_checks() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "spec.md", &short_complete_spec());

    specgate(&dir)
        .args(["--verbose", "validate-spec"])
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("has_overview"));
}

// ---------------------------------------------------------------------------
// detect-domain
// ---------------------------------------------------------------------------

#[test]
fn detect_domain_multi_agent_json() {
    let dir = TempDir::new().unwrap();
    let output = specgate(&dir)
        .args([
            "--json",
            "detect-domain",
            "--text",
            "Build a REST endpoint that writes to the Postgres schema, and add a test.",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));

    let v = json_stdout(&output);
    assert_eq!(v["strategy"], "multi-agent");
    assert_eq!(
        v["suggested_agents"],
        serde_json::json!(["orchestrator", "backend-agent", "database-agent"])
    );
    let domains = v["domains"].as_array().unwrap();
    assert_eq!(domains.len(), 3);
    let testing = domains.iter().find(|d| d["domain"] == "testing").unwrap();
    assert_eq!(testing["score"], 1);
}

#[test]
fn detect_domain_no_matches() {
    let dir = TempDir::new().unwrap();
    specgate(&dir)
        .args(["detect-domain", "--text", "The quick brown fox."])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Strategy: none"))
        .stdout(predicate::str::contains("No domain keywords matched."));
}

#[test]
fn detect_domain_uses_configured_orchestrator() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".specgate")).unwrap();
    write(
        &dir,
        ".specgate/config.yaml",
        "delegation:\n  orchestrator_agent: conductor\n",
    );

    let output = specgate(&dir)
        .args([
            "-j",
            "detect-domain",
            "--text",
            "REST endpoint writing to the Postgres schema",
        ])
        .output()
        .unwrap();
    let v = json_stdout(&output);
    assert_eq!(v["suggested_agents"][0], "conductor");
}

// ---------------------------------------------------------------------------
// validate --type (batch)
// ---------------------------------------------------------------------------

#[test]
fn batch_exit_code_is_the_worst_document() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.md", &task_list(true));
    let bad = write(&dir, "bad.md", &task_list(false));

    specgate(&dir)
        .args(["validate", "--type", "tasks"])
        .arg(&good)
        .assert()
        .code(0);

    specgate(&dir)
        .args(["validate", "--type", "tasks"])
        .arg(&good)
        .arg(&bad)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("2 document(s) checked"));
}

#[test]
fn batch_continues_past_unreadable_documents() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.md", &task_list(true));

    let output = specgate(&dir)
        .args(["--json", "validate", "--type", "tasks", "missing.md"])
        .arg(&good)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let v = json_stdout(&output);
    let entries = v.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0]["error"]
        .as_str()
        .unwrap()
        .contains("input not found"));
    assert_eq!(entries[1]["report"]["status"], "pass");
}

#[test]
fn batch_rejects_unknown_type() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "doc.md", "# Doc\n");
    specgate(&dir)
        .args(["validate", "--type", "novel"])
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn freeform_has_no_catalog_entry() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "doc.md", "# Doc\n");
    specgate(&dir)
        .args(["validate", "--type", "freeform"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no catalog entry"));
}

// ---------------------------------------------------------------------------
// catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_init_then_show() {
    let dir = TempDir::new().unwrap();
    specgate(&dir).args(["catalog", "init"]).assert().success();
    assert!(dir.path().join(".specgate/catalog.yaml").exists());

    // Second init leaves the file alone.
    specgate(&dir)
        .args(["catalog", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let output = specgate(&dir)
        .args(["--json", "catalog", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let v = json_stdout(&output);
    assert_eq!(v["orchestrator_agent"], "orchestrator");
    assert_eq!(v["domains"].as_array().unwrap().len(), 8);
}

#[test]
fn catalog_list_shows_check_ids() {
    let dir = TempDir::new().unwrap();
    specgate(&dir)
        .args(["catalog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uses_checkboxes"))
        .stdout(predicate::str::contains("database-agent"));
}

#[test]
fn project_catalog_is_used() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".specgate")).unwrap();
    write(
        &dir,
        ".specgate/catalog.yaml",
        "orchestrator_agent: lead\n\
         documents:\n\
         \x20 spec:\n\
         \x20   - id: mentions_goal\n\
         \x20     severity: required\n\
         \x20     description: Spec states a goal\n\
         \x20     remediation: Add a Goal section\n\
         \x20     predicate:\n\
         \x20       kind: any_of\n\
         \x20       patterns: ['\\bgoal\\b']\n",
    );

    let output = specgate(&dir)
        .args(["-j", "validate-spec", "--text", "Our goal is speed."])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let v = json_stdout(&output);
    assert_eq!(v["total"], 1);
    assert_eq!(v["score"], 100);
}

#[test]
fn invalid_catalog_pattern_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let catalog = write(
        &dir,
        "broken.yaml",
        "documents:\n\
         \x20 spec:\n\
         \x20   - id: broken\n\
         \x20     severity: required\n\
         \x20     description: Broken pattern\n\
         \x20     remediation: Fix it\n\
         \x20     predicate:\n\
         \x20       kind: any_of\n\
         \x20       patterns: ['(unclosed']\n",
    );

    specgate(&dir)
        .arg("--catalog")
        .arg(&catalog)
        .args(["validate-spec", "--text", "# Spec"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("(unclosed"));
}

#[test]
fn empty_check_list_in_project_catalog_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".specgate")).unwrap();
    write(&dir, ".specgate/catalog.yaml", "documents:\n  plan: []\n");

    specgate(&dir)
        .args(["validate-spec", "--text", "# Spec"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("catalog check list for 'plan' is empty"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_init_and_validate() {
    let dir = TempDir::new().unwrap();
    specgate(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join(".specgate/config.yaml").exists());

    specgate(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".specgate")).unwrap();
    write(
        &dir,
        ".specgate/config.yaml",
        "delegation:\n  significance_threshold: 0\n",
    );

    specgate(&dir)
        .args(["config", "validate"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[error]"));
}

#[test]
fn config_show_applies_defaults() {
    let dir = TempDir::new().unwrap();
    let output = specgate(&dir)
        .args(["--json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let v = json_stdout(&output);
    assert_eq!(v["delegation"]["significance_threshold"], 2);
    assert_eq!(v["validation"]["warn_tolerance"], 0);
}
