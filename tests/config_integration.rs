//! Integration tests for splice configs
//!
//! Tests config loading, validation and running jobs against a workspace

use block_splice::config::{
    load_from_path, load_from_str, run_config, ConfigError, RunError, RunMode, ValidationIssue,
};
use block_splice::{LiteralMode, Outcome};
use std::fs;
use tempfile::TempDir;

/// Helper to create a temp dir with a donor and two targets
fn setup_test_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src/services")).unwrap();

    fs::write(
        dir.path().join("src/services/new_functions.js"),
        r#"async function createOrder(userId, trainId) {
  const order = { userId, trainId };
  try {
    await db.run('INSERT INTO orders VALUES (?, ?)', [userId, trainId]);
  } catch (err) {
    throw { code: 500, message: err.message };
  }
  return order;
}

async function cancelOrder(orderId) {
  await db.run('UPDATE orders SET status = ? WHERE id = ?', ['cancelled', orderId]);
  return { orderId };
}
"#,
    )
    .unwrap();

    fs::write(
        dir.path().join("src/services/orderService.js"),
        r#"const db = require('../database');

async function createOrder(userId, trainId) {
  return null;
}

async function cancelOrder(orderId) {
  return null;
}
"#,
    )
    .unwrap();

    fs::write(
        dir.path().join("src/services/adminService.js"),
        r#"async function cancelOrder(orderId) {
  throw new Error('not implemented');
}
"#,
    )
    .unwrap();

    dir
}

#[test]
fn test_load_config_basic() {
    let toml = r#"
[meta]
name = "order-service"
description = "Replace order functions"
workspace_relative = true

[[jobs]]
id = "orders"
donor = "src/services/new_functions.js"
target = "src/services/orderService.js"
blocks = ["createOrder", "cancelOrder"]
"#;

    let config = load_from_str(toml).unwrap();
    assert_eq!(config.meta.name, "order-service");
    assert_eq!(
        config.meta.description.as_deref(),
        Some("Replace order functions")
    );
    assert!(config.meta.workspace_relative);
    assert_eq!(config.jobs.len(), 1);
    assert_eq!(config.jobs[0].blocks, vec!["createOrder", "cancelOrder"]);
    assert_eq!(config.scan.literals, LiteralMode::Naive);
}

#[test]
fn test_invalid_block_name_rejected() {
    let toml = r#"
[[jobs]]
id = "orders"
donor = "a.js"
target = "b.js"
blocks = ["create-order"]
"#;

    let err = load_from_str(toml).unwrap_err();
    let ConfigError::Validation { source, .. } = &err else {
        panic!("expected validation error, got {err}");
    };
    assert_eq!(
        source.issues,
        vec![ValidationIssue::InvalidBlockName {
            job_id: "orders".to_string(),
            name: "create-order".to_string(),
        }]
    );
    assert!(err
        .to_string()
        .contains("job 'orders' has invalid block name 'create-order'"));
}

#[test]
fn test_run_multiple_jobs() {
    let workspace = setup_test_workspace();
    let config_path = workspace.path().join("splices.toml");
    fs::write(
        &config_path,
        r#"
[meta]
workspace_relative = true

[[jobs]]
id = "orders"
donor = "src/services/new_functions.js"
target = "src/services/orderService.js"
blocks = ["createOrder", "cancelOrder"]

[[jobs]]
id = "admin"
donor = "src/services/new_functions.js"
target = "src/services/adminService.js"
blocks = ["cancelOrder", "createOrder"]
"#,
    )
    .unwrap();

    let config = load_from_path(&config_path).unwrap();
    let results = run_config(&config, workspace.path(), RunMode::Write);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, "orders");
    assert_eq!(results[1].0, "admin");

    let orders = results[0].1.as_ref().unwrap();
    assert!(orders.report.is_success());
    assert!(orders.written);

    let admin = results[1].1.as_ref().unwrap();
    assert_eq!(admin.report.outcome("cancelOrder"), Some(Outcome::Applied));
    assert_eq!(admin.report.outcome("createOrder"), Some(Outcome::ApplyFailed));
    assert!(admin.written);

    let order_service =
        fs::read_to_string(workspace.path().join("src/services/orderService.js")).unwrap();
    assert!(order_service.starts_with("const db = require('../database');\n\n"));
    assert!(order_service.contains("throw { code: 500, message: err.message };"));
    assert!(order_service.contains("['cancelled', orderId]"));

    let admin_service =
        fs::read_to_string(workspace.path().join("src/services/adminService.js")).unwrap();
    assert!(!admin_service.contains("not implemented"));
}

#[test]
fn test_missing_target_does_not_stop_later_jobs() {
    let workspace = setup_test_workspace();
    let config = load_from_str(
        r#"
[meta]
workspace_relative = true

[[jobs]]
id = "ghost"
donor = "src/services/new_functions.js"
target = "src/services/ghost.js"
blocks = ["createOrder"]

[[jobs]]
id = "orders"
donor = "src/services/new_functions.js"
target = "src/services/orderService.js"
blocks = ["createOrder"]
"#,
    )
    .unwrap();

    let results = run_config(&config, workspace.path(), RunMode::Write);

    assert!(matches!(results[0].1, Err(RunError::Read { .. })));
    assert!(results[1].1.as_ref().unwrap().written);
}

#[test]
fn test_aware_scan_from_config() {
    let workspace = setup_test_workspace();
    fs::write(
        workspace.path().join("donor.js"),
        "function render() { return \"}\"; }\n",
    )
    .unwrap();
    fs::write(
        workspace.path().join("view.js"),
        "function render() {\n  // legacy {\n  return '';\n}\nrender();\n",
    )
    .unwrap();

    let config = load_from_str(
        r#"
[meta]
workspace_relative = true

[scan]
literals = "aware"

[[jobs]]
id = "view"
donor = "donor.js"
target = "view.js"
blocks = ["render"]
"#,
    )
    .unwrap();

    let results = run_config(&config, workspace.path(), RunMode::Write);
    assert!(results[0].1.as_ref().unwrap().report.is_success());

    let view = fs::read_to_string(workspace.path().join("view.js")).unwrap();
    assert_eq!(view, "function render() { return \"}\"; }\nrender();\n");
}

#[test]
fn test_check_mode_reports_without_writing() {
    let workspace = setup_test_workspace();
    let target = workspace.path().join("src/services/orderService.js");
    let before = fs::read_to_string(&target).unwrap();

    let config = load_from_str(
        r#"
[meta]
workspace_relative = true

[[jobs]]
id = "orders"
donor = "src/services/new_functions.js"
target = "src/services/orderService.js"
blocks = ["createOrder"]
"#,
    )
    .unwrap();

    let results = run_config(&config, workspace.path(), RunMode::Check);
    let job = results[0].1.as_ref().unwrap();

    assert!(job.changed());
    assert!(!job.written);
    assert_eq!(fs::read_to_string(&target).unwrap(), before);
}
