use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn habitual_cmd(tmp: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_habitual"));
    cmd.current_dir(tmp.path())
        .env_remove("HABITUAL_CONFIG")
        .env_remove("HABITUAL_DB")
        .arg("--db")
        .arg(tmp.path().join("habitual.db"));
    cmd
}

fn run(tmp: &TempDir, args: &[&str]) -> Output {
    habitual_cmd(tmp).args(args).output().unwrap()
}

fn run_json(tmp: &TempDir, args: &[&str]) -> Value {
    let output = run(tmp, args);
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

#[test]
fn test_database_created_on_first_command() {
    let tmp = TempDir::new().unwrap();

    let output = run(&tmp, &["habit", "list"]);

    assert!(output.status.success());
    assert!(tmp.path().join("habitual.db").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No habits found"));
}

#[test]
fn test_add_and_get_habit() {
    let tmp = TempDir::new().unwrap();

    let habit = run_json(
        &tmp,
        &[
            "habit",
            "add",
            "Drink water",
            "--frequency=daily",
            "--target=8",
            "--json",
        ],
    );
    assert_eq!(habit["name"], "Drink water");
    assert_eq!(habit["target_count"], 8);
    assert_eq!(habit["is_active"], true);

    let id = id_of(&habit);
    let fetched = run_json(&tmp, &["habit", "get", &id, "--json"]);
    assert_eq!(fetched, habit);

    // Unique prefix resolves to the same habit
    let output = run(&tmp, &["habit", "get", &id[..6]]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Drink water"));
    assert!(stdout.contains("frequency:   daily (target 8)"));
}

#[test]
fn test_add_habit_empty_name_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(&tmp, &["habit", "add", "  "]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid input"));
}

#[test]
fn test_get_unknown_habit_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(&tmp, &["habit", "get", "7c9e6679-7425-40de-944b-e07fc1f90ae7"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("habit not found"));
}

#[test]
fn test_habit_list_sorted_by_name() {
    let tmp = TempDir::new().unwrap();

    run_json(&tmp, &["habit", "add", "Stretch", "--json"]);
    run_json(&tmp, &["habit", "add", "Meditate", "--json"]);
    run_json(&tmp, &["habit", "add", "Read", "--json"]);

    let list = run_json(&tmp, &["habit", "list", "--json"]);
    let names: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Meditate", "Read", "Stretch"]);
}

#[test]
fn test_update_habit_changes_only_given_fields() {
    let tmp = TempDir::new().unwrap();

    let habit = run_json(&tmp, &["habit", "add", "Run", "-d", "5k", "--json"]);
    let id = id_of(&habit);

    let updated = run_json(
        &tmp,
        &["habit", "update", &id, "--target=3", "--active=false", "--json"],
    );

    assert_eq!(updated["name"], "Run");
    assert_eq!(updated["description"], "5k");
    assert_eq!(updated["target_count"], 3);
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["created_at"], habit["created_at"]);
}

#[test]
fn test_complete_inactive_habit_fails_but_log_succeeds() {
    let tmp = TempDir::new().unwrap();

    let habit = run_json(&tmp, &["habit", "add", "Floss", "--inactive", "--json"]);
    let id = id_of(&habit);

    let output = run(&tmp, &["habit", "complete", &id]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("inactive habit"));

    let entry = run_json(&tmp, &["habit", "log", &id, "--note=late", "--json"]);
    assert_eq!(entry["habit_id"], habit["id"]);
    assert_eq!(entry["note"], "late");

    let entries = run_json(&tmp, &["habit", "entries", &id, "--json"]);
    assert_eq!(entries.as_array().unwrap().len(), 1);
}

#[test]
fn test_complete_active_habit_records_entry() {
    let tmp = TempDir::new().unwrap();

    let habit = run_json(&tmp, &["habit", "add", "Walk", "--json"]);
    let id = id_of(&habit);

    let output = run(&tmp, &["habit", "complete", &id]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Completed Walk"));

    run_json(&tmp, &["habit", "complete", &id, "--json"]);

    let entries = run_json(&tmp, &["habit", "entries", &id, "--json"]);
    assert_eq!(entries.as_array().unwrap().len(), 2);
}

#[test]
fn test_duplicate_tag_name_fails() {
    let tmp = TempDir::new().unwrap();

    run_json(&tmp, &["tag", "add", "health", "--json"]);

    let output = run(&tmp, &["tag", "add", "health"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"));

    // Names are case sensitive
    run_json(&tmp, &["tag", "add", "Health", "--json"]);
    let tags = run_json(&tmp, &["tag", "list", "--json"]);
    assert_eq!(tags.as_array().unwrap().len(), 2);
}

#[test]
fn test_tagging_workflow() {
    let tmp = TempDir::new().unwrap();

    let water = id_of(&run_json(&tmp, &["habit", "add", "Drink water", "--json"]));
    let run_habit = id_of(&run_json(&tmp, &["habit", "add", "Run", "--json"]));
    let health = id_of(&run_json(
        &tmp,
        &["tag", "add", "health", "--color=#22c55e", "--json"],
    ));

    assert!(run(&tmp, &["habit", "tag", &water, &health]).status.success());
    assert!(run(&tmp, &["habit", "tag", &run_habit, &health]).status.success());

    // Second attach of the same pair is rejected
    let output = run(&tmp, &["habit", "tag", &water, &health]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already attached"));

    let tagged = run_json(&tmp, &["tag", "habits", &health, "--json"]);
    let names: Vec<_> = tagged
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Drink water", "Run"]);

    let filtered = run_json(&tmp, &["habit", "list", "--tag", &health, "--json"]);
    assert_eq!(filtered, tagged);

    let tags = run_json(&tmp, &["habit", "tags", &water, "--json"]);
    assert_eq!(tags[0]["name"], "health");

    assert!(run(&tmp, &["habit", "untag", &water, &health]).status.success());
    let tagged = run_json(&tmp, &["tag", "habits", &health, "--json"]);
    assert_eq!(tagged.as_array().unwrap().len(), 1);

    // Detaching a pair that is not attached fails
    let output = run(&tmp, &["habit", "untag", &water, &health]);
    assert!(!output.status.success());
}

#[test]
fn test_delete_tag_detaches_from_habits() {
    let tmp = TempDir::new().unwrap();

    let habit = id_of(&run_json(&tmp, &["habit", "add", "Read", "--json"]));
    let tag = id_of(&run_json(&tmp, &["tag", "add", "mind", "--json"]));
    assert!(run(&tmp, &["habit", "tag", &habit, &tag]).status.success());

    let output = run(&tmp, &["tag", "delete", &tag]);
    assert!(output.status.success());

    let tags = run_json(&tmp, &["habit", "tags", &habit, "--json"]);
    assert!(tags.as_array().unwrap().is_empty());
}

#[test]
fn test_delete_habit_removes_entries() {
    let tmp = TempDir::new().unwrap();

    let id = id_of(&run_json(&tmp, &["habit", "add", "Journal", "--json"]));
    run_json(&tmp, &["habit", "log", &id, "--json"]);

    let output = run(&tmp, &["habit", "delete", &id]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted habit"));

    let output = run(&tmp, &["habit", "entries", &id]);
    assert!(!output.status.success());

    let list = run_json(&tmp, &["habit", "list", "--json"]);
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn test_rename_tag_to_existing_name_fails() {
    let tmp = TempDir::new().unwrap();

    run_json(&tmp, &["tag", "add", "morning", "--json"]);
    let evening = id_of(&run_json(&tmp, &["tag", "add", "evening", "--json"]));

    let output = run(&tmp, &["tag", "update", &evening, "--name=morning"]);
    assert!(!output.status.success());

    let renamed = run_json(
        &tmp,
        &["tag", "update", &evening, "--name=night", "--json"],
    );
    assert_eq!(renamed["name"], "night");
}

#[test]
fn test_config_file_sets_database_path() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("habitual.yaml");
    std::fs::write(
        &config_path,
        "database:\n  path: data/from-config.db\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_habitual"))
        .current_dir(tmp.path())
        .env_remove("HABITUAL_DB")
        .arg("--config")
        .arg(&config_path)
        .args(["tag", "list"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(Path::new(&tmp.path().join("data/from-config.db")).exists());
}
