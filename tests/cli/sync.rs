use anyhow::Result;
use serde_json::{Value, json};

use crate::CliTest;

fn parse(content: &str) -> Value {
    serde_json::from_str(content).expect("output file should be valid JSON")
}

#[test]
fn test_deletion_only_run_prunes_missing_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("en.json", r#"{"a.title": "Hello"}"#)?;
    test.write_file(
        "es.json",
        r#"{"a.title": "Hola", "old.key": "Viejo"}"#,
    )?;

    let output = test
        .command()
        .args(["es", "--delete-missing-keys"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("old.key"), "stdout:\n{}", stdout);
    assert!(stdout.contains("Deleted"), "stdout:\n{}", stdout);

    assert_eq!(parse(&test.read_file("es.json")?), json!({"a.title": "Hola"}));
    Ok(())
}

#[test]
fn test_deletion_only_run_reports_no_missing_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("en.json", r#"{"a.title": "Hello"}"#)?;
    test.write_file("es.json", r#"{"a.title": "Hola"}"#)?;

    let output = test
        .command()
        .args(["es", "--delete-missing-keys"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No missing keys"), "stdout:\n{}", stdout);
    Ok(())
}

#[test]
fn test_dry_run_leaves_files_byte_identical() -> Result<()> {
    let test = CliTest::new()?;
    let es_before = r#"{"a.title": "Hola", "old.key": "Viejo"}"#;
    test.write_file("en.json", r#"{"a.title": "Hello"}"#)?;
    test.write_file("es.json", es_before)?;

    let output = test
        .command()
        .args(["es", "--delete-missing-keys", "--dry-run"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Would delete"), "stdout:\n{}", stdout);
    assert!(stdout.contains("old.key"), "stdout:\n{}", stdout);

    assert_eq!(test.read_file("es.json")?, es_before);
    Ok(())
}

#[test]
fn test_dry_run_discovers_all_targets() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("en.json", r#"{"a.title": "Hello"}"#)?;
    test.write_file("es.json", "{}")?;
    test.write_file("fr.json", "{}")?;
    test.write_file("keys_context.json", r#"{"a.title": "a heading"}"#)?;

    let output = test.command().arg("--dry-run").output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("es.json"), "stdout:\n{}", stdout);
    assert!(stdout.contains("fr.json"), "stdout:\n{}", stdout);
    assert!(
        !stdout.contains("Dry run for keys_context.json"),
        "stdout:\n{}",
        stdout
    );
    assert!(
        !stdout.contains("Dry run for en.json"),
        "stdout:\n{}",
        stdout
    );
    Ok(())
}

#[test]
fn test_missing_source_catalog_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("es.json", r#"{"a.title": "Hola"}"#)?;

    let output = test.command().arg("--dry-run").output()?;

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("en.json"), "stderr:\n{}", stderr);

    // The target file survives untouched.
    assert_eq!(test.read_file("es.json")?, r#"{"a.title": "Hola"}"#);
    Ok(())
}

#[test]
fn test_missing_credential_fails_before_any_work() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("en.json", r#"{"a.title": "Hello"}"#)?;

    let output = test.bare_command().arg(".").output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("api-key"), "stderr:\n{}", stderr);
    Ok(())
}

#[test]
fn test_deletion_only_output_is_pretty_printed() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("en.json", r#"{"a.title": "Hello", "zh": "好"}"#)?;
    test.write_file(
        "zh.json",
        r#"{"a.title": "你好", "zh": "好", "old.key": "旧"}"#,
    )?;

    let output = test
        .command()
        .args(["zh", "--delete-missing-keys"])
        .output()?;
    assert!(output.status.success());

    let content = test.read_file("zh.json")?;
    // 2-space indentation, literal UTF-8, trailing newline.
    assert!(content.starts_with("{\n  \""), "content:\n{}", content);
    assert!(content.contains("你好"), "content:\n{}", content);
    assert!(!content.contains("\\u"), "content:\n{}", content);
    assert!(content.ends_with("}\n"), "content:\n{}", content);
    Ok(())
}

#[test]
fn test_unknown_selection_keys_report_and_exit_cleanly() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("en.json", r#"{"a.title": "Hello"}"#)?;
    test.write_file("es.json", r#"{"a.title": "Hola"}"#)?;

    let output = test
        .command()
        .args(["es", "--keys", "no.such.key", "--dry-run"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Nothing to do"), "stdout:\n{}", stdout);
    assert_eq!(test.read_file("es.json")?, r#"{"a.title": "Hola"}"#);
    Ok(())
}
