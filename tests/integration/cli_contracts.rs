//! Output contracts of CLI commands.

use std::fs;
use tempfile::TempDir;
use treeprint::config::TreeprintConfig;
use treeprint::tooling::cli::{CliContext, Commands};
use treeprint::ApiError;

fn context() -> CliContext {
    CliContext::with_config(TreeprintConfig::default())
}

#[test]
fn scan_json_contract_has_required_fields() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("pkg");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("b.txt"), "b").unwrap();

    let output = context()
        .execute(&Commands::Scan {
            path: root,
            format: Some("json".to_string()),
            include_hidden: false,
            follow_links: false,
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(parsed.get("source").and_then(|v| v.as_str()).is_some());
    assert!(parsed.get("generated_at").and_then(|v| v.as_str()).is_some());
    let report = parsed.get("report").unwrap();
    assert_eq!(report.get("fingerprinted").and_then(|v| v.as_u64()), Some(1));
    let pkg = parsed.get("directories").and_then(|d| d.get("pkg")).unwrap();
    let content = pkg.get("directory_content").and_then(|v| v.as_str()).unwrap();
    let structure = pkg.get("directory_structure").and_then(|v| v.as_str()).unwrap();
    assert_eq!(content.len(), 40);
    assert!(structure.starts_with("00000002"));
}

#[test]
fn fingerprint_text_lists_directories() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("scan.json");
    fs::write(
        &input,
        r#"{"files": [
            {"path": "package/readme.txt", "type": "file", "size": 771},
            {"path": "package/index.js", "type": "file", "size": 608},
            {"path": "package/package.json", "type": "file", "size": 677}
        ]}"#,
    )
    .unwrap();

    let output = context()
        .execute(&Commands::Fingerprint {
            input,
            format: Some("text".to_string()),
        })
        .unwrap();
    assert!(output.contains("package"));
    assert!(output.contains("00000003ce72f4308a1bc1afb0fb47ed590b5c53"));
}

#[test]
fn split_json_contract() {
    let output = context()
        .execute(&Commands::Split {
            fingerprint: "00000003ce72f4308a1bc1afb0fb47ed590b5c53".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["count"], 3);
    assert_eq!(parsed["digest"], "ce72f4308a1bc1afb0fb47ed590b5c53");
    assert_eq!(
        parsed["chunks"],
        serde_json::json!(["ce72f430", "8a1bc1af", "b0fb47ed", "590b5c53"])
    );
}

#[test]
fn split_rejects_malformed_fingerprint() {
    let err = context()
        .execute(&Commands::Split {
            fingerprint: "not-a-fingerprint".to_string(),
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Format(_)));
}

#[test]
fn compare_json_contract() {
    let output = context()
        .execute(&Commands::Compare {
            left: "000000140ea3490a089ec4b55bb08008712060c4".to_string(),
            right: "000000140ea35d2b098ec4955bb00401312060c4".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["distance"], 12);
    assert_eq!(parsed["left_count"], 20);
}

#[test]
fn hash_command_prints_digest() {
    let output = context()
        .execute(&Commands::Hash {
            features: vec!["a".to_string()],
            bits: 128,
        })
        .unwrap();
    assert_eq!(output, "f33e8a463f0e4957ce3c661d9688d99e");

    let err = context()
        .execute(&Commands::Hash {
            features: vec!["a".to_string()],
            bits: 100,
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Hash(_)));
}

#[test]
fn unknown_format_is_config_error() {
    let err = context()
        .execute(&Commands::Compare {
            left: "0".repeat(40),
            right: "0".repeat(40),
            format: "xml".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}
