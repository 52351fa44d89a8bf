//! End-to-end fingerprinting of trees built on disk and from scan exports.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use treeprint::tree::{walk_directory, WalkerConfig};
use treeprint::types::NodeRef;
use treeprint::{
    compute_directory_fingerprints, fingerprint_tree, Codebase, FingerprintTable, InMemoryCodebase,
};

fn write_project(root: &Path) {
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("README.md"), "hello\n").unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}\n").unwrap();
    fs::write(root.join("src/lib.rs"), "pub fn lib() {}\n").unwrap();
}

#[test]
fn walked_project_gets_known_fingerprints() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    write_project(&root);

    let codebase = walk_directory(&root, &WalkerConfig::default()).unwrap();
    let (table, report) = compute_directory_fingerprints(&codebase).unwrap();

    let project = table.get_by_path("project").unwrap();
    assert_eq!(
        project.directory_content.to_string(),
        "0000000316b3a08ea6707a3221ee4ef66070b56d"
    );
    assert_eq!(
        project.directory_structure.to_string(),
        "000000034c8b261aa043ea90fbef3013bcc6f387"
    );

    let src = table.get_by_path("project/src").unwrap();
    assert_eq!(
        src.directory_content.to_string(),
        "000000020000008286200a12018244d460509401"
    );
    assert_eq!(
        src.directory_structure.to_string(),
        "0000000265240a00004189410a8120882106c000"
    );

    // empty docs/ has no files
    assert!(table.get_by_path("project/docs").is_none());
    assert_eq!(report.fingerprinted, 2);
    assert_eq!(report.skipped_trivial, 1);
}

#[test]
fn copied_package_matches_original() {
    let temp = TempDir::new().unwrap();
    write_project(&temp.path().join("a/project"));
    write_project(&temp.path().join("b/project"));

    let a = walk_directory(&temp.path().join("a"), &WalkerConfig::default()).unwrap();
    let b = walk_directory(&temp.path().join("b"), &WalkerConfig::default()).unwrap();
    let (a, _) = compute_directory_fingerprints(&a).unwrap();
    let (b, _) = compute_directory_fingerprints(&b).unwrap();

    // structure features are relative, so the parent directory name does not matter
    assert_eq!(a.get_by_path("a/project"), b.get_by_path("b/project"));
    assert_eq!(
        a.get_by_path("a").unwrap().directory_content,
        b.get_by_path("b").unwrap().directory_content
    );
}

#[test]
fn edited_file_moves_content_fingerprint_a_little() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("pkg");
    fs::create_dir_all(&root).unwrap();
    for i in 0..24 {
        fs::write(root.join(format!("f{:02}.txt", i)), format!("body {}", i)).unwrap();
    }
    let before = walk_directory(&root, &WalkerConfig::default()).unwrap();
    let (before, _) = compute_directory_fingerprints(&before).unwrap();

    fs::write(root.join("f00.txt"), "changed").unwrap();
    let after = walk_directory(&root, &WalkerConfig::default()).unwrap();
    let (after, _) = compute_directory_fingerprints(&after).unwrap();

    let before = before.get_by_path("pkg").unwrap();
    let after = after.get_by_path("pkg").unwrap();
    assert_ne!(before.directory_content, after.directory_content);
    assert_eq!(before.directory_content.count(), after.directory_content.count());
    // same sizes and names: structure is untouched
    assert_eq!(before.directory_structure, after.directory_structure);
    assert!(before.directory_content.distance(&after.directory_content) < 40);
}

#[test]
fn scan_export_aggregation() {
    let json = r#"{"files": [
        {"path": "package", "type": "directory"},
        {"path": "package/readme.txt", "type": "file", "size": 771},
        {"path": "package/index.js", "type": "file", "size": 608},
        {"path": "package/package.json", "type": "file", "size": 677},
        {"path": "package/lib", "type": "directory"},
        {"path": "package/lib/one.js", "type": "file", "size": 3}
    ]}"#;
    let codebase = InMemoryCodebase::from_scan_json(json).unwrap();
    let mut table = FingerprintTable::new();
    let report = fingerprint_tree(&codebase, &mut table).unwrap();

    let package = table.get_by_path("package").unwrap();
    assert_eq!(package.directory_structure.count(), 4);
    assert_eq!(package.directory_content.count(), 0);
    assert!(table.get_by_path("package/lib").is_none());
    assert_eq!(report.directories_visited, 3);

    let post_order = codebase.depth_first_post_order();
    let package_node = codebase.lookup("package").unwrap();
    let lib_node = codebase.lookup("package/lib").unwrap();
    let position = |node: NodeRef| post_order.iter().position(|n| *n == node).unwrap();
    assert!(position(lib_node) < position(package_node));
}
