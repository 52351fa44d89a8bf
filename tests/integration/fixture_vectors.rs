//! Known fingerprint values that stored fingerprints must keep matching.

use treeprint::fingerprint::{
    create_content_fingerprint, create_structure_fingerprint, digest_to_chunks, make_fingerprint,
    split_fingerprint,
};
use treeprint::Resource;

#[test]
fn package_paths_fingerprint() {
    let features = [
        "package",
        "package/readme.txt",
        "package/index.js",
        "package/package.json",
    ];
    let fingerprint = make_fingerprint(features).unwrap().to_string();
    assert_eq!(fingerprint, "0000000410d24471969646cb5402032288493126");

    let (count, digest) = split_fingerprint(&fingerprint).unwrap();
    assert_eq!(count, 4);
    assert_eq!(digest, "10d24471969646cb5402032288493126");
}

#[test]
fn content_fingerprint_of_four_checksums() {
    // sha1 of "a", "b", "c", "d"
    let files = vec![
        Resource::file("p/a", Some(1), Some("86f7e437faa5a7fce15d1ddcb9eaeaea377667b8")),
        Resource::file("p/b", Some(1), Some("e9d71f5ee7c92d6dc9e92ffdad17b8bd49418f98")),
        Resource::file("p/c", Some(1), Some("84a516841ba77a5b4648de2cd0dfcb30ea46dbb4")),
        Resource::file("p/d", Some(1), Some("3c363836cf4e16666669a25da280a1865c2d2874")),
    ];
    let fingerprint = create_content_fingerprint(&files).unwrap();
    assert_eq!(
        fingerprint.to_string(),
        "000000048823217a06c14108840040126605cf10"
    );
}

#[test]
fn structure_fingerprint_of_package() {
    let top = Resource::directory("package");
    let children = vec![
        Resource::file("package/readme.txt", Some(771), None),
        Resource::file("package/index.js", Some(608), None),
        Resource::file("package/package.json", Some(677), None),
    ];
    let fingerprint = create_structure_fingerprint(&top, &children).unwrap();
    assert_eq!(
        fingerprint.to_string(),
        "00000003ce72f4308a1bc1afb0fb47ed590b5c53"
    );
}

#[test]
fn digest_chunks_of_structure_fingerprint() {
    let chunks = digest_to_chunks("ce72f4308a1bc1afb0fb47ed590b5c53").unwrap();
    assert_eq!(chunks[0], [0xCE, 0x72, 0xF4, 0x30]);
    assert_eq!(chunks[1], [0x8A, 0x1B, 0xC1, 0xAF]);
    assert_eq!(chunks[2], [0xB0, 0xFB, 0x47, 0xED]);
    assert_eq!(chunks[3], [0x59, 0x0B, 0x5C, 0x53]);
}

#[test]
fn near_duplicate_feature_sets_stay_close() {
    let base: Vec<String> = (0..20).map(|i| format!("file{}.txt", i)).collect();
    let mut changed = base.clone();
    changed[19] = "other.txt".to_string();

    let a = make_fingerprint(&base).unwrap();
    let b = make_fingerprint(&changed).unwrap();
    assert_eq!(a.to_string(), "000000140ea3490a089ec4b55bb08008712060c4");
    assert_eq!(b.to_string(), "000000140ea35d2b098ec4955bb00401312060c4");
    assert_eq!(a.distance(&b), 12);

    let unrelated: Vec<String> = (0..20).map(|i| format!("x{}", i)).collect();
    let c = make_fingerprint(&unrelated).unwrap();
    assert!(a.distance(&c) > 4 * a.distance(&b));
}
