//! Property tests for the fingerprint codec and aggregator.

use proptest::prelude::*;
use treeprint::fingerprint::{digest_to_chunks, make_fingerprint, split_fingerprint};
use treeprint::{compute_directory_fingerprints, Fingerprint, InMemoryCodebase, Resource};

/// Feature lists that include some empty entries
fn features() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop_oneof![Just(String::new()), "[a-z0-9/._-]{1,24}"], 0..40)
}

proptest! {
    #[test]
    fn make_fingerprint_is_deterministic(features in features()) {
        let a = make_fingerprint(&features).unwrap();
        let b = make_fingerprint(&features).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn make_fingerprint_ignores_order(
        (original, shuffled) in features().prop_flat_map(|f| (Just(f.clone()), Just(f).prop_shuffle()))
    ) {
        let a = make_fingerprint(&original).unwrap();
        let b = make_fingerprint(&shuffled).unwrap();
        prop_assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn count_matches_non_empty_features(features in features()) {
        let fingerprint = make_fingerprint(&features).unwrap().to_string();
        let (count, _) = split_fingerprint(&fingerprint).unwrap();
        let expected = features.iter().filter(|f| !f.is_empty()).count();
        prop_assert_eq!(count as usize, expected);
    }

    #[test]
    fn wire_format_round_trips(count in any::<u32>(), digest in any::<[u8; 16]>()) {
        let wire = Fingerprint::new(count, digest).to_string();
        prop_assert_eq!(wire.len(), 40);
        prop_assert!(wire.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));

        let (parsed_count, parsed_digest) = split_fingerprint(&wire).unwrap();
        prop_assert_eq!(format!("{:08x}{}", parsed_count, parsed_digest), wire);
    }

    #[test]
    fn chunks_concatenate_to_digest(digest in any::<[u8; 16]>()) {
        let hex_digest = hex::encode(digest);
        let chunks = digest_to_chunks(&hex_digest).unwrap();
        prop_assert_eq!(hex::encode(chunks.concat()), hex_digest);
    }

    #[test]
    fn split_rejects_wrong_lengths(text in "[0-9a-f]{0,60}") {
        prop_assume!(text.len() != 40);
        prop_assert!(split_fingerprint(&text).is_err());
    }

    #[test]
    fn directories_with_one_file_get_nothing(
        depth in 1usize..5,
        size in prop::option::of(0u64..10_000),
    ) {
        let segments: Vec<String> = (0..depth).map(|i| format!("d{}", i)).collect();
        let path = format!("{}/only.txt", segments.join("/"));
        let codebase = InMemoryCodebase::from_resources(vec![
            Resource::file(path, size, Some("86f7e437faa5a7fce15d1ddcb9eaeaea377667b8")),
        ])
        .unwrap();
        let (table, report) = compute_directory_fingerprints(&codebase).unwrap();
        prop_assert!(table.is_empty());
        prop_assert_eq!(report.skipped_trivial, depth);
    }
}
