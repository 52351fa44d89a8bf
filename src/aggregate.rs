//! Tree Aggregation
//!
//! Walks a codebase bottom-up and fingerprints every directory with at least two
//! file descendants. Each directory's fingerprints depend only on its own file
//! descendants, so a re-run over the same tree reproduces the same table.

use crate::error::ApiError;
use crate::fingerprint::{create_content_fingerprint, create_structure_fingerprint};
use crate::store::{DirectoryFingerprints, FingerprintStore, FingerprintTable};
use crate::tree::codebase::Codebase;
use crate::tree::node::Resource;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Directories with fewer file descendants than this are not fingerprinted.
pub const MIN_FILE_DESCENDANTS: usize = 2;

/// Aggregation report
///
/// Summary of one fingerprinting pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationReport {
    /// Directory nodes seen, including skipped ones
    pub directories_visited: usize,
    /// Directories that received fingerprints
    pub fingerprinted: usize,
    /// Directories with zero or one file descendant
    pub skipped_trivial: usize,
    /// Directories without a path (synthetic roots)
    pub skipped_unnamed: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Fingerprints for one directory, or `None` when it has too few files.
pub fn fingerprint_directory(
    directory: &Resource,
    file_descendants: &[&Resource],
) -> Result<Option<DirectoryFingerprints>, ApiError> {
    if file_descendants.len() < MIN_FILE_DESCENDANTS {
        return Ok(None);
    }
    let children = file_descendants.iter().copied();
    Ok(Some(DirectoryFingerprints {
        directory_content: create_content_fingerprint(children.clone())?,
        directory_structure: create_structure_fingerprint(directory, children)?,
    }))
}

/// Fingerprint every qualifying directory of `codebase` into `store`.
///
/// Store failures abort the pass and are returned as-is; records written before
/// the failure stay in the store.
pub fn fingerprint_tree<C, S>(codebase: &C, store: &mut S) -> Result<AggregationReport, ApiError>
where
    C: Codebase + ?Sized,
    S: FingerprintStore + ?Sized,
{
    let start = Instant::now();
    let mut report = AggregationReport::default();

    for node in codebase.depth_first_post_order() {
        let resource = match codebase.resource(node) {
            Some(resource) => resource,
            None => continue,
        };
        if resource.is_file() {
            continue;
        }
        report.directories_visited += 1;
        if resource.path.is_empty() {
            report.skipped_unnamed += 1;
            continue;
        }

        let files = codebase.file_descendants(node);
        match fingerprint_directory(resource, &files)? {
            Some(fingerprints) => {
                debug!(
                    path = %resource.path,
                    files = files.len(),
                    content = %fingerprints.directory_content,
                    structure = %fingerprints.directory_structure,
                    "Fingerprinted directory"
                );
                store.put(node, &resource.path, fingerprints)?;
                report.fingerprinted += 1;
            }
            None => report.skipped_trivial += 1,
        }
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        directories = report.directories_visited,
        fingerprinted = report.fingerprinted,
        skipped_trivial = report.skipped_trivial,
        duration_ms = report.duration_ms,
        "Directory fingerprinting complete"
    );
    Ok(report)
}

/// Fingerprint `codebase` into a fresh [`FingerprintTable`].
pub fn compute_directory_fingerprints<C>(
    codebase: &C,
) -> Result<(FingerprintTable, AggregationReport), ApiError>
where
    C: Codebase + ?Sized,
{
    let mut table = FingerprintTable::new();
    let report = fingerprint_tree(codebase, &mut table)?;
    Ok((table, report))
}
