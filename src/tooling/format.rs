//! Format fingerprint reports, splits, and comparisons as text.

use crate::aggregate::AggregationReport;
use crate::fingerprint::Fingerprint;
use crate::store::FingerprintTable;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format directory fingerprints and pass summary as human-readable text.
pub fn format_fingerprint_report_text(
    source: &str,
    table: &FingerprintTable,
    report: &AggregationReport,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading("Directory Fingerprints")
    ));
    out.push_str(&format!("  Source: {}\n\n", source));
    if table.is_empty() {
        out.push_str("No directory has two or more files.\n\n");
    } else {
        let mut rows = Table::new();
        rows.load_preset(UTF8_BORDERS_ONLY);
        rows.set_header(vec!["Path", "Content", "Structure"]);
        for record in table.records() {
            rows.add_row(vec![
                record.path.clone(),
                record.fingerprints.directory_content.to_string(),
                record.fingerprints.directory_structure.to_string(),
            ]);
        }
        out.push_str(&format!("{}\n\n", rows));
    }
    out.push_str(&format!(
        "Total: {} directories, {} fingerprinted, {} skipped ({} ms).\n",
        report.directories_visited,
        report.fingerprinted,
        report.skipped_trivial + report.skipped_unnamed,
        report.duration_ms
    ));
    out
}

/// Format a split fingerprint with its digest chunks.
pub fn format_chunks_text(count: u32, digest: &str, chunks: &[[u8; 4]; 4]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Fingerprint")));
    out.push_str(&format!("  Features: {}\n", count));
    out.push_str(&format!("  Digest: {}\n\n", digest));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Chunk", "Bytes"]);
    for (i, chunk) in chunks.iter().enumerate() {
        let bytes: Vec<String> = chunk.iter().map(|b| format!("{:02X}", b)).collect();
        table.add_row(vec![(i + 1).to_string(), bytes.join(" ")]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

/// Format a fingerprint comparison.
pub fn format_comparison_text(left: &Fingerprint, right: &Fingerprint, distance: u32) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Comparison")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["", "Features", "Digest"]);
    table.add_row(vec!["Left".to_string(), left.count().to_string(), left.digest_hex()]);
    table.add_row(vec![
        "Right".to_string(),
        right.count().to_string(),
        right.digest_hex(),
    ]);
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!("Hamming distance: {} of 128 bits\n", distance));
    out
}
