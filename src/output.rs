//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is information-centric, not file-centric: the primary display for
//! every entity is its semantic identity — document name, entry count —
//! with sizes and paths as secondary context on indented lines.
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::context::SiteContext;
use std::collections::BTreeMap;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a byte count for display: bytes below 1 KiB, otherwise KiB.
fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    }
}

/// Format the build result: one line per document, then the archive line.
///
/// ```text
/// Documents
/// index.html (12.4 KiB)
/// about.html (8.1 KiB)
/// ...
///
/// Archive: red_hippo_final.zip (9.2 KiB)
/// ```
pub fn format_build_output(
    documents: &BTreeMap<String, String>,
    archive_name: &str,
    archive_bytes: usize,
) -> Vec<String> {
    let mut lines = vec!["Documents".to_string()];
    for (name, body) in documents {
        lines.push(format!("{name} ({})", format_size(body.len())));
    }
    lines.push(String::new());
    lines.push(format!(
        "Archive: {archive_name} ({})",
        format_size(archive_bytes)
    ));
    lines
}

/// Format the check result: assembled counts and warnings.
///
/// ```text
/// Site: Red Hippo
///     Areas: 4
///     Services: 3
///     Testimonials: 2
///     FAQs: 1
///     Map embed: present
///     Products: skipped (no network in check)
/// ```
pub fn format_check_output(ctx: &SiteContext, feed_configured: bool) -> Vec<String> {
    let mut lines = vec![format!("Site: {}", ctx.name)];
    lines.push(format!("{}Areas: {}", indent(1), ctx.service_areas.len()));
    lines.push(format!("{}Services: {}", indent(1), ctx.services.len()));
    lines.push(format!(
        "{}Testimonials: {}",
        indent(1),
        ctx.testimonials.len()
    ));
    lines.push(format!("{}FAQs: {}", indent(1), ctx.faqs.len()));
    lines.push(format!(
        "{}Map embed: {}",
        indent(1),
        if ctx.map_embed.is_empty() {
            "none"
        } else {
            "present"
        }
    ));
    if feed_configured {
        lines.push(format!(
            "{}Products: skipped (no network in check)",
            indent(1)
        ));
    } else {
        lines.push(format!("{}Products: no feed configured", indent(1)));
    }
    lines
}

/// Print build output to stdout.
pub fn print_build_output(
    documents: &BTreeMap<String, String>,
    archive_name: &str,
    archive_bytes: usize,
) {
    for line in format_build_output(documents, archive_name, archive_bytes) {
        println!("{line}");
    }
}

/// Print check output to stdout.
pub fn print_check_output(ctx: &SiteContext, feed_configured: bool) {
    for line in format_check_output(ctx, feed_configured) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawConfig;
    use crate::context::assemble_with_products;

    #[test]
    fn size_formatting() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
    }

    #[test]
    fn build_output_lists_every_document() {
        let mut documents = BTreeMap::new();
        documents.insert("index.html".to_string(), "x".repeat(100));
        documents.insert("robots.txt".to_string(), "y".repeat(10));
        let lines = format_build_output(&documents, "site_final.zip", 2048);

        assert_eq!(lines[0], "Documents");
        assert!(lines.iter().any(|l| l.starts_with("index.html (100 B)")));
        assert!(lines.iter().any(|l| l.starts_with("robots.txt (10 B)")));
        assert_eq!(lines.last().unwrap(), "Archive: site_final.zip (2.0 KiB)");
    }

    #[test]
    fn check_output_reports_counts() {
        let mut raw = RawConfig::default();
        raw.business.name = "Acme".to_string();
        raw.business.service_areas = "A,B".to_string();
        raw.content.services = "One\nTwo\nThree".to_string();
        let ctx = assemble_with_products(&raw, Vec::new());

        let lines = format_check_output(&ctx, false);
        assert_eq!(lines[0], "Site: Acme");
        assert!(lines.iter().any(|l| l.contains("Areas: 2")));
        assert!(lines.iter().any(|l| l.contains("Services: 3")));
        assert!(lines.iter().any(|l| l.contains("no feed configured")));
    }

    #[test]
    fn check_output_notes_skipped_feed() {
        let ctx = assemble_with_products(&RawConfig::default(), Vec::new());
        let lines = format_check_output(&ctx, true);
        assert!(lines.iter().any(|l| l.contains("skipped")));
    }
}
