//! Console rendering of a [`Report`].

use std::fmt::Write;

use crate::core::constants::display;
use crate::core::types::Bucket;
use crate::reporting::report::Report;

fn rule() -> String {
    "=".repeat(display::RULE_WIDTH)
}

fn count_label(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Valid => "Valid URLs (2xx)",
        Bucket::Redirected => "Redirected URLs",
        Bucket::Broken => "Broken URLs (4xx/5xx)",
        Bucket::ExemptTemplate => "Template URLs (skipped)",
        Bucket::ExemptExample => "Example URLs (skipped)",
        Bucket::TransportError => "Connection errors",
    }
}

fn section_title(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Broken => "BROKEN URLS (Need Fixing)",
        Bucket::Redirected => "REDIRECTED URLS (Consider Updating)",
        Bucket::TransportError => "CONNECTION ERRORS (Manual Review Needed)",
        _ => "",
    }
}

/// Render bucket counts followed by up to `preview_limit` entries of each
/// actionable bucket, in the order broken, redirected, connection errors.
pub fn render_summary(report: &Report, preview_limit: usize) -> String {
    let mut out = String::new();

    let title = if report.is_partial() {
        "VERIFICATION SUMMARY (partial run)"
    } else {
        "VERIFICATION SUMMARY"
    };
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{:<30}{}", "Total URLs:", report.total());
    for bucket in Bucket::ALL {
        let label = format!("{}:", count_label(bucket));
        let _ = writeln!(out, "{label:<30}{}", report.count(bucket));
    }
    if report.is_partial() {
        let _ = writeln!(
            out,
            "{:<30}{}",
            "Unresolved (run stopped):",
            report.unresolved().len()
        );
    }

    for (bucket, entries) in report.actionable() {
        if entries.is_empty() {
            continue;
        }

        let _ = writeln!(out, "\n{}:", section_title(bucket));
        let _ = writeln!(out, "{}", rule());
        for entry in entries.iter().take(preview_limit) {
            match entry.status_code() {
                Some(status) => {
                    let _ = writeln!(out, "  [{status}] {}", entry.record.url());
                }
                None => {
                    let _ = writeln!(out, "  {}", entry.record.url());
                }
            }
            let _ = writeln!(out, "       -> {}", entry.detail());
        }
        if entries.len() > preview_limit {
            let _ = writeln!(
                out,
                "  ... and {} more (see the JSON report)",
                entries.len() - preview_limit
            );
        }
    }

    out
}
