//! End-of-run summary for multi-URL invocations.

use colored::Colorize;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorKind, InfoType, ProcessingStats};

/// Formats the batch summary: one headline, then one line per non-zero counter.
pub fn format_summary(stats: &ProcessingStats, elapsed_seconds: f64) -> String {
    let failed = stats.total_errors();
    let total = stats.successes() + failed;
    let mut lines = vec![format!(
        "Processed {} URL{} ({} succeeded, {} failed) in {:.1}s",
        total,
        if total == 1 { "" } else { "s" },
        stats.successes(),
        failed,
        elapsed_seconds
    )];

    if failed > 0 {
        lines.push(format!("Error Counts ({failed} total):"));
        for kind in ErrorKind::iter() {
            let count = stats.get_error_count(kind);
            if count > 0 {
                lines.push(format!("   {}: {}", kind.as_str(), count));
            }
        }
    }

    let info: Vec<(InfoType, usize)> = InfoType::iter()
        .map(|info_type| (info_type, stats.get_info_count(info_type)))
        .filter(|(_, count)| *count > 0)
        .collect();
    if !info.is_empty() {
        lines.push("Info Counts:".to_string());
        for (info_type, count) in info {
            lines.push(format!("   {}: {}", info_type.as_str(), count));
        }
    }

    lines.join("\n")
}

/// Prints the batch summary to stderr, keeping stdout for the reports themselves.
pub fn print_batch_summary(stats: &ProcessingStats, elapsed_seconds: f64) {
    let summary = format_summary(stats, elapsed_seconds);
    let headline_color = if stats.total_errors() == 0 {
        colored::Color::Green
    } else {
        colored::Color::Yellow
    };
    let mut lines = summary.lines();
    if let Some(headline) = lines.next() {
        eprintln!("{}", headline.color(headline_color).bold());
    }
    for line in lines {
        eprintln!("{line}");
    }
}
