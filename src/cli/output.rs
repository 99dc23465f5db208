//! Output formatting utilities

use crate::application::RunSummary;

/// Format the end-of-run summary for display
pub fn format_summary(summary: &RunSummary) -> String {
    let mut output = format!("Filed {} post(s)\n", summary.posts_filed);

    let groups = [
        ("Published", &summary.published),
        ("Skipped (already published)", &summary.skipped),
        ("Not overwritten (page appeared during run)", &summary.already_published),
        ("Spam blacklist hit, reported", &summary.error_logged),
    ];

    for (heading, months) in groups {
        if months.is_empty() {
            continue;
        }
        output.push_str(&format!("{}: {}\n", heading, months.join(", ")));
    }

    output
}
