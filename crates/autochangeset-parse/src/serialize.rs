use autochangeset_core::Changeset;

use crate::parse::FRONT_MATTER_DELIMITER;

/// Body written when a package has no commit messages to list.
pub const FALLBACK_SUMMARY: &str = "Automated release based on commit messages";

fn quote(name: &str) -> String {
    // JSON string escaping is a valid YAML double-quoted scalar.
    serde_json::to_string(name).unwrap_or_else(|_| format!("\"{name}\""))
}

#[must_use]
pub fn render_changeset(changeset: &Changeset) -> String {
    let summary = changeset.summary.trim();
    let body = if summary.is_empty() {
        FALLBACK_SUMMARY
    } else {
        summary
    };

    let mut output = String::new();
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    output.push_str(&quote(&changeset.package));
    output.push_str(": ");
    output.push_str(changeset.bump.as_str());
    output.push('\n');
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push_str("\n\n");
    output.push_str(body);
    output.push('\n');

    output
}

/// File name for a generated changeset, e.g. `auto-acme-ui-1700000000000.md` for
/// `@acme/ui`.
#[must_use]
pub fn changeset_filename(package: &str, timestamp_millis: i64) -> String {
    let normalized: String = package
        .chars()
        .filter(|c| *c != '@')
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            other => other,
        })
        .collect();

    format!("auto-{normalized}-{timestamp_millis}.md")
}
