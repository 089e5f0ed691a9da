mod conventional;

use autochangeset_core::BumpType;

pub use conventional::{ConventionalHeader, parse_header};

/// Marker that makes any commit a major change, wherever it appears in the message.
pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE";

/// Bump implied by a known conventional commit type.
#[must_use]
pub fn bump_for_type(commit_type: &str) -> Option<BumpType> {
    match commit_type {
        "feat" => Some(BumpType::Minor),
        "fix" | "perf" | "refactor" | "style" | "docs" | "test" | "build" | "ci" | "chore"
        | "revert" => Some(BumpType::Patch),
        _ => None,
    }
}

/// Removes a leading `<hex-hash> ` token from a `git log --oneline` line.
#[must_use]
pub fn strip_commit_hash(line: &str) -> &str {
    match line.split_once(' ') {
        Some((hash, rest))
            if !hash.is_empty()
                && hash
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)) =>
        {
            rest
        }
        _ => line,
    }
}

/// Classifies a commit message. Unknown or malformed messages are a patch.
#[must_use]
pub fn classify_message(message: &str) -> BumpType {
    if message.contains(BREAKING_CHANGE_MARKER) {
        return BumpType::Major;
    }

    match parse_header(message) {
        Some(header) if header.breaking => BumpType::Major,
        Some(header) => bump_for_type(header.commit_type).unwrap_or(BumpType::Patch),
        None => BumpType::Patch,
    }
}

/// Classifies a raw `git log --oneline` line, ignoring its leading hash.
#[must_use]
pub fn classify_log_line(line: &str) -> BumpType {
    classify_message(strip_commit_hash(line))
}

/// The largest bump in `bumps`, or [`BumpType::Patch`] when there are none.
#[must_use]
pub fn highest_bump<I>(bumps: I) -> BumpType
where
    I: IntoIterator<Item = BumpType>,
{
    bumps.into_iter().max().unwrap_or(BumpType::Patch)
}
