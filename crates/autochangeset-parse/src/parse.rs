use indexmap::IndexMap;
use serde::Deserialize;
use serde_with::{MapPreventDuplicates, serde_as};

use autochangeset_core::{BumpType, Changeset};

use crate::error::FormatError;

pub(crate) const FRONT_MATTER_DELIMITER: &str = "---";

const MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

#[serde_as]
#[derive(Deserialize)]
struct ReleasesMap {
    #[serde(flatten)]
    #[serde_as(as = "MapPreventDuplicates<_, _>")]
    releases: IndexMap<String, BumpType>,
}

fn strip_line_ending(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

fn find_closing_delimiter(content: &str) -> Option<usize> {
    if content.starts_with(FRONT_MATTER_DELIMITER) {
        return Some(0);
    }
    if let Some(pos) = content.find("\r\n---") {
        return Some(pos + 2);
    }
    if let Some(pos) = content.find("\n---") {
        return Some(pos + 1);
    }
    None
}

fn extract_front_matter(content: &str) -> Result<(&str, &str), FormatError> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with(FRONT_MATTER_DELIMITER) {
        return Err(FormatError::NotARecord);
    }

    let after_opening = &trimmed[FRONT_MATTER_DELIMITER.len()..];
    let after_opening = strip_line_ending(after_opening);

    let Some(closing_pos) = find_closing_delimiter(after_opening) else {
        return Err(FormatError::UnterminatedFrontMatter);
    };

    let yaml_content = after_opening[..closing_pos].trim_end_matches('\r');
    if yaml_content.trim().is_empty() {
        return Err(FormatError::NoPackage);
    }

    let after_closing = &after_opening[closing_pos + FRONT_MATTER_DELIMITER.len()..];
    let body = strip_line_ending(after_closing);

    Ok((yaml_content, body))
}

/// Parses a generated changeset file back into its package, bump and summary.
///
/// # Errors
///
/// Returns [`FormatError`] when the front matter is missing or malformed, or when it
/// does not name exactly one package.
#[must_use = "parsing result should be handled"]
pub fn parse_changeset(content: &str) -> Result<Changeset, FormatError> {
    if content.len() > MAX_INPUT_SIZE {
        return Err(FormatError::TooLarge {
            max_bytes: MAX_INPUT_SIZE,
        });
    }

    let (yaml_content, body) = extract_front_matter(content)?;

    let parsed: ReleasesMap = serde_yml::from_str(yaml_content)?;
    let mut releases = parsed.releases.into_iter();

    let Some((package, bump)) = releases.next() else {
        return Err(FormatError::NoPackage);
    };

    let extra = releases.count();
    if extra > 0 {
        return Err(FormatError::TooManyPackages { count: extra + 1 });
    }

    Ok(Changeset {
        package,
        bump,
        summary: body.trim().to_string(),
    })
}
