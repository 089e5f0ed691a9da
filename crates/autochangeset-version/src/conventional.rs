/// Header of a conventional commit: `type(scope)!: subject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalHeader<'a> {
    pub commit_type: &'a str,
    pub scope: Option<&'a str>,
    pub breaking: bool,
    pub subject: &'a str,
}

fn is_type_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parses the first line of `message` as a conventional commit header.
///
/// Returns `None` when the line does not have the `type(scope)!:` shape. Scope and
/// the `!` marker are optional; the scope, when present, must not be empty. The
/// scope runs to the last `)` that is followed by `:` or `!:`, so it may itself
/// contain parentheses.
#[must_use]
pub fn parse_header(message: &str) -> Option<ConventionalHeader<'_>> {
    let line = message.lines().next()?;

    let type_end = line.find(|c: char| !is_type_char(c))?;
    if type_end == 0 {
        return None;
    }
    let commit_type = &line[..type_end];
    let mut rest = &line[type_end..];

    let mut scope = None;
    if let Some(after_paren) = rest.strip_prefix('(') {
        let (inner, tail) = after_paren
            .match_indices(')')
            .rev()
            .map(|(close, _)| (&after_paren[..close], &after_paren[close + 1..]))
            .find(|(inner, tail)| {
                !inner.is_empty() && (tail.starts_with(':') || tail.starts_with("!:"))
            })?;
        scope = Some(inner);
        rest = tail;
    }

    let breaking = if let Some(after_bang) = rest.strip_prefix('!') {
        rest = after_bang;
        true
    } else {
        false
    };

    let subject = rest.strip_prefix(':')?;

    Some(ConventionalHeader {
        commit_type,
        scope,
        breaking,
        subject: subject.trim(),
    })
}
