use thiserror::Error;

/// Why a generated changeset record could not be read back.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("record does not start with '---'")]
    NotARecord,

    #[error("front matter is not closed by '---'")]
    UnterminatedFrontMatter,

    #[error("front matter names no package")]
    NoPackage,

    #[error("front matter names {count} packages, expected exactly one")]
    TooManyPackages { count: usize },

    #[error("record exceeds maximum size of {max_bytes} bytes")]
    TooLarge { max_bytes: usize },

    #[error("invalid front matter")]
    Yaml(#[from] serde_yml::Error),
}
