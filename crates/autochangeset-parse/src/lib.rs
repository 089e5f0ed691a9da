mod error;
mod parse;
mod serialize;

pub use error::FormatError;
pub use parse::parse_changeset;
pub use serialize::{FALLBACK_SUMMARY, changeset_filename, render_changeset};
