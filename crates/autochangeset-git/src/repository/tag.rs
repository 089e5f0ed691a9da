use crate::Result;

use super::Repository;

impl Repository {
    /// Most recent tag reachable from `HEAD`, lightweight tags included.
    ///
    /// Returns `Ok(None)` when no tag describes `HEAD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag list cannot be read or describing `HEAD` fails for
    /// another reason.
    pub fn latest_tag(&self) -> Result<Option<String>> {
        if self.inner.tag_names(None)?.is_empty() {
            return Ok(None);
        }

        let mut opts = git2::DescribeOptions::new();
        opts.describe_tags();

        let describe = match self.inner.describe(&opts) {
            Ok(describe) => describe,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut format = git2::DescribeFormatOptions::new();
        format.abbreviated_size(0);

        Ok(Some(describe.format(Some(&format))?))
    }
}
