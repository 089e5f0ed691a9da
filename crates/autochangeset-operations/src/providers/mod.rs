mod changeset_io;
mod git;
mod process;

pub use changeset_io::FileSystemChangesetWriter;
pub use git::Git2Provider;
pub use process::ProcessRunner;
