mod changeset_io;
mod command_runner;
mod git_provider;

pub use changeset_io::ChangesetWriter;
pub use command_runner::CommandRunner;
pub use git_provider::GitProvider;
