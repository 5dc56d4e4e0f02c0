//! Release stages: push the repository, then publish the archives

pub mod git;
pub mod publish;

pub use git::{git_push, PushOptions};
pub use publish::{release, ReleaseOptions};
