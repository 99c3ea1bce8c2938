//! Application layer - Use cases that coordinate the GitHub API and the local runtime.

mod publish;

pub use publish::{DeleteOutcome, PublishReport, PublishRequest, PublishUseCase, ReleaseOutcome};
