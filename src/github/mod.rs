//! GitHub Releases API: release lookup and creation, asset listing, deletion and upload.

mod client;
mod repo;
mod types;

pub use client::{DEFAULT_API_URL, DEFAULT_UPLOAD_URL, GitHub, ReleaseApi};
pub use repo::RepoId;
pub use types::{NewRelease, Release, ReleaseAsset};

#[cfg(test)]
pub use client::MockReleaseApi;
