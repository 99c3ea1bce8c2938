//! Publish action - creates or reuses a release and replaces one asset on it.
//!
//! This action coordinates:
//! - Opening the local file (before any network call)
//! - Resolving the release by tag, creating it when absent
//! - Deleting an existing asset with the same name
//! - Uploading the new asset

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{debug, info};

use crate::github::{NewRelease, Release, ReleaseApi, ReleaseAsset, RepoId};
use crate::http::UploadBody;
use crate::runtime::Runtime;

/// Everything needed for one publish run.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    pub release: NewRelease,
    pub file_path: PathBuf,
    pub asset_name: String,
}

/// How the release id was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The release did not exist and was created.
    Created(u64),
    /// A release with the tag already existed and was reused unmodified.
    Existing(u64),
}

impl ReleaseOutcome {
    pub fn id(&self) -> u64 {
        match self {
            ReleaseOutcome::Created(id) | ReleaseOutcome::Existing(id) => *id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// An asset with the target name existed; holds its id.
    Deleted(u64),
    /// Nothing to delete.
    NotFound,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    pub release: ReleaseOutcome,
    pub replaced: DeleteOutcome,
    /// Asset id and name from the upload response, when it could be parsed.
    pub uploaded: Option<ReleaseAsset>,
    /// Raw body of the upload response (asset metadata).
    pub upload_response: String,
}

pub struct PublishUseCase<'a, R: Runtime, A: ReleaseApi> {
    runtime: &'a R,
    api: &'a A,
    repo: &'a RepoId,
}

impl<'a, R: Runtime, A: ReleaseApi> PublishUseCase<'a, R, A> {
    pub fn new(runtime: &'a R, api: &'a A, repo: &'a RepoId) -> Self {
        Self { runtime, api, repo }
    }

    /// Runs the whole flow. Any failure stops the remaining steps.
    #[tracing::instrument(skip(self, request), fields(repo = %self.repo, tag = %request.release.tag_name))]
    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishReport> {
        let content = self.open_asset_file(&request.file_path)?;

        let release = self.ensure_release(&request.release).await?;
        let release_id = release.id();

        let replaced = self.delete_asset(release_id, &request.asset_name).await?;
        let upload_response = self
            .upload_asset(release_id, &request.asset_name, content)
            .await?;

        Ok(PublishReport {
            release,
            replaced,
            uploaded: parse_uploaded_asset(&upload_response),
            upload_response,
        })
    }

    /// Looks up the release for `tag`. `None` means it does not exist.
    pub async fn resolve_release(&self, tag: &str) -> Result<Option<Release>> {
        println!("   resolving {} {}", self.repo, tag);
        self.api.get_release_by_tag(self.repo, tag).await
    }

    /// Reuses the release for `new_release.tag_name` or creates it.
    ///
    /// A failed creation is returned as an error; the id is never read from it.
    pub async fn ensure_release(&self, new_release: &NewRelease) -> Result<ReleaseOutcome> {
        if let Some(existing) = self.resolve_release(&new_release.tag_name).await? {
            println!(
                "      exists {} {} (id {})",
                self.repo, existing.tag_name, existing.id
            );
            print_release_details(&existing);
            return Ok(ReleaseOutcome::Existing(existing.id));
        }

        println!(
            "    creating {} {} on {}",
            self.repo, new_release.tag_name, new_release.target_commitish
        );
        let created = self.api.create_release(self.repo, new_release).await?;
        println!(
            "     created {} {} (id {})",
            self.repo, created.tag_name, created.id
        );
        Ok(ReleaseOutcome::Created(created.id))
    }

    /// Returns the first asset of the release whose name equals `name` exactly.
    pub async fn find_asset(&self, release_id: u64, name: &str) -> Result<Option<ReleaseAsset>> {
        let assets = self.api.list_assets(self.repo, release_id).await?;
        debug!("Release {} has {} asset(s)", release_id, assets.len());
        Ok(assets.into_iter().find(|asset| asset.name == name))
    }

    /// Deletes the asset named `name` if the release has one.
    pub async fn delete_asset(&self, release_id: u64, name: &str) -> Result<DeleteOutcome> {
        let Some(asset) = self.find_asset(release_id, name).await? else {
            println!("   no asset {} to replace", name);
            return Ok(DeleteOutcome::NotFound);
        };

        println!("    deleting {} (id {})", asset.name, asset.id);
        self.api.delete_asset(self.repo, asset.id).await?;
        info!("Deleted asset {} (id {})", asset.name, asset.id);
        Ok(DeleteOutcome::Deleted(asset.id))
    }

    /// Opens the asset file for streaming. Fails without touching the network
    /// when `path` is not a readable regular file.
    pub fn open_asset_file(&self, path: &Path) -> Result<UploadBody> {
        if !self.runtime.is_file(path) {
            bail!("File not found: {}", path.display());
        }
        let file = self.runtime.open(path)?;
        UploadBody::from_file(file).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Uploads `content` as `name` and returns the raw response body.
    pub async fn upload_asset(
        &self,
        release_id: u64,
        name: &str,
        content: UploadBody,
    ) -> Result<String> {
        println!("   uploading {} ({} bytes)", name, content.len());
        let response = self
            .api
            .upload_asset(self.repo, release_id, name, content)
            .await?;

        match parse_uploaded_asset(&response) {
            Some(asset) => println!("    uploaded {} (id {})", asset.name, asset.id),
            None => println!("    uploaded {}", name),
        }
        println!("{}", response);
        Ok(response)
    }
}

fn print_release_details(release: &Release) {
    if let Some(name) = release.name.as_deref().filter(|n| !n.is_empty()) {
        println!("        name {}", name);
    }
    if let Some(target) = release.target_commitish.as_deref() {
        println!("      target {}", target);
    }
    println!(
        "       draft {}, prerelease {}",
        release.draft, release.prerelease
    );
}

/// Reads the new asset's id and name from the upload response.
fn parse_uploaded_asset(response: &str) -> Option<ReleaseAsset> {
    match serde_json::from_str(response) {
        Ok(asset) => Some(asset),
        Err(e) => {
            debug!("Upload response is not asset metadata: {}", e);
            None
        }
    }
}
