use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::debug;
use reqwest::{StatusCode, Url};

use crate::http::{ApiError, HttpClient, UploadBody};

use super::repo::RepoId;
use super::types::{NewRelease, Release, ReleaseAsset};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com";

/// The remote operations needed to publish a release asset.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseApi: Send + Sync {
    /// Looks up a release by tag. `Ok(None)` when GitHub answers 404.
    async fn get_release_by_tag(&self, repo: &RepoId, tag: &str) -> Result<Option<Release>>;

    /// Creates a release. Anything but 201 is an [`ApiError`].
    async fn create_release(&self, repo: &RepoId, release: &NewRelease) -> Result<Release>;

    /// Lists the first page of assets attached to a release.
    async fn list_assets(&self, repo: &RepoId, release_id: u64) -> Result<Vec<ReleaseAsset>>;

    /// Deletes an asset by id. Anything but 204 is an [`ApiError`].
    async fn delete_asset(&self, repo: &RepoId, asset_id: u64) -> Result<()>;

    /// Streams `content` as a new asset named `name`; returns the raw response body.
    async fn upload_asset(
        &self,
        repo: &RepoId,
        release_id: u64,
        name: &str,
        content: UploadBody,
    ) -> Result<String>;
}

pub struct GitHub {
    http_client: HttpClient,
    api_url: String,
    upload_url: String,
}

impl GitHub {
    #[tracing::instrument(skip(http_client))]
    pub fn new(http_client: HttpClient, api_url: Option<String>, upload_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let upload_url = upload_url.unwrap_or_else(|| DEFAULT_UPLOAD_URL.to_string());
        Self {
            http_client,
            api_url,
            upload_url,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// `{base}/repos/{owner}/{repo}/{segments...}`, with each segment percent-encoded.
    fn endpoint(base: &str, repo: &RepoId, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(base).with_context(|| format!("Invalid GitHub URL: {}", base))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("GitHub URL cannot be used as a base: {}", base))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.repo.as_str()])
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl ReleaseApi for GitHub {
    #[tracing::instrument(skip(self, repo))]
    async fn get_release_by_tag(&self, repo: &RepoId, tag: &str) -> Result<Option<Release>> {
        let url = Self::endpoint(&self.api_url, repo, &["releases", "tags", tag])?;
        debug!("Looking up release {} of {}...", tag, repo);

        let response = self.http_client.get(url.as_str()).await?;
        match response.status {
            StatusCode::OK => Ok(Some(response.json()?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(ApiError::new("Looking up release", status, response.body).into()),
        }
    }

    #[tracing::instrument(skip(self, repo, release), fields(tag = %release.tag_name))]
    async fn create_release(&self, repo: &RepoId, release: &NewRelease) -> Result<Release> {
        let url = Self::endpoint(&self.api_url, repo, &["releases"])?;
        debug!("Creating release {} of {}...", release.tag_name, repo);

        let response = self
            .http_client
            .post_json(url.as_str(), release)
            .await?
            .expect_status(StatusCode::CREATED, "Creating release")?;

        debug!("Release creation response: {}", response.body);
        response.json()
    }

    #[tracing::instrument(skip(self, repo))]
    async fn list_assets(&self, repo: &RepoId, release_id: u64) -> Result<Vec<ReleaseAsset>> {
        let release_id = release_id.to_string();
        let url = Self::endpoint(&self.api_url, repo, &["releases", &release_id, "assets"])?;

        self.http_client
            .get(url.as_str())
            .await?
            .expect_status(StatusCode::OK, "Listing release assets")?
            .json()
    }

    #[tracing::instrument(skip(self, repo))]
    async fn delete_asset(&self, repo: &RepoId, asset_id: u64) -> Result<()> {
        let asset_id = asset_id.to_string();
        let url = Self::endpoint(&self.api_url, repo, &["releases", "assets", &asset_id])?;

        self.http_client
            .delete(url.as_str())
            .await?
            .expect_status(StatusCode::NO_CONTENT, "Deleting asset")?;
        Ok(())
    }

    #[tracing::instrument(skip(self, repo, content), fields(size = content.len()))]
    async fn upload_asset(
        &self,
        repo: &RepoId,
        release_id: u64,
        name: &str,
        content: UploadBody,
    ) -> Result<String> {
        let release_id = release_id.to_string();
        let mut url = Self::endpoint(&self.upload_url, repo, &["releases", &release_id, "assets"])?;
        url.query_pairs_mut().append_pair("name", name);

        let response = self
            .http_client
            .post_stream(url.as_str(), content)
            .await?
            .expect_status(StatusCode::CREATED, "Uploading asset")?;
        Ok(response.body)
    }
}
