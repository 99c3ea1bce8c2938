use anyhow::{Result, bail};

use crate::github::RepoId;

/// Connection settings shared by every API call of a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub repo: RepoId,
    /// Overrides the REST API host (GitHub Enterprise, tests).
    pub api_url: Option<String>,
    /// Overrides the asset upload host.
    pub upload_url: Option<String>,
}

impl Config {
    pub fn new(
        token: &str,
        owner: &str,
        repo: &str,
        api_url: Option<String>,
        upload_url: Option<String>,
    ) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            bail!("GitHub token must not be empty.");
        }

        Ok(Self {
            token: token.to_string(),
            repo: RepoId::new(owner, repo)?,
            api_url,
            upload_url,
        })
    }
}
