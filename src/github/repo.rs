use anyhow::{Result, bail};

/// Repository coordinates on GitHub.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    /// Builds repository coordinates, rejecting empty or slash-containing parts.
    pub fn new(owner: &str, repo: &str) -> Result<Self> {
        let owner = owner.trim();
        let repo = repo.trim();
        if owner.is_empty() || repo.is_empty() {
            bail!("Repository owner and name must not be empty.");
        }
        if owner.contains('/') || repo.contains('/') {
            bail!(
                "Invalid repository '{}/{}': owner and name must not contain '/'.",
                owner,
                repo
            );
        }
        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
