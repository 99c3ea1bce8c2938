use anyhow::{Result, bail};

use crate::{
    application::{PublishReport, PublishRequest, PublishUseCase},
    runtime::Runtime,
};

pub mod config;
pub mod services;

use config::Config;
use services::build_github;

/// Default ref for newly created releases.
pub const DEFAULT_TARGET_COMMITISH: &str = "main";

/// Create or reuse the release and replace its asset.
#[tracing::instrument(skip(runtime, config, request))]
pub async fn publish<R: Runtime>(
    runtime: R,
    config: Config,
    request: PublishRequest,
) -> Result<PublishReport> {
    if request.release.tag_name.trim().is_empty() {
        bail!("Release tag must not be empty.");
    }
    if request.asset_name.trim().is_empty() {
        bail!("Asset file name must not be empty.");
    }

    let github = build_github(&config)?;
    let use_case = PublishUseCase::new(&runtime, &github, &config.repo);
    let report = use_case.publish(&request).await?;

    println!(
        "   published {} {} {}",
        config.repo, request.release.tag_name, request.asset_name
    );
    Ok(report)
}
