use anyhow::Result;
use clap::Parser;
use ghrp::application::PublishRequest;
use ghrp::commands::{DEFAULT_TARGET_COMMITISH, config::Config, publish};
use ghrp::github::NewRelease;
use std::path::PathBuf;

/// ghrp - GitHub Release Publisher
///
/// Create a GitHub release for a tag (or reuse the existing one) and upload a
/// file to it, replacing any asset with the same name.
///
/// Example:
///   ghrp --github_token "$TOKEN" --repository_owner owner --repository_name repo \
///        --release_tag v1.0.0 --new_release_name "v1.0.0" --new_release_description "Notes" \
///        --file_path dist/bin.tar.gz --file_name bin.tar.gz
#[derive(Parser, Debug)]
#[command(author, version = env!("GHRP_VERSION"), about)]
struct Cli {
    /// GitHub access token
    #[arg(long = "github_token", value_name = "TOKEN")]
    github_token: String,

    /// GitHub repository owner
    #[arg(long = "repository_owner", value_name = "OWNER")]
    repository_owner: String,

    /// GitHub repository name
    #[arg(long = "repository_name", value_name = "REPO")]
    repository_name: String,

    /// Release tag
    #[arg(long = "release_tag", value_name = "TAG")]
    release_tag: String,

    /// New release name (used only when the release is created)
    #[arg(long = "new_release_name", value_name = "NAME")]
    new_release_name: String,

    /// New release description (used only when the release is created)
    #[arg(long = "new_release_description", value_name = "TEXT")]
    new_release_description: String,

    /// Path to the file to upload
    #[arg(long = "file_path", value_name = "PATH")]
    file_path: PathBuf,

    /// Name for the uploaded file
    #[arg(long = "file_name", value_name = "NAME")]
    file_name: String,

    /// Branch or commit the tag is created from when the release is new
    #[arg(long = "target_commitish", value_name = "REF", default_value = DEFAULT_TARGET_COMMITISH)]
    target_commitish: String,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", hide = true)]
    api_url: Option<String>,

    /// GitHub upload URL (defaults to https://uploads.github.com)
    #[arg(long = "upload-url", value_name = "URL", hide = true)]
    upload_url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = Config::new(
        &cli.github_token,
        &cli.repository_owner,
        &cli.repository_name,
        cli.api_url,
        cli.upload_url,
    )?;
    let request = PublishRequest {
        release: NewRelease::new(
            cli.release_tag,
            cli.target_commitish,
            cli.new_release_name,
            cli.new_release_description,
        ),
        file_path: cli.file_path,
        asset_name: cli.file_name,
    };

    publish(ghrp::runtime::RealRuntime, config, request).await?;
    Ok(())
}
