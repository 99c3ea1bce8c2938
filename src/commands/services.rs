//! Service factory for building the authenticated GitHub client.

use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};

use crate::{github::GitHub, http::HttpClient};

use super::config::Config;

pub const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = "ghrp-cli";

/// Build an HTTP client that sends the token, media type and API version on every request
pub fn build_http_client(token: &str) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
    auth_value.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth_value);
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    headers.insert(
        HeaderName::from_static("x-github-api-version"),
        HeaderValue::from_static(GITHUB_API_VERSION),
    );
    debug!("HTTP client configured with authentication");

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()?;

    Ok(HttpClient::new(client))
}

/// Build the GitHub API client from configuration
pub fn build_github(config: &Config) -> Result<GitHub> {
    let http_client = build_http_client(&config.token)?;
    Ok(GitHub::new(
        http_client,
        config.api_url.clone(),
        config.upload_url.clone(),
    ))
}
