// src/config.rs
//
// Board configuration: where the feed endpoints live and the opaque
// authorization credential. Values come from a YAML file with environment
// overrides; the credential may be absent, in which case no fetch is ever
// attempted.

use std::{env, fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const BASE_URL_ENV: &str = "ONCALLBOARD_BASE_URL";
pub const CREDENTIAL_ENV: &str = "ONCALLBOARD_CREDENTIAL";

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    credential: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub base_url: Url,
    /// Pre-encoded Basic credential, opaque to this crate.
    pub credential: Option<String>,
}

/// Load configuration from `path`, overridden by environment variables.
/// The file may be missing as long as the base URL arrives via environment.
pub fn load(path: &Path) -> Result<BoardConfig> {
    let file = match fs::read_to_string(path) {
        Ok(text) => serde_yaml::from_str::<FileConfig>(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?,
        Err(_) => {
            debug!(path = %path.display(), "no config file; using environment only");
            FileConfig::default()
        }
    };

    let base = env::var(BASE_URL_ENV)
        .ok()
        .or(file.base_url)
        .with_context(|| format!("no base_url in {} or ${BASE_URL_ENV}", path.display()))?;
    let mut base_url =
        Url::parse(&base).with_context(|| format!("invalid base URL {base:?}"))?;
    // feed_url() joins relative paths, so the base must end with a slash.
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }

    let credential = env::var(CREDENTIAL_ENV)
        .ok()
        .or(file.credential)
        .filter(|c| !c.trim().is_empty());

    Ok(BoardConfig {
        base_url,
        credential,
    })
}
