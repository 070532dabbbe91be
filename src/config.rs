// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::urls;
use crate::status::RetryPolicy;

/// Run configuration, read from YAML. Every field is optional; an empty
/// file scrapes the JWST GO, GTO and DDT listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub go_pages: Vec<GoPage>,
    pub gto_pages: Vec<String>,
    pub ddt_pages: Vec<String>,
    pub status_url: String,
    pub page_timeout_secs: u64,
    pub status: StatusConfig,
    pub output_dir: PathBuf,
    pub basic_info_file: String,
    pub status_file: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoPage {
    pub cycle: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub retries: u32,
    pub timeout_secs: u64,
    pub backoff_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            go_pages: urls::default_go_pages()
                .into_iter()
                .map(|(cycle, url)| GoPage { cycle, url })
                .collect(),
            gto_pages: urls::default_gto_pages(),
            ddt_pages: urls::default_ddt_pages(),
            status_url: urls::STATUS_ENDPOINT.to_string(),
            page_timeout_secs: crate::fetch::DEFAULT_PAGE_TIMEOUT.as_secs(),
            status: StatusConfig::default(),
            output_dir: PathBuf::from("output"),
            basic_info_file: "nirspec_mos_basic_info.csv".to_string(),
            status_file: "nirspec_mos_status.csv".to_string(),
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            retries: policy.retries,
            timeout_secs: policy.timeout.as_secs(),
            backoff_secs: policy.backoff.as_secs(),
        }
    }
}

impl StatusConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            timeout: Duration::from_secs(self.timeout_secs),
            backoff: Duration::from_secs(self.backoff_secs),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn basic_info_path(&self) -> PathBuf {
        self.output_dir.join(&self.basic_info_file)
    }

    pub fn status_path(&self) -> PathBuf {
        self.output_dir.join(&self.status_file)
    }
}
