//! Startup configuration: defaults, optional TOML file, environment, then CLI flags.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use client_core::{DEFAULT_CATALOG_URL, DEFAULT_REQUEST_TIMEOUT};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "product_grid.toml";
pub const DEFAULT_TITLE: &str = "Product Grid";

pub const ENV_CATALOG_URL: &str = "PRODUCT_GRID_CATALOG_URL";
pub const ENV_TITLE: &str = "PRODUCT_GRID_TITLE";
pub const ENV_TIMEOUT_SECS: &str = "PRODUCT_GRID_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "product-grid", about = "Reveal, navigate, and reorder a grid of catalog products")]
pub struct Cli {
    /// Catalog endpoint returning a JSON array of products.
    #[arg(long)]
    pub catalog_url: Option<String>,
    /// TOML config file (defaults to ./product_grid.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Heading shown above the grid.
    #[arg(long)]
    pub title: Option<String>,
    /// tracing filter directive, e.g. `info` or `client_core=debug`.
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    catalog_url: Option<String>,
    title: Option<String>,
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub catalog_url: Url,
    pub title: String,
    pub request_timeout: Duration,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            catalog_url: Url::parse(DEFAULT_CATALOG_URL).expect("default catalog url is valid"),
            title: DEFAULT_TITLE.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

fn parse_catalog_url(raw: &str, origin: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("invalid catalog url {raw:?} from {origin}"))?;
    anyhow::ensure!(
        matches!(url.scheme(), "http" | "https"),
        "catalog url from {origin} must be http(s), got {url}"
    );
    Ok(url)
}

fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse config file {}", path.display()))
}

impl StartupConfig {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        Self::resolve(cli, |name| std::env::var(name).ok())
    }

    /// Later layers win: defaults, file, environment, CLI.
    pub fn resolve(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut settings = Self::default();

        let file_cfg = match &cli.config {
            Some(path) => Some(read_file_config(path)?),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Some(read_file_config(default_path)?)
                } else {
                    None
                }
            }
        };
        if let Some(file_cfg) = file_cfg {
            if let Some(v) = file_cfg.catalog_url {
                settings.catalog_url = parse_catalog_url(&v, "config file")?;
            }
            if let Some(v) = file_cfg.title {
                settings.title = v;
            }
            if let Some(v) = file_cfg.request_timeout_secs {
                settings.request_timeout = Duration::from_secs(v);
            }
        }

        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        if let Some(v) = env(ENV_CATALOG_URL) {
            settings.catalog_url = parse_catalog_url(&v, ENV_CATALOG_URL)?;
        }
        if let Some(v) = env(ENV_TITLE) {
            settings.title = v;
        }
        if let Some(v) = env(ENV_TIMEOUT_SECS) {
            let secs: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be whole seconds, got {v:?}"))?;
            settings.request_timeout = Duration::from_secs(secs);
        }

        if let Some(v) = &cli.catalog_url {
            settings.catalog_url = parse_catalog_url(v, "--catalog-url")?;
        }
        if let Some(v) = &cli.title {
            settings.title = v.clone();
        }

        anyhow::ensure!(
            !settings.request_timeout.is_zero(),
            "request timeout must be greater than zero"
        );
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
