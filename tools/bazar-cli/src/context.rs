//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use bazar_cache::{Cache, FileStore, Session};
use bazar_data::{BazarApi, FetchClient, ReportUrls, ReqwestTransport};
use bazar_storefront::Storefront;

use crate::config::{find_config, BazarConfig};
use crate::download::TerminalDownloads;
use crate::output::Output;
use crate::toast::TerminalNotifier;

/// Execution context for CLI commands.
pub struct Context {
    pub config: BazarConfig,
    pub output: Output,
    pub cwd: PathBuf,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => find_config(&cwd),
        };
        let config = match &config_path {
            Some(path) => {
                output.debug(&format!("Using config {}", path.display()));
                BazarConfig::load(path)?
            }
            None => BazarConfig::default(),
        };

        Ok(Self {
            config: config.with_env_overrides(),
            output,
            cwd,
            config_path,
        })
    }

    /// Location of the durable storage file.
    pub fn storage_path(&self) -> PathBuf {
        match &self.config.storage.path {
            Some(path) => self.resolve_path(path),
            None => data_dir().join("bazar").join("storage.json"),
        }
    }

    pub fn store(&self) -> Result<FileStore> {
        let path = self.storage_path();
        FileStore::open(&path)
            .with_context(|| format!("Failed to open storage at {}", path.display()))
    }

    pub fn session(&self) -> Result<Session> {
        Ok(Session::load(&Cache::new(self.store()?))?)
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        session.save(&Cache::new(self.store()?))?;
        Ok(())
    }

    /// Build the storefront over the configured services and storage.
    pub fn storefront(&self) -> Result<Storefront<FileStore>> {
        let timeout = self.config.api.timeout();
        let transport = Arc::new(ReqwestTransport::new(timeout)?);
        let client = FetchClient::new(&self.config.api.base_url, transport.clone())
            .with_context(|| format!("Invalid API URL: {}", self.config.api.base_url))?
            .with_retry(self.config.retry.policy());
        let urls = ReportUrls::new(&self.config.reports.base_url)
            .with_context(|| format!("Invalid reports URL: {}", self.config.reports.base_url))?;

        let notifier = Arc::new(TerminalNotifier::new(
            self.output.clone(),
            Duration::from_millis(self.config.toast.duration_ms),
        ));
        let downloads = Arc::new(TerminalDownloads::new(
            transport,
            self.download_dir(),
            self.output.clone(),
        ));

        let mut storefront = Storefront::new(
            BazarApi::new(client),
            urls,
            self.store()?,
            notifier,
            downloads,
        )?;
        storefront.cart = storefront.cart.with_mode(self.config.checkout.mode);
        Ok(storefront)
    }

    /// Directory downloaded reports are written to.
    pub fn download_dir(&self) -> PathBuf {
        match &self.config.reports.download_dir {
            Some(dir) => self.resolve_path(dir),
            None => self.cwd.clone(),
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}
