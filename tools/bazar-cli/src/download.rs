//! Report downloads for the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bazar_data::{Method, RequestBuilder, Transport};
use bazar_storefront::{Download, DownloadMode, DownloadTrigger, StorefrontError};
use tracing::debug;

use crate::output::Output;

/// Saves background downloads into a directory and prints links that a
/// browser would open in a new tab.
pub struct TerminalDownloads {
    transport: Arc<dyn Transport>,
    dir: PathBuf,
    output: Output,
}

impl TerminalDownloads {
    pub fn new(transport: Arc<dyn Transport>, dir: PathBuf, output: Output) -> Self {
        Self {
            transport,
            dir,
            output,
        }
    }
}

#[async_trait]
impl DownloadTrigger for TerminalDownloads {
    async fn trigger(&self, download: Download) -> Result<(), StorefrontError> {
        match download.mode {
            DownloadMode::NewTab => {
                self.output.info(&format!("Open {}", download.url));
                Ok(())
            }
            DownloadMode::HiddenFrame => {
                let spinner = self.output.spinner("Downloading report...");
                let request = RequestBuilder::new(Method::Get, download.url.as_str()).build();
                let result = self.transport.send(request).await;
                spinner.finish_and_clear();

                let response = result?.error_for_status()?;
                let path = self.dir.join(&download.file_name);
                tokio::fs::create_dir_all(&self.dir)
                    .await
                    .map_err(|e| StorefrontError::Download(e.to_string()))?;
                tokio::fs::write(&path, response.bytes())
                    .await
                    .map_err(|e| StorefrontError::Download(format!("{}: {}", path.display(), e)))?;

                debug!(path = %path.display(), bytes = response.bytes().len(), "report saved");
                self.output.success(&format!("Saved {}", path.display()));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazar_data::{FetchError, Request, Response};
    use std::collections::HashMap;

    struct StaticTransport(u16, &'static [u8]);

    #[async_trait]
    impl Transport for StaticTransport {
        async fn send(&self, _request: Request) -> Result<Response, FetchError> {
            Ok(Response::new(self.0, HashMap::new(), self.1.to_vec()))
        }
    }

    fn download(mode: DownloadMode) -> Download {
        Download {
            url: "http://localhost:5002/api/reports/purchase-history?format=pdf".into(),
            mode,
            file_name: "purchase-history-report.pdf".into(),
        }
    }

    #[tokio::test]
    async fn test_hidden_download_saves_file() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = TerminalDownloads::new(
            Arc::new(StaticTransport(200, b"%PDF-1.4")),
            dir.path().join("reports"),
            Output::new(false, true),
        );

        downloads.trigger(download(DownloadMode::HiddenFrame)).await.unwrap();
        let saved = std::fs::read(dir.path().join("reports").join("purchase-history-report.pdf")).unwrap();
        assert_eq!(saved, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_error_status_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = TerminalDownloads::new(
            Arc::new(StaticTransport(500, b"{\"error\": \"render failed\"}")),
            dir.path().to_path_buf(),
            Output::new(false, true),
        );

        let err = downloads
            .trigger(download(DownloadMode::HiddenFrame))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "render failed");
        assert!(!dir.path().join("purchase-history-report.pdf").exists());
    }

    #[tokio::test]
    async fn test_new_tab_only_prints() {
        let downloads = TerminalDownloads::new(
            Arc::new(StaticTransport(500, b"")),
            PathBuf::from("/nonexistent"),
            Output::new(false, true),
        );
        downloads.trigger(download(DownloadMode::NewTab)).await.unwrap();
    }
}
