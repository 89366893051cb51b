//! Report downloads.
//!
//! The reporting service renders documents itself. This component builds
//! the link and hands it to a [`DownloadTrigger`], which decides what a
//! download means on the current surface.

use crate::notify::Notifier;
use crate::StorefrontError;
use async_trait::async_trait;
use bazar_cache::Session;
use bazar_commerce::ids::UserId;
use bazar_data::{ReportFormat, ReportKind, ReportUrls};
use std::sync::Arc;
use tracing::{info, warn};

/// How a report link is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMode {
    /// Fetch in the background and save the document.
    HiddenFrame,
    /// Hand the link to the user to open.
    NewTab,
}

/// A report link ready to be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub url: String,
    pub mode: DownloadMode,
    /// Suggested file name for saved documents.
    pub file_name: String,
}

/// Performs downloads for the current surface.
#[async_trait]
pub trait DownloadTrigger: Send + Sync {
    async fn trigger(&self, download: Download) -> Result<(), StorefrontError>;
}

/// Report buttons of the history panel.
#[derive(Clone)]
pub struct ReportsController {
    urls: ReportUrls,
    trigger: Arc<dyn DownloadTrigger>,
    notifier: Arc<dyn Notifier>,
}

impl ReportsController {
    pub fn new(
        urls: ReportUrls,
        trigger: Arc<dyn DownloadTrigger>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            urls,
            trigger,
            notifier,
        }
    }

    /// Download the purchase history report, scoped to the session's user.
    pub async fn purchase_history(
        &self,
        format: ReportFormat,
        session: &Session,
    ) -> Result<Download, StorefrontError> {
        let user = session.user_id.as_deref().map(UserId::new);
        let url = self.urls.purchase_history(format, user.as_ref());
        self.notifier.info(&format!(
            "Generating {} report...",
            format.as_str().to_uppercase()
        ));
        let download = Download {
            url: url.to_string(),
            mode: DownloadMode::HiddenFrame,
            file_name: file_name(ReportKind::PurchaseHistory, format),
        };
        self.start(download).await
    }

    /// Open the inventory report.
    ///
    /// Only offered when the session carries the admin flag. The flag is a
    /// display hint; the reporting service decides who may read the report.
    pub async fn inventory(
        &self,
        format: ReportFormat,
        session: &Session,
    ) -> Result<Download, StorefrontError> {
        if !session.is_admin {
            warn!("inventory report requested without admin flag");
            let err = StorefrontError::AdminOnly;
            self.notifier.error(&err.to_string());
            return Err(err);
        }
        let download = Download {
            url: self.urls.inventory(format).to_string(),
            mode: DownloadMode::NewTab,
            file_name: file_name(ReportKind::Inventory, format),
        };
        self.start(download).await
    }

    /// Open the reporting service's own interface.
    pub async fn open_interface(&self) -> Result<Download, StorefrontError> {
        let download = Download {
            url: self.urls.interface().to_string(),
            mode: DownloadMode::NewTab,
            file_name: String::new(),
        };
        self.start(download).await
    }

    /// Whether the inventory report button should be shown.
    pub fn inventory_available(session: &Session) -> bool {
        session.is_admin
    }

    async fn start(&self, download: Download) -> Result<Download, StorefrontError> {
        info!(url = %download.url, mode = ?download.mode, "starting report download");
        if let Err(e) = self.trigger.trigger(download.clone()).await {
            self.notifier.error(&e.to_string());
            return Err(e);
        }
        Ok(download)
    }
}

fn file_name(kind: ReportKind, format: ReportFormat) -> String {
    format!("{}-report.{}", kind.as_str(), format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTrigger {
        seen: Mutex<Vec<Download>>,
        fail: bool,
    }

    #[async_trait]
    impl DownloadTrigger for RecordingTrigger {
        async fn trigger(&self, download: Download) -> Result<(), StorefrontError> {
            if self.fail {
                return Err(StorefrontError::Download("connection refused".into()));
            }
            self.seen.lock().unwrap().push(download);
            Ok(())
        }
    }

    fn controller(trigger: Arc<RecordingTrigger>) -> (RecordingNotifier, ReportsController) {
        let notifier = RecordingNotifier::new();
        let urls = ReportUrls::new("http://localhost:5002").unwrap();
        let controller = ReportsController::new(urls, trigger, Arc::new(notifier.clone()));
        (notifier, controller)
    }

    #[tokio::test]
    async fn test_history_report_uses_session_user() {
        let trigger = Arc::new(RecordingTrigger::default());
        let (notifier, reports) = controller(trigger.clone());
        let session = Session {
            user_id: Some("42".into()),
            is_admin: false,
        };

        let download = reports
            .purchase_history(ReportFormat::Excel, &session)
            .await
            .unwrap();
        assert_eq!(
            download.url,
            "http://localhost:5002/api/reports/purchase-history?format=excel&user_id=42"
        );
        assert_eq!(download.mode, DownloadMode::HiddenFrame);
        assert_eq!(download.file_name, "purchase-history-report.xlsx");
        assert_eq!(notifier.messages(), vec!["Generating EXCEL report...".to_string()]);
        assert_eq!(trigger.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_inventory_needs_admin_flag() {
        let trigger = Arc::new(RecordingTrigger::default());
        let (_, reports) = controller(trigger.clone());

        let err = reports
            .inventory(ReportFormat::Pdf, &Session::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::AdminOnly));
        assert!(trigger.seen.lock().unwrap().is_empty());

        let admin = Session {
            user_id: None,
            is_admin: true,
        };
        let download = reports.inventory(ReportFormat::Pdf, &admin).await.unwrap();
        assert_eq!(download.mode, DownloadMode::NewTab);
        assert!(download.url.ends_with("/api/reports/inventory?format=pdf"));
    }

    #[tokio::test]
    async fn test_trigger_failure_is_toasted() {
        let trigger = Arc::new(RecordingTrigger {
            fail: true,
            ..Default::default()
        });
        let (notifier, reports) = controller(trigger);

        assert!(reports.open_interface().await.is_err());
        assert_eq!(
            notifier.messages(),
            vec!["Download failed: connection refused".to_string()]
        );
    }
}
