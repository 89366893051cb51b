//! URLs of the reporting service.
//!
//! Reports are rendered server-side; the client only builds the link and
//! hands it to whatever performs the download.

use crate::FetchError;
use bazar_commerce::ids::UserId;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Document format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Excel,
}

impl ReportFormat {
    /// Value of the `format` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "excel",
        }
    }

    /// File extension of the downloaded document.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}

/// Which report a URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    PurchaseHistory,
    Inventory,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::PurchaseHistory => "purchase-history",
            ReportKind::Inventory => "inventory",
        }
    }
}

/// Builds reporting-service URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportUrls {
    base: Url,
}

impl ReportUrls {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { base })
    }

    /// `{base}/api/reports/purchase-history?format=..[&user_id=..]`
    pub fn purchase_history(&self, format: ReportFormat, user_id: Option<&UserId>) -> Url {
        let mut url = self.report(ReportKind::PurchaseHistory, format);
        if let Some(user) = user_id {
            url.query_pairs_mut().append_pair("user_id", user.as_str());
        }
        url
    }

    /// `{base}/api/reports/inventory?format=..`
    pub fn inventory(&self, format: ReportFormat) -> Url {
        self.report(ReportKind::Inventory, format)
    }

    /// Root of the reporting service's own interface.
    pub fn interface(&self) -> Url {
        self.base.clone()
    }

    fn report(&self, kind: ReportKind, format: ReportFormat) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "reports", kind.as_str()]);
        }
        url.query_pairs_mut().append_pair("format", format.as_str());
        url
    }
}
