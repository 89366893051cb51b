//! Purchase history panel.

use bazar_commerce::history::{
    group_lines, HistoryEntry, HistoryRows, Order, OrderSummary, DETAIL_ERROR_MESSAGE,
};
use bazar_commerce::ids::UserId;
use bazar_data::BazarApi;
use futures::future::join_all;
use tracing::{debug, warn};

pub const EMPTY_HISTORY_MESSAGE: &str = "No purchase history found.";
pub const HISTORY_ERROR_MESSAGE: &str = "Error loading purchase history. Please try again later.";

/// What the history panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryState {
    Orders(Vec<HistoryEntry>),
    Empty,
    Error(String),
}

impl HistoryState {
    pub fn entries(&self) -> &[HistoryEntry] {
        match self {
            HistoryState::Orders(entries) => entries,
            _ => &[],
        }
    }

    /// Placeholder text when there are no orders to list.
    pub fn message(&self) -> Option<&str> {
        match self {
            HistoryState::Orders(_) => None,
            HistoryState::Empty => Some(EMPTY_HISTORY_MESSAGE),
            HistoryState::Error(message) => Some(message.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryView {
    api: BazarApi,
}

impl HistoryView {
    pub fn new(api: BazarApi) -> Self {
        Self { api }
    }

    /// Load past orders, scoped to `user` when one is known.
    ///
    /// Whatever shape the server answers with is normalized into orders with
    /// their lines. When only summaries come back, each order's lines are
    /// fetched separately and a failure marks that order alone.
    pub async fn load(&self, user: Option<&UserId>) -> HistoryState {
        let rows = match user {
            Some(user) => self.api.purchase_history(Some(user)).await,
            None => self.api.orders().await,
        };

        let orders = match rows {
            Ok(HistoryRows::Grouped(orders)) => orders.into_iter().map(HistoryEntry::loaded).collect(),
            Ok(HistoryRows::Flat(lines)) => group_lines(lines)
                .into_iter()
                .map(HistoryEntry::loaded)
                .collect(),
            Ok(HistoryRows::Summaries(summaries)) => self.with_details(summaries).await,
            Err(e) => {
                warn!(error = %e, "history request failed");
                return HistoryState::Error(HISTORY_ERROR_MESSAGE.to_string());
            }
        };

        debug!(orders = orders.len(), "history loaded");
        if orders.is_empty() {
            HistoryState::Empty
        } else {
            HistoryState::Orders(orders)
        }
    }

    async fn with_details(&self, summaries: Vec<OrderSummary>) -> Vec<HistoryEntry> {
        join_all(summaries.into_iter().map(|summary| async move {
            match self.api.order_detail(&summary.order_id).await {
                Ok(detail) => HistoryEntry::loaded(Order::from_summary(summary, detail.items)),
                Err(e) => {
                    warn!(order_id = %summary.order_id, error = %e, "order detail failed");
                    HistoryEntry::detail_failed(summary, DETAIL_ERROR_MESSAGE)
                }
            }
        }))
        .await
    }
}
