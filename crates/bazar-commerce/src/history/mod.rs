//! Order history module.

mod order;

pub use order::{
    format_order_date, group_lines, HistoryPayload, HistoryRows, Order, OrderDetail, OrderItem,
    OrderLine, OrderSummary,
};

use serde::{Deserialize, Serialize};

/// Shown in place of an order's lines when they could not be fetched.
pub const DETAIL_ERROR_MESSAGE: &str = "Error loading order details";

/// An order as displayed in the history table.
///
/// `detail_error` is set when the order's lines had to be fetched separately
/// and that request failed; the other orders are unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub order: Order,
    #[serde(default)]
    pub detail_error: Option<String>,
}

impl HistoryEntry {
    pub fn loaded(order: Order) -> Self {
        Self {
            order,
            detail_error: None,
        }
    }

    pub fn detail_failed(summary: OrderSummary, error: impl Into<String>) -> Self {
        Self {
            order: Order::from_summary(summary, Vec::new()),
            detail_error: Some(error.into()),
        }
    }
}
