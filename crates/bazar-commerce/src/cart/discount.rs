//! Category discount rule.
//!
//! A single static offer: buying at least `min_items` books that share a
//! topic takes `discount_percentage` off every book in that topic. Each
//! topic qualifies on its own, so two qualifying topics give two discounts.

use crate::cart::CartItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The same-category offer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryOffer {
    /// Books needed in one topic before the discount applies.
    pub min_items: usize,
    /// Percentage taken off the topic subtotal (0.0 - 100.0).
    pub discount_percentage: f64,
}

impl CategoryOffer {
    /// The storefront's advertised offer: 2 or more books, 15% off.
    pub const STANDARD: CategoryOffer = CategoryOffer {
        min_items: 2,
        discount_percentage: 15.0,
    };

    /// Banner text for the offer.
    pub fn description(&self) -> String {
        format!(
            "Buy {} or more books from the same category and get {}% off!",
            self.min_items,
            format_percentage(self.discount_percentage)
        )
    }

    /// Whether `count` books in one topic earn the discount.
    pub fn qualifies(&self, count: usize) -> bool {
        count >= self.min_items
    }

    /// Discount earned by a topic with the given subtotal.
    pub fn discount_for(&self, category_subtotal: f64) -> f64 {
        category_subtotal * (self.discount_percentage / 100.0)
    }

    /// Evaluate the offer against every topic in the cart.
    ///
    /// Offers are returned in the order their topic first appears.
    pub fn apply(&self, items: &[CartItem]) -> Vec<AppliedOffer> {
        group_by_category(items)
            .into_iter()
            .filter(|group| self.qualifies(group.count))
            .map(|group| AppliedOffer {
                discount: self.discount_for(group.subtotal),
                category: group.category,
                count: group.count,
                category_subtotal: group.subtotal,
                discount_percentage: self.discount_percentage,
            })
            .collect()
    }
}

impl Default for CategoryOffer {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Discount earned by one qualifying topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedOffer {
    /// Topic that qualified.
    pub category: String,
    /// Number of cart lines in the topic.
    pub count: usize,
    /// Unrounded sum of the topic's prices.
    pub category_subtotal: f64,
    /// Unrounded discount for the topic.
    pub discount: f64,
    /// Percentage applied.
    pub discount_percentage: f64,
}

impl AppliedOffer {
    /// Human-readable line for the cart breakdown.
    pub fn describe(&self) -> String {
        format!(
            "Category Discount: {}% off {} books in \"{}\" category",
            format_percentage(self.discount_percentage),
            self.count,
            self.category
        )
    }
}

/// Cart lines sharing one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    /// Topic name.
    pub category: String,
    /// Number of lines.
    pub count: usize,
    /// Unrounded sum of prices, accumulated in cart order.
    pub subtotal: f64,
}

/// Partition cart lines by topic, preserving first-appearance order.
pub fn group_by_category(items: &[CartItem]) -> Vec<CategoryGroup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for item in items {
        match index.get(item.topic.as_str()) {
            Some(&i) => {
                let group = &mut groups[i];
                group.count += 1;
                group.subtotal += item.price;
            }
            None => {
                index.insert(item.topic.as_str(), groups.len());
                groups.push(CategoryGroup {
                    category: item.topic.clone(),
                    count: 1,
                    subtotal: item.price,
                });
            }
        }
    }

    groups
}

fn format_percentage(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("{}", p as i64)
    } else {
        format!("{}", p)
    }
}
