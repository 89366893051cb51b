//! Shopping cart module.
//!
//! Contains the persisted cart, its pricing, and the category discount rule.

mod cart;
mod discount;
mod pricing;

pub use cart::{Cart, CartItem, CART_ITEMS_KEY};
pub use discount::{group_by_category, AppliedOffer, CategoryGroup, CategoryOffer};
pub use pricing::CartTotals;
