//! Cart panel and checkout.

use crate::notify::{Notifier, Toast, ToastLevel, LONG_TOAST_DURATION};
use crate::StorefrontError;
use bazar_cache::KvStore;
use bazar_commerce::cart::{Cart, CartItem, CartTotals};
use bazar_commerce::catalog::Book;
use bazar_commerce::checkout::{
    plan_purchases, CheckoutForm, CheckoutMode, CheckoutReport, PurchaseOutcome, PurchaseRequest,
};
use bazar_commerce::CommerceError;
use bazar_data::BazarApi;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

const FORM_ERROR_MESSAGE: &str = "Please correct the highlighted fields before proceeding";

/// Everything the cart panel renders.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    /// Offer descriptions for the special offers banner.
    pub offers: Vec<String>,
    /// Applied offers, one line per qualifying category.
    pub applied: Vec<String>,
    /// Number of lines, shown on the cart badge.
    pub badge: usize,
    pub checkout_enabled: bool,
}

/// Owns the cart and drives checkout against the order service.
pub struct CartController<S> {
    cart: Cart<S>,
    api: BazarApi,
    notifier: Arc<dyn Notifier>,
    mode: CheckoutMode,
}

impl<S: KvStore> CartController<S> {
    pub fn new(cart: Cart<S>, api: BazarApi, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            cart,
            api,
            notifier,
            mode: CheckoutMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: CheckoutMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> CheckoutMode {
        self.mode
    }

    pub fn cart(&self) -> &Cart<S> {
        &self.cart
    }

    pub fn add(&mut self, book: &Book) -> Result<(), StorefrontError> {
        self.cart.add(book)?;
        self.notifier.success("Book added to cart!");
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<CartItem, StorefrontError> {
        let removed = self.cart.remove(index)?;
        self.notifier.info("Book removed from cart");
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<(), StorefrontError> {
        self.cart.clear()?;
        self.notifier.info("Cart cleared");
        Ok(())
    }

    pub fn summary(&self) -> CartSummary {
        let totals = self.cart.totals();
        let applied = totals.applied_offers.iter().map(|o| o.describe()).collect();
        CartSummary {
            items: self.cart.items().to_vec(),
            offers: vec![self.cart.offer().description()],
            applied,
            badge: self.cart.len(),
            checkout_enabled: !self.cart.is_empty(),
            totals,
        }
    }

    /// Purchase every cart line.
    ///
    /// Nothing is sent when the cart is empty or the form is invalid. Lines
    /// that were bought leave the cart; failed lines stay for another try.
    pub async fn checkout(&mut self, form: &CheckoutForm) -> Result<CheckoutReport, StorefrontError> {
        if self.cart.is_empty() {
            let err = CommerceError::EmptyCart;
            self.notifier.notify(
                Toast::new(ToastLevel::Danger, err.to_string()).with_duration(LONG_TOAST_DURATION),
            );
            return Err(err.into());
        }

        let checkout = match form.validate() {
            Ok(checkout) => checkout,
            Err(e) => {
                self.notifier.notify(
                    Toast::new(ToastLevel::Danger, FORM_ERROR_MESSAGE)
                        .with_duration(LONG_TOAST_DURATION),
                );
                return Err(e.into());
            }
        };

        let plan = plan_purchases(self.cart.items(), &checkout, self.cart.offer());
        info!(items = plan.len(), mode = %self.mode, "submitting checkout");

        let outcomes = match self.mode {
            CheckoutMode::Sequential => {
                let mut outcomes = Vec::with_capacity(plan.len());
                for (item, request) in plan {
                    outcomes.push(submit(&self.api, item, request).await);
                }
                outcomes
            }
            CheckoutMode::Concurrent => {
                let api = &self.api;
                join_all(
                    plan.into_iter()
                        .map(|(item, request)| submit(api, item, request)),
                )
                .await
            }
        };

        let report = CheckoutReport::new(outcomes);
        if report.all_succeeded() {
            self.cart.clear()?;
        } else {
            self.cart.remove_purchased(&report.purchased_ids())?;
        }
        info!(
            purchased = report.success_count(),
            failed = report.failure_count(),
            remaining = self.cart.len(),
            "checkout finished"
        );

        self.announce(&report);
        Ok(report)
    }

    fn announce(&self, report: &CheckoutReport) {
        if let Some(message) = report.success_message() {
            self.notifier.notify(
                Toast::new(ToastLevel::Success, message).with_duration(LONG_TOAST_DURATION),
            );
        }
        if let Some(savings) = report.savings_message() {
            self.notifier.info(&savings);
        }
        if let Some(message) = report.failure_message() {
            self.notifier.notify(
                Toast::new(ToastLevel::Danger, message).with_duration(LONG_TOAST_DURATION),
            );
        }
    }
}

async fn submit(api: &BazarApi, item: CartItem, request: PurchaseRequest) -> PurchaseOutcome {
    match api.purchase_once(item.id, &request).await {
        Ok(response) => PurchaseOutcome::from_response(item, response),
        Err(e) => {
            warn!(book_id = %item.id, error = %e, "purchase failed");
            PurchaseOutcome::failed(item, e.to_string())
        }
    }
}
