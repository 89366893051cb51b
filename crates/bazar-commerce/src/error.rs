//! Commerce error types.

use thiserror::Error;

use crate::catalog::EntryError;
use crate::checkout::FieldError;

/// Errors raised by cart and checkout operations before anything is sent.
#[derive(Error, Debug)]
pub enum CommerceError {
    #[error("No cart item at position {0}")]
    ItemNotInCart(usize),

    #[error("Your cart is empty. Please add items before checkout.")]
    EmptyCart,

    /// Stock quantity that is not a positive whole number.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Every checkout field that failed validation, in form order.
    #[error("Please correct the highlighted fields before proceeding: {}", describe_fields(.0))]
    InvalidForm(Vec<FieldError>),

    /// Every add-book or add-author field that failed validation.
    #[error("Please correct the following fields: {}", describe_entries(.0))]
    InvalidEntry(Vec<EntryError>),

    /// The cart could not be read from or written to storage.
    #[error("Cart storage failed: {0}")]
    Storage(#[from] bazar_cache::CacheError),
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_entries(errors: &[EntryError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
