//! Checkout form validation.

use crate::error::CommerceError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use tracing::error;

/// Minimum length of a trimmed shipping address.
pub const MIN_ADDRESS_LEN: usize = 5;

/// Payment methods offered by the checkout form.
pub const PAYMENT_METHODS: &[&str] = &["Credit Card", "PayPal", "Bank Transfer"];

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$";

fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|e| error!(pattern, error = %e, "validation pattern failed to compile"))
        .ok()
}

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| compile(EMAIL_PATTERN)).as_ref()
}

fn phone_pattern() -> Option<&'static Regex> {
    static PHONE: OnceLock<Option<Regex>> = OnceLock::new();
    PHONE.get_or_init(|| compile(PHONE_PATTERN)).as_ref()
}

/// Check an email address has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(email))
}

/// Check a phone number has 10 to 12 digits in the usual groupings.
pub fn is_valid_phone(phone: &str) -> bool {
    phone_pattern().is_some_and(|re| re.is_match(phone))
}

/// Fields of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    ShippingAddress,
    PaymentMethod,
    CustomerEmail,
    PhoneNumber,
}

impl FormField {
    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::ShippingAddress => "Shipping address",
            FormField::PaymentMethod => "Payment method",
            FormField::CustomerEmail => "Email",
            FormField::PhoneNumber => "Phone number",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Offending field.
    pub field: FormField,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raw form input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub shipping_address: String,
    pub payment_method: String,
    pub customer_email: String,
    pub phone_number: String,
}

/// Form input that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedCheckout {
    pub shipping_address: String,
    pub payment_method: String,
    pub customer_email: String,
    pub phone_number: Option<String>,
}

impl CheckoutForm {
    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> Result<ValidatedCheckout, CommerceError> {
        let errors = self.field_errors();
        if !errors.is_empty() {
            return Err(CommerceError::InvalidForm(errors));
        }

        let phone = self.phone_number.trim();
        Ok(ValidatedCheckout {
            shipping_address: self.shipping_address.trim().to_string(),
            payment_method: self.payment_method.clone(),
            customer_email: self.customer_email.trim().to_string(),
            phone_number: (!phone.is_empty()).then(|| phone.to_string()),
        })
    }

    /// All validation failures, in form order.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.shipping_address.trim().chars().count() < MIN_ADDRESS_LEN {
            errors.push(FieldError::new(
                FormField::ShippingAddress,
                format!("Enter at least {} characters", MIN_ADDRESS_LEN),
            ));
        }

        if self.payment_method.is_empty() {
            errors.push(FieldError::new(
                FormField::PaymentMethod,
                "Select a payment method",
            ));
        }

        if !is_valid_email(self.customer_email.trim()) {
            errors.push(FieldError::new(
                FormField::CustomerEmail,
                "Enter a valid email address",
            ));
        }

        let phone = self.phone_number.trim();
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.push(FieldError::new(
                FormField::PhoneNumber,
                "Enter a valid phone number",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_patterns_compile() {
        assert!(Regex::new(EMAIL_PATTERN).is_ok());
        assert!(Regex::new(PHONE_PATTERN).is_ok());
        assert!(email_pattern().is_some());
        assert!(phone_pattern().is_some());
    }

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            shipping_address: "  12 Main Street ".into(),
            payment_method: "Credit Card".into(),
            customer_email: "reader@example.com".into(),
            phone_number: String::new(),
        }
    }

    #[test]
    fn test_valid_form_trims() {
        let checkout = valid_form().validate().unwrap();
        assert_eq!(checkout.shipping_address, "12 Main Street");
        assert_eq!(checkout.phone_number, None);
    }

    #[test]
    fn test_short_address_rejected() {
        let mut form = valid_form();
        form.shipping_address = "  abc  ".into();
        let errors = form.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, FormField::ShippingAddress);
    }

    #[test]
    fn test_all_failures_reported_together() {
        let form = CheckoutForm {
            shipping_address: String::new(),
            payment_method: String::new(),
            customer_email: "not an email".into(),
            phone_number: "12".into(),
        };
        let err = form.validate().unwrap_err();
        match err {
            CommerceError::InvalidForm(fields) => {
                let names: Vec<FormField> = fields.iter().map(|f| f.field).collect();
                assert_eq!(
                    names,
                    vec![
                        FormField::ShippingAddress,
                        FormField::PaymentMethod,
                        FormField::CustomerEmail,
                        FormField::PhoneNumber,
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_email_shapes() {
        for email in ["a@b.co", "first.last@mail.example.org"] {
            assert!(is_valid_email(email), "{email}");
        }
        for email in ["a@b", "a b@c.de", "@c.de", "a@.de x"] {
            assert!(!is_valid_email(email), "{email}");
        }
    }

    #[test]
    fn test_phone_shapes() {
        for phone in ["555-123-4567", "(555) 123 4567", "+5551234567", "555.123.456789"] {
            assert!(is_valid_phone(phone), "{phone}");
        }
        for phone in ["12345", "555-123-45", "phone"] {
            assert!(!is_valid_phone(phone), "{phone}");
        }
    }

    #[test]
    fn test_optional_phone_kept_when_valid() {
        let mut form = valid_form();
        form.phone_number = " 555-123-4567 ".into();
        let checkout = form.validate().unwrap();
        assert_eq!(checkout.phone_number.as_deref(), Some("555-123-4567"));
    }

    #[test]
    fn test_error_message_lists_fields() {
        let mut form = valid_form();
        form.payment_method.clear();
        let msg = form.validate().unwrap_err().to_string();
        assert!(msg.contains("Payment method"));
    }
}
