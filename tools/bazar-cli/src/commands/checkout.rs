//! Checkout command.

use anyhow::Result;
use bazar_commerce::checkout::{
    is_valid_email, is_valid_phone, CheckoutForm, MIN_ADDRESS_LEN, PAYMENT_METHODS,
};
use bazar_commerce::CommerceError;
use bazar_storefront::StorefrontError;
use dialoguer::{Confirm, Input, Select};

use super::CheckoutArgs;
use crate::context::Context;
use crate::render;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;
    if let Some(mode) = args.mode {
        storefront.cart = storefront.cart.with_mode(mode);
    }

    let summary = storefront.cart.summary();
    if summary.checkout_enabled {
        render::cart(&ctx.output, &summary);
    }

    // No prompts for an empty cart; the controller rejects it.
    let form = if summary.checkout_enabled {
        collect_form(&args)?
    } else {
        CheckoutForm::default()
    };

    if summary.checkout_enabled && !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Place order for {}?",
                summary.totals.display_total().display()
            ))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner(&format!(
        "Submitting {} purchase(s) ({})...",
        summary.badge,
        storefront.cart.mode()
    ));
    let result = storefront.cart.checkout(&form).await;
    spinner.finish_and_clear();

    match result {
        Ok(report) => {
            if ctx.output.is_json() {
                let outcomes: Vec<_> = report
                    .outcomes()
                    .iter()
                    .map(|o| {
                        serde_json::json!({
                            "book_id": o.item.id,
                            "title": o.item.title,
                            "order_id": o.result.as_ref().ok().and_then(|r| r.order_id.clone()),
                            "error": o.error(),
                        })
                    })
                    .collect();
                ctx.output.json(&outcomes);
            } else if report.failure_count() > 0 {
                for failed in report.failures() {
                    ctx.output.list_item(&format!(
                        "{}: {}",
                        failed.item.title,
                        failed.error().unwrap_or_default()
                    ));
                }
            }
        }
        Err(StorefrontError::Commerce(CommerceError::InvalidForm(fields))) => {
            for field in fields {
                ctx.output
                    .list_item(&format!("{}: {}", field.field.label(), field.message));
            }
        }
        Err(e) => ctx.output.debug(&e.to_string()),
    }
    Ok(())
}

/// Fill the form from flags, prompting for anything missing.
///
/// Prompts validate as the user types; flag values are validated by the
/// controller along with everything else.
fn collect_form(args: &CheckoutArgs) -> Result<CheckoutForm> {
    let shipping_address = match &args.address {
        Some(address) => address.clone(),
        None => Input::<String>::new()
            .with_prompt("Shipping address")
            .validate_with(|input: &String| -> Result<(), String> {
                if input.trim().chars().count() >= MIN_ADDRESS_LEN {
                    Ok(())
                } else {
                    Err(format!("Enter at least {} characters", MIN_ADDRESS_LEN))
                }
            })
            .interact_text()?,
    };

    let payment_method = match &args.payment {
        Some(payment) => payment.clone(),
        None => {
            let selection = Select::new()
                .with_prompt("Payment method")
                .items(PAYMENT_METHODS)
                .default(0)
                .interact()?;
            PAYMENT_METHODS[selection].to_string()
        }
    };

    let customer_email = match &args.email {
        Some(email) => email.clone(),
        None => Input::<String>::new()
            .with_prompt("Email")
            .validate_with(|input: &String| -> Result<(), String> {
                if is_valid_email(input.trim()) {
                    Ok(())
                } else {
                    Err("Enter a valid email address".to_string())
                }
            })
            .interact_text()?,
    };

    let phone_number = match &args.phone {
        Some(phone) => phone.clone(),
        None => Input::<String>::new()
            .with_prompt("Phone (optional)")
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                if input.trim().is_empty() || is_valid_phone(input.trim()) {
                    Ok(())
                } else {
                    Err("Enter a valid phone number".to_string())
                }
            })
            .interact_text()?,
    };

    Ok(CheckoutForm {
        shipping_address,
        payment_method,
        customer_email,
        phone_number,
    })
}
