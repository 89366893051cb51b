//! Cart commands.

use anyhow::Result;
use bazar_commerce::ids::BookId;
use dialoguer::Confirm;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::render;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CartCommand::Show) | None => show(ctx),
        Some(CartCommand::Add { id }) => add(id, ctx).await,
        Some(CartCommand::Remove { position }) => remove(position, ctx),
        Some(CartCommand::Clear { yes }) => clear(yes, ctx),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    render::cart(&ctx.output, &storefront.cart.summary());
    Ok(())
}

async fn add(id: BookId, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;
    let Some(book) = storefront.catalog.details(id).await else {
        return Ok(());
    };
    storefront.cart.add(&book)?;
    ctx.output.info(&format!("Cart: {} item(s)", storefront.cart.cart().len()));
    Ok(())
}

fn remove(position: usize, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;
    let len = storefront.cart.cart().len();
    if position == 0 || position > len {
        ctx.output
            .warn(&format!("No item at position {} (cart has {})", position, len));
        return Ok(());
    }
    let removed = storefront.cart.remove(position - 1)?;
    ctx.output.debug(&format!("Removed \"{}\"", removed.title));
    render::cart(&ctx.output, &storefront.cart.summary());
    Ok(())
}

fn clear(yes: bool, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;
    if storefront.cart.cart().is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} item(s) from the cart?",
                storefront.cart.cart().len()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cart left unchanged");
            return Ok(());
        }
    }

    storefront.cart.clear()?;
    Ok(())
}
