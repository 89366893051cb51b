//! Browsing commands.

use anyhow::Result;

use super::SearchArgs;
use crate::context::Context;
use crate::render;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let label = args.query.join(" ");

    let spinner = ctx.output.spinner(&format!("Searching for \"{}\"...", label));
    let view = storefront.catalog.search(&label).await;
    spinner.finish_and_clear();

    render::search(&ctx.output, &view);
    Ok(())
}

/// Show the home page recommendations.
pub async fn home(ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;

    let spinner = ctx.output.spinner("Loading recommendations...");
    let view = storefront.catalog.home().await;
    spinner.finish_and_clear();

    render::home(&ctx.output, &view);
    if view.fallback {
        ctx.output.debug("Catalog unavailable, showing default recommendations");
    }
    ctx.output.info(&format!("Cart: {} item(s)", storefront.cart.cart().len()));
    Ok(())
}
