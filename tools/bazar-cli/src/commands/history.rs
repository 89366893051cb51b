//! Order history command.

use anyhow::Result;
use bazar_commerce::ids::UserId;

use super::HistoryArgs;
use crate::context::Context;
use crate::render;

/// Run the history command.
pub async fn run(args: HistoryArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;

    let spinner = ctx.output.spinner("Loading purchase history...");
    let state = match args.user {
        Some(user) => storefront.history.load(Some(&UserId::new(user))).await,
        None => storefront.load_history().await?,
    };
    spinner.finish_and_clear();

    render::history(&ctx.output, &state);
    Ok(())
}
