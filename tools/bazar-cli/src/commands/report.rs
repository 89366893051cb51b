//! Report commands.

use anyhow::Result;
use bazar_storefront::ReportsController;

use super::{ReportArgs, ReportCommand};
use crate::context::Context;

/// Run the report command.
pub async fn run(args: ReportArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let session = storefront.session()?;

    let result = match args.command {
        ReportCommand::History { format } => {
            storefront.reports.purchase_history(format, &session).await
        }
        ReportCommand::Inventory { format } => {
            if !ReportsController::inventory_available(&session) {
                ctx.output
                    .debug("Set the admin flag with `bazar session admin true` to enable this report");
            }
            storefront.reports.inventory(format, &session).await
        }
        ReportCommand::Open => storefront.reports.open_interface().await,
    };

    if let Ok(download) = result {
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::json!({
                "url": download.url,
                "file_name": download.file_name,
            }));
        }
    }
    Ok(())
}
