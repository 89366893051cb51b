//! Session commands.

use anyhow::{bail, Result};

use super::{SessionArgs, SessionCommand};
use crate::context::Context;

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;

    match args.command {
        Some(SessionCommand::Show) | None => {
            if ctx.output.is_json() {
                ctx.output.json(&session);
                return Ok(());
            }
            ctx.output.header("Session");
            ctx.output
                .kv("user", session.user_id.as_deref().unwrap_or("(anonymous)"));
            ctx.output.kv("admin", &session.is_admin.to_string());
            ctx.output
                .kv("storage", &ctx.storage_path().display().to_string());
            return Ok(());
        }
        Some(SessionCommand::Login { user_id }) => {
            let user_id = user_id.trim().to_string();
            if user_id.is_empty() {
                bail!("User id cannot be empty");
            }
            ctx.output.success(&format!("Signed in as {}", user_id));
            session.user_id = Some(user_id);
        }
        Some(SessionCommand::Logout) => {
            session.user_id = None;
            ctx.output.success("Signed out");
        }
        Some(SessionCommand::Admin { enabled }) => {
            session.is_admin = enabled;
            ctx.output
                .success(&format!("Admin features {}", if enabled { "shown" } else { "hidden" }));
            ctx.output
                .debug("The admin flag only changes what is offered; the services authorize requests");
        }
    }

    ctx.save_session(&session)
}
