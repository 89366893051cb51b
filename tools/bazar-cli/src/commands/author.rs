//! Author commands.

use anyhow::Result;
use bazar_commerce::catalog::{Author, NewAuthorForm};

use super::book::field;
use super::{AuthorArgs, AuthorCommand};
use crate::context::Context;

/// Run the author command.
pub async fn run(args: AuthorArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AuthorCommand::Add { name, age } => add(name, age, ctx).await,
        AuthorCommand::List { filter } => list(filter.as_deref(), ctx).await,
    }
}

async fn add(name: Option<String>, age: Option<String>, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let form = NewAuthorForm {
        name: field(name, "Name", true)?,
        age: field(age, "Age", true)?,
    };

    if let Ok(created) = storefront.catalog.create_author(&form).await {
        if let Some(author) = created.author {
            ctx.output.list_item(&describe(&author));
        }
    }
    Ok(())
}

pub(crate) async fn list(filter: Option<&str>, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let authors = storefront
        .catalog
        .authors_matching(filter.unwrap_or_default())
        .await;
    if ctx.output.is_json() {
        ctx.output.json(&authors);
        return Ok(());
    }
    ctx.output.header("Authors");
    if authors.is_empty() {
        ctx.output.info("No authors available.");
    }
    for author in &authors {
        ctx.output.list_item(&describe(author));
    }
    Ok(())
}

fn describe(author: &Author) -> String {
    let mut line = author.name.clone();
    if let Some(age) = author.age {
        line.push_str(&format!(" ({})", age));
    }
    if let Some(bio) = &author.bio {
        line.push_str(&format!(": {}", bio));
    }
    line
}
