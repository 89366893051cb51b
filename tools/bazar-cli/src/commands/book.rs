//! Single-book commands.

use anyhow::Result;
use bazar_commerce::catalog::NewBookForm;
use bazar_commerce::checkout::PAYMENT_METHODS;
use bazar_commerce::ids::BookId;
use dialoguer::{Input, Select};

use super::{BookArgs, BookCommand, NewBookArgs};
use crate::context::Context;
use crate::render;

/// Run the book command.
pub async fn run(args: BookArgs, ctx: &Context) -> Result<()> {
    match args.command {
        BookCommand::Info { id } => info(id, ctx).await,
        BookCommand::Buy {
            id,
            address,
            payment,
        } => buy(id, address, payment, ctx).await,
        BookCommand::Stock { id, quantity } => stock(id, &quantity, ctx).await,
        BookCommand::Add(args) => add(args, ctx).await,
        BookCommand::List { filter } => list(filter.as_deref(), ctx).await,
        BookCommand::Authors { filter } => super::author::list(filter.as_deref(), ctx).await,
    }
}

async fn info(id: BookId, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    if let Some(book) = storefront.catalog.details(id).await {
        render::book_detail(&ctx.output, &book);
    }
    Ok(())
}

async fn buy(
    id: BookId,
    address: Option<String>,
    payment: Option<String>,
    ctx: &Context,
) -> Result<()> {
    let storefront = ctx.storefront()?;
    let Some(mut book) = storefront.catalog.details(id).await else {
        return Ok(());
    };
    render::book_detail(&ctx.output, &book);

    let address = match address {
        Some(address) => address,
        None => Input::<String>::new().with_prompt("Shipping address").interact_text()?,
    };
    let payment = match payment {
        Some(payment) => payment,
        None => {
            let selection = Select::new()
                .with_prompt("Payment method")
                .items(PAYMENT_METHODS)
                .default(0)
                .interact()?;
            PAYMENT_METHODS[selection].to_string()
        }
    };

    let spinner = ctx.output.spinner("Processing purchase...");
    let result = storefront.catalog.purchase(&mut book, &address, &payment).await;
    spinner.finish_and_clear();

    if let Ok(response) = result {
        if let Some(order_id) = response.order_id {
            ctx.output.kv("order", order_id.as_str());
        }
        ctx.output.kv("stock", &book.stock_label().to_string());
    }
    Ok(())
}

async fn stock(id: BookId, quantity: &str, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let Some(mut book) = storefront.catalog.details(id).await else {
        return Ok(());
    };

    if storefront.catalog.add_stock(&mut book, quantity).await.is_ok() {
        ctx.output.kv("stock", &book.stock_label().to_string());
    }
    Ok(())
}

/// Use the flag when given, otherwise prompt. Optional fields may be left blank.
pub(crate) fn field(value: Option<String>, prompt: &str, required: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(!required)
            .interact_text()?),
    }
}

async fn add(args: NewBookArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let form = NewBookForm {
        isbn: field(args.isbn, "ISBN", true)?,
        title: field(args.title, "Title", true)?,
        author_id: field(args.author_id, "Author id", true)?,
        price: field(args.price, "Price", false)?,
        pages: args.pages.unwrap_or_default(),
        quantity: field(args.quantity, "Quantity", false)?,
        description: args.description.unwrap_or_default(),
        cover_url: args.cover_url.unwrap_or_default(),
    };

    let spinner = ctx.output.spinner("Adding book...");
    let result = storefront.catalog.create_book(&form).await;
    spinner.finish_and_clear();

    if let Ok(created) = result {
        if let Some(book) = created.book {
            render::book_detail(&ctx.output, &book);
        }
    }
    Ok(())
}

async fn list(filter: Option<&str>, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront()?;
    let books = storefront
        .catalog
        .books_matching(filter.unwrap_or_default())
        .await;
    ctx.output.header("All Books");
    if books.is_empty() {
        ctx.output.info("No books available.");
        return Ok(());
    }
    render::books(&ctx.output, &books);
    Ok(())
}
