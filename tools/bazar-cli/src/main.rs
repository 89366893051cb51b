//! Bazar CLI - terminal storefront for the Bazar bookstore.
//!
//! Commands:
//! - `bazar home` - Show recommended books
//! - `bazar search` - Search by topic or navigation label
//! - `bazar book` - Show, buy, restock, add or list books
//! - `bazar author` - Add or list authors
//! - `bazar cart` - Manage the shopping cart
//! - `bazar checkout` - Purchase everything in the cart
//! - `bazar history` - List past orders
//! - `bazar report` - Download reports
//! - `bazar session` - Manage the local user id and admin flag
//! - `bazar config` - Manage configuration

mod commands;
mod config;
mod context;
mod download;
mod output;
mod render;
mod toast;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    AuthorArgs, BookArgs, CartArgs, CheckoutArgs, ConfigArgs, HistoryArgs, ReportArgs, SearchArgs, SessionArgs,
};

/// Bazar CLI - browse and buy books from the Bazar store
#[derive(Parser)]
#[command(name = "bazar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show recommended books
    Home,

    /// Search the catalog
    Search(SearchArgs),

    /// Show, buy, restock, add or list books
    Book(BookArgs),

    /// Add or list authors
    Author(AuthorArgs),

    /// Manage the shopping cart
    Cart(CartArgs),

    /// Purchase everything in the cart
    Checkout(CheckoutArgs),

    /// List past orders
    History(HistoryArgs),

    /// Download purchase history or inventory reports
    Report(ReportArgs),

    /// Manage the local user id and admin flag
    Session(SessionArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Install the log subscriber. `BAZAR_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("BAZAR_LOG").unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Home => commands::search::home(&ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Book(args) => commands::book::run(args, &ctx).await,
        Commands::Author(args) => commands::author::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::History(args) => commands::history::run(args, &ctx).await,
        Commands::Report(args) => commands::report::run(args, &ctx).await,
        Commands::Session(args) => commands::session::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
