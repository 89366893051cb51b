//! CLI command implementations.

pub mod author;
pub mod book;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod history;
pub mod report;
pub mod search;
pub mod session;

use bazar_commerce::checkout::CheckoutMode;
use bazar_commerce::ids::BookId;
use bazar_data::ReportFormat;
use clap::{Args, Subcommand};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Topic, free text, or one of "best sellers", "new releases",
    /// "special offers".
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

/// Arguments for the book command.
#[derive(Args)]
pub struct BookArgs {
    #[command(subcommand)]
    pub command: BookCommand,
}

#[derive(Subcommand)]
pub enum BookCommand {
    /// Show details for a book.
    Info {
        /// Book id.
        id: BookId,
    },
    /// Buy a single copy.
    Buy {
        /// Book id.
        id: BookId,

        /// Shipping address.
        #[arg(long)]
        address: Option<String>,

        /// Payment method.
        #[arg(long)]
        payment: Option<String>,
    },
    /// Add copies to a book's stock.
    Stock {
        /// Book id.
        id: BookId,

        /// Copies to add.
        quantity: String,
    },
    /// Add a book to the catalog. Missing required fields are prompted for.
    Add(NewBookArgs),
    /// List the books in the catalog.
    List {
        /// Only books whose title or author contains this text.
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// List the authors in the catalog.
    Authors {
        /// Only authors whose name contains this text.
        #[arg(short, long)]
        filter: Option<String>,
    },
}

/// Fields of a new book.
#[derive(Args, Default)]
pub struct NewBookArgs {
    /// 10 or 13 digits; hyphens and spaces are ignored.
    #[arg(long)]
    pub isbn: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    /// Id of an existing author.
    #[arg(long)]
    pub author_id: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub pages: Option<String>,

    /// Copies in stock.
    #[arg(long)]
    pub quantity: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub cover_url: Option<String>,
}

/// Arguments for the author command.
#[derive(Args)]
pub struct AuthorArgs {
    #[command(subcommand)]
    pub command: AuthorCommand,
}

#[derive(Subcommand)]
pub enum AuthorCommand {
    /// Add an author. Missing fields are prompted for.
    Add {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        age: Option<String>,
    },
    /// List the authors in the catalog.
    List {
        /// Only authors whose name contains this text.
        #[arg(short, long)]
        filter: Option<String>,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its totals.
    Show,
    /// Add a book to the cart.
    Add {
        /// Book id.
        id: BookId,
    },
    /// Remove the line at a position (1-based, as shown by `cart show`).
    Remove {
        position: usize,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Shipping address.
    #[arg(long)]
    pub address: Option<String>,

    /// Payment method.
    #[arg(long)]
    pub payment: Option<String>,

    /// Contact email.
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Override the configured submission mode.
    #[arg(long)]
    pub mode: Option<CheckoutMode>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    /// Show history for this user instead of the session's.
    #[arg(long)]
    pub user: Option<String>,
}

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// Download the purchase history report.
    History {
        /// pdf or excel.
        #[arg(short, long, default_value = "pdf")]
        format: ReportFormat,
    },
    /// Open the inventory report (admin only).
    Inventory {
        /// pdf or excel.
        #[arg(short, long, default_value = "pdf")]
        format: ReportFormat,
    },
    /// Open the reporting service.
    Open,
}

/// Arguments for the session command.
#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: Option<SessionCommand>,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Show the current session.
    Show,
    /// Set the current user id.
    Login {
        user_id: String,
    },
    /// Forget the current user id.
    Logout,
    /// Set the display-only admin flag.
    Admin {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Write bazar.json instead of bazar.toml.
        #[arg(long)]
        json_file: bool,
    },
    /// Print the storage file location.
    Path,
}
