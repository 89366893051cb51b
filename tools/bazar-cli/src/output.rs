//! Output formatting for the CLI.

use bazar_commerce::catalog::StockLabel;
use bazar_storefront::ToastLevel;
use console::{pad_str, style, Alignment, Term};
use indicatif::{ProgressBar, ProgressStyle};

/// Human-readable or JSON output. In JSON mode only data and errors are
/// printed, so stdout stays parseable.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stdout(),
        }
    }

    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Warnings and errors go to stderr.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// In JSON mode errors are still reported, as `{"error": ...}` on stderr.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Toasts map onto the message levels; JSON mode emits one object per toast.
    pub fn toast(&self, level: ToastLevel, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "toast": level.as_str(), "message": msg }));
            return;
        }
        match level {
            ToastLevel::Success => self.success(msg),
            ToastLevel::Info => self.info(msg),
            ToastLevel::Warning => self.warn(msg),
            ToastLevel::Danger => self.error(msg),
        }
    }

    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    pub fn line(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", msg);
    }

    /// Pretty JSON on stdout, printed in either mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// One table row; cells are padded or cut to their column width by
    /// visible width, so styled cells line up too.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let cells: Vec<_> = cols
            .iter()
            .zip(widths)
            .map(|(col, width)| pad_str(col, *width, Alignment::Left, Some("…")))
            .collect();
        println!("  {}", cells.join("  "));
    }

    /// Print a horizontal rule sized to the terminal.
    pub fn rule(&self) {
        if self.json {
            return;
        }
        println!("{}", style("-".repeat(self.term_width().min(100))).dim());
    }

    /// Create a spinner for a pending request.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn term_width(&self) -> usize {
        self.term.size().1 as usize
    }
}

/// Stock label colored for the terminal.
pub fn stock_badge(label: StockLabel) -> String {
    if label.is_low() {
        style(label.to_string()).yellow().bold().to_string()
    } else {
        style(label.to_string()).green().to_string()
    }
}
