//! Terminal rendering of storefront views.

use bazar_commerce::catalog::Book;
use bazar_commerce::history::HistoryEntry;
use bazar_commerce::search::{HomeView, SearchView};
use bazar_commerce::{Currency, Money};
use bazar_storefront::{CartSummary, HistoryState};
use console::style;

use crate::output::{stock_badge, Output};

const BOOK_WIDTHS: [usize; 5] = [4, 40, 24, 9, 16];
const CART_WIDTHS: [usize; 5] = [4, 40, 22, 22, 9];
const ORDER_WIDTHS: [usize; 4] = [14, 12, 10, 10];

pub fn search(out: &Output, view: &SearchView) {
    if out.is_json() {
        out.json(&serde_json::json!({
            "heading": view.heading(),
            "books": view.books(),
            "message": view.message(),
        }));
        return;
    }

    if let Some(heading) = view.heading() {
        out.header(heading);
    }
    match view {
        SearchView::Error { message } => out.error(message),
        SearchView::Featured { book: Some(book) } => book_detail(out, book),
        _ => {
            if let Some(message) = view.message() {
                out.info(message);
            } else {
                books(out, view.books());
            }
        }
    }
}

pub fn home(out: &Output, view: &HomeView) {
    if out.is_json() {
        out.json(&view.books);
        return;
    }
    out.header(view.heading());
    books(out, &view.books);
}

pub fn books(out: &Output, books: &[Book]) {
    if out.is_json() {
        out.json(&books);
        return;
    }
    out.table_row(&["ID", "TITLE", "AUTHOR", "PRICE", "STOCK"], &BOOK_WIDTHS);
    for book in books {
        let id = book.id.to_string();
        let price = book.display_price().display();
        let stock = stock_badge(book.stock_label());
        out.table_row(&[&id, &book.title, &book.author, &price, &stock], &BOOK_WIDTHS);
        out.line(&format!("        {}", style(book.summary()).dim()));
    }
}

pub fn book_detail(out: &Output, book: &Book) {
    if out.is_json() {
        out.json(book);
        return;
    }
    out.line(&style(&book.title).bold().to_string());
    out.kv("id", &book.id.to_string());
    out.kv("author", &book.author);
    out.kv("topic", &book.topic);
    out.kv("price", &book.display_price().display());
    out.kv("stock", &stock_badge(book.stock_label()));
    if !book.description.is_empty() {
        out.line("");
        out.line(&book.description);
    }
}

pub fn cart(out: &Output, summary: &CartSummary) {
    if out.is_json() {
        out.json(&serde_json::json!({
            "items": summary.items,
            "totals": summary.totals,
            "applied_offers": summary.applied,
            "badge": summary.badge,
            "checkout_enabled": summary.checkout_enabled,
        }));
        return;
    }

    out.header(&format!("Cart ({})", summary.badge));
    for offer in &summary.offers {
        out.line(&style(format!("Special offer: {}", offer)).cyan().to_string());
    }
    if summary.items.is_empty() {
        out.info("Your cart is empty.");
        return;
    }

    out.table_row(&["#", "TITLE", "AUTHOR", "CATEGORY", "PRICE"], &CART_WIDTHS);
    for (index, item) in summary.items.iter().enumerate() {
        let position = (index + 1).to_string();
        let price = Money::from_decimal(item.price, Currency::USD).display();
        out.table_row(
            &[&position, &item.title, &item.author, &item.topic, &price],
            &CART_WIDTHS,
        );
    }

    out.rule();
    out.kv("Subtotal", &summary.totals.display_subtotal().display());
    for applied in &summary.applied {
        out.line(&format!("  {}", style(applied).green()));
    }
    if summary.totals.has_discount() {
        out.kv("Discount", &format!("-{}", summary.totals.display_discount().display()));
    }
    out.kv("Total", &style(summary.totals.display_total().display()).bold().to_string());
}

pub fn history(out: &Output, state: &HistoryState) {
    if out.is_json() {
        out.json(&state.entries());
        return;
    }

    out.header("Purchase History");
    if let Some(message) = state.message() {
        match state {
            HistoryState::Error(_) => out.error(message),
            _ => out.info(message),
        }
        return;
    }

    out.table_row(&["ORDER", "DATE", "ITEMS", "TOTAL"], &ORDER_WIDTHS);
    for entry in state.entries() {
        order(out, entry);
    }
}

fn order(out: &Output, entry: &HistoryEntry) {
    let order = &entry.order;
    let count = format!("{} item(s)", order.items.len());
    let total = order.display_total().display();
    out.table_row(
        &[order.order_id.as_str(), &order.display_date(), &count, &total],
        &ORDER_WIDTHS,
    );
    if let Some(error) = &entry.detail_error {
        out.line(&format!("    {}", style(error).red()));
        return;
    }
    for item in &order.items {
        let author = item.author.as_deref().unwrap_or("-");
        out.list_item(&format!(
            "{} by {} ({})",
            item.title,
            author,
            item.display_price().display()
        ));
    }
}
