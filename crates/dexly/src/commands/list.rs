//! Grid listing: one page of the (optionally filtered) catalog.

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::Tabled;

use dexly_core::{Browser, GridItem, GridPage, PageLoad};

use crate::cli::{ListArgs, OutputFormat};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Views ───────────────────────────────────────────────────────────

#[derive(Tabled)]
struct GridRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Types")]
    types: String,
    #[tabled(rename = "★")]
    favorite: String,
}

/// Structured form of a grid card.
#[derive(Debug, Serialize)]
pub struct GridEntry {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub image: Option<String>,
    pub favorite: bool,
}

impl From<&GridItem> for GridEntry {
    fn from(item: &GridItem) -> Self {
        Self {
            id: item.detail.id,
            name: item.detail.name.clone(),
            types: item
                .detail
                .type_names()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            image: item.detail.artwork().map(str::to_owned),
            favorite: item.favorite,
        }
    }
}

fn row(entry: &GridEntry, color: bool) -> GridRow {
    GridRow {
        number: util::catalog_number(entry.id),
        name: util::display_name(&entry.name),
        types: output::type_labels(entry.types.iter().map(String::as_str), color),
        favorite: output::favorite_marker(entry.favorite, color),
    }
}

// ── Rendering ───────────────────────────────────────────────────────

/// Pager line: `‹ 1 [2] 3 4 5 ›  page 2 of 44 · 1302 items`.
fn pager_line(page: &GridPage, color: bool) -> String {
    let numbers = page
        .page_numbers
        .iter()
        .map(|&n| {
            if n == page.query.page {
                let current = format!("[{n}]");
                if color {
                    current.bold().to_string()
                } else {
                    current
                }
            } else {
                n.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let prev = if page.has_prev() { "‹" } else { " " };
    let next = if page.has_next() { "›" } else { " " };
    let summary = format!(
        "page {} of {} · {} items",
        page.query.page,
        page.total_pages.max(1),
        page.total_filtered
    );
    format!("{prev} {numbers} {next}  {}", output::dim(&summary, color))
}

fn empty_message(page: &GridPage) -> String {
    if page.total_filtered == 0 {
        if page.query.favorites_only && page.query.search.is_empty() {
            return "No favorites yet. Add one with: dexly favorites add <ID>".into();
        }
        if !page.query.search.is_empty() {
            return format!("No items match '{}'.", page.query.search);
        }
        return "The catalog is empty.".into();
    }
    format!(
        "Page {} is past the end (last page is {}).",
        page.query.page, page.total_pages
    )
}

/// Render a loaded grid page in the session's output format.
pub fn render_grid(page: &GridPage, session: &Session) -> Result<String, CliError> {
    let entries: Vec<GridEntry> = page.items.iter().map(GridEntry::from).collect();
    if session.output == OutputFormat::Table {
        if page.is_empty() {
            return Ok(empty_message(page));
        }
        let table = output::render_table(
            &entries
                .iter()
                .map(|e| row(e, session.color))
                .collect::<Vec<_>>(),
        );
        return Ok(format!("{table}\n{}", pager_line(page, session.color)));
    }
    output::render_list(
        session.output,
        &entries,
        |e| row(e, session.color),
        |e| e.name.clone(),
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ListArgs, mut session: Session) -> Result<(), CliError> {
    if let Some(size) = args.page_size {
        session.catalog_config.page_size = usize::try_from(size).unwrap_or(usize::MAX);
    }

    let browser = Browser::new(session.catalog()?);
    if let Some(term) = args.search {
        browser.set_search(term);
    }
    browser.set_favorites_only(args.favorites);
    browser.goto_page(usize::try_from(args.page).unwrap_or(usize::MAX));

    let spinner = output::spinner("Loading catalog…", session.interactive());
    let loaded = browser.load().await;
    output::finish_spinner(spinner);

    let PageLoad::Ready(page) = loaded? else {
        return Ok(());
    };
    let out = render_grid(&page, &session)?;
    output::print_output(&out, session.quiet);
    Ok(())
}
