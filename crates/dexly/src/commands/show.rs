//! Detail view for a single item.

use std::fmt::Write;

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::Tabled;

use dexly_core::{Ability, Catalog, ItemProfile};

use crate::cli::ShowArgs;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

/// Widest bar drawn for a base stat.
const STAT_BAR_MAX: u32 = 25;

// ── Views ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct StatView {
    label: String,
    name: String,
    value: u32,
}

#[derive(Debug, Serialize)]
struct ShowView {
    id: u32,
    name: String,
    height_m: f64,
    weight_kg: f64,
    types: Vec<String>,
    abilities: Vec<Ability>,
    stats: Vec<StatView>,
    image: Option<String>,
    description: String,
    favorite: bool,
}

impl ShowView {
    fn new(profile: &ItemProfile, favorite: bool) -> Self {
        let d = &profile.detail;
        Self {
            id: d.id,
            name: d.name.clone(),
            height_m: d.height_m(),
            weight_kg: d.weight_kg(),
            types: d.type_names().into_iter().map(str::to_owned).collect(),
            abilities: d.abilities.clone(),
            stats: d
                .stats
                .iter()
                .map(|s| StatView {
                    label: util::stat_label(&s.stat_name).to_owned(),
                    name: s.stat_name.clone(),
                    value: s.base_value,
                })
                .collect(),
            image: d.artwork().map(str::to_owned),
            description: profile.description.clone(),
            favorite,
        }
    }
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Stat")]
    label: String,
    #[tabled(rename = "Base")]
    value: u32,
    #[tabled(rename = "")]
    bar: String,
}

fn stat_bar(value: u32) -> String {
    "█".repeat(usize::try_from(value.div_ceil(10).min(STAT_BAR_MAX)).unwrap_or(0))
}

fn ability_list(abilities: &[Ability]) -> String {
    abilities
        .iter()
        .map(|a| {
            let name = util::display_name(&a.name);
            if a.is_hidden {
                format!("{name} (hidden)")
            } else {
                name
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn detail_text(view: &ShowView, color: bool) -> String {
    let mut out = String::new();

    let title = util::display_name(&view.name);
    let title = if color {
        title.bold().to_string()
    } else {
        title
    };
    let marker = output::favorite_marker(view.favorite, color);
    let _ = writeln!(
        out,
        "{title} {} {marker}",
        output::dim(&util::catalog_number(view.id), color)
    );
    let _ = writeln!(
        out,
        "{}",
        output::type_labels(view.types.iter().map(String::as_str), color)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", view.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Height     {:.1} m", view.height_m);
    let _ = writeln!(out, "Weight     {:.1} kg", view.weight_kg);
    if !view.abilities.is_empty() {
        let _ = writeln!(out, "Abilities  {}", ability_list(&view.abilities));
    }
    if let Some(ref image) = view.image {
        let _ = writeln!(out, "Image      {}", output::dim(image, color));
    }

    if !view.stats.is_empty() {
        let rows: Vec<StatRow> = view
            .stats
            .iter()
            .map(|s| StatRow {
                label: s.label.clone(),
                value: s.value,
                bar: stat_bar(s.value),
            })
            .collect();
        let _ = writeln!(out);
        out.push_str(&output::render_table(&rows));
    }

    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: &ShowArgs, session: &Session) -> Result<(), CliError> {
    let catalog = session.catalog()?;
    print_profile(&catalog, &args.item, session).await
}

/// Fetch and print the profile of `item` (id or name).
pub async fn print_profile(catalog: &Catalog, item: &str, session: &Session) -> Result<(), CliError> {
    let spinner = output::spinner(&format!("Loading {}…", item.trim()), session.interactive());
    let profile = catalog.profile(item).await;
    output::finish_spinner(spinner);
    let profile = profile?;

    let view = ShowView::new(&profile, catalog.favorites().contains(profile.detail.id));
    let out = output::render_single(
        session.output,
        &view,
        |v| detail_text(v, session.color),
        |v| v.name.clone(),
    )?;
    output::print_output(&out, session.quiet);
    Ok(())
}
