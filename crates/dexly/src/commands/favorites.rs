//! Favorites subcommand handlers. Local state only, no network.

use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::cli::{FavoritesArgs, FavoritesCommand};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct FavoriteRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "#")]
    number: String,
}

#[derive(Debug, Serialize)]
struct ToggleResult {
    id: u32,
    favorite: bool,
}

pub fn handle(args: FavoritesArgs, session: &Session) -> Result<(), CliError> {
    let store = session.favorites()?;

    match args.command {
        FavoritesCommand::List => {
            let ids: Vec<u32> = store.snapshot().iter().copied().collect();
            if ids.is_empty() && session.output == crate::cli::OutputFormat::Table {
                output::print_status("No favorites yet.", session.quiet);
                return Ok(());
            }
            let out = output::render_list(
                session.output,
                &ids,
                |&id| FavoriteRow {
                    id,
                    number: util::catalog_number(id),
                },
                ToString::to_string,
            )?;
            output::print_output(&out, session.quiet);
            Ok(())
        }

        FavoritesCommand::Add { id } => {
            let msg = if store.add(id)? {
                format!("Added {id} to favorites")
            } else {
                format!("{id} is already a favorite")
            };
            output::print_status(&msg, session.quiet);
            Ok(())
        }

        FavoritesCommand::Remove { id } => {
            let msg = if store.remove(id)? {
                format!("Removed {id} from favorites")
            } else {
                format!("{id} was not a favorite")
            };
            output::print_status(&msg, session.quiet);
            Ok(())
        }

        FavoritesCommand::Toggle { id } => {
            let favorite = store.toggle(id)?;
            let out = output::render_single(
                session.output,
                &ToggleResult { id, favorite },
                |r| {
                    if r.favorite {
                        format!("{} is now a favorite", r.id)
                    } else {
                        format!("{} is no longer a favorite", r.id)
                    }
                },
                |r| r.favorite.to_string(),
            )?;
            output::print_output(&out, session.quiet);
            Ok(())
        }

        FavoritesCommand::Clear => {
            if store.is_empty() {
                output::print_status("No favorites to clear", session.quiet);
                return Ok(());
            }
            if !util::confirm(
                "favorites clear",
                &format!("Remove all {} favorites?", store.len()),
                session.yes,
            )? {
                return Ok(());
            }
            let removed = store.clear()?;
            info!(removed, "favorites cleared");
            output::print_status(&format!("Removed {removed} favorites"), session.quiet);
            Ok(())
        }
    }
}
