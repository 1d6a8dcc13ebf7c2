//! Command dispatch: routes each CLI subcommand to its handler.

pub mod browse;
pub mod config_cmd;
pub mod favorites;
pub mod list;
pub mod show;
pub mod util;

use crate::cli::Command;
use crate::config::Session;
use crate::error::CliError;

/// Dispatch a resolved command to its handler.
pub async fn dispatch(cmd: Command, session: Session) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => list::handle(args, session).await,
        Command::Show(args) => show::handle(&args, &session).await,
        Command::Favorites(args) => favorites::handle(args, &session),
        Command::Browse => browse::handle(&session).await,
        Command::Config(args) => config_cmd::handle(&args, &session),
        Command::Completions(_) => unreachable!("handled before dispatch"),
    }
}
