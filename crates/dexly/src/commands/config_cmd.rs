//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, OutputFormat};
use crate::config::{self, Config, Session};
use crate::error::CliError;
use crate::output;

use super::util;

pub fn handle(args: &ConfigArgs, session: &Session) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let out = match session.output {
                OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&session.config)?,
                format => output::render_single(format, &session.config, |_| String::new(), |_| {
                    String::new()
                })?,
            };
            output::print_output(out.trim_end(), session.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), session.quiet);
            Ok(())
        }

        ConfigCommand::Init => {
            let path = config::config_path();
            if path.exists()
                && !util::confirm(
                    "config init",
                    &format!("Overwrite {} with defaults?", path.display()),
                    session.yes,
                )?
            {
                return Ok(());
            }
            let written = config::save_config(&Config::default())?;
            output::print_status(
                &format!("Wrote default configuration to {}", written.display()),
                session.quiet,
            );
            Ok(())
        }
    }
}
