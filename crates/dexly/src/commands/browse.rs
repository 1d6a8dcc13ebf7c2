//! Interactive browse loop over the grid browser.

use std::str::FromStr;

use dialoguer::Input;

use dexly_core::{Browser, PageLoad};

use crate::config::Session;
use crate::error::CliError;
use crate::output;

use super::{list, show, util};

const HELP: &str = "n next · p prev · g <N> goto · s [TEXT] search · f favorites only \
                    · t <ID> toggle favorite · d <ID|NAME> details · r refresh · q quit";

/// One line typed at the browse prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Next,
    Prev,
    Goto(usize),
    /// Empty text clears the search.
    Search(String),
    FavoritesOnly,
    Toggle(u32),
    Show(String),
    Refresh,
    Help,
    Quit,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(v, r)| (v, r.trim()));

        match verb.to_lowercase().as_str() {
            "n" | "next" => Ok(Self::Next),
            "p" | "prev" => Ok(Self::Prev),
            "g" | "goto" => rest
                .parse::<usize>()
                .map(Self::Goto)
                .map_err(|_| format!("'{rest}' is not a page number")),
            "s" | "search" => Ok(Self::Search(rest.to_owned())),
            "f" | "favorites" => Ok(Self::FavoritesOnly),
            "t" | "toggle" => rest
                .parse::<u32>()
                .ok()
                .filter(|&id| id > 0)
                .map(Self::Toggle)
                .ok_or_else(|| format!("'{rest}' is not an item id")),
            "d" | "show" if !rest.is_empty() => Ok(Self::Show(rest.to_owned())),
            "d" | "show" => Err("which item? e.g. 'd 25' or 'd pikachu'".into()),
            "r" | "refresh" => Ok(Self::Refresh),
            "?" | "h" | "help" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command '{other}'")),
        }
    }
}

async fn render_current(browser: &Browser, session: &Session) {
    let spinner = output::spinner("Loading…", session.interactive());
    let loaded = browser.load().await;
    output::finish_spinner(spinner);

    match loaded {
        Ok(PageLoad::Ready(page)) => match list::render_grid(&page, session) {
            Ok(out) => output::print_output(&out, false),
            Err(e) => report(e),
        },
        Ok(PageLoad::Superseded) => {}
        Err(e) => report(CliError::from(e)),
    }
}

/// Drop cached results that expired while nobody was looking at them.
fn housekeep(browser: &Browser) -> usize {
    let collected = browser.catalog().collect_garbage();
    if collected > 0 {
        tracing::debug!(collected, "dropped expired cache entries");
    }
    collected
}

fn report(err: CliError) {
    eprintln!("{:?}", miette::Report::new(err));
}

pub async fn handle(session: &Session) -> Result<(), CliError> {
    let browser = Browser::new(session.catalog()?);
    output::print_status(HELP, session.quiet);

    let mut reload = true;
    loop {
        if reload {
            housekeep(&browser);
            render_current(&browser, session).await;
        }
        reload = true;

        let line: String = Input::new()
            .with_prompt("dexly")
            .allow_empty(true)
            .interact_text()
            .map_err(util::prompt_err)?;
        if line.trim().is_empty() {
            reload = false;
            continue;
        }

        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(msg) => {
                eprintln!("{msg}");
                reload = false;
                continue;
            }
        };

        match action {
            Action::Next => {
                if !browser.next_page() {
                    eprintln!("Already on the last page");
                    reload = false;
                }
            }
            Action::Prev => {
                if !browser.prev_page() {
                    eprintln!("Already on the first page");
                    reload = false;
                }
            }
            Action::Goto(page) => {
                browser.goto_page(page);
            }
            Action::Search(term) => {
                browser.set_search(term);
            }
            Action::FavoritesOnly => {
                let on = browser.toggle_favorites_only();
                eprintln!("Favorites only: {}", if on { "on" } else { "off" });
            }
            Action::Toggle(id) => match browser.toggle_favorite(id) {
                Ok(true) => eprintln!("{id} added to favorites"),
                Ok(false) => eprintln!("{id} removed from favorites"),
                Err(e) => {
                    report(e.into());
                    reload = false;
                }
            },
            Action::Show(item) => {
                if let Err(e) = show::print_profile(browser.catalog(), &item, session).await {
                    report(e);
                }
                reload = false;
            }
            Action::Refresh => {
                let n = browser.catalog().invalidate_all();
                tracing::debug!(invalidated = n, "refreshing");
            }
            Action::Help => {
                eprintln!("{HELP}");
                reload = false;
            }
            Action::Quit => return Ok(()),
        }
    }
}
