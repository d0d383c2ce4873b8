//! Interactive commands and their mapping onto controller events.

use std::collections::HashSet;

use gallery_core::{
    ArtworkId, CatalogSettings, FillOutcome, Item, PageController, PageSource, parse_target,
};
use thiserror::Error;

/// Help text printed by `help`.
pub const HELP: &str = "\
Commands:
  next | n              next page
  prev | p              previous page
  page <n>              jump to page n (1-based)
  rows <n>              change rows per page
  reload | r            fetch the current page again
  toggle | t <id...>    flip selection of rows on this page
  all                   select every row on this page
  none | clear          clear every row on this page
  select | s <n>        select n rows, fetching further pages as needed
  wait | w              wait for background selection to finish
  show                  redraw the table
  help | h | ?          this text
  quit | q | exit       exit";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    /// One-based page number.
    Page(usize),
    Rows(usize),
    Reload,
    Toggle(Vec<ArtworkId>),
    All,
    Clear,
    /// Raw target text; validated when applied.
    Select(String),
    Wait,
    Show,
    Help,
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("'{0}' is not a positive row count; nothing changed")]
    InvalidTarget(String),

    #[error("page {page} does not exist (1-{pages})")]
    NoSuchPage { page: usize, pages: usize },

    #[error("{rows} rows per page is not offered (choose from {options})")]
    UnsupportedRows { rows: usize, options: String },
}

/// What the session loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Render,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let command = match head.to_lowercase().as_str() {
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "page" => Command::Page(positive_arg(words.next(), "page", "a page number")?),
        "rows" => Command::Rows(positive_arg(words.next(), "rows", "a row count")?),
        "reload" | "r" => Command::Reload,
        "toggle" | "t" => {
            let ids = words
                .map(|word| {
                    word.parse::<ArtworkId>()
                        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if ids.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "toggle",
                    expected: "one or more ids",
                });
            }
            Command::Toggle(ids)
        }
        "all" => Command::All,
        "none" | "clear" => Command::Clear,
        "select" | "s" => {
            let rest: Vec<&str> = words.collect();
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "select",
                    expected: "a row count",
                });
            }
            Command::Select(rest.join(" "))
        }
        "wait" | "w" => Command::Wait,
        "show" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn positive_arg(
    word: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<usize, CommandError> {
    let word = word.ok_or(CommandError::MissingArgument { command, expected })?;
    word.parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| CommandError::InvalidNumber(word.to_string()))
}

/// Applies a command to the controller.
///
/// Page sizes are checked against `settings.rows_per_page_options`.
/// Rejected commands leave the controller untouched.
pub async fn apply_command<S: PageSource + 'static>(
    controller: &mut PageController<S>,
    settings: &CatalogSettings,
    command: Command,
) -> Result<Flow, CommandError> {
    let cursor = controller.cursor();

    match command {
        Command::Next => {
            let pages = cursor.page_count(controller.total_count());
            if cursor.page.saturating_add(1) < pages {
                controller.on_page_change(cursor.page + 1, cursor.rows).await;
            } else {
                tracing::debug!("Already on the last page");
            }
        }
        Command::Prev => {
            if cursor.page > 0 {
                controller.on_page_change(cursor.page - 1, cursor.rows).await;
            }
        }
        Command::Page(number) => {
            let pages = cursor.page_count(controller.total_count());
            // Without a known total (e.g. after a failed load) any page may be tried.
            if pages > 0 && number > pages {
                return Err(CommandError::NoSuchPage {
                    page: number,
                    pages,
                });
            }
            controller.on_page_change(number - 1, cursor.rows).await;
        }
        Command::Rows(rows) => {
            if !settings.accepts_rows(rows) {
                return Err(CommandError::UnsupportedRows {
                    rows,
                    options: row_options(settings),
                });
            }
            // Keep the first visible row on screen.
            controller.on_page_change(cursor.first / rows, rows).await;
        }
        Command::Reload => controller.reload().await,
        Command::Toggle(ids) => {
            let next = flipped_selection(controller, &ids);
            controller.on_selection_toggled(&next);
        }
        Command::All => {
            let visible = controller.items().to_vec();
            controller.on_selection_toggled(&visible);
        }
        Command::Clear => controller.on_selection_toggled(&[]),
        Command::Select(text) => {
            let Some(target) = parse_target(&text) else {
                return Err(CommandError::InvalidTarget(text));
            };
            if let FillOutcome::NeedsExtension { remaining, .. } =
                controller.on_target_submitted(target)
            {
                tracing::info!(remaining, "Selecting remaining rows in the background");
            }
        }
        Command::Wait => {
            controller.wait_for_extension().await;
        }
        Command::Show => {}
        Command::Help => return Ok(Flow::Help),
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Render)
}

/// Offered page sizes as a comma-separated list.
pub fn row_options(settings: &CatalogSettings) -> String {
    if settings.rows_per_page_options.is_empty() {
        return "any positive size".to_string();
    }
    settings
        .rows_per_page_options
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The visible selection with the given ids flipped.
fn flipped_selection<S: PageSource + 'static>(
    controller: &PageController<S>,
    ids: &[ArtworkId],
) -> Vec<Item> {
    let flip: HashSet<ArtworkId> = ids.iter().copied().collect();
    let frame = controller.frame();
    let currently: HashSet<ArtworkId> = frame.selected_on_page.iter().map(|i| i.id).collect();

    frame
        .items
        .into_iter()
        .filter(|item| currently.contains(&item.id) != flip.contains(&item.id))
        .collect()
}
