//! Interactive session: settings, first page load and the command loop.

use std::path::PathBuf;

use anyhow::{Context, Result};
use gallery_core::{
    CatalogClient, CatalogSettings, PageController, PageFetcher, PageSource, SharedSelection,
    load_settings,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::{Command, Flow, HELP, apply_command, parse_command, row_options};
use crate::render::render_frame;

/// Command-line overrides for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub config: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub rows: Option<usize>,
    pub initial_target: Option<String>,
}

/// Runs the browser until `quit` or end of input.
pub async fn run_session(options: &SessionOptions) -> Result<()> {
    let mut settings = load_settings(options.config.as_deref());
    if let Some(endpoint) = &options.endpoint {
        settings.endpoint.clone_from(endpoint);
    }
    if let Some(rows) = options.rows {
        settings.rows_per_page = rows;
    }

    let client = CatalogClient::new(&settings).context("failed to create catalog client")?;
    tracing::info!(endpoint = client.endpoint(), "Starting session");

    let rows = settings.effective_rows();
    let mut controller = PageController::new(PageFetcher::new(client), SharedSelection::new(), rows);
    controller.on_page_change(0, rows).await;

    if let Some(text) = &options.initial_target {
        let command = Command::Select(text.clone());
        if let Err(error) = apply_command(&mut controller, &settings, command).await {
            eprintln!("{error}");
        }
    }

    println!("{}", render_frame(&controller.frame()));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read command")? {
        if !run_line(&mut controller, &settings, &line).await {
            break;
        }
    }

    // Let a pending background selection settle before exiting.
    if controller.is_extending() {
        controller.wait_for_extension().await;
        println!("{}", render_frame(&controller.frame()));
    }
    Ok(())
}

/// Handles one input line. Returns `false` when the session should end.
pub async fn run_line<S: PageSource + 'static>(
    controller: &mut PageController<S>,
    settings: &CatalogSettings,
    line: &str,
) -> bool {
    let flow = match parse_command(line) {
        Ok(None) => return true,
        Ok(Some(command)) => apply_command(controller, settings, command).await,
        Err(error) => Err(error),
    };

    match flow {
        Ok(Flow::Render) => println!("{}", render_frame(&controller.frame())),
        Ok(Flow::Help) => {
            println!("{HELP}");
            println!("Page sizes: {}", row_options(settings));
        }
        Ok(Flow::Quit) => return false,
        Err(error) => eprintln!("{error}"),
    }
    true
}
