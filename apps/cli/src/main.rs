use std::{io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    HttpStoryFetcher, QueryController, SearchEndpoint, SearchTermSetting, SortKey, SortSpec,
    SEARCH_TERM_KEY,
};
use storage::Storage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;
mod session;

use commands::{Command, CommandError};
use config::{load_settings, normalize_database_url};
use session::{Flow, Session};

#[derive(Parser, Debug)]
#[command(name = "hn_search", about = "Search Hacker News stories from the terminal")]
struct Args {
    /// Flat TOML file with setting overrides.
    #[arg(long, default_value = "hn_search.toml")]
    config: PathBuf,
    /// Search for this term instead of the remembered one (and remember it).
    #[arg(long)]
    term: Option<String>,
    /// Extra pages to load after the first.
    #[arg(long, default_value_t = 0)]
    pages: u32,
    #[arg(long, default_value = "none")]
    sort: SortKey,
    #[arg(long)]
    reverse: bool,
    /// Print the results once and exit instead of prompting.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(&args.config);
    let database_url = normalize_database_url(&settings.database_url);
    info!(%database_url, api = %settings.api_base_url, "starting hn_search");

    let storage = Arc::new(
        Storage::new(&database_url)
            .await
            .with_context(|| format!("failed to open term storage at '{database_url}'"))?,
    );
    storage
        .health_check()
        .await
        .context("term storage is not usable")?;
    let term = SearchTermSetting::load(
        storage.clone(),
        settings.storage_scope.clone(),
        SEARCH_TERM_KEY,
        &settings.default_term,
    )
    .await?;

    let endpoint = SearchEndpoint::new(
        settings.api_base_url.clone(),
        settings.search_param.clone(),
        settings.page_param.clone(),
    )?;
    let fetcher = HttpStoryFetcher::new(Duration::from_secs(settings.request_timeout_secs))?;
    let controller = QueryController::new(endpoint, Arc::new(fetcher))
        .with_history_capacity(settings.history_capacity);

    let sort = SortSpec {
        key: args.sort,
        reversed: args.reverse,
    };
    let mut session = Session::new(controller, term, sort, io::stdout());
    if let Some(override_term) = args.term.as_deref() {
        session.override_term(override_term).await?;
    }
    session.start(args.pages).await?;
    session.show()?;

    if !args.once {
        session.write_line("type `help` for commands")?;
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match line.parse::<Command>() {
                Ok(command) => {
                    if session.execute(command).await? == Flow::Quit {
                        break;
                    }
                }
                Err(CommandError::Empty) => {}
                Err(err) => session.write_line(&err.to_string())?,
            }
        }
    }

    storage.close().await;
    Ok(())
}
