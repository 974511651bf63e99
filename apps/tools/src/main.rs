use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    query::{DEFAULT_BASE_URL, DEFAULT_PAGE_PARAM, DEFAULT_SEARCH_PARAM},
    QueryUrl, SearchEndpoint, StoriesAction, StoriesState, SEARCH_TERM_KEY,
};
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/hn_search.db")]
    database_url: String,
    #[arg(long, default_value = "hn_search")]
    scope: String,
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    api_base_url: String,
    #[arg(long, default_value = DEFAULT_SEARCH_PARAM)]
    search_param: String,
    #[arg(long, default_value = DEFAULT_PAGE_PARAM)]
    page_param: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the remembered search term.
    GetTerm,
    /// Overwrite the remembered search term.
    SetTerm { term: String },
    /// Forget the remembered search term.
    ClearTerm,
    /// Print every key stored in the scope.
    List,
    /// Split a query url back into its term and page.
    InspectUrl { url: String },
    /// Apply a JSON-lines log of stories actions to an empty state and print
    /// the result. Stops at the first line that is not a valid action.
    Replay { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();

    match cli.command {
        Command::GetTerm => {
            let storage = Storage::new(&cli.database_url).await?;
            match storage.read_entry(&cli.scope, SEARCH_TERM_KEY).await? {
                Some(entry) => println!("{} (updated {})", entry.value, entry.updated_at),
                None => println!("no search term stored in scope {}", cli.scope),
            }
            storage.close().await;
        }
        Command::SetTerm { term } => {
            let storage = Storage::new(&cli.database_url).await?;
            storage
                .write_value(&cli.scope, SEARCH_TERM_KEY, &term)
                .await?;
            println!("stored search term {term:?}");
            storage.close().await;
        }
        Command::ClearTerm => {
            let storage = Storage::new(&cli.database_url).await?;
            let existed = storage.delete_value(&cli.scope, SEARCH_TERM_KEY).await?;
            println!("cleared={existed}");
            storage.close().await;
        }
        Command::List => {
            let storage = Storage::new(&cli.database_url).await?;
            let entries = storage.list_scope(&cli.scope).await?;
            if entries.is_empty() {
                println!("scope {} is empty", cli.scope);
            }
            for (key, value) in entries {
                println!("{key}={value}");
            }
            storage.close().await;
        }
        Command::InspectUrl { url } => {
            let endpoint =
                SearchEndpoint::new(cli.api_base_url, cli.search_param, cli.page_param)?;
            let query = inspect_url(&endpoint, &url)?;
            println!("term={:?} page={}", query.term(), query.page());
        }
        Command::Replay { file } => {
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("failed to read action log {}", file.display()))?;
            let state = replay(&raw)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
            println!("sum_comments={}", state.sum_comments());
        }
    }

    Ok(())
}

fn inspect_url(endpoint: &SearchEndpoint, raw: &str) -> Result<QueryUrl> {
    endpoint
        .parse(raw)
        .with_context(|| format!("{raw} is not a query url for this endpoint"))
}

fn replay(raw: &str) -> Result<StoriesState> {
    let mut state = StoriesState::new();
    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let action = StoriesAction::decode(line)
            .with_context(|| format!("action log line {} is not a stories action", index + 1))?;
        state.dispatch(action);
    }
    Ok(state)
}
