//! Line commands accepted by the interactive prompt.

use std::str::FromStr;

use client_core::{SortKey, StoryId, UnknownSortKey};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  search <term>   start a new search (page 0) and remember the term
  more            load the next page for the current term
  recent          list recent search terms
  rerun <n>       search again for recent term number n
  sort <key>      sort by none|title|author|comment|point (repeat to reverse)
  remove <id>     drop a story from the list
  show            print the current list
  help            print this help
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    More,
    Recent,
    Rerun(usize),
    Sort(SortKey),
    Remove(StoryId),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}; type `help`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a recent-search number")]
    InvalidIndex(String),
    #[error(transparent)]
    Sort(#[from] UnknownSortKey),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let require = |name: &'static str| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest)
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "search" | "s" => Ok(Self::Search(require("search")?.to_string())),
            "more" | "m" => Ok(Self::More),
            "recent" | "r" => Ok(Self::Recent),
            "rerun" => {
                let raw = require("rerun")?;
                match raw.parse::<usize>() {
                    Ok(index) if index > 0 => Ok(Self::Rerun(index)),
                    _ => Err(CommandError::InvalidIndex(raw.to_string())),
                }
            }
            "sort" => Ok(Self::Sort(require("sort")?.parse()?)),
            "remove" | "rm" => Ok(Self::Remove(StoryId::from(require("remove")?))),
            "show" | "ls" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
