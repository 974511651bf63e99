use std::io::Write;

use anyhow::Result;
use client_core::{FetchOutcome, QueryController, SearchTermSetting, SortSpec};
use tracing::debug;

use crate::{
    commands::{Command, HELP},
    render::{render_recent, render_stories},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One interactive session: the controller, the persisted term, and the
/// display-only sort selection.
pub struct Session<W: Write> {
    controller: QueryController,
    term: SearchTermSetting,
    sort: SortSpec,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(controller: QueryController, term: SearchTermSetting, sort: SortSpec, out: W) -> Self {
        Self {
            controller,
            term,
            sort,
            out,
        }
    }

    pub fn controller(&self) -> &QueryController {
        &self.controller
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Submits the persisted term, then loads `extra_pages` more pages.
    pub async fn start(&mut self, extra_pages: u32) -> Result<()> {
        let term = self.term.value().to_string();
        self.search(&term).await?;
        for _ in 0..extra_pages {
            if self.controller.state().is_error() {
                break;
            }
            let outcome = self.controller.more().await;
            self.report(outcome)?;
        }
        Ok(())
    }

    pub async fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!(?command, "executing command");
        match command {
            Command::Search(term) => {
                self.search(&term).await?;
                self.show()?;
            }
            Command::More => {
                let outcome = self.controller.more().await;
                self.report(outcome)?;
                self.show()?;
            }
            Command::Recent => render_recent(&mut self.out, &self.controller.recent_terms())?,
            Command::Rerun(index) => {
                let recent = self.controller.recent_terms();
                match recent.get(index - 1) {
                    Some(term) => {
                        self.search(term).await?;
                        self.show()?;
                    }
                    None => writeln!(self.out, "no recent search number {index}")?,
                }
            }
            Command::Sort(key) => {
                self.sort = self.sort.click(key);
                self.show()?;
            }
            Command::Remove(id) => {
                let target = self
                    .controller
                    .state()
                    .items()
                    .iter()
                    .find(|story| story.object_id == id)
                    .cloned();
                match target {
                    Some(story) => {
                        self.controller.remove_item(&story);
                        self.show()?;
                    }
                    None => writeln!(self.out, "no story with id {id}")?,
                }
            }
            Command::Show => self.show()?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    pub fn show(&mut self) -> Result<()> {
        render_stories(&mut self.out, self.controller.state(), self.sort)?;
        let recent = self.controller.recent_terms();
        if !recent.is_empty() {
            writeln!(self.out, "recent searches:")?;
        }
        render_recent(&mut self.out, &recent)?;
        Ok(())
    }

    /// Replaces the remembered term before [`Self::start`]. Terms that cannot
    /// form a query url are reported and never persisted.
    pub async fn override_term(&mut self, term: &str) -> Result<bool> {
        let term = term.trim();
        if term.is_empty() {
            writeln!(self.out, "search term must not be empty")?;
            return Ok(false);
        }
        if let Err(err) = self.controller.build_url(term, 0) {
            writeln!(self.out, "cannot search: {err}")?;
            return Ok(false);
        }
        self.term.commit(term).await
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    /// Commits the term (persisting it when it changed) and starts a fresh
    /// search for it.
    async fn search(&mut self, term: &str) -> Result<()> {
        let term = term.trim();
        if term.is_empty() {
            writeln!(self.out, "search term must not be empty")?;
            return Ok(());
        }
        let outcome = self.controller.submit_new_search(term).await;
        if outcome.is_ok() {
            self.term.commit(term).await?;
        }
        self.report(outcome)
    }

    fn report(&mut self, outcome: Result<FetchOutcome, client_core::QueryUrlError>) -> Result<()> {
        match outcome {
            Ok(FetchOutcome::Applied | FetchOutcome::Discarded | FetchOutcome::Idle) => {}
            Ok(FetchOutcome::Failed) => {
                writeln!(self.out, "fetch failed; run the search again to retry")?
            }
            Err(err) => writeln!(self.out, "cannot search: {err}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
