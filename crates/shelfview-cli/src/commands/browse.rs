//! Interactive browse session.
//!
//! Reads one command per line from stdin. Fetches run in the background and
//! report back over a channel, so sorting, paging through the held batch and
//! editing keep working while a search is in flight. Only the completion of
//! the most recent fetch is applied.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use shelfview_core::{
    ExportScope, FetchCompletion, FetchRequest, FetchStatus, Field, RecordSource, SortDirection,
    SortState, Table, store,
};

use super::{ViewArgs, parse_field};
use crate::config::Config;
use crate::source::CliSource;
use crate::{output, render};

#[derive(Args, Debug)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub view: ViewArgs,
}

const HELP: &str = "\
commands:
  search <text>            new search, back to page 1
  page <n>                 go to page n
  size <n>                 rows per page, back to page 1
  sort <field> [asc|desc]  sort by a column; repeating a column flips direction
  edit <row>               start editing the row numbered <row>
  set <field> <value>      change a field of the row being edited (empty clears)
  save                     write the edit back
  cancel                   drop the edit
  show                     redraw the table
  export [path] [visible]  write CSV (whole batch, or just this page)
  reload                   fetch the current query again
  wait                     pause input until the pending search lands
  help                     this text
  quit                     leave";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
enum Action {
    Nothing,
    Search(String),
    Page(u32),
    Size(u32),
    Sort(Field, Option<SortDirection>),
    Edit(usize),
    Set(Field, String),
    Save,
    Cancel,
    Show,
    Export(Option<PathBuf>, ExportScope),
    Reload,
    Wait,
    Help,
    Quit,
}

fn positive(arg: Option<&str>, what: &str) -> Result<u32, String> {
    let arg = arg.ok_or_else(|| format!("{} needs a number", what))?;
    match arg.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{} must be a positive number, got '{}'", what, arg)),
    }
}

fn parse_line(line: &str) -> Result<Action, String> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    let action = match command {
        "" => Action::Nothing,
        "search" | "s" => Action::Search(rest.to_string()),
        "page" | "p" => Action::Page(positive(args.next(), "page")?),
        "size" => Action::Size(positive(args.next(), "size")?),
        "sort" => {
            let field = parse_field(args.next().ok_or("sort needs a field")?)?;
            let direction = match args.next() {
                None => None,
                Some("asc") => Some(SortDirection::Ascending),
                Some("desc") => Some(SortDirection::Descending),
                Some(other) => return Err(format!("unknown direction '{}'", other)),
            };
            Action::Sort(field, direction)
        }
        "edit" | "e" => Action::Edit(positive(args.next(), "row")? as usize - 1),
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err("set needs a field".to_string());
            }
            Action::Set(parse_field(field)?, value.to_string())
        }
        "save" => Action::Save,
        "cancel" => Action::Cancel,
        "show" | "ls" => Action::Show,
        "export" => {
            let mut path = None;
            let mut scope = ExportScope::Batch;
            for arg in args {
                if arg == "visible" {
                    scope = ExportScope::Visible;
                } else {
                    path = Some(PathBuf::from(arg));
                }
            }
            Action::Export(path, scope)
        }
        "reload" => Action::Reload,
        "wait" => Action::Wait,
        "help" | "?" => Action::Help,
        "quit" | "exit" | "q" => Action::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };

    Ok(action)
}

struct Session {
    table: Table,
    source: Arc<CliSource>,
    completions: mpsc::UnboundedSender<FetchCompletion>,
    export_file: PathBuf,
}

impl Session {
    fn spawn(&self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let completion = store::fetch(&*source, request).await;
            // The receiver is gone only once the session has ended.
            let _ = completions.send(completion);
        });
    }

    fn show(&self) {
        render::print(
            &self.table.view(),
            self.table.edit_scratch(),
            self.table.store().reported_total(),
        );
    }

    fn fetch(&self, request: Option<FetchRequest>) {
        match request {
            Some(request) => {
                output::status("searching…");
                self.spawn(request);
            }
            None => output::status("unchanged"),
        }
    }

    /// Returns false when the session should end.
    fn perform(&mut self, action: Action) -> shelfview_core::Result<bool> {
        match action {
            Action::Nothing => {}
            Action::Search(query) => {
                let request = self.table.set_search_query(query);
                self.fetch(request);
            }
            Action::Page(page) => {
                let request = self.table.set_page(page - 1);
                self.fetch(request);
            }
            Action::Size(size) => {
                let request = self.table.set_page_size(size)?;
                self.fetch(request);
            }
            Action::Sort(field, direction) => {
                let sort = match direction {
                    Some(direction) => SortState::new(field, direction),
                    None => self.table.sort().toggled(field),
                };
                self.table.set_sort(sort);
                self.show();
            }
            Action::Edit(index) => {
                if self.table.begin_edit(index) {
                    self.show();
                } else {
                    output::error(&format!("no row {}", index + 1));
                }
            }
            Action::Set(field, value) => {
                if self.table.update_edit(field, &value)? {
                    self.show();
                } else {
                    output::error("not editing; use 'edit <row>' first");
                }
            }
            Action::Save => match self.table.commit_edit() {
                Some(_) => {
                    output::success("saved");
                    self.show();
                }
                None => output::error("nothing to save"),
            },
            Action::Cancel => {
                if self.table.cancel_edit() {
                    self.show();
                } else {
                    output::error("not editing");
                }
            }
            Action::Show => self.show(),
            Action::Export(path, scope) => {
                let path = path.unwrap_or_else(|| self.export_file.clone());
                match File::create(&path) {
                    Ok(file) => {
                        let count = self.table.export_csv(BufWriter::new(file), scope)?;
                        output::success(&format!(
                            "Exported {} records to {}",
                            count,
                            path.display()
                        ));
                    }
                    Err(e) => {
                        output::error(&format!("Failed to create {}: {}", path.display(), e))
                    }
                }
            }
            Action::Reload => {
                let request = self.table.reload();
                self.fetch(Some(request));
            }
            Action::Help => println!("{}", HELP),
            Action::Wait => {}
            Action::Quit => return Ok(false),
        }
        Ok(true)
    }
}

pub async fn run(args: BrowseArgs, config: &Config) -> Result<()> {
    let source = Arc::new(CliSource::from_config(config)?);
    let (completions, mut incoming) = mpsc::unbounded_channel();

    let mut table = Table::new(args.view.params(config)?);
    table.set_sort(args.view.sort_state());

    let mut session = Session {
        table,
        source,
        completions,
        export_file: config.export_file.clone(),
    };

    output::status(&format!(
        "browsing {} (type 'help' for commands)",
        session.source.describe()
    ));
    let request = session.table.reload();
    session.spawn(request);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut waiting = false;

    loop {
        tokio::select! {
            Some(completion) = incoming.recv() => {
                match session.table.apply_fetch(completion) {
                    FetchStatus::Applied => session.show(),
                    FetchStatus::Degraded => {
                        output::error(&format!(
                            "Could not search {}; showing no records",
                            session.source.describe()
                        ));
                        session.show();
                    }
                    FetchStatus::Stale => debug!("discarded superseded search results"),
                }
                if !session.table.store().is_loading() {
                    waiting = false;
                }
            }
            line = lines.next_line(), if !waiting => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match parse_line(&line) {
                    Ok(Action::Wait) => waiting = session.table.store().is_loading(),
                    Ok(action) => match session.perform(action) {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(e) => output::error(&e.to_string()),
                    },
                    Err(e) => output::error(&e),
                }
            }
            else => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("  "), Ok(Action::Nothing));
        assert_eq!(
            parse_line("search the hobbit"),
            Ok(Action::Search("the hobbit".to_string()))
        );
        assert_eq!(parse_line("page 3"), Ok(Action::Page(3)));
        assert_eq!(parse_line("edit 1"), Ok(Action::Edit(0)));
        assert_eq!(
            parse_line("sort year desc"),
            Ok(Action::Sort(
                Field::FirstPublishYear,
                Some(SortDirection::Descending)
            ))
        );
        assert_eq!(
            parse_line("sort title"),
            Ok(Action::Sort(Field::Title, None))
        );
        assert_eq!(
            parse_line("set title  The Hobbit "),
            Ok(Action::Set(Field::Title, "The Hobbit".to_string()))
        );
        assert_eq!(
            parse_line("set rating"),
            Ok(Action::Set(Field::AverageRating, String::new()))
        );
        assert_eq!(
            parse_line("export out.csv visible"),
            Ok(Action::Export(
                Some(PathBuf::from("out.csv")),
                ExportScope::Visible
            ))
        );
        assert_eq!(parse_line("quit"), Ok(Action::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_line("page 0").is_err());
        assert!(parse_line("page two").is_err());
        assert!(parse_line("edit").is_err());
        assert!(parse_line("sort colour").is_err());
        assert!(parse_line("sort title sideways").is_err());
        assert!(parse_line("set").is_err());
        assert!(parse_line("frobnicate").is_err());
    }
}
