//! Interactive shell driving a [`BrowserSession`].
//!
//! Each input line is one UI event; the view is re-rendered after every
//! event that can change it. Command failures are printed and the loop
//! keeps running.

use crate::commands::{grid_layout, resolve_target, RENDER_WIDTH};
use crate::error::CliError;
use invention_core::{
    render_detail, render_grid, render_list, Activation, BrowserSession, DraftField,
    InventionRepository, Layout, SessionState,
};
use log::{debug, warn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const HELP: &str = "\
commands:
  search <text>     filter by title, details or link (empty clears)
  list | grid       render the filtered view
  select <n|id>     select a row (master-detail) or open a card (grid)
  open <n|id>       edit an invention
  add               create an invention and edit it
  title <text>      set the title of the open draft
  details <text>    set the details of the open draft
  link [text]       set or clear the link of the open draft
  done              save the draft and close the editor
  cancel            discard the draft
  delete <n|id>     remove an invention
  layout grid|master-detail
  help | quit";

/// Result of handling one shell line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Render,
    Quit,
}

pub fn run<R: InventionRepository>(
    session: &mut BrowserSession<R>,
    grid_columns: Option<usize>,
) -> Result<(), CliError> {
    let mut editor = DefaultEditor::new().map_err(|err| CliError::Shell(err.to_string()))?;
    println!("{HELP}");
    println!("{}", render(session, grid_columns));

    loop {
        let line = match editor.readline(&prompt(session)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(CliError::Shell(err.to_string())),
        };
        if let Some(entry) = history_entry(&line) {
            if let Err(err) = editor.add_history_entry(entry) {
                debug!("event=shell_history module=cli status=error error={err}");
            }
        }

        match handle_line(session, &line) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Render) => println!("{}", render(session, grid_columns)),
            Ok(Outcome::Continue) => {}
            Err(err) => {
                warn!("event=shell_command module=cli status=error error={err}");
                println!("error: {err}");
            }
        }
    }

    if let SessionState::Editing(id) = session.state() {
        println!("discarded unsaved edits to {id}");
    }
    Ok(())
}

/// Line worth keeping in the readline history, if any.
fn history_entry(line: &str) -> Option<&str> {
    if line.trim().is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Applies one shell line to the session.
pub fn handle_line<R: InventionRepository>(
    session: &mut BrowserSession<R>,
    line: &str,
) -> Result<Outcome, CliError> {
    let line = line.trim_start();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

    match command.trim() {
        "" => Ok(Outcome::Continue),
        "help" => {
            println!("{HELP}");
            Ok(Outcome::Continue)
        }
        "quit" | "exit" => Ok(Outcome::Quit),
        "list" | "grid" => Ok(Outcome::Render),
        "search" => {
            session.set_query(rest);
            Ok(Outcome::Render)
        }
        "layout" => {
            let layout = match rest.trim() {
                "grid" => Layout::Grid,
                "master-detail" | "master_detail" => Layout::MasterDetail,
                other => {
                    return Err(CliError::Shell(format!(
                        "unknown layout `{other}`; expected grid|master-detail"
                    )))
                }
            };
            session.set_layout(layout);
            Ok(Outcome::Render)
        }
        "select" => {
            let id = resolve_target(session, rest)?;
            match session.activate(id)? {
                Activation::Selected(_) => Ok(Outcome::Render),
                Activation::Editing(_) => Ok(Outcome::Continue),
            }
        }
        "open" => {
            let id = resolve_target(session, rest)?;
            session.open_editor(id)?;
            Ok(Outcome::Continue)
        }
        "add" => {
            session.add()?;
            Ok(Outcome::Render)
        }
        "title" => edit(session, DraftField::Title, rest),
        "details" => edit(session, DraftField::Details, &rest.replace("\\n", "\n")),
        "link" => edit(session, DraftField::Link, rest.trim()),
        "done" => {
            let saved = session.done()?;
            println!("saved {}", saved.display_title());
            Ok(Outcome::Render)
        }
        "cancel" => {
            session.cancel()?;
            Ok(Outcome::Render)
        }
        "delete" => {
            let id = resolve_target(session, rest)?;
            session.delete(id)?;
            Ok(Outcome::Render)
        }
        other => Err(CliError::Shell(format!(
            "unknown command `{other}`; type `help`"
        ))),
    }
}

fn edit<R: InventionRepository>(
    session: &mut BrowserSession<R>,
    field: DraftField,
    value: &str,
) -> Result<Outcome, CliError> {
    session.edit(field, value)?;
    Ok(Outcome::Continue)
}

fn prompt<R: InventionRepository>(session: &BrowserSession<R>) -> String {
    match session.editor() {
        Some(draft) => {
            let title = draft.title.as_deref().unwrap_or("");
            format!("edit[{title}]{}> ", if draft.is_dirty() { "*" } else { "" })
        }
        None if session.query().is_empty() => "inventions> ".to_string(),
        None => format!("inventions /{}> ", session.query()),
    }
}

/// Renders the current view, plus the open draft when editing.
pub fn render<R: InventionRepository>(
    session: &BrowserSession<R>,
    grid_columns: Option<usize>,
) -> String {
    let visible = session.visible();
    let mut out = match session.layout() {
        Layout::Grid => render_grid(&visible, grid_layout(grid_columns)),
        Layout::MasterDetail => {
            let selected = session.selected();
            format!(
                "{}\n{}",
                render_list(&visible, selected.map(|invention| invention.id)),
                render_detail(selected, RENDER_WIDTH)
            )
        }
    };

    if let Some(draft) = session.editor() {
        out.push_str(&format!(
            "\nediting {}\n  title:   {}\n  details: {}\n  link:    {}\n",
            draft.id(),
            draft.title.as_deref().unwrap_or(""),
            draft.details.as_deref().unwrap_or("").replace('\n', "\\n"),
            draft.link_string.as_deref().unwrap_or("")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{handle_line, history_entry, render, Outcome};
    use invention_core::db::open_db_in_memory;
    use invention_core::{
        BrowserSession, InventionService, Layout, SearchFields, SessionState,
        SqliteInventionRepository,
    };

    #[test]
    fn add_edit_done_flow_persists_fields() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteInventionRepository::try_new(&conn).unwrap();
        let mut session =
            BrowserSession::new(InventionService::new(repo), Layout::Grid, SearchFields::ALL)
                .unwrap();

        assert_eq!(handle_line(&mut session, "add").unwrap(), Outcome::Render);
        handle_line(&mut session, "title Radio").unwrap();
        handle_line(&mut session, "details wireless\\ntelegraphy").unwrap();
        handle_line(&mut session, "link https://example.com/radio").unwrap();
        handle_line(&mut session, "done").unwrap();

        assert_eq!(session.state(), SessionState::Idle);
        let saved = &session.snapshot()[0];
        assert_eq!(saved.title.as_deref(), Some("Radio"));
        assert_eq!(saved.details.as_deref(), Some("wireless\ntelegraphy"));
        assert!(render(&session, Some(1)).contains("Radio"));
    }

    #[test]
    fn blank_lines_stay_out_of_history() {
        assert_eq!(history_entry(""), None);
        assert_eq!(history_entry("   \t"), None);
        assert_eq!(history_entry("search loom"), Some("search loom"));
    }

    #[test]
    fn cancel_discards_draft_and_unknown_commands_error() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteInventionRepository::try_new(&conn).unwrap();
        let mut session = BrowserSession::new(
            InventionService::new(repo),
            Layout::MasterDetail,
            SearchFields::ALL,
        )
        .unwrap();

        handle_line(&mut session, "add").unwrap();
        handle_line(&mut session, "done").unwrap();
        handle_line(&mut session, "open 1").unwrap();
        handle_line(&mut session, "title Scrapped").unwrap();
        handle_line(&mut session, "cancel").unwrap();

        assert_eq!(session.snapshot()[0].title.as_deref(), Some("New invention"));
        assert!(handle_line(&mut session, "frobnicate").is_err());
        assert_eq!(handle_line(&mut session, "quit").unwrap(), Outcome::Quit);
    }
}
