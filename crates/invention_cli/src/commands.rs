//! One-shot command dispatch.

use crate::args::{Cli, Command, FieldArgs};
use crate::error::CliError;
use crate::shell;
use invention_core::db::open_db;
use invention_core::{
    init_logging, render_detail, render_grid, render_list, AppConfig, BrowserSession, DraftField,
    GridLayout, InventionId, InventionRepository, InventionService, SqliteInventionRepository,
};
use log::info;

/// Terminal width assumed for card and detail rendering.
pub const RENDER_WIDTH: usize = 96;
/// Narrowest card the adaptive grid will produce.
pub const MIN_CARD_WIDTH: usize = 30;

pub fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(&config.log_level, log_dir)?;
    }
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let conn = open_db(&config.db_path)?;
    let repo = SqliteInventionRepository::try_new(&conn)?;
    let mut session = BrowserSession::new(
        InventionService::new(repo),
        config.layout,
        config.search_fields(),
    )?;

    match cli.command {
        Command::Add(fields) => {
            session.add()?;
            apply_fields(&mut session, &fields, false)?;
            let saved = session.done()?;
            println!("added {} {}", saved.id, saved.display_title());
        }
        Command::List { query, sort, json } => {
            session.set_sort(sort.into())?;
            session.set_query(query.unwrap_or_default());
            let visible = session.visible();
            if json {
                let text = serde_json::to_string_pretty(&visible)
                    .map_err(|err| CliError::Output(err.to_string()))?;
                println!("{text}");
            } else {
                print!("{}", render_list(&visible, None));
            }
        }
        Command::Grid { query, columns } => {
            session.set_query(query.unwrap_or_default());
            let layout = grid_layout(columns.map(usize::from).or(config.grid_columns));
            print!("{}", render_grid(&session.visible(), layout));
        }
        Command::Show { target } => {
            let id = resolve_target(&session, &target)?;
            session.select(Some(id));
            print!("{}", render_detail(session.selected(), RENDER_WIDTH));
        }
        Command::Edit {
            target,
            fields,
            clear_link,
        } => {
            let id = resolve_target(&session, &target)?;
            session.open_editor(id)?;
            apply_fields(&mut session, &fields, clear_link)?;
            let saved = session.done()?;
            println!("saved {} {}", saved.id, saved.display_title());
        }
        Command::Delete { target } => {
            let id = resolve_target(&session, &target)?;
            session.delete(id)?;
            println!("deleted {id}");
        }
        Command::Shell { layout } => {
            if let Some(layout) = layout {
                session.set_layout(layout.into());
            }
            shell::run(&mut session, config.grid_columns)?;
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, CliError> {
    let mut config = match cli.config.as_ref() {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(db) = cli.db.as_ref() {
        config.db_path = db.clone();
    }
    if let Some(level) = cli.log_level.as_ref() {
        config.log_level = level.clone();
    }
    if let Some(dir) = cli.log_dir.as_ref() {
        config.log_dir = Some(dir.clone());
    }
    config.validate()?;
    Ok(config)
}

pub fn grid_layout(columns: Option<usize>) -> GridLayout {
    match columns {
        Some(columns) => GridLayout::fixed(columns, RENDER_WIDTH),
        None => GridLayout::adaptive(RENDER_WIDTH, MIN_CARD_WIDTH),
    }
}

pub fn resolve_target<R: InventionRepository>(
    session: &BrowserSession<R>,
    target: &str,
) -> Result<InventionId, CliError> {
    session
        .resolve(target)
        .ok_or_else(|| CliError::UnknownTarget(target.to_string()))
}

fn apply_fields<R: InventionRepository>(
    session: &mut BrowserSession<R>,
    fields: &FieldArgs,
    clear_link: bool,
) -> Result<(), CliError> {
    if let Some(title) = fields.title.as_ref() {
        session.edit(DraftField::Title, title.as_str())?;
    }
    if let Some(details) = fields.details.as_ref() {
        session.edit(DraftField::Details, details.as_str())?;
    }
    if let Some(link) = fields.link.as_ref() {
        session.edit(DraftField::Link, link.as_str())?;
    }
    if clear_link {
        session.edit(DraftField::Link, "")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::args::Cli;
    use clap::Parser;
    use invention_core::db::open_db;
    use invention_core::{InventionListQuery, InventionRepository, SqliteInventionRepository};

    #[test]
    fn add_command_stores_the_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventions.sqlite3");
        let db = path.to_str().unwrap();

        run(Cli::try_parse_from([
            "invention", "--db", db, "add", "--title", "Loom", "--link", "example.com/loom",
        ])
        .unwrap())
        .unwrap();

        let conn = open_db(&path).unwrap();
        let repo = SqliteInventionRepository::try_new(&conn).unwrap();
        let stored = repo.list_inventions(&InventionListQuery::default()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title.as_deref(), Some("Loom"));
        assert_eq!(stored[0].details.as_deref(), Some(""));
        assert_eq!(stored[0].link_string.as_deref(), Some("example.com/loom"));
    }
}
