use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tree::camera::{ViewTransform, Viewport};
use tree::consts::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, SEARCH_LIMIT};
use tree::map::{MapEvent, MapLayer, MapState, MigrationLine};
use tree::person::DatasetError;
use tree::search::search_persons;
use tree::timeline::TimelineRange;
use tree::viewer::ViewerCore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read dataset {path}: {source}")]
    ReadDataset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
    #[error("invalid year range: min {min} is after max {max}")]
    InvalidRange { min: i32, max: i32 },
    #[error("no person with id `{0}`")]
    UnknownPerson(String),
    #[error("person `{0}` has no generation and is not placed in the tree")]
    NotInTree(String),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "kintree", about = "Family tree layout and timeline inspector")]
struct Cli {
    /// Dataset document: `{ "persons": [...], "locations": {...} }`.
    #[arg(long, env = "KINTREE_DATA", default_value = "data.json")]
    data: PathBuf,

    #[arg(long, env = "KINTREE_MIN_YEAR", default_value_t = DEFAULT_MIN_YEAR)]
    min_year: i32,

    #[arg(long, env = "KINTREE_MAX_YEAR", default_value_t = DEFAULT_MAX_YEAR)]
    max_year: i32,

    /// Single-line JSON output.
    #[arg(long, default_value_t = false)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Node positions and edge anchors.
    Layout,
    /// Node and edge visual state at a cursor year.
    State {
        #[arg(long)]
        year: i32,
    },
    /// Persons whose name matches a query.
    Search {
        query: String,
        #[arg(long, default_value_t = SEARCH_LIMIT)]
        limit: usize,
    },
    /// View transform: the initial view, or centred on a person.
    View {
        id: Option<String>,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
    },
    /// Lifespan bars for the timeline track.
    Periods,
    /// Located life events, migration lines and their state at a year.
    Map {
        #[arg(long)]
        year: Option<i32>,
        /// Legend layer to switch off: birth, death, marriage or migration.
        #[arg(long = "hide")]
        hidden: Vec<MapLayer>,
    },
    /// Detail panel contents for one person.
    Person {
        id: String,
        /// Cursor year used for the person's state.
        #[arg(long)]
        year: Option<i32>,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    if cli.min_year > cli.max_year {
        return Err(CliError::InvalidRange { min: cli.min_year, max: cli.max_year });
    }
    let range = TimelineRange::new(cli.min_year, cli.max_year);
    let mut viewer = load_viewer(&cli.data, range)?;
    let pretty = !cli.compact;

    match cli.command {
        Command::Layout => print_json(viewer.layout(), pretty),
        Command::State { year } => {
            warn_if_clamped(range, year);
            print_json(viewer.set_cursor_year(year), pretty)
        }
        Command::Search { query, limit } => {
            let hits = search_persons(viewer.dataset().persons(), &query, limit);
            tracing::debug!(%query, hits = hits.len(), "search complete");
            print_json(&hits, pretty)
        }
        Command::View { id, width, height } => {
            let viewport = Viewport::new(width, height);
            let view = match id {
                None => ViewTransform::initial(viewport),
                Some(id) => focus(&viewer, &id, viewport)?,
            };
            print_json(&view, pretty)
        }
        Command::Periods => print_json(&viewer.period_bars(), pretty),
        Command::Map { year, hidden } => {
            if let Some(year) = year {
                warn_if_clamped(range, year);
                viewer.set_cursor_year(year);
            }
            for layer in hidden {
                viewer.set_map_layer(layer, false);
            }
            let report = MapReport {
                events: viewer.map_events(),
                migrations: viewer.migration_lines(),
                state: viewer.map_state(),
            };
            print_json(&report, pretty)
        }
        Command::Person { id, year } => {
            if let Some(year) = year {
                warn_if_clamped(range, year);
                viewer.set_cursor_year(year);
            }
            let details = viewer.details(&id).ok_or(CliError::UnknownPerson(id))?;
            print_json(&details, pretty)
        }
    }
}

#[derive(Serialize)]
struct MapReport<'a> {
    events: &'a [MapEvent],
    migrations: &'a [MigrationLine],
    state: &'a MapState,
}

fn warn_if_clamped(range: TimelineRange, year: i32) {
    if range.clamp(year) != year {
        tracing::warn!(year, min = range.min_year, max = range.max_year, "cursor year clamped into range");
    }
}

fn load_viewer(path: &Path, range: TimelineRange) -> Result<ViewerCore, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::ReadDataset { path: path.to_owned(), source })?;
    tracing::info!(path = %path.display(), bytes = raw.len(), "dataset loaded");
    Ok(ViewerCore::from_json(&raw, range)?)
}

fn focus(viewer: &ViewerCore, id: &str, viewport: Viewport) -> Result<ViewTransform, CliError> {
    if let Some(view) = viewer.focus(id, viewport) {
        return Ok(view);
    }
    if viewer.dataset().person(id).is_some() {
        Err(CliError::NotInTree(id.to_owned()))
    } else {
        Err(CliError::UnknownPerson(id.to_owned()))
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<(), CliError> {
    let text = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    println!("{text}");
    Ok(())
}
