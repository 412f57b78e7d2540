//! Grid notebook command handlers.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;

use vibemap_core::{
    load_palette, AppConfig, Cell, GridSnapshot, GridState, NumericLabel, Palette,
};
use vibemap_store::{GridSession, JsonFileStore, KvStore};

/// Sub-commands available under `grid`.
#[derive(Debug, Subcommand)]
pub(crate) enum GridCommands {
    /// Print the grid and per-symbol counts
    Show,
    /// Paint one cell with a palette entry or a numeric value
    Paint {
        /// Cell index, row-major from the top-left
        #[arg(long)]
        index: usize,
        /// Palette entry to paint with, by index or label (0 clears)
        #[arg(long, conflicts_with = "value")]
        entry: Option<String>,
        /// Numeric value in DDD.D form (paints the numeric entry)
        #[arg(long)]
        value: Option<String>,
    },
    /// Clear one cell back to empty
    Clear {
        /// Cell index, row-major from the top-left
        #[arg(long)]
        index: usize,
    },
    /// Clear the whole grid
    Reset,
    /// Print the share token and URL for the current grid
    Share,
    /// Replace the grid from a share token or a snapshot file
    Import {
        #[arg(long, conflicts_with = "file")]
        token: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

pub(crate) fn run(config: &AppConfig, command: GridCommands) -> anyhow::Result<()> {
    let palette = match &config.palette_path {
        Some(path) => load_palette(path)
            .with_context(|| format!("loading palette from {}", path.display()))?,
        None => Palette::default(),
    };
    let store = JsonFileStore::new(&config.grid_state_path);
    let mut session = GridSession::open(config.grid_dimensions(), palette, store)?;

    match command {
        GridCommands::Show => show(session.grid()),
        GridCommands::Paint {
            index,
            entry,
            value,
        } => {
            let cell = parse_brush(session.grid(), entry.as_deref(), value.as_deref())?;
            session.paint(index, cell)?;
        }
        GridCommands::Clear { index } => session.clear(index)?,
        GridCommands::Reset => session.reset()?,
        GridCommands::Share => {
            println!("{}", session.share_token());
            println!("{}", session.share_url(&config.share_base_url));
        }
        GridCommands::Import { token, file } => import(&mut session, token, file)?,
    }
    Ok(())
}

/// Resolve `--entry`/`--value` into the cell to paint.
fn parse_brush(
    grid: &GridState,
    entry: Option<&str>,
    value: Option<&str>,
) -> anyhow::Result<Cell> {
    if let Some(value) = value {
        return Ok(Cell::Numeric(NumericLabel::new(value)?));
    }
    let Some(entry) = entry else {
        anyhow::bail!("pass --entry or --value to paint");
    };

    let index = match entry.parse::<usize>() {
        Ok(index) => index,
        Err(_) => grid
            .palette()
            .index_of_label(entry)
            .with_context(|| format!("no palette entry labeled {entry:?}"))?,
    };
    if index == 0 {
        return Ok(Cell::Empty);
    }
    Ok(Cell::Symbol(index))
}

fn import<S: KvStore>(
    session: &mut GridSession<S>,
    token: Option<String>,
    file: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(token) = token {
        session.import_share_token(&token)?;
        return Ok(());
    }
    let Some(path) = file else {
        anyhow::bail!("pass --token or --file to import");
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("reading snapshot from {}", path.display()))?;
    let snapshot: GridSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a grid snapshot", path.display()))?;
    session.import_snapshot(&snapshot)?;
    Ok(())
}

fn show(grid: &GridState) {
    let dimensions = grid.dimensions();
    let palette = grid.palette();

    for row in 0..dimensions.height {
        let mut line = String::new();
        for column in 0..dimensions.width {
            let index = row * dimensions.width + column;
            let rendered = match &grid.cells()[index] {
                Cell::Empty => "·".to_string(),
                Cell::Symbol(palette_index) => palette
                    .get(*palette_index)
                    .map_or_else(|| "?".to_string(), |entry| entry.symbol.clone()),
                Cell::Numeric(label) => label.to_string(),
            };
            line.push_str(&rendered);
            line.push(' ');
        }
        println!("{}", line.trim_end());
    }

    let counts = grid.symbol_counts();
    if counts.is_empty() {
        println!("(grid is empty)");
        return;
    }
    let mut summary = String::new();
    for (palette_index, count) in &counts {
        if let Some(entry) = palette.get(*palette_index) {
            let shown = if entry.symbol.is_empty() {
                entry.label.as_str()
            } else {
                entry.symbol.as_str()
            };
            summary.push_str(&format!("{shown} {count}  "));
        }
    }
    println!("{}", summary.trim_end());
}
