use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use infisweep_core::{
    BoardSnapshot, Coord, Coord2, DEFAULT_MINE_DENSITY, GameRules, MineField, ReplayData, Replayer,
    RevealedCell, Viewport, generate_seed,
};
use serde::Serialize;

mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with game rules, defaults apply to missing keys
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a fresh random seed
    Seed,
    /// Draw a window of the field as text
    View {
        #[arg(short, long)]
        seed: String,
        #[arg(short, long, default_value_t = DEFAULT_MINE_DENSITY)]
        density: f64,
        /// Center of the window as `x,y`
        #[arg(long, default_value = "0,0", value_parser = parse_coords, allow_hyphen_values = true)]
        center: Coord2,
        #[arg(long, default_value_t = 40)]
        width: u32,
        #[arg(long, default_value_t = 20)]
        height: u32,
    },
    /// Flood reveal from a cell and print the revealed cells as JSON
    Reveal {
        #[arg(short, long)]
        seed: String,
        #[arg(short, long, default_value_t = DEFAULT_MINE_DENSITY)]
        density: f64,
        #[arg(allow_negative_numbers = true)]
        x: Coord,
        #[arg(allow_negative_numbers = true)]
        y: Coord,
        /// Cell budget, taken from the rules when omitted
        #[arg(long)]
        max_cells: Option<usize>,
    },
    /// Rebuild a board from a JSON replay and print its snapshot
    Replay {
        file: PathBuf,
        /// Stop after this many moves
        #[arg(long)]
        until: Option<usize>,
    },
}

fn parse_coords(s: &str) -> Result<Coord2> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected `x,y`, got {s:?}");
    };
    let x = x.trim().parse().with_context(|| format!("invalid x in {s:?}"))?;
    let y = y.trim().parse().with_context(|| format!("invalid y in {s:?}"))?;
    Ok((x, y))
}

fn load_rules(path: Option<&Path>) -> Result<GameRules> {
    let Some(path) = path else {
        return Ok(GameRules::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read rules from {}", path.display()))?;
    let rules: GameRules =
        toml::from_str(&text).with_context(|| format!("invalid rules in {}", path.display()))?;
    log::debug!("Loaded rules: {:?}", rules);
    Ok(rules.validate()?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let rules = load_rules(args.rules.as_deref())?;

    match args.command {
        Command::Seed => {
            println!("{}", generate_seed(&mut rand::rng()));
        }
        Command::View {
            seed,
            density,
            center,
            width,
            height,
        } => {
            let field = MineField::new(seed, density)?;
            let viewport = Viewport::centered_on(center, width, height)?;
            log::debug!("Rendering {:?}", viewport);
            print!("{}", render::render_field(&field, &viewport));
            print!("{}", render::render_legend(&field));
        }
        Command::Reveal {
            seed,
            density,
            x,
            y,
            max_cells,
        } => {
            let field = MineField::new(seed, density)?;
            let start = field.validate_coords((x, y))?;
            let budget = max_cells.unwrap_or(rules.max_reveal_per_click);
            let cells: Vec<_> = field
                .flood_reveal_with_counts(start, budget)
                .into_iter()
                .map(|((x, y), adjacent_mines)| RevealedCell {
                    x,
                    y,
                    adjacent_mines,
                })
                .collect();
            log::info!("Revealed {} cell(s) from {:?}", cells.len(), start);
            print_json(&cells)?;
        }
        Command::Replay { file, until } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("could not read replay {}", file.display()))?;
            let data: ReplayData = serde_json::from_str(&text)
                .with_context(|| format!("invalid replay {}", file.display()))?;
            let total = data.len();
            let mut replayer = Replayer::new(data)?;
            replayer
                .seek(until.unwrap_or(total))
                .with_context(|| format!("replay has {total} move(s)"))?;
            log::info!("Replayed {} of {} move(s)", replayer.position(), total);
            print_json(&BoardSnapshot::from_session(replayer.session()))?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    run(args)
}
