use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pokedex_movesets::report;
use pokedex_movesets::{CostTable, MovesetError, MovesetSearch, Pokedex, SearchRequest};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pokedex data file (.ron or .postcard)
    #[arg(long, global = true, default_value = "data/pokedex.ron")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Check whether a Pokemon can know a moveset, and how to get it
    Check(CheckArg),
    /// Convert a RON data file into a postcard snapshot
    Compile { input: PathBuf, output: PathBuf },
}

#[derive(Debug, Clone, Args)]
struct CheckArg {
    /// The Pokemon, e.g. `pikachu`
    pokemon: String,
    /// One to four moves, e.g. `volt-tackle`
    moves: Vec<String>,
    /// Level the Pokemon must be at (or below)
    #[arg(short, long, default_value_t = 100)]
    level: u8,
    /// The game the moveset is wanted in
    #[arg(short = 'v', long = "game", value_name = "VERSION", default_value = "black")]
    game: String,
    /// Games that may not be used along the way
    #[arg(short = 'V', long = "exclude-version")]
    exclude_versions: Vec<String>,
    /// Pokemon whose families may not be used along the way
    #[arg(short = 'P', long = "exclude-pokemon")]
    exclude_pokemon: Vec<String>,
    /// More output; repeat for a log line per searched node
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
    /// RON or JSON file with cost overrides
    #[arg(long)]
    costs: Option<PathBuf>,
    /// Single cost override as KIND=VALUE, e.g. `breed=250`
    #[arg(long = "cost")]
    cost_overrides: Vec<String>,
    /// Print up to this many paths, cheapest first
    #[arg(long, default_value_t = 1)]
    alternatives: usize,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let verbosity = match &cli.command {
        Command::Check(arg) => arg.debug,
        Command::Compile { .. } => 0,
    };
    init_logging(verbosity);

    match cli.command {
        Command::Check(arg) => run_check(&cli.data, &arg),
        Command::Compile { input, output } => {
            let pokedex = Pokedex::load(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            pokedex
                .save_postcard(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Wrote {}", output.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_check(data: &Path, arg: &CheckArg) -> anyhow::Result<ExitCode> {
    let pokedex =
        Pokedex::load(data).with_context(|| format!("loading {}", data.display()))?;

    let request = match build_request(&pokedex, arg) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };
    let search = match MovesetSearch::new(&pokedex, &request) {
        Ok(search) => search,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    let paths: Vec<_> = search.paths().take(arg.alternatives.max(1)).collect();
    print!("{}", report::render_outcome(&pokedex, &request, &paths));
    if paths.is_empty() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn build_request(pokedex: &Pokedex, arg: &CheckArg) -> Result<SearchRequest, MovesetError> {
    let mut costs = match &arg.costs {
        Some(path) => CostTable::load(path)?,
        None => CostTable::default(),
    };
    for entry in &arg.cost_overrides {
        costs.apply_override_str(entry)?;
    }
    let request = SearchRequest::from_identifiers(pokedex, &arg.pokemon, &arg.game, &arg.moves)?
        .excluding_identifiers(pokedex, &arg.exclude_versions, &arg.exclude_pokemon)?
        .with_level(arg.level)
        .with_costs(costs)
        .with_debug(arg.debug);
    Ok(request)
}
