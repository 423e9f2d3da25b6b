use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use cycle_prettifier::cli::{RunArgs, init_tracing};
use cycle_prettifier::codec::{decode, parse_board};
use cycle_prettifier::format::{CellStyle, format_cycle, grid_json};
use cycle_prettifier::grid::Grid;

#[derive(Parser, Debug)]
#[command(
    name = "pretty_board",
    about = "Print the canonical placement of a single board",
    version
)]
struct Cli {
    /// Board drawn with O/- (or 1/0) cells, one row per line
    #[arg(short = 'i', long = "input", default_value = "input.txt")]
    input: PathBuf,

    /// Decimal board encoding instead of a board file (needs --size)
    #[arg(long = "value", requires = "size")]
    value: Option<u128>,

    // with a board file, --size and a config size must match the drawing
    #[command(flatten)]
    run: RunArgs,

    /// Print the result as a JSON row array instead of a drawing
    #[arg(long = "json")]
    json: bool,
}

fn load_board(cli: &Cli) -> Result<Grid, Box<dyn Error>> {
    if let (Some(value), Some(size)) = (cli.value, cli.run.source.size) {
        return Ok(decode(value, size)?);
    }
    let text = fs::read_to_string(&cli.input)
        .map_err(|e| format!("Failed to read {}: {e}", cli.input.display()))?;
    Ok(parse_board(&text)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();

    let board = load_board(&cli)?;
    let config = cli.run.resolve_for_board(board.size())?;
    let pretty = config.canonicalizer().prettify(&board);
    tracing::info!(
        offset = %pretty.offset,
        penalty = pretty.min_penalty,
        "board prettified"
    );

    if cli.json {
        println!("{}", grid_json(&pretty.grid)?);
    } else {
        print!("{}", format_cycle(&[pretty.grid], CellStyle::Ascii));
    }
    Ok(())
}
