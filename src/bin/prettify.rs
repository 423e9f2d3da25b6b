use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use cycle_prettifier::cli::{RunArgs, init_tracing};
use cycle_prettifier::pipeline::{prettify_cycles, run_file};

#[derive(Parser, Debug)]
#[command(
    name = "prettify",
    about = "Draw every cycle of a record file in its canonical toroidal placement",
    version
)]
struct Cli {
    /// Record file: header, frames line, then N + 1 ignored lines per cycle
    #[arg(short = 'i', long = "input", default_value = "cycles.txt")]
    input: PathBuf,

    /// Output file
    #[arg(short = 'o', long = "output", default_value = "cycles-pretty.txt")]
    output: PathBuf,

    #[command(flatten)]
    run: RunArgs,
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.run.resolve(6)?;

    let summary = run_file(&cli.input, &cli.output, |r, w| {
        prettify_cycles(r, w, &config)
    })?;
    println!(
        "Wrote {} cycles ({} frames) to {}",
        summary.records,
        summary.frames,
        cli.output.display()
    );
    Ok(())
}
