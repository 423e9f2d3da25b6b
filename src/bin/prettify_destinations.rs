use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use cycle_prettifier::cli::{RunArgs, init_tracing};
use cycle_prettifier::pipeline::{prettify_destinations, run_file};

#[derive(Parser, Debug)]
#[command(
    name = "prettify_destinations",
    about = "Prettify cycles together with their destination frames",
    version
)]
struct Cli {
    #[arg(short = 'i', long = "input", default_value = "5x5-destination-frames.txt")]
    input: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        default_value = "5x5-destination-frames-pretty.txt"
    )]
    output: PathBuf,

    #[command(flatten)]
    run: RunArgs,
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.run.resolve(5)?;

    let summary = run_file(&cli.input, &cli.output, |r, w| {
        prettify_destinations(r, w, &config)
    })?;
    println!(
        "Wrote {} cycles ({} frames) to {}",
        summary.records,
        summary.frames,
        cli.output.display()
    );
    Ok(())
}
