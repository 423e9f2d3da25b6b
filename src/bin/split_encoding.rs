use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use cycle_prettifier::cli::{ConfigArgs, init_tracing};
use cycle_prettifier::pipeline::{run_file, split_encoding};
use cycle_prettifier::records::RecordLayout;

/// Rewrites every frame encoding as two 64-bit halves for tools without
/// big integers.
#[derive(Parser, Debug)]
#[command(name = "split_encoding", version)]
struct Cli {
    #[arg(short = 'i', long = "input", default_value = "9.txt")]
    input: PathBuf,

    #[arg(short = 'o', long = "output", default_value = "9-altered.txt")]
    output: PathBuf,

    #[command(flatten)]
    source: ConfigArgs,
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.source.resolve(9)?;
    let layout = config.layout_or(RecordLayout::frames_only);

    let summary = run_file(&cli.input, &cli.output, |r, w| split_encoding(r, w, layout))?;
    println!(
        "Re-encoded {} frames in {} records",
        summary.frames, summary.records
    );
    Ok(())
}
