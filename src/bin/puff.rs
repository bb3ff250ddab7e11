use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod common;

/// Decompress a file produced by `huff`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Compressed file to read. Prompted for when missing.
    input: Option<PathBuf>,
    /// Decompressed file to create. Prompted for when missing.
    output: Option<PathBuf>,
    /// Reject byte value 255, matching 255-entry frequency tables.
    #[arg(long)]
    legacy: bool,
    /// Ignore non-zero padding and data after the payload.
    #[arg(long)]
    lenient: bool,
}

fn main() -> anyhow::Result<()> {
    common::init_logging();
    let cli = Cli::parse();

    let (input, output) = common::resolve_paths(
        cli.input,
        cli.output,
        "Enter the name of the compressed file",
        "Enter the name to be used for the decompressed file",
    )?;
    let config = common::codec_config(cli.legacy, cli.lenient)?;

    let source = common::open_input(&input)?;
    let read = std::fs::metadata(&input).map(|m| m.len()).unwrap_or(0);
    let written = common::write_atomically(&output, |sink| {
        huffpuff::decompress_with_config(source, sink, &config)
    })
    .with_context(|| format!("failed to decompress {}", input.display()))?;

    log::info!("decompressed {} into {}", input.display(), output.display());
    println!("{} bytes -> {} bytes", read, written);
    Ok(())
}
