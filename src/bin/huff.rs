use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod common;

/// Compress a file with static Huffman coding.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to compress. Prompted for when missing.
    input: Option<PathBuf>,
    /// Compressed file to create. Prompted for when missing.
    output: Option<PathBuf>,
    /// Only accept byte values 0-254, matching 255-entry frequency tables.
    #[arg(long)]
    legacy: bool,
}

fn main() -> anyhow::Result<()> {
    common::init_logging();
    let cli = Cli::parse();

    let (input, output) = common::resolve_paths(
        cli.input,
        cli.output,
        "Enter the name of the original file",
        "Enter the name to be used for the compressed file",
    )?;
    let config = common::codec_config(cli.legacy, false)?;

    let source = common::open_input(&input)?;
    let read = std::fs::metadata(&input).map(|m| m.len()).unwrap_or(0);
    let written = common::write_atomically(&output, |sink| {
        huffpuff::compress_with_config(source, sink, &config)
    })
    .with_context(|| format!("failed to compress {}", input.display()))?;

    log::info!("compressed {} into {}", input.display(), output.display());
    println!("{} bytes -> {} bytes", read, written);
    Ok(())
}
