//! Glue shared by the `huff` and `puff` binaries.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use huffpuff::{Alphabet, CodecConfig};
use tempfile::NamedTempFile;

pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// Uses the paths from the command line, asking on stdin for any that are
/// missing.
pub fn resolve_paths(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    input_prompt: &str,
    output_prompt: &str,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    if let (Some(input), Some(output)) = (&input, &output) {
        return Ok((input.clone(), output.clone()));
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock();
    let input = match input {
        Some(path) => path,
        None => prompt(&mut lines, input_prompt)?,
    };
    let output = match output {
        Some(path) => path,
        None => prompt(&mut lines, output_prompt)?,
    };
    Ok((input, output))
}

fn prompt<B: BufRead>(lines: &mut B, message: &str) -> anyhow::Result<PathBuf> {
    print!("{}: ", message);
    io::stdout().flush()?;

    let mut line = String::new();
    lines.read_line(&mut line)?;
    let name = line.trim();
    if name.is_empty() {
        bail!("no file name given");
    }
    Ok(PathBuf::from(name))
}

/// Environment settings with command-line flags layered on top.
pub fn codec_config(legacy: bool, lenient: bool) -> anyhow::Result<CodecConfig> {
    let mut config = CodecConfig::from_env()?;
    if legacy {
        config = config.with_alphabet(Alphabet::Legacy);
    }
    if lenient {
        config = config.with_strict_trailer(false);
    }
    Ok(config)
}

pub fn open_input(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("can't open file {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Runs `write` against a temporary file next to `output` and moves it into
/// place only if `write` succeeds, so a failed run never leaves a truncated
/// destination behind.
pub fn write_atomically<F>(output: &Path, write: F) -> anyhow::Result<u64>
where
    F: FnOnce(&mut File) -> huffpuff::Result<u64>,
{
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("can't create a temporary file in {}", dir.display()))?;

    let written = write(temp.as_file_mut())?;
    temp.persist(output)
        .with_context(|| format!("can't write file {}", output.display()))?;
    Ok(written)
}
