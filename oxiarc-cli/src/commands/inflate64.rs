//! Inflate64 command implementation.

use log::info;
use oxiarc_archive::zip::{MethodRegistry, ReaderOptions, ZipEntryReader};
use oxiarc_core::CompressionMethod;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

pub fn cmd_inflate64(
    input: &Path,
    output: Option<&Path>,
    chunk_size: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let compressed_size = std::fs::metadata(input)?.len();
    let source = BufReader::new(File::open(input)?);

    let mut options = ReaderOptions::new();
    if let Some(size) = chunk_size {
        options = options.with_chunk_size(size);
    }

    let registry = MethodRegistry::new();
    let mut reader = ZipEntryReader::open(
        &registry,
        CompressionMethod::Deflate64.id(),
        source,
        compressed_size,
        options,
    )?;
    info!(
        "decoding {} ({} bytes) in chunks of {} bytes",
        input.display(),
        compressed_size,
        reader.chunk_size()
    );

    let written = match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            let written = io::copy(&mut reader, &mut writer)?;
            writer.flush()?;
            written
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            let written = io::copy(&mut reader, &mut writer)?;
            writer.flush()?;
            written
        }
    };

    info!("{} -> {} bytes", compressed_size, written);
    Ok(())
}
