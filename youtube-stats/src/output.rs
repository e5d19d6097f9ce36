//! Writing the collected records to disk.

use crate::record::VideoRecord;
use eyre::Context;
use jiff::Timestamp;
use std::io::Write;
use std::path::{Path, PathBuf};

/// `<prefix>_YYYYMMDD_HHMMSS.json`, with the time in UTC.
pub fn output_file_name(prefix: &str, at: Timestamp) -> String {
    format!("{prefix}_{}.json", at.strftime("%Y%m%d_%H%M%S"))
}

/// Writes `records` as a pretty-printed JSON array to a timestamped file in `dir`.
///
/// Non-ASCII text is written as-is. Returns the path of the new file.
pub fn write_records(
    dir: &Path,
    prefix: &str,
    at: Timestamp,
    records: &[VideoRecord],
) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output directory {}", dir.display()))?;
    let path = dir.join(output_file_name(prefix, at));

    let file = std::fs::File::create(&path)
        .with_context(|| format!("create output file {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records).context("serialize records")?;
    writer
        .flush()
        .with_context(|| format!("write output file {}", path.display()))?;

    tracing::debug!(path = %path.display(), records = records.len(), "wrote records");
    Ok(path)
}
