// mod.rs - Output writer module

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent).map_err(|e| {
            format!(
                "Failed to create parent directory '{}': {}",
                parent.display(),
                e
            )
        })?;
    }
    Ok(())
}

/// Streaming writer for per-sequence proximity results.
///
/// Result rows arrive chunk by chunk, so the file stays open and buffered
/// until `finish` is called.
pub struct PriorityWriter {
    writer: BufWriter<File>,
    path: String,
    rows_written: usize,
}

impl PriorityWriter {
    /// Create the output file and write the header row.
    pub fn create(file_path: &str) -> Result<Self, String> {
        ensure_parent_dir(file_path)?;
        let file = File::create(file_path)
            .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "strain\tclosest strain\tdistance")
            .map_err(|e| format!("Write error: {}", e))?;

        Ok(Self {
            writer,
            path: file_path.to_string(),
            rows_written: 0,
        })
    }

    /// Append one result row.
    pub fn write_match(&mut self, strain: &str, closest: &str, distance: f64) -> Result<(), String> {
        writeln!(self.writer, "{}\t{}\t{}", strain, closest, distance)
            .map_err(|e| format!("Write error: {}", e))?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of result rows written so far (header excluded).
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and report where the results went.
    pub fn finish(mut self) -> Result<(), String> {
        self.writer
            .flush()
            .map_err(|e| format!("Flush error: {}", e))?;
        println!("✅ Proximity results written to: {}", self.path);
        Ok(())
    }
}
