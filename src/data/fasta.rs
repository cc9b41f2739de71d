// fasta.rs - FASTA readers for alignments and references

use std::fs::File;
use std::io::BufReader;

use bio::io::fasta;

use crate::core::alphabet::{normalize_sequence, Base, GapPolicy};
use crate::core::SequenceRecord;

/// Streaming reader over an aligned FASTA file.
///
/// Implements `Iterator`, so the encoder can consume it chunk by chunk while
/// the file handle stays open between chunks.
pub struct AlignmentReader {
    path: String,
    records: fasta::Records<BufReader<File>>,
}

impl AlignmentReader {
    /// Open an alignment file for streaming.
    pub fn open(path: &str) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open alignment file '{}': {}", path, e))?;
        let reader = fasta::Reader::from_bufread(BufReader::new(file));
        Ok(Self {
            path: path.to_string(),
            records: reader.records(),
        })
    }
}

impl Iterator for AlignmentReader {
    type Item = Result<SequenceRecord, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|r| SequenceRecord::new(r.id(), r.seq()))
                .map_err(|e| format!("Invalid FASTA record in '{}': {}", self.path, e)),
        )
    }
}

/// Read the single reference sequence from a FASTA file, normalized and ready
/// for the encoder.
pub fn read_reference(path: &str, policy: GapPolicy) -> Result<Vec<Base>, String> {
    let mut reader = AlignmentReader::open(path)?;

    let record = match reader.next() {
        Some(record) => record?,
        None => return Err(format!("Reference file '{}' contains no sequences", path)),
    };
    if reader.next().is_some() {
        return Err(format!(
            "Reference file '{}' must contain exactly one sequence",
            path
        ));
    }

    Ok(normalize_sequence(&record.symbols, policy))
}
