// encoder.rs - Streaming SNP encoder

use std::collections::HashSet;

use sprs::{CsMat, TriMat};

use crate::core::alphabet::{normalize_sequence, Base, GapPolicy};

/// Initial capacity of the SNP coordinate buffers.
const SNP_BUFFER_CAPACITY: usize = 1_000_000;

/// One aligned sequence as read from an input file.
#[derive(Debug, Clone)]
pub struct SequenceRecord {
    pub id: String,
    pub symbols: Vec<u8>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, symbols: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            symbols: symbols.into(),
        }
    }
}

/// Where the encoder gets its reference sequence from.
#[derive(Debug, Clone, Copy)]
pub enum ReferenceSource<'a> {
    /// Compare every record against this sequence.
    Supplied(&'a [Base]),
    /// Use the first accepted record as the reference. That record still
    /// becomes row 0 of the matrix, with zero SNPs against itself.
    FirstRecord,
}

/// Sparse SNP representation of one sequence set.
///
/// Cell (i, j) holds the base code of sequence i at position j when that base
/// differs from the reference and is readable. Unknown bases never enter the
/// matrix; their positions are tracked per row in `masked` instead.
#[derive(Debug, Clone)]
pub struct SnpMatrix {
    pub snps: CsMat<u8>,
    pub names: Vec<String>,
    pub consensus: Vec<Base>,
    pub masked: Vec<Vec<usize>>,
}

impl SnpMatrix {
    /// Number of sequences (rows).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Alignment length shared by every row.
    pub fn alignment_length(&self) -> usize {
        self.consensus.len()
    }
}

/// Streaming encoder turning aligned sequences into a `SnpMatrix`.
///
/// The encoder consumes its record iterator one record at a time and can stop
/// at a caller-supplied cap, leaving the iterator positioned at the next
/// unread record. Feeding the same iterator back in therefore yields the
/// input in bounded chunks.
pub struct SnpEncoder {
    gap_policy: GapPolicy,
    ignore: HashSet<String>,
}

impl SnpEncoder {
    pub fn new() -> Self {
        Self {
            gap_policy: GapPolicy::AsUnknown,
            ignore: HashSet::new(),
        }
    }

    /// Override the default gap handling (`GapPolicy::AsUnknown`).
    pub fn with_gap_policy(mut self, policy: GapPolicy) -> Self {
        self.gap_policy = policy;
        self
    }

    /// Skip records whose identifier appears in `ids`. Skipped records are
    /// neither encoded nor counted against a record cap.
    pub fn with_ignored_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Encode up to `limit` records from `records` against `reference`.
    ///
    /// Returns `Ok(None)` when zero records were accepted, which is how the
    /// end of a chunked input stream shows up. Fails if any record's length
    /// differs from the reference length.
    pub fn encode<I>(
        &self,
        records: I,
        reference: ReferenceSource<'_>,
        limit: Option<usize>,
    ) -> Result<Option<SnpMatrix>, String>
    where
        I: Iterator<Item = Result<SequenceRecord, String>>,
    {
        let mut consensus: Option<Vec<Base>> = match reference {
            ReferenceSource::Supplied(sequence) => Some(sequence.to_vec()),
            ReferenceSource::FirstRecord => None,
        };

        let mut names: Vec<String> = Vec::new();
        let mut masked: Vec<Vec<usize>> = Vec::new();
        let mut snp_rows: Vec<usize> = Vec::with_capacity(SNP_BUFFER_CAPACITY);
        let mut snp_cols: Vec<usize> = Vec::with_capacity(SNP_BUFFER_CAPACITY);
        let mut snp_vals: Vec<u8> = Vec::with_capacity(SNP_BUFFER_CAPACITY);

        for record in records {
            let record = record?;
            if self.ignore.contains(&record.id) {
                continue;
            }

            let sequence = normalize_sequence(&record.symbols, self.gap_policy);
            let consensus = consensus.get_or_insert_with(|| sequence.clone());
            if sequence.len() != consensus.len() {
                return Err(format!(
                    "Sequence '{}' has length {} but the reference has length {}",
                    record.id,
                    sequence.len(),
                    consensus.len()
                ));
            }

            let row = names.len();
            let mut row_masked = Vec::new();
            for (col, (&base, &reference_base)) in
                sequence.iter().zip(consensus.iter()).enumerate()
            {
                if base.is_unknown() {
                    row_masked.push(col);
                } else if base != reference_base {
                    snp_rows.push(row);
                    snp_cols.push(col);
                    snp_vals.push(base.code());
                }
            }

            names.push(record.id);
            masked.push(row_masked);

            if let Some(limit) = limit {
                if names.len() >= limit {
                    break;
                }
            }
        }

        let consensus = match consensus {
            Some(consensus) if !names.is_empty() => consensus,
            _ => return Ok(None),
        };

        let snps: CsMat<u8> =
            TriMat::from_triplets((names.len(), consensus.len()), snp_rows, snp_cols, snp_vals)
                .to_csr();

        Ok(Some(SnpMatrix {
            snps,
            names,
            consensus,
            masked,
        }))
    }
}

impl Default for SnpEncoder {
    fn default() -> Self {
        Self::new()
    }
}
