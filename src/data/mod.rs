// mod.rs - Data access module

pub mod fasta;

// Re-export main types for convenience
pub use fasta::{read_reference, AlignmentReader};
