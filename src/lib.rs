// lib.rs - focaldist library root

//! # focaldist - Ultra-fast SNP distance calculator for genetic proximity to a focal sequence set
//!
//! This library finds, for every sequence in a large "context" alignment, the
//! genetically closest sequence in a smaller "focal" set. Each sequence is
//! encoded as a sparse row of SNPs against a shared reference, and all
//! pairwise distances come out of a handful of sparse matrix products instead
//! of a base-by-base comparison.
//!
//! ## Features
//!
//! - **Sparse encoding**: only positions differing from the reference are stored
//! - **Masked-position aware**: N runs and gaps never inflate distances
//! - **Chunked streaming**: bounded memory on arbitrarily large context alignments
//! - **Closed-form distances**: all-pairs distances via sparse matrix products
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use focaldist::prelude::*;
//!
//! // Encode the focal set against a shared reference
//! let reference = read_reference("reference.fasta", GapPolicy::AsUnknown)?;
//! let focal_reader = AlignmentReader::open("focal.fasta")?;
//! let focal = SnpEncoder::new()
//!     .encode(focal_reader, ReferenceSource::Supplied(&reference), None)?
//!     .ok_or("focal alignment is empty")?;
//!
//! // Encode one chunk of the context set and rank it against the focal set
//! let mut context_reader = AlignmentReader::open("alignment.fasta")?;
//! if let Some(context) = SnpEncoder::new().encode(
//!     &mut context_reader,
//!     ReferenceSource::Supplied(&reference),
//!     Some(10_000),
//! )? {
//!     for result in closest_matches(&context, &focal)? {
//!         println!("{} -> {} ({})", result.name, result.closest, result.distance);
//!     }
//! }
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{calculate_distance_matrix, closest_matches, ClosestMatch};
    pub use crate::core::{normalize, normalize_sequence, Base, GapPolicy};
    pub use crate::core::{ReferenceSource, SequenceRecord, SnpEncoder, SnpMatrix};
    pub use crate::data::{read_reference, AlignmentReader};
    pub use crate::output::PriorityWriter;
}

// Re-export main types at the root level for convenience
pub use crate::cli::{Args, ValidationResult};
pub use crate::core::{calculate_distance_matrix, closest_matches, ClosestMatch};
pub use crate::core::{Base, GapPolicy, ReferenceSource, SequenceRecord, SnpEncoder, SnpMatrix};
pub use crate::data::{read_reference, AlignmentReader};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "focaldist v{} - SNP distance to focal set calculator",
        VERSION
    )
}
