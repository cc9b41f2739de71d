// mod.rs - Core logic module

pub mod alphabet;
pub mod distance;
pub mod encoder;

// Re-export main types for convenience
pub use alphabet::{normalize, normalize_sequence, Base, GapPolicy};
pub use distance::{calculate_distance_matrix, closest_matches, ClosestMatch};
pub use encoder::{ReferenceSource, SequenceRecord, SnpEncoder, SnpMatrix};
