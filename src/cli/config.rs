// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub alignment: Option<String>,
    pub reference: Option<String>,
    pub focal_alignment: Option<String>,
    pub output: Option<String>,

    // Encoding settings
    pub ignore_seqs: Option<Vec<String>>,
    pub chunk_size: Option<usize>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self {
            alignment: None,
            reference: None,
            focal_alignment: None,
            output: None,
            ignore_seqs: None,
            chunk_size: None,
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# focaldist.toml - Configuration file for focaldist
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Path to the context alignment FASTA
alignment = "/path/to/alignment.fasta"

# Path to the reference FASTA (exactly one sequence)
reference = "/path/to/reference.fasta"

# Path to the focal alignment FASTA
focal_alignment = "/path/to/focal.fasta"

# Output TSV file (strain, closest strain, distance)
output = "proximities.tsv"

# =============================================================================
# ENCODING SETTINGS
# =============================================================================

# Sequence identifiers to exclude from the focal set
# ignore_seqs = ["Wuhan/Hu-1/2019"]

# Number of context sequences processed per chunk
chunk_size = 10000
"#
        .to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
