// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.alignment.is_none() {
            self.alignment = config.alignment;
        }
        if self.reference.is_none() {
            self.reference = config.reference;
        }
        if self.focal_alignment.is_none() {
            self.focal_alignment = config.focal_alignment;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Encoding settings (only override defaults, not explicit CLI values)
        if self.ignore_seqs.is_empty() {
            if let Some(ignore_seqs) = config.ignore_seqs {
                self.ignore_seqs = ignore_seqs;
            }
        }
        if self.chunk_size == 10000 {
            if let Some(chunk_size) = config.chunk_size {
                self.chunk_size = chunk_size;
            }
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
