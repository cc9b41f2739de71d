// validation.rs - Input validation utilities

use std::collections::HashSet;

use crate::cli::args::Args;

pub struct ValidationResult {
    pub ignore_set: HashSet<String>,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    if args.chunk_size == 0 {
        return Err("--chunk-size must be at least 1".to_string());
    }

    let ignore_set: HashSet<String> = args.ignore_seqs.iter().cloned().collect();
    if !ignore_set.is_empty() {
        println!(
            "📋 Excluding {} sequence(s) from the focal set",
            ignore_set.len()
        );
    }

    Ok(ValidationResult { ignore_set })
}
