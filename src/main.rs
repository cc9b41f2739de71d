// main.rs - CLI entry point

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use focaldist::cli::Config;
use focaldist::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    // Validate required parameters
    let alignment = args.alignment.as_ref().ok_or("--alignment is required")?;
    let reference_path = args.reference.as_ref().ok_or("--reference is required")?;
    let focal_alignment = args
        .focal_alignment
        .as_ref()
        .ok_or("--focal-alignment is required")?;
    let output = args.output.as_ref().ok_or("--output is required")?;

    println!("🚀 focaldist v{}", env!("CARGO_PKG_VERSION"));
    println!("⚡ Strategy: Sparse SNP encoding → Closed-form distance products → Streaming output");

    let validation_result = validate_args(&args)?;

    let total_start = Instant::now();

    // Load the shared reference
    println!("🧬 Loading reference from: {}", reference_path);
    let reference = read_reference(reference_path, GapPolicy::AsUnknown)?;
    println!("📏 Alignment length: {} bp", reference.len());

    // Encode the focal set; exclusions apply here and nowhere else
    println!("🧬 Encoding focal alignment: {}", focal_alignment);
    let focal_reader = AlignmentReader::open(focal_alignment)?;
    let focal = SnpEncoder::new()
        .with_ignored_ids(validation_result.ignore_set)
        .encode(focal_reader, ReferenceSource::Supplied(&reference), None)?
        .ok_or_else(|| {
            format!(
                "Focal set is empty. Please check the focal alignment '{}' and your --ignore-seqs settings",
                focal_alignment
            )
        })?;
    println!(
        "✅ Focal set: {} sequences, {} SNPs",
        focal.len(),
        focal.snps.nnz()
    );

    // Stream the context set in chunks, writing results as they come
    let mut writer = PriorityWriter::create(output)?;
    let mut context_reader = AlignmentReader::open(alignment)?;
    let context_encoder = SnpEncoder::new();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} [{elapsed_precise}] {msg}").unwrap(),
    );

    println!(
        "🔄 Computing closest focal sequences (chunks of {})...",
        args.chunk_size
    );
    let mut chunk_count = 0usize;
    while let Some(context) = context_encoder.encode(
        &mut context_reader,
        ReferenceSource::Supplied(&reference),
        Some(args.chunk_size),
    )? {
        chunk_count += 1;
        for result in closest_matches(&context, &focal)? {
            writer.write_match(&result.name, &result.closest, result.distance)?;
        }
        spinner.set_message(format!(
            "Processed {} chunk(s), {} sequences",
            chunk_count,
            writer.rows_written()
        ));
        spinner.tick();
    }
    spinner.finish_and_clear();

    let sequences_ranked = writer.rows_written();
    writer.finish()?;

    // Print summary
    let total_elapsed = total_start.elapsed();
    println!("\n🎉 === FOCALDIST COMPLETED SUCCESSFULLY ===");
    println!(
        "⏱️  Total execution time: {:.2}s",
        total_elapsed.as_secs_f64()
    );
    println!(
        "📊 {} context sequences ranked against {} focal sequences in {} chunk(s)",
        sequences_ranked,
        focal.len(),
        chunk_count
    );
    println!("📁 Output written to: {}", output);

    Ok(())
}
