//! Training data generator
//!
//! Aligns every full text of a corpus directory with its results file and
//! writes the labeled feature rows as CSV.
//!
//! Usage:
//!   cargo run --bin generate_training_data
//!   cargo run --bin generate_training_data -- --input-dir xml --output-dir training_data
//!   cargo run --bin generate_training_data -- --config config.json --summary summary.json
//!   cargo run --bin generate_training_data -- --font-report

use std::path::PathBuf;
use std::process::ExitCode;
use theorem_tagger::{AlignmentConfig, CorpusOptions, CorpusProcessor, CorpusSummary};

struct GeneratorConfig {
    input_dir: PathBuf,
    output_dir: PathBuf,
    config_file: Option<PathBuf>,
    summary_file: Option<PathBuf>,
    overwrite: bool,
    write_text: bool,
    font_report: bool,
    verbose: bool,
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut input_dir = PathBuf::from("source_extraction/results_pdf_xml");
        let mut output_dir = PathBuf::from("training_data");
        let mut config_file = None;
        let mut summary_file = None;
        let mut overwrite = false;
        let mut write_text = true;
        let mut font_report = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--input-dir" => {
                    i += 1;
                    if i < args.len() {
                        input_dir = PathBuf::from(&args[i]);
                    }
                },
                "--output-dir" => {
                    i += 1;
                    if i < args.len() {
                        output_dir = PathBuf::from(&args[i]);
                    }
                },
                "--config" => {
                    i += 1;
                    if i < args.len() {
                        config_file = Some(PathBuf::from(&args[i]));
                    }
                },
                "--summary" => {
                    i += 1;
                    if i < args.len() {
                        summary_file = Some(PathBuf::from(&args[i]));
                    }
                },
                "--overwrite" => {
                    overwrite = true;
                },
                "--no-text" => {
                    write_text = false;
                },
                "--font-report" => {
                    font_report = true;
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other => {
                    eprintln!("Ignoring unknown argument: {}", other);
                },
            }
            i += 1;
        }

        Self {
            input_dir,
            output_dir,
            config_file,
            summary_file,
            overwrite,
            write_text,
            font_report,
            verbose,
        }
    }
}

fn print_summary(summary: &CorpusSummary, verbose: bool) {
    println!("\n{}", "=".repeat(60));
    println!("TRAINING DATA GENERATION REPORT");
    println!("{}", "=".repeat(60));

    println!("\n  Documents:   {}", summary.total);
    println!("  Processed:   {}", summary.processed());
    println!("  Succeeded:   {}", summary.succeeded);
    println!("  Failed:      {}", summary.failed);
    println!("  Invalid:     {}", summary.invalid);
    println!("  Skipped:     {}", summary.skipped);
    println!("  Errors:      {}", summary.errors);

    if !summary.failed_documents.is_empty() {
        println!("\nFailed papers:");
        for name in &summary.failed_documents {
            println!("  {}", name);
        }
    }

    if verbose {
        println!("\nAll documents:");
        for doc in &summary.documents {
            let recall = doc
                .recall
                .map(|r| format!("{:.2}", r))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {:30} {:10} recall {:>5}  {}",
                doc.name,
                format!("{:?}", doc.status),
                recall,
                doc.detail.as_deref().unwrap_or("")
            );
        }
    }

    println!("\n{}", "=".repeat(60));
}

fn run(args: &GeneratorConfig) -> theorem_tagger::Result<()> {
    let config = match &args.config_file {
        Some(path) => AlignmentConfig::from_json_file(path)?,
        None => AlignmentConfig::default(),
    };
    let options = CorpusOptions::new(&args.input_dir, &args.output_dir)
        .with_overwrite(args.overwrite)
        .with_text(args.write_text);
    let processor = CorpusProcessor::new(config, options)?;

    if args.font_report {
        let inventory = processor.font_inventory()?;
        print!("{}", inventory.report());
        return Ok(());
    }

    let summary = processor.run()?;
    print_summary(&summary, args.verbose);

    if let Some(path) = &args.summary_file {
        summary.write_json(path)?;
        println!("Summary written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = GeneratorConfig::from_args();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
