//! Encoding job: discover the input CSV, encode it and export the matrix

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;

use crate::pipeline::{
    discover_input_csv, encode_dataset, estimated_memory_mb, load_dataset, render_csv,
    EncodeConfig,
};
use crate::report::{render_binary_mappings, EncodingSummary};
use crate::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success, FOLDER, SAVE,
};

/// Run the encoding job.
///
/// Nothing is written until every column has been encoded, so a failing run
/// leaves no partial output behind.
pub fn run_encode(config: &EncodeConfig) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"), "Feature encoding");
    print_config(&[
        (FOLDER, "Data", config.data_dir.display().to_string()),
        (SAVE, "Output", config.output_csv.display().to_string()),
        (SAVE, "Mapping", config.output_mappings.display().to_string()),
    ]);

    // Step 1: locate and load
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let input = discover_input_csv(&config.data_dir)?;
    print_info(&format!("Using {}", input.display()));

    let spinner = create_spinner("Reading CSV...");
    let df = load_dataset(&input, config.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    let original_shape = (df.height(), df.width());
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", original_shape.0);
    println!("      Columns: {}", original_shape.1);
    println!("      Estimated memory: {:.2} MB", estimated_memory_mb(&df));
    print_step_time(step_start.elapsed());

    // Step 2: encode
    print_step_header(2, "Scale and Encode");
    let step_start = Instant::now();
    let spinner = create_spinner("Encoding columns...");
    let encoded = encode_dataset(&df, &config.separator)
        .with_context(|| format!("Failed to encode {}", input.display()))?;
    finish_with_success(&spinner, "Encoding complete");

    let elided = encoded.encoder.categorical().elided_columns();
    if !elided.is_empty() {
        print_count("single-valued categorical column(s) dropped", elided.len());
    }
    print_step_time(step_start.elapsed());

    // Step 3: export
    print_step_header(3, "Export");
    let step_start = Instant::now();
    let mut frame = encoded.matrix.frame.clone();
    let csv = render_csv(&mut frame)?;
    let mappings = if encoded.mappings.is_empty() {
        None
    } else {
        Some(render_binary_mappings(&encoded.mappings)?)
    };

    write_outputs(
        &csv,
        &config.output_csv,
        mappings.as_deref(),
        &config.output_mappings,
    )?;
    print_success(&format!("Feature matrix saved to {}", config.output_csv.display()));

    if mappings.is_some() {
        print_success(&format!(
            "Binary mapping saved to {}",
            config.output_mappings.display()
        ));
    } else {
        print_info("No binary categorical columns; mapping file not written");
    }
    print_step_time(step_start.elapsed());

    let summary = EncodingSummary::from_dataset(original_shape, &encoded);
    summary.display();

    println!(
        "    Original shape: ({}, {})",
        original_shape.0, original_shape.1
    );
    println!(
        "    Processed shape: ({}, {})",
        encoded.matrix.height(),
        encoded.matrix.width()
    );

    print_completion("Encoding complete!");
    Ok(())
}

/// Write the rendered outputs, or none of them.
///
/// The mapping document goes first; if the matrix write then fails, the
/// mapping file is removed again before the error is returned.
fn write_outputs(
    csv: &[u8],
    csv_path: &Path,
    mappings: Option<&str>,
    mappings_path: &Path,
) -> Result<()> {
    if let Some(json) = mappings {
        std::fs::write(mappings_path, json).with_context(|| {
            format!(
                "Failed to write binary mappings to {}",
                mappings_path.display()
            )
        })?;
    }

    if let Err(err) = std::fs::write(csv_path, csv) {
        if mappings.is_some() {
            if let Err(cleanup) = std::fs::remove_file(mappings_path) {
                log::warn!(
                    "Could not remove {} after a failed export: {}",
                    mappings_path.display(),
                    cleanup
                );
            }
        }
        return Err(err).with_context(|| {
            format!("Failed to write CSV file: {}", csv_path.display())
        });
    }

    Ok(())
}
