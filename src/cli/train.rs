//! Training job: split, fit a balanced logistic regression, report metrics

use std::time::Instant;

use anyhow::{Context, Result};
use console::style;

use crate::pipeline::{load_dataset, train_and_evaluate, TrainConfig};
use crate::report::TrainingReport;
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_info, print_step_header, print_step_time, print_success, print_warning,
    FOLDER, SAVE, TARGET,
};

pub fn run_train(config: &TrainConfig) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"), "Balanced classifier training");
    print_config(&[
        (FOLDER, "Input", config.input.display().to_string()),
        (TARGET, "Target", config.target.clone()),
        (SAVE, "Report", config.output_report.display().to_string()),
    ]);

    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading CSV...");
    let df = load_dataset(&config.input, config.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");
    println!("      Rows: {}", df.height());
    println!("      Columns: {}", df.width());
    print_step_time(step_start.elapsed());

    print_step_header(2, "Split, Encode and Train");
    let step_start = Instant::now();
    let spinner = create_spinner("Fitting logistic regression...");
    let run = train_and_evaluate(&df, config)
        .with_context(|| format!("Training failed on {}", config.input.display()))?;
    if run.fit.converged {
        finish_with_success(&spinner, "Model fitted");
    } else {
        finish_with_warning(&spinner, "Model fitted without converging");
        print_warning(&format!(
            "Stopped after {} iterations (gradient norm {:.2e})",
            run.fit.iterations, run.fit.gradient_norm
        ));
    }
    print_info(&format!(
        "{} train / {} test rows, {} feature(s)",
        run.train_rows, run.test_rows, run.feature_count
    ));
    print_step_time(step_start.elapsed());

    print_step_header(3, "Report");
    let report = TrainingReport {
        data_file: config.input.display().to_string(),
        rows: run.rows,
        columns: run.columns,
        test_ratio: config.test_ratio,
        model: run.model.clone(),
        target: config.target.clone(),
        train: run.train_metrics,
        test: run.test_metrics,
    };
    report.write(&config.output_report)?;
    print_success(&format!("Report saved to {}", config.output_report.display()));

    println!();
    for line in report.render().lines() {
        println!("    {}", style(line).dim());
    }

    print_completion("Training complete!");
    Ok(())
}
