use anyhow::{Context, Result};
use clap::Parser;
use verity::app::tracing::{LogFormat, init_tracing};
use verity::training::{TrainConfig, run_training};

fn main() -> Result<()> {
    let config = TrainConfig::parse();
    init_tracing(LogFormat::Pretty);

    let report = run_training(&config).context("training failed")?;

    println!("Validation Accuracy: {:.2}%", report.accuracy * 100.0);
    println!(
        "Trained on {} rows, evaluated on {} rows, {} features",
        report.train_rows, report.test_rows, report.vocab_size
    );
    println!("Vectorizer saved to {}", config.vectorizer_out.display());
    println!("Model saved to {}", config.model_out.display());
    Ok(())
}
