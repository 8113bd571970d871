//! Offline training run: datasets in, fitted vectorizer and model out.

pub mod config;
pub mod pipeline;

pub use config::TrainConfig;
pub use pipeline::{TrainingError, TrainingReport, run_training};
