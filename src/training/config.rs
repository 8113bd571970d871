use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH};
use crate::model::artifact::ArtifactPaths;
use crate::model::{LogisticRegressionConfig, VectorizerConfig};
use crate::training::TrainingError;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Train the fake/real news classifier", long_about = None)]
pub struct TrainConfig {
    /// Dataset of fake articles (label 0)
    #[arg(long, env = "FAKE_PATH", default_value = "Fake.csv")]
    pub fake_path: PathBuf,

    /// Dataset of real articles (label 1)
    #[arg(long, env = "REAL_PATH", default_value = "True.csv")]
    pub real_path: PathBuf,

    #[arg(long, env = "VECTORIZER_PATH", default_value = DEFAULT_VECTORIZER_PATH)]
    pub vectorizer_out: PathBuf,

    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model_out: PathBuf,

    /// Fraction of rows held out for validation
    #[arg(long, default_value_t = 0.25)]
    pub test_size: f64,

    #[arg(long, default_value_t = 42)]
    pub split_seed: u64,

    /// Seed for the pre-split shuffle. Unseeded when omitted.
    #[arg(long)]
    pub shuffle_seed: Option<u64>,

    #[arg(long, default_value_t = 5000)]
    pub max_features: usize,

    #[arg(long, default_value_t = 1000)]
    pub max_iter: usize,

    /// Inverse L2 regularisation strength
    #[arg(long, default_value_t = 1.0)]
    pub c: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::parse_from(["train"])
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), TrainingError> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(TrainingError::InvalidConfig(format!(
                "test size must be between 0 and 1, got {}",
                self.test_size
            )));
        }
        if self.max_features == 0 {
            return Err(TrainingError::InvalidConfig(
                "max features must be greater than 0".to_string(),
            ));
        }
        if self.max_iter == 0 {
            return Err(TrainingError::InvalidConfig(
                "max iterations must be greater than 0".to_string(),
            ));
        }
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(TrainingError::InvalidConfig(format!(
                "C must be a positive number, got {}",
                self.c
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn vectorizer_config(&self) -> VectorizerConfig {
        VectorizerConfig {
            max_features: self.max_features,
            ..VectorizerConfig::default()
        }
    }

    #[must_use]
    pub fn model_config(&self) -> LogisticRegressionConfig {
        LogisticRegressionConfig {
            c: self.c,
            max_iter: self.max_iter,
            ..LogisticRegressionConfig::default()
        }
    }

    #[must_use]
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(&self.vectorizer_out, &self.model_out)
    }
}
