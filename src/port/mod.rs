use thiserror::Error;

use crate::domain::Verdict;
use crate::model::LogisticRegressionError;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Model artifacts are not loaded: {0}")]
    NotLoaded(String),

    #[error("Scoring failed: {0}")]
    Scoring(#[from] LogisticRegressionError),
}

/// Port for turning raw article text into a fake/real verdict.
///
/// Implementations hold only immutable state, so a single instance is shared
/// across all requests.
pub trait NewsClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Verdict, ClassifyError>;
}
