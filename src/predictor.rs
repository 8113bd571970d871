use std::sync::Arc;

use tracing::{error, info};

use crate::domain::Verdict;
use crate::model::artifact::ArtifactPaths;
use crate::model::{ArtifactError, LogisticRegression, TfidfVectorizer, load_artifact};
use crate::port::{ClassifyError, NewsClassifier};

/// Loaded vectorizer/model pair. Both handles are read-only after construction.
#[derive(Debug, Clone)]
pub struct NewsPredictor {
    vectorizer: Arc<TfidfVectorizer>,
    model: Arc<LogisticRegression>,
}

impl NewsPredictor {
    #[must_use]
    pub fn new(vectorizer: TfidfVectorizer, model: LogisticRegression) -> Self {
        Self {
            vectorizer: Arc::new(vectorizer),
            model: Arc::new(model),
        }
    }

    /// Read both artifacts from disk. No compatibility check is made between them.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let model: LogisticRegression = load_artifact(&paths.model)?;
        let vectorizer: TfidfVectorizer = load_artifact(&paths.vectorizer)?;
        Ok(Self::new(vectorizer, model))
    }

    #[must_use]
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    #[must_use]
    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }
}

impl NewsClassifier for NewsPredictor {
    fn classify(&self, text: &str) -> Result<Verdict, ClassifyError> {
        let features = self.vectorizer.transform_document(text);
        let label = self.model.predict(features.view())?;
        let real_probability = self.model.predict_proba(features.view())?;
        Ok(Verdict {
            label,
            real_probability,
        })
    }
}

/// Stand-in used when the artifacts could not be loaded at startup.
///
/// Every call fails, which handlers report as a server error.
#[derive(Debug, Clone)]
pub struct UnloadedClassifier {
    reason: String,
}

impl UnloadedClassifier {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl NewsClassifier for UnloadedClassifier {
    fn classify(&self, _text: &str) -> Result<Verdict, ClassifyError> {
        Err(ClassifyError::NotLoaded(self.reason.clone()))
    }
}

/// Load the artifacts, or fall back to a classifier that always errors.
///
/// A load failure is logged and never aborts startup.
pub fn load_classifier(paths: &ArtifactPaths) -> Arc<dyn NewsClassifier> {
    match NewsPredictor::load(paths) {
        Ok(predictor) => {
            info!(
                vocab = predictor.vectorizer().vocab_len(),
                "Model and vectorizer loaded successfully"
            );
            Arc::new(predictor)
        }
        Err(e) => {
            error!("Error loading model: {e}");
            Arc::new(UnloadedClassifier::new(e.to_string()))
        }
    }
}
