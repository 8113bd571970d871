use crate::config::Settings;
use crate::model::artifact::ArtifactPaths;
use crate::port::NewsClassifier;
use crate::predictor::load_classifier;
use std::sync::Arc;

/// Shared application state holding the classifier.
pub struct AppState {
    pub classifier: Arc<dyn NewsClassifier>,
}

impl AppState {
    /// Create `AppState` from configuration settings.
    ///
    /// Loads the vectorizer and model once. A load failure leaves an unloaded
    /// classifier in place so the server still starts.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let paths = ArtifactPaths::new(&settings.vectorizer_path, &settings.model_path);
        Self {
            classifier: load_classifier(&paths),
        }
    }
}
