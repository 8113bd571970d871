use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::info;

use crate::dataset::{load_table, train_test_split};
use crate::domain::{Label, LabeledExample};
use crate::model::{
    ArtifactError, LogisticRegression, LogisticRegressionError, TfidfVectorizer, VectorizerError,
    save_artifact,
};
use crate::text::clean_text;
use crate::training::TrainConfig;

const SAMPLE_ROWS: usize = 5;
const SAMPLE_CHARS: usize = 80;

#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("Invalid training configuration: {0}")]
    InvalidConfig(String),

    #[error("Dataset {path} is empty or could not be loaded")]
    EmptyDataset { path: PathBuf },

    #[error("No examples left after cleaning")]
    EmptyAfterCleaning,

    #[error("The {0} split produced an empty feature matrix")]
    EmptyMatrix(&'static str),

    #[error("Vectorizer error: {0}")]
    Vectorizer(#[from] VectorizerError),

    #[error("Model error: {0}")]
    Model(#[from] LogisticRegressionError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

/// Summary of a completed training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    /// Labeled examples remaining after cleaning
    pub examples: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub vocab_size: usize,
    pub iterations: usize,
    pub converged: bool,
    /// Held-out accuracy in `[0, 1]`
    pub accuracy: f64,
}

/// Run the full training sequence and write both artifacts.
///
/// The vectorizer file is written before the model file. Existing files are
/// overwritten.
pub fn run_training(config: &TrainConfig) -> Result<TrainingReport, TrainingError> {
    config.validate()?;

    let mut examples = load_labeled(config)?;
    match config.shuffle_seed {
        Some(seed) => examples.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => examples.shuffle(&mut rand::rng()),
    }

    for example in &mut examples {
        example.text = clean_text(&example.text);
    }
    examples.retain(|example| !example.text.is_empty());
    if examples.is_empty() {
        return Err(TrainingError::EmptyAfterCleaning);
    }
    log_sample(&examples);

    let split = train_test_split(examples.len(), config.test_size, config.split_seed);
    let (train_texts, train_labels) = columns(&examples, &split.train);
    let (test_texts, test_labels) = columns(&examples, &split.test);
    if train_texts.is_empty() {
        return Err(TrainingError::EmptyMatrix("train"));
    }

    let (vectorizer, x_train) =
        TfidfVectorizer::fit_transform(&train_texts, config.vectorizer_config())?;
    let x_test = vectorizer.transform(&test_texts);
    if x_test.rows() == 0 {
        return Err(TrainingError::EmptyMatrix("test"));
    }
    info!(
        train_rows = x_train.rows(),
        test_rows = x_test.rows(),
        vocab_size = vectorizer.vocab_len(),
        "Vectorized datasets"
    );

    let model = LogisticRegression::fit(&x_train, &train_labels, &config.model_config())?;
    let accuracy = model.score(&x_test, &test_labels)?;
    info!(
        iterations = model.n_iter(),
        converged = model.converged(),
        accuracy,
        "Model trained"
    );

    let paths = config.artifact_paths();
    save_artifact(&paths.vectorizer, &vectorizer)?;
    info!("Saved vectorizer to {}", paths.vectorizer.display());
    save_artifact(&paths.model, &model)?;
    info!("Saved model to {}", paths.model.display());

    Ok(TrainingReport {
        examples: examples.len(),
        train_rows: x_train.rows(),
        test_rows: x_test.rows(),
        vocab_size: vectorizer.vocab_len(),
        iterations: model.n_iter(),
        converged: model.converged(),
        accuracy,
    })
}

/// Load both datasets and label them, fake rows first.
fn load_labeled(config: &TrainConfig) -> Result<Vec<LabeledExample>, TrainingError> {
    let mut examples = Vec::new();
    for (path, label) in [
        (&config.fake_path, Label::Fake),
        (&config.real_path, Label::Real),
    ] {
        let table = load_table(path);
        if table.is_empty() {
            return Err(TrainingError::EmptyDataset { path: path.clone() });
        }
        info!("Loaded {} {} rows from {}", table.len(), label, path.display());
        examples.extend(
            table
                .text_values()
                .into_iter()
                .map(|text| LabeledExample::new(text, label)),
        );
    }
    Ok(examples)
}

fn columns<'a>(examples: &'a [LabeledExample], indices: &[usize]) -> (Vec<&'a str>, Vec<Label>) {
    indices
        .iter()
        .map(|&i| (examples[i].text.as_str(), examples[i].label))
        .unzip()
}

fn log_sample(examples: &[LabeledExample]) {
    info!("Sample data after cleaning ({} rows):", examples.len());
    for example in examples.iter().take(SAMPLE_ROWS) {
        let preview: String = example.text.chars().take(SAMPLE_CHARS).collect();
        info!(label = %example.label, "{preview}");
    }
}
