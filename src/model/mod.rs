pub mod artifact;
pub mod logistic;
pub mod vectorizer;

pub use artifact::{ArtifactError, load_artifact, save_artifact};
pub use logistic::{LogisticRegression, LogisticRegressionConfig, LogisticRegressionError};
pub use vectorizer::{TfidfVectorizer, VectorizerConfig, VectorizerError};
