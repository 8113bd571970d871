use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use verity::domain::Label;
use verity::model::{LogisticRegression, LogisticRegressionConfig, TfidfVectorizer, VectorizerConfig};
use verity::port::NewsClassifier;
use verity::predictor::NewsPredictor;
use verity::text::clean_text;

const ARTICLE: &str = "WASHINGTON (Reuters) - The senate committee reviewed the 2024 budget \
on Tuesday, officials said. <p>Read more at https://example.com/story</p> [Editing by staff] \
Lawmakers are expected to vote on the measure next week after a lengthy debate!";

fn corpus() -> (Vec<String>, Vec<Label>) {
    let topics = ["weather", "sports", "markets", "housing", "travel", "energy", "health", "trade"];
    let mut texts = Vec::new();
    let mut labels = Vec::new();
    for topic in topics {
        texts.push(format!("free money about {topic}, click now to win a secret prize"));
        labels.push(Label::Fake);
        texts.push(format!("the senate reviewed the {topic} budget, officials said"));
        labels.push(Label::Real);
    }
    (texts, labels)
}

fn benchmark_cleaning(c: &mut Criterion) {
    let mut group = c.benchmark_group("cleaning");
    group.throughput(Throughput::Bytes(ARTICLE.len() as u64));

    group.bench_function("clean_article", |b| {
        b.iter(|| clean_text(std::hint::black_box(ARTICLE)));
    });

    group.finish();
}

fn benchmark_prediction(c: &mut Criterion) {
    let (texts, labels) = corpus();
    let (vectorizer, matrix) =
        TfidfVectorizer::fit_transform(&texts, VectorizerConfig::default()).expect("fit vectorizer");
    let model = LogisticRegression::fit(&matrix, &labels, &LogisticRegressionConfig::default())
        .expect("fit model");

    c.bench_function("transform_document", |b| {
        b.iter(|| vectorizer.transform_document(std::hint::black_box(ARTICLE)));
    });

    let predictor = NewsPredictor::new(vectorizer, model);
    c.bench_function("classify_article", |b| {
        b.iter(|| predictor.classify(std::hint::black_box(ARTICLE)).ok());
    });
}

criterion_group!(benches, benchmark_cleaning, benchmark_prediction);
criterion_main!(benches);
