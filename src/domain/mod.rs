mod label;

pub use label::{Label, LabeledExample, Verdict};
