use serde::{Deserialize, Serialize};

/// Binary news class. The discriminants are the training targets.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Fake = 0,
    Real = 1,
}

impl Label {
    #[must_use]
    pub fn as_target(self) -> f64 {
        match self {
            Self::Fake => 0.0,
            Self::Real => 1.0,
        }
    }

    #[must_use]
    pub fn is_fake(self) -> bool {
        matches!(self, Self::Fake)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fake => "Fake",
            Self::Real => "Real",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabeledExample {
    pub text: String,
    pub label: Label,
}

impl LabeledExample {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Outcome of classifying one piece of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Verdict {
    pub label: Label,
    /// Probability of the `Real` class
    pub real_probability: f64,
}
