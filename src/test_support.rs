//! Shared test support utilities
//!
//! Provides `StubClassifier`, a `NewsClassifier` with a scripted outcome, for
//! handler tests that should not depend on trained artifacts.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::{Label, Verdict};
use crate::port::{ClassifyError, NewsClassifier};

pub struct StubClassifier {
    label: Label,
    should_fail: AtomicBool,
    seen: Mutex<Vec<String>>,
}

impl StubClassifier {
    pub fn returning(label: Label) -> Self {
        Self {
            label,
            should_fail: AtomicBool::new(false),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Texts passed to `classify`, in call order.
    pub fn seen_texts(&self) -> Vec<String> {
        self.seen.lock().map(|guard| guard.clone()).unwrap_or_default()
    }
}

impl NewsClassifier for StubClassifier {
    fn classify(&self, text: &str) -> Result<Verdict, ClassifyError> {
        if let Ok(mut guard) = self.seen.lock() {
            guard.push(text.to_string());
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(ClassifyError::NotLoaded("stub failure".to_string()));
        }
        Ok(Verdict {
            label: self.label,
            real_probability: match self.label {
                Label::Real => 0.9,
                Label::Fake => 0.1,
            },
        })
    }
}
