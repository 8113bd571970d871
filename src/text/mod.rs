//! Text normalisation applied to news bodies before vectorizing.

mod clean;
mod repetition;

pub use clean::{TextCleaner, clean_text};
pub use repetition::repetition_ratio;
