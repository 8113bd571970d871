//! Labeled news datasets: tolerant file loading and train/test splitting.

pub mod loader;
pub mod split;

pub use loader::{LoadError, Table, load_table};
pub use split::{Split, train_test_split};
