#![warn(rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod handler;
pub mod healthcheck;
pub mod model;
pub mod port;
pub mod predictor;
pub mod test_support;
pub mod text;
pub mod training;

pub use healthcheck::{healthcheck, healthcheck_with_port};
