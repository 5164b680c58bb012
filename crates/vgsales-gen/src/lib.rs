pub mod build;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod materialize;
pub mod results;
pub mod store;
pub mod synth;
pub mod verify;
