//! Testing infrastructure for keepsake integration tests.
//!
//! - `TestWorld`: an isolated data directory plus a way to run the CLI in it
//! - `assertions`: checks against the JSON envelope the CLI prints

pub mod assertions;
pub mod world;

pub use world::{CliResult, TestWorld};
