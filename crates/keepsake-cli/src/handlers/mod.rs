pub mod clear;
pub mod config;
pub mod guidance;
pub mod inspect;
pub mod simulate;
pub mod stats;
