//! # Presentation layer
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] --> stdout
//! ```
//!
//! * `view_models/`: serializable data contracts. JSON output is exactly these
//!   structs wrapped in [`CommandResultViewModel`]; plain output is their
//!   `Display` impl.
//! * `presenters/`: pure conversions from domain types (reports, stored logs)
//!   into view models. Sorting, totals and event summaries happen here.
//! * `renderers/`: styling and the JSON/plain switch.

pub mod presenters;
pub mod renderers;
pub mod view_models;

pub use renderers::{ConsoleRenderer, Renderer};
pub use view_models::{CommandResultViewModel, Guidance, StatusBadge, StatusLevel};
