pub mod analytics;

pub use analytics::{present_event, present_inspect, present_stats};
