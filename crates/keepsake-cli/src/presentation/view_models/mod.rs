pub mod analytics;
pub mod common;
pub mod result;
pub mod simulate;
pub mod system;

pub use analytics::{EventLine, InspectViewModel, KindCount, StatsViewModel};
pub use common::{Guidance, StatusBadge, StatusLevel};
pub use result::CommandResultViewModel;
pub use simulate::{QuizOutcome, SimulateViewModel};
pub use system::{ClearViewModel, ConfigViewModel, StatusViewModel};
