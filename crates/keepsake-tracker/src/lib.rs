// NOTE: keepsake tracker layout
//
// The logger is the only component with a lifecycle: it is created once per
// visit, appends forever, and is finalized when the page goes away. Every
// other tracker (scroll, click, section views, time updates) and every widget
// talks to it through `Recorder`, so they can be exercised against a plain
// `Vec<EventData>` in tests.
//
// The browser is never referenced directly. Time comes from `Clock`, device
// facts from `ClientInfo`, element existence from `ElementLookup`, and
// persistence from `keepsake_store::KeyValueStore`.

pub mod config;
pub mod env;
pub mod error;
pub mod logger;
pub mod page;
pub mod recorder;
pub mod report;
pub mod timer;

pub use config::{Config, StorageConfig, TimingConfig, TrackingConfig, resolve_data_dir};
pub use env::{ClientInfo, Clock, ElementLookup, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use logger::{InteractionLogger, Persistence};
pub use page::{ClickTarget, PageTracker, ScrollMetrics};
pub use recorder::Recorder;
pub use report::{collect_report, read_final, read_stored};
pub use timer::{Debounce, Interval};
