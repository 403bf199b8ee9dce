// NOTE: keepsake CLI layout
//
// The page itself runs in a browser; this binary replays a scripted visit
// against the same logger and widgets so the stored log can be produced,
// inspected and cleared from a terminal.
//
// - Storage lives in `<data-dir>/storage.db`, one row per local-storage key.
//   Rows are written exactly as the browser would write them, so a log copied
//   out of a real browser can be inserted and read back unchanged.
// - Reads never fail on bad data. A malformed value is reported as absent and
//   a warning goes to stderr through tracing.
// - Handlers build a view model and hand it to the renderer; JSON output is
//   the serialized view model wrapped in `{ badge, content, suggestions }`.

mod args;
mod commands;
pub mod context;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand};
pub use commands::run;
