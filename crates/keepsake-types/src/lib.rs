pub mod error;
pub mod event;
pub mod session;
pub mod snapshot;
mod util;

pub use error::{Error, Result};
pub use event::*;
pub use session::SessionId;
pub use snapshot::*;
pub use util::*;
