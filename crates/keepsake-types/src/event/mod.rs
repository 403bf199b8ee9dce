pub mod data;
pub mod event;
pub mod kind;

pub use data::*;
pub use event::*;
pub use kind::*;
