mod command;
mod device;
mod document;
pub mod error;
mod garden;
mod logging;
mod schedule;
pub mod time;

pub use command::*;
pub use device::*;
pub use document::*;
pub use garden::*;
pub use logging::*;
pub use schedule::*;
pub use time::TimeWindow;

pub static CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
