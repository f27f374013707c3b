pub mod calendar;
pub mod config;
pub mod error;

pub use calendar::{CalendarZone, WeekStart};
pub use config::Config;
pub use error::*;
