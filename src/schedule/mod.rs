//! Weekly heating schedules
//!
//! Operators describe a day as a handful of switch times (`7`, `19:30`,
//! `22.15`). This module turns those tokens into minute offsets and
//! repeats them across the week in the flat array form the listener and
//! the heating controller exchange.
//!
//! # Example
//!
//! ```
//! use hearth::schedule::{parse_time_token, WeeklySchedule};
//!
//! let times = vec![
//!     parse_time_token("7", 0).unwrap(),
//!     parse_time_token("19:00", 1).unwrap(),
//! ];
//! let schedule = WeeklySchedule::from_times(&times).unwrap();
//! assert_eq!(schedule.len(), 14);
//! assert!(schedule.to_wire().starts_with("[420,1140,1860,2580,"));
//! ```
//!
//! # Modules
//!
//! - [`time`] - Time token parsing
//! - [`encoder`] - Seven day expansion and wire encoding
//! - [`error`] - Schedule errors

pub mod encoder;
pub mod error;
pub mod time;

pub use encoder::{encode_schedule, WeeklySchedule, DAYS_PER_WEEK, MAX_WEEK_MINUTE, MINS_PER_DAY};
pub use error::{ScheduleError, ScheduleResult, TimeTokenFault};
pub use time::{parse_time_token, TimeOfDay};
