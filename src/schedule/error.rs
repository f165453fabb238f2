//! Error types for the schedule module

use thiserror::Error;

/// Result type for schedule operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Why a single time token was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeTokenFault {
    /// Character that is neither a digit nor a separator
    #[error("Invalid digit '{0}'")]
    InvalidCharacter(char),

    /// More than one `:` or `.` in the token
    #[error("More than one separator")]
    ExtraSeparator,

    /// Hour component above 23
    #[error("Hour is > 23")]
    HourOutOfRange,

    /// Minute component above 59
    #[error("Minute is > 59")]
    MinuteOutOfRange,
}

/// Schedule-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A time token could not be turned into a time of day
    #[error("{fault}: Parameter[{index}]: '{token}'")]
    InvalidTimeToken {
        index: usize,
        token: String,
        #[source]
        fault: TimeTokenFault,
    },

    /// No time offsets were supplied where a schedule is required
    #[error("No schedule times given")]
    EmptySchedule,

    /// A raw minute offset does not fit inside one day
    #[error("Offset {offset} is not a minute of the day (0-1439)")]
    OffsetOutOfRange { offset: u16 },
}

impl ScheduleError {
    /// Create an invalid time token error
    pub fn invalid_token(index: usize, token: impl Into<String>, fault: TimeTokenFault) -> Self {
        Self::InvalidTimeToken {
            index,
            token: token.into(),
            fault,
        }
    }
}
