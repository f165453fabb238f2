//! Time-of-day tokens
//!
//! A token is a run of ASCII digits with at most one separator (`:` or `.`).
//! Digits before the separator form the hour and digits after it form the
//! minute. A token without a separator is hours only, so `"7"` is 07:00.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{ScheduleError, ScheduleResult, TimeTokenFault};

/// Minutes in one hour
pub const MINS_PER_HOUR: u16 = 60;

/// Highest valid hour
pub const MAX_HOUR: u8 = 23;

/// Highest valid minute
pub const MAX_MINUTE: u8 = 59;

/// An hour/minute pair parsed from one token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Build a time of day, rejecting out-of-range components
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeTokenFault> {
        if hour > MAX_HOUR {
            return Err(TimeTokenFault::HourOutOfRange);
        }
        if minute > MAX_MINUTE {
            return Err(TimeTokenFault::MinuteOutOfRange);
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes since midnight (0..=1439)
    #[must_use]
    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour) * MINS_PER_HOUR + u16::from(self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeTokenFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accumulators saturate so a long digit run still fails the range check
        let mut hour: u32 = 0;
        let mut minute: u32 = 0;
        let mut in_hours = true;

        for c in s.chars() {
            match c {
                ':' | '.' if in_hours => in_hours = false,
                ':' | '.' => return Err(TimeTokenFault::ExtraSeparator),
                '0'..='9' => {
                    let digit = c as u32 - '0' as u32;
                    let acc = if in_hours { &mut hour } else { &mut minute };
                    *acc = acc.saturating_mul(10).saturating_add(digit);
                }
                other => return Err(TimeTokenFault::InvalidCharacter(other)),
            }
        }

        if hour > u32::from(MAX_HOUR) {
            return Err(TimeTokenFault::HourOutOfRange);
        }
        if minute > u32::from(MAX_MINUTE) {
            return Err(TimeTokenFault::MinuteOutOfRange);
        }

        // Both values were range-checked above
        Self::new(hour as u8, minute as u8)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Parse the token at position `index` of the caller's argument list.
///
/// The index only feeds the error message so operators can find the
/// offending parameter.
pub fn parse_time_token(token: &str, index: usize) -> ScheduleResult<TimeOfDay> {
    let time = token
        .parse::<TimeOfDay>()
        .map_err(|fault| ScheduleError::invalid_token(index, token, fault))?;

    tracing::debug!(
        token = %token,
        time = %time,
        minutes = time.minutes_since_midnight(),
        "Parsed time token"
    );

    Ok(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_only() {
        let t: TimeOfDay = "7".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (7, 0));
        assert_eq!(t.minutes_since_midnight(), 420);
    }

    #[test]
    fn test_both_separators() {
        let colon: TimeOfDay = "19:30".parse().unwrap();
        let dot: TimeOfDay = "19.30".parse().unwrap();
        assert_eq!(colon, dot);
        assert_eq!(colon.minutes_since_midnight(), 1170);
    }

    #[test]
    fn test_leading_zeros_and_trailing_separator() {
        let t: TimeOfDay = "07:05".parse().unwrap();
        assert_eq!(t.minutes_since_midnight(), 425);

        let t: TimeOfDay = "6:".parse().unwrap();
        assert_eq!(t.minutes_since_midnight(), 360);
    }

    #[test]
    fn test_bounds() {
        assert_eq!("23:59".parse::<TimeOfDay>().unwrap().minutes_since_midnight(), 1439);
        assert_eq!("0:0".parse::<TimeOfDay>().unwrap().minutes_since_midnight(), 0);
        assert_eq!("24".parse::<TimeOfDay>(), Err(TimeTokenFault::HourOutOfRange));
        assert_eq!("12:60".parse::<TimeOfDay>(), Err(TimeTokenFault::MinuteOutOfRange));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!("7am".parse::<TimeOfDay>(), Err(TimeTokenFault::InvalidCharacter('a')));
        assert_eq!("-1".parse::<TimeOfDay>(), Err(TimeTokenFault::InvalidCharacter('-')));
        assert_eq!(" 7".parse::<TimeOfDay>(), Err(TimeTokenFault::InvalidCharacter(' ')));
    }

    #[test]
    fn test_second_separator_rejected() {
        assert_eq!("7:30:00".parse::<TimeOfDay>(), Err(TimeTokenFault::ExtraSeparator));
        assert_eq!("7.3:0".parse::<TimeOfDay>(), Err(TimeTokenFault::ExtraSeparator));
    }

    #[test]
    fn test_huge_digit_run_does_not_overflow() {
        assert_eq!(
            "99999999999999999999".parse::<TimeOfDay>(),
            Err(TimeTokenFault::HourOutOfRange)
        );
    }

    #[test]
    fn test_parse_time_token_carries_index() {
        let err = parse_time_token("25", 4).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidTimeToken { index: 4, fault: TimeTokenFault::HourOutOfRange, .. }
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeOfDay::new(7, 5).unwrap().to_string(), "07:05");
    }
}
