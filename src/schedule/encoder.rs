//! Weekly schedule expansion and wire encoding
//!
//! A daily list of minute offsets is repeated for each of the seven days.
//! Day is the outer loop and offset the inner one, so the value at flat
//! index `d * n + i` is `d * 1440 + offsets[i]`.

use serde::Serialize;
use std::fmt;

use super::error::{ScheduleError, ScheduleResult};
use super::time::TimeOfDay;

/// Minutes in one day
pub const MINS_PER_DAY: u32 = 1440;

/// Days covered by one schedule
pub const DAYS_PER_WEEK: u32 = 7;

/// Largest value a schedule entry can take (7 * 1440 - 1)
pub const MAX_WEEK_MINUTE: u32 = DAYS_PER_WEEK * MINS_PER_DAY - 1;

/// A daily on/off pattern expanded across a whole week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    values: Vec<u32>,
}

impl WeeklySchedule {
    /// Expand minute-of-day offsets into a seven day schedule.
    ///
    /// Offsets keep the order they were given in; they are not sorted or
    /// deduplicated.
    pub fn from_offsets(offsets: &[u16]) -> ScheduleResult<Self> {
        if offsets.is_empty() {
            return Err(ScheduleError::EmptySchedule);
        }
        if let Some(&offset) = offsets.iter().find(|&&o| u32::from(o) >= MINS_PER_DAY) {
            return Err(ScheduleError::OffsetOutOfRange { offset });
        }

        let mut values = Vec::with_capacity(offsets.len() * DAYS_PER_WEEK as usize);
        for day in 0..DAYS_PER_WEEK {
            for (index, &offset) in offsets.iter().enumerate() {
                let value = day * MINS_PER_DAY + u32::from(offset);
                tracing::debug!(day, index, value, "Schedule entry");
                values.push(value);
            }
        }

        Ok(Self { values })
    }

    /// Expand parsed times of day
    pub fn from_times(times: &[TimeOfDay]) -> ScheduleResult<Self> {
        let offsets: Vec<u16> = times.iter().map(TimeOfDay::minutes_since_midnight).collect();
        Self::from_offsets(&offsets)
    }

    /// Flat week-minute values, day-major
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Number of entries per day
    pub fn per_day(&self) -> usize {
        self.values.len() / DAYS_PER_WEEK as usize
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bracketed, comma separated wire form, e.g. `[420,1860,...]`
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WeeklySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

/// Encode a list of times straight to the wire form
pub fn encode_schedule(times: &[TimeOfDay]) -> ScheduleResult<String> {
    WeeklySchedule::from_times(times).map(|schedule| schedule.to_wire())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_offsets_expand_to_fourteen_values() {
        let schedule = WeeklySchedule::from_offsets(&[420, 1140]).unwrap();
        assert_eq!(schedule.len(), 14);
        assert_eq!(schedule.per_day(), 2);
        assert_eq!(
            schedule.to_wire(),
            "[420,1140,1860,2580,3300,4020,4740,5460,6180,6900,7620,8340,9060,9780]"
        );
    }

    #[test]
    fn test_single_offset() {
        let schedule = WeeklySchedule::from_offsets(&[0]).unwrap();
        assert_eq!(schedule.values(), &[0, 1440, 2880, 4320, 5760, 7200, 8640]);
    }

    #[test]
    fn test_input_order_is_kept() {
        let schedule = WeeklySchedule::from_offsets(&[1140, 420]).unwrap();
        assert_eq!(&schedule.values()[..4], &[1140, 420, 2580, 1860]);
    }

    #[test]
    fn test_empty_is_rejected() {
        assert_eq!(WeeklySchedule::from_offsets(&[]), Err(ScheduleError::EmptySchedule));
        assert_eq!(encode_schedule(&[]), Err(ScheduleError::EmptySchedule));
    }

    #[test]
    fn test_offset_past_midnight_is_rejected() {
        assert_eq!(
            WeeklySchedule::from_offsets(&[10, 1440]),
            Err(ScheduleError::OffsetOutOfRange { offset: 1440 })
        );
    }

    #[test]
    fn test_last_minute_of_week() {
        let schedule = WeeklySchedule::from_offsets(&[1439]).unwrap();
        assert_eq!(schedule.values().last(), Some(&MAX_WEEK_MINUTE));
    }

    #[test]
    fn test_wire_matches_json_array() {
        let schedule = WeeklySchedule::from_offsets(&[420, 1140]).unwrap();
        let json = serde_json::to_string(&schedule).unwrap();
        assert_eq!(json, schedule.to_wire());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let times = vec![TimeOfDay::new(6, 30).unwrap(), TimeOfDay::new(22, 0).unwrap()];
        assert_eq!(encode_schedule(&times).unwrap(), encode_schedule(&times).unwrap());
    }
}
