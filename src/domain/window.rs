use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Optional, inclusive date filter. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self { start, end }
    }

    /// Range with both bounds set.
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Parses `YYYY-MM-DD` or a full timestamp. Date-only input maps to the
/// start of the day, or its last second when `end_of_day` is set.
pub fn parse_timestamp(raw: &str, end_of_day: bool) -> LedgerResult<NaiveDateTime> {
    let raw = raw.trim();
    for format in DATE_TIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(value);
        }
    }
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| LedgerError::Validation(format!("invalid date `{raw}`")))?;
    let time = if end_of_day {
        NaiveTime::from_hms_opt(23, 59, 59)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    };
    time.map(|time| date.and_time(time))
        .ok_or_else(|| LedgerError::Validation(format!("invalid date `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = DateRange::between(at(1, 0), at(31, 0));
        assert!(range.contains(at(1, 0)));
        assert!(range.contains(at(31, 0)));
        assert!(!range.contains(at(31, 1)));
    }

    #[test]
    fn open_bounds_accept_everything_on_that_side() {
        let range = DateRange::new(None, Some(at(10, 0)));
        assert!(range.contains(NaiveDateTime::MIN));
        assert!(!range.contains(at(11, 0)));
        assert!(DateRange::unbounded().contains(NaiveDateTime::MAX));
    }

    #[test]
    fn date_only_input_expands_to_day_edges() {
        assert_eq!(parse_timestamp("2024-01-05", false).unwrap(), at(5, 0));
        let end = parse_timestamp("2024-01-05", true).unwrap();
        assert_eq!(end.format("%H:%M:%S").to_string(), "23:59:59");
        assert!(parse_timestamp("05/01/2024", false).is_err());
    }
}
