//! Date parts used by date facet exclusions

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Part of a timestamp a date facet can exclude on.
///
/// Keys on the wire are zero-based for quarter, month, week and day of
/// month, and taken as-is otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Year,
    QuarterOfYear,
    MonthOfYear,
    WeekOfYear,
    DayOfMonth,
    /// Monday = 0
    DayOfWeek,
    HourOfDay,
}

impl DatePart {
    pub fn parse(filter_type: &str) -> Result<Self, String> {
        match filter_type {
            "YEAR" => Ok(Self::Year),
            "QUARTER_OF_YEAR" => Ok(Self::QuarterOfYear),
            "MONTH_OF_YEAR" => Ok(Self::MonthOfYear),
            "WEEK_OF_YEAR" => Ok(Self::WeekOfYear),
            "DAY_OF_MONTH" => Ok(Self::DayOfMonth),
            "DAY_OF_WEEK" => Ok(Self::DayOfWeek),
            "HOUR_OF_DAY" => Ok(Self::HourOfDay),
            _ => Err("Unknown date filter.".to_string()),
        }
    }

    /// Value of this part for a timestamp
    pub fn of(&self, ts: &DateTime<Utc>) -> i64 {
        match self {
            Self::Year => ts.year() as i64,
            Self::QuarterOfYear => ((ts.month0() / 3) + 1) as i64,
            Self::MonthOfYear => ts.month() as i64,
            Self::WeekOfYear => ts.iso_week().week() as i64,
            Self::DayOfMonth => ts.day() as i64,
            Self::DayOfWeek => ts.weekday().num_days_from_monday() as i64,
            Self::HourOfDay => ts.hour() as i64,
        }
    }

    fn offset(&self) -> i64 {
        match self {
            Self::QuarterOfYear | Self::MonthOfYear | Self::WeekOfYear | Self::DayOfMonth => 1,
            Self::Year | Self::DayOfWeek | Self::HourOfDay => 0,
        }
    }

    /// Translate wire keys to values comparable with [`of`](Self::of)
    pub fn excluded(&self, keys: Vec<&str>) -> Result<Vec<i64>, String> {
        keys.into_iter()
            .map(|k| {
                k.trim()
                    .parse::<i64>()
                    .map(|v| v + self.offset())
                    .map_err(|_| format!("'{}' is not a valid date part", k))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parts_of_timestamp() {
        // Saturday
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 13, 0, 0).unwrap();

        assert_eq!(DatePart::Year.of(&ts), 2024);
        assert_eq!(DatePart::QuarterOfYear.of(&ts), 2);
        assert_eq!(DatePart::MonthOfYear.of(&ts), 6);
        assert_eq!(DatePart::WeekOfYear.of(&ts), 24);
        assert_eq!(DatePart::DayOfMonth.of(&ts), 15);
        assert_eq!(DatePart::DayOfWeek.of(&ts), 5);
        assert_eq!(DatePart::HourOfDay.of(&ts), 13);
    }

    #[test]
    fn test_zero_based_keys() {
        assert_eq!(DatePart::MonthOfYear.excluded(vec!["0", "11"]), Ok(vec![1, 12]));
        assert_eq!(DatePart::DayOfWeek.excluded(vec!["6"]), Ok(vec![6]));
        assert!(DatePart::HourOfDay.excluded(vec!["noon"]).is_err());
        assert!(DatePart::parse("DECADE").is_err());
    }
}
