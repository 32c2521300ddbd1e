//! Current time in UTC and the two US zones markets care about.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, Utc, Weekday};

const STAMP: &str = "%a, %b %-d, %Y, %I:%M:%S %p";

/// A US zone by its standard offset from UTC, in hours.
#[derive(Debug, Clone, Copy)]
struct UsZone {
    standard: i32,
}

const EASTERN: UsZone = UsZone { standard: -5 };
const PACIFIC: UsZone = UsZone { standard: -8 };

fn nth_sunday(year: i32, month: u32, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Sun, n)
}

impl UsZone {
    /// Daylight time runs from 02:00 local on the second Sunday of March to
    /// 02:00 local on the first Sunday of November.
    fn is_daylight(self, now: DateTime<Utc>) -> bool {
        let year = now.year();
        let (Some(start), Some(end)) = (nth_sunday(year, 3, 2), nth_sunday(year, 11, 1)) else {
            return false;
        };
        let start = start.and_hms_opt(2, 0, 0).map(|t| t - Duration::hours(self.standard as i64));
        let end = end
            .and_hms_opt(2, 0, 0)
            .map(|t| t - Duration::hours(self.standard as i64 + 1));

        match (start, end) {
            (Some(start), Some(end)) => {
                let naive = now.naive_utc();
                naive >= start && naive < end
            }
            _ => false,
        }
    }

    fn offset(self, now: DateTime<Utc>) -> FixedOffset {
        let hours = if self.is_daylight(now) {
            self.standard + 1
        } else {
            self.standard
        };
        FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| Utc.fix())
    }

    fn stamp(self, now: DateTime<Utc>) -> String {
        now.with_timezone(&self.offset(now)).format(STAMP).to_string()
    }
}

pub fn current_time(now: DateTime<Utc>) -> String {
    [
        format!("UTC Time: {}", now.format(STAMP)),
        format!("Eastern Time (ET): {}", EASTERN.stamp(now)),
        format!("Pacific Time (PT): {}", PACIFIC.stamp(now)),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn summer_uses_daylight_offsets() {
        assert_eq!(
            current_time(at(2024, 7, 4, 16, 30)),
            "UTC Time: Thu, Jul 4, 2024, 04:30:00 PM\n\
             Eastern Time (ET): Thu, Jul 4, 2024, 12:30:00 PM\n\
             Pacific Time (PT): Thu, Jul 4, 2024, 09:30:00 AM"
        );
    }

    #[test]
    fn winter_uses_standard_offsets() {
        let text = current_time(at(2024, 1, 15, 3, 5));
        assert!(text.contains("Eastern Time (ET): Sun, Jan 14, 2024, 10:05:00 PM"));
        assert!(text.contains("Pacific Time (PT): Sun, Jan 14, 2024, 07:05:00 PM"));
    }

    #[test]
    fn transitions_happen_at_local_two_am() {
        // 2024-03-10 is the second Sunday of March.
        assert!(!EASTERN.is_daylight(at(2024, 3, 10, 6, 59)));
        assert!(EASTERN.is_daylight(at(2024, 3, 10, 7, 0)));
        assert!(!PACIFIC.is_daylight(at(2024, 3, 10, 9, 59)));
        assert!(PACIFIC.is_daylight(at(2024, 3, 10, 10, 0)));

        // 2024-11-03 is the first Sunday of November.
        assert!(EASTERN.is_daylight(at(2024, 11, 3, 5, 59)));
        assert!(!EASTERN.is_daylight(at(2024, 11, 3, 6, 0)));
        assert!(!PACIFIC.is_daylight(at(2024, 11, 3, 9, 0)));
    }
}
