//! Worklog duration codec.
//!
//! Folds raw worklog seconds into a week/day/hour/minute breakdown using a
//! working calendar (a week is `days_per_week` working days, a day is
//! `hours_per_day` working hours), and maps tracker shorthand like `1h 30m`
//! back to seconds.

use std::fmt;

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;

/// Jira's default: 8 working hours per day.
pub const DEFAULT_HOURS_PER_DAY: u64 = 8;
/// Jira's default: 5 working days per week.
pub const DEFAULT_DAYS_PER_WEEK: u64 = 5;

/// Hour/day/week conversion used to decompose a second count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingCalendar {
    hours_per_day: u64,
    days_per_week: u64,
}

impl WorkingCalendar {
    /// 1w = 144000s (40h), 1d = 28800s (8h).
    pub const STANDARD: WorkingCalendar = WorkingCalendar {
        hours_per_day: DEFAULT_HOURS_PER_DAY,
        days_per_week: DEFAULT_DAYS_PER_WEEK,
    };

    /// Returns `None` when either factor is zero.
    pub fn new(hours_per_day: u64, days_per_week: u64) -> Option<Self> {
        if hours_per_day == 0 || days_per_week == 0 {
            return None;
        }
        Some(Self {
            hours_per_day,
            days_per_week,
        })
    }

    pub fn hours_per_day(&self) -> u64 {
        self.hours_per_day
    }

    pub fn days_per_week(&self) -> u64 {
        self.days_per_week
    }

    pub fn seconds_per_day(&self) -> u64 {
        self.hours_per_day * SECONDS_PER_HOUR
    }

    pub fn seconds_per_week(&self) -> u64 {
        self.days_per_week * self.seconds_per_day()
    }

    /// Sum all entries and decompose week → day → hour → minute, carrying the
    /// remainder. Leftover seconds below one minute are truncated.
    pub fn aggregate<I>(&self, entries: I) -> AggregatedDuration
    where
        I: IntoIterator<Item = u64>,
    {
        let mut remaining: u64 = entries.into_iter().fold(0u64, u64::saturating_add);

        let weeks = remaining / self.seconds_per_week();
        remaining %= self.seconds_per_week();
        let days = remaining / self.seconds_per_day();
        remaining %= self.seconds_per_day();
        let hours = remaining / SECONDS_PER_HOUR;
        remaining %= SECONDS_PER_HOUR;
        let minutes = remaining / SECONDS_PER_MINUTE;

        AggregatedDuration {
            weeks,
            days,
            hours,
            minutes,
        }
    }

    /// Total seconds represented by a breakdown under this calendar. Saturates at `u64::MAX`.
    pub fn to_seconds(&self, duration: &AggregatedDuration) -> u64 {
        duration
            .weeks
            .saturating_mul(self.seconds_per_week())
            .saturating_add(duration.days.saturating_mul(self.seconds_per_day()))
            .saturating_add(duration.hours.saturating_mul(SECONDS_PER_HOUR))
            .saturating_add(duration.minutes.saturating_mul(SECONDS_PER_MINUTE))
    }

    /// Parse tracker shorthand (`1w 2d 3h 30m`, `45min`, `1h30m`) into seconds.
    ///
    /// Returns `None` for empty input, bare numbers, unknown units or overflow.
    /// Only used for previews: the tracker applies its own grammar on submit.
    pub fn parse_shorthand(&self, input: &str) -> Option<u64> {
        let mut chars = input.trim().chars().peekable();
        let mut total = 0u64;
        let mut seen = false;

        while chars.peek().is_some() {
            let mut digits = String::new();
            while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
                digits.push(c);
            }
            if digits.is_empty() {
                return None;
            }
            while chars.next_if(|c| c.is_whitespace()).is_some() {}

            let mut unit = String::new();
            while let Some(c) = chars.next_if(|c| c.is_ascii_alphabetic()) {
                unit.push(c.to_ascii_lowercase());
            }
            let scale = match unit.as_str() {
                "w" => self.seconds_per_week(),
                "d" => self.seconds_per_day(),
                "h" => SECONDS_PER_HOUR,
                "m" | "min" => SECONDS_PER_MINUTE,
                _ => return None,
            };

            let amount: u64 = digits.parse().ok()?;
            total = total.checked_add(amount.checked_mul(scale)?)?;
            seen = true;

            while chars.next_if(|c| c.is_whitespace()).is_some() {}
        }

        seen.then_some(total)
    }
}

impl Default for WorkingCalendar {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Week/day/hour/minute breakdown of a second count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregatedDuration {
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl AggregatedDuration {
    pub fn is_zero(&self) -> bool {
        self.weeks == 0 && self.days == 0 && self.hours == 0 && self.minutes == 0
    }
}

/// Non-zero components only, e.g. `1w 1d 1h 1min`. All-zero renders as `""`.
impl fmt::Display for AggregatedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [
            (self.weeks, "w"),
            (self.days, "d"),
            (self.hours, "h"),
            (self.minutes, "min"),
        ];
        let mut first = true;
        for (value, unit) in parts {
            if value == 0 {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}{}", value, unit)?;
            first = false;
        }
        Ok(())
    }
}

/// Aggregate with the standard 40h-week / 8h-day calendar.
pub fn aggregate<I>(entries: I) -> AggregatedDuration
where
    I: IntoIterator<Item = u64>,
{
    WorkingCalendar::STANDARD.aggregate(entries)
}

pub fn format(duration: &AggregatedDuration) -> String {
    duration.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_zero_format_blank() {
        assert_eq!(format(&aggregate([])), "");
        assert_eq!(format(&aggregate([0])), "");
        assert!(aggregate([0, 0, 0]).is_zero());
    }

    #[test]
    fn single_hour() {
        assert_eq!(format(&aggregate([3600])), "1h");
    }

    #[test]
    fn every_component_once() {
        let d = aggregate([144_000 + 28_800 + 3_600 + 60]);
        assert_eq!(
            d,
            AggregatedDuration {
                weeks: 1,
                days: 1,
                hours: 1,
                minutes: 1
            }
        );
        assert_eq!(format(&d), "1w 1d 1h 1min");
    }

    #[test]
    fn sums_entries_before_decomposing() {
        assert_eq!(format(&aggregate([3600, 1800])), "1h 30min");
        // 9h across two entries carries into a day.
        assert_eq!(format(&aggregate([5 * 3600, 4 * 3600])), "1d 1h");
    }

    #[test]
    fn sub_minute_seconds_are_truncated() {
        assert_eq!(format(&aggregate([59])), "");
        assert_eq!(format(&aggregate([119])), "1min");
        assert_eq!(format(&aggregate([3600, 30, 29])), "1h");
    }

    #[test]
    fn components_stay_within_modulus() {
        let samples: [&[u64]; 5] = [
            &[1],
            &[28_799],
            &[143_999],
            &[1_000_000, 77, 3_599],
            &[u64::from(u32::MAX), 12_345],
        ];
        for entries in samples {
            let d = aggregate(entries.iter().copied());
            assert!(d.minutes < 60, "{:?}", d);
            assert!(d.hours < 8, "{:?}", d);
            assert!(d.days < 5, "{:?}", d);
            assert!(!format(&d).contains('-'));
        }
    }

    #[test]
    fn alternative_calendar_changes_day_and_week_size() {
        let calendar = WorkingCalendar::new(6, 4).unwrap();
        assert_eq!(calendar.seconds_per_day(), 6 * 3600);
        assert_eq!(calendar.seconds_per_week(), 24 * 3600);
        assert_eq!(calendar.aggregate([7 * 3600]).to_string(), "1d 1h");
        assert_eq!(calendar.aggregate([25 * 3600]).to_string(), "1w 1h");
    }

    #[test]
    fn zero_calendar_factors_are_rejected() {
        assert!(WorkingCalendar::new(0, 5).is_none());
        assert!(WorkingCalendar::new(8, 0).is_none());
    }

    #[test]
    fn parses_tracker_shorthand() {
        let c = WorkingCalendar::STANDARD;
        assert_eq!(c.parse_shorthand("1h 30m"), Some(5400));
        assert_eq!(c.parse_shorthand("1h30m"), Some(5400));
        assert_eq!(c.parse_shorthand("45min"), Some(2700));
        assert_eq!(c.parse_shorthand(" 2d "), Some(57_600));
        assert_eq!(c.parse_shorthand("1W 1D 1H 1M"), Some(144_000 + 28_800 + 3_600 + 60));
    }

    #[test]
    fn rejects_unrecognised_shorthand() {
        let c = WorkingCalendar::STANDARD;
        assert_eq!(c.parse_shorthand(""), None);
        assert_eq!(c.parse_shorthand("   "), None);
        assert_eq!(c.parse_shorthand("90"), None);
        assert_eq!(c.parse_shorthand("1y"), None);
        assert_eq!(c.parse_shorthand("h"), None);
        assert_eq!(c.parse_shorthand("1.5h"), None);
    }

    #[test]
    fn shorthand_is_inverse_of_format() {
        let c = WorkingCalendar::STANDARD;
        let d = c.aggregate([144_000 + 2 * 28_800 + 3 * 3_600 + 4 * 60]);
        let seconds = c.parse_shorthand(&d.to_string()).unwrap();
        assert_eq!(seconds, c.to_seconds(&d));
        assert_eq!(c.aggregate([seconds]), d);
    }

    #[test]
    fn to_seconds_saturates_on_huge_breakdowns() {
        let huge = AggregatedDuration {
            weeks: u64::MAX,
            days: 1,
            hours: 0,
            minutes: 0,
        };
        assert_eq!(WorkingCalendar::STANDARD.to_seconds(&huge), u64::MAX);
    }
}
