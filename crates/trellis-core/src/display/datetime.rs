//! Date and time display utilities.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp, Zoned};

/// Formats a `Timestamp` in the system time zone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Current calendar date in the system time zone.
pub(crate) fn today() -> Date {
    Zoned::now().date()
}

/// Formats a calendar date as `Jan 15, 2024`.
pub struct ShortDate<'a>(pub &'a Date);

impl fmt::Display for ShortDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%b %-d, %Y"))
    }
}

/// Formats an inclusive date span as `Jan 15, 2024 - Jan 31, 2024`.
pub struct DateRange<'a> {
    pub start: &'a Date,
    pub end: &'a Date,
}

impl<'a> DateRange<'a> {
    pub fn new(start: &'a Date, end: &'a Date) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for DateRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", ShortDate(self.start))
        } else {
            write!(f, "{} - {}", ShortDate(self.start), ShortDate(self.end))
        }
    }
}
