use std::fmt::{Display, Formatter};
use std::ops::Sub;

use serde::{Serialize, Serializer};
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, Time, UtcOffset};

/// Storage and wire format: `YYYY-MM-DDTHH:MM:SS.ffffff+00:00`.
///
/// The width is fixed and the offset is always `+00:00`, so TEXT comparison
/// in the store equals chronological comparison.
const FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory]:[offset_minute]"
);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp must match YYYY-MM-DDTHH:MM:SS.ffffff±HH:MM: '{value}'")]
    Unparseable { value: String },
}

/// UTC timestamp with microsecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self::from_offset_datetime(OffsetDateTime::now_utc())
    }

    /// Normalizes to UTC and truncates to microseconds so a value always
    /// round-trips through its storage form.
    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        let utc = value.to_offset(UtcOffset::UTC);
        let nanos = utc.nanosecond();
        let truncated = utc
            .replace_nanosecond(nanos - nanos % 1_000)
            .expect("truncated nanoseconds stay in range");
        Self(truncated)
    }

    pub fn parse(input: &str) -> Result<Self, TimestampError> {
        OffsetDateTime::parse(input, FORMAT)
            .map(Self::from_offset_datetime)
            .map_err(|_| TimestampError::Unparseable {
                value: input.to_owned(),
            })
    }

    /// First instant of the given calendar day, UTC.
    pub fn start_of_day(date: Date) -> Self {
        Self(date.with_time(Time::MIDNIGHT).assume_utc())
    }

    /// Last whole second of the given calendar day (23:59:59.000000), UTC.
    pub fn end_of_day(date: Date) -> Self {
        let time = Time::from_hms(23, 59, 59).expect("23:59:59 is a valid time");
        Self(date.with_time(time).assume_utc())
    }

    pub fn to_storage(&self) -> String {
        self.0
            .format(FORMAT)
            .expect("timestamp must be formattable")
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Self;

    fn sub(self, duration: Duration) -> Self {
        Self::from_offset_datetime(self.0 - duration)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_storage())
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_storage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn storage_form_has_fixed_width_and_utc_offset() {
        let ts = Timestamp::from_offset_datetime(datetime!(2026-08-23 12:34:56.123456 UTC));
        assert_eq!(ts.to_storage(), "2026-08-23T12:34:56.123456+00:00");
    }

    #[test]
    fn pads_subseconds_to_six_digits() {
        let ts = Timestamp::from_offset_datetime(datetime!(2026-08-23 12:34:56 UTC));
        assert_eq!(ts.to_storage(), "2026-08-23T12:34:56.000000+00:00");
    }

    #[test]
    fn normalizes_non_utc_offsets() {
        let ts = Timestamp::from_offset_datetime(datetime!(2026-08-23 14:00:00.5 +2));
        assert_eq!(ts.to_storage(), "2026-08-23T12:00:00.500000+00:00");
    }

    #[test]
    fn parse_round_trips_storage_form() {
        let original = Timestamp::now();
        let parsed = Timestamp::parse(&original.to_storage()).expect("storage form must parse");
        assert_eq!(parsed, original);
    }

    #[test]
    fn rejects_malformed_input() {
        let err = Timestamp::parse("2026-08-23 12:00:00").expect_err("must fail");
        assert!(matches!(err, TimestampError::Unparseable { .. }));
    }

    #[test]
    fn day_bounds_cover_whole_seconds() {
        let date = Date::from_calendar_date(2026, time::Month::August, 23).expect("valid date");
        assert_eq!(
            Timestamp::start_of_day(date).to_storage(),
            "2026-08-23T00:00:00.000000+00:00"
        );
        assert_eq!(
            Timestamp::end_of_day(date).to_storage(),
            "2026-08-23T23:59:59.000000+00:00"
        );
    }

    #[test]
    fn storage_strings_order_chronologically() {
        let earlier = Timestamp::from_offset_datetime(datetime!(2026-08-23 09:00:00.000001 UTC));
        let later = Timestamp::from_offset_datetime(datetime!(2026-08-23 09:00:00.000002 UTC));
        assert!(earlier.to_storage() < later.to_storage());
    }
}
