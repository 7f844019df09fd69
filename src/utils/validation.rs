use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

use crate::booking::error::BookingError;

/// Cleans a typed contact: trims it and keeps only ASCII letters, digits,
/// `@`, `+`, space, hyphen and parentheses.
pub fn sanitize_contact_input(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '+' | ' ' | '-' | '(' | ')'))
        .collect()
}

/// Accepts dates from `today` through `today + window_days - 1`.
pub fn validate_booking_date(date: NaiveDate, today: NaiveDate, window_days: u32) -> Result<(), BookingError> {
    let end = today + Duration::days(i64::from(window_days));
    if date < today || date >= end {
        return Err(BookingError::InvalidDate(date));
    }
    Ok(())
}

/// Accepts whole hours between `start` and `end`, both inclusive.
pub fn validate_slot(time: NaiveTime, start: u32, end: u32) -> Result<(), BookingError> {
    if time.minute() != 0 || time.second() != 0 {
        return Err(BookingError::InvalidSlot(time));
    }
    if time.hour() < start || time.hour() > end {
        return Err(BookingError::InvalidSlot(time));
    }
    Ok(())
}
