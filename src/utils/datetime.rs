use chrono::{Duration, Local, NaiveDate, NaiveTime};

/// Current date in the server's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Days offered by the calendar, starting with `today`.
pub fn booking_window(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..i64::from(days)).map(|offset| today + Duration::days(offset)).collect()
}

/// One slot per whole hour from `start` to `end` inclusive.
pub fn slot_times(start: u32, end: u32) -> Vec<NaiveTime> {
    (start..=end)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .collect()
}

pub fn format_day_label(date: NaiveDate) -> String {
    date.format("%d %b").to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

pub fn parse_time(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_window_has_fourteen_days() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let days = booking_window(today, 14);
        assert_eq!(days.len(), 14);
        assert_eq!(days[0], today);
        assert_eq!(days[13], NaiveDate::from_ymd_opt(2026, 10, 31).unwrap());
    }

    #[test]
    fn test_slot_times_include_end_hour() {
        let slots = slot_times(10, 19);
        assert_eq!(slots.len(), 10);
        assert_eq!(format_time(slots[0]), "10:00");
        assert_eq!(format_time(slots[9]), "19:00");
    }

    #[test]
    fn test_labels_and_parsing() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        assert_eq!(format_day_label(date), "05 Oct");
        assert_eq!(parse_date(&format_date(date)), Some(date));
        assert_eq!(parse_time("19:00"), NaiveTime::from_hms_opt(19, 0, 0));
        assert_eq!(parse_date("2026-13-01"), None);
        assert_eq!(parse_time("25:00"), None);
    }
}
