//! French display formatting for appointment dates, times and prices.
//!
//! Store timestamps are timezone-naive and already expressed in the display
//! timezone, so no conversion happens here: the calendar fields are used
//! as-is. All functions are pure and deterministic.

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Weekday names indexed by day-of-week, 0 = Sunday.
const WEEKDAYS: [&str; 7] = [
    "Dimanche", "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi",
];

/// Month names indexed by month, 0 = January. Lower-cased, never abbreviated.
const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Display fallback when no price is available.
const NO_PRICE: &str = "—";

/// Formats an instant as `"<Weekday> <day> <month> <year>"`, e.g.
/// `"Lundi 10 mars 2025"`. No leading zero on the day-of-month.
pub fn format_date_full(instant: NaiveDateTime) -> String {
    let weekday = WEEKDAYS[instant.weekday().num_days_from_sunday() as usize];
    let month = MONTHS[instant.month0() as usize];
    format!("{} {} {} {}", weekday, instant.day(), month, instant.year())
}

/// Formats an instant as zero-padded 24-hour `"HH:MM"`.
pub fn format_time(instant: NaiveDateTime) -> String {
    format!("{:02}:{:02}", instant.hour(), instant.minute())
}

/// Formats a start/end pair as `"HH:MM - HH:MM"`.
pub fn format_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", format_time(start), format_time(end))
}

/// Formats a price as `"{n}€"` with trailing zeros stripped, or the literal
/// `"—"` when absent.
pub fn format_price(price: Option<&BigDecimal>) -> String {
    match price {
        Some(price) => format!("{}€", price.normalized()),
        None => NO_PRICE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn date_full_is_french_with_no_leading_zero() {
        // 2025-03-10 is a Monday
        assert_eq!(format_date_full(instant(2025, 3, 10, 14, 30)), "Lundi 10 mars 2025");
        assert_eq!(format_date_full(instant(2025, 1, 5, 0, 0)), "Dimanche 5 janvier 2025");
        assert_eq!(
            format_date_full(instant(2024, 12, 25, 9, 0)),
            "Mercredi 25 décembre 2024"
        );
    }

    #[test]
    fn time_is_zero_padded_24_hour() {
        assert_eq!(format_time(instant(2025, 3, 10, 9, 5)), "09:05");
        assert_eq!(format_time(instant(2025, 3, 10, 14, 30)), "14:30");
        assert_eq!(format_time(instant(2025, 3, 10, 0, 0)), "00:00");
        assert_eq!(format_time(instant(2025, 3, 10, 23, 59)), "23:59");
    }

    #[test]
    fn time_range_joins_start_and_end() {
        assert_eq!(
            format_time_range(instant(2025, 3, 10, 14, 30), instant(2025, 3, 10, 15, 15)),
            "14:30 - 15:15"
        );
    }

    #[test]
    fn price_strips_trailing_zeros() {
        let price = BigDecimal::from_str("45.00").unwrap();
        assert_eq!(format_price(Some(&price)), "45€");

        let price = BigDecimal::from_str("37.50").unwrap();
        assert_eq!(format_price(Some(&price)), "37.5€");
    }

    #[test]
    fn price_falls_back_to_dash() {
        assert_eq!(format_price(None), "—");
    }

    #[test]
    fn formatting_is_idempotent_across_calls() {
        let at = instant(2025, 3, 10, 14, 30);
        assert_eq!(format_date_full(at), format_date_full(at));
        assert_eq!(format_time(at), format_time(at));
    }

    proptest! {
        #[test]
        fn time_always_matches_hh_mm(
            secs in 0i64..=86_399,
            days in 0i64..=100_000,
        ) {
            let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
            let at = base + chrono::Duration::days(days) + chrono::Duration::seconds(secs);
            let out = format_time(at);
            prop_assert_eq!(out.len(), 5);
            let bytes = out.as_bytes();
            prop_assert!(bytes[0].is_ascii_digit());
            prop_assert!(bytes[1].is_ascii_digit());
            prop_assert_eq!(bytes[2], b':');
            prop_assert!(bytes[3].is_ascii_digit());
            prop_assert!(bytes[4].is_ascii_digit());
        }

        #[test]
        fn date_full_never_abbreviates(
            secs in 0i64..=86_399,
            days in 0i64..=100_000,
        ) {
            let base = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
            let at = base + chrono::Duration::days(days) + chrono::Duration::seconds(secs);
            let out = format_date_full(at);
            let weekday = out.split(' ').next().unwrap();
            prop_assert!(WEEKDAYS.contains(&weekday));
            let month = out.split(' ').nth(2).unwrap();
            prop_assert!(MONTHS.contains(&month));
        }
    }
}
