use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use std::ops::RangeInclusive;

/// Accepted `order_date` layouts. Tried in this order; the first match wins.
pub const ORDER_DATE_FORMATS: [DateFormat; 3] = [
    DateFormat::DateTime("%d-%m-%Y %H:%M"),
    DateFormat::Date("%Y-%m-%d"),
    DateFormat::DateTime("%Y-%m-%d %H:%M:%S"),
];

/// chrono's `%Y` takes any number of digits; exports always carry four.
const FOUR_DIGIT_YEARS: RangeInclusive<i32> = 1000..=9999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    Date(&'static str),
    DateTime(&'static str),
}

impl DateFormat {
    fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        match self {
            DateFormat::Date(fmt) => NaiveDate::parse_from_str(value, fmt)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN)),
            DateFormat::DateTime(fmt) => NaiveDateTime::parse_from_str(value, fmt).ok(),
        }
    }
}

/// Parses an order date; `None` for empty or unrecognised values.
pub fn parse_order_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    ORDER_DATE_FORMATS
        .iter()
        .find_map(|fmt| fmt.parse(value).filter(|d| FOUR_DIGIT_YEARS.contains(&d.year())))
}

pub fn format_canonical(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM-DD`, or `""` when the value cannot be parsed.
pub fn canonical_date(value: &str) -> String {
    parse_order_date(value)
        .map(|d| format_canonical(&d))
        .unwrap_or_default()
}
