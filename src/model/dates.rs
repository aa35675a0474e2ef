use time::{Date, OffsetDateTime, format_description::FormatItem, macros::format_description};

use super::ValidationError;

const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The pair of dates a spreadsheet load is keyed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpreadsheetDates {
    pub current: Date,
    pub previous: Date,
}

impl SpreadsheetDates {
    /// Today and the day before.
    pub fn defaults_for(today: Date) -> Self {
        Self {
            current: today,
            previous: today.previous_day().unwrap_or(today),
        }
    }

    /// Parse both form fields; the previous date must come first.
    pub fn parse(current: &str, previous: &str) -> Result<Self, ValidationError> {
        let current = parse_iso_date(current)?;
        let previous = parse_iso_date(previous)?;
        if previous >= current {
            return Err(ValidationError::DatesOutOfOrder {
                current: format_iso_date(current),
                previous: format_iso_date(previous),
            });
        }
        Ok(Self { current, previous })
    }
}

/// Today in local time, or UTC when the local offset is unknown.
pub fn local_today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

pub fn parse_iso_date(value: &str) -> Result<Date, ValidationError> {
    Date::parse(value.trim(), ISO_DATE).map_err(|_| ValidationError::InvalidDate {
        value: value.to_string(),
    })
}

pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE)
        .unwrap_or_else(|_| format!("{}-{:02}-{:02}", date.year(), date.month() as u8, date.day()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn defaults_are_today_and_yesterday() {
        let dates = SpreadsheetDates::defaults_for(date!(2024 - 03 - 01));
        assert_eq!(format_iso_date(dates.current), "2024-03-01");
        assert_eq!(format_iso_date(dates.previous), "2024-02-29");
    }

    #[test]
    fn parse_rejects_reversed_dates() {
        let err = SpreadsheetDates::parse("2024-01-01", "2024-01-02").unwrap_err();
        assert!(matches!(err, ValidationError::DatesOutOfOrder { .. }));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = SpreadsheetDates::parse("01/02/2024", "2024-01-01").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDate {
                value: "01/02/2024".into()
            }
        );
    }
}
