//! Calendar month arithmetic on `time::Date`.

use time::Date;

/// First day of the month containing `date`.
pub fn month_floor(date: Date) -> Date {
    date.replace_day(1).expect("day 1 is valid in every month")
}

/// First day of the month after the one containing `date`.
pub fn next_month(date: Date) -> Date {
    let floor = month_floor(date);
    let (year, month) = match floor.month() {
        time::Month::December => (floor.year() + 1, time::Month::January),
        m => (floor.year(), m.next()),
    };
    Date::from_calendar_date(year, month, 1).expect("first of month is always valid")
}

/// Half-open range `[start, end)` covering the month before the one
/// containing `reset_date`. The archival job migrates rows in this range.
pub fn prior_month_range(reset_date: Date) -> (Date, Date) {
    let end = month_floor(reset_date);
    let last_of_prior = end.previous_day().expect("no month starts at Date::MIN");
    (month_floor(last_of_prior), end)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn floors_to_first_of_month() {
        assert_eq!(month_floor(date!(2026 - 03 - 17)), date!(2026 - 03 - 01));
        assert_eq!(month_floor(date!(2026 - 03 - 01)), date!(2026 - 03 - 01));
    }

    #[test]
    fn next_month_wraps_year() {
        assert_eq!(next_month(date!(2025 - 12 - 31)), date!(2026 - 01 - 01));
        assert_eq!(next_month(date!(2026 - 01 - 15)), date!(2026 - 02 - 01));
    }

    #[test]
    fn prior_range_is_half_open_previous_month() {
        let (start, end) = prior_month_range(date!(2026 - 03 - 01));
        assert_eq!(start, date!(2026 - 02 - 01));
        assert_eq!(end, date!(2026 - 03 - 01));
    }

    #[test]
    fn prior_range_wraps_year() {
        let (start, end) = prior_month_range(date!(2026 - 01 - 09));
        assert_eq!(start, date!(2025 - 12 - 01));
        assert_eq!(end, date!(2026 - 01 - 01));
    }
}
