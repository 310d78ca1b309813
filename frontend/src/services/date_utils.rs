use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use js_sys::Date;

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    let now = Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1, // JavaScript months are 0-indexed
        now.get_date(),
    )
    .unwrap_or(NaiveDate::MIN)
}

/// Current local date-time, used to split appointments into upcoming and past
pub fn now_local() -> NaiveDateTime {
    let now = Date::new_0();
    let time = NaiveTime::from_hms_opt(now.get_hours(), now.get_minutes(), now.get_seconds())
        .unwrap_or(NaiveTime::MIN);
    today().and_time(time)
}

/// Latest bookable day: the end of the month three months ahead
pub fn max_booking_date(today: NaiveDate) -> Option<NaiveDate> {
    today
        .checked_add_months(Months::new(4))
        .and_then(|date| date.with_day(1))
        .and_then(|first| first.pred_opt())
}
