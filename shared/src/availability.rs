//! Fallback availability derived from the studio's weekly opening hours.
//!
//! The slot endpoint is the source of truth. When it cannot be reached the
//! booking page still offers times by stepping through the opening hours of
//! the chosen weekday, and the date picker marks the next open days.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike};

use crate::api::{DayOfWeek, WeeklyAvailability};
use crate::time_slots::DisplaySlot;

/// Spacing between generated slot start times
pub const SLOT_STEP_MINUTES: u32 = 30;

/// How far ahead [`next_available_days`] looks, in days
pub const LOOKAHEAD_DAYS: u64 = 60;

/// Number of open days the booking page highlights
pub const DEFAULT_VISIBLE_DAYS: usize = 14;

fn minutes_of_day(time: &str) -> Option<u32> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M:%S"))
        .ok()?;
    Some(parsed.hour() * 60 + parsed.minute())
}

/// Opening hours entry for the weekday of `date`, if any
pub fn availability_for<'a>(
    weekly: &'a [WeeklyAvailability],
    date: NaiveDate,
) -> Option<&'a WeeklyAvailability> {
    let day = DayOfWeek::from(date.weekday());
    weekly.iter().find(|entry| entry.day_of_week == day)
}

/// Start times every 30 minutes such that the whole treatment fits before closing
pub fn generate_time_slots(
    availability: Option<&WeeklyAvailability>,
    duration_minutes: u32,
) -> Vec<String> {
    let Some(availability) = availability.filter(|a| a.active) else {
        return Vec::new();
    };
    let (Some(start), Some(end)) = (
        minutes_of_day(&availability.start_time),
        minutes_of_day(&availability.end_time),
    ) else {
        return Vec::new();
    };

    (start..)
        .step_by(SLOT_STEP_MINUTES as usize)
        .take_while(|time| time + duration_minutes <= end)
        .map(|time| format!("{:02}:{:02}", time / 60, time % 60))
        .collect()
}

/// Fallback slot list for a specific date, every slot marked available
pub fn fallback_slots(
    weekly: &[WeeklyAvailability],
    date: NaiveDate,
    duration_minutes: u32,
) -> Vec<DisplaySlot> {
    generate_time_slots(availability_for(weekly, date), duration_minutes)
        .into_iter()
        .map(|time| DisplaySlot::new(time, true))
        .collect()
}

/// The next `count` dates after `today` whose weekday is open, looking at most 60 days ahead
pub fn next_available_days(
    weekly: &[WeeklyAvailability],
    today: NaiveDate,
    count: usize,
) -> Vec<NaiveDate> {
    let open_days: Vec<DayOfWeek> = weekly
        .iter()
        .filter(|entry| entry.active)
        .map(|entry| entry.day_of_week)
        .collect();

    (1..LOOKAHEAD_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .filter(|date| open_days.contains(&DayOfWeek::from(date.weekday())))
        .take(count)
        .collect()
}

/// Opening hours assumed when the backend cannot be reached
pub fn default_weekly_availability() -> Vec<WeeklyAvailability> {
    let weekday = |id, day_of_week, start: &str, end: &str| WeeklyAvailability {
        id,
        day_of_week,
        start_time: start.to_string(),
        end_time: end.to_string(),
        active: true,
    };

    vec![
        weekday(1, DayOfWeek::Monday, "09:00", "17:00"),
        weekday(2, DayOfWeek::Tuesday, "09:00", "17:00"),
        weekday(3, DayOfWeek::Wednesday, "09:00", "17:00"),
        weekday(4, DayOfWeek::Thursday, "09:00", "17:00"),
        weekday(5, DayOfWeek::Friday, "09:00", "17:00"),
        weekday(6, DayOfWeek::Saturday, "10:00", "16:00"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_slots_fit_before_closing() {
        let weekly = default_weekly_availability();
        let saturday = availability_for(&weekly, date(2025, 6, 14));
        let slots = generate_time_slots(saturday, 120);

        assert_eq!(slots.first().map(String::as_str), Some("10:00"));
        assert_eq!(slots.last().map(String::as_str), Some("14:00"));
        assert_eq!(slots.len(), 9);
    }

    #[test]
    fn test_closed_or_inactive_day_has_no_slots() {
        let mut weekly = default_weekly_availability();
        // 15 June 2025 is a Sunday, not in the table
        assert!(generate_time_slots(availability_for(&weekly, date(2025, 6, 15)), 60).is_empty());

        weekly[0].active = false;
        assert!(generate_time_slots(availability_for(&weekly, date(2025, 6, 16)), 60).is_empty());
    }

    #[test]
    fn test_treatment_longer_than_opening_hours() {
        let weekly = default_weekly_availability();
        let monday = availability_for(&weekly, date(2025, 6, 16));
        assert!(generate_time_slots(monday, 9 * 60).is_empty());
        assert_eq!(generate_time_slots(monday, 8 * 60), vec!["09:00".to_string()]);
    }

    #[test]
    fn test_fallback_slots_are_available() {
        let weekly = default_weekly_availability();
        let slots = fallback_slots(&weekly, date(2025, 6, 16), 60);
        assert_eq!(slots.len(), 15);
        assert!(slots.iter().all(|slot| slot.available));
    }

    #[test]
    fn test_next_available_days_skips_closed_days_and_today() {
        let weekly = default_weekly_availability();
        // Friday 13 June 2025
        let days = next_available_days(&weekly, date(2025, 6, 13), 3);
        assert_eq!(days, vec![date(2025, 6, 14), date(2025, 6, 16), date(2025, 6, 17)]);
    }

    #[test]
    fn test_next_available_days_bounded_by_lookahead() {
        let weekly = default_weekly_availability();
        let days = next_available_days(&weekly, date(2025, 6, 13), 500);
        assert!(days.len() < 60);
        assert!(days.iter().all(|d| *d > date(2025, 6, 13)));
        assert!(days.iter().all(|d| d.weekday() != chrono::Weekday::Sun));

        assert!(next_available_days(&[], date(2025, 6, 13), 14).is_empty());
    }
}
