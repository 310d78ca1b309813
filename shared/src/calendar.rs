//! Calendar grid generation for the booking date picker.
//!
//! The grid always holds six full weeks (42 cells) starting on the Monday on
//! or before the first of the month, so the layout never jumps when the user
//! pages between months. Every cell carries a [`DayStatus`] derived from the
//! current date and the availability/booking sets handed in by the caller.
//!
//! Status precedence is fixed: a day before today is always `Past`, then
//! `Booked`, then `Available`, and everything else is `Unavailable`.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Six weeks of seven days
pub const GRID_CELLS: usize = 42;

pub const MONTH_NAMES_DE: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni",
    "Juli", "August", "September", "Oktober", "November", "Dezember",
];

/// Column headers, Monday first
pub const WEEKDAY_SHORT_DE: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];

const WEEKDAY_NAMES_DE: [&str; 7] = [
    "Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Past,
    Available,
    Booked,
    Unavailable,
}

impl DayStatus {
    /// CSS modifier used by the calendar view
    pub fn css_class(&self) -> &'static str {
        match self {
            DayStatus::Past => "past",
            DayStatus::Available => "available",
            DayStatus::Booked => "booked",
            DayStatus::Unavailable => "unavailable",
        }
    }
}

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_other_month: bool,
}

impl CalendarDay {
    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    /// Only available days of the displayed month can be clicked
    pub fn is_selectable(&self) -> bool {
        self.status == DayStatus::Available && !self.is_other_month
    }
}

/// A calendar month. Ordering is chronological (year, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // month is validated on construction; day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES_DE[(self.month as usize).saturating_sub(1) % 12]
    }

    /// Header text such as `"März 2025"`
    pub fn title(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}

/// First cell of the grid: the Monday on or before the first of the month
pub fn grid_start(month: YearMonth) -> NaiveDate {
    let first = month.first_day();
    let dow = first.weekday().num_days_from_sunday();
    let offset = (dow + 6) % 7;
    first
        .checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(first)
}

/// Inputs for one rendering of the booking calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    month: YearMonth,
    today: NaiveDate,
    available: BTreeSet<NaiveDate>,
    booked: BTreeSet<NaiveDate>,
    selected: Option<NaiveDate>,
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
}

impl CalendarGrid {
    pub fn new(month: YearMonth, today: NaiveDate) -> Self {
        Self {
            month,
            today,
            available: BTreeSet::new(),
            booked: BTreeSet::new(),
            selected: None,
            min_date: None,
            max_date: None,
        }
    }

    pub fn with_available(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.available.extend(dates);
        self
    }

    pub fn with_booked(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.booked.extend(dates);
        self
    }

    pub fn with_selected(mut self, selected: Option<NaiveDate>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_bounds(mut self, min_date: Option<NaiveDate>, max_date: Option<NaiveDate>) -> Self {
        self.min_date = min_date;
        self.max_date = max_date;
        self
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn status_of(&self, date: NaiveDate) -> DayStatus {
        if date < self.today {
            DayStatus::Past
        } else if self.booked.contains(&date) {
            DayStatus::Booked
        } else if self.available.contains(&date) {
            DayStatus::Available
        } else {
            DayStatus::Unavailable
        }
    }

    /// The 42 cells of the displayed month, Monday first
    pub fn days(&self) -> Vec<CalendarDay> {
        grid_start(self.month)
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| CalendarDay {
                date,
                status: self.status_of(date),
                is_today: date == self.today,
                is_selected: self.selected == Some(date),
                is_other_month: !self.month.contains(date),
            })
            .collect()
    }

    /// Cells grouped into the six display rows
    pub fn weeks(&self) -> Vec<Vec<CalendarDay>> {
        self.days().chunks(7).map(<[CalendarDay]>::to_vec).collect()
    }

    pub fn can_go_previous(&self) -> bool {
        match self.min_date {
            Some(min) => self.month.previous() >= YearMonth::of(min),
            None => true,
        }
    }

    pub fn can_go_next(&self) -> bool {
        match self.max_date {
            Some(max) => self.month.next() <= YearMonth::of(max),
            None => true,
        }
    }

    /// Move one month back; returns false when the bound forbids it
    pub fn go_previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.month = self.month.previous();
        true
    }

    /// Move one month forward; returns false when the bound forbids it
    pub fn go_next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.month = self.month.next();
        true
    }
}

/// Parse an ISO `YYYY-MM-DD` string
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// German long form, e.g. `"Freitag, 10. Januar"`
pub fn format_warm_date(date: NaiveDate) -> String {
    let weekday = WEEKDAY_NAMES_DE[date.weekday().num_days_from_monday() as usize];
    let month = MONTH_NAMES_DE[date.month0() as usize];
    format!("{}, {}. {}", weekday, date.day(), month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_grid_has_42_cells_starting_monday_for_every_month() {
        let today = date(2000, 1, 1);
        for year in [2023, 2024, 2025, 2026] {
            for m in 1..=12 {
                let grid = CalendarGrid::new(month(year, m), today);
                let days = grid.days();
                assert_eq!(days.len(), GRID_CELLS, "{}-{}", year, m);
                assert_eq!(days[0].date.weekday(), chrono::Weekday::Mon, "{}-{}", year, m);

                for pair in days.windows(2) {
                    assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
                }

                let in_month = days.iter().filter(|d| !d.is_other_month).count();
                let expected = month(year, m).next().first_day().pred_opt().unwrap().day() as usize;
                assert_eq!(in_month, expected, "{}-{}", year, m);
                for day in &days {
                    assert_eq!(day.is_other_month, !(day.date.year() == year && day.date.month() == m));
                }
            }
        }
    }

    #[test]
    fn test_sunday_first_of_month_wraps_back_six_days() {
        // 1 June 2025 is a Sunday
        assert_eq!(grid_start(month(2025, 6)), date(2025, 5, 26));
        // 1 September 2025 is a Monday
        assert_eq!(grid_start(month(2025, 9)), date(2025, 9, 1));
    }

    #[test]
    fn test_past_beats_booked_and_available() {
        let today = date(2025, 3, 15);
        let grid = CalendarGrid::new(month(2025, 3), today)
            .with_available([date(2025, 3, 10), date(2025, 3, 16), date(2025, 3, 18)])
            .with_booked([date(2025, 3, 10), date(2025, 3, 18)]);

        assert_eq!(grid.status_of(date(2025, 3, 10)), DayStatus::Past);
        assert_eq!(grid.status_of(date(2025, 3, 14)), DayStatus::Past);
        assert_eq!(grid.status_of(date(2025, 3, 15)), DayStatus::Unavailable);
        assert_eq!(grid.status_of(date(2025, 3, 16)), DayStatus::Available);
        assert_eq!(grid.status_of(date(2025, 3, 18)), DayStatus::Booked);

        for day in grid.days().iter().filter(|d| d.date < today) {
            assert_eq!(day.status, DayStatus::Past);
        }
    }

    #[test]
    fn test_today_and_selection_flags() {
        let today = date(2025, 3, 15);
        let grid = CalendarGrid::new(month(2025, 3), today)
            .with_available([date(2025, 3, 20)])
            .with_selected(Some(date(2025, 3, 20)));
        let days = grid.days();

        let today_cells: Vec<_> = days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today_cells.len(), 1);
        assert_eq!(today_cells[0].date, today);

        let selected: Vec<_> = days.iter().filter(|d| d.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert!(selected[0].is_selectable());
    }

    #[test]
    fn test_available_day_in_other_month_is_not_selectable() {
        let today = date(2025, 1, 1);
        // 31 March 2025 shows up in the April grid
        let grid = CalendarGrid::new(month(2025, 4), today).with_available([date(2025, 3, 31)]);
        let cell = grid.days().into_iter().find(|d| d.date == date(2025, 3, 31)).unwrap();
        assert_eq!(cell.status, DayStatus::Available);
        assert!(cell.is_other_month);
        assert!(!cell.is_selectable());
    }

    #[test]
    fn test_navigation_respects_bounds() {
        let today = date(2025, 3, 15);
        let mut grid = CalendarGrid::new(month(2025, 3), today)
            .with_bounds(Some(today), Some(date(2025, 5, 2)));

        assert!(!grid.can_go_previous());
        assert!(!grid.go_previous());
        assert_eq!(grid.month(), month(2025, 3));

        assert!(grid.go_next());
        assert!(grid.go_next());
        assert_eq!(grid.month(), month(2025, 5));
        assert!(!grid.can_go_next());
        assert!(grid.can_go_previous());
    }

    #[test]
    fn test_navigation_unbounded_wraps_years() {
        let mut grid = CalendarGrid::new(month(2025, 12), date(2025, 12, 1));
        assert!(grid.go_next());
        assert_eq!(grid.month(), month(2026, 1));
        assert!(grid.go_previous());
        assert!(grid.go_previous());
        assert_eq!(grid.month(), month(2025, 11));
    }

    #[test]
    fn test_weeks_are_rows_of_seven() {
        let weeks = CalendarGrid::new(month(2025, 2), date(2025, 2, 1)).weeks();
        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|w| w.len() == 7));
    }

    #[test]
    fn test_german_formatting() {
        assert_eq!(month(2025, 3).title(), "März 2025");
        assert_eq!(format_warm_date(date(2025, 1, 10)), "Freitag, 10. Januar");
        assert_eq!(parse_iso_date("2025-02-29"), None);
        assert_eq!(parse_iso_date("2024-02-29"), Some(date(2024, 2, 29)));
        assert_eq!(to_iso_date(date(2024, 2, 9)), "2024-02-09");
        assert_eq!(YearMonth::new(2025, 13), None);
    }
}
