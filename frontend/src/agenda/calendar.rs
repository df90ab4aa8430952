//! # Calendar Grid
//!
//! Builds the month grid shown by the agenda: the days of the month framed by
//! the neighbouring months' days so every week row has seven cells, Sunday
//! first.

use chrono::{Datelike, Duration, NaiveDate};

/// Position of a cell relative to the displayed month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Trailing day of the previous month, shown before day 1
    PaddingBefore,
    MonthDay,
    /// Leading day of the next month, completing the last week
    PaddingAfter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day_type: CalendarDayType,
    pub is_today: bool,
    pub is_selected: bool,
}

impl CalendarDay {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Only days of the displayed month can be selected
    pub fn is_interactive(&self) -> bool {
        self.day_type == CalendarDayType::MonthDay
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: i32,
    pub days: Vec<CalendarDay>,
    /// Weekday of day 1, 0 = Sunday
    pub first_day_of_week: u32,
}

impl CalendarMonth {
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(7)
    }

    pub fn month_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|d| d.is_interactive())
    }

    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

/// Build the grid for `month`/`year`; `None` when the month does not exist
pub fn build_calendar(
    month: u32,
    year: i32,
    today: NaiveDate,
    selected: Option<NaiveDate>,
) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let days_in_month = days_in_month(month, year);
    let first_day_of_week = first.weekday().num_days_from_sunday();

    let cell = |date: NaiveDate, day_type: CalendarDayType| {
        let in_month = day_type == CalendarDayType::MonthDay;
        CalendarDay {
            date,
            day_type,
            is_today: in_month && date == today,
            is_selected: in_month && Some(date) == selected,
        }
    };

    let mut days = Vec::with_capacity(42);

    for offset in (1..=first_day_of_week).rev() {
        days.push(cell(first - Duration::days(offset as i64), CalendarDayType::PaddingBefore));
    }

    for day in 0..days_in_month {
        days.push(cell(first + Duration::days(day as i64), CalendarDayType::MonthDay));
    }

    let last = first + Duration::days(days_in_month as i64 - 1);
    let padding_after = (7 - days.len() % 7) % 7;
    for offset in 1..=padding_after {
        days.push(cell(last + Duration::days(offset as i64), CalendarDayType::PaddingAfter));
    }

    log::debug!(
        "Built calendar for {}/{}: {} leading, {} days, {} trailing",
        month,
        year,
        first_day_of_week,
        days_in_month,
        padding_after
    );

    Some(CalendarMonth { month, year, days, first_day_of_week })
}

/// Move `offset` months from `month`/`year`, carrying across year boundaries
pub fn shift_month(month: u32, year: i32, offset: i32) -> (u32, i32) {
    let index = year * 12 + (month as i32 - 1) + offset;
    (index.rem_euclid(12) as u32 + 1, index.div_euclid(12))
}

pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Invalid Month",
    }
}
