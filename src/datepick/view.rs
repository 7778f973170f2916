//! # Calendar View
//!
//! The data contract handed to renderers. A [`CalendarView`] is a complete,
//! self-contained snapshot of what one picker should display: header labels,
//! the day grid with per-cell flags, and the overlay sub-view. Renderers never
//! look at [`PickerState`] directly.

use crate::dates::{days_in_month, first_day_column, is_weekend, rotate_weekdays};
use crate::model::{OverlayToken, PickerId, PickerState};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    /// 1-based grid column (1 = the configured start day).
    pub column: u32,
    pub is_selected: bool,
    pub is_disabled: bool,
    pub is_today: bool,
    pub is_weekend: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayView {
    pub is_showing: bool,
    pub token: OverlayToken,
    pub class_name: String,
    pub input: String,
    pub is_submit_enabled: bool,
    pub months: Vec<String>,
    /// 0-based month currently displayed, for highlighting.
    pub current_month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub picker: PickerId,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub weekdays: Vec<String>,
    /// Empty cells before the 1st.
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
    pub is_calendar_showing: bool,
    pub overlay: OverlayView,
    pub selected_date: Option<NaiveDate>,
    /// `Some("start")`/`Some("end")` for linked range pickers.
    pub pair_role: Option<&'static str>,
}

impl CalendarView {
    pub fn build(state: &PickerState, today: NaiveDate) -> Self {
        let current = state.current_date;
        let (year, month) = (current.year(), current.month());
        let first_column = first_day_column(current, state.start_day);

        let days = (1..=days_in_month(year, month))
            .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
            .map(|date| DayCell {
                day: date.day(),
                date,
                column: (first_column - 1 + date.day0()) % 7 + 1,
                is_selected: state.selected_date == Some(date),
                is_disabled: !state.constraints.allows(date),
                is_today: date == today,
                is_weekend: is_weekend(date),
            })
            .collect();

        let pair_role = match (state.is_first(), state.sibling()) {
            (Some(true), Some(_)) => Some("start"),
            (Some(false), Some(_)) => Some("end"),
            _ => None,
        };

        Self {
            picker: state.id,
            year,
            month,
            month_name: state.labels.months[current.month0() as usize].clone(),
            weekdays: rotate_weekdays(&state.labels.days, state.start_day),
            leading_blanks: first_column - 1,
            days,
            is_calendar_showing: state.is_calendar_showing,
            overlay: OverlayView {
                is_showing: state.is_overlay_showing,
                token: state.overlay_token,
                class_name: state.overlay_token.class_name().to_string(),
                input: state.overlay_input.clone(),
                is_submit_enabled: state.is_submit_enabled(),
                months: state.labels.overlay_months.clone(),
                current_month: current.month0(),
            },
            selected_date: state.selected_date,
            pair_role,
        }
    }

    pub fn cell(&self, day: u32) -> Option<&DayCell> {
        self.days.iter().find(|cell| cell.day == day)
    }

    pub fn selected_cells(&self) -> impl Iterator<Item = &DayCell> {
        self.days.iter().filter(|cell| cell.is_selected)
    }

    pub fn disabled_count(&self) -> usize {
        self.days.iter().filter(|cell| cell.is_disabled).count()
    }

    /// Day cells split into week rows, `None` marking empty grid slots.
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        let mut slots: Vec<Option<&DayCell>> = (0..self.leading_blanks).map(|_| None).collect();
        slots.extend(self.days.iter().map(Some));
        while slots.len() % 7 != 0 {
            slots.push(None);
        }
        slots.chunks(7).map(|week| week.to_vec()).collect()
    }
}
