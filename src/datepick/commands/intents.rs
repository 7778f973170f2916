//! # Intents
//!
//! Discrete user gestures, dispatched synchronously. An intent never mutates a
//! picker itself: it resolves to one or more commands, always as origin calls,
//! so range pairs stay in sync exactly as they do for API calls.

use crate::commands::navigate::{self, NavigateOptions};
use crate::commands::select::{self, SelectOptions};
use crate::commands::{overlay, visibility, CmdResult, Relay, Workspace};
use crate::dates::add_months;
use crate::error::{DatepickError, Result};
use crate::host::HostId;
use crate::model::PickerId;
use crate::render::Renderer;
use chrono::{Datelike, NaiveDate};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Prev,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKey {
    Enter,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Arrow(Arrow),
    /// Day of the displayed month.
    DayClick(u32),
    MonthYearClick,
    /// 0-based month in the overlay grid.
    OverlayMonthClick(u32),
    OverlayClose,
    /// Raw text typed into the overlay year field.
    OverlayInput(String),
    OverlaySubmit,
    OverlayKey(OverlayKey),
    HostFocus,
}

pub fn dispatch<R: Renderer>(
    ws: &mut Workspace<R>,
    id: PickerId,
    intent: Intent,
) -> Result<CmdResult> {
    trace!(picker = %id, ?intent, "dispatch");
    match intent {
        Intent::Arrow(arrow) => {
            let current = ws.registry.get(id)?.current_date;
            let delta = match arrow {
                Arrow::Prev => -1,
                Arrow::Next => 1,
            };
            let target = add_months(current, delta)?;
            navigate::run(ws, id, Relay::Origin, NavigateOptions::to(target))
        }
        Intent::DayClick(day) => day_click(ws, id, day),
        Intent::MonthYearClick => overlay::toggle_overlay(ws, id),
        Intent::OverlayMonthClick(month0) => overlay::pick_month(ws, id, month0),
        Intent::OverlayClose => {
            if ws.registry.get(id)?.is_overlay_showing {
                overlay::toggle_overlay(ws, id)
            } else {
                Ok(CmdResult::default())
            }
        }
        Intent::OverlayInput(text) => overlay::set_year_input(ws, id, &text),
        Intent::OverlaySubmit | Intent::OverlayKey(OverlayKey::Enter) => {
            overlay::submit_year(ws, id)
        }
        Intent::OverlayKey(OverlayKey::Escape) => overlay::toggle_overlay(ws, id),
        Intent::HostFocus => host_focus(ws, id),
    }
}

/// A click anywhere in the document. Clicks outside every picker host close
/// all calendars.
pub fn document_click<R: Renderer>(
    ws: &mut Workspace<R>,
    target: Option<&HostId>,
) -> Result<CmdResult> {
    let on_picker = target.map_or(false, |host| ws.registry.picker_for_host(host).is_some());
    if on_picker {
        return Ok(CmdResult::default());
    }
    visibility::hide_all(ws, None)
}

fn day_click<R: Renderer>(ws: &mut Workspace<R>, id: PickerId, day: u32) -> Result<CmdResult> {
    let state = ws.registry.get(id)?;
    let current = state.current_date;
    let date = NaiveDate::from_ymd_opt(current.year(), current.month(), day).ok_or_else(|| {
        DatepickError::Validation(format!(
            "day {} does not exist in {}",
            day,
            current.format("%B %Y")
        ))
    })?;

    if !state.constraints.allows(date) {
        return Ok(CmdResult::default());
    }

    let opts = if state.selected_date == Some(date) {
        SelectOptions::clear()
    } else {
        SelectOptions::date(date)
    };
    select::run(ws, id, Relay::Origin, opts.notify_select())
}

fn host_focus<R: Renderer>(ws: &mut Workspace<R>, id: PickerId) -> Result<CmdResult> {
    if !ws.registry.get(id)?.host.is_input {
        return Ok(CmdResult::default());
    }
    let mut result = visibility::show(ws, id)?;
    result.merge(visibility::hide_all(ws, Some(id))?);
    Ok(result)
}
