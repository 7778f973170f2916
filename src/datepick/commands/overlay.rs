//! Year/month jump overlay.

use crate::commands::navigate::{self, NavigateOptions};
use crate::commands::{CmdMessage, CmdResult, Relay, Workspace};
use crate::error::{DatepickError, Result};
use crate::model::{overlay_token, OverlayAction, PickerId};
use crate::render::Renderer;
use chrono::{Datelike, NaiveDate};
use tracing::debug;

const MAX_YEAR_DIGITS: usize = 4;

/// Keeps digits only, drops leading zeros, caps at four characters.
pub fn sanitize_year_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .skip_while(|c| *c == '0')
        .take(MAX_YEAR_DIGITS)
        .collect()
}

/// Opens or closes the overlay. Does nothing while the calendar is hidden.
pub fn toggle_overlay<R: Renderer>(ws: &mut Workspace<R>, id: PickerId) -> Result<CmdResult> {
    let state = ws.registry.get_mut(id)?;
    if !state.is_calendar_showing {
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "Calendar of picker {} is hidden, overlay not toggled",
            id
        ))));
    }

    state.overlay_token = overlay_token(
        OverlayAction::Toggle,
        state.default_view,
        state.is_overlay_showing,
    );
    state.is_overlay_showing = !state.is_overlay_showing;
    debug!(picker = %id, open = state.is_overlay_showing, token = ?state.overlay_token, "overlay toggled");
    ws.redraw(id)?;
    Ok(CmdResult::default().touched(id))
}

/// Replaces the overlay's year text with its sanitized form.
pub fn set_year_input<R: Renderer>(
    ws: &mut Workspace<R>,
    id: PickerId,
    raw: &str,
) -> Result<CmdResult> {
    let state = ws.registry.get_mut(id)?;
    state.overlay_input = sanitize_year_input(raw);
    ws.redraw(id)?;
    Ok(CmdResult::default().touched(id))
}

/// Jumps to the typed year (keeping the month) and closes the overlay.
///
/// Ignored while the submit control is disabled.
pub fn submit_year<R: Renderer>(ws: &mut Workspace<R>, id: PickerId) -> Result<CmdResult> {
    let state = ws.registry.get(id)?;
    if !state.is_submit_enabled() {
        return Ok(CmdResult::default());
    }
    let current = state.current_date;
    let year: i32 = state.overlay_input.parse().unwrap_or(current.year());

    let mut result = CmdResult::default();
    if year != current.year() {
        let target = NaiveDate::from_ymd_opt(year, current.month(), 1).unwrap_or(current);
        result.merge(navigate::run(
            ws,
            id,
            Relay::Origin,
            NavigateOptions::to(target),
        )?);
    }
    result.merge(toggle_overlay(ws, id)?);
    Ok(result)
}

/// Jumps to month `month0` (0-based) of the displayed year, then closes the
/// overlay. Ignored while the overlay is closed.
pub fn pick_month<R: Renderer>(
    ws: &mut Workspace<R>,
    id: PickerId,
    month0: u32,
) -> Result<CmdResult> {
    let state = ws.registry.get(id)?;
    if !state.is_overlay_showing {
        return Ok(CmdResult::default());
    }
    let current = state.current_date;

    let mut result = CmdResult::default();
    if month0 != current.month0() {
        let target = current.with_month0(month0).ok_or_else(|| {
            DatepickError::Validation(format!(
                "month index must be between 0 and 11, got {}",
                month0
            ))
        })?;
        result.merge(navigate::run(
            ws,
            id,
            Relay::Origin,
            NavigateOptions::to(target),
        )?);
    }
    result.merge(toggle_overlay(ws, id)?);
    Ok(result)
}
