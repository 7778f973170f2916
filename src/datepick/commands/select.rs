use crate::commands::{CmdMessage, CmdResult, Relay, RelayTarget, Workspace};
use crate::dates::{ensure_representable, first_of_month, has_month_changed, strip_time, CalendarDate};
use crate::error::Result;
use crate::model::{DateChange, PickerId};
use crate::render::Renderer;
use chrono::NaiveDate;
use tracing::debug;

/// Arguments for [`run`]. Notifications are opt-in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectOptions {
    /// `None` deselects.
    pub date: Option<NaiveDate>,
    pub change_calendar: bool,
    pub trigger_on_month_change: bool,
    pub trigger_on_select: bool,
}

impl SelectOptions {
    pub fn date(date: impl CalendarDate) -> Self {
        Self {
            date: Some(strip_time(&date)),
            ..Default::default()
        }
    }

    pub fn clear() -> Self {
        Self::default()
    }

    pub fn change_calendar(mut self) -> Self {
        self.change_calendar = true;
        self
    }

    pub fn notify_select(mut self) -> Self {
        self.trigger_on_select = true;
        self
    }

    pub fn notify_month_change(mut self) -> Self {
        self.trigger_on_month_change = true;
        self
    }
}

pub fn run<R: Renderer>(
    ws: &mut Workspace<R>,
    id: PickerId,
    relay: Relay,
    opts: SelectOptions,
) -> Result<CmdResult> {
    let date = opts.date.map(ensure_representable).transpose()?;
    let state = ws.registry.get(id)?;

    if let Some(d) = date {
        if !state.constraints.allows(d) {
            debug!(picker = %id, date = %d, "selection rejected by constraints");
            return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
                "{} is not selectable on picker {}",
                d, id
            ))));
        }
    }

    let target = match RelayTarget::of(state, relay) {
        Some(t) => Some((t.sibling, date.map(|d| t.map(d)))),
        None => None,
    };

    let state = ws.registry.get_mut(id)?;
    let prev_selected = state.selected_date;
    state.selected_date = date;

    if let (Some(d), true) = (date, opts.change_calendar) {
        let prev_month = state.current_date;
        let next_month = first_of_month(d);
        state.current_date = next_month;
        if opts.trigger_on_month_change && has_month_changed(prev_month, next_month) {
            state.callbacks.month_changed(&DateChange {
                prev_date: Some(prev_month),
                new_date: Some(next_month),
            });
        }
    }

    if opts.trigger_on_select {
        state.callbacks.selected(&DateChange {
            prev_date: prev_selected,
            new_date: date,
        });
    }
    debug!(picker = %id, ?prev_selected, ?date, ?relay, "select");

    ws.sync_field(id)?;
    ws.redraw(id)?;

    let mut result = CmdResult::default().touched(id);
    if let Some((sibling, mapped)) = target {
        result.merge(run(
            ws,
            sibling,
            Relay::Sibling,
            SelectOptions {
                date: mapped,
                ..opts
            },
        )?);
    }
    Ok(result)
}
