//! `set_min` / `set_max`.
//!
//! Tightening a bound re-validates the selection and clears it when it no
//! longer fits. Loosening never brings a cleared selection back. Bounds relay
//! to the sibling unmapped.

use crate::commands::{CmdMessage, CmdResult, Relay, RelayTarget, Workspace};
use crate::dates::{ensure_representable, strip_time, CalendarDate};
use crate::error::Result;
use crate::model::{DateChange, PickerId};
use crate::render::Renderer;
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl Bound {
    fn name(&self) -> &'static str {
        match self {
            Bound::Min => "min",
            Bound::Max => "max",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoundOptions {
    /// `None` removes the bound.
    pub date: Option<NaiveDate>,
    /// Fire `on_select(prev, None)` when the selection is cleared.
    pub trigger_on_select: bool,
}

impl BoundOptions {
    pub fn at(date: impl CalendarDate) -> Self {
        Self {
            date: Some(strip_time(&date)),
            trigger_on_select: false,
        }
    }

    pub fn unset() -> Self {
        Self::default()
    }

    pub fn notify_select(mut self) -> Self {
        self.trigger_on_select = true;
        self
    }
}

pub fn set_min<R: Renderer>(
    ws: &mut Workspace<R>,
    id: PickerId,
    relay: Relay,
    opts: BoundOptions,
) -> Result<CmdResult> {
    run(ws, id, relay, Bound::Min, opts)
}

pub fn set_max<R: Renderer>(
    ws: &mut Workspace<R>,
    id: PickerId,
    relay: Relay,
    opts: BoundOptions,
) -> Result<CmdResult> {
    run(ws, id, relay, Bound::Max, opts)
}

pub fn run<R: Renderer>(
    ws: &mut Workspace<R>,
    id: PickerId,
    relay: Relay,
    bound: Bound,
    opts: BoundOptions,
) -> Result<CmdResult> {
    let date = opts.date.map(ensure_representable).transpose()?;
    let sibling = RelayTarget::of(ws.registry.get(id)?, relay).map(|t| t.sibling);

    let state = ws.registry.get_mut(id)?;
    match bound {
        Bound::Min => state.constraints.min_date = date,
        Bound::Max => state.constraints.max_date = date,
    }

    let mut result = CmdResult::default().touched(id);
    let cleared = state
        .selected_date
        .filter(|selected| !state.constraints.allows(*selected));
    if let Some(prev) = cleared {
        state.selected_date = None;
        if opts.trigger_on_select {
            state.callbacks.selected(&DateChange {
                prev_date: Some(prev),
                new_date: None,
            });
        }
        result.add_message(CmdMessage::info(format!(
            "Selection {} cleared on picker {} by the new {} bound",
            prev,
            id,
            bound.name()
        )));
    }
    debug!(picker = %id, bound = bound.name(), ?date, ?relay, "bound changed");

    if cleared.is_some() {
        ws.sync_field(id)?;
    }
    ws.redraw(id)?;

    if let Some(sibling) = sibling {
        result.merge(run(ws, sibling, Relay::Sibling, bound, opts)?);
    }
    Ok(result)
}
