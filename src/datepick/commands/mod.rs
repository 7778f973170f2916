//! # Command Layer
//!
//! Every picker operation lives here as plain logic over a [`Workspace`]. No
//! terminal, no global state: the workspace carries the registry, the host
//! document and the renderer, and each command returns a [`CmdResult`].
//!
//! ## Relay
//!
//! Mutating commands take a [`Relay`] flag. `Relay::Origin` is used by the API
//! facade and by user intents; after the local mutation the command re-invokes
//! itself on the sibling (if any) with `Relay::Sibling`. A sibling call never
//! relays again, which bounds every operation to at most two pickers and makes
//! recursion between the halves of a pair impossible.
//!
//! The sibling's date is computed *before* anything is mutated, so a mapping
//! that falls outside the supported span fails the whole call cleanly.

use crate::dates::{sibling_date, today};
use crate::error::Result;
use crate::host::Document;
use crate::model::{PickerId, PickerState};
use crate::registry::Registry;
use crate::render::Renderer;
use crate::view::CalendarView;
use chrono::NaiveDate;

pub mod bounds;
pub mod create;
pub mod intents;
pub mod navigate;
pub mod overlay;
pub mod range;
pub mod remove;
pub mod select;
pub mod visibility;

/// Everything a command may touch.
pub struct Workspace<R: Renderer> {
    pub registry: Registry,
    pub document: Document,
    pub renderer: R,
}

impl<R: Renderer> Workspace<R> {
    pub fn new(document: Document, renderer: R) -> Self {
        Self {
            registry: Registry::new(),
            document,
            renderer,
        }
    }

    /// Rebuilds the view for `id` and hands it to the renderer.
    pub(crate) fn redraw(&mut self, id: PickerId) -> Result<()> {
        let state = self.registry.get(id)?;
        let view = CalendarView::build(state, today());
        self.renderer.render(id, &view);
        Ok(())
    }

    /// Writes the formatted selection into an input host.
    pub(crate) fn sync_field(&mut self, id: PickerId) -> Result<()> {
        let state = self.registry.get(id)?;
        if state.host.is_input {
            let value = state.field_value();
            let host = state.host.host_id.clone();
            self.document.set_value(&host, value);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relay {
    /// Called from the outside: apply, then forward to the sibling.
    Origin,
    /// Forwarded by a sibling: apply only.
    Sibling,
}

/// Where (and how) an origin call forwards to the other half of a pair.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RelayTarget {
    pub sibling: PickerId,
    is_first: bool,
    offset_months: u32,
}

impl RelayTarget {
    pub fn of(state: &PickerState, relay: Relay) -> Option<Self> {
        if relay == Relay::Sibling {
            return None;
        }
        let link = state.pair.as_ref()?;
        Some(Self {
            sibling: link.sibling?,
            is_first: link.is_first,
            offset_months: state.sibling_offset_months,
        })
    }

    /// The date the sibling should receive for `date` on this side.
    pub fn map(&self, date: NaiveDate) -> NaiveDate {
        sibling_date(self.is_first, date, self.offset_months)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Set by `create`.
    pub created: Option<PickerId>,
    /// Pickers whose state changed, in the order they changed.
    pub affected: Vec<PickerId>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn touched(mut self, id: PickerId) -> Self {
        self.affected.push(id);
        self
    }

    /// Folds a relayed (or nested) result into this one.
    pub fn merge(&mut self, other: CmdResult) {
        self.affected.extend(other.affected);
        self.messages.extend(other.messages);
        if self.created.is_none() {
            self.created = other.created;
        }
    }
}
