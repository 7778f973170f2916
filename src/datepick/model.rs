use crate::constraints::Constraints;
use crate::error::DatepickError;
use crate::host::HostId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Registry handle for a picker. Stays valid (as a tombstone) after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickerId(Uuid);

impl PickerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PickerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.simple().to_string()[..8])
    }
}

/// Which sub-view a picker opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    #[default]
    Calendar,
    Overlay,
}

impl DefaultView {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultView::Calendar => "calendar",
            DefaultView::Overlay => "overlay",
        }
    }
}

impl FromStr for DefaultView {
    type Err = DatepickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calendar" => Ok(DefaultView::Calendar),
            "overlay" => Ok(DefaultView::Overlay),
            other => Err(DatepickError::Validation(format!(
                "defaultView must be 'calendar' or 'overlay', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    Toggle,
    Reset,
}

/// Visual state of the overlay container.
///
/// Calendar-default widgets animate the overlay layer over a resting calendar.
/// Overlay-default widgets rest with the overlay open, so toggling animates the
/// calendar layer instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayToken {
    Rest,
    OverlayIn,
    OverlayOut,
    CalendarIn,
    CalendarOut,
}

impl OverlayToken {
    pub fn class_name(&self) -> &'static str {
        match self {
            OverlayToken::Rest => "dp-overlay-container",
            OverlayToken::OverlayIn => "dp-overlay-container dp-overlay-in",
            OverlayToken::OverlayOut => "dp-overlay-container dp-overlay-out",
            OverlayToken::CalendarIn => "dp-overlay-container dp-calendar-in",
            OverlayToken::CalendarOut => "dp-overlay-container dp-calendar-out",
        }
    }
}

/// Token for the overlay after `action`, given the state *before* it.
pub fn overlay_token(
    action: OverlayAction,
    default_view: DefaultView,
    is_overlay_showing: bool,
) -> OverlayToken {
    match (action, default_view, is_overlay_showing) {
        (OverlayAction::Reset, _, _) => OverlayToken::Rest,
        (OverlayAction::Toggle, DefaultView::Calendar, false) => OverlayToken::OverlayIn,
        (OverlayAction::Toggle, DefaultView::Calendar, true) => OverlayToken::OverlayOut,
        (OverlayAction::Toggle, DefaultView::Overlay, true) => OverlayToken::CalendarIn,
        (OverlayAction::Toggle, DefaultView::Overlay, false) => OverlayToken::CalendarOut,
    }
}

/// Payload of `on_month_change` and `on_select` notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateChange {
    pub prev_date: Option<NaiveDate>,
    /// `None` signals a deselection.
    pub new_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectedRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// One half of a range pair. Holds a handle, never the sibling itself.
///
/// The first picker registered under a pair id waits with `sibling: None`
/// until the second one arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairLink {
    pub pair_id: String,
    pub sibling: Option<PickerId>,
    pub is_first: bool,
}

/// What a picker remembers about the element it is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBinding {
    pub host_id: HostId,
    pub is_input: bool,
    /// Positioning style of the host container before attach.
    pub original_position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub days: Vec<String>,
    pub months: Vec<String>,
    pub overlay_months: Vec<String>,
}

pub type DateChangeFn = Box<dyn FnMut(&DateChange)>;
pub type FormatterFn = Box<dyn Fn(NaiveDate) -> String>;

/// Notification hooks. Unset hooks are no-ops.
#[derive(Default)]
pub struct Callbacks {
    on_month_change: Option<DateChangeFn>,
    on_select: Option<DateChangeFn>,
    formatter: Option<FormatterFn>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_month_change(mut self, f: impl FnMut(&DateChange) + 'static) -> Self {
        self.on_month_change = Some(Box::new(f));
        self
    }

    pub fn on_select(mut self, f: impl FnMut(&DateChange) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    pub fn formatter(mut self, f: impl Fn(NaiveDate) -> String + 'static) -> Self {
        self.formatter = Some(Box::new(f));
        self
    }

    pub(crate) fn month_changed(&mut self, change: &DateChange) {
        if let Some(f) = self.on_month_change.as_mut() {
            f(change);
        }
    }

    pub(crate) fn selected(&mut self, change: &DateChange) {
        if let Some(f) = self.on_select.as_mut() {
            f(change);
        }
    }

    pub(crate) fn format(&self, date: NaiveDate, fallback: &str) -> String {
        match &self.formatter {
            Some(f) => f(date),
            None => date.format(fallback).to_string(),
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_month_change", &self.on_month_change.is_some())
            .field("on_select", &self.on_select.is_some())
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// The full mutable model of one picker.
#[derive(Debug)]
pub struct PickerState {
    pub id: PickerId,
    pub host: HostBinding,
    /// Always the first of a month.
    pub current_date: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub constraints: Constraints,
    pub is_calendar_showing: bool,
    pub is_overlay_showing: bool,
    pub default_view: DefaultView,
    pub overlay_token: OverlayToken,
    pub overlay_input: String,
    pub always_show: bool,
    pub start_day: u8,
    pub labels: Labels,
    pub pair: Option<PairLink>,
    /// Set for pickers created with a pair id, even after demotion.
    pub range_member: bool,
    pub sibling_offset_months: u32,
    pub date_format: String,
    pub callbacks: Callbacks,
}

impl PickerState {
    pub fn is_submit_enabled(&self) -> bool {
        !self.overlay_input.is_empty()
    }

    pub fn is_first(&self) -> Option<bool> {
        self.pair.as_ref().map(|link| link.is_first)
    }

    pub fn sibling(&self) -> Option<PickerId> {
        self.pair.as_ref().and_then(|link| link.sibling)
    }

    /// Text for the bound input field.
    pub fn field_value(&self) -> String {
        self.selected_date
            .map(|d| self.callbacks.format(d, &self.date_format))
            .unwrap_or_default()
    }
}
