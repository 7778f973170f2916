//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for every UI client.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Marks calls as origin calls**, so range pairs relay exactly once
//! - **Returns structured types** (`Result<CmdResult>`, plain dates)
//!
//! It holds no business logic and performs no I/O.
//!
//! ## Generic Over Renderer
//!
//! `DatepickApi<R: Renderer>` is generic over the render bridge:
//! - Tests and the CLI: `DatepickApi<ViewCache>`
//! - Headless embedding: `DatepickApi<NullRenderer>`
//!
//! ## Picker handles
//!
//! [`DatepickApi::picker`] returns a [`Picker`], a short-lived handle that
//! offers the per-instance operations. Handles borrow the API, so callbacks
//! and other pickers cannot be touched while an operation runs.

use crate::commands::bounds::{self, BoundOptions};
use crate::commands::intents::{self, Intent};
use crate::commands::navigate::{self, NavigateOptions};
use crate::commands::select::{self, SelectOptions};
use crate::commands::{create, overlay, range, remove, visibility, CmdResult, Relay, Workspace};
use crate::config::PickerOptions;
use crate::dates::CalendarDate;
use crate::error::Result;
use crate::host::{Document, HostId};
use crate::model::{Callbacks, PickerId, SelectedRange};
use crate::render::Renderer;
use chrono::NaiveDate;

pub use crate::commands::bounds::Bound;
pub use crate::commands::intents::{Arrow, OverlayKey};
pub use crate::commands::{CmdMessage, MessageLevel};

pub struct DatepickApi<R: Renderer> {
    ws: Workspace<R>,
}

impl<R: Renderer> DatepickApi<R> {
    pub fn new(document: Document, renderer: R) -> Self {
        Self {
            ws: Workspace::new(document, renderer),
        }
    }

    pub fn create(&mut self, selector: &str, options: PickerOptions) -> Result<CmdResult> {
        create::run(&mut self.ws, selector, options, Callbacks::new())
    }

    pub fn create_with_callbacks(
        &mut self,
        selector: &str,
        options: PickerOptions,
        callbacks: Callbacks,
    ) -> Result<CmdResult> {
        create::run(&mut self.ws, selector, options, callbacks)
    }

    pub fn picker(&mut self, id: PickerId) -> Picker<'_, R> {
        Picker { api: self, id }
    }

    pub fn dispatch(&mut self, id: PickerId, intent: Intent) -> Result<CmdResult> {
        intents::dispatch(&mut self.ws, id, intent)
    }

    pub fn document_click(&mut self, target: Option<&HostId>) -> Result<CmdResult> {
        intents::document_click(&mut self.ws, target)
    }

    /// Live pickers in creation order.
    pub fn pickers(&self) -> Vec<PickerId> {
        self.ws.registry.ids()
    }

    pub fn is_listening(&self) -> bool {
        self.ws.registry.is_listening()
    }

    pub fn document(&self) -> &Document {
        &self.ws.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.ws.document
    }

    pub fn renderer(&self) -> &R {
        &self.ws.renderer
    }
}

/// Per-instance operations on one picker.
pub struct Picker<'a, R: Renderer> {
    api: &'a mut DatepickApi<R>,
    id: PickerId,
}

impl<'a, R: Renderer> Picker<'a, R> {
    pub fn id(&self) -> PickerId {
        self.id
    }

    /// Shows the month of `date`, firing `on_month_change` when it changes.
    pub fn navigate(&mut self, date: impl CalendarDate) -> Result<CmdResult> {
        self.navigate_with(NavigateOptions::to(date))
    }

    pub fn navigate_with(&mut self, opts: NavigateOptions) -> Result<CmdResult> {
        navigate::run(&mut self.api.ws, self.id, Relay::Origin, opts)
    }

    pub fn select_date(&mut self, opts: SelectOptions) -> Result<CmdResult> {
        select::run(&mut self.api.ws, self.id, Relay::Origin, opts)
    }

    pub fn set_min(&mut self, opts: BoundOptions) -> Result<CmdResult> {
        bounds::set_min(&mut self.api.ws, self.id, Relay::Origin, opts)
    }

    pub fn set_max(&mut self, opts: BoundOptions) -> Result<CmdResult> {
        bounds::set_max(&mut self.api.ws, self.id, Relay::Origin, opts)
    }

    pub fn show(&mut self) -> Result<CmdResult> {
        visibility::show(&mut self.api.ws, self.id)
    }

    pub fn hide(&mut self) -> Result<CmdResult> {
        visibility::hide(&mut self.api.ws, self.id)
    }

    pub fn toggle_calendar(&mut self) -> Result<CmdResult> {
        visibility::toggle_calendar(&mut self.api.ws, self.id)
    }

    pub fn toggle_overlay(&mut self) -> Result<CmdResult> {
        overlay::toggle_overlay(&mut self.api.ws, self.id)
    }

    pub fn remove(&mut self) -> Result<CmdResult> {
        remove::run(&mut self.api.ws, self.id)
    }

    pub fn remove_pair(&mut self) -> Result<CmdResult> {
        remove::remove_pair(&mut self.api.ws, self.id)
    }

    pub fn selected_range(&self) -> Result<Option<SelectedRange>> {
        range::selected_range(&self.api.ws, self.id)
    }

    pub fn current_date(&self) -> Result<NaiveDate> {
        Ok(self.api.ws.registry.get(self.id)?.current_date)
    }

    pub fn selected_date(&self) -> Result<Option<NaiveDate>> {
        Ok(self.api.ws.registry.get(self.id)?.selected_date)
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<CmdResult> {
        intents::dispatch(&mut self.api.ws, self.id, intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatepickError;
    use crate::render::ViewCache;
    use crate::test_utils::ymd;

    fn api() -> DatepickApi<ViewCache> {
        let mut document = Document::new();
        document.add_input("start");
        document.add_input("end");
        DatepickApi::new(document, ViewCache::new())
    }

    #[test]
    fn handles_route_to_the_right_picker() {
        let mut api = api();
        let id = api
            .create(
                "#start",
                PickerOptions {
                    start_date: Some(ymd(2023, 2, 1)),
                    ..Default::default()
                },
            )
            .unwrap()
            .created
            .unwrap();

        let mut picker = api.picker(id);
        picker.navigate(ymd(2023, 6, 12)).unwrap();
        picker
            .select_date(SelectOptions::date(ymd(2023, 6, 3)))
            .unwrap();
        assert_eq!(picker.current_date().unwrap(), ymd(2023, 6, 1));
        assert_eq!(picker.selected_date().unwrap(), Some(ymd(2023, 6, 3)));
        assert_eq!(picker.selected_range().unwrap(), None);
        assert_eq!(api.pickers(), vec![id]);
        assert!(api.renderer().view(id).is_some());
    }

    #[test]
    fn accessors_fail_after_remove() {
        let mut api = api();
        let id = api
            .create("#start", PickerOptions::default())
            .unwrap()
            .created
            .unwrap();
        api.picker(id).remove().unwrap();

        let picker = api.picker(id);
        assert!(matches!(
            picker.current_date(),
            Err(DatepickError::AlreadyRemoved)
        ));
        assert!(matches!(
            picker.selected_range(),
            Err(DatepickError::AlreadyRemoved)
        ));
        assert!(!api.is_listening());
    }

    #[test]
    fn timestamps_are_reduced_to_calendar_dates() {
        let mut api = api();
        let id = api
            .create("#start", PickerOptions::default())
            .unwrap()
            .created
            .unwrap();
        let evening = ymd(2023, 2, 5).and_hms_opt(23, 59, 30).unwrap();

        let mut picker = api.picker(id);
        picker.navigate(evening).unwrap();
        picker.select_date(SelectOptions::date(evening)).unwrap();
        picker.set_min(BoundOptions::at(evening)).unwrap();
        assert_eq!(picker.current_date().unwrap(), ymd(2023, 2, 1));
        assert_eq!(picker.selected_date().unwrap(), Some(ymd(2023, 2, 5)));
    }
}
