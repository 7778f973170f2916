//! Fixtures shared by unit and integration tests.

use crate::commands::{create, Workspace};
use crate::config::PickerOptions;
use crate::dates::sibling_date;
use crate::host::{Document, HostId};
use crate::model::{Callbacks, PickerId, PickerState};
use crate::render::ViewCache;
use crate::view::CalendarView;
use chrono::NaiveDate;

pub const PAIR_ID: &str = "trip";

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// A document with three inputs (`input-a`..`input-c`) and two containers
/// (`div-a`, `div-b`), and a recording renderer.
pub struct TestEnv {
    pub ws: Workspace<ViewCache>,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let mut document = Document::new();
        for id in ["input-a", "input-b", "input-c"] {
            document.add_input(id);
        }
        for id in ["div-a", "div-b"] {
            document.add_container(id);
        }
        Self {
            ws: Workspace::new(document, ViewCache::new()),
        }
    }

    /// Picker on `input-a`.
    pub fn single(&mut self, options: PickerOptions) -> PickerId {
        self.single_on("input-a", options)
    }

    pub fn single_on(&mut self, host: &str, options: PickerOptions) -> PickerId {
        self.create(host, options, Callbacks::new())
    }

    pub fn single_with(
        &mut self,
        options: PickerOptions,
        callbacks: impl FnOnce(Callbacks) -> Callbacks,
    ) -> PickerId {
        self.create("input-a", options, callbacks(Callbacks::new()))
    }

    /// Range pair on `input-a` (first) and `input-b` (second).
    ///
    /// When `options` has a start date, the second picker starts one offset
    /// later, the way range calendars are laid out side by side.
    pub fn pair(&mut self, options: PickerOptions) -> (PickerId, PickerId) {
        self.pair_with(options, |cb| cb, |cb| cb)
    }

    pub fn pair_with(
        &mut self,
        options: PickerOptions,
        first_callbacks: impl FnOnce(Callbacks) -> Callbacks,
        second_callbacks: impl FnOnce(Callbacks) -> Callbacks,
    ) -> (PickerId, PickerId) {
        let options = options.with_pair_id(PAIR_ID);
        let second_options = PickerOptions {
            start_date: options
                .start_date
                .map(|d| sibling_date(true, d, options.sibling_offset_months)),
            ..options.clone()
        };
        let first = self.create("input-a", options, first_callbacks(Callbacks::new()));
        let second = self.create("input-b", second_options, second_callbacks(Callbacks::new()));
        (first, second)
    }

    pub fn state(&self, id: PickerId) -> &PickerState {
        self.ws.registry.get(id).expect("live picker")
    }

    /// Last view handed to the renderer.
    pub fn view(&self, id: PickerId) -> &CalendarView {
        self.ws.renderer.view(id).expect("picker was rendered")
    }

    pub fn host_value(&self, host: &str) -> String {
        self.ws
            .document
            .get(&HostId::new(host))
            .map(|el| el.value.clone())
            .unwrap_or_default()
    }

    pub fn host_position(&self, host: &str) -> Option<String> {
        self.ws
            .document
            .get(&HostId::new(host))
            .and_then(|el| el.position.clone())
    }

    fn create(&mut self, host: &str, options: PickerOptions, callbacks: Callbacks) -> PickerId {
        create::run(&mut self.ws, &format!("#{}", host), options, callbacks)
            .expect("picker created")
            .created
            .expect("create reports the new id")
    }
}
