//! # Render Bridge
//!
//! The model asks for redraws through the [`Renderer`] trait and hands over a
//! fully computed [`CalendarView`]. What happens next (terminal output, a
//! widget tree, nothing at all) is up to the implementation.
//!
//! ## Implementations
//!
//! - [`NullRenderer`]: discards every request.
//! - [`ViewCache`]: keeps the latest view per picker and counts redraws. Used
//!   by tests and by the CLI, which renders the cached views once a script has
//!   finished.

use crate::model::PickerId;
use crate::view::CalendarView;
use std::collections::HashMap;

pub trait Renderer {
    /// Redraw the calendar of `id` from `view`.
    fn render(&mut self, id: PickerId, view: &CalendarView);

    /// The picker is gone; drop anything held for it.
    fn detach(&mut self, _id: PickerId) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _id: PickerId, _view: &CalendarView) {}
}

#[derive(Debug, Default, Clone)]
pub struct ViewCache {
    views: HashMap<PickerId, CalendarView>,
    counts: HashMap<PickerId, usize>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, id: PickerId) -> Option<&CalendarView> {
        self.views.get(&id)
    }

    /// Number of redraws requested for `id`, including before detach.
    pub fn render_count(&self, id: PickerId) -> usize {
        self.counts.get(&id).copied().unwrap_or(0)
    }
}

impl Renderer for ViewCache {
    fn render(&mut self, id: PickerId, view: &CalendarView) {
        self.views.insert(id, view.clone());
        *self.counts.entry(id).or_insert(0) += 1;
    }

    fn detach(&mut self, id: PickerId) {
        self.views.remove(&id);
    }
}
