//! Range pairs driven through the public API only.

use chrono::NaiveDate;
use datepick::api::{Arrow, DatepickApi};
use datepick::commands::intents::Intent;
use datepick::commands::select::SelectOptions;
use datepick::config::PickerOptions;
use datepick::error::DatepickError;
use datepick::host::{Document, HostId};
use datepick::model::{Callbacks, DateChange, PickerId};
use datepick::render::ViewCache;
use std::cell::RefCell;
use std::rc::Rc;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

type Log = Rc<RefCell<Vec<DateChange>>>;

struct Trip {
    api: DatepickApi<ViewCache>,
    start: PickerId,
    end: PickerId,
    start_selects: Log,
    end_selects: Log,
}

fn recording(log: &Log) -> Callbacks {
    let log = Rc::clone(log);
    Callbacks::new().on_select(move |change| log.borrow_mut().push(*change))
}

fn trip() -> Trip {
    let mut document = Document::new();
    document.add_input("depart");
    document.add_input("return");
    let mut api = DatepickApi::new(document, ViewCache::new());

    let start_selects: Log = Rc::default();
    let end_selects: Log = Rc::default();
    let start = api
        .create_with_callbacks(
            "#depart",
            PickerOptions {
                start_date: Some(ymd(2023, 2, 1)),
                ..Default::default()
            }
            .with_pair_id("trip"),
            recording(&start_selects),
        )
        .unwrap()
        .created
        .unwrap();
    let end = api
        .create_with_callbacks(
            "#return",
            PickerOptions {
                start_date: Some(ymd(2023, 3, 1)),
                ..Default::default()
            }
            .with_pair_id("trip"),
            recording(&end_selects),
        )
        .unwrap()
        .created
        .unwrap();

    Trip {
        api,
        start,
        end,
        start_selects,
        end_selects,
    }
}

fn field(api: &DatepickApi<ViewCache>, host: &str) -> String {
    api.document().get(&HostId::new(host)).unwrap().value.clone()
}

#[test]
fn selecting_feb_5_moves_the_end_to_march_5() {
    let mut t = trip();
    t.api
        .picker(t.start)
        .select_date(SelectOptions::date(ymd(2023, 2, 5)).notify_select())
        .unwrap();

    assert_eq!(t.api.picker(t.end).selected_date().unwrap(), Some(ymd(2023, 3, 5)));
    assert_eq!(field(&t.api, "depart"), "Sun Feb 05 2023");
    assert_eq!(field(&t.api, "return"), "Sun Mar 05 2023");

    // Each side hears about its own change exactly once.
    assert_eq!(t.start_selects.borrow().len(), 1);
    assert_eq!(t.end_selects.borrow().len(), 1);
    assert_eq!(t.end_selects.borrow()[0].new_date, Some(ymd(2023, 3, 5)));
}

#[test]
fn navigation_relays_once_in_both_directions() {
    let mut t = trip();
    let before = t.api.renderer().render_count(t.start);
    t.api.picker(t.end).navigate(ymd(2023, 7, 20)).unwrap();
    assert_eq!(t.api.picker(t.end).current_date().unwrap(), ymd(2023, 7, 1));
    assert_eq!(t.api.picker(t.start).current_date().unwrap(), ymd(2023, 6, 1));
    assert_eq!(t.api.renderer().render_count(t.start), before + 1);

    t.api.dispatch(t.start, Intent::Arrow(Arrow::Next)).unwrap();
    assert_eq!(t.api.picker(t.start).current_date().unwrap(), ymd(2023, 7, 1));
    assert_eq!(t.api.picker(t.end).current_date().unwrap(), ymd(2023, 8, 1));
}

#[test]
fn selected_range_follows_roles() {
    let mut t = trip();
    assert_eq!(
        t.api.picker(t.start).selected_range().unwrap().map(|r| (r.start, r.end)),
        Some((None, None))
    );

    t.api
        .picker(t.end)
        .select_date(SelectOptions::date(ymd(2023, 3, 31)))
        .unwrap();
    let from_start = t.api.picker(t.start).selected_range().unwrap().unwrap();
    let from_end = t.api.picker(t.end).selected_range().unwrap().unwrap();
    assert_eq!(from_start, from_end);
    // The mirrored date clamps to the end of February.
    assert_eq!(from_start.start, Some(ymd(2023, 2, 28)));
    assert_eq!(from_start.end, Some(ymd(2023, 3, 31)));
}

#[test]
fn removing_twice_is_reported_and_listener_follows_registry() {
    let mut t = trip();
    assert!(t.api.is_listening());

    t.api.picker(t.end).remove().unwrap();
    let err = t.api.picker(t.end).remove().unwrap_err();
    assert!(matches!(err, DatepickError::AlreadyRemoved));
    assert_eq!(
        err.to_string(),
        "Unable to run a function from a picker that's already removed."
    );

    // The surviving half keeps working on its own.
    t.api
        .picker(t.start)
        .select_date(SelectOptions::date(ymd(2023, 2, 14)))
        .unwrap();
    assert_eq!(t.api.pickers(), vec![t.start]);
    assert!(t.api.is_listening());

    t.api.picker(t.start).remove_pair().unwrap();
    assert!(t.api.pickers().is_empty());
    assert!(!t.api.is_listening());
    assert!(t.api.renderer().view(t.start).is_none());
}

#[test]
fn a_third_picker_cannot_reuse_a_linked_pair_id() {
    let mut t = trip();
    t.api.document_mut().add_input("extra");
    let err = t
        .api
        .create("#extra", PickerOptions::default().with_pair_id("trip"))
        .unwrap_err();
    assert!(matches!(err, DatepickError::DuplicatePairId(ref id) if id == "trip"));
    assert_eq!(t.api.pickers(), vec![t.start, t.end]);
}

#[test]
fn remove_pair_from_a_removed_half_is_idempotent() {
    let mut t = trip();
    t.api.picker(t.start).remove().unwrap();

    let result = t.api.picker(t.start).remove_pair().unwrap();
    assert_eq!(result.affected, vec![t.end]);
    assert!(t.api.pickers().is_empty());
    assert!(!t.api.is_listening());

    let again = t.api.picker(t.start).remove_pair().unwrap();
    assert!(again.affected.is_empty());
    assert!(t.api.picker(t.end).remove_pair().is_ok());
}

#[test]
fn navigating_to_the_last_supported_month_clamps_the_end() {
    let mut t = trip();
    t.api.picker(t.start).navigate(ymd(9999, 12, 15)).unwrap();
    assert_eq!(t.api.picker(t.start).current_date().unwrap(), ymd(9999, 12, 1));
    assert_eq!(t.api.picker(t.end).current_date().unwrap(), ymd(9999, 12, 1));
}
