use crate::commands::{CmdResult, Relay, RelayTarget, Workspace};
use crate::dates::{ensure_representable, first_of_month, has_month_changed, strip_time, CalendarDate};
use crate::error::Result;
use crate::model::{DateChange, PickerId};
use crate::render::Renderer;
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct NavigateOptions {
    pub date: NaiveDate,
    pub trigger_on_month_change: bool,
}

impl NavigateOptions {
    /// Any time of day on `date` is dropped.
    pub fn to(date: impl CalendarDate) -> Self {
        Self {
            date: strip_time(&date),
            trigger_on_month_change: true,
        }
    }

    pub fn silent(mut self) -> Self {
        self.trigger_on_month_change = false;
        self
    }
}

pub fn run<R: Renderer>(
    ws: &mut Workspace<R>,
    id: PickerId,
    relay: Relay,
    opts: NavigateOptions,
) -> Result<CmdResult> {
    let date = ensure_representable(opts.date)?;
    let target = match RelayTarget::of(ws.registry.get(id)?, relay) {
        Some(t) => Some((t.sibling, t.map(date))),
        None => None,
    };

    let state = ws.registry.get_mut(id)?;
    let prev = state.current_date;
    let next = first_of_month(date);
    state.current_date = next;
    if opts.trigger_on_month_change && has_month_changed(prev, next) {
        state.callbacks.month_changed(&DateChange {
            prev_date: Some(prev),
            new_date: Some(next),
        });
    }
    debug!(picker = %id, from = %prev, to = %next, ?relay, "navigate");
    ws.redraw(id)?;

    let mut result = CmdResult::default().touched(id);
    if let Some((sibling, mapped)) = target {
        result.merge(run(
            ws,
            sibling,
            Relay::Sibling,
            NavigateOptions { date: mapped, ..opts },
        )?);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerOptions;
    use crate::error::DatepickError;
    use crate::test_utils::{ymd, TestEnv};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn feb_2023() -> PickerOptions {
        PickerOptions {
            start_date: Some(ymd(2023, 2, 1)),
            ..Default::default()
        }
    }

    #[test]
    fn navigate_normalizes_to_first_of_month() {
        let mut env = TestEnv::new();
        let id = env.single(feb_2023());
        run(&mut env.ws, id, Relay::Origin, NavigateOptions::to(ymd(2024, 7, 19))).unwrap();
        assert_eq!(env.state(id).current_date, ymd(2024, 7, 1));
    }

    #[test]
    fn round_trip_restores_and_counts_month_changes() {
        let mut env = TestEnv::new();
        let changes = Rc::new(RefCell::new(Vec::new()));
        let seen = changes.clone();
        let id = env.single_with(feb_2023(), move |cb| {
            cb.on_month_change(move |change| seen.borrow_mut().push(*change))
        });

        run(&mut env.ws, id, Relay::Origin, NavigateOptions::to(ymd(2023, 5, 9))).unwrap();
        run(&mut env.ws, id, Relay::Origin, NavigateOptions::to(ymd(2023, 2, 1))).unwrap();
        assert_eq!(env.state(id).current_date, ymd(2023, 2, 1));
        assert_eq!(changes.borrow().len(), 2);

        // Same month, different day: no notification.
        run(&mut env.ws, id, Relay::Origin, NavigateOptions::to(ymd(2023, 2, 20))).unwrap();
        assert_eq!(changes.borrow().len(), 2);
        assert_eq!(
            changes.borrow()[0],
            DateChange {
                prev_date: Some(ymd(2023, 2, 1)),
                new_date: Some(ymd(2023, 5, 1)),
            }
        );
    }

    #[test]
    fn silent_navigate_skips_notification() {
        let mut env = TestEnv::new();
        let count = Rc::new(RefCell::new(0));
        let seen = count.clone();
        let id = env.single_with(feb_2023(), move |cb| {
            cb.on_month_change(move |_| *seen.borrow_mut() += 1)
        });
        run(
            &mut env.ws,
            id,
            Relay::Origin,
            NavigateOptions::to(ymd(2023, 9, 1)).silent(),
        )
        .unwrap();
        assert_eq!(*count.borrow(), 0);
        assert_eq!(env.state(id).current_date, ymd(2023, 9, 1));
    }

    #[test]
    fn navigate_leaves_selection_alone() {
        let mut env = TestEnv::new();
        let id = env.single(PickerOptions {
            selected_date: Some(ymd(2023, 2, 5)),
            ..feb_2023()
        });
        run(&mut env.ws, id, Relay::Origin, NavigateOptions::to(ymd(2023, 8, 1))).unwrap();
        assert_eq!(env.state(id).selected_date, Some(ymd(2023, 2, 5)));
    }

    #[test]
    fn pair_navigation_maps_sibling_by_offset() {
        let mut env = TestEnv::new();
        let (first, second) = env.pair(feb_2023());

        run(&mut env.ws, first, Relay::Origin, NavigateOptions::to(ymd(2023, 6, 1))).unwrap();
        assert_eq!(env.state(first).current_date, ymd(2023, 6, 1));
        assert_eq!(env.state(second).current_date, ymd(2023, 7, 1));

        run(&mut env.ws, second, Relay::Origin, NavigateOptions::to(ymd(2023, 3, 1))).unwrap();
        assert_eq!(env.state(second).current_date, ymd(2023, 3, 1));
        assert_eq!(env.state(first).current_date, ymd(2023, 2, 1));
    }

    #[test]
    fn sibling_relay_is_not_forwarded_back() {
        let mut env = TestEnv::new();
        let (first, second) = env.pair(feb_2023());
        let before = env.ws.renderer.render_count(first);

        let result = run(
            &mut env.ws,
            first,
            Relay::Origin,
            NavigateOptions::to(ymd(2023, 4, 1)),
        )
        .unwrap();
        assert_eq!(result.affected, vec![first, second]);
        assert_eq!(env.ws.renderer.render_count(first), before + 1);
    }

    #[test]
    fn edge_of_supported_span_clamps_the_sibling() {
        let mut env = TestEnv::new();
        let (first, second) = env.pair(feb_2023());

        run(
            &mut env.ws,
            first,
            Relay::Origin,
            NavigateOptions::to(ymd(9999, 12, 15)),
        )
        .unwrap();
        assert_eq!(env.state(first).current_date, ymd(9999, 12, 1));
        assert_eq!(env.state(second).current_date, ymd(9999, 12, 1));

        run(
            &mut env.ws,
            second,
            Relay::Origin,
            NavigateOptions::to(ymd(1, 1, 20)),
        )
        .unwrap();
        assert_eq!(env.state(second).current_date, ymd(1, 1, 1));
        assert_eq!(env.state(first).current_date, ymd(1, 1, 1));
    }

    #[test]
    fn dates_past_the_span_still_fail_untouched() {
        let mut env = TestEnv::new();
        let (first, second) = env.pair(feb_2023());
        let beyond = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();

        let err = run(&mut env.ws, first, Relay::Origin, NavigateOptions::to(beyond)).unwrap_err();
        assert!(matches!(err, DatepickError::OutOfRange(_)));
        assert_eq!(env.state(first).current_date, ymd(2023, 2, 1));
        assert_eq!(env.state(second).current_date, ymd(2023, 3, 1));
    }

    #[test]
    fn removed_picker_cannot_navigate() {
        let mut env = TestEnv::new();
        let id = env.single(feb_2023());
        crate::commands::remove::run(&mut env.ws, id).unwrap();
        let err = run(&mut env.ws, id, Relay::Origin, NavigateOptions::to(ymd(2023, 3, 1)))
            .unwrap_err();
        assert!(matches!(err, DatepickError::AlreadyRemoved));
    }
}
