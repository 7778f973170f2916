use crate::commands::{CmdMessage, CmdResult, Workspace};
use crate::config::PickerOptions;
use crate::constraints::Constraints;
use crate::dates::{first_of_month, today};
use crate::error::Result;
use crate::host::HostKind;
use crate::model::{
    overlay_token, Callbacks, DefaultView, HostBinding, Labels, OverlayAction, PairLink,
    PickerId, PickerState,
};
use crate::render::Renderer;
use tracing::{debug, warn};

/// Attaches a new picker to the element matched by `selector`.
///
/// Everything that can fail (option validation, selector resolution, host and
/// pair availability) is checked before the host document is touched.
pub fn run<R: Renderer>(
    ws: &mut Workspace<R>,
    selector: &str,
    options: PickerOptions,
    callbacks: Callbacks,
) -> Result<CmdResult> {
    options.validate()?;
    let host_id = ws.document.resolve(selector)?;
    ws.registry.ensure_host_free(&host_id)?;
    if let Some(pair_id) = options.id.as_deref() {
        ws.registry.waiting_partner(pair_id)?;
    }

    let constraints = Constraints {
        min_date: options.min_date,
        max_date: options.max_date,
        disabled_dates: options.disabled_dates.iter().copied().collect(),
        no_weekends: options.no_weekends,
    };

    let selected_date = match options.selected_date {
        Some(date) if !constraints.allows(date) => {
            warn!(%date, "initial selectedDate is not selectable, ignoring it");
            None
        }
        other => other,
    };

    let is_input = ws
        .document
        .get(&host_id)
        .map_or(false, |el| el.kind == HostKind::Input);
    let original_position = ws.document.attach_positioning(&host_id);

    let state = PickerState {
        id: PickerId::new(),
        host: HostBinding {
            host_id: host_id.clone(),
            is_input,
            original_position: original_position.clone(),
        },
        current_date: first_of_month(options.start_date.unwrap_or_else(today)),
        selected_date,
        constraints,
        is_calendar_showing: options.always_show,
        is_overlay_showing: options.default_view == DefaultView::Overlay,
        default_view: options.default_view,
        overlay_token: overlay_token(OverlayAction::Reset, options.default_view, false),
        overlay_input: String::new(),
        always_show: options.always_show,
        start_day: options.start_day(),
        labels: Labels {
            days: options.days(),
            months: options.months(),
            overlay_months: options.overlay_months(),
        },
        pair: options.id.clone().map(|pair_id| PairLink {
            pair_id,
            sibling: None,
            is_first: true,
        }),
        range_member: options.id.is_some(),
        sibling_offset_months: options.sibling_offset_months,
        date_format: options.date_format().to_string(),
        callbacks,
    };

    let id = match ws.registry.register(state) {
        Ok(id) => id,
        Err(e) => {
            ws.document.restore_positioning(&host_id, original_position);
            return Err(e);
        }
    };
    debug!(picker = %id, host = %host_id, "picker created");

    ws.redraw(id)?;
    ws.sync_field(id)?;

    let state = ws.registry.get(id)?;
    if let (Some(false), Some(first)) = (state.is_first(), state.sibling()) {
        // The waiting half only now learns its role.
        ws.redraw(first)?;
    }

    let role = match ws.registry.get(id)?.is_first() {
        Some(true) => " as range start",
        Some(false) => " as range end",
        None => "",
    };
    let mut result = CmdResult::default().touched(id);
    result.created = Some(id);
    result.add_message(CmdMessage::success(format!(
        "Attached picker {} to {}{}",
        id, host_id, role
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatepickError;
    use crate::test_utils::{ymd, TestEnv};

    #[test]
    fn creates_standalone_picker_with_normalized_start() {
        let mut env = TestEnv::new();
        let id = env.single(PickerOptions {
            start_date: Some(ymd(2023, 2, 17)),
            ..Default::default()
        });

        let state = env.state(id);
        assert_eq!(state.current_date, ymd(2023, 2, 1));
        assert!(state.pair.is_none());
        assert!(!state.range_member);
        assert!(!state.is_calendar_showing);
        assert!(env.ws.registry.is_listening());
        assert_eq!(env.ws.renderer.render_count(id), 1);
    }

    #[test]
    fn unselectable_initial_selection_is_dropped() {
        let mut env = TestEnv::new();
        let id = env.single(PickerOptions {
            start_date: Some(ymd(2023, 2, 1)),
            selected_date: Some(ymd(2023, 2, 3)),
            min_date: Some(ymd(2023, 2, 10)),
            ..Default::default()
        });
        assert_eq!(env.state(id).selected_date, None);
    }

    #[test]
    fn initial_selection_fills_input_value() {
        let mut env = TestEnv::new();
        env.single(PickerOptions {
            selected_date: Some(ymd(2023, 2, 5)),
            ..Default::default()
        });
        assert_eq!(env.host_value("input-a"), "Sun Feb 05 2023");
    }

    #[test]
    fn one_picker_per_element() {
        let mut env = TestEnv::new();
        env.single(PickerOptions::default());
        let err = run(
            &mut env.ws,
            "#input-a",
            PickerOptions::default(),
            Callbacks::new(),
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(env.ws.registry.len(), 1);
    }

    #[test]
    fn invalid_selector_fails_validation() {
        let mut env = TestEnv::new();
        let err = run(
            &mut env.ws,
            "#nowhere",
            PickerOptions::default(),
            Callbacks::new(),
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert!(env.ws.registry.is_empty());
        assert!(!env.ws.registry.is_listening());
    }

    #[test]
    fn invalid_start_day_leaves_host_untouched() {
        let mut env = TestEnv::new();
        let err = run(
            &mut env.ws,
            "#div-a",
            PickerOptions {
                start_day: 7,
                ..Default::default()
            },
            Callbacks::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("between 0 and 6"));
        assert_eq!(env.host_position("div-a"), None);
    }

    #[test]
    fn pair_ids_link_first_and_second() {
        let mut env = TestEnv::new();
        let (first, second) = env.pair(PickerOptions::default());

        let a = env.state(first).pair.clone().unwrap();
        let b = env.state(second).pair.clone().unwrap();
        assert!(a.is_first);
        assert!(!b.is_first);
        assert_eq!(a.sibling, Some(second));
        assert_eq!(b.sibling, Some(first));
    }

    #[test]
    fn third_picker_with_same_pair_id_is_rejected() {
        let mut env = TestEnv::new();
        env.pair(PickerOptions::default());
        let err = run(
            &mut env.ws,
            "#input-c",
            PickerOptions::default().with_pair_id("trip"),
            Callbacks::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DatepickError::DuplicatePairId(ref id) if id == "trip"));
        assert_eq!(env.ws.registry.len(), 2);
        assert_eq!(env.host_position("input-c"), None);
    }
}
