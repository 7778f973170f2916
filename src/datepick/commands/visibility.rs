use crate::commands::{CmdMessage, CmdResult, Workspace};
use crate::error::Result;
use crate::model::{overlay_token, DefaultView, OverlayAction, PickerId};
use crate::render::Renderer;
use tracing::debug;

/// Opens the calendar, resetting the overlay to its default-view state.
pub fn show<R: Renderer>(ws: &mut Workspace<R>, id: PickerId) -> Result<CmdResult> {
    let state = ws.registry.get_mut(id)?;
    if state.always_show {
        return Ok(always_shown(id));
    }
    state.is_calendar_showing = true;
    state.is_overlay_showing = state.default_view == DefaultView::Overlay;
    state.overlay_token = overlay_token(OverlayAction::Reset, state.default_view, false);
    state.overlay_input.clear();
    debug!(picker = %id, "calendar shown");
    ws.redraw(id)?;
    Ok(CmdResult::default().touched(id))
}

/// Closes the calendar and forces the overlay shut with a resting token.
pub fn hide<R: Renderer>(ws: &mut Workspace<R>, id: PickerId) -> Result<CmdResult> {
    let state = ws.registry.get_mut(id)?;
    if state.always_show {
        return Ok(always_shown(id));
    }
    state.is_calendar_showing = false;
    state.is_overlay_showing = false;
    state.overlay_token = overlay_token(OverlayAction::Reset, state.default_view, false);
    debug!(picker = %id, "calendar hidden");
    ws.redraw(id)?;
    Ok(CmdResult::default().touched(id))
}

pub fn toggle_calendar<R: Renderer>(ws: &mut Workspace<R>, id: PickerId) -> Result<CmdResult> {
    if ws.registry.get(id)?.is_calendar_showing {
        hide(ws, id)
    } else {
        show(ws, id)
    }
}

/// Hides every open calendar except `keep`. Always-shown pickers are skipped.
pub fn hide_all<R: Renderer>(ws: &mut Workspace<R>, keep: Option<PickerId>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for id in ws.registry.ids() {
        if Some(id) == keep {
            continue;
        }
        let state = ws.registry.get(id)?;
        if state.always_show || !state.is_calendar_showing {
            continue;
        }
        result.merge(hide(ws, id)?);
    }
    Ok(result)
}

fn always_shown(id: PickerId) -> CmdResult {
    CmdResult::default().with_message(CmdMessage::info(format!(
        "Picker {} is always shown",
        id
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerOptions;
    use crate::model::OverlayToken;
    use crate::test_utils::TestEnv;

    #[test]
    fn toggle_flips_visibility() {
        let mut env = TestEnv::new();
        let id = env.single(PickerOptions::default());
        assert!(!env.state(id).is_calendar_showing);

        toggle_calendar(&mut env.ws, id).unwrap();
        assert!(env.state(id).is_calendar_showing);
        assert!(env.view(id).is_calendar_showing);

        toggle_calendar(&mut env.ws, id).unwrap();
        assert!(!env.state(id).is_calendar_showing);
    }

    #[test]
    fn always_show_ignores_hide() {
        let mut env = TestEnv::new();
        let id = env.single(PickerOptions {
            always_show: true,
            ..Default::default()
        });
        let result = hide(&mut env.ws, id).unwrap();
        assert!(result.affected.is_empty());
        assert_eq!(result.messages.len(), 1);
        assert!(env.state(id).is_calendar_showing);
    }

    #[test]
    fn hide_closes_overlay_and_show_restores_default_view() {
        let mut env = TestEnv::new();
        let id = env.single(PickerOptions::default());
        show(&mut env.ws, id).unwrap();
        crate::commands::overlay::toggle_overlay(&mut env.ws, id).unwrap();
        assert!(env.state(id).is_overlay_showing);

        hide(&mut env.ws, id).unwrap();
        assert!(!env.state(id).is_overlay_showing);
        assert_eq!(env.state(id).overlay_token, OverlayToken::Rest);

        show(&mut env.ws, id).unwrap();
        assert!(!env.state(id).is_overlay_showing);
        assert_eq!(env.state(id).overlay_token, OverlayToken::Rest);
    }

    #[test]
    fn overlay_default_view_opens_on_overlay() {
        let mut env = TestEnv::new();
        let id = env.single(PickerOptions {
            default_view: DefaultView::Overlay,
            ..Default::default()
        });
        show(&mut env.ws, id).unwrap();
        assert!(env.state(id).is_overlay_showing);
    }

    #[test]
    fn hide_all_keeps_the_focused_picker() {
        let mut env = TestEnv::new();
        let a = env.single(PickerOptions::default());
        let b = env.single_on("input-b", PickerOptions::default());
        let pinned = env.single_on(
            "div-a",
            PickerOptions {
                always_show: true,
                ..Default::default()
            },
        );
        show(&mut env.ws, a).unwrap();
        show(&mut env.ws, b).unwrap();

        let result = hide_all(&mut env.ws, Some(b)).unwrap();
        assert_eq!(result.affected, vec![a]);
        assert!(!env.state(a).is_calendar_showing);
        assert!(env.state(b).is_calendar_showing);
        assert!(env.state(pinned).is_calendar_showing);
    }
}
