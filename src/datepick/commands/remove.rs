use crate::commands::{CmdMessage, CmdResult, Workspace};
use crate::error::{DatepickError, Result};
use crate::model::PickerId;
use crate::render::Renderer;
use tracing::debug;

/// Tears a picker down. A second call fails with `AlreadyRemoved`.
pub fn run<R: Renderer>(ws: &mut Workspace<R>, id: PickerId) -> Result<CmdResult> {
    let state = ws.registry.unregister(id)?;
    let host = state.host.host_id.clone();
    ws.document
        .restore_positioning(&host, state.host.original_position.clone());
    ws.renderer.detach(id);
    debug!(picker = %id, host = %host, "picker removed");

    Ok(CmdResult::default()
        .touched(id)
        .with_message(CmdMessage::success(format!(
            "Removed picker {} from {}",
            id, host
        ))))
}

/// Removes both halves of a range pair.
///
/// Either side may already be gone. Called on a removed range member, this
/// still tears down the sibling it was linked to, so repeating the call is a
/// no-op. On a live picker that never belonged to a pair this is a no-op too;
/// a removed one fails with `AlreadyRemoved` like every other operation.
pub fn remove_pair<R: Renderer>(ws: &mut Workspace<R>, id: PickerId) -> Result<CmdResult> {
    let (range_member, sibling, live) = match ws.registry.tombstone(id) {
        Some(tombstone) => (tombstone.range_member, tombstone.sibling, false),
        None => {
            let state = ws.registry.get(id)?;
            (state.range_member, state.sibling(), true)
        }
    };
    if !range_member {
        if !live {
            return Err(DatepickError::AlreadyRemoved);
        }
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "Picker {} is not part of a range pair",
            id
        ))));
    }

    let mut result = if live { run(ws, id)? } else { CmdResult::default() };
    match sibling {
        Some(sibling) if !ws.registry.is_removed(sibling) => result.merge(run(ws, sibling)?),
        _ if !live => result.add_message(CmdMessage::info(format!(
            "Range pair of picker {} is already removed",
            id
        ))),
        _ => {}
    }
    Ok(result)
}
