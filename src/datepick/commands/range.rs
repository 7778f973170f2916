use crate::commands::Workspace;
use crate::error::Result;
use crate::model::{PickerId, SelectedRange};
use crate::render::Renderer;

/// `{start, end}` of a linked pair, ordered by role rather than by date.
///
/// `None` for standalone pickers and for pairs still waiting on their second
/// half.
pub fn selected_range<R: Renderer>(
    ws: &Workspace<R>,
    id: PickerId,
) -> Result<Option<SelectedRange>> {
    let state = ws.registry.get(id)?;
    let (Some(is_first), Some(sibling)) = (state.is_first(), state.sibling()) else {
        return Ok(None);
    };
    let other = ws.registry.get(sibling)?;

    let (start, end) = if is_first {
        (state.selected_date, other.selected_date)
    } else {
        (other.selected_date, state.selected_date)
    };
    Ok(Some(SelectedRange { start, end }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::select::{self, SelectOptions};
    use crate::commands::Relay;
    use crate::config::PickerOptions;
    use crate::test_utils::{ymd, TestEnv};

    #[test]
    fn standalone_picker_has_no_range() {
        let mut env = TestEnv::new();
        let id = env.single(PickerOptions::default());
        assert_eq!(selected_range(&env.ws, id).unwrap(), None);
    }

    #[test]
    fn range_follows_roles_not_chronology() {
        let mut env = TestEnv::new();
        let (first, second) = env.pair(PickerOptions {
            start_date: Some(ymd(2023, 2, 1)),
            ..Default::default()
        });
        select::run(
            &mut env.ws,
            first,
            Relay::Origin,
            SelectOptions::date(ymd(2023, 2, 20)),
        )
        .unwrap();
        // Move the end before the start without relaying back.
        select::run(
            &mut env.ws,
            second,
            Relay::Sibling,
            SelectOptions::date(ymd(2023, 1, 3)),
        )
        .unwrap();

        let expected = Some(SelectedRange {
            start: Some(ymd(2023, 2, 20)),
            end: Some(ymd(2023, 1, 3)),
        });
        assert_eq!(selected_range(&env.ws, first).unwrap(), expected);
        assert_eq!(selected_range(&env.ws, second).unwrap(), expected);
    }

    #[test]
    fn waiting_half_has_no_range() {
        let mut env = TestEnv::new();
        let id = env.single(PickerOptions::default().with_pair_id("solo"));
        assert_eq!(selected_range(&env.ws, id).unwrap(), None);
    }
}
