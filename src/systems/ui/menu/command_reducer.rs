use super::*;

/// What the menu itself does in response to a fired action.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum CommandEffect {
    TurnPage { container: String, forward: bool },
    SwitchPanel(String),
    CloseMenu,
    AdjustSetting { key: String, step: f32 },
    ForwardOnly,
}

pub(super) fn reduce_menu_action(action: &MenuAction, menu_open: bool) -> CommandEffect {
    match action {
        MenuAction::NextPage(container) => CommandEffect::TurnPage {
            container: container.clone(),
            forward: true,
        },
        MenuAction::PrevPage(container) => CommandEffect::TurnPage {
            container: container.clone(),
            forward: false,
        },
        MenuAction::SwitchPanel(panel) => CommandEffect::SwitchPanel(panel.clone()),
        MenuAction::CloseMenu if menu_open => CommandEffect::CloseMenu,
        MenuAction::AdjustSetting { key, step } => CommandEffect::AdjustSetting {
            key: key.clone(),
            step: *step,
        },
        MenuAction::CloseMenu | MenuAction::SaveSettings | MenuAction::Custom(_) => {
            CommandEffect::ForwardOnly
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_actions_name_their_container() {
        assert_eq!(
            reduce_menu_action(&MenuAction::PrevPage(MAIN_GRID.into()), true),
            CommandEffect::TurnPage {
                container: MAIN_GRID.into(),
                forward: false
            }
        );
    }

    #[test]
    fn close_only_applies_to_an_open_menu() {
        assert_eq!(
            reduce_menu_action(&MenuAction::CloseMenu, true),
            CommandEffect::CloseMenu
        );
        assert_eq!(
            reduce_menu_action(&MenuAction::CloseMenu, false),
            CommandEffect::ForwardOnly
        );
    }

    #[test]
    fn host_actions_are_only_forwarded() {
        assert_eq!(
            reduce_menu_action(&MenuAction::SaveSettings, true),
            CommandEffect::ForwardOnly
        );
        assert_eq!(
            reduce_menu_action(&MenuAction::Custom("Map".into()), true),
            CommandEffect::ForwardOnly
        );
    }
}
