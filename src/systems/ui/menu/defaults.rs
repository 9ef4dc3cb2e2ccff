//! The stock menu: a paged grid of slot buttons on the main panel and a settings
//! panel of `[-] value [+]` rows.
use super::*;

pub const SLOT_SIZE: f32 = 2.0;
pub const GRID_PAGE_SIZE: usize = 9;
const SETTINGS_SPACING: f32 = 1.5;
const ROW_SPACING: f32 = 0.4;
const NAV_SPACING: f32 = 1.0;

/// One adjustable float setting on the settings panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettingRow {
    pub title: &'static str,
    pub key: &'static str,
    pub step: f32,
}

pub const SETTING_ROWS: [SettingRow; 7] = [
    SettingRow { title: "Menu Scale", key: "menu_scale", step: 0.05 },
    SettingRow { title: "Button Spacing", key: "button_spacing", step: 0.1 },
    SettingRow { title: "Pos Y (Forward)", key: "menu_offset_y", step: 0.5 },
    SettingRow { title: "Pos Z (Up)", key: "menu_offset_z", step: 0.5 },
    SettingRow { title: "Rot X (Pitch)", key: "menu_rot_x", step: 5.0 },
    SettingRow { title: "Rot Y (Roll)", key: "menu_rot_y", step: 5.0 },
    SettingRow { title: "Rot Z (Yaw)", key: "menu_rot_z", step: 5.0 },
];

/// Handles to the widgets of the stock menu.
#[derive(Clone, Debug, PartialEq)]
pub struct DefaultMenu {
    pub main_panel: WidgetId,
    pub grid: WidgetId,
    pub slots: Vec<WidgetId>,
    pub settings_panel: WidgetId,
}

pub fn build_default_menu(menu: &mut VrMenu) -> Result<DefaultMenu, MenuError> {
    let main_panel = menu.create_panel(MAIN_PANEL);
    let spacing = menu.settings().button_spacing;
    let grid = menu.create_container(MAIN_GRID, LayoutMode::Grid, spacing);
    menu.set_page_size(grid, GRID_PAGE_SIZE)?;

    let slot_definitions = menu.settings().slots.clone();
    let mut slots = Vec::with_capacity(slot_definitions.len());
    for (index, slot) in slot_definitions.iter().enumerate() {
        let mut button = ButtonState::new(slot.label.as_str())
            .with_sublabel(slot.sublabel.as_str())
            .with_slot(index);
        if !slot.mesh.is_empty() {
            button = button.with_mesh(slot.mesh.as_str());
        }
        if !slot.texture.is_empty() {
            button = button.with_texture(slot.texture.as_str());
        }
        let id = menu.spawn(
            WidgetNode::new(slot.action.as_str(), WidgetKind::Button(button))
                .with_size(SLOT_SIZE, SLOT_SIZE),
        );
        if let Some(action) = MenuAction::from_slot_action(&slot.action, MAIN_GRID) {
            menu.bind(id, WidgetTrigger::Press, action)?;
        }
        menu.add_child(grid, id)?;
        slots.push(id);
    }
    menu.add_child(main_panel, grid)?;

    let settings_panel = build_settings_panel(menu)?;
    menu.set_panel_active(settings_panel, false)?;

    info!(
        "built default menu: {} slot(s) over {} page(s)",
        slots.len(),
        menu.total_pages(grid)
    );
    Ok(DefaultMenu {
        main_panel,
        grid,
        slots,
        settings_panel,
    })
}

fn build_settings_panel(menu: &mut VrMenu) -> Result<WidgetId, MenuError> {
    let panel = menu.spawn(WidgetNode::new(
        SETTINGS_PANEL,
        WidgetKind::Panel(PanelState {
            center_content: true,
            ..PanelState::default()
        }),
    ));
    menu.tree.set_visible(panel, false);
    menu.register_panel(panel)?;

    let column = menu.create_container(
        &format!("{SETTINGS_PANEL}_rows"),
        LayoutMode::ColumnDown,
        SETTINGS_SPACING,
    );
    menu.add_child(panel, column)?;

    for row in SETTING_ROWS {
        let container = menu.create_container(
            &format!("{SETTINGS_PANEL}_row_{}", row.key),
            LayoutMode::RowCentered,
            ROW_SPACING,
        );
        let minus = menu.create_button(&format!("Decr_{}", row.key), "-", 1.2, 0.8);
        let readout = menu.create_button(&format!("Label_{}", row.key), row.title, 5.5, 0.8);
        let plus = menu.create_button(&format!("Incr_{}", row.key), "+", 1.2, 0.8);

        menu.bind(
            minus,
            WidgetTrigger::Press,
            MenuAction::AdjustSetting {
                key: row.key.to_string(),
                step: -row.step,
            },
        )?;
        menu.bind(
            plus,
            WidgetTrigger::Press,
            MenuAction::AdjustSetting {
                key: row.key.to_string(),
                step: row.step,
            },
        )?;
        menu.bind_setting_readout(readout, row.title, row.key)?;

        for widget in [minus, readout, plus] {
            menu.add_child(container, widget)?;
        }
        menu.add_child(column, container)?;
    }

    let padding = menu.create_spacer("Padding", 0.0, 1.0);
    menu.add_child(column, padding)?;

    let nav = menu.create_container(
        &format!("{SETTINGS_PANEL}_nav"),
        LayoutMode::RowCentered,
        NAV_SPACING,
    );
    let back = menu.create_button("Back", "BACK", 3.0, 1.0);
    menu.bind(
        back,
        WidgetTrigger::Press,
        MenuAction::SwitchPanel(MAIN_PANEL.to_string()),
    )?;
    let save = menu.create_button("Save", "SAVE", 3.0, 1.0);
    menu.bind(save, WidgetTrigger::Press, MenuAction::SaveSettings)?;
    menu.add_child(nav, back)?;
    menu.add_child(nav, save)?;
    menu.add_child(column, nav)?;

    Ok(panel)
}
