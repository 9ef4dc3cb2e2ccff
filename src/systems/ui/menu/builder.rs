use super::{defaults::SLOT_SIZE, *};

pub const BUILDER_BUTTON_WIDTH: f32 = 4.0;
pub const BUILDER_BUTTON_HEIGHT: f32 = 1.0;
pub const BUILDER_SLIDER_WIDTH: f32 = 6.0;
const BUILDER_SPACING: f32 = 0.4;

/// Appends widgets to a panel from the top down. Between [`PanelBuilder::begin_row`]
/// and [`PanelBuilder::end_row`] they are placed side by side instead.
pub struct PanelBuilder<'a> {
    menu: &'a mut VrMenu,
    name: String,
    panel: WidgetId,
    column: WidgetId,
    row: Option<WidgetId>,
    rows: usize,
}

impl VrMenu {
    /// Creates and registers a new panel, inactive until opened, with its content
    /// centered on the hand.
    pub fn build_panel(&mut self, name: &str) -> Result<PanelBuilder<'_>, MenuError> {
        if self.panel_named(name).is_some() {
            return Err(MenuError::DuplicatePanel(name.to_string()));
        }
        let panel = self.create_panel(name);
        if let Some(state) = self.tree.get_mut(panel).and_then(|node| node.kind.panel_mut()) {
            state.center_content = true;
        }
        self.set_panel_active(panel, false)?;

        let column = self.create_container(
            &format!("{name}_content"),
            LayoutMode::ColumnDown,
            BUILDER_SPACING,
        );
        self.add_child(panel, column)?;
        debug!("building panel `{name}`");
        Ok(PanelBuilder {
            menu: self,
            name: name.to_string(),
            panel,
            column,
            row: None,
            rows: 0,
        })
    }
}

impl PanelBuilder<'_> {
    pub fn panel(&self) -> WidgetId {
        self.panel
    }

    /// Starts a horizontal row. An open row is closed first.
    pub fn begin_row(&mut self) -> Result<WidgetId, MenuError> {
        self.end_row();
        self.rows += 1;
        let row = self.menu.create_container(
            &format!("{}_row{}", self.name, self.rows),
            LayoutMode::RowCentered,
            BUILDER_SPACING,
        );
        self.menu.add_child(self.column, row)?;
        self.row = Some(row);
        Ok(row)
    }

    /// Returns whether a row was open.
    pub fn end_row(&mut self) -> bool {
        self.row.take().is_some()
    }

    pub fn button(&mut self, label: &str, on_press: MenuAction) -> Result<WidgetId, MenuError> {
        let id = self
            .menu
            .create_button(label, label, BUILDER_BUTTON_WIDTH, BUILDER_BUTTON_HEIGHT);
        self.menu.bind(id, WidgetTrigger::Press, on_press)?;
        self.push(id)
    }

    pub fn toggle(
        &mut self,
        label: &str,
        initial: bool,
        on_toggle: MenuAction,
    ) -> Result<WidgetId, MenuError> {
        let id = self.menu.create_toggle(
            label,
            label,
            initial,
            BUILDER_BUTTON_WIDTH,
            BUILDER_BUTTON_HEIGHT,
        );
        self.menu.bind(id, WidgetTrigger::Toggle, on_toggle)?;
        self.push(id)
    }

    /// A slot-sized button drawn with a custom mesh instead of a label.
    pub fn mesh_button(&mut self, mesh: &str, on_press: MenuAction) -> Result<WidgetId, MenuError> {
        let id = self.menu.spawn(
            WidgetNode::new(mesh, WidgetKind::Button(ButtonState::default().with_mesh(mesh)))
                .with_size(SLOT_SIZE, SLOT_SIZE),
        );
        self.menu.bind(id, WidgetTrigger::Press, on_press)?;
        self.push(id)
    }

    pub fn slider(
        &mut self,
        name: &str,
        range: (f32, f32),
        value: f32,
        on_change: MenuAction,
    ) -> Result<WidgetId, MenuError> {
        let id = self.menu.create_slider(
            name,
            range.0,
            range.1,
            value,
            BUILDER_SLIDER_WIDTH,
            BUILDER_BUTTON_HEIGHT,
        );
        self.menu.bind(id, WidgetTrigger::ValueChanged, on_change)?;
        self.push(id)
    }

    pub fn offset(&mut self, offset: Vec3) -> Result<(), MenuError> {
        self.menu.set_panel_offset(self.panel, offset)
    }

    pub fn scale(&mut self, scale: f32) -> Result<(), MenuError> {
        self.menu.set_panel_scale(self.panel, scale)
    }

    pub fn finish(mut self) -> WidgetId {
        self.end_row();
        info!("built panel `{}`", self.name);
        self.panel
    }

    fn push(&mut self, id: WidgetId) -> Result<WidgetId, MenuError> {
        let parent = self.row.unwrap_or(self.column);
        self.menu.add_child(parent, id)?;
        Ok(id)
    }
}
