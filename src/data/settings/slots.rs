use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const SLOTS_PER_PAGE: usize = 9;
pub const SLOT_PAGES: usize = 4;
pub const SLOT_COUNT: usize = SLOTS_PER_PAGE * SLOT_PAGES;

const FIRST_PAGE_ACTIONS: [&str; SLOTS_PER_PAGE] = [
    "Save",
    "Wait",
    "TweenMenu",
    "Inventory",
    "Magic",
    "Map",
    "Journal",
    "None",
    "NextPage",
];

/// Configuration of one of the grid buttons on the main panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotDefinition {
    pub action: String,
    pub label: String,
    pub sublabel: String,
    pub mesh: String,
    pub texture: String,
}

impl Default for SlotDefinition {
    fn default() -> Self {
        Self {
            action: "None".to_string(),
            label: String::new(),
            sublabel: String::new(),
            mesh: String::new(),
            texture: String::new(),
        }
    }
}

impl SlotDefinition {
    fn for_index(index: usize) -> Self {
        let page = index / SLOTS_PER_PAGE;
        let column = index % SLOTS_PER_PAGE;
        let action = if page == 0 {
            FIRST_PAGE_ACTIONS[column]
        } else if column == SLOTS_PER_PAGE - 1 {
            "NextPage"
        } else {
            "None"
        };

        Self {
            action: action.to_string(),
            label: String::new(),
            sublabel: String::new(),
            mesh: format!("immersive_menu/slot{:02}.mesh", index + 1),
            texture: "textures/slot.png".to_string(),
        }
    }
}

pub static DEFAULT_SLOTS: Lazy<Vec<SlotDefinition>> =
    Lazy::new(|| (0..SLOT_COUNT).map(SlotDefinition::for_index).collect());

/// Which field of a slot a settings key addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotField {
    Action,
    Label,
    Sublabel,
    Mesh,
    Texture,
}

/// Parses `slot{n}` / `slot{n}_{field}` keys. Slot numbers are 1-based.
pub fn parse_slot_key(key: &str) -> Option<(usize, SlotField)> {
    let rest = key.strip_prefix("slot")?;
    let (number, field) = match rest.split_once('_') {
        Some((number, suffix)) => {
            let field = match suffix {
                "label" => SlotField::Label,
                "sublabel" => SlotField::Sublabel,
                "mesh" => SlotField::Mesh,
                "image" | "texture" => SlotField::Texture,
                _ => return None,
            };
            (number, field)
        }
        None => (rest, SlotField::Action),
    };

    let number: usize = number.parse().ok()?;
    (1..=SLOT_COUNT)
        .contains(&number)
        .then_some((number - 1, field))
}
