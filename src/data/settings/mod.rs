//! Runtime-tunable menu settings.
//!
//! Values are read at the point of use, so edits made through [`MenuSettings::set`]
//! or [`MenuSettings::adjust`] take effect on the next frame. Persistence is JSON via
//! serde; every field carries a default so partial documents load cleanly.
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod slots;

pub use slots::{parse_slot_key, SlotDefinition, SlotField, DEFAULT_SLOTS, SLOT_COUNT};

/// Panels are never scaled below this.
pub const MIN_MENU_SCALE: f32 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    UnknownKey(String),
    TypeMismatch { key: String, expected: &'static str },
    NonFinite(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKey(key) => write!(f, "unknown setting `{key}`"),
            Self::TypeMismatch { key, expected } => {
                write!(f, "setting `{key}` expects a {expected} value")
            }
            Self::NonFinite(key) => write!(f, "setting `{key}` must be finite"),
            Self::Parse(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for SettingsError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Float(f32),
    Text(String),
}

impl SettingValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    pub activation_hold_time: f32,
    pub hover_lock_time: f32,
    pub use_left_hand_as_menu: bool,
    pub verbose_logging: bool,

    pub menu_scale: f32,
    pub menu_offset_x: f32,
    pub menu_offset_y: f32,
    pub menu_offset_z: f32,
    pub menu_rot_x: f32,
    pub menu_rot_y: f32,
    pub menu_rot_z: f32,

    pub button_spacing: f32,
    pub button_mesh_scale: f32,
    pub invert_grid_x: bool,

    pub label_scale: f32,
    pub label_spacing: f32,
    pub label_offset_x: f32,
    pub label_offset_y: f32,
    pub label_offset_z: f32,

    pub hitbox_scale: f32,
    pub hit_test_depth: f32,
    pub raycast_max_distance: f32,

    pub haptic_on_hover: bool,
    pub haptic_on_press: bool,
    pub haptic_intensity: f32,
    pub haptic_duration: f32,

    pub entrance_speed: f32,

    pub slots: Vec<SlotDefinition>,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            activation_hold_time: 0.3,
            hover_lock_time: 0.16,
            use_left_hand_as_menu: true,
            verbose_logging: false,

            menu_scale: 0.8,
            menu_offset_x: 0.0,
            menu_offset_y: 10.5,
            menu_offset_z: 1.5,
            menu_rot_x: 90.0,
            menu_rot_y: -20.0,
            menu_rot_z: -90.0,

            button_spacing: 3.6,
            button_mesh_scale: 0.02,
            invert_grid_x: true,

            label_scale: 1.0,
            label_spacing: 0.2,
            label_offset_x: 0.0,
            label_offset_y: 0.3,
            label_offset_z: 0.0,

            hitbox_scale: 1.0,
            hit_test_depth: 1.0,
            raycast_max_distance: 250.0,

            haptic_on_hover: true,
            haptic_on_press: true,
            haptic_intensity: 0.5,
            haptic_duration: 0.04,

            entrance_speed: 4.0,

            slots: DEFAULT_SLOTS.clone(),
        }
    }
}

macro_rules! setting_keys {
    (
        floats: { $($fkey:literal => $ffield:ident),* $(,)? },
        bools: { $($bkey:literal => $bfield:ident),* $(,)? } $(,)?
    ) => {
        impl MenuSettings {
            pub const FLOAT_KEYS: &'static [&'static str] = &[$($fkey),*];
            pub const BOOL_KEYS: &'static [&'static str] = &[$($bkey),*];

            /// Reads a value by its flat key.
            pub fn get(&self, key: &str) -> Option<SettingValue> {
                match key {
                    $($fkey => Some(SettingValue::Float(self.$ffield)),)*
                    $($bkey => Some(SettingValue::Bool(self.$bfield)),)*
                    _ => self.get_slot(key),
                }
            }

            /// Writes a value by its flat key. Type mismatches and non-finite floats
            /// are rejected and leave the stored value untouched.
            pub fn set(&mut self, key: &str, value: SettingValue) -> Result<(), SettingsError> {
                match key {
                    $($fkey => {
                        self.$ffield = Self::finite_float(key, &value)?;
                        Ok(())
                    })*
                    $($bkey => {
                        self.$bfield = value.as_bool().ok_or_else(|| SettingsError::TypeMismatch {
                            key: key.to_string(),
                            expected: "bool",
                        })?;
                        Ok(())
                    })*
                    _ => self.set_slot(key, value),
                }
            }
        }
    };
}

setting_keys! {
    floats: {
        "activation_hold_time" => activation_hold_time,
        "hover_lock_time" => hover_lock_time,
        "menu_scale" => menu_scale,
        "menu_offset_x" => menu_offset_x,
        "menu_offset_y" => menu_offset_y,
        "menu_offset_z" => menu_offset_z,
        "menu_rot_x" => menu_rot_x,
        "menu_rot_y" => menu_rot_y,
        "menu_rot_z" => menu_rot_z,
        "button_spacing" => button_spacing,
        "button_mesh_scale" => button_mesh_scale,
        "label_scale" => label_scale,
        "label_spacing" => label_spacing,
        "label_offset_x" => label_offset_x,
        "label_offset_y" => label_offset_y,
        "label_offset_z" => label_offset_z,
        "hitbox_scale" => hitbox_scale,
        "hit_test_depth" => hit_test_depth,
        "raycast_max_distance" => raycast_max_distance,
        "haptic_intensity" => haptic_intensity,
        "haptic_duration" => haptic_duration,
        "entrance_speed" => entrance_speed,
    },
    bools: {
        "use_left_hand_as_menu" => use_left_hand_as_menu,
        "verbose_logging" => verbose_logging,
        "invert_grid_x" => invert_grid_x,
        "haptic_on_hover" => haptic_on_hover,
        "haptic_on_press" => haptic_on_press,
    },
}

impl MenuSettings {
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json)
            .map_err(|error| SettingsError::Parse(format!("failed to parse menu settings: {error}")))
    }

    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|error| {
            SettingsError::Parse(format!("failed to serialize menu settings: {error}"))
        })
    }

    /// Adds `step` to a float setting and returns the new value. `menu_scale` never
    /// drops below [`MIN_MENU_SCALE`].
    pub fn adjust(&mut self, key: &str, step: f32) -> Result<f32, SettingsError> {
        let current = self
            .get(key)
            .ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?
            .as_float()
            .ok_or_else(|| SettingsError::TypeMismatch {
                key: key.to_string(),
                expected: "float",
            })?;
        let next = match Self::lower_bound(key) {
            Some(floor) => (current + step).max(floor),
            None => current + step,
        };
        self.set(key, SettingValue::Float(next))?;
        Ok(next)
    }

    /// Smallest value [`MenuSettings::adjust`] steps a key down to.
    fn lower_bound(key: &str) -> Option<f32> {
        match key {
            "menu_scale" => Some(MIN_MENU_SCALE),
            _ => None,
        }
    }

    pub fn menu_offset(&self) -> Vec3 {
        Vec3::new(self.menu_offset_x, self.menu_offset_y, self.menu_offset_z)
    }

    /// Euler XYZ rotation, in degrees.
    pub fn menu_rotation_degrees(&self) -> Vec3 {
        Vec3::new(self.menu_rot_x, self.menu_rot_y, self.menu_rot_z)
    }

    pub fn label_offset(&self) -> Vec3 {
        Vec3::new(self.label_offset_x, self.label_offset_y, self.label_offset_z)
    }

    pub fn slot(&self, index: usize) -> Option<&SlotDefinition> {
        self.slots.get(index)
    }

    fn finite_float(key: &str, value: &SettingValue) -> Result<f32, SettingsError> {
        let value = value.as_float().ok_or_else(|| SettingsError::TypeMismatch {
            key: key.to_string(),
            expected: "float",
        })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(SettingsError::NonFinite(key.to_string()))
        }
    }

    fn get_slot(&self, key: &str) -> Option<SettingValue> {
        let (index, field) = parse_slot_key(key)?;
        let slot = self.slots.get(index).cloned().unwrap_or_default();
        let text = match field {
            SlotField::Action => slot.action,
            SlotField::Label => slot.label,
            SlotField::Sublabel => slot.sublabel,
            SlotField::Mesh => slot.mesh,
            SlotField::Texture => slot.texture,
        };
        Some(SettingValue::Text(text))
    }

    fn set_slot(&mut self, key: &str, value: SettingValue) -> Result<(), SettingsError> {
        let (index, field) =
            parse_slot_key(key).ok_or_else(|| SettingsError::UnknownKey(key.to_string()))?;
        let SettingValue::Text(text) = value else {
            return Err(SettingsError::TypeMismatch {
                key: key.to_string(),
                expected: "text",
            });
        };

        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, SlotDefinition::default);
        }
        let slot = &mut self.slots[index];
        match field {
            SlotField::Action => slot.action = text,
            SlotField::Label => slot.label = text,
            SlotField::Sublabel => slot.sublabel = text,
            SlotField::Mesh => slot.mesh = text,
            SlotField::Texture => slot.texture = text,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_layout() {
        let settings = MenuSettings::default();
        assert_eq!(settings.activation_hold_time, 0.3);
        assert_eq!(settings.menu_offset(), Vec3::new(0.0, 10.5, 1.5));
        assert_eq!(settings.menu_rotation_degrees(), Vec3::new(90.0, -20.0, -90.0));
        assert_eq!(settings.raycast_max_distance, 250.0);
        assert!(settings.invert_grid_x);
        assert_eq!(settings.slots.len(), SLOT_COUNT);
    }

    #[test]
    fn get_and_set_by_key() {
        let mut settings = MenuSettings::default();
        settings
            .set("menu_scale", SettingValue::Float(1.25))
            .expect("float key accepts float");
        assert_eq!(settings.get("menu_scale"), Some(SettingValue::Float(1.25)));

        settings
            .set("invert_grid_x", SettingValue::Bool(false))
            .expect("bool key accepts bool");
        assert!(!settings.invert_grid_x);

        settings
            .set("slot3_label", SettingValue::Text("Magic".into()))
            .expect("slot key accepts text");
        assert_eq!(settings.slots[2].label, "Magic");
        assert_eq!(
            settings.get("slot1"),
            Some(SettingValue::Text("Save".into()))
        );
    }

    #[test]
    fn invalid_writes_are_rejected_without_side_effects() {
        let mut settings = MenuSettings::default();
        assert_eq!(
            settings.set("menu_scale", SettingValue::Bool(true)),
            Err(SettingsError::TypeMismatch {
                key: "menu_scale".into(),
                expected: "float"
            })
        );
        assert_eq!(
            settings.set("menu_scale", SettingValue::Float(f32::NAN)),
            Err(SettingsError::NonFinite("menu_scale".into()))
        );
        assert_eq!(
            settings.set("no_such_key", SettingValue::Float(1.0)),
            Err(SettingsError::UnknownKey("no_such_key".into()))
        );
        assert_eq!(settings.menu_scale, 0.8);
    }

    #[test]
    fn adjust_steps_float_settings() {
        let mut settings = MenuSettings::default();
        let next = settings.adjust("menu_scale", 0.05).expect("adjustable");
        assert!((next - 0.85).abs() < 1e-6);
        assert!(settings.adjust("invert_grid_x", 1.0).is_err());
    }

    #[test]
    fn menu_scale_adjust_stops_at_floor() {
        let mut settings = MenuSettings::default();
        for _ in 0..40 {
            settings.adjust("menu_scale", -0.05).expect("adjustable");
        }
        assert_eq!(settings.menu_scale, MIN_MENU_SCALE);
        let back = settings.adjust("menu_scale", 0.05).expect("adjustable");
        assert!((back - (MIN_MENU_SCALE + 0.05)).abs() < 1e-6);

        let offset = settings.adjust("menu_offset_x", -50.0).expect("adjustable");
        assert!(offset < 0.0);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings = MenuSettings::from_json_str(r#"{ "menu_scale": 1.5, "invert_grid_x": false }"#)
            .expect("partial document parses");
        assert_eq!(settings.menu_scale, 1.5);
        assert!(!settings.invert_grid_x);
        assert_eq!(settings.button_spacing, 3.6);
        assert_eq!(settings.slots.len(), SLOT_COUNT);

        let json = settings.to_json_string().expect("serializes");
        assert_eq!(MenuSettings::from_json_str(&json), Ok(settings));

        assert!(matches!(
            MenuSettings::from_json_str("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }
}
