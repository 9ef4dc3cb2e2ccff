use bevy::prelude::*;

pub const SUBLABEL_SCALE: f32 = 0.7;
pub const SUBLABEL_DEPTH: f32 = -0.5;
const SPACE_ADVANCE: f32 = 2.0;
const SUBLABEL_SPACE_ADVANCE: f32 = 1.5;
const MISSING_GLYPH_ADVANCE: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedGlyph {
    pub glyph: char,
    pub offset: Vec3,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    pub spacing: f32,
    pub scale: f32,
    pub space_advance: f32,
    pub depth: f32,
}

impl LabelStyle {
    pub fn title(spacing: f32, scale: f32) -> Self {
        Self {
            spacing,
            scale,
            space_advance: SPACE_ADVANCE,
            depth: 0.0,
        }
    }

    pub fn sublabel(spacing: f32, scale: f32) -> Self {
        Self {
            spacing: spacing * SUBLABEL_SCALE,
            scale: scale * SUBLABEL_SCALE,
            space_advance: SUBLABEL_SPACE_ADVANCE,
            depth: SUBLABEL_DEPTH,
        }
    }
}

/// Lays `text` out left to right, upper-cased, and centers the run on zero.
///
/// Spaces advance by a multiple of the spacing and emit nothing. Glyphs the font
/// lacks advance by half the spacing and are skipped.
pub fn layout_glyphs(
    text: &str,
    style: &LabelStyle,
    has_glyph: impl Fn(char) -> bool,
) -> Vec<PlacedGlyph> {
    let mut placed = Vec::new();
    let mut cursor = 0.0;
    for glyph in text.chars().map(|glyph| glyph.to_ascii_uppercase()) {
        if glyph == ' ' {
            cursor += style.spacing * style.space_advance;
        } else if !has_glyph(glyph) {
            cursor += style.spacing * MISSING_GLYPH_ADVANCE;
        } else {
            placed.push(PlacedGlyph {
                glyph,
                offset: Vec3::new(cursor, 0.0, style.depth),
                scale: style.scale,
            });
            cursor += style.spacing;
        }
    }

    let width = cursor - style.spacing;
    let shift = width / 2.0;
    for glyph in &mut placed {
        glyph.offset.x -= shift;
    }
    placed
}
