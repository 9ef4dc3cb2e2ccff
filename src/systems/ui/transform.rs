use bevy::prelude::*;

const DEGENERATE_SCALE: f32 = 1e-8;

/// Similarity transform (translation, rotation, uniform scale) used by the widget tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl NodeTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: 1.0,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// `self` applied after `child`: the world transform of a node whose parent sits at
    /// `self` and whose own local transform is `child`.
    pub fn compose(&self, child: &NodeTransform) -> NodeTransform {
        NodeTransform {
            translation: self.transform_point(child.translation),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (point * self.scale)
    }

    /// Maps a world-space ray into this node's local frame. Both origin and direction
    /// are divided by the scale, so a ray parameter keeps its world-space meaning.
    /// Returns `None` when the scale is degenerate.
    pub fn to_local_ray(&self, origin: Vec3, direction: Vec3) -> Option<(Vec3, Vec3)> {
        if self.scale.abs() < DEGENERATE_SCALE || !self.scale.is_finite() {
            return None;
        }
        let inverse = self.rotation.inverse();
        let local_origin = inverse * (origin - self.translation) / self.scale;
        let local_direction = inverse * direction / self.scale;
        Some((local_origin, local_direction))
    }

    pub fn from_global(global: &GlobalTransform) -> Self {
        let (scale, rotation, translation) = global.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale: scale.x,
        }
    }

    pub fn to_transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: self.rotation,
            scale: Vec3::splat(self.scale),
        }
    }
}

/// Euler XYZ angles in degrees to a rotation.
pub fn euler_degrees(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        degrees.x.to_radians(),
        degrees.y.to_radians(),
        degrees.z.to_radians(),
    )
}
