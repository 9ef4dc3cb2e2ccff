use bevy::prelude::*;

use crate::systems::ui::transform::NodeTransform;

pub const PARALLEL_EPSILON: f32 = 1e-8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl PointerRay {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray leaving a controller along its local +Z axis.
    pub fn from_hand(hand: &NodeTransform) -> Self {
        Self {
            origin: hand.translation,
            direction: hand.rotation * Vec3::Z,
        }
    }
}

/// Local-space box centered on a widget: width across X, depth along Y, height along Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionVolume {
    pub half_extents: Vec3,
}

impl InteractionVolume {
    pub fn for_widget(size: Vec2, hitbox_scale: f32, depth: f32) -> Self {
        Self {
            half_extents: Vec3::new(
                size.x * hitbox_scale / 2.0,
                depth,
                size.y * hitbox_scale / 2.0,
            ),
        }
    }

    /// Slab test against a ray already in the box's frame.
    pub fn intersect(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let min = -self.half_extents;
        let max = self.half_extents;
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let (o, d) = (origin[axis], direction[axis]);
            if d.abs() < PARALLEL_EPSILON {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let inverse = 1.0 / d;
            let mut near = (min[axis] - o) * inverse;
            let mut far = (max[axis] - o) * inverse;
            if near > far {
                std::mem::swap(&mut near, &mut far);
            }
            t_min = t_min.max(near);
            t_max = t_max.min(far);
            if t_min > t_max {
                return None;
            }
        }

        let distance = if t_min >= 0.0 { t_min } else { t_max };
        (distance >= 0.0).then_some(distance)
    }
}

/// Distance along `ray` to the widget volume placed at `world`, if it is hit.
pub fn hit_test(world: &NodeTransform, volume: &InteractionVolume, ray: &PointerRay) -> Option<f32> {
    let (origin, direction) = world.to_local_ray(ray.origin, ray.direction)?;
    volume.intersect(origin, direction)
}

/// Nearest candidate strictly inside `max_distance`. Ties keep the earliest candidate.
pub fn closest_hit<T>(
    candidates: impl IntoIterator<Item = (T, Option<f32>)>,
    max_distance: f32,
) -> Option<(T, f32)> {
    let mut best: Option<(T, f32)> = None;
    for (candidate, distance) in candidates {
        let Some(distance) = distance else {
            continue;
        };
        let limit = best.as_ref().map_or(max_distance, |(_, closest)| *closest);
        if distance >= 0.0 && distance < limit {
            best = Some((candidate, distance));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_volume() -> InteractionVolume {
        InteractionVolume {
            half_extents: Vec3::ONE,
        }
    }

    #[test]
    fn straight_ray_hits_front_face() {
        let ray = PointerRay::new(Vec3::new(0.0, -10.0, 0.0), Vec3::Y);
        let distance = hit_test(&NodeTransform::IDENTITY, &unit_volume(), &ray);
        assert!(distance.is_some_and(|distance| (distance - 9.0).abs() < 1e-5));
    }

    #[test]
    fn offset_ray_misses() {
        let ray = PointerRay::new(Vec3::new(5.0, -10.0, 0.0), Vec3::Y);
        assert_eq!(hit_test(&NodeTransform::IDENTITY, &unit_volume(), &ray), None);
    }

    #[test]
    fn origin_inside_reports_exit_distance() {
        let ray = PointerRay::new(Vec3::ZERO, Vec3::Y);
        let distance = unit_volume().intersect(ray.origin, ray.direction);
        assert_eq!(distance, Some(1.0));
    }

    #[test]
    fn box_behind_ray_is_ignored() {
        let ray = PointerRay::new(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        assert_eq!(hit_test(&NodeTransform::IDENTITY, &unit_volume(), &ray), None);
    }

    #[test]
    fn scaled_and_moved_widget_keeps_world_distance() {
        let world = NodeTransform::from_translation(Vec3::new(0.0, 20.0, 0.0)).with_scale(2.0);
        let ray = PointerRay::new(Vec3::ZERO, Vec3::Y);
        let distance = hit_test(&world, &unit_volume(), &ray);
        assert!(distance.is_some_and(|distance| (distance - 18.0).abs() < 1e-4));
    }

    #[test]
    fn degenerate_scale_never_hits() {
        let world = NodeTransform::IDENTITY.with_scale(0.0);
        let ray = PointerRay::new(Vec3::new(0.0, -10.0, 0.0), Vec3::Y);
        assert_eq!(hit_test(&world, &unit_volume(), &ray), None);
    }

    #[test]
    fn widget_volume_uses_width_depth_height() {
        let volume = InteractionVolume::for_widget(Vec2::new(4.0, 2.0), 0.5, 1.0);
        assert_eq!(volume.half_extents, Vec3::new(1.0, 1.0, 0.5));
    }

    #[test]
    fn closest_hit_respects_range_and_order() {
        let hits = [("far", Some(30.0)), ("miss", None), ("near", Some(12.0)), ("tie", Some(12.0))];
        assert_eq!(closest_hit(hits, 250.0), Some(("near", 12.0)));
        assert_eq!(closest_hit(hits, 10.0), None);
    }

    #[test]
    fn hand_ray_points_along_local_z() {
        let hand = NodeTransform::from_translation(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2));
        let ray = PointerRay::from_hand(&hand);
        assert_eq!(ray.origin, Vec3::new(1.0, 2.0, 3.0));
        assert!(ray.direction.abs_diff_eq(Vec3::Y, 1e-6));
    }
}
