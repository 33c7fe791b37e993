//! Input vocabulary for the selection coordinator
//!
//! Raw keyboard and pointer input is reduced to two things the coordinator
//! understands: modifier key transitions and click positions in normalized
//! device coordinates.

use bevy::input::keyboard::KeyCode;
use bevy::math::{Dir3, Ray3d, Vec2, Vec3};
use bevy::prelude::{Camera, GlobalTransform};
use serde::{Deserialize, Serialize};

/// Key that must be held for clicks to toggle selection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    #[default]
    Shift,
    Control,
    Alt,
    Super,
}

impl ModifierKey {
    /// Left and right physical keys for this modifier
    pub fn key_codes(self) -> [KeyCode; 2] {
        match self {
            ModifierKey::Shift => [KeyCode::ShiftLeft, KeyCode::ShiftRight],
            ModifierKey::Control => [KeyCode::ControlLeft, KeyCode::ControlRight],
            ModifierKey::Alt => [KeyCode::AltLeft, KeyCode::AltRight],
            ModifierKey::Super => [KeyCode::SuperLeft, KeyCode::SuperRight],
        }
    }

    pub fn matches(self, key: KeyCode) -> bool {
        self.key_codes().contains(&key)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModifierKey::Shift => "shift",
            ModifierKey::Control => "control",
            ModifierKey::Alt => "alt",
            ModifierKey::Super => "super",
        }
    }
}

/// A single key going down or coming back up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Pressed(KeyCode),
    Released(KeyCode),
}

/// Convert a cursor position in logical pixels (origin top-left) to
/// normalized device coordinates in [-1, 1] with +y pointing up.
///
/// Returns `None` for a degenerate viewport.
pub fn screen_to_ndc(cursor: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (cursor.x / viewport.x) * 2.0 - 1.0,
        -(cursor.y / viewport.y) * 2.0 + 1.0,
    ))
}

/// Build a world-space picking ray from the camera through an NDC position.
///
/// Bevy uses reverse-z, so the near plane sits at ndc z = 1.
pub fn ray_from_ndc(camera: &Camera, camera_transform: &GlobalTransform, ndc: Vec2) -> Option<Ray3d> {
    let near = camera.ndc_to_world(camera_transform, ndc.extend(1.0))?;
    let far = camera.ndc_to_world(camera_transform, ndc.extend(f32::EPSILON))?;
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Point where `ray` crosses the plane through `origin` with `normal`
pub fn intersect_plane(ray: Ray3d, origin: Vec3, normal: Dir3) -> Option<Vec3> {
    let plane = bevy::math::primitives::InfinitePlane3d { normal };
    ray.intersect_plane(origin, plane)
        .map(|distance| ray.get_point(distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_corners_map_to_ndc_corners() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(
            screen_to_ndc(Vec2::ZERO, viewport),
            Some(Vec2::new(-1.0, 1.0))
        );
        assert_eq!(
            screen_to_ndc(Vec2::new(800.0, 600.0), viewport),
            Some(Vec2::new(1.0, -1.0))
        );
        assert_eq!(
            screen_to_ndc(Vec2::new(400.0, 300.0), viewport),
            Some(Vec2::ZERO)
        );
    }

    #[test]
    fn test_degenerate_viewport_has_no_ndc() {
        assert_eq!(screen_to_ndc(Vec2::new(1.0, 1.0), Vec2::new(0.0, 600.0)), None);
        assert_eq!(screen_to_ndc(Vec2::new(1.0, 1.0), Vec2::new(800.0, 0.0)), None);
    }

    #[test]
    fn test_modifier_matches_both_sides() {
        assert!(ModifierKey::Shift.matches(KeyCode::ShiftLeft));
        assert!(ModifierKey::Shift.matches(KeyCode::ShiftRight));
        assert!(!ModifierKey::Shift.matches(KeyCode::ControlLeft));
        assert!(ModifierKey::Alt.matches(KeyCode::AltRight));
    }

    #[test]
    fn test_ray_hits_facing_plane() {
        let ray = Ray3d::new(Vec3::new(0.0, 0.0, 10.0), Dir3::NEG_Z);
        let point = intersect_plane(ray, Vec3::new(0.0, 0.0, 2.0), Dir3::Z).unwrap();
        assert!((point - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_parallel_ray_misses_plane() {
        let ray = Ray3d::new(Vec3::ZERO, Dir3::X);
        assert_eq!(intersect_plane(ray, Vec3::new(0.0, 0.0, 2.0), Dir3::Z), None);
    }
}
