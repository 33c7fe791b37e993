//! Random placement of the draggable boxes

use bevy::prelude::*;
use rand::Rng;

/// Edge length of every box before scaling
pub const BOX_SIZE: f32 = 40.0;

/// Boxes are scattered over x in [-HALF_WIDTH, HALF_WIDTH)
pub const HALF_WIDTH: f32 = 500.0;
/// and z in [-HALF_DEPTH, HALF_DEPTH), all sitting at y = 0
pub const HALF_DEPTH: f32 = 400.0;

/// Per-axis scale range
pub const SCALE_RANGE: std::ops::Range<f32> = 1.0..3.0;

/// Placement and look of one pool box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxLayout {
    pub color: Color,
    pub translation: Vec3,
    pub scale: Vec3,
}

impl BoxLayout {
    pub fn random(rng: &mut impl Rng) -> Self {
        let color = Color::srgb(rng.gen(), rng.gen(), rng.gen());
        let translation = Vec3::new(
            rng.gen_range(-HALF_WIDTH..HALF_WIDTH),
            0.0,
            rng.gen_range(-HALF_DEPTH..HALF_DEPTH),
        );
        let scale = Vec3::new(
            rng.gen_range(SCALE_RANGE),
            rng.gen_range(SCALE_RANGE),
            rng.gen_range(SCALE_RANGE),
        );
        Self {
            color,
            translation,
            scale,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation).with_scale(self.scale)
    }
}

/// Layouts for a whole pool
pub fn random_layouts(rng: &mut impl Rng, count: usize) -> Vec<BoxLayout> {
    (0..count).map(|_| BoxLayout::random(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_layouts_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let layouts = random_layouts(&mut rng, 64);
        assert_eq!(layouts.len(), 64);

        for layout in layouts {
            assert!(layout.translation.x >= -HALF_WIDTH && layout.translation.x < HALF_WIDTH);
            assert_eq!(layout.translation.y, 0.0);
            assert!(layout.translation.z >= -HALF_DEPTH && layout.translation.z < HALF_DEPTH);
            for axis in layout.scale.to_array() {
                assert!(SCALE_RANGE.contains(&axis), "scale {axis} out of range");
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let first = random_layouts(&mut StdRng::seed_from_u64(42), 10);
        let second = random_layouts(&mut StdRng::seed_from_u64(42), 10);
        assert_eq!(first, second);
    }
}
