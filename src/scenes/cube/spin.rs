//! One-turn spin animation around the Y axis

use bevy::prelude::*;
use std::f32::consts::TAU;

/// Seconds a spin takes
pub const SPIN_DURATION: f32 = 1.0;

/// Ease-out curve: fast start, gentle stop
pub fn ease_power1_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    from: f32,
    to: f32,
    elapsed: f32,
}

/// Y rotation of the cube mesh, optionally animating toward a full turn
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Spin {
    pub angle: f32,
    tween: Option<Tween>,
}

impl Spin {
    /// Begin a full turn from the current angle, replacing any running one
    pub fn start(&mut self) {
        self.tween = Some(Tween {
            from: self.angle,
            to: self.angle + TAU,
            elapsed: 0.0,
        });
    }

    pub fn is_spinning(&self) -> bool {
        self.tween.is_some()
    }

    /// Advance by `delta` seconds and return the new angle
    pub fn advance(&mut self, delta: f32) -> f32 {
        if let Some(tween) = &mut self.tween {
            tween.elapsed += delta;
            let progress = (tween.elapsed / SPIN_DURATION).min(1.0);
            self.angle = tween.from + (tween.to - tween.from) * ease_power1_out(progress);
            if progress >= 1.0 {
                self.angle = tween.to.rem_euclid(TAU);
                self.tween = None;
            }
        }
        self.angle
    }
}

/// Fired by the debug panel's spin action
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SpinRequested;

pub fn start_spin(mut requests: EventReader<SpinRequested>, mut spins: Query<&mut Spin>) {
    if requests.read().count() == 0 {
        return;
    }
    for mut spin in &mut spins {
        spin.start();
    }
}

pub fn animate_spin(time: Res<Time>, mut spins: Query<(&mut Spin, &mut Transform)>) {
    for (mut spin, mut transform) in &mut spins {
        if !spin.is_spinning() {
            continue;
        }
        let angle = spin.advance(time.delta_secs());
        transform.rotation = Quat::from_rotation_y(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_power1_out(0.0), 0.0);
        assert_eq!(ease_power1_out(1.0), 1.0);
        assert_eq!(ease_power1_out(2.0), 1.0);
        assert!((ease_power1_out(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_spin_completes_one_turn() {
        let mut spin = Spin::default();
        spin.start();
        assert!(spin.is_spinning());

        let midway = spin.advance(0.5);
        assert!(midway > 0.0 && midway < TAU);

        spin.advance(0.6);
        assert!(!spin.is_spinning());
        assert!(spin.angle.abs() < 1e-4);
    }

    #[test]
    fn test_restart_continues_from_current_angle() {
        let mut spin = Spin::default();
        spin.start();
        let partial = spin.advance(0.25);
        spin.start();
        assert_eq!(spin.advance(0.0), partial);
    }

    #[test]
    fn test_idle_spin_holds_angle() {
        let mut spin = Spin {
            angle: 1.5,
            ..default()
        };
        assert_eq!(spin.advance(10.0), 1.5);
    }
}
