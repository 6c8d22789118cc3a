//! Pointer-driven tilt of the orb with first-order exponential smoothing.

use glam::{vec3, EulerRot, Quat, Vec2, Vec3};
use log::{debug, info, warn};

use crate::{component::OrbSettings, entity::Orb, window::Size};

pub struct OrientationTracker {
    settings: OrbSettings,
    target: Vec3,
    current: Vec3,
    disposed: bool,
}

impl OrientationTracker {
    pub const MIN_SMOOTHING: f32 = 0.001;
    pub const MAX_SMOOTHING: f32 = 0.999;

    /// Smoothing outside `[MIN_SMOOTHING, MAX_SMOOTHING]` is clamped into it.
    pub fn new(mut settings: OrbSettings) -> Self {
        let smoothing = settings
            .smoothing
            .clamp(Self::MIN_SMOOTHING, Self::MAX_SMOOTHING);
        if smoothing != settings.smoothing {
            warn!(
                "Smoothing {} out of range, using {}",
                settings.smoothing, smoothing
            );
            settings.smoothing = smoothing;
        }

        let rest = vec3(0., 0., settings.baseline_tilt);
        Self {
            settings,
            target: rest,
            current: rest,
            disposed: false,
        }
    }

    /// Maps a pointer position in device pixels to a tilt target. Pointer x
    /// tilts about the Y axis, pointer y about the X axis.
    pub fn set_target(&mut self, pointer: Vec2, viewport: Size) {
        if self.disposed || viewport.is_empty() {
            return;
        }

        let max_tilt = self.settings.max_tilt;
        let tilt = |offset: f32, extent: u32| {
            ((offset / extent as f32 * 2. - 1.) * max_tilt).clamp(-max_tilt, max_tilt)
        };

        self.target = vec3(
            tilt(pointer.y, viewport.height),
            tilt(pointer.x, viewport.width),
            self.settings.baseline_tilt,
        );
        debug!("Orientation target: {:?}", self.target);
    }

    pub fn tick(&mut self, orb: &mut Orb) {
        self.tick_scaled(orb, 1.);
    }

    /// Moves the current orientation towards the target and writes it into
    /// the orb group. The mesh spins independently of the pointer.
    pub fn tick_scaled(&mut self, orb: &mut Orb, step: f32) {
        if self.disposed {
            return;
        }

        let alpha = smoothing_factor(self.settings.smoothing, step);
        self.current += (self.target - self.current) * alpha;

        orb.group.rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.current.x,
            self.current.y,
            self.current.z,
        );
        orb.mesh.rotation *= Quat::from_rotation_y(self.settings.mesh_spin * step);
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        info!("Disposed orientation tracker");
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn current(&self) -> Vec3 {
        self.current
    }

    pub fn smoothing(&self) -> f32 {
        self.settings.smoothing
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Fraction of the remaining distance to cover in `step` ticks. Equal to
/// `smoothing` for a single tick and always within (0, 1) for a positive step.
fn smoothing_factor(smoothing: f32, step: f32) -> f32 {
    if step == 1. {
        smoothing
    } else {
        1. - (1. - smoothing).powf(step)
    }
}

#[cfg(test)]
mod tests {
    use glam::vec2;
    use test_case::test_case;

    use super::*;

    const VIEWPORT: Size = Size {
        width: 1000,
        height: 500,
    };

    #[test]
    fn starts_at_baseline_tilt() {
        let tracker = OrientationTracker::new(OrbSettings::default());
        let rest = vec3(0., 0., OrbSettings::default().baseline_tilt);

        assert_eq!(tracker.target(), rest);
        assert_eq!(tracker.current(), rest);
    }

    #[test_case(10_000., 0.2 ; "far right pins to max")]
    #[test_case(-10_000., -0.2 ; "far left pins to min")]
    #[test_case(500., 0. ; "center is level")]
    #[test_case(750., 0.1 ; "three quarters is half tilt")]
    fn pointer_x_maps_to_y_tilt(x: f32, expected: f32) {
        let mut tracker = OrientationTracker::new(OrbSettings::default());
        tracker.set_target(vec2(x, 250.), VIEWPORT);

        assert!((tracker.target().y - expected).abs() < 1e-6);
        assert!(tracker.target().x.abs() < 1e-6);
    }

    #[test]
    fn pointer_y_maps_to_x_tilt() {
        let mut tracker = OrientationTracker::new(OrbSettings::default());
        tracker.set_target(vec2(500., 5_000.), VIEWPORT);
        assert_eq!(tracker.target().x, 0.2);

        tracker.set_target(vec2(500., -5_000.), VIEWPORT);
        assert_eq!(tracker.target().x, -0.2);
    }

    #[test]
    fn target_z_is_pinned_to_baseline() {
        let settings = OrbSettings::default();
        let mut tracker = OrientationTracker::new(settings);
        tracker.set_target(vec2(3., 7.), VIEWPORT);

        assert_eq!(tracker.target().z, settings.baseline_tilt);
    }

    #[test]
    fn set_target_leaves_current_alone() {
        let mut tracker = OrientationTracker::new(OrbSettings::default());
        let before = tracker.current();
        tracker.set_target(vec2(1000., 0.), VIEWPORT);

        assert_eq!(tracker.current(), before);
    }

    #[test]
    fn empty_viewport_is_ignored() {
        let mut tracker = OrientationTracker::new(OrbSettings::default());
        let before = tracker.target();
        tracker.set_target(vec2(10., 10.), Size::new(0, 0));

        assert_eq!(tracker.target(), before);
    }

    #[test]
    fn first_tick_covers_smoothing_fraction() {
        let mut tracker = OrientationTracker::new(OrbSettings::default());
        let mut orb = Orb::default();
        tracker.set_target(vec2(1000., 0.), VIEWPORT);

        tracker.tick(&mut orb);

        assert!((tracker.current().y - 0.2 * 0.1).abs() < 1e-6);
        assert!((tracker.current().x - -0.2 * 0.1).abs() < 1e-6);
    }

    #[test]
    fn converges_monotonically_without_overshoot() {
        let mut tracker = OrientationTracker::new(OrbSettings::default());
        let mut orb = Orb::default();
        tracker.set_target(vec2(1000., 0.), VIEWPORT);
        let target = tracker.target();

        let mut previous = (target - tracker.current()).abs();
        for _ in 0..300 {
            tracker.tick(&mut orb);
            let remaining = target - tracker.current();

            assert!(remaining.x <= 0. && remaining.y >= 0.);
            let remaining = remaining.abs();
            assert!(remaining.x <= previous.x && remaining.y <= previous.y);
            if previous.y > 1e-6 {
                assert!(remaining.y < previous.y);
            }
            previous = remaining;
        }
        assert!(previous.max_element() < 1e-6);
    }

    #[test]
    fn tick_writes_group_rotation_and_spins_mesh() {
        let settings = OrbSettings::default();
        let mut tracker = OrientationTracker::new(settings);
        let mut orb = Orb::tilted(settings.baseline_tilt);

        tracker.tick(&mut orb);

        let expected_group = Quat::from_euler(EulerRot::XYZ, 0., 0., settings.baseline_tilt);
        assert!(orb.group.rotation.abs_diff_eq(expected_group, 1e-6));
        assert!(orb
            .mesh
            .rotation
            .abs_diff_eq(Quat::from_rotation_y(settings.mesh_spin), 1e-6));
    }

    #[test]
    fn larger_step_covers_more_distance_but_never_overshoots() {
        let mut tracker = OrientationTracker::new(OrbSettings::default());
        let mut orb = Orb::default();
        tracker.set_target(vec2(1000., 250.), VIEWPORT);

        tracker.tick_scaled(&mut orb, 3.);

        let expected = 0.2 * (1. - 0.9_f32.powi(3));
        assert!((tracker.current().y - expected).abs() < 1e-6);
        assert!(tracker.current().y < tracker.target().y);
    }

    #[test_case(1.5, OrientationTracker::MAX_SMOOTHING ; "above one is capped")]
    #[test_case(0., OrientationTracker::MIN_SMOOTHING ; "zero is raised")]
    #[test_case(-2., OrientationTracker::MIN_SMOOTHING ; "negative is raised")]
    #[test_case(0.1, 0.1 ; "in range is kept")]
    fn smoothing_is_clamped_into_unit_interval(smoothing: f32, expected: f32) {
        let tracker = OrientationTracker::new(OrbSettings {
            smoothing,
            ..Default::default()
        });
        assert_eq!(tracker.smoothing(), expected);
    }

    #[test]
    fn oversized_smoothing_neither_overshoots_nor_stalls() {
        let mut tracker = OrientationTracker::new(OrbSettings {
            smoothing: 1.5,
            ..Default::default()
        });
        let mut orb = Orb::default();
        tracker.set_target(vec2(1000., 250.), VIEWPORT);

        for _ in 0..5 {
            tracker.tick(&mut orb);
            assert!(tracker.current().y <= tracker.target().y);
        }
        assert!((tracker.current().y - tracker.target().y).abs() < 1e-4);
    }

    #[test]
    fn zero_smoothing_still_converges() {
        let mut tracker = OrientationTracker::new(OrbSettings {
            smoothing: 0.,
            ..Default::default()
        });
        let mut orb = Orb::default();
        tracker.set_target(vec2(1000., 250.), VIEWPORT);

        tracker.tick(&mut orb);

        assert!(tracker.current().y > 0.);
    }

    #[test]
    fn disposed_tracker_ignores_input_and_ticks() {
        let mut tracker = OrientationTracker::new(OrbSettings::default());
        let mut orb = Orb::default();
        tracker.dispose();

        tracker.set_target(vec2(1000., 0.), VIEWPORT);
        tracker.tick(&mut orb);

        assert_eq!(tracker.target().y, 0.);
        assert_eq!(orb, Orb::default());
    }
}
