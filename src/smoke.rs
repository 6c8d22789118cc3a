//! Drifting smoke sprites that are recycled once they leave the viewport.

use std::f32::consts::TAU;

use glam::{vec3, Vec3};
use log::{info, trace};
use rand::Rng;

use crate::{bounds::Bounds, component::SmokeSettings, random::SpanExt, sprite::TextureHandle};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Accumulated rotation about the view axis, in radians.
    pub rotation_z: f32,
    /// Uniform scale, fixed from spawn until disposal.
    pub scale: f32,
    pub texture: TextureHandle,
    /// Number of times this particle has been recycled.
    pub generation: u32,
}

/// A fixed-size population of smoke particles drifting right to left.
pub struct ParticleField<R> {
    settings: SmokeSettings,
    bounds: Bounds,
    particles: Vec<Particle>,
    rng: R,
    disposed: bool,
}

impl<R: Rng> ParticleField<R> {
    pub fn initialize(
        settings: SmokeSettings,
        bounds: Bounds,
        texture: TextureHandle,
        mut rng: R,
    ) -> Self {
        let particles = (0..settings.count)
            .map(|_| Particle {
                position: vec3(
                    rng.sample_span((bounds.left, bounds.right)),
                    rng.sample_span(settings.spawn_y),
                    rng.sample_span(settings.depth),
                ),
                rotation_z: rng.sample_span((0., TAU)),
                scale: rng.sample_span(settings.scale),
                texture,
                generation: 0,
            })
            .collect::<Vec<_>>();
        info!(
            "Initialized smoke field with {} particles within {:?}",
            particles.len(),
            bounds
        );

        Self {
            settings,
            bounds,
            particles,
            rng,
            disposed: false,
        }
    }

    pub fn tick(&mut self) {
        self.tick_scaled(1.);
    }

    /// Advances every particle by `step` ticks' worth of drift and spin.
    pub fn tick_scaled(&mut self, step: f32) {
        if self.disposed {
            return;
        }

        let drift = self.settings.drift_speed * step;
        let spin = self.settings.spin_speed * step;
        let Bounds { left, right } = self.bounds;

        for particle in self.particles.iter_mut() {
            particle.position.x -= drift;
            particle.rotation_z -= spin;

            if particle.position.x < left {
                particle.position.x = right;
                particle.position.y = self.rng.sample_span(self.settings.respawn_y);
                particle.rotation_z = self.rng.sample_span((0., TAU));
                particle.generation += 1;
                trace!(
                    "Recycled particle to {:?} (generation {})",
                    particle.position,
                    particle.generation
                );
            }
        }
    }

    /// Adopts new bounds for future recycle checks and respawns. Live
    /// particles stay where they are.
    pub fn on_bounds_changed(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.particles.clear();
        info!("Disposed smoke field");
    }
}

impl<R> ParticleField<R> {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn field(settings: SmokeSettings, bounds: Bounds) -> ParticleField<Pcg64Mcg> {
        ParticleField::initialize(
            settings,
            bounds,
            TextureHandle::new(1),
            Pcg64Mcg::seed_from_u64(42),
        )
    }

    fn motionless() -> SmokeSettings {
        SmokeSettings {
            drift_speed: 0.,
            spin_speed: 0.,
            ..Default::default()
        }
    }

    #[test]
    fn initial_population_respects_ranges() {
        let settings = SmokeSettings::default();
        let field = field(settings, Bounds::symmetric(20.));

        assert_eq!(field.len(), 50);
        for p in field.particles() {
            assert!(field.bounds().contains(p.position.x));
            assert!((settings.spawn_y.0..settings.spawn_y.1).contains(&p.position.y));
            assert!((settings.depth.0..settings.depth.1).contains(&p.position.z));
            assert!((0. ..TAU).contains(&p.rotation_z));
            assert!((settings.scale.0..settings.scale.1).contains(&p.scale));
            assert_eq!(p.texture, TextureHandle::new(1));
            assert_eq!(p.generation, 0);
        }
    }

    #[test]
    fn tick_drifts_left_and_spins() {
        let settings = SmokeSettings::default();
        let mut field = field(settings, Bounds::symmetric(20.));
        field.particles[0].position.x = 5.;
        field.particles[0].rotation_z = 1.;

        field.tick();

        assert!((field.particles[0].position.x - (5. - settings.drift_speed)).abs() < 1e-6);
        assert!((field.particles[0].rotation_z - (1. - settings.spin_speed)).abs() < 1e-6);
    }

    #[test]
    fn particle_past_left_bound_respawns_at_right_bound() {
        let mut field = field(motionless(), Bounds::symmetric(20.));
        field.particles[3].position.x = -20. - 1e-3;

        field.tick();

        assert_eq!(field.particles[3].position.x, 20.);
        assert_eq!(field.particles[3].generation, 1);
    }

    #[test]
    fn respawn_redraws_height_and_rotation_but_keeps_scale() {
        let settings = motionless();
        let mut field = field(settings, Bounds::symmetric(20.));
        for p in field.particles.iter_mut() {
            p.position.x = -25.;
        }
        let before = field.particles.clone();

        field.tick();

        for (old, new) in before.iter().zip(field.particles()) {
            assert_eq!(new.scale, old.scale);
            assert_eq!(new.position.z, old.position.z);
            assert_eq!(new.texture, old.texture);
            assert!((settings.respawn_y.0..settings.respawn_y.1).contains(&new.position.y));
            assert!((0. ..TAU).contains(&new.rotation_z));
        }
    }

    #[test]
    fn particles_stay_within_bounds_after_every_tick() {
        let settings = SmokeSettings {
            drift_speed: 0.7,
            ..Default::default()
        };
        let mut field = field(settings, Bounds::symmetric(5.));

        for _ in 0..500 {
            field.tick();
            assert!(field
                .particles()
                .iter()
                .all(|p| field.bounds().contains(p.position.x)));
        }
    }

    #[test]
    fn shrinking_bounds_is_adopted_lazily() {
        let settings = SmokeSettings {
            drift_speed: 1.,
            spin_speed: 0.,
            ..Default::default()
        };
        let mut field = field(settings, Bounds::symmetric(20.));
        field.particles[0].position.x = 15.;

        field.on_bounds_changed(Bounds::symmetric(10.));
        assert_eq!(field.particles[0].position.x, 15.);

        // 15 -> -10 takes 25 ticks, the 26th crosses the new left bound.
        for _ in 0..25 {
            field.tick();
        }
        assert_eq!(field.particles[0].generation, 0);
        assert!((field.particles[0].position.x - -10.).abs() < 1e-4);

        field.tick();
        assert_eq!(field.particles[0].generation, 1);
        assert_eq!(field.particles[0].position.x, 10.);
    }

    #[test]
    fn tick_scaled_multiplies_drift() {
        let settings = SmokeSettings::default();
        let mut field = field(settings, Bounds::symmetric(20.));
        field.particles[0].position.x = 0.;

        field.tick_scaled(2.5);

        assert!((field.particles[0].position.x + settings.drift_speed * 2.5).abs() < 1e-6);
    }

    #[test]
    fn disposed_field_ignores_ticks() {
        let mut field = field(SmokeSettings::default(), Bounds::symmetric(20.));
        field.dispose();
        field.tick();

        assert!(field.is_disposed());
        assert!(field.is_empty());
    }

    #[test]
    fn empty_range_does_not_panic() {
        let settings = SmokeSettings {
            scale: (1., 1.),
            ..Default::default()
        };
        let field = field(settings, Bounds::symmetric(0.));

        assert!(field.particles().iter().all(|p| p.scale == 1.));
        assert!(field.particles().iter().all(|p| p.position.x == 0.));
    }
}
