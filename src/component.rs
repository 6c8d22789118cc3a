use std::f32::consts::PI;

use glam::{vec3, Quat, Vec3};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 75.,
            aspect_ratio: 16. / 9.,
            near: 0.1,
            far: 1000.,
        }
    }
}

/// Linear fog towards `color`, measured along the view direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fog {
    pub color: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            color: Vec3::ZERO,
            near: 2.,
            far: 9.,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bloom {
    pub intensity: f32,
    pub threshold: f32,
    pub smoothing: f32,
}

impl Default for Bloom {
    fn default() -> Self {
        Self {
            intensity: 1.5,
            threshold: 0.,
            smoothing: 0.9,
        }
    }
}

/// Point light in world space. Intensity falls off with the squared distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: vec3(0., 3., 3.),
            color: vec3(1., 0., 0.),
            intensity: 6.,
        }
    }
}

/// How per-tick constants relate to wall time.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum Timestep {
    /// Every tick advances by the same amount, whatever the frame rate.
    #[default]
    PerFrame,
    /// Per-tick constants are scaled by the elapsed time, expressed in
    /// frames at `reference_fps`.
    Elapsed { reference_fps: f32 },
}

/// Population and motion of the drifting smoke sprites.
///
/// Ranges are `(low, high)` pairs sampled uniformly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SmokeSettings {
    pub count: usize,
    /// Leftward travel per tick.
    pub drift_speed: f32,
    /// Clockwise spin per tick, in radians.
    pub spin_speed: f32,
    /// Vertical band for the initial population.
    pub spawn_y: (f32, f32),
    /// Vertical band for recycled particles.
    pub respawn_y: (f32, f32),
    pub depth: (f32, f32),
    pub scale: (f32, f32),
    pub opacity: f32,
    pub plane_size: f32,
}

impl Default for SmokeSettings {
    fn default() -> Self {
        Self {
            count: 50,
            drift_speed: 0.01,
            spin_speed: 0.001,
            spawn_y: (-10.5, 11.5),
            respawn_y: (-2.5, 2.5),
            depth: (-10., -5.),
            scale: (0.5, 2.5),
            opacity: 0.5,
            plane_size: 2.,
        }
    }
}

/// Tilt tracking and appearance of the wireframe orb.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbSettings {
    /// Symmetric clamp for the pointer-driven x and y tilt, in radians.
    pub max_tilt: f32,
    /// Constant z tilt of the orb group, in radians.
    pub baseline_tilt: f32,
    /// Fraction of the remaining distance covered per tick, in (0, 1).
    pub smoothing: f32,
    /// Spin of the mesh about its own Y axis per tick, in radians.
    pub mesh_spin: f32,
    pub radius: f32,
    pub segments: u16,
    pub color: Vec3,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
}

impl Default for OrbSettings {
    fn default() -> Self {
        Self {
            max_tilt: 0.2,
            baseline_tilt: -20. * PI / 180.,
            smoothing: 0.1,
            mesh_spin: 0.001,
            radius: 3.,
            segments: 24,
            color: vec3(0.66, 0.66, 0.66),
            emissive: vec3(0.5, 0.5, 0.5),
            emissive_intensity: 1.,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_light_is_red_above_and_in_front() {
        let light = PointLight::default();

        assert_eq!(light.position, vec3(0., 3., 3.));
        assert_eq!(light.color, vec3(1., 0., 0.));
        assert_eq!(light.intensity, 6.);
    }

    #[test]
    fn default_timestep_is_per_frame() {
        assert_eq!(Timestep::default(), Timestep::PerFrame);
    }
}
