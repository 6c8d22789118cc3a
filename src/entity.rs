use glam::{Quat, Vec3};

use crate::component::{Bloom, Camera, Fog, PointLight, Transform};

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct CameraEntity {
    pub transform: Transform,
    pub camera: Camera,
}

impl CameraEntity {
    /// Direction the camera looks along.
    pub fn forward(&self) -> Vec3 {
        self.transform.rotation * -Vec3::Z
    }
}

/// Everything the renderer needs besides the animated backdrop.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Scene {
    pub camera: CameraEntity,
    pub fog: Fog,
    pub light: PointLight,
    pub bloom: Bloom,
}

/// The wireframe orb: a tilting group with a spinning mesh inside it.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Orb {
    pub group: Transform,
    pub mesh: Transform,
}

impl Orb {
    pub fn tilted(baseline_tilt: f32) -> Self {
        Self {
            group: Transform {
                rotation: Quat::from_rotation_z(baseline_tilt),
                ..Default::default()
            },
            mesh: Transform::default(),
        }
    }
}
