use glam::{Mat4, Vec3};
use smoke_orb::{component::Transform, entity::CameraEntity};

pub trait CameraExt {
    fn proj_matrix(&self) -> Mat4;
    fn view_matrix(&self) -> Mat4;
}

impl CameraExt for CameraEntity {
    fn proj_matrix(&self) -> Mat4 {
        let camera = &self.camera;
        Mat4::perspective_rh(
            camera.fov.to_radians(),
            camera.aspect_ratio,
            camera.near,
            camera.far,
        )
    }

    fn view_matrix(&self) -> Mat4 {
        let eye = self.transform.position;
        Mat4::look_at_rh(eye, eye + self.forward(), Vec3::Y)
    }
}

pub trait TransformExt {
    fn model_matrix(&self) -> Mat4;
}

impl TransformExt for Transform {
    fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}
