use glam::{vec2, Vec2, Vec4};
use smoke_orb::window::Size;

use super::fullscreen::FullscreenPass;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BlurDirection {
    Horizontal,
    Vertical,
}

/// One axis of a separable gaussian blur.
pub struct BlurPass {
    pass: FullscreenPass,
    texel_step: Vec2,
}

impl BlurPass {
    pub fn new(
        device: &wgpu::Device,
        sampler: &wgpu::Sampler,
        src_texture_view: &wgpu::TextureView,
        src_size: Size,
        direction: BlurDirection,
        target_format: wgpu::TextureFormat,
    ) -> Self {
        let texel = vec2(1. / src_size.width as f32, 1. / src_size.height as f32);
        let texel_step = match direction {
            BlurDirection::Horizontal => vec2(texel.x, 0.),
            BlurDirection::Vertical => vec2(0., texel.y),
        };
        let label = match direction {
            BlurDirection::Horizontal => "Horizontal Blur Pass",
            BlurDirection::Vertical => "Vertical Blur Pass",
        };

        let pass = FullscreenPass::new(
            device,
            label,
            wgpu::include_wgsl!("blur.fragment.wgsl"),
            sampler,
            &[src_texture_view],
            target_format,
        );

        Self { pass, texel_step }
    }

    pub fn update(&self, queue: &wgpu::Queue) {
        self.pass
            .write_params(queue, Vec4::new(self.texel_step.x, self.texel_step.y, 0., 0.));
    }

    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        self.pass.render(encoder, target);
    }
}
