use glam::Vec4;
use smoke_orb::component::Bloom;

use super::fullscreen::FullscreenPass;

/// Adds the blurred highlights back onto the scene color.
pub struct ComposePass(FullscreenPass);

impl ComposePass {
    pub fn new(
        device: &wgpu::Device,
        sampler: &wgpu::Sampler,
        color_texture_view: &wgpu::TextureView,
        bloom_texture_view: &wgpu::TextureView,
        target_format: wgpu::TextureFormat,
    ) -> Self {
        Self(FullscreenPass::new(
            device,
            "Compose Pass",
            wgpu::include_wgsl!("compose.fragment.wgsl"),
            sampler,
            &[color_texture_view, bloom_texture_view],
            target_format,
        ))
    }

    pub fn update(&self, queue: &wgpu::Queue, bloom: &Bloom) {
        self.0
            .write_params(queue, Vec4::new(bloom.intensity, 0., 0., 0.));
    }

    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        self.0.render(encoder, target);
    }
}
