use glam::Vec4;
use smoke_orb::component::Bloom;

use super::fullscreen::FullscreenPass;

/// Keeps only the luminance above the bloom threshold.
pub struct BrightPass(FullscreenPass);

impl BrightPass {
    pub fn new(
        device: &wgpu::Device,
        sampler: &wgpu::Sampler,
        src_texture_view: &wgpu::TextureView,
        target_format: wgpu::TextureFormat,
    ) -> Self {
        Self(FullscreenPass::new(
            device,
            "Bright Pass",
            wgpu::include_wgsl!("bright_pass.fragment.wgsl"),
            sampler,
            &[src_texture_view],
            target_format,
        ))
    }

    pub fn update(&self, queue: &wgpu::Queue, bloom: &Bloom) {
        self.0
            .write_params(queue, Vec4::new(bloom.threshold, bloom.smoothing, 0., 0.));
    }

    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        self.0.render(encoder, target);
    }
}
