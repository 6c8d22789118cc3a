mod blur;
mod bright_pass;
mod compose;
mod fullscreen;

use smoke_orb::component::Bloom;

use blur::{BlurDirection, BlurPass};
use bright_pass::BrightPass;
use compose::ComposePass;

use super::render_target::RenderTargets;

/// Bright pass, separable blur and compose, from the HDR color target into
/// the surface.
pub struct BloomChain {
    bright_pass: BrightPass,
    horizontal_blur: BlurPass,
    vertical_blur: BlurPass,
    compose: ComposePass,
}

impl BloomChain {
    /// Bind groups reference the render targets, so the chain has to be
    /// rebuilt whenever they are.
    pub fn new(
        device: &wgpu::Device,
        sampler: &wgpu::Sampler,
        targets: &RenderTargets,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let bright_pass = BrightPass::new(
            device,
            sampler,
            &targets.color.texture_view,
            targets.bright_pass.format,
        );
        let horizontal_blur = BlurPass::new(
            device,
            sampler,
            &targets.bright_pass.texture_view,
            targets.bright_pass.size,
            BlurDirection::Horizontal,
            targets.blur[0].format,
        );
        let vertical_blur = BlurPass::new(
            device,
            sampler,
            &targets.blur[0].texture_view,
            targets.blur[0].size,
            BlurDirection::Vertical,
            targets.blur[1].format,
        );
        let compose = ComposePass::new(
            device,
            sampler,
            &targets.color.texture_view,
            &targets.blur[1].texture_view,
            surface_format,
        );

        Self {
            bright_pass,
            horizontal_blur,
            vertical_blur,
            compose,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, bloom: &Bloom) {
        self.bright_pass.update(queue, bloom);
        self.horizontal_blur.update(queue);
        self.vertical_blur.update(queue);
        self.compose.update(queue, bloom);
    }

    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        surface_texture_view: &wgpu::TextureView,
    ) {
        self.bright_pass
            .render(encoder, &targets.bright_pass.texture_view);
        self.horizontal_blur
            .render(encoder, &targets.blur[0].texture_view);
        self.vertical_blur
            .render(encoder, &targets.blur[1].texture_view);
        self.compose.render(encoder, surface_texture_view);
    }
}
