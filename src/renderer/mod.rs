mod camera;
mod orb;
mod postprocessing;
mod render_target;
mod samplers;
mod smoke;

use anyhow::{bail, ensure, Context, Result};
use log::{info, warn};
use smoke_orb::{
    entity::Scene,
    random,
    sprite::{SmokeSprite, TextureHandle},
    window::{Size, Window},
    Backdrop, BackdropSettings,
};

use orb::OrbRenderer;
use postprocessing::BloomChain;
use render_target::{RenderTargets, DEPTH_TEXTURE_FORMAT, HDR_TEXTURE_FORMAT};
use samplers::Samplers;
use smoke::{SmokeRenderer, SmokeRendererBuilder, SpriteTexture};

const SMOKE_SPRITE_HANDLE: TextureHandle = TextureHandle::new(1);

pub struct Renderer {
    surface: wgpu::Surface,
    surface_format: wgpu::TextureFormat,
    size: Size,
    device: wgpu::Device,
    queue: wgpu::Queue,
    samplers: Samplers,
    render_targets: RenderTargets,
    smoke_renderer: SmokeRenderer,
    orb_renderer: OrbRenderer,
    bloom: BloomChain,
}

impl Renderer {
    pub async fn new(window: &impl Window, settings: &BackdropSettings) -> Result<Self> {
        let size = window.size();
        ensure!(!size.is_empty(), "Window has no drawable area: {:?}", size);

        let instance = wgpu::Instance::new(wgpu::Backends::PRIMARY);
        let surface = unsafe { instance.create_surface(window) };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No adapter found")?;
        info!("Using adapter {:?}", adapter.get_info());

        let surface_format = surface
            .get_preferred_format(&adapter)
            .context("No preferred format found")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await
            .context("No device found")?;

        Self::configure_surface(&surface, &device, surface_format, size);

        let samplers = Samplers::new(&device);
        let render_targets = RenderTargets::new(&device, size);

        let mut rng = random::seeded_from_clock();
        let sprite = SmokeSprite::generate(SmokeSprite::DEFAULT_SIZE, &mut rng)
            .context("Failed to generate smoke sprite")?;
        let sprite = SpriteTexture::upload(&device, &queue, &sprite, SMOKE_SPRITE_HANDLE);

        let smoke_renderer = SmokeRendererBuilder::new(settings.smoke, sprite, &samplers.bilinear)
            .color_target_format(render_targets.color.format)
            .depth_format(render_targets.depth.format)
            .build(&device);

        let orb_renderer = OrbRenderer::new(
            &device,
            settings.orb,
            HDR_TEXTURE_FORMAT,
            DEPTH_TEXTURE_FORMAT,
        );

        let bloom = BloomChain::new(&device, &samplers.bilinear, &render_targets, surface_format);

        Ok(Self {
            surface,
            surface_format,
            size,
            device,
            queue,
            samplers,
            render_targets,
            smoke_renderer,
            orb_renderer,
            bloom,
        })
    }

    fn configure_surface(
        surface: &wgpu::Surface,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: Size,
    ) {
        surface.configure(
            device,
            &wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format,
                width: size.width,
                height: size.height,
                present_mode: wgpu::PresentMode::Fifo,
            },
        )
    }

    /// Handle of the uploaded smoke sprite, for the particles to reference.
    pub fn smoke_texture(&self) -> TextureHandle {
        self.smoke_renderer.sprite_handle()
    }

    pub fn resize(&mut self, size: Size) {
        if size.is_empty() {
            return;
        }
        self.size = size;
        Self::configure_surface(&self.surface, &self.device, self.surface_format, size);
        self.render_targets = RenderTargets::new(&self.device, size);
        self.bloom = BloomChain::new(
            &self.device,
            &self.samplers.bilinear,
            &self.render_targets,
            self.surface_format,
        );
    }

    pub fn render<R>(&mut self, scene: &Scene, backdrop: &Backdrop<R>) -> Result<()> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(surface_texture) => surface_texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                Self::configure_surface(
                    &self.surface,
                    &self.device,
                    self.surface_format,
                    self.size,
                );
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out waiting for the next surface texture");
                return Ok(());
            }
            Err(e) => bail!("Failed to get next surface texture: {:?}", e),
        };
        let surface_texture_view = surface_texture.texture.create_view(&Default::default());

        self.smoke_renderer
            .update(&self.queue, scene, backdrop.field().particles());
        self.orb_renderer.update(&self.queue, scene, backdrop.orb());
        self.bloom.update(&self.queue, &scene.bloom);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Command Encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[wgpu::RenderPassColorAttachment {
                    view: &self.render_targets.color.texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: true,
                    },
                }],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.render_targets.depth.texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: false,
                    }),
                    stencil_ops: None,
                }),
            });
            self.orb_renderer.draw(&mut rpass);
            self.smoke_renderer.draw(&mut rpass);
        }

        self.bloom
            .render(&mut encoder, &self.render_targets, &surface_texture_view);

        self.queue.submit(Some(encoder.finish()));
        surface_texture.present();

        Ok(())
    }
}
