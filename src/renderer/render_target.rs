use smoke_orb::window::Size;

pub const HDR_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const DEPTH_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Bloom buffers are rendered at a quarter of the surface resolution.
const BLOOM_DIVISOR: u32 = 4;

pub struct RenderTarget {
    pub format: wgpu::TextureFormat,
    pub size: Size,
    pub texture: wgpu::Texture,
    pub texture_view: wgpu::TextureView,
}

impl RenderTarget {
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        format: wgpu::TextureFormat,
        size: Size,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: size.into(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        });
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            format,
            size,
            texture,
            texture_view,
        }
    }
}

pub struct RenderTargets {
    pub color: RenderTarget,
    pub depth: RenderTarget,
    pub bright_pass: RenderTarget,
    pub blur: [RenderTarget; 2],
}

impl RenderTargets {
    pub fn new(device: &wgpu::Device, size: Size) -> Self {
        let color = RenderTarget::new(device, "Color Target Texture", HDR_TEXTURE_FORMAT, size);
        let depth = RenderTarget::new(device, "Depth Texture", DEPTH_TEXTURE_FORMAT, size);

        let bloom_size = size.scaled_down(BLOOM_DIVISOR);
        let bright_pass = RenderTarget::new(
            device,
            "Bright Pass Texture",
            HDR_TEXTURE_FORMAT,
            bloom_size,
        );
        let blur = [0, 1].map(|i| {
            RenderTarget::new(
                device,
                format!("Blur Texture {}", i).as_str(),
                HDR_TEXTURE_FORMAT,
                bloom_size,
            )
        });

        Self {
            color,
            depth,
            bright_pass,
            blur,
        }
    }
}
