use std::{mem::size_of, num::NonZeroU32};

use bytemuck::{bytes_of, cast_slice, Pod, Zeroable};
use glam::{const_vec3, Mat4, Vec3, Vec4};
use log::info;
use smoke_orb::{
    component::SmokeSettings,
    entity::Scene,
    smoke::Particle,
    sprite::{SmokeSprite, TextureHandle},
};
use wgpu::util::DeviceExt;

use super::camera::CameraExt;

const QUAD_VERTICES: [Vec3; 4] = [
    const_vec3!([-0.5, -0.5, 0.]),
    const_vec3!([-0.5, 0.5, 0.]),
    const_vec3!([0.5, -0.5, 0.]),
    const_vec3!([0.5, 0.5, 0.]),
];
const QUAD_INDICES: [u16; 6] = [0, 2, 1, 1, 2, 3];

#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
#[repr(C)]
struct Uniforms {
    v_mat: Mat4,
    p_mat: Mat4,
    fog_color: Vec4,
    /// fog near, fog far, opacity, plane size
    params: Vec4,
}

impl Uniforms {
    fn new(scene: &Scene, settings: &SmokeSettings) -> Self {
        Self {
            v_mat: scene.camera.view_matrix(),
            p_mat: scene.camera.proj_matrix(),
            fog_color: (scene.fog.color, 1.).into(),
            params: Vec4::new(
                scene.fog.near,
                scene.fog.far,
                settings.opacity,
                settings.plane_size,
            ),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
#[repr(C)]
struct Instance {
    position: Vec3,
    rotation: f32,
    scale: f32,
    _pad0: [f32; 3],
}

impl From<&Particle> for Instance {
    fn from(particle: &Particle) -> Self {
        Self {
            position: particle.position,
            rotation: particle.rotation_z,
            scale: particle.scale,
            ..Default::default()
        }
    }
}

/// The uploaded smoke sprite. Its handle is what particles refer to.
pub struct SpriteTexture {
    handle: TextureHandle,
    _texture: wgpu::Texture,
    texture_view: wgpu::TextureView,
}

impl SpriteTexture {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sprite: &SmokeSprite,
        handle: TextureHandle,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: sprite.size(),
            height: sprite.size(),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Smoke Sprite Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::TEXTURE_BINDING,
        });
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            sprite.pixels(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: NonZeroU32::new(4 * sprite.size()),
                rows_per_image: NonZeroU32::new(sprite.size()),
            },
            size,
        );
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        info!(
            "Uploaded {0}x{0} smoke sprite as {1:?}",
            sprite.size(),
            handle
        );

        Self {
            handle,
            _texture: texture,
            texture_view,
        }
    }

    pub fn handle(&self) -> TextureHandle {
        self.handle
    }
}

pub struct SmokeRenderer {
    settings: SmokeSettings,
    sprite: SpriteTexture,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instance_count: u32,
    bind_group: wgpu::BindGroup,
    render_pipeline: wgpu::RenderPipeline,
}

impl SmokeRenderer {
    pub fn sprite_handle(&self) -> TextureHandle {
        self.sprite.handle()
    }

    /// Copies the current particle population into the instance buffer.
    /// Only particles that reference this renderer's sprite are drawn.
    pub fn update(&mut self, queue: &wgpu::Queue, scene: &Scene, particles: &[Particle]) {
        let handle = self.sprite.handle();
        let instances = particles
            .iter()
            .filter(|p| p.texture == handle)
            .take(self.instance_capacity)
            .map(Instance::from)
            .collect::<Vec<_>>();

        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, cast_slice(instances.as_slice()));
        }
        self.instance_count = instances.len() as _;

        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytes_of(&Uniforms::new(scene, &self.settings)),
        );
    }

    pub fn draw<'rpass>(&'rpass self, rpass: &mut impl wgpu::util::RenderEncoder<'rpass>) {
        if self.instance_count == 0 {
            return;
        }
        rpass.set_pipeline(&self.render_pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..(QUAD_INDICES.len() as _), 0, 0..self.instance_count);
    }
}

pub struct SmokeRendererBuilder<'a> {
    settings: SmokeSettings,
    sprite: SpriteTexture,
    sampler: &'a wgpu::Sampler,
    color_format: Option<wgpu::TextureFormat>,
    depth_format: Option<wgpu::TextureFormat>,
}

impl<'a> SmokeRendererBuilder<'a> {
    pub fn new(settings: SmokeSettings, sprite: SpriteTexture, sampler: &'a wgpu::Sampler) -> Self {
        Self {
            settings,
            sprite,
            sampler,
            color_format: None,
            depth_format: None,
        }
    }

    pub fn color_target_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.color_format = Some(format);
        self
    }

    pub fn depth_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }

    pub fn build(self, device: &wgpu::Device) -> SmokeRenderer {
        let color_format = self
            .color_format
            .unwrap_or(super::render_target::HDR_TEXTURE_FORMAT);
        let depth_format = self
            .depth_format
            .unwrap_or(super::render_target::DEPTH_TEXTURE_FORMAT);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Smoke Vertex Buffer"),
            contents: bytes_of(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Smoke Index Buffer"),
            contents: bytes_of(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_capacity = self.settings.count.max(1);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Smoke Instance Buffer"),
            size: (instance_capacity * size_of::<Instance>()) as _,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::STORAGE,
            mapped_at_creation: false,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Smoke Uniform Buffer"),
            size: size_of::<Uniforms>() as _,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: None,
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(size_of::<Uniforms>() as _),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(size_of::<Instance>() as _),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: None,
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: instance_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&self.sprite.texture_view),
                },
            ],
        });

        let shader_module = device.create_shader_module(&wgpu::include_wgsl!("smoke.wgsl"));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Smoke Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: size_of::<Vec3>() as _,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    }],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                }],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            // Smoke is translucent: test against the orb, never occlude.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        SmokeRenderer {
            settings: self.settings,
            sprite: self.sprite,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            instance_capacity,
            instance_count: 0,
            bind_group,
            render_pipeline,
        }
    }
}
