use std::mem::size_of;

use bytemuck::{bytes_of, cast_slice, Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use smoke_orb::{
    component::OrbSettings,
    entity::{Orb, Scene},
    geometry::Wireframe,
};
use wgpu::util::DeviceExt;

use super::camera::{CameraExt, TransformExt};

#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
#[repr(C)]
struct Uniforms {
    mv_mat: Mat4,
    p_mat: Mat4,
    color: Vec4,
    emissive: Vec4,
    fog_color: Vec4,
    /// fog near, fog far
    fog: Vec4,
    /// Light position in view space.
    light_position: Vec4,
    /// Light color premultiplied by intensity.
    light_color: Vec4,
}

impl Uniforms {
    fn new(scene: &Scene, settings: &OrbSettings, orb: &Orb) -> Self {
        let v_mat = scene.camera.view_matrix();
        let m_mat = orb.group.model_matrix() * orb.mesh.model_matrix();
        let emissive = settings.emissive * settings.emissive_intensity;
        let light = &scene.light;

        Self {
            mv_mat: v_mat * m_mat,
            p_mat: scene.camera.proj_matrix(),
            color: (settings.color, 1.).into(),
            emissive: (emissive, 1.).into(),
            fog_color: (scene.fog.color, 1.).into(),
            fog: Vec4::new(scene.fog.near, scene.fog.far, 0., 0.),
            light_position: (v_mat.transform_point3(light.position), 1.).into(),
            light_color: (light.color * light.intensity, 1.).into(),
        }
    }
}

pub struct OrbRenderer {
    settings: OrbSettings,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    bind_group: wgpu::BindGroup,
    render_pipeline: wgpu::RenderPipeline,
}

impl OrbRenderer {
    pub fn new(
        device: &wgpu::Device,
        settings: OrbSettings,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        let wireframe = Wireframe::sphere(settings.radius, settings.segments);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Orb Vertex Buffer"),
            contents: cast_slice(wireframe.vertices.as_slice()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Orb Index Buffer"),
            contents: cast_slice(wireframe.indices.as_slice()),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Orb Uniform Buffer"),
            size: size_of::<Uniforms>() as _,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: None,
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(size_of::<Uniforms>() as _),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: None,
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader_module = device.create_shader_module(&wgpu::include_wgsl!("orb.wgsl"));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Orb Render Pipeline"),
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
                targets: &[color_format.into()],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        Self {
            settings,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            index_count: wireframe.indices.len() as _,
            bind_group,
            render_pipeline,
        }
    }

    pub fn update(&self, queue: &wgpu::Queue, scene: &Scene, orb: &Orb) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytes_of(&Uniforms::new(scene, &self.settings, orb)),
        );
    }

    pub fn draw<'rpass>(&'rpass self, rpass: &mut impl wgpu::util::RenderEncoder<'rpass>) {
        rpass.set_pipeline(&self.render_pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
