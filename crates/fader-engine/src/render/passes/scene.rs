//! Off-screen scene pass: a textured backdrop behind instanced matcap meshes.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::mesh::{MeshData, MeshVertex};
use crate::render::{linear_clamp_sampler, OffscreenTarget, PerspectiveCamera, Texture2d};

use super::common::{
    sampler_entry, texture_entry, triangle_list, uniform_entry, FULLSCREEN_WGSL,
};

/// Per-scene camera and group transform.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SceneUniform {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    group: [[f32; 4]; 4],
}

/// One model matrix per mesh instance, uploaded as four vec4 columns.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct InstanceRaw {
    model: [[f32; 4]; 4],
}

impl InstanceRaw {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Everything needed to build the GPU side of one scene.
pub struct SceneBatchDesc<'a> {
    pub label: &'a str,
    pub background: &'a Texture2d,
    pub matcap: &'a Texture2d,
    pub mesh: &'a MeshData,
    pub instances: &'a [Mat4],
}

/// GPU resources for one scene. Built once; only the uniform changes per
/// frame.
pub struct SceneBatch {
    label: String,
    background_bind_group: wgpu::BindGroup,
    matcap_bind_group: wgpu::BindGroup,
    uniform: wgpu::Buffer,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    instances: wgpu::Buffer,
    instance_count: u32,
}

/// Pipelines shared by every scene batch.
///
/// Both pipelines render into [`OffscreenTarget`] attachments, whose formats
/// are fixed, so they are created up front.
pub struct ScenePass {
    background_pipeline: wgpu::RenderPipeline,
    background_layout: wgpu::BindGroupLayout,
    matcap_pipeline: wgpu::RenderPipeline,
    matcap_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl ScenePass {
    pub fn new(device: &wgpu::Device) -> Self {
        let sampler = linear_clamp_sampler(device, "fader scene sampler");

        let background_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("fader background bgl"),
            entries: &[texture_entry(0), sampler_entry(1)],
        });

        let matcap_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("fader matcap bgl"),
            entries: &[
                uniform_entry::<SceneUniform>(0, wgpu::ShaderStages::VERTEX),
                texture_entry(1),
                sampler_entry(2),
            ],
        });

        let background_pipeline = create_background_pipeline(device, &background_layout);
        let matcap_pipeline = create_matcap_pipeline(device, &matcap_layout);

        Self {
            background_pipeline,
            background_layout,
            matcap_pipeline,
            matcap_layout,
            sampler,
        }
    }

    /// Uploads a scene's mesh, instances and textures.
    pub fn create_batch(&self, device: &wgpu::Device, desc: SceneBatchDesc<'_>) -> SceneBatch {
        let label = desc.label;

        let background_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} background bind group")),
            layout: &self.background_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&desc.background.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} scene ubo")),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let matcap_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} matcap bind group")),
            layout: &self.matcap_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&desc.matcap.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} mesh vbo")),
            contents: bytemuck::cast_slice::<MeshVertex, u8>(&desc.mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} mesh ibo")),
            contents: bytemuck::cast_slice(&desc.mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let raw: Vec<InstanceRaw> = desc
            .instances
            .iter()
            .map(|m| InstanceRaw {
                model: m.to_cols_array_2d(),
            })
            .collect();

        // Zero-sized buffers are invalid; keep one identity slot for an empty scene.
        let raw = if raw.is_empty() {
            vec![InstanceRaw {
                model: Mat4::IDENTITY.to_cols_array_2d(),
            }]
        } else {
            raw
        };

        let instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} instance vbo")),
            contents: bytemuck::cast_slice(&raw),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!(
            "scene batch '{label}': {} vertices, {} triangles, {} instances",
            desc.mesh.vertices.len(),
            desc.mesh.triangle_count(),
            desc.instances.len()
        );

        SceneBatch {
            label: label.to_string(),
            background_bind_group,
            matcap_bind_group,
            uniform,
            vertices,
            indices,
            index_count: desc.mesh.indices.len() as u32,
            instances,
            instance_count: desc.instances.len() as u32,
        }
    }

    /// Records the scene into `target`: clear, backdrop, then meshes.
    ///
    /// `group` is applied on top of every instance transform (the scene
    /// graph's root rotation).
    pub fn draw(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &OffscreenTarget,
        batch: &SceneBatch,
        camera: &PerspectiveCamera,
        group: Mat4,
    ) {
        let uniform = SceneUniform {
            view: camera.view().to_cols_array_2d(),
            projection: camera.projection().to_cols_array_2d(),
            group: group.to_cols_array_2d(),
        };
        queue.write_buffer(&batch.uniform, 0, bytemuck::bytes_of(&uniform));

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(&batch.label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view(),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.background_pipeline);
        rpass.set_bind_group(0, &batch.background_bind_group, &[]);
        rpass.draw(0..3, 0..1);

        if batch.instance_count == 0 || batch.index_count == 0 {
            return;
        }

        rpass.set_pipeline(&self.matcap_pipeline);
        rpass.set_bind_group(0, &batch.matcap_bind_group, &[]);
        rpass.set_vertex_buffer(0, batch.vertices.slice(..));
        rpass.set_vertex_buffer(1, batch.instances.slice(..));
        rpass.set_index_buffer(batch.indices.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..batch.index_count, 0, 0..batch.instance_count);
    }
}

fn create_background_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let source = format!("{FULLSCREEN_WGSL}\n{}", include_str!("shaders/background.wgsl"));
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("fader background shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("fader background pipeline layout"),
        bind_group_layouts: &[layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("fader background pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_fullscreen"),
            compilation_options: Default::default(),
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: OffscreenTarget::COLOR_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: triangle_list(None),
        // The backdrop never occludes geometry.
        depth_stencil: Some(wgpu::DepthStencilState {
            format: OffscreenTarget::DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::Always,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn create_matcap_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("fader matcap shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/matcap.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("fader matcap pipeline layout"),
        bind_group_layouts: &[layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("fader matcap pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[MeshVertex::layout(), InstanceRaw::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: OffscreenTarget::COLOR_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: triangle_list(Some(wgpu::Face::Back)),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: OffscreenTarget::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
