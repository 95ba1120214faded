use bytemuck::{Pod, Zeroable};

use crate::render::{linear_clamp_sampler, OffscreenTarget, RenderCtx, RenderTarget};

use super::common::{sampler_entry, texture_entry, triangle_list, uniform_entry, FULLSCREEN_WGSL};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FadeUniform {
    progress: f32,
    _pad: [f32; 3],
}

/// Full-screen pass writing `mix(from, to, progress)` to the surface.
///
/// The bind group over the two target views is cached and rebuilt only when
/// either target is swapped or reallocated.
#[derive(Default)]
pub struct CrossfadePass {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    sampler: Option<wgpu::Sampler>,
    fade_ubo: Option<wgpu::Buffer>,

    bind_group: Option<wgpu::BindGroup>,
    bound_targets: Option<(u64, u64)>,
}

impl CrossfadePass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Composites `from` and `to` onto `target.color_view`.
    ///
    /// `progress` is clamped to [0, 1]; 0 shows `from` only.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        from: &OffscreenTarget,
        to: &OffscreenTarget,
        progress: f32,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_uniforms(ctx);
        self.ensure_bind_group(ctx, from, to);

        if let Some(ubo) = self.fade_ubo.as_ref() {
            let u = FadeUniform {
                progress: clamp_progress(progress),
                _pad: [0.0; 3],
            };
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("fader crossfade pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let source = format!("{FULLSCREEN_WGSL}\n{}", include_str!("shaders/crossfade.wgsl"));
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fader crossfade shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_group_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("fader crossfade bgl"),
                entries: &[
                    uniform_entry::<FadeUniform>(0, wgpu::ShaderStages::FRAGMENT),
                    texture_entry(1),
                    texture_entry(2),
                    sampler_entry(3),
                ],
            });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("fader crossfade pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("fader crossfade pipeline"),
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
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: triangle_list(None),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Old bind group belongs to the previous layout.
        self.bind_group = None;
        self.bound_targets = None;
    }

    fn ensure_uniforms(&mut self, ctx: &RenderCtx<'_>) {
        if self.fade_ubo.is_none() {
            self.fade_ubo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("fader crossfade ubo"),
                size: std::mem::size_of::<FadeUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }
        if self.sampler.is_none() {
            self.sampler = Some(linear_clamp_sampler(ctx.device, "fader crossfade sampler"));
        }
    }

    fn ensure_bind_group(&mut self, ctx: &RenderCtx<'_>, from: &OffscreenTarget, to: &OffscreenTarget) {
        let key = (from.id(), to.id());
        if self.bound_targets == Some(key) && self.bind_group.is_some() {
            return;
        }

        let Some(layout) = self.bind_group_layout.as_ref() else { return };
        let Some(ubo) = self.fade_ubo.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fader crossfade bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(from.color_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(to.color_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
        self.bound_targets = Some(key);
        log::trace!("crossfade rebound to targets {key:?}");
    }
}

fn clamp_progress(progress: f32) -> f32 {
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_uniform_is_16_bytes() {
        assert_eq!(std::mem::size_of::<FadeUniform>(), 16);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(clamp_progress(-0.5), 0.0);
        assert_eq!(clamp_progress(0.25), 0.25);
        assert_eq!(clamp_progress(3.0), 1.0);
        assert_eq!(clamp_progress(f32::NAN), 0.0);
    }
}
