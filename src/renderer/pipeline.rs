//! wgpu render pipeline setup
//!
//! One pipeline draws every mesh. Each draw call gets its own 256-byte slot
//! in a dynamic-offset uniform buffer holding its transform.

use anyhow::{Context, Result, bail};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use super::scene::{DrawCall, PackedMeshes};
use super::vertex::{Color, Position, colors};
use crate::m4;

/// Maximum draw calls per frame
pub const MAX_DRAWS: usize = 8;
/// Distance between uniform slots (WebGL2 minimum offset alignment)
pub const UNIFORM_STRIDE: wgpu::BufferAddress = 256;

/// Per-draw uniform data (matches WGSL `Transform`, padded to one slot)
#[repr(C, align(256))]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct TransformUniform {
    matrix: [f32; 16],
    _padding: [f32; 48],
}

impl TransformUniform {
    pub fn new(transform: Mat4) -> Self {
        Self {
            matrix: m4::to_array(transform),
            _padding: [0.0; 48],
        }
    }

    pub fn matrix(&self) -> &[f32; 16] {
        &self.matrix
    }
}

/// Pack the transforms of `calls` into consecutive uniform slots
pub fn transform_slots(calls: &[DrawCall]) -> Vec<TransformUniform> {
    calls
        .iter()
        .take(MAX_DRAWS)
        .map(|call| TransformUniform::new(call.transform))
        .collect()
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    meshes: PackedMeshes,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        meshes: PackedMeshes,
    ) -> Result<Self> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("rally-pong-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .context("failed to create graphics device")?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        // Vertex colors are authored for a non-sRGB target, like a plain WebGL canvas
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });
        check_shader(&shader).await?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("transform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(64),
                },
                count: None,
            }],
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("transforms"),
            size: UNIFORM_STRIDE * MAX_DRAWS as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("transform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(64),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Position::desc(), Color::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let (position_buffer, color_buffer) = create_vertex_buffers(&device, &meshes);
        log::info!(
            "Render pipeline ready ({} vertices uploaded)",
            meshes.positions.len()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            position_buffer,
            color_buffer,
            uniform_buffer,
            bind_group,
            meshes,
            size: (width, height),
        })
    }

    /// Replace the mesh set (after a quality change)
    pub fn upload_meshes(&mut self, meshes: PackedMeshes) {
        let (position_buffer, color_buffer) = create_vertex_buffers(&self.device, &meshes);
        self.position_buffer = position_buffer;
        self.color_buffer = color_buffer;
        self.meshes = meshes;
        log::info!("Uploaded {} vertices", self.meshes.positions.len());
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Write transforms, clear and draw every call
    pub fn render(&mut self, calls: &[DrawCall]) -> Result<(), wgpu::SurfaceError> {
        if calls.len() > MAX_DRAWS {
            log::warn!("Dropping {} draw calls over the limit", calls.len() - MAX_DRAWS);
        }
        let slots = transform_slots(calls);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&slots));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(colors::BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_vertex_buffer(0, self.position_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.color_buffer.slice(..));

            for (slot, call) in calls.iter().take(slots.len()).enumerate() {
                let offset = (slot as wgpu::BufferAddress * UNIFORM_STRIDE) as wgpu::DynamicOffset;
                render_pass.set_bind_group(0, &self.bind_group, &[offset]);
                render_pass.draw(self.meshes.range(call.mesh).vertices(), 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_vertex_buffers(device: &wgpu::Device, meshes: &PackedMeshes) -> (wgpu::Buffer, wgpu::Buffer) {
    let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("position_buffer"),
        contents: bytemuck::cast_slice(&meshes.positions),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let colors = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("color_buffer"),
        contents: bytemuck::cast_slice(&meshes.colors),
        usage: wgpu::BufferUsages::VERTEX,
    });
    (positions, colors)
}

/// Log shader compiler output; fail if it reported any error
async fn check_shader(shader: &wgpu::ShaderModule) -> Result<()> {
    let info = shader.get_compilation_info().await;
    let mut errors = 0;
    for message in &info.messages {
        match message.message_type {
            wgpu::CompilationMessageType::Error => {
                errors += 1;
                log::error!("Shader error: {}", message.message);
            }
            wgpu::CompilationMessageType::Warning => {
                log::warn!("Shader warning: {}", message.message);
            }
            wgpu::CompilationMessageType::Info => {
                log::info!("Shader info: {}", message.message);
            }
        }
    }
    if errors > 0 {
        bail!("shader failed to compile ({errors} errors)");
    }
    Ok(())
}
