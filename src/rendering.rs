//! Rendering system with wgpu pipeline and shader management.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::{Error, Result};
use crate::params::RenderConfig;
use crate::scene::{HeroScene, Vertex};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Fraction of the object radius covered by the contact shadow's footprint
const SHADOW_FOOTPRINT: f32 = 0.9;

/// World-space softness per unit of contact shadow blur
const SHADOW_SOFTNESS_PER_BLUR: f32 = 0.4;

/// Uniform buffer for the hero shader
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub base_color: [f32; 4],
    pub material: [f32; 4],
    pub ambient: [f32; 4],
    pub spot_position: [f32; 4],
    pub spot_color: [f32; 4],
    pub spot_target: [f32; 4],
    pub point_position: [f32; 4],
    pub point_color: [f32; 4],
    pub sky_zenith: [f32; 4],
    pub sky_horizon: [f32; 4],
    pub sky_ground: [f32; 4],
}

fn vec4(xyz: [f32; 3], w: f32) -> [f32; 4] {
    [xyz[0], xyz[1], xyz[2], w]
}

impl SceneUniforms {
    /// Pack the scene's current state and static lighting for the GPU
    pub fn new(scene: &HeroScene, view_proj: Mat4, eye: Vec3) -> Self {
        let config = scene.config();
        let lighting = &config.lighting;
        let material = &config.material;
        let (outer, inner) = lighting.spot.cone_cosines();
        let (zenith, horizon, ground) = config.environment.preset.gradient();

        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: scene.model_matrix().to_cols_array_2d(),
            camera_pos: vec4(eye.to_array(), scene.elapsed_s()),
            base_color: vec4(material.color.to_linear(), material.metalness),
            material: [
                material.clearcoat,
                material.clearcoat_roughness,
                material.env_map_intensity,
                0.0,
            ],
            ambient: vec4(
                lighting.ambient.color.scaled_linear(lighting.ambient.intensity),
                0.0,
            ),
            spot_position: vec4(lighting.spot.position, outer),
            spot_color: vec4(
                lighting.spot.color.scaled_linear(lighting.spot.intensity),
                inner,
            ),
            spot_target: vec4(config.camera.target, 0.0),
            point_position: vec4(lighting.point.position, 0.0),
            point_color: vec4(
                lighting.point.color.scaled_linear(lighting.point.intensity),
                0.0,
            ),
            sky_zenith: vec4(zenith.to_linear(), 0.0),
            sky_horizon: vec4(horizon.to_linear(), 0.0),
            sky_ground: vec4(ground.to_linear(), 0.0),
        }
    }
}

/// Uniform buffer for the contact shadow shader
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ShadowUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub plane: [f32; 4],
    pub color: [f32; 4],
    pub params: [f32; 4],
}

impl ShadowUniforms {
    pub fn new(scene: &HeroScene, view_proj: Mat4) -> Self {
        let config = scene.config();
        let shadow = &config.contact_shadow;

        // Fades out as the object rises towards `far` above the plane
        let height = (scene.lowest_point() - shadow.position[1]).max(0.0);
        let fade = if shadow.far > 0.0 {
            (1.0 - height / shadow.far).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            view_proj: view_proj.to_cols_array_2d(),
            plane: vec4(shadow.position, shadow.scale / 2.0),
            color: vec4(shadow.color.to_linear(), shadow.opacity * fade),
            params: [
                config.shape.radius * SHADOW_FOOTPRINT,
                shadow.blur * SHADOW_SOFTNESS_PER_BLUR,
                0.0,
                0.0,
            ],
        }
    }
}

/// Swapchain of a window or canvas
pub struct WindowSurface {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl WindowSurface {
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure after a resize (zero-sized windows are ignored)
    pub fn resize(&mut self, render_system: &mut RenderSystem, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&render_system.device, &self.config);
        render_system.resize(width, height);
    }

    /// Render a frame and present it
    pub fn render(&mut self, render_system: &RenderSystem) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&render_system.device, &self.config);
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        render_system.draw(&view);
        output.present();

        Ok(())
    }
}

/// Rendering system managing wgpu device, pipelines, and buffers
pub struct RenderSystem {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    hero_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    shadow_uniform_buffer: wgpu::Buffer,
    shadow_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create a rendering system drawing into a window (or canvas)
    pub async fn for_window(
        window: Arc<Window>,
        render_config: &RenderConfig,
        vertices: &[Vertex],
    ) -> Result<(Self, WindowSurface)> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance.create_surface(window)?;
        let (adapter, device, queue) = request_device(&instance, Some(&surface)).await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| Error::Render("surface reports no texture formats".to_string()))?;

        // Transparent canvases need premultiplied compositing
        let alpha_mode = if render_config.clear_alpha < 1.0
            && surface_caps
                .alpha_modes
                .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            surface_caps.alpha_modes[0]
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        log::info!(
            "Rendering to {}x{} surface ({:?}, {:?})",
            width,
            height,
            format,
            adapter.get_info().backend
        );

        let render_system = Self::new(device, queue, format, width, height, render_config, vertices);
        Ok((render_system, WindowSurface { surface, config }))
    }

    /// Create a rendering system without a window, for offscreen frames
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn headless(render_config: &RenderConfig, vertices: &[Vertex]) -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let (_adapter, device, queue) = request_device(&instance, None).await?;

        Ok(Self::new(
            device,
            queue,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            render_config.window_width.max(1),
            render_config.window_height.max(1),
            render_config,
            vertices,
        ))
    }

    fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        render_config: &RenderConfig,
        vertices: &[Vertex],
    ) -> Self {
        // Load shaders
        let hero_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Hero Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("hero.wgsl").into()),
        });

        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Contact Shadow Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shadow.wgsl").into()),
        });

        // Create buffers
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: std::mem::size_of::<SceneUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shadow_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shadow Uniform Buffer"),
            size: std::mem::size_of::<ShadowUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout = uniform_layout(&device, "Uniform Bind Group Layout");
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shadow_bind_group_layout = uniform_layout(&device, "Shadow Bind Group Layout");
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shadow Bind Group"),
            layout: &shadow_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: shadow_uniform_buffer.as_entire_binding(),
            }],
        });

        // Create hero render pipeline
        let hero_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Hero Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let hero_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Hero Render Pipeline"),
            layout: Some(&hero_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &hero_shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        wgpu::VertexAttribute {
                            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &hero_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // Create contact shadow pipeline
        let shadow_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Shadow Pipeline Layout"),
                bind_group_layouts: &[&shadow_bind_group_layout],
                push_constant_ranges: &[],
            });

        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shadow Pipeline"),
            layout: Some(&shadow_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shadow_shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shadow_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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
            // Tested against the hero's depth but never occludes it
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let depth_view = create_depth_view(&device, width, height);

        Self {
            device,
            queue,
            hero_pipeline,
            shadow_pipeline,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            uniform_buffer,
            uniform_bind_group,
            shadow_uniform_buffer,
            shadow_bind_group,
            depth_view,
            clear_color: render_config.clear_color_linear(),
        }
    }

    /// Recreate size-dependent attachments
    pub fn resize(&mut self, width: u32, height: u32) {
        self.depth_view = create_depth_view(&self.device, width.max(1), height.max(1));
    }

    /// Upload the scene's current mesh and uniforms
    pub fn update(&self, scene: &HeroScene, view_proj: Mat4, eye: Vec3) {
        self.queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&scene.mesh().vertices),
        );

        let uniforms = SceneUniforms::new(scene, view_proj, eye);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let shadow = ShadowUniforms::new(scene, view_proj);
        self.queue.write_buffer(
            &self.shadow_uniform_buffer,
            0,
            bytemuck::cast_slice(&[shadow]),
        );
    }

    /// Encode and submit one frame into the given color target
    pub fn draw(&self, view: &wgpu::TextureView) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Render hero object first so the shadow blends over the background only
            render_pass.set_pipeline(&self.hero_pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..self.vertex_count, 0..1);

            // Render contact shadow
            render_pass.set_pipeline(&self.shadow_pipeline);
            render_pass.set_bind_group(0, &self.shadow_bind_group, &[]);
            render_pass.draw(0..6, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Render one frame offscreen and read it back as an image
    #[cfg(not(target_arch = "wasm32"))]
    pub fn capture(&self, width: u32, height: u32) -> Result<image::RgbaImage> {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Capture Target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.draw(&view);

        let bytes_per_pixel = 4; // RGBA8
        let unpadded_bytes_per_row = width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        // Create buffer to read texture data
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Capture Buffer"),
            size: (padded_bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Capture Encoder"),
            });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|_| Error::Render("frame readback was dropped".to_string()))?
            .map_err(|e| Error::Render(format!("failed to map capture buffer: {}", e)))?;

        let data = buffer_slice.get_mapped_range();
        let mut image_data = Vec::with_capacity((unpadded_bytes_per_row * height) as usize);

        // Remove padding
        for row in data.chunks(padded_bytes_per_row as usize) {
            image_data.extend_from_slice(&row[..unpadded_bytes_per_row as usize]);
        }

        drop(data);
        buffer.unmap();

        image::RgbaImage::from_raw(width, height, image_data)
            .ok_or_else(|| Error::Render("captured frame has the wrong size".to_string()))
    }
}

async fn request_device(
    instance: &wgpu::Instance,
    surface: Option<&wgpu::Surface<'_>>,
) -> Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue)> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: surface,
            force_fallback_adapter: false,
        })
        .await
        .ok_or(Error::NoAdapter)?;

    // WebGL2 cannot meet the default limits
    let required_limits = if cfg!(target_arch = "wasm32") {
        wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
    } else {
        wgpu::Limits::default()
    };

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Main Device"),
                required_features: wgpu::Features::empty(),
                required_limits,
                memory_hints: Default::default(),
            },
            None,
        )
        .await?;

    Ok((adapter, device, queue))
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
