use crate::assets::TexturePixels;
use crate::camera::Camera;
use crate::constants::{AMBIENT_LEVEL, CLEAR_COLOR, LIGHT_DIR};
use crate::core::material::{is_letter_surface, material_for_surface, Finish, SurfaceMaterial};
use crate::core::model::{KeyModel, MeshVertex};
use crate::core::{Pose, ShadowPose};
use glam::{EulerRot, Mat4, Quat};
use web_sys as web;
use wgpu::util::DeviceExt;

static KEYCAP_WGSL: &str = include_str!("shaders/keycap.wgsl");
static SHADOW_WGSL: &str = include_str!("shaders/shadow.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_dir_ambient: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniforms {
    base_color: [f32; 4],
    params: [f32; 4], // roughness, metalness, bump intensity
    tiling: [f32; 4],
}

impl MaterialUniforms {
    fn from_material(m: &SurfaceMaterial, has_bump_tex: bool) -> Self {
        // No texture means no bump contribution, whatever the finish asked for
        let bump = if has_bump_tex { m.bump_intensity } else { 0.0 };
        Self {
            base_color: [m.base_color[0], m.base_color[1], m.base_color[2], 1.0],
            params: [m.roughness, m.metalness, bump, 0.0],
            tiling: [m.tiling[0], m.tiling[1], 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ShadowUniforms {
    mvp: [[f32; 4]; 4],
    params: [f32; 4], // opacity
}

struct GpuSurface {
    name: String,
    letter: bool,
    vertex_buf: wgpu::Buffer,
    index_buf: wgpu::Buffer,
    index_count: u32,
    material_buf: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    keycap_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,

    frame_buf: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    shadow_buf: wgpu::Buffer,
    shadow_bind_group: wgpu::BindGroup,
    shadow_quad_vb: wgpu::Buffer,

    material_bgl: wgpu::BindGroupLayout,
    bump_sampler: wgpu::Sampler,
    flat_bump_view: wgpu::TextureView,
    bump_views: [Option<wgpu::TextureView>; 3], // indexed by finish_slot

    surfaces: Vec<GpuSurface>,
    finish: Finish,

    camera: Camera,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

fn finish_slot(finish: Finish) -> usize {
    match finish {
        Finish::Matte => 0,
        Finish::Glossy => 1,
        Finish::Carbon => 2,
    }
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, camera: Camera) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, width, height);

        let keycap_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("keycap_shader"),
            source: wgpu::ShaderSource::Wgsl(KEYCAP_WGSL.into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shadow_shader"),
            source: wgpu::ShaderSource::Wgsl(SHADOW_WGSL.into()),
        });

        let frame_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bgl"),
            entries: &[uniform_entry(0)],
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buf.as_entire_binding(),
            }],
        });

        let material_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("material_bgl"),
            entries: &[
                uniform_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bump_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("bump_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        // Mid-gray stand-in so untextured materials shade flat
        let flat_bump_view = upload_rgba_texture(
            &device,
            &queue,
            "flat_bump",
            1,
            1,
            &[128, 128, 128, 255],
        );

        let keycap_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("keycap_pl"),
            bind_group_layouts: &[&frame_bgl, &material_bgl],
            push_constant_ranges: &[],
        });
        let keycap_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("keycap_pipeline"),
            layout: Some(&keycap_layout),
            vertex: wgpu::VertexState {
                module: &keycap_shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 0,
                            shader_location: 0,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x3,
                            offset: 12,
                            shader_location: 1,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 24,
                            shader_location: 2,
                        },
                    ],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &keycap_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let shadow_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("shadow_uniforms"),
            size: std::mem::size_of::<ShadowUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let shadow_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_bgl"),
            entries: &[uniform_entry(0)],
        });
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_bg"),
            layout: &shadow_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: shadow_buf.as_entire_binding(),
            }],
        });
        // Ground quad (two triangles in the XZ plane)
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let shadow_quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shadow_quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let shadow_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shadow_pl"),
            bind_group_layouts: &[&shadow_bgl],
            push_constant_ranges: &[],
        });
        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
            layout: Some(&shadow_layout),
            vertex: wgpu::VertexState {
                module: &shadow_shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 0,
                        shader_location: 0,
                    }],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shadow_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            keycap_pipeline,
            shadow_pipeline,
            frame_buf,
            frame_bind_group,
            shadow_buf,
            shadow_bind_group,
            shadow_quad_vb,
            material_bgl,
            bump_sampler,
            flat_bump_view,
            bump_views: [None, None, None],
            surfaces: Vec::new(),
            finish: Finish::default(),
            camera,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: CLEAR_COLOR[3],
            },
        })
    }

    /// Install the decoded bump texture for one finish. Missing textures are
    /// fine; affected materials just lose their bump contribution.
    pub fn install_bump_texture(&mut self, finish: Finish, pixels: &TexturePixels) {
        let view = upload_rgba_texture(
            &self.device,
            &self.queue,
            finish.label(),
            pixels.width,
            pixels.height,
            &pixels.rgba,
        );
        self.bump_views[finish_slot(finish)] = Some(view);
    }

    /// Upload the decoded model, classifying each named surface once.
    pub fn upload_model(&mut self, model: &KeyModel, finish: Finish) {
        self.finish = finish;
        self.surfaces.clear();
        for mesh in &model.surfaces {
            let material = material_for_surface(&mesh.name, finish);
            let letter = is_letter_surface(&mesh.name);
            let vertex_buf = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("surface_vb"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let index_buf = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("surface_ib"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            let material_buf = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("surface_material"),
                size: std::mem::size_of::<MaterialUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = self.material_bind_group(&material_buf, &material);
            self.write_material(&material_buf, &material);
            self.surfaces.push(GpuSurface {
                name: mesh.name.clone(),
                letter,
                vertex_buf,
                index_buf,
                index_count: mesh.indices.len() as u32,
                material_buf,
                bind_group,
            });
        }
        log::info!(
            "[gpu] model uploaded: {} surfaces, finish {}",
            self.surfaces.len(),
            finish.label()
        );
    }

    /// Re-derive materials for the non-letter surfaces under a new finish.
    pub fn set_finish(&mut self, finish: Finish) {
        if finish == self.finish {
            return;
        }
        self.finish = finish;
        let mut rebuilt: Vec<(usize, wgpu::BindGroup)> = Vec::new();
        for (i, s) in self.surfaces.iter().enumerate() {
            if s.letter {
                continue;
            }
            let material = material_for_surface(&s.name, finish);
            self.write_material(&s.material_buf, &material);
            rebuilt.push((i, self.material_bind_group(&s.material_buf, &material)));
        }
        for (i, bg) in rebuilt {
            self.surfaces[i].bind_group = bg;
        }
        log::info!("[gpu] finish -> {}", finish.label());
    }

    fn bump_view_for(&self, material: &SurfaceMaterial) -> &wgpu::TextureView {
        match material.bump_texture {
            Some(_) => self.bump_views[finish_slot(self.finish)]
                .as_ref()
                .unwrap_or(&self.flat_bump_view),
            None => &self.flat_bump_view,
        }
    }

    fn material_bind_group(
        &self,
        material_buf: &wgpu::Buffer,
        material: &SurfaceMaterial,
    ) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("material_bg"),
            layout: &self.material_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: material_buf.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(self.bump_view_for(material)),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.bump_sampler),
                },
            ],
        })
    }

    fn write_material(&self, buf: &wgpu::Buffer, material: &SurfaceMaterial) {
        let has_tex = material.bump_texture.is_some()
            && self.bump_views[finish_slot(self.finish)].is_some();
        self.queue.write_buffer(
            buf,
            0,
            bytemuck::bytes_of(&MaterialUniforms::from_material(material, has_tex)),
        );
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    /// Draw one frame: backdrop, contact shadow, then the keycap surfaces.
    /// With no model loaded only the backdrop is drawn.
    pub fn render(&mut self, pose: &Pose, shadow: &ShadowPose) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let view_proj = self.camera.view_proj(aspect);
        let model = Mat4::from_scale_rotation_translation(
            pose.scale,
            Quat::from_euler(
                EulerRot::XYZ,
                pose.rotation.x,
                pose.rotation.y,
                pose.rotation.z,
            ),
            pose.position,
        );
        self.queue.write_buffer(
            &self.frame_buf,
            0,
            bytemuck::bytes_of(&FrameUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                model: model.to_cols_array_2d(),
                camera_pos: [self.camera.eye.x, self.camera.eye.y, self.camera.eye.z, 0.0],
                light_dir_ambient: [LIGHT_DIR.x, LIGHT_DIR.y, LIGHT_DIR.z, AMBIENT_LEVEL],
            }),
        );
        let shadow_model =
            Mat4::from_scale_rotation_translation(shadow.scale, Quat::IDENTITY, shadow.position);
        self.queue.write_buffer(
            &self.shadow_buf,
            0,
            bytemuck::bytes_of(&ShadowUniforms {
                mvp: (view_proj * shadow_model).to_cols_array_2d(),
                params: [shadow.opacity, 0.0, 0.0, 0.0],
            }),
        );

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
            if !self.surfaces.is_empty() {
                rpass.set_pipeline(&self.shadow_pipeline);
                rpass.set_bind_group(0, &self.shadow_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.shadow_quad_vb.slice(..));
                rpass.draw(0..6, 0..1);

                rpass.set_pipeline(&self.keycap_pipeline);
                rpass.set_bind_group(0, &self.frame_bind_group, &[]);
                for s in &self.surfaces {
                    rpass.set_bind_group(1, &s.bind_group, &[]);
                    rpass.set_vertex_buffer(0, s.vertex_buf.slice(..));
                    rpass.set_index_buffer(s.index_buf.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..s.index_count, 0, 0..1);
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn upload_rgba_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}
