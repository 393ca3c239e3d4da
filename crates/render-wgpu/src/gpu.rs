use crate::camera::OrbCamera;
use crate::mesh::{sphere_mesh, Vertex};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4};
use orbfield_kernel::scene::{ORB_RADIUS, PARTICLE_RADIUS};
use orbfield_kernel::Scene;
use wgpu::util::DeviceExt;

const LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 10.0];
const AMBIENT_INTENSITY: f32 = 0.5;
const ORB_SEGMENTS: u32 = 32;
const PARTICLE_SEGMENTS: u32 = 16;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    light_pos: [f32; 4],
    ambient: [f32; 4],
}

impl Uniforms {
    fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            light_pos: [
                LIGHT_POSITION[0],
                LIGHT_POSITION[1],
                LIGHT_POSITION[2],
                1.0,
            ],
            ambient: [AMBIENT_INTENSITY, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
    emissive: [f32; 4],
}

impl InstanceData {
    fn new(model: Mat4, color: [f32; 4], emissive: [f32; 4]) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color,
            emissive,
        }
    }
}

/// wgpu-based scene renderer.
pub struct WgpuRenderer {
    background_pipeline: wgpu::RenderPipeline,
    sphere_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    orb_vertex_buffer: wgpu::Buffer,
    orb_index_buffer: wgpu::Buffer,
    orb_index_count: u32,
    particle_vertex_buffer: wgpu::Buffer,
    particle_index_buffer: wgpu::Buffer,
    particle_index_count: u32,
    orb_instance_buffer: wgpu::Buffer,
    particle_instance_buffer: wgpu::Buffer,
    max_instances: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        // Uniform buffer
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sphere_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Sphere pipeline (orbs and particles share it)
        let sphere_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sphere_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SPHERE_SHADER.into()),
        });

        let sphere_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sphere_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &sphere_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &sphere_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Background pipeline: fullscreen triangle, no buffers, no bindings
        let background_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BACKGROUND_SHADER.into()),
        });

        let background_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("background_pipeline_layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let background_pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("background_pipeline"),
                layout: Some(&background_layout),
                vertex: wgpu::VertexState {
                    module: &background_shader,
                    entry_point: Some("vs_background"),
                    compilation_options: Default::default(),
                    buffers: &[],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &background_shader,
                    entry_point: Some("fs_background"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::Always,
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: Default::default(),
                multiview: None,
                cache: None,
            });

        // Orb mesh
        let (orb_verts, orb_indices) = sphere_mesh(ORB_RADIUS, ORB_SEGMENTS, ORB_SEGMENTS);
        let orb_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orb_vertex_buffer"),
            contents: bytemuck::cast_slice(&orb_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let orb_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("orb_index_buffer"),
            contents: bytemuck::cast_slice(&orb_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let orb_index_count = orb_indices.len() as u32;

        // Particle mesh
        let (particle_verts, particle_indices) =
            sphere_mesh(PARTICLE_RADIUS, PARTICLE_SEGMENTS, PARTICLE_SEGMENTS);
        let particle_vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("particle_vertex_buffer"),
                contents: bytemuck::cast_slice(&particle_verts),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let particle_index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("particle_index_buffer"),
                contents: bytemuck::cast_slice(&particle_indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let particle_index_count = particle_indices.len() as u32;

        // Instance buffers (pre-allocated)
        let max_instances = 10_000u32;
        let instance_size = (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64;
        let orb_instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("orb_instance_buffer"),
            size: instance_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let particle_instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_instance_buffer"),
            size: instance_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            background_pipeline,
            sphere_pipeline,
            uniform_buffer,
            uniform_bind_group,
            orb_vertex_buffer,
            orb_index_buffer,
            orb_index_count,
            particle_vertex_buffer,
            particle_index_buffer,
            particle_index_count,
            orb_instance_buffer,
            particle_instance_buffer,
            max_instances,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: gradient background, then orbs, then particles.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &OrbCamera,
        scene: &Scene,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(camera.view_projection())),
        );

        // Orbs: lit, rotated, colored per instance
        let mut orb_instances: Vec<InstanceData> = Vec::with_capacity(scene.orb_count());
        for orb in scene.orbs().values() {
            if orb_instances.len() >= self.max_instances as usize {
                break;
            }
            let model = Mat4::from_translation(orb.position)
                * Mat4::from_euler(
                    EulerRot::XYZ,
                    orb.rotation.x,
                    orb.rotation.y,
                    orb.rotation.z,
                );
            orb_instances.push(InstanceData::new(
                model,
                [orb.color.r, orb.color.g, orb.color.b, 1.0],
                [orb.emissive.r, orb.emissive.g, orb.emissive.b, 1.0],
            ));
        }

        // Particles: unlit, so the whole color rides in the emissive slot
        let mut particle_instances: Vec<InstanceData> =
            Vec::with_capacity(scene.particle_count());
        'bursts: for burst in scene.bursts() {
            for p in &burst.particles {
                if particle_instances.len() >= self.max_instances as usize {
                    break 'bursts;
                }
                particle_instances.push(InstanceData::new(
                    Mat4::from_translation(p.position),
                    [0.0, 0.0, 0.0, 1.0],
                    [p.color.r, p.color.g, p.color.b, 1.0],
                ));
            }
        }

        if !orb_instances.is_empty() {
            queue.write_buffer(
                &self.orb_instance_buffer,
                0,
                bytemuck::cast_slice(&orb_instances),
            );
        }
        if !particle_instances.is_empty() {
            queue.write_buffer(
                &self.particle_instance_buffer,
                0,
                bytemuck::cast_slice(&particle_instances),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // Gradient background, depth writes off
            pass.set_pipeline(&self.background_pipeline);
            pass.draw(0..3, 0..1);

            // Orbs
            if !orb_instances.is_empty() {
                pass.set_pipeline(&self.sphere_pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.orb_vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.orb_instance_buffer.slice(..));
                pass.set_index_buffer(self.orb_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.orb_index_count, 0, 0..orb_instances.len() as u32);
            }

            // Burst particles
            if !particle_instances.is_empty() {
                pass.set_pipeline(&self.sphere_pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.particle_vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.particle_instance_buffer.slice(..));
                pass.set_index_buffer(
                    self.particle_index_buffer.slice(..),
                    wgpu::IndexFormat::Uint16,
                );
                pass.draw_indexed(
                    0..self.particle_index_count,
                    0,
                    0..particle_instances.len() as u32,
                );
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
