use super::helpers;
use crate::constants::{CLEAR_COLOR, DEPTH_FORMAT, HDR_FORMAT, PARTICLE_QUAD_VERTICES};
use scrollscape_core::geometry::{MeshData, MeshVertex};
use scrollscape_core::particles::{ParticleBuffer, ParticleRecord};
use scrollscape_core::shaders;
use scrollscape_core::uniforms::OBJECT_UNIFORM_STRIDE;
use scrollscape_core::{
    DrawStyle, FrameSnapshot, GlobalUniforms, Geometry, ObjectUniforms, Program, Scene,
};
use wgpu::util::DeviceExt;

enum GpuGeometry {
    Mesh {
        vertices: wgpu::Buffer,
        indices: wgpu::Buffer,
        index_count: u32,
    },
    Points {
        instances: wgpu::Buffer,
        count: u32,
    },
}

/// Draw order inside the scene pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Layer {
    Opaque,
    Translucent,
    Points,
}

struct GpuObject {
    geometry: GpuGeometry,
    key: (Program, DrawStyle),
    layer: Layer,
    /// Index into the object uniform buffer.
    slot: u32,
}

impl GpuObject {
    fn destroy(&self) {
        match &self.geometry {
            GpuGeometry::Mesh {
                vertices, indices, ..
            } => {
                vertices.destroy();
                indices.destroy();
            }
            GpuGeometry::Points { instances, .. } => instances.destroy(),
        }
    }
}

/// Pipelines, static buffers and uniforms of the scene pass.
pub(crate) struct ScenePass {
    global_buffer: wgpu::Buffer,
    global_bg: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_bg: wgpu::BindGroup,
    object_staging: Vec<u8>,
    pipelines: Vec<((Program, DrawStyle), wgpu::RenderPipeline)>,
    /// Scene objects followed by the backdrop, sorted by layer.
    draws: Vec<GpuObject>,
}

fn mesh_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

fn particle_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32,
        2 => Float32x3,
        3 => Float32,
        4 => Float32x3
    ];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ParticleRecord>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRS,
    }
}

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

fn make_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    program: Program,
    style: DrawStyle,
) -> wgpu::RenderPipeline {
    let label = format!("{program:?}_{style:?}");
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(shaders::program_source(program).into()),
    });
    let (buffer, blend, depth_write) = match program {
        Program::Particles => (particle_layout(), ADDITIVE, false),
        Program::Wave => (mesh_layout(), wgpu::BlendState::ALPHA_BLENDING, false),
        Program::Hero | Program::Lit => (mesh_layout(), wgpu::BlendState::REPLACE, true),
    };
    let topology = match style {
        DrawStyle::Triangles => wgpu::PrimitiveTopology::TriangleList,
        DrawStyle::Lines => wgpu::PrimitiveTopology::LineList,
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some(program.vertex_entry()),
            buffers: &[buffer],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some(program.fragment_entry()),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

fn upload_mesh(device: &wgpu::Device, name: &str, mesh: &MeshData, style: DrawStyle) -> GpuGeometry {
    let indices = match style {
        DrawStyle::Triangles => &mesh.indices,
        DrawStyle::Lines => &mesh.edges,
    };
    GpuGeometry::Mesh {
        vertices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name}_vertices")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }),
        indices: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name}_indices")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        }),
        index_count: indices.len() as u32,
    }
}

fn upload_points(device: &wgpu::Device, name: &str, particles: &ParticleBuffer) -> GpuGeometry {
    GpuGeometry::Points {
        instances: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name}_instances")),
            contents: particles.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        }),
        count: particles.len() as u32,
    }
}

impl ScenePass {
    pub(crate) fn new(device: &wgpu::Device, scene: &Scene) -> Self {
        let stages = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        let global_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_globals_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                stages,
                false,
                std::mem::size_of::<GlobalUniforms>() as u64,
            )],
        });
        let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_object_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                stages,
                true,
                std::mem::size_of::<ObjectUniforms>() as u64,
            )],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_scene"),
            bind_group_layouts: &[&global_bgl, &object_bgl],
            push_constant_ranges: &[],
        });

        let global_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_globals"),
            size: std::mem::size_of::<GlobalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let global_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_globals_bg"),
            layout: &global_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_buffer.as_entire_binding(),
            }],
        });

        // One slot per object plus one for the backdrop
        let slots = scene.objects.len() as u64 + 1;
        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_objects"),
            size: slots * OBJECT_UNIFORM_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let object_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_object_bg"),
            layout: &object_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniforms>() as u64),
                }),
            }],
        });

        let mut draws: Vec<GpuObject> = scene
            .objects
            .iter()
            .enumerate()
            .map(|(i, obj)| {
                let m = &obj.material;
                let (geometry, layer) = match &obj.geometry {
                    Geometry::Mesh(mesh) => (
                        upload_mesh(device, obj.name, mesh, m.style),
                        if m.is_translucent() {
                            Layer::Translucent
                        } else {
                            Layer::Opaque
                        },
                    ),
                    Geometry::Points { particles, .. } => {
                        (upload_points(device, obj.name, particles), Layer::Points)
                    }
                };
                GpuObject {
                    geometry,
                    key: (m.program, m.style),
                    layer,
                    slot: i as u32,
                }
            })
            .collect();
        draws.push(GpuObject {
            geometry: upload_points(device, "backdrop", &scene.backdrop.particles),
            key: (Program::Particles, DrawStyle::Triangles),
            layer: Layer::Points,
            slot: scene.objects.len() as u32,
        });
        // Stable sort keeps the backdrop after the contact cloud
        draws.sort_by_key(|d| d.layer);

        let mut pipelines: Vec<((Program, DrawStyle), wgpu::RenderPipeline)> = Vec::new();
        for d in &draws {
            if pipelines.iter().all(|(k, _)| *k != d.key) {
                let (program, style) = d.key;
                pipelines.push((d.key, make_scene_pipeline(device, &layout, program, style)));
            }
        }
        log::info!(
            "[render] scene pass: {} draws, {} pipelines",
            draws.len(),
            pipelines.len()
        );

        Self {
            global_buffer,
            global_bg,
            object_buffer,
            object_bg,
            object_staging: vec![0u8; (slots * OBJECT_UNIFORM_STRIDE) as usize],
            pipelines,
            draws,
        }
    }

    /// Upload this frame's globals and every object slot with one write each.
    pub(crate) fn write_uniforms(&mut self, queue: &wgpu::Queue, frame: &FrameSnapshot) {
        queue.write_buffer(&self.global_buffer, 0, bytemuck::bytes_of(&frame.globals));
        let stride = OBJECT_UNIFORM_STRIDE as usize;
        let size = std::mem::size_of::<ObjectUniforms>();
        let slots = frame.objects.iter().chain(std::iter::once(&frame.backdrop));
        for (i, u) in slots.enumerate() {
            let at = i * stride;
            if at + size > self.object_staging.len() {
                break;
            }
            self.object_staging[at..at + size].copy_from_slice(bytemuck::bytes_of(u));
        }
        queue.write_buffer(&self.object_buffer, 0, &self.object_staging);
    }

    pub(crate) fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
    ) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_bind_group(0, &self.global_bg, &[]);
        for d in &self.draws {
            let Some((_, pipeline)) = self.pipelines.iter().find(|(k, _)| *k == d.key) else {
                continue;
            };
            rpass.set_pipeline(pipeline);
            let offset = d.slot * OBJECT_UNIFORM_STRIDE as u32;
            rpass.set_bind_group(1, &self.object_bg, &[offset]);
            match &d.geometry {
                GpuGeometry::Mesh {
                    vertices,
                    indices,
                    index_count,
                } if *index_count > 0 => {
                    rpass.set_vertex_buffer(0, vertices.slice(..));
                    rpass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..*index_count, 0, 0..1);
                }
                GpuGeometry::Points { instances, count } if *count > 0 => {
                    rpass.set_vertex_buffer(0, instances.slice(..));
                    rpass.draw(0..PARTICLE_QUAD_VERTICES, 0..*count);
                }
                _ => {}
            }
        }
    }

    pub(crate) fn destroy(&self) {
        self.global_buffer.destroy();
        self.object_buffer.destroy();
        for d in &self.draws {
            d.destroy();
        }
    }
}
