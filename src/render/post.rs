use super::helpers;
use crate::constants::{HDR_FORMAT, POST_SLOT_COUNT, POST_SLOT_STRIDE};
use scrollscape_core::shaders;
use scrollscape_core::{LensUniforms, PassAvailability, PostUniforms};

/// Layouts, sampler and uniforms every compositing pass shares, plus the
/// tone-map present pipeline that keeps the frame visible without bloom or lens.
pub(crate) struct PostShared {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    pub(crate) bgl1: wgpu::BindGroupLayout, // tex+sampler
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) shader: wgpu::ShaderModule,
    pub(crate) pl_single: wgpu::PipelineLayout,
    pub(crate) pl_pair: wgpu::PipelineLayout,
    pub(crate) present_pipeline: wgpu::RenderPipeline,
}

pub(crate) struct BloomPass {
    pub(crate) bright_pipeline: wgpu::RenderPipeline,
    pub(crate) blur_pipeline: wgpu::RenderPipeline,
    /// Bloom added back, kept in HDR for the lens pass.
    pub(crate) combine_pipeline: wgpu::RenderPipeline,
    /// Bloom added back and tone-mapped straight to the display.
    pub(crate) composite_pipeline: wgpu::RenderPipeline,
}

pub(crate) struct LensPass {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
}

impl LensPass {
    pub(crate) fn destroy(&self) {
        self.uniform_buffer.destroy();
    }
}

pub(crate) fn create_post_shared(
    device: &wgpu::Device,
    swap_format: wgpu::TextureFormat,
) -> PostShared {
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            helpers::texture_entry(0),
            helpers::sampler_entry(1),
            helpers::uniform_entry(2, wgpu::ShaderStages::FRAGMENT, false, 0),
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &[helpers::texture_entry(0), helpers::sampler_entry(1)],
    });
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("linear_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("post_uniforms"),
        size: POST_SLOT_STRIDE * POST_SLOT_COUNT,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("post_shader"),
        source: wgpu::ShaderSource::Wgsl(shaders::post_source().into()),
    });
    let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_0"),
        bind_group_layouts: &[&bgl0],
        push_constant_ranges: &[],
    });
    let pl_pair = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post_comp"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let present_pipeline = helpers::make_post_pipeline(
        device,
        "present_pipeline",
        &pl_single,
        &shader,
        "fs_present",
        swap_format,
    );
    PostShared {
        bgl0,
        bgl1,
        sampler,
        uniform_buffer,
        shader,
        pl_single,
        pl_pair,
        present_pipeline,
    }
}

pub(crate) fn create_bloom_pass(
    device: &wgpu::Device,
    shared: &PostShared,
    swap_format: wgpu::TextureFormat,
) -> BloomPass {
    let make = |label: &str, layout: &wgpu::PipelineLayout, entry: &str, format| {
        helpers::make_post_pipeline(device, label, layout, &shared.shader, entry, format)
    };
    BloomPass {
        bright_pipeline: make("bright_pipeline", &shared.pl_single, "fs_bright", HDR_FORMAT),
        blur_pipeline: make("blur_pipeline", &shared.pl_single, "fs_blur", HDR_FORMAT),
        combine_pipeline: make("combine_pipeline", &shared.pl_pair, "fs_combine", HDR_FORMAT),
        composite_pipeline: make(
            "composite_pipeline",
            &shared.pl_pair,
            "fs_composite",
            swap_format,
        ),
    }
}

pub(crate) fn create_lens_pass(
    device: &wgpu::Device,
    shared: &PostShared,
    swap_format: wgpu::TextureFormat,
) -> LensPass {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("lens_shader"),
        source: wgpu::ShaderSource::Wgsl(shaders::lens_source().into()),
    });
    let pipeline = helpers::make_post_pipeline(
        device,
        "lens_pipeline",
        &shared.pl_single,
        &shader,
        "fs_lens",
        swap_format,
    );
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("lens_uniforms"),
        size: std::mem::size_of::<LensUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    LensPass {
        pipeline,
        uniform_buffer,
    }
}

/// Run `create` inside a validation error scope and report whether the
/// resources it produced are usable.
pub(crate) async fn checked<T>(
    device: &wgpu::Device,
    name: &str,
    create: impl FnOnce() -> T,
) -> (Option<T>, PassAvailability) {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let resources = create();
    match device.pop_error_scope().await {
        None => {
            log::info!("[post] {name} pass available");
            (Some(resources), PassAvailability::Available)
        }
        Some(err) => {
            log::warn!("[post] {name} pass unavailable, continuing without it: {err}");
            (None, PassAvailability::Unavailable(err.to_string()))
        }
    }
}

pub(crate) fn post_slot_binding(buffer: &wgpu::Buffer, slot: u64) -> wgpu::BindingResource<'_> {
    wgpu::BindingResource::Buffer(wgpu::BufferBinding {
        buffer,
        offset: slot * POST_SLOT_STRIDE,
        size: wgpu::BufferSize::new(std::mem::size_of::<PostUniforms>() as u64),
    })
}
