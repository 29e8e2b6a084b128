use super::helpers;
use super::post::{post_slot_binding, LensPass, PostShared};
use crate::constants::{HDR_FORMAT, POST_SLOT_BLOOM_A, POST_SLOT_BLOOM_B, POST_SLOT_HDR};
use scrollscape_core::TargetSizes;

pub(crate) struct BloomTargets {
    pub(crate) a_tex: wgpu::Texture,
    pub(crate) a_view: wgpu::TextureView,
    pub(crate) b_tex: wgpu::Texture,
    pub(crate) b_view: wgpu::TextureView,
    /// bloom_a as source of the horizontal blur.
    pub(crate) blur_h_bg: wgpu::BindGroup,
    /// bloom_b as source of the vertical blur.
    pub(crate) blur_v_bg: wgpu::BindGroup,
    /// bloom_a as the glow input of combine/composite.
    pub(crate) glow_bg: wgpu::BindGroup,
}

pub(crate) struct CombinedTarget {
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    /// Combined image read by the lens pass.
    pub(crate) lens_bg: wgpu::BindGroup,
}

/// Every size-dependent resource of one frame. Rebuilt as a whole on resize so
/// no pass ever sees textures of two different sizes.
pub(crate) struct FrameTargets {
    pub(crate) sizes: TargetSizes,
    pub(crate) scene_tex: wgpu::Texture,
    pub(crate) scene_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    /// Scene colour as source of bright/composite/present (hdr slot).
    pub(crate) scene_bg: wgpu::BindGroup,
    /// Scene colour read directly by the lens pass.
    pub(crate) scene_lens_bg: Option<wgpu::BindGroup>,
    pub(crate) bloom: Option<BloomTargets>,
    pub(crate) combined: Option<CombinedTarget>,
}

fn source_bind_group(
    device: &wgpu::Device,
    label: &str,
    shared: &PostShared,
    view: &wgpu::TextureView,
    uniform: wgpu::BindingResource<'_>,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &shared.bgl0,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&shared.sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: uniform,
            },
        ],
    })
}

impl FrameTargets {
    pub(crate) fn create(
        device: &wgpu::Device,
        shared: &PostShared,
        lens: Option<&LensPass>,
        sizes: TargetSizes,
    ) -> Self {
        let sampled = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let scene = sizes.scene;
        let (scene_tex, scene_view) = helpers::create_color_texture(
            device,
            "scene_hdr",
            scene.width,
            scene.height,
            HDR_FORMAT,
            sampled,
        );
        let (depth_tex, depth_view) =
            helpers::create_depth_texture(device, scene.width, scene.height);

        let scene_bg = source_bind_group(
            device,
            "scene_bg",
            shared,
            &scene_view,
            post_slot_binding(&shared.uniform_buffer, POST_SLOT_HDR),
        );

        let bloom = sizes.bloom.map(|half| {
            let (w, h) = (half.width, half.height);
            let (a_tex, a_view) =
                helpers::create_color_texture(device, "bloom_a", w, h, HDR_FORMAT, sampled);
            let (b_tex, b_view) =
                helpers::create_color_texture(device, "bloom_b", w, h, HDR_FORMAT, sampled);
            let blur_h_bg = source_bind_group(
                device,
                "blur_h_bg",
                shared,
                &a_view,
                post_slot_binding(&shared.uniform_buffer, POST_SLOT_BLOOM_A),
            );
            let blur_v_bg = source_bind_group(
                device,
                "blur_v_bg",
                shared,
                &b_view,
                post_slot_binding(&shared.uniform_buffer, POST_SLOT_BLOOM_B),
            );
            let glow_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("glow_bg"),
                layout: &shared.bgl1,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&a_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&shared.sampler),
                    },
                ],
            });
            BloomTargets {
                a_tex,
                a_view,
                b_tex,
                b_view,
                blur_h_bg,
                blur_v_bg,
                glow_bg,
            }
        });

        let combined = match (sizes.combined, lens) {
            (Some(full), Some(lens)) => {
                let (tex, view) = helpers::create_color_texture(
                    device,
                    "combined_hdr",
                    full.width,
                    full.height,
                    HDR_FORMAT,
                    sampled,
                );
                let lens_bg = source_bind_group(
                    device,
                    "combined_lens_bg",
                    shared,
                    &view,
                    lens.uniform_buffer.as_entire_binding(),
                );
                Some(CombinedTarget { tex, view, lens_bg })
            }
            _ => None,
        };

        let scene_lens_bg = lens.map(|lens| {
            source_bind_group(
                device,
                "scene_lens_bg",
                shared,
                &scene_view,
                lens.uniform_buffer.as_entire_binding(),
            )
        });

        FrameTargets {
            sizes,
            scene_tex,
            scene_view,
            depth_tex,
            depth_view,
            scene_bg,
            scene_lens_bg,
            bloom,
            combined,
        }
    }

    pub(crate) fn destroy(&self) {
        self.scene_tex.destroy();
        self.depth_tex.destroy();
        if let Some(b) = &self.bloom {
            b.a_tex.destroy();
            b.b_tex.destroy();
        }
        if let Some(c) = &self.combined {
            c.tex.destroy();
        }
    }
}
