mod helpers;
mod post;
mod scene;
mod targets;

use crate::constants::{
    BLUR_DIR_H, BLUR_DIR_V, POST_SLOT_BLOOM_A, POST_SLOT_BLOOM_B, POST_SLOT_COUNT, POST_SLOT_HDR,
    POST_SLOT_STRIDE,
};
use post::{BloomPass, LensPass, PostShared};
use scene::ScenePass;
use scrollscape_core::{
    CompositePlan, EngineError, FrameSnapshot, LensUniforms, PostUniforms, RenderBackend,
    RenderError, Scene, Stage, SurfaceSize, TargetSizes,
};
use targets::FrameTargets;
use web_sys as web;

struct GpuInner {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    needs_reconfigure: bool,
    plan: CompositePlan,
    scene: ScenePass,
    post: PostShared,
    bloom: Option<BloomPass>,
    lens: Option<LensPass>,
    targets: FrameTargets,
    post_staging: Vec<u8>,
}

/// WebGPU implementation of [`RenderBackend`]. Empty once released.
pub struct GpuRenderer {
    inner: Option<GpuInner>,
}

impl GpuRenderer {
    /// Create the device, scene pipelines and every compositing pass the
    /// adapter accepts. The returned plan lists the passes that survived.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        scene: &Scene,
        size: SurfaceSize,
    ) -> Result<(Self, CompositePlan), EngineError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| EngineError::Surface(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(EngineError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| EngineError::Device(format!("{e:?}")))?;

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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| EngineError::Surface("no supported surface format".into()))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[render] surface {}x{} {:?}", size.width, size.height, format);

        let scene_pass = ScenePass::new(&device, scene);
        let shared = post::create_post_shared(&device, format);
        let (bloom, bloom_state) = post::checked(&device, "bloom", || {
            post::create_bloom_pass(&device, &shared, format)
        })
        .await;
        let (lens, lens_state) = post::checked(&device, "lens", || {
            post::create_lens_pass(&device, &shared, format)
        })
        .await;
        let plan = CompositePlan::new(bloom_state, lens_state);

        let sizes = TargetSizes::new(size.width, size.height, &plan);
        let targets = FrameTargets::create(&device, &shared, lens.as_ref(), sizes);

        let renderer = Self {
            inner: Some(GpuInner {
                surface,
                device,
                queue,
                config,
                needs_reconfigure: false,
                plan: plan.clone(),
                scene: scene_pass,
                post: shared,
                bloom,
                lens,
                targets,
                post_staging: vec![0u8; (POST_SLOT_STRIDE * POST_SLOT_COUNT) as usize],
            }),
        };
        Ok((renderer, plan))
    }
}

fn post_uniforms(frame: &FrameSnapshot, resolution: SurfaceSize, blur_dir: [f32; 2]) -> PostUniforms {
    PostUniforms {
        resolution: [resolution.width as f32, resolution.height as f32],
        time: frame.globals.time,
        radius: frame.bloom.radius,
        blur_dir,
        bloom_strength: frame.bloom.strength,
        threshold: frame.bloom.threshold,
    }
}

impl GpuInner {
    fn write_post_uniforms(&mut self, frame: &FrameSnapshot) {
        let sizes = self.targets.sizes;
        let half = sizes.bloom.unwrap_or(sizes.scene);
        let slots = [
            (POST_SLOT_HDR, post_uniforms(frame, sizes.scene, [0.0, 0.0])),
            (POST_SLOT_BLOOM_A, post_uniforms(frame, half, BLUR_DIR_H)),
            (POST_SLOT_BLOOM_B, post_uniforms(frame, half, BLUR_DIR_V)),
        ];
        let size = std::mem::size_of::<PostUniforms>();
        for (slot, u) in slots {
            let at = (slot * POST_SLOT_STRIDE) as usize;
            self.post_staging[at..at + size].copy_from_slice(bytemuck::bytes_of(&u));
        }
        self.queue
            .write_buffer(&self.post.uniform_buffer, 0, &self.post_staging);

        if let Some(lens) = &self.lens {
            let tonemap = self
                .plan
                .stages()
                .iter()
                .any(|s| matches!(s, Stage::Lens { tonemap: true }));
            let u = LensUniforms {
                resolution: [sizes.surface.width as f32, sizes.surface.height as f32],
                offset: frame.lens_offset,
                tonemap: if tonemap { 1.0 } else { 0.0 },
            };
            self.queue
                .write_buffer(&lens.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    fn encode_stages(&self, encoder: &mut wgpu::CommandEncoder, display: &wgpu::TextureView) {
        let t = &self.targets;
        for stage in self.plan.stages() {
            match *stage {
                Stage::Scene => self.scene.draw(encoder, &t.scene_view, &t.depth_view),
                Stage::Bloom { to_display } => {
                    let (Some(bloom), Some(bt)) = (&self.bloom, &t.bloom) else {
                        continue;
                    };
                    let (bright, blur) = (&bloom.bright_pipeline, &bloom.blur_pipeline);
                    helpers::blit(encoder, "bright_pass", &bt.a_view, bright, &t.scene_bg, None);
                    helpers::blit(encoder, "blur_h", &bt.b_view, blur, &bt.blur_h_bg, None);
                    helpers::blit(encoder, "blur_v", &bt.a_view, blur, &bt.blur_v_bg, None);
                    if to_display {
                        helpers::blit(
                            encoder,
                            "composite",
                            display,
                            &bloom.composite_pipeline,
                            &t.scene_bg,
                            Some(&bt.glow_bg),
                        );
                    } else if let Some(combined) = &t.combined {
                        helpers::blit(
                            encoder,
                            "combine",
                            &combined.view,
                            &bloom.combine_pipeline,
                            &t.scene_bg,
                            Some(&bt.glow_bg),
                        );
                    }
                }
                Stage::Lens { tonemap } => {
                    let Some(lens) = &self.lens else {
                        continue;
                    };
                    let source = if tonemap {
                        t.scene_lens_bg.as_ref()
                    } else {
                        t.combined.as_ref().map(|c| &c.lens_bg)
                    };
                    if let Some(bg) = source {
                        helpers::blit(encoder, "lens", display, &lens.pipeline, bg, None);
                    }
                }
                Stage::Present => helpers::blit(
                    encoder,
                    "present",
                    display,
                    &self.post.present_pipeline,
                    &t.scene_bg,
                    None,
                ),
            }
        }
    }
}

impl RenderBackend for GpuRenderer {
    fn resize(&mut self, sizes: &TargetSizes) {
        let Some(inner) = self.inner.as_mut() else {
            return;
        };
        let surface = sizes.surface;
        if surface.is_empty() {
            return;
        }
        if inner.config.width != surface.width || inner.config.height != surface.height {
            inner.config.width = surface.width;
            inner.config.height = surface.height;
            inner.surface.configure(&inner.device, &inner.config);
            inner.needs_reconfigure = false;
        }
        if inner.targets.sizes == *sizes {
            return;
        }
        // Swap in a complete set so no pass sees mixed sizes
        let next = FrameTargets::create(&inner.device, &inner.post, inner.lens.as_ref(), *sizes);
        let previous = std::mem::replace(&mut inner.targets, next);
        previous.destroy();
        log::debug!("[render] targets rebuilt at {}x{}", surface.width, surface.height);
    }

    fn render(&mut self, frame: &FrameSnapshot) -> Result<(), RenderError> {
        let Some(inner) = self.inner.as_mut() else {
            return Err(RenderError::Other("renderer released".into()));
        };
        if inner.needs_reconfigure {
            inner.surface.configure(&inner.device, &inner.config);
            inner.needs_reconfigure = false;
        }
        let output = match inner.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                inner.needs_reconfigure = true;
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::Timeout) => return Err(RenderError::Timeout),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(e.to_string())),
        };
        let display = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        inner.scene.write_uniforms(&inner.queue, frame);
        inner.write_post_uniforms(frame);

        let mut encoder = inner
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        inner.encode_stages(&mut encoder, &display);
        inner.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(&mut self) {
        let Some(inner) = self.inner.take() else {
            return;
        };
        inner.targets.destroy();
        inner.scene.destroy();
        inner.post.uniform_buffer.destroy();
        if let Some(lens) = &inner.lens {
            lens.destroy();
        }
        log::info!("[render] GPU resources released");
    }
}
