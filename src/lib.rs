#![cfg(target_arch = "wasm32")]
use scrollscape_core::{Engine, EngineConfig, EngineError, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod render;

use render::GpuRenderer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scrollscape-web loaded");
    Ok(())
}

/// Handle returned to the page. Dropping it or calling `teardown` stops the
/// frame loop, removes listeners and releases GPU resources.
#[wasm_bindgen]
pub struct ScrollScene {
    engine: Rc<RefCell<Engine<GpuRenderer>>>,
    frame_loop: Option<frame::FrameLoop>,
    listeners: events::Listeners,
}

#[wasm_bindgen]
impl ScrollScene {
    pub fn teardown(&mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.cancel();
        }
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.teardown(),
            Err(_) => log::warn!("[scene] engine busy during teardown"),
        }
        self.listeners.detach_all();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.engine
            .try_borrow()
            .map(|e| e.is_running())
            .unwrap_or(true)
    }

    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.engine
            .try_borrow()
            .map(|e| e.frame_count() as f64)
            .unwrap_or(0.0)
    }
}

impl Drop for ScrollScene {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Build the scene on `canvas` and start animating it.
#[wasm_bindgen]
pub async fn construct(canvas: web::HtmlCanvasElement) -> Result<ScrollScene, JsValue> {
    build(canvas)
        .await
        .map_err(|e| {
            log::error!("[scene] construct failed: {e:#}");
            js_sys::Error::new(&format!("{e:#}")).into()
        })
}

async fn build(canvas: web::HtmlCanvasElement) -> anyhow::Result<ScrollScene> {
    let surface = dom::sync_canvas_backing_size(&canvas);
    if surface.is_empty() {
        return Err(EngineError::EmptySurface {
            width: surface.width,
            height: surface.height,
        }
        .into());
    }

    let overrides = dom::canvas_overrides(&canvas);
    let (config, rejected) = EngineConfig::default()
        .with_overrides(overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    for e in &rejected {
        log::warn!("[config] {e}, keeping default");
    }

    let scene = Scene::build(&config);
    let (renderer, plan) = GpuRenderer::new(&canvas, &scene, surface).await?;

    let page = dom::page_layout().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let mut engine = Engine::new(renderer, scene, config, plan, page, surface)?;
    engine.on_scroll(dom::scroll_y(), dom::document_height());
    let engine = Rc::new(RefCell::new(engine));

    let listeners = match events::wire(&canvas, &engine) {
        Ok(listeners) => listeners,
        Err(e) => {
            engine.borrow_mut().teardown();
            return Err(anyhow::anyhow!("listener setup failed: {e:?}"));
        }
    };

    // Last, so nothing is drawn before input and layout are in place
    let frame_loop = frame::FrameLoop::start(engine.clone());
    log::info!("[scene] running");
    Ok(ScrollScene {
        engine,
        frame_loop: Some(frame_loop),
        listeners,
    })
}
