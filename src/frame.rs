use crate::render::GpuRenderer;
use instant::Instant;
use scrollscape_core::Engine;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct LoopState {
    raf_id: Cell<Option<i32>>,
    cancelled: Cell<bool>,
    tick: Tick,
}

impl LoopState {
    fn schedule(&self) {
        if self.cancelled.get() {
            return;
        }
        let Some(w) = web::window() else {
            return;
        };
        let tick = self.tick.borrow();
        let Some(cb) = tick.as_ref() else {
            return;
        };
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {e:?}"),
        }
    }
}

/// requestAnimationFrame driver. Each callback ticks the engine once and
/// schedules the next frame until the engine stops or the loop is cancelled.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub fn start(engine: Rc<RefCell<Engine<GpuRenderer>>>) -> Self {
        let state = Rc::new(LoopState {
            raf_id: Cell::new(None),
            cancelled: Cell::new(false),
            tick: Rc::new(RefCell::new(None)),
        });
        // Weak so the closure does not keep its own loop state alive
        let weak = Rc::downgrade(&state);
        let mut last = Instant::now();
        *state.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.raf_id.set(None);
            if state.cancelled.get() {
                return;
            }
            let now = Instant::now();
            let dt = (now - last).as_secs_f32();
            last = now;
            let running = match engine.try_borrow_mut() {
                Ok(mut engine) => engine.tick(dt),
                // An input handler holds the engine; try again next frame
                Err(_) => true,
            };
            if running {
                state.schedule();
            } else {
                log::info!("[frame] engine stopped, loop ends");
            }
        }) as Box<dyn FnMut()>));
        state.schedule();
        Self { state }
    }

    /// Stop scheduling frames. Idempotent.
    pub fn cancel(&self) {
        if self.state.cancelled.replace(true) {
            return;
        }
        if let (Some(id), Some(w)) = (self.state.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        log::debug!("[frame] loop cancelled");
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
        self.state.tick.borrow_mut().take();
    }
}
