use crate::dom;
use crate::render::GpuRenderer;
use scrollscape_core::Engine;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type SharedEngine = Rc<RefCell<Engine<GpuRenderer>>>;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Every DOM listener the scene registered, so teardown can remove them all.
#[derive(Default)]
pub struct Listeners {
    items: Vec<Listener>,
}

impl Listeners {
    pub fn add(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.items.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    pub fn detach_all(&mut self) {
        let count = self.items.len();
        for l in self.items.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
        if count > 0 {
            log::debug!("[events] detached {count} listeners");
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.detach_all();
    }
}

/// Pointer, scroll and resize listeners on the window. Handlers only update
/// engine state; the frame loop picks the changes up on its next tick.
pub fn wire(
    canvas: &web::HtmlCanvasElement,
    engine: &SharedEngine,
) -> Result<Listeners, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let target: &web::EventTarget = window.as_ref();
    let mut listeners = Listeners::default();

    let e = engine.clone();
    listeners.add(target, "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        if let Ok(mut engine) = e.try_borrow_mut() {
            engine.on_pointer_move(ev.client_x() as f32, ev.client_y() as f32);
        }
    })?;

    let e = engine.clone();
    listeners.add(target, "scroll", move |_| {
        if let Ok(mut engine) = e.try_borrow_mut() {
            engine.on_scroll(dom::scroll_y(), dom::document_height());
        }
    })?;

    let e = engine.clone();
    let canvas = canvas.clone();
    listeners.add(target, "resize", move |_| {
        let surface = dom::sync_canvas_backing_size(&canvas);
        let Some(page) = dom::page_layout() else {
            return;
        };
        if let Ok(mut engine) = e.try_borrow_mut() {
            engine.on_resize(page, surface);
            engine.on_scroll(dom::scroll_y(), dom::document_height());
        }
    })?;

    log::info!("[events] {} listeners attached", listeners.len());
    Ok(listeners)
}
