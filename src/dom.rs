use scrollscape_core::{PageLayout, Section, SectionBounds, SurfaceSize, Viewport};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn viewport() -> Option<Viewport> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()? as f32;
    let height = w.inner_height().ok()?.as_f64()? as f32;
    Some(Viewport::new(width, height, w.device_pixel_ratio() as f32))
}

#[inline]
pub fn scroll_y() -> f32 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0) as f32
}

pub fn document_height() -> f32 {
    window_document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(0.0)
}

/// Document-space top/bottom of each section element. Falls back to stacked
/// viewport-tall sections when any element is missing.
pub fn section_bounds(viewport_height: f32) -> SectionBounds {
    let Some(document) = window_document() else {
        return SectionBounds::uniform(viewport_height);
    };
    let scroll = scroll_y();
    let mut bounds = SectionBounds::uniform(viewport_height);
    for section in Section::ALL {
        let Some(el) = document.get_element_by_id(section.element_id()) else {
            log::warn!(
                "[dom] missing #{} element, using uniform section layout",
                section.element_id()
            );
            return SectionBounds::uniform(viewport_height);
        };
        let rect = el.get_bounding_client_rect();
        bounds.spans[section.index()] = (rect.top() as f32 + scroll, rect.bottom() as f32 + scroll);
    }
    bounds
}

pub fn page_layout() -> Option<PageLayout> {
    let viewport = viewport()?;
    Some(PageLayout {
        viewport,
        document_height: document_height(),
        sections: section_bounds(viewport.height),
    })
}

/// `data-*` attributes of the canvas as override pairs, prefix stripped.
pub fn canvas_overrides(canvas: &web::HtmlCanvasElement) -> Vec<(String, String)> {
    canvas
        .get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| {
            let key = name.strip_prefix("data-")?.to_string();
            let value = canvas.get_attribute(&name).unwrap_or_default();
            Some((key, value))
        })
        .collect()
}

/// Match the canvas backing store to its CSS size times the device pixel
/// ratio and report the resulting drawable size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> SurfaceSize {
    let Some(w) = web::window() else {
        return SurfaceSize::new(canvas.width(), canvas.height());
    };
    let dpr = w.device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
    SurfaceSize::new(w_px, h_px)
}
