use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|dpr| dpr.is_finite() && *dpr > 0.0)
        .unwrap_or(1.0)
}

pub fn canvas_by_id(id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{id} is not a canvas: {:?}", e)))
}

/// Match the canvas backing store to its CSS size * devicePixelRatio.
/// A canvas that is not laid out yet ends up 0x0 so the field skips frames.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    let dpr = device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr).max(0.0) as u32;
    let h_px = (rect.height() * dpr).max(0.0) as u32;
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
}
