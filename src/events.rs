use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keeps a canvas backing store in sync with its laid-out size. Observes the
/// canvas element itself, so a canvas that was hidden or 0x0 at mount is
/// picked up once it gets a layout. Disconnected when dropped.
pub struct ResizeSubscription {
    observer: web::ResizeObserver,
    _closure: Closure<dyn FnMut()>,
}

impl ResizeSubscription {
    pub fn watch_canvas(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        dom::sync_canvas_backing_size(canvas);
        let canvas_resize = canvas.clone();
        let closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        let observer = web::ResizeObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!(format!("resize observer: {:?}", e)))?;
        // also fires once right away with the current size
        observer.observe(canvas);
        Ok(Self {
            observer,
            _closure: closure,
        })
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        self.observer.disconnect();
        log::debug!("[resize] observer disconnected");
    }
}
