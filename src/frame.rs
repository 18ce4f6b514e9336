use crate::core::{FrameCallback, FrameRequest, FrameScheduler};
use std::cell::RefCell;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `FrameScheduler` backed by `requestAnimationFrame`.
pub struct RafScheduler {
    window: web::Window,
    current: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    // the callback that is running right now requests its successor, so it
    // has to outlive one more request before it can be dropped
    retired: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl RafScheduler {
    pub fn new() -> Option<Self> {
        web::window().map(|window| Self {
            window,
            current: RefCell::new(None),
            retired: RefCell::new(None),
        })
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameRequest> {
        let closure = Closure::once(move |timestamp: f64| callback(timestamp));
        let id = match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => id,
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                return None;
            }
        };
        let previous = self.current.replace(Some(closure));
        *self.retired.borrow_mut() = previous;
        Some(FrameRequest(id))
    }

    fn cancel_frame(&self, request: FrameRequest) {
        _ = self.window.cancel_animation_frame(request.0);
        self.current.borrow_mut().take();
    }
}
