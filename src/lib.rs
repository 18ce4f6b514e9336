#![cfg(target_arch = "wasm32")]
use crate::core::{aggregate, AnimationHandle, Blend, FeedbackRecord, FieldParams, Scent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
pub mod core;
mod dom;
mod events;
mod frame;
mod render;

type CanvasAnimation = AnimationHandle<render::CanvasSurface, frame::RafScheduler>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(constants::LOG_LEVEL).ok();
    log::info!("candle-glow starting");
    Ok(())
}

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{context}: {e}"))
}

fn parse_scents(scents_json: &str) -> Result<Vec<Scent>, JsValue> {
    serde_json::from_str(scents_json).map_err(|e| js_error("invalid scents", e))
}

/// Animated scent visualization mounted on a canvas. A handle whose canvas
/// could not be used stays inert: every method is a no-op.
#[wasm_bindgen]
pub struct AromaHandle {
    inner: Option<CanvasAnimation>,
}

#[wasm_bindgen]
impl AromaHandle {
    /// Cancel the frame loop and detach the resize listener. Safe to call
    /// more than once.
    pub fn stop(&self) {
        if let Some(h) = &self.inner {
            h.stop();
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.inner.as_ref().map_or(false, |h| h.is_running())
    }

    /// Regenerate every particle from a new scent list.
    #[wasm_bindgen(js_name = setScents)]
    pub fn set_scents(&self, scents_json: &str) -> Result<(), JsValue> {
        let scents = parse_scents(scents_json)?;
        if let Some(h) = &self.inner {
            h.set_scents(scents);
        }
        Ok(())
    }
}

fn field_params(additive: Option<bool>) -> FieldParams {
    FieldParams {
        blend: if additive.unwrap_or(false) {
            Blend::Additive
        } else {
            Blend::Normal
        },
        ..FieldParams::default()
    }
}

fn mount(
    canvas: web::HtmlCanvasElement,
    scents: Vec<Scent>,
    params: FieldParams,
) -> anyhow::Result<CanvasAnimation> {
    // dropped on any early return below, which removes the listener again
    let resize = events::ResizeSubscription::watch_canvas(&canvas)?;
    let surface = render::CanvasSurface::new(canvas)?;
    let scheduler =
        frame::RafScheduler::new().ok_or_else(|| anyhow::anyhow!("no window for animation"))?;
    log::info!("[aroma] mounting {} scents", scents.len());
    let handle =
        AnimationHandle::start(scents, surface, scheduler, params, StdRng::from_entropy());
    handle.on_teardown(move || drop(resize));
    Ok(handle)
}

fn mount_or_inert(
    canvas: web::HtmlCanvasElement,
    scents: Vec<Scent>,
    params: FieldParams,
) -> AromaHandle {
    match mount(canvas, scents, params) {
        Ok(h) => AromaHandle { inner: Some(h) },
        Err(e) => {
            log::warn!("[aroma] visualization disabled: {:?}", e);
            AromaHandle { inner: None }
        }
    }
}

/// Start the scent animation on `canvas`. `scents_json` is a JSON array of
/// `{ name, description, intensity, color? }`. Pass `additive = true` for
/// glows that brighten where they overlap (dark backgrounds).
#[wasm_bindgen(js_name = mountAroma)]
pub fn mount_aroma(
    canvas: web::HtmlCanvasElement,
    scents_json: &str,
    additive: Option<bool>,
) -> Result<AromaHandle, JsValue> {
    let scents = parse_scents(scents_json)?;
    Ok(mount_or_inert(canvas, scents, field_params(additive)))
}

#[wasm_bindgen(js_name = mountAromaById)]
pub fn mount_aroma_by_id(
    canvas_id: Option<String>,
    scents_json: &str,
    additive: Option<bool>,
) -> Result<AromaHandle, JsValue> {
    let scents = parse_scents(scents_json)?;
    let id = canvas_id.as_deref().unwrap_or(constants::DEFAULT_CANVAS_ID);
    match dom::canvas_by_id(id) {
        Ok(canvas) => Ok(mount_or_inert(canvas, scents, field_params(additive))),
        Err(e) => {
            log::warn!("[aroma] visualization disabled: {:?}", e);
            Ok(AromaHandle { inner: None })
        }
    }
}

/// Summarize feedback records (JSON array) into per-scent averages and the
/// most recent comments, returned as JSON.
#[wasm_bindgen(js_name = aggregateFeedback)]
pub fn aggregate_feedback(records_json: &str) -> Result<String, JsValue> {
    let records: Vec<FeedbackRecord> =
        serde_json::from_str(records_json).map_err(|e| js_error("invalid feedback", e))?;
    let summary = aggregate(&records);
    serde_json::to_string(&summary).map_err(|e| js_error("encode summary", e))
}
