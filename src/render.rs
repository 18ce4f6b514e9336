use crate::core::{Blend, Bounds, DrawSurface, Rgb};
use crate::dom;
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Canvas 2D target. The field works in CSS pixels; the context transform
/// maps them onto the devicePixelRatio-scaled backing store.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self { canvas, ctx })
    }
}

impl DrawSurface for CanvasSurface {
    fn bounds(&self) -> Option<Bounds> {
        if !self.canvas.is_connected() {
            return None;
        }
        let dpr = dom::device_pixel_ratio();
        Bounds::new(
            (self.canvas.width() as f64 / dpr) as f32,
            (self.canvas.height() as f64 / dpr) as f32,
        )
    }

    fn clear(&mut self) {
        let dpr = dom::device_pixel_ratio();
        // set, not scale: resizes must not compound the transform
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64 / dpr,
            self.canvas.height() as f64 / dpr,
        );
    }

    fn set_blend(&mut self, blend: Blend) {
        _ = self
            .ctx
            .set_global_composite_operation(blend.composite_operation());
    }

    fn fill_glow(&mut self, center: Vec2, radius: f32, color: Rgb, opacity: f32) {
        if !(radius > 0.0 && radius.is_finite()) {
            return;
        }
        let (x, y, r) = (center.x as f64, center.y as f64, radius as f64);
        let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) else {
            return;
        };
        _ = gradient.add_color_stop(0.0, &color.css_rgba(opacity));
        _ = gradient.add_color_stop(1.0, &color.css_rgba(0.0));
        self.ctx.set_fill_style(&gradient);
        self.ctx.begin_path();
        if self.ctx.arc(x, y, r, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }
}
