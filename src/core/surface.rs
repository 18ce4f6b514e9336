use super::color::Rgb;
use glam::Vec2;

/// Drawable area in surface pixels. Only non-empty, finite sizes exist.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    width: f32,
    height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        (ok(width) && ok(height)).then_some(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }

    /// Wrap a point onto the torus [0, w) x [0, h).
    #[inline]
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }
}

#[inline]
fn wrap_axis(v: f32, extent: f32) -> f32 {
    if !v.is_finite() {
        return extent * 0.5;
    }
    let w = v.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if w >= extent {
        0.0
    } else {
        w
    }
}

/// How glows combine with what is already drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Blend {
    /// Plain alpha compositing; reads well on light backgrounds.
    #[default]
    Normal,
    /// Overlapping glows add up and brighten.
    Additive,
}

impl Blend {
    /// Canvas `globalCompositeOperation` value.
    pub fn composite_operation(self) -> &'static str {
        match self {
            Blend::Normal => "source-over",
            Blend::Additive => "lighter",
        }
    }
}

/// Target the particle field renders into. The web build implements this on
/// a canvas 2D context; tests use a recording double.
pub trait DrawSurface {
    /// Current drawable size, or `None` when the surface is not usable
    /// (detached, zero-sized, no context).
    fn bounds(&self) -> Option<Bounds>;

    fn clear(&mut self);

    fn set_blend(&mut self, _blend: Blend) {}

    /// Soft radial glow: `color` at `opacity` in the center fading to fully
    /// transparent at `radius`.
    fn fill_glow(&mut self, center: Vec2, radius: f32, color: Rgb, opacity: f32);
}
