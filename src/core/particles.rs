use super::color::Rgb;
use super::constants::*;
use super::model::Scent;
use super::surface::{Blend, Bounds, DrawSurface};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Tuning for how scents turn into particles. Defaults come from
/// `constants.rs`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
    pub base_count: usize,
    pub intensity_scale: f32,
    pub size_scale: f32,
    pub size_variance: f32,
    pub min_size: f32,
    pub spawn_radius: f32,
    pub scent_offset: f32,
    pub max_drift: f32,
    pub opacity_min: f32,
    pub opacity_max: f32,
    pub wobble_amplitude_max: f32,
    pub wobble_frequency_min: f32,
    pub wobble_frequency_max: f32,
    pub blend: Blend,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            base_count: BASE_COUNT,
            intensity_scale: INTENSITY_SCALE,
            size_scale: SIZE_SCALE,
            size_variance: SIZE_VARIANCE,
            min_size: MIN_PARTICLE_SIZE,
            spawn_radius: SPAWN_RADIUS,
            scent_offset: SCENT_OFFSET,
            max_drift: MAX_DRIFT,
            opacity_min: OPACITY_MIN,
            opacity_max: OPACITY_MAX,
            wobble_amplitude_max: WOBBLE_AMPLITUDE_MAX,
            wobble_frequency_min: WOBBLE_FREQUENCY_MIN,
            wobble_frequency_max: WOBBLE_FREQUENCY_MAX,
            blend: Blend::default(),
        }
    }
}

impl FieldParams {
    /// Particles spawned for a scent: `floor(base + intensity * scale)`.
    #[inline]
    pub fn particle_count(&self, intensity: f32) -> usize {
        let bonus = (clamp_unit(intensity) * self.intensity_scale.max(0.0)).floor();
        self.base_count + bonus as usize
    }

    #[inline]
    pub fn base_size(&self, intensity: f32) -> f32 {
        (clamp_unit(intensity) * self.size_scale).max(self.min_size)
    }
}

#[inline]
pub fn particle_count(intensity: f32) -> usize {
    FieldParams::default().particle_count(intensity)
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wobble {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Wobble {
    #[inline]
    pub fn offset(&self, time: f64) -> Vec2 {
        let angle = (time * self.frequency as f64 + self.phase as f64) as f32;
        Vec2::new(angle.sin(), angle.cos()) * self.amplitude
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub size: f32,
    pub velocity: Vec2,
    pub opacity: f32,
    /// Index of the originating scent in the field palette.
    pub scent: usize,
    pub wobble: Wobble,
}

/// All particles of one animation session.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    palette: Vec<Rgb>,
    bounds: Bounds,
    time: f64,
    blend: Blend,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(
        scents: &[Scent],
        bounds: Bounds,
        params: &FieldParams,
        rng: &mut R,
    ) -> Self {
        let palette: Vec<Rgb> = scents.iter().map(Scent::rgb).collect();
        let total: usize = scents
            .iter()
            .map(|s| params.particle_count(s.intensity))
            .sum();
        let mut particles = Vec::with_capacity(total);
        let center = bounds.center();
        let n = scents.len().max(1) as f32;

        for (i, scent) in scents.iter().enumerate() {
            let intensity = scent.clamped_intensity();
            let count = params.particle_count(intensity);
            let base_size = params.base_size(intensity);
            // rotate each scent's cloud so they don't sit on top of each other
            let offset_angle = i as f32 * PI / n;
            let cloud_center = center + Vec2::from_angle(offset_angle) * params.scent_offset;

            for _ in 0..count {
                let angle = rng.gen::<f32>() * TAU;
                let u = rng.gen::<f32>();
                let distance = u * u * params.spawn_radius;
                let position = bounds.wrap(cloud_center + Vec2::from_angle(angle) * distance);
                let velocity = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5)
                    * (2.0 * params.max_drift);
                particles.push(Particle {
                    position,
                    size: base_size + rng.gen::<f32>() * base_size * params.size_variance,
                    velocity,
                    opacity: lerp(params.opacity_min, params.opacity_max, rng.gen()),
                    scent: i,
                    wobble: Wobble {
                        amplitude: rng.gen::<f32>() * params.wobble_amplitude_max,
                        frequency: lerp(
                            params.wobble_frequency_min,
                            params.wobble_frequency_max,
                            rng.gen(),
                        ),
                        phase: rng.gen::<f32>() * TAU,
                    },
                });
            }
        }

        log::debug!(
            "[field] {} scents -> {} particles in {:.0}x{:.0}",
            scents.len(),
            particles.len(),
            bounds.width(),
            bounds.height()
        );
        Self {
            particles,
            palette,
            bounds,
            time: 0.0,
            blend: params.blend,
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn blend(&self) -> Blend {
        self.blend
    }

    #[inline]
    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    /// Number of particles that belong to each scent, in scent order.
    pub fn counts_per_scent(&self) -> Vec<usize> {
        let mut counts = vec![0; self.palette.len()];
        for p in &self.particles {
            counts[p.scent] += 1;
        }
        counts
    }

    /// Advance by `frames` reference frames (1.0 == 1/60 s).
    pub fn step(&mut self, frames: f32) {
        if !(frames > 0.0 && frames.is_finite()) {
            return;
        }
        self.time += frames as f64;
        let time = self.time;
        let bounds = self.bounds;
        for p in &mut self.particles {
            let displacement = (p.velocity + p.wobble.offset(time)) * frames;
            p.position = bounds.wrap(p.position + displacement);
        }
    }

    /// Adopt new surface bounds, keeping particles and wrapping them in.
    pub fn resize(&mut self, bounds: Bounds) {
        if bounds == self.bounds {
            return;
        }
        log::debug!(
            "[field] resize {:.0}x{:.0} -> {:.0}x{:.0}",
            self.bounds.width(),
            self.bounds.height(),
            bounds.width(),
            bounds.height()
        );
        self.bounds = bounds;
        for p in &mut self.particles {
            p.position = bounds.wrap(p.position);
        }
    }

    /// Clear the surface and redraw every particle as a soft glow.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        surface.set_blend(self.blend);
        for p in &self.particles {
            let color = self.palette.get(p.scent).copied().unwrap_or(Rgb::BLACK);
            surface.fill_glow(p.position, p.size, color, p.opacity);
        }
    }
}
