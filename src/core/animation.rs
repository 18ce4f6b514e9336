use super::constants::{MAX_FRAME_STEP, REFERENCE_FRAME_MS};
use super::model::Scent;
use super::particles::{FieldParams, ParticleField};
use super::surface::DrawSurface;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

/// Callback run once on the next display frame with a millisecond timestamp.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub i32);

/// Request-next-frame primitive (requestAnimationFrame in the browser).
pub trait FrameScheduler {
    /// Returns `None` if the host refused the request.
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameRequest>;
    fn cancel_frame(&self, request: FrameRequest);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for Rc<T> {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameRequest> {
        (**self).request_frame(callback)
    }
    fn cancel_frame(&self, request: FrameRequest) {
        (**self).cancel_frame(request)
    }
}

/// Elapsed reference frames between two frame timestamps. The first frame
/// counts as one; stalls are capped at `MAX_FRAME_STEP`.
#[inline]
pub fn frames_between(prev_ms: Option<f64>, now_ms: f64) -> f32 {
    match prev_ms {
        None => 1.0,
        Some(prev) => {
            let frames = ((now_ms - prev) / REFERENCE_FRAME_MS) as f32;
            if frames.is_finite() {
                frames.clamp(0.0, MAX_FRAME_STEP)
            } else {
                1.0
            }
        }
    }
}

struct LoopState<S> {
    scents: Vec<Scent>,
    params: FieldParams,
    rng: StdRng,
    surface: S,
    field: Option<ParticleField>,
    last_timestamp: Option<f64>,
    pending: Option<FrameRequest>,
    running: bool,
    frames_drawn: u64,
    teardown: Vec<Box<dyn FnOnce()>>,
}

impl<S: DrawSurface> LoopState<S> {
    fn advance(&mut self, timestamp: f64) {
        let frames = frames_between(self.last_timestamp, timestamp);
        self.last_timestamp = Some(timestamp);
        // unusable surface: skip the frame, keep the loop alive
        let Some(bounds) = self.surface.bounds() else {
            return;
        };
        if self.field.is_none() {
            self.field = Some(ParticleField::new(
                &self.scents,
                bounds,
                &self.params,
                &mut self.rng,
            ));
        }
        let Some(field) = self.field.as_mut() else {
            return;
        };
        field.resize(bounds);
        field.step(frames);
        field.draw(&mut self.surface);
        self.frames_drawn += 1;
    }
}

struct Shared<S, F> {
    state: RefCell<LoopState<S>>,
    scheduler: F,
}

/// Running scent animation. Stopping is idempotent and also happens on drop.
pub struct AnimationHandle<S, F>
where
    S: DrawSurface + 'static,
    F: FrameScheduler + 'static,
{
    shared: Rc<Shared<S, F>>,
}

/// Start animating `scents` on `surface` with default tuning.
pub fn render<S, F>(scents: Vec<Scent>, surface: S, scheduler: F) -> AnimationHandle<S, F>
where
    S: DrawSurface + 'static,
    F: FrameScheduler + 'static,
{
    AnimationHandle::start(
        scents,
        surface,
        scheduler,
        FieldParams::default(),
        StdRng::from_entropy(),
    )
}

impl<S, F> AnimationHandle<S, F>
where
    S: DrawSurface + 'static,
    F: FrameScheduler + 'static,
{
    pub fn start(
        scents: Vec<Scent>,
        surface: S,
        scheduler: F,
        params: FieldParams,
        rng: StdRng,
    ) -> Self {
        let shared = Rc::new(Shared {
            state: RefCell::new(LoopState {
                scents,
                params,
                rng,
                surface,
                field: None,
                last_timestamp: None,
                pending: None,
                running: true,
                frames_drawn: 0,
                teardown: Vec::new(),
            }),
            scheduler,
        });
        schedule_next(&shared);
        Self { shared }
    }

    pub fn stop(&self) {
        stop_shared(&self.shared);
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.borrow().running
    }

    /// Run `hook` when the animation stops (immediately if it already has).
    pub fn on_teardown(&self, hook: impl FnOnce() + 'static) {
        let mut st = self.shared.state.borrow_mut();
        if st.running {
            st.teardown.push(Box::new(hook));
        } else {
            drop(st);
            hook();
        }
    }

    /// Replace the scents: cancel the pending frame, discard every particle
    /// and restart from a freshly generated field.
    pub fn set_scents(&self, scents: Vec<Scent>) {
        let pending = {
            let mut st = self.shared.state.borrow_mut();
            st.scents = scents;
            st.field = None;
            st.last_timestamp = None;
            if !st.running {
                return;
            }
            st.pending.take()
        };
        if let Some(request) = pending {
            self.shared.scheduler.cancel_frame(request);
        }
        schedule_next(&self.shared);
    }

    pub fn frames_drawn(&self) -> u64 {
        self.shared.state.borrow().frames_drawn
    }

    pub fn with_field<R>(&self, f: impl FnOnce(Option<&ParticleField>) -> R) -> R {
        f(self.shared.state.borrow().field.as_ref())
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.shared.state.borrow().surface)
    }
}

impl<S, F> Drop for AnimationHandle<S, F>
where
    S: DrawSurface + 'static,
    F: FrameScheduler + 'static,
{
    fn drop(&mut self) {
        stop_shared(&self.shared);
    }
}

fn schedule_next<S, F>(shared: &Rc<Shared<S, F>>)
where
    S: DrawSurface + 'static,
    F: FrameScheduler + 'static,
{
    let weak = Rc::downgrade(shared);
    let request = shared.scheduler.request_frame(Box::new(move |timestamp| {
        if let Some(shared) = weak.upgrade() {
            on_frame(&shared, timestamp);
        }
    }));
    match request {
        Some(r) => shared.state.borrow_mut().pending = Some(r),
        None => {
            log::warn!("[animation] frame request refused; stopping");
            stop_shared(shared);
        }
    }
}

fn on_frame<S, F>(shared: &Rc<Shared<S, F>>, timestamp: f64)
where
    S: DrawSurface + 'static,
    F: FrameScheduler + 'static,
{
    {
        let mut st = shared.state.borrow_mut();
        st.pending = None;
        if !st.running {
            return;
        }
        st.advance(timestamp);
    }
    schedule_next(shared);
}

fn stop_shared<S, F>(shared: &Shared<S, F>)
where
    S: DrawSurface,
    F: FrameScheduler,
{
    let (pending, hooks) = {
        let mut st = shared.state.borrow_mut();
        if !st.running {
            return;
        }
        st.running = false;
        (st.pending.take(), std::mem::take(&mut st.teardown))
    };
    if let Some(request) = pending {
        shared.scheduler.cancel_frame(request);
    }
    for hook in hooks {
        hook();
    }
    log::debug!("[animation] stopped");
}
