use std::cell::RefCell;
use std::rc::Rc;

use web_time::{Duration, Instant};

use crate::Rect;

thread_local! {
    static CLOCK: RefCell<Option<Rc<dyn Clock>>> = const { RefCell::new(None) };
}

pub(crate) fn now() -> Instant {
    CLOCK.with(|c| c.borrow().as_ref().map(|c| c.now()).unwrap_or_else(Instant::now))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Step response of a damped spring over the animation span.
    ///
    /// `damping` is the damping ratio (1.0 is critical, below it overshoots);
    /// `stiffness` is the squared natural frequency in units of the span.
    /// The curve is pinned so that it ends exactly at 1.0.
    Spring { damping: f32, stiffness: f32 },
}

/// Unit step response of a spring-mass system at normalised time `t`.
fn spring_step(damping: f32, stiffness: f32, t: f32) -> f32 {
    let zeta = damping.max(0.0);
    let omega = stiffness.max(0.0).sqrt();
    if zeta < 1.0 {
        let root = (1.0 - zeta * zeta).sqrt();
        let omega_d = omega * root;
        let decay = (-zeta * omega * t).exp();
        1.0 - decay * ((omega_d * t).cos() + zeta / root * (omega_d * t).sin())
    } else {
        // Critically damped; heavier damping is treated the same.
        1.0 - (-omega * t).exp() * (1.0 + omega * t)
    }
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Spring { damping, stiffness } => {
                let residual = 1.0 - spring_step(*damping, *stiffness, 1.0);
                spring_step(*damping, *stiffness, t) + residual * t
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            delay: Duration::ZERO,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }
    pub fn spring() -> Self {
        Self {
            duration: Duration::from_millis(500),
            easing: Easing::Spring {
                damping: 0.8,
                stiffness: 100.0,
            },
            delay: Duration::ZERO,
        }
    }
    pub fn fast() -> Self {
        Self {
            duration: Duration::from_millis(150),
            easing: Easing::EaseOut,
            delay: Duration::ZERO,
        }
    }

    /// Time-warps the animation: `speed(2.0)` runs twice as fast.
    /// Non-positive factors leave the spec untouched.
    pub fn speed(self, factor: f32) -> Self {
        if factor <= 0.0 || !factor.is_finite() {
            return self;
        }
        Self {
            duration: self.duration.div_f32(factor),
            delay: self.delay.div_f32(factor),
            ..self
        }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Rect {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Rect {
            x: self.x.interpolate(&other.x, t),
            y: self.y.interpolate(&other.y, t),
            w: self.w.interpolate(&other.w, t).max(0.0),
            h: self.h.interpolate(&other.h, t).max(0.0),
        }
    }
}

// Animation clock
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Install the animation clock for the current (UI) thread.
pub fn set_clock(clock: impl Clock) {
    CLOCK.with(|c| *c.borrow_mut() = Some(Rc::new(clock)));
}

/// Restore the system clock for the current thread.
pub fn reset_clock() {
    CLOCK.with(|c| *c.borrow_mut() = None);
}

/// A test clock you can drive deterministically.
#[derive(Clone)]
pub struct TestClock {
    pub t: Instant,
}
impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t
    }
}

/// Animated value that transitions smoothly
pub struct AnimatedValue<T: Interpolate + Clone> {
    current: T,
    target: T,
    start: T,
    spec: AnimationSpec,
    start_time: Option<Instant>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            spec,
            start_time: None,
        }
    }

    /// Retargets from wherever the value currently is.
    pub fn set_target(&mut self, target: T) {
        self.start = self.current.clone();
        self.target = target;
        self.start_time = Some(now());
    }

    /// Jumps to `value` without animating.
    pub fn snap_to(&mut self, value: T) {
        self.current = value.clone();
        self.start = value.clone();
        self.target = value;
        self.start_time = None;
    }

    pub fn update(&mut self) -> bool {
        let Some(start) = self.start_time else {
            return false;
        };
        let elapsed = now().saturating_duration_since(start);

        if elapsed < self.spec.delay {
            return true;
        }

        let animation_time = elapsed - self.spec.delay;

        if animation_time >= self.spec.duration {
            self.current = self.target.clone();
            self.start_time = None;
            return false;
        }

        let t = animation_time.as_secs_f32() / self.spec.duration.as_secs_f32();
        let eased_t = self.spec.easing.interpolate(t);
        self.current = self.start.interpolate(&self.target, eased_t);

        true
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn is_animating(&self) -> bool {
        self.start_time.is_some()
    }
}
