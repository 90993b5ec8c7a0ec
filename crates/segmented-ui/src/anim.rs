use std::cell::RefCell;

use segmented_core::{
    remember_with_key, request_animation_frame,
    animation::{AnimatedValue, AnimationSpec, Interpolate},
};

/// Keyed animation of any interpolable value; returns the value for this
/// frame and asks for another frame while the animation runs.
///
/// The first call for a key starts at `target` without animating.
pub fn animate<T>(key: impl Into<String>, target: T, spec: AnimationSpec) -> T
where
    T: Interpolate + Clone + PartialEq + 'static,
{
    let anim = remember_with_key(key.into(), || RefCell::new(AnimatedValue::new(target.clone(), spec)));
    let mut a = anim.borrow_mut();
    if *a.target() != target {
        a.set_target(target);
    }
    if a.update() {
        request_animation_frame();
    }
    a.get().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use segmented_core::animation::{Easing, TestClock, reset_clock, set_clock};
    use web_time::{Duration, Instant};

    #[test]
    fn retargeting_mid_flight_keeps_running() {
        let spec = AnimationSpec::tween(Duration::from_millis(100), Easing::Linear);
        let t0 = Instant::now();
        set_clock(TestClock { t: t0 });

        assert_eq!(animate("a", 0.0f32, spec), 0.0);
        assert_eq!(animate("a", 10.0f32, spec), 0.0);

        set_clock(TestClock {
            t: t0 + Duration::from_millis(50),
        });
        let mid = animate("a", 10.0f32, spec);
        assert!((mid - 5.0).abs() < 0.01);

        set_clock(TestClock {
            t: t0 + Duration::from_millis(200),
        });
        assert_eq!(animate("a", 10.0f32, spec), 10.0);
        reset_clock();
    }
}
