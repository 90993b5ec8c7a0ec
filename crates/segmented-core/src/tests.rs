#[cfg(test)]
mod tests {
    use crate::COMPOSER;
    use crate::Color;
    use crate::Rect;
    use crate::Vec2;
    use crate::animation::*;
    use crate::runtime::*;
    use crate::signal::*;
    use crate::{Modifier, View, ViewKind};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use web_time::{Duration, Instant};

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let called = Rc::new(RefCell::new(false));

        let called_clone = called.clone();
        sig.subscribe(move |_| {
            *called_clone.borrow_mut() = true;
        });

        sig.set(42);
        assert!(*called.borrow());
    }

    #[test]
    fn test_binding_writes_through_to_owner() {
        let owner = signal(None::<usize>);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            owner.subscribe(move |v| seen.borrow_mut().push(*v));
        }

        let binding = Binding::from_signal(&owner);
        let copy = binding.clone();
        binding.set(Some(3));
        assert_eq!(copy.get(), Some(3));
        owner.set(None);
        assert_eq!(binding.get(), None);
        assert_eq!(*seen.borrow(), vec![Some(3), None]);
    }

    #[test]
    fn test_subscribers_may_read_the_signal() {
        let owner = signal(None::<usize>);
        let binding = Binding::from_signal(&owner);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let reader = binding.clone();
            let seen = seen.clone();
            owner.subscribe(move |_| seen.borrow_mut().push(reader.get()));
        }

        binding.set(Some(1));
        owner.update(|v| *v = v.map(|i| i + 1));
        assert_eq!(*seen.borrow(), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_subscriber_may_write_back() {
        let sig = signal(0);
        {
            let again = sig.clone();
            sig.subscribe(move |v| {
                if *v > 10 {
                    again.set(10);
                }
            });
        }
        sig.set(42);
        assert_eq!(sig.get(), 10);
    }

    #[test]
    fn test_unsubscribe() {
        let sig = signal(0);
        let count = Rc::new(Cell::new(0));
        let id = {
            let count = count.clone();
            sig.subscribe(move |_| count.set(count.get() + 1))
        };
        let other = sig.subscribe(|_| {});
        assert_ne!(id, other);

        sig.set(1);
        assert!(sig.unsubscribe(id));
        assert!(!sig.unsubscribe(id));
        sig.set(2);
        assert_eq!(count.get(), 1);
        assert_eq!(sig.subscriber_count(), 1);
    }

    #[test]
    fn test_key_based_remember() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());

        let val1 = remember_with_key("test", || 42);
        let val2 = remember_with_key("test", || 100);

        // Should return the same instance
        assert_eq!(*val1, 42);
        assert_eq!(*val2, 42); // Not 100, because key exists
    }

    #[test]
    fn test_forget_with_prefix() {
        COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());

        remember_with_key("picker:a:frames", || 1);
        remember_with_key("picker:a:highlight", || 2);
        remember_with_key("picker:b:frames", || 3);

        assert_eq!(forget_with_prefix("picker:a:"), 2);
        let b = remember_with_key("picker:b:frames", || 0);
        assert_eq!(*b, 3);
        let a = remember_with_key("picker:a:frames", || 0);
        assert_eq!(*a, 0);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));

        assert_eq!(Color::from_hex("#zz"), Color::BLACK);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }

    #[test]
    fn test_rect_inset_never_negative() {
        let r = Rect::new(0.0, 0.0, 3.0, 10.0).inset(2.0);
        assert_eq!(r, Rect::new(2.0, 2.0, 0.0, 6.0));
    }

    #[test]
    fn test_animation_deterministic() {
        let t0 = Instant::now();
        set_clock(TestClock { t: t0 });

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);
        // advance 250ms
        set_clock(TestClock {
            t: t0 + Duration::from_millis(250),
        });
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        set_clock(TestClock {
            t: t0 + Duration::from_millis(1000),
        });
        let cont = a.update();
        assert!(!cont);
        assert!((*a.get() - 10.0).abs() < 0.001);
        reset_clock();
    }

    #[test]
    fn test_speed_shortens_animation() {
        let spec = AnimationSpec::tween(Duration::from_millis(1200), Easing::Linear).speed(1.2);
        assert_eq!(spec.duration, Duration::from_millis(1000));

        let t0 = Instant::now();
        set_clock(TestClock { t: t0 });
        let mut a = AnimatedValue::new(Rect::ZERO, spec);
        a.set_target(Rect::new(100.0, 0.0, 50.0, 28.0));
        set_clock(TestClock {
            t: t0 + Duration::from_millis(500),
        });
        assert!(a.update());
        assert!((a.get().x - 50.0).abs() < 0.01);
        assert!((a.get().w - 25.0).abs() < 0.01);
        reset_clock();

        assert_eq!(AnimationSpec::fast().speed(0.0), AnimationSpec::fast());
    }

    #[test]
    fn test_spring_settles_without_wild_overshoot() {
        let easing = AnimationSpec::spring().easing;
        assert_eq!(easing.interpolate(0.0), 0.0);
        assert!((easing.interpolate(1.0) - 1.0).abs() < 1e-5);
        assert!((easing.interpolate(0.999) - 1.0).abs() < 0.01);

        let samples: Vec<f32> = (0..=200).map(|i| easing.interpolate(i as f32 / 200.0)).collect();
        let peak = samples.iter().copied().fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "a spring overshoots a little: {peak}");
        assert!(peak <= 1.1, "overshoot too large: {peak}");
        assert!(samples.iter().all(|v| *v >= 0.0));

        let critical = Easing::Spring {
            damping: 1.0,
            stiffness: 100.0,
        };
        assert!((critical.interpolate(1.0) - 1.0).abs() < 1e-5);
        assert!((0..=100).all(|i| critical.interpolate(i as f32 / 100.0) <= 1.0 + 1e-5));
    }

    #[test]
    fn test_spring_moves_smoothly_frame_to_frame() {
        let t0 = Instant::now();
        set_clock(TestClock { t: t0 });
        let spec = AnimationSpec::spring().speed(1.2);
        let mut a = AnimatedValue::new(0.0f32, spec);
        a.set_target(100.0);

        let mut prev = 0.0f32;
        let mut ms = 0;
        loop {
            ms += 16;
            set_clock(TestClock {
                t: t0 + Duration::from_millis(ms),
            });
            let running = a.update();
            let v = *a.get();
            assert!(v <= 110.0, "t={ms}ms v={v}");
            assert!((v - prev).abs() <= 25.0, "jump at t={ms}ms: {prev} -> {v}");
            prev = v;
            if !running {
                break;
            }
        }
        assert_eq!(prev, 100.0);
        assert!(Duration::from_millis(ms) >= spec.duration);
        reset_clock();
    }

    #[test]
    fn test_snap_to_stops_animation() {
        let mut a = AnimatedValue::new(0.0f32, AnimationSpec::default());
        a.set_target(1.0);
        assert!(a.is_animating());
        a.snap_to(5.0);
        assert!(!a.is_animating());
        assert_eq!(*a.get(), 5.0);
        assert_eq!(*a.target(), 5.0);
    }

    #[test]
    fn test_compose_reruns_while_relayout_requested() {
        let builds = Rc::new(Cell::new(0));
        let mut sched = Scheduler::with_size(100, 100);
        let frame = sched
            .compose(
                {
                    let builds = builds.clone();
                    move |_| {
                        builds.set(builds.get() + 1);
                        View::new(0, ViewKind::Box).modifier(Modifier::new())
                    }
                },
                |_, _| {
                    request_relayout();
                    Ok((Default::default(), vec![], vec![]))
                },
            )
            .unwrap();
        assert_eq!(builds.get(), MAX_LAYOUT_PASSES);
        assert_eq!(frame.passes, MAX_LAYOUT_PASSES);
        assert!(!frame.needs_redraw);
    }

    #[test]
    fn test_frame_tap_hits_topmost_region() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let region = |id: u64, z: f32| {
            let hits = hits.clone();
            HitRegion {
                id,
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                on_tap: Some(Rc::new(move || hits.borrow_mut().push(id))),
                z_index: z,
            }
        };
        let frame = Frame {
            scene: Default::default(),
            hit_regions: vec![region(1, 0.0), region(2, 1.0)],
            semantics_nodes: vec![],
            needs_redraw: false,
            passes: 1,
        };
        assert!(frame.tap(Vec2 { x: 5.0, y: 5.0 }));
        assert!(!frame.tap(Vec2 { x: 50.0, y: 5.0 }));
        assert_eq!(*hits.borrow(), vec![2]);
    }
}
