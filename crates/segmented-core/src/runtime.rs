use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::UiResult;
use crate::{Rect, Scene, Vec2, View, semantics::Role};

/// Upper bound on measure/relayout passes per `Scheduler::compose`.
pub const MAX_LAYOUT_PASSES: usize = 3;

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
    static RELAYOUT_REQUESTED: Cell<bool> = const { Cell::new(false) };
    static FRAME_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

/// State that outlives a single composition, keyed by string.
#[derive(Default)]
pub struct Composer {
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

pub struct ComposeGuard {
    _private: (),
}

impl ComposeGuard {
    pub fn begin() -> Self {
        RELAYOUT_REQUESTED.with(|r| r.set(false));
        FRAME_REQUESTED.with(|r| r.set(false));
        ComposeGuard { _private: () }
    }
}

/// Key-based remember: returns the value stored under `key`, creating it
/// with `init` on first use.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let existing = COMPOSER.with(|c| {
        let c = c.borrow();
        c.keyed_slots
            .get(&key)
            .map(|slot| slot.downcast_ref::<Rc<T>>().cloned())
    });
    match existing {
        Some(Some(rc)) => return rc,
        Some(None) => log::warn!(
            "remember_with_key: key '{}' reused with a different type; replacing.",
            key
        ),
        None => {}
    }

    // `init` runs outside the composer borrow so it may remember too.
    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| {
        c.borrow_mut().keyed_slots.insert(key, Box::new(rc.clone()));
    });
    rc
}

/// Looks up a keyed slot without creating it.
pub fn peek_with_key<T: 'static>(key: &str) -> Option<Rc<T>> {
    COMPOSER.with(|c| {
        c.borrow()
            .keyed_slots
            .get(key)
            .and_then(|slot| slot.downcast_ref::<Rc<T>>().cloned())
    })
}

/// Drops every keyed slot whose key starts with `prefix`. Returns how many
/// slots were released.
pub fn forget_with_prefix(prefix: &str) -> usize {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let before = c.keyed_slots.len();
        c.keyed_slots.retain(|k, _| !k.starts_with(prefix));
        before - c.keyed_slots.len()
    })
}

/// Ask the scheduler for another layout pass within the current frame
/// (a measurement changed and the tree depends on it).
pub fn request_relayout() {
    RELAYOUT_REQUESTED.with(|r| r.set(true));
}

/// Ask the host to draw another frame (an animation is in flight).
pub fn request_animation_frame() {
    FRAME_REQUESTED.with(|r| r.set(true));
}

fn take_relayout_request() -> bool {
    RELAYOUT_REQUESTED.with(|r| r.replace(false))
}

fn take_animation_frame_request() -> bool {
    FRAME_REQUESTED.with(|r| r.replace(false))
}

/// Output of one composition: scene plus input and semantics.
pub struct Frame {
    pub scene: Scene,
    pub hit_regions: Vec<HitRegion>,
    pub semantics_nodes: Vec<SemNode>,
    /// An animation is still running; compose again on the next tick.
    pub needs_redraw: bool,
    /// Layout passes it took to settle this frame.
    pub passes: usize,
}

impl Frame {
    /// Topmost hit region containing `p` (regions are sorted low z first).
    pub fn hit_test(&self, p: Vec2) -> Option<&HitRegion> {
        self.hit_regions.iter().rev().find(|h| h.rect.contains(p))
    }

    /// Dispatches a tap at `p` (px). Returns whether a handler ran.
    pub fn tap(&self, p: Vec2) -> bool {
        match self.hit_test(p).and_then(|h| h.on_tap.clone()) {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }
}

#[derive(Clone)]
pub struct HitRegion {
    pub id: u64,
    pub rect: Rect,
    pub on_tap: Option<Rc<dyn Fn()>>,
    pub z_index: f32,
}

impl std::fmt::Debug for HitRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRegion")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("on_tap", &self.on_tap.as_ref().map(|_| "..."))
            .field("z_index", &self.z_index)
            .finish()
    }
}

/// Flattened semantics node produced by `layout_and_paint`.
#[derive(Clone, Debug, PartialEq)]
pub struct SemNode {
    /// Stable id, shared with the associated `HitRegion` / `ViewId`.
    pub id: u64,
    pub role: Role,
    pub label: Option<String>,
    pub rect: Rect,
    pub selected: bool,
    pub enabled: bool,
}

pub type LayoutOutput = (Scene, Vec<HitRegion>, Vec<SemNode>);

pub struct Scheduler {
    /// Surface size in px.
    pub size: (u32, u32),
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self { size: (1280, 800) }
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
        }
    }

    /// Builds, lays out and paints the root until measurements settle.
    ///
    /// Composition is two-phase: views may depend on bounds measured in a
    /// previous pass (`Modifier::on_layout`). When a measurement changes,
    /// the observer calls `request_relayout` and the tree is rebuilt with
    /// the new bounds, at most `MAX_LAYOUT_PASSES` times.
    pub fn compose<F, L>(&mut self, mut build_root: F, layout_paint: L) -> UiResult<Frame>
    where
        F: FnMut(&mut Scheduler) -> View,
        L: Fn(&View, (u32, u32)) -> UiResult<LayoutOutput>,
    {
        let mut pass = 0;
        loop {
            pass += 1;
            let _guard = ComposeGuard::begin();
            let root = build_root(self);
            let (scene, hits, sems) = layout_paint(&root, self.size)?;

            if take_relayout_request() {
                if pass < MAX_LAYOUT_PASSES {
                    log::trace!("compose: measurements changed, relayout (pass {pass})");
                    continue;
                }
                log::debug!("compose: layout did not settle after {pass} passes");
            }

            return Ok(Frame {
                scene,
                hit_regions: hits,
                semantics_nodes: sems,
                needs_redraw: take_animation_frame_request(),
                passes: pass,
            });
        }
    }
}
