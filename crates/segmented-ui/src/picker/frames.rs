use std::cell::{Cell, RefCell};

use segmented_core::{Rect, UiError, UiResult};
use smallvec::SmallVec;

/// Measurements closer than this are treated as unchanged, so float noise
/// from layout does not keep requesting relayouts.
const EPSILON: f32 = 0.01;

fn same_rect(a: &Rect, b: &Rect) -> bool {
    (a.x - b.x).abs() < EPSILON
        && (a.y - b.y).abs() < EPSILON
        && (a.w - b.w).abs() < EPSILON
        && (a.h - b.h).abs() < EPSILON
}

/// Measured bounds of every segment (dp, global space), plus the origin of
/// the picker container they are positioned against.
///
/// Always holds exactly one rect per option; see `sync_len`.
#[derive(Debug, Default)]
pub struct FrameStore {
    frames: RefCell<SmallVec<[Rect; 8]>>,
    origin: Cell<Rect>,
}

impl FrameStore {
    pub fn new(len: usize) -> Self {
        Self {
            frames: RefCell::new(SmallVec::from_elem(Rect::ZERO, len)),
            origin: Cell::new(Rect::ZERO),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resizes to `len` entries. Any change in length invalidates every
    /// recorded rect. Returns whether the store was reset.
    pub fn sync_len(&self, len: usize) -> bool {
        let mut frames = self.frames.borrow_mut();
        if frames.len() == len {
            return false;
        }
        frames.clear();
        frames.resize(len, Rect::ZERO);
        true
    }

    pub fn get(&self, index: usize) -> Option<Rect> {
        self.frames.borrow().get(index).copied()
    }

    pub fn snapshot(&self) -> SmallVec<[Rect; 8]> {
        self.frames.borrow().clone()
    }

    /// Stores the bounds measured for segment `index`. Returns whether the
    /// stored value changed.
    pub fn record(&self, index: usize, rect: Rect) -> UiResult<bool> {
        let mut frames = self.frames.borrow_mut();
        let len = frames.len();
        let slot = frames
            .get_mut(index)
            .ok_or(UiError::IndexOutOfRange { index, len })?;
        if same_rect(slot, &rect) {
            return Ok(false);
        }
        *slot = rect;
        Ok(true)
    }

    pub fn origin(&self) -> Rect {
        self.origin.get()
    }

    /// Returns whether the origin moved.
    pub fn set_origin(&self, rect: Rect) -> bool {
        if same_rect(&self.origin.get(), &rect) {
            return false;
        }
        self.origin.set(rect);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed_with_one_rect_per_option() {
        let store = FrameStore::new(4);
        assert_eq!(store.len(), 4);
        assert!(store.snapshot().iter().all(|r| *r == Rect::ZERO));
        assert!(FrameStore::new(0).is_empty());
    }

    #[test]
    fn record_reports_changes_only() {
        let store = FrameStore::new(2);
        let r = Rect::new(10.0, 0.0, 50.0, 32.0);
        assert!(store.record(1, r).unwrap());
        assert!(!store.record(1, r).unwrap());
        assert!(!store.record(1, Rect::new(10.001, 0.0, 50.0, 32.0)).unwrap());
        assert_eq!(store.get(1), Some(r));
        assert_eq!(store.get(0), Some(Rect::ZERO));
    }

    #[test]
    fn stale_index_is_an_error() {
        let store = FrameStore::new(2);
        let err = store.record(5, Rect::ZERO).unwrap_err();
        assert!(matches!(err, UiError::IndexOutOfRange { index: 5, len: 2 }));
    }

    #[test]
    fn resync_resets_everything() {
        let store = FrameStore::new(3);
        store.record(0, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(!store.sync_len(3));
        assert_eq!(store.get(0), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));

        assert!(store.sync_len(5));
        assert_eq!(store.len(), 5);
        assert!(store.snapshot().iter().all(|r| *r == Rect::ZERO));

        assert!(store.sync_len(1));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0), Some(Rect::ZERO));
    }

    #[test]
    fn origin_changes_are_reported() {
        let store = FrameStore::new(0);
        assert!(!store.set_origin(Rect::ZERO));
        assert!(store.set_origin(Rect::new(16.0, 16.0, 300.0, 32.0)));
        assert_eq!(store.origin(), Rect::new(16.0, 16.0, 300.0, 32.0));
    }
}
