//! Selection policies: what a tap on segment `index` does to the current
//! selection.
//!
//! The picker itself never decides; it calls the host's action callback with
//! the tapped index. `Action::bind` is the usual way to build that callback.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use segmented_core::Binding;

/// Host-supplied override used by `Action::Custom`.
pub type PolicyFn = Rc<dyn Fn(usize, Option<usize>) -> Option<usize>>;

/// Always selects the tapped segment.
pub fn normal(index: usize) -> usize {
    index
}

/// Selects the tapped segment, or clears the selection when it is already
/// the active one.
pub fn toggle(index: usize, current: Option<usize>) -> Option<usize> {
    if current == Some(index) {
        None
    } else {
        Some(index)
    }
}

/// Runs the override registered in `policy`, or `toggle` when there is none.
pub fn custom(policy: &CustomPolicy, index: usize, current: Option<usize>) -> Option<usize> {
    policy.apply(index, current)
}

/// Shared slot holding an optional custom policy.
///
/// Clones share the slot, so the host can keep one handle and swap the
/// override while pickers built with another handle keep working.
#[derive(Clone, Default)]
pub struct CustomPolicy {
    slot: Rc<RefCell<Option<PolicyFn>>>,
}

impl CustomPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(f: impl Fn(usize, Option<usize>) -> Option<usize> + 'static) -> Self {
        let policy = Self::new();
        policy.register(f);
        policy
    }

    /// Installs `f`, replacing any previous override.
    pub fn register(&self, f: impl Fn(usize, Option<usize>) -> Option<usize> + 'static) {
        *self.slot.borrow_mut() = Some(Rc::new(f));
    }

    pub fn clear(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn is_registered(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn apply(&self, index: usize, current: Option<usize>) -> Option<usize> {
        // Release the borrow before calling: the override may re-register.
        let f = self.slot.borrow().clone();
        match f {
            Some(f) => f(index, current),
            None => toggle(index, current),
        }
    }
}

impl fmt::Debug for CustomPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPolicy")
            .field("registered", &self.is_registered())
            .finish()
    }
}

#[derive(Clone, Debug, Default)]
pub enum Action {
    #[default]
    Normal,
    Toggle,
    Custom(CustomPolicy),
}

impl Action {
    /// Selection after tapping `index` while `current` is selected.
    pub fn next(&self, index: usize, current: Option<usize>) -> Option<usize> {
        match self {
            Action::Normal => Some(normal(index)),
            Action::Toggle => toggle(index, current),
            Action::Custom(policy) => custom(policy, index, current),
        }
    }

    /// Tap callback that writes the next selection through `selection`.
    pub fn bind(self, selection: Binding<Option<usize>>) -> impl Fn(usize) + 'static {
        move |index| {
            let current = selection.get();
            let next = self.next(index, current);
            log::debug!("segment {index} tapped: {current:?} -> {next:?}");
            selection.set(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segmented_core::signal;

    #[test]
    fn toggle_selects_or_clears() {
        for i in 0..5 {
            assert_eq!(toggle(i, Some(i)), None);
            assert_eq!(toggle(i, None), Some(i));
            for s in (0..5).filter(|&s| s != i) {
                assert_eq!(toggle(i, Some(s)), Some(i));
            }
        }
    }

    #[test]
    fn normal_is_identity() {
        for i in 0..5 {
            assert_eq!(normal(i), i);
            assert_eq!(Action::Normal.next(i, Some(i)), Some(i));
        }
    }

    #[test]
    fn custom_falls_back_to_toggle() {
        let policy = CustomPolicy::new();
        assert!(!policy.is_registered());
        assert_eq!(custom(&policy, 2, Some(2)), None);
        assert_eq!(custom(&policy, 2, Some(1)), Some(2));

        policy.register(|i, _| Some(i + 1));
        assert!(policy.is_registered());
        assert_eq!(custom(&policy, 2, Some(2)), Some(3));

        policy.clear();
        assert_eq!(custom(&policy, 2, Some(2)), None);
    }

    #[test]
    fn clones_share_the_override() {
        let host = CustomPolicy::new();
        let action = Action::Custom(host.clone());
        host.register(|_, _| Some(0));
        assert_eq!(action.next(3, None), Some(0));
        host.clear();
        assert_eq!(action.next(3, None), Some(3));
    }

    #[test]
    fn override_may_replace_itself() {
        let policy = CustomPolicy::new();
        let handle = policy.clone();
        policy.register(move |i, _| {
            handle.clear();
            Some(i * 10)
        });
        assert_eq!(policy.apply(1, None), Some(10));
        assert!(!policy.is_registered());
        assert_eq!(policy.apply(1, Some(1)), None);
    }

    #[test]
    fn bound_action_writes_through() {
        let owner = signal(None::<usize>);
        let tap = Action::Toggle.bind(Binding::from_signal(&owner));
        tap(1);
        assert_eq!(owner.get(), Some(1));
        tap(1);
        assert_eq!(owner.get(), None);
        tap(2);
        assert_eq!(owner.get(), Some(2));
    }
}
