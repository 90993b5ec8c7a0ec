use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type SubId = usize;

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Shared observable value.
///
/// Subscribers run after the value is stored and the internal borrow is
/// released, so they may read the signal (or write it again).
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

impl<T: 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

struct Inner<T> {
    value: T,
    subs: Vec<(SubId, Subscriber<T>)>,
    next_sub: SubId,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: Vec::new(),
            next_sub: 0,
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn set(&self, v: T)
    where
        T: Clone,
    {
        self.update(|value| *value = v);
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F)
    where
        T: Clone,
    {
        let (value, subs) = {
            let mut inner = self.0.borrow_mut();
            f(&mut inner.value);
            let subs: Vec<Subscriber<T>> = inner.subs.iter().map(|(_, s)| s.clone()).collect();
            (inner.value.clone(), subs)
        };
        for s in subs {
            s(&value);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_sub;
        inner.next_sub += 1;
        inner.subs.push((id, Rc::new(f)));
        id
    }

    /// Removes a subscriber; returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubId) -> bool {
        let mut inner = self.0.borrow_mut();
        let before = inner.subs.len();
        inner.subs.retain(|(sub, _)| *sub != id);
        inner.subs.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.borrow().subs.len()
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}

/// Read/write access to a value owned by someone else.
///
/// A binding never stores the value: every `get` reads the owner's storage
/// and every `set` writes it, so the owner stays the single source of truth
/// and its other observers (signal subscribers) see each write.
///
/// ```rust
/// use segmented_core::*;
///
/// let selection = signal(None::<usize>);
/// let binding = Binding::from_signal(&selection);
/// binding.set(Some(2));
/// assert_eq!(selection.get(), Some(2));
/// ```
pub struct Binding<T: 'static> {
    get: Rc<dyn Fn() -> T>,
    set: Rc<dyn Fn(T)>,
}

impl<T: 'static> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            get: self.get.clone(),
            set: self.set.clone(),
        }
    }
}

impl<T: 'static> Binding<T> {
    pub fn new(get: impl Fn() -> T + 'static, set: impl Fn(T) + 'static) -> Self {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    pub fn from_signal(signal: &Signal<T>) -> Self
    where
        T: Clone,
    {
        let read = signal.clone();
        let write = signal.clone();
        Self::new(move || read.get(), move |v| write.set(v))
    }

    /// A binding over a value nobody else observes; handy for previews.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_signal(&signal(value))
    }

    pub fn get(&self) -> T {
        (self.get)()
    }

    pub fn set(&self, v: T) {
        (self.set)(v)
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}
