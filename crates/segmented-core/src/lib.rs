//! # Views, bindings and keyed state
//!
//! `segmented-core` is the small runtime the segmented picker is built on.
//! Views are plain values rebuilt on every frame; anything that has to
//! survive between frames lives in keyed slots or in host-owned signals.
//!
//! - `View` / `Modifier`: the declarative tree and its layout attributes.
//! - `Signal<T>`: an observable value owned by the host.
//! - `Binding<T>`: read/write access to someone else's value.
//! - `remember_with_key`: per-key storage that outlives a single frame.
//! - `AnimatedValue`: time-based interpolation driven by a swappable clock.
//!
//! ## Bindings
//!
//! Widgets that edit host state take a `Binding` instead of a copy:
//!
//! ```rust
//! use segmented_core::*;
//!
//! let selected = signal(None::<usize>);
//! let binding = Binding::from_signal(&selected);
//!
//! binding.set(Some(1));
//! assert_eq!(selected.get(), Some(1));
//! ```
//!
//! ## Keyed state
//!
//! ```rust
//! use segmented_core::*;
//! use std::cell::Cell;
//!
//! let a = remember_with_key("docs:counter", || Cell::new(0));
//! a.set(a.get() + 1);
//! let b = remember_with_key("docs:counter", || Cell::new(0));
//! assert_eq!(b.get(), 1);
//! ```
//!
//! ## Two-phase composition
//!
//! `Scheduler::compose` builds the tree, lays it out and paints it. Views can
//! observe their own bounds through `Modifier::on_layout`; an observer that
//! records a changed measurement calls `request_relayout`, and the scheduler
//! rebuilds the tree so that geometry depending on those bounds (like the
//! picker's highlight) is positioned in the same frame.

pub mod alignment;
pub mod animation;
pub mod color;
pub mod error;
pub mod geometry;
pub mod locals;
pub mod modifier;
pub mod prelude;
pub mod runtime;
pub mod semantics;
pub mod signal;
pub mod tests;
pub mod view;

pub use alignment::*;
pub use animation::*;
pub use color::*;
pub use error::*;
pub use geometry::*;
pub use locals::*;
pub use modifier::*;
pub use prelude::*;
pub use runtime::*;
pub use semantics::*;
pub use signal::*;
pub use view::*;
