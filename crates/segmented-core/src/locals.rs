//! # Theming and locals
//!
//! UI-wide parameters live in thread‑local "composition locals" rather than
//! being threaded through every constructor:
//!
//! - `Theme`: colors for the picker track, highlight, dividers and text.
//! - `Density`: dp→px scale factor.
//!
//! Override them for a subtree with `with_theme` / `with_density`:
//!
//! ```rust
//! use segmented_core::*;
//!
//! let light = Theme {
//!     background: Color::WHITE,
//!     on_surface: Color::from_hex("#222222"),
//!     ..Theme::default()
//! };
//!
//! with_theme(light, || {
//!     assert_eq!(theme().background, Color::WHITE);
//! });
//! ```
//!
//! Layout and widgets read from `theme()` and `density()`; the values are
//! resolved while composing and painting, so a scope must enclose both.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::Color;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

/// density‑independent pixels (dp)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dp(pub f32);

impl Dp {
    /// Converts this dp value into physical pixels using the current Density.
    pub fn to_px(self) -> f32 {
        self.0 * density().scale
    }
}

/// Convenience: convert a raw dp scalar into px using current Density.
pub fn dp_to_px(dp: f32) -> f32 {
    Dp(dp).to_px()
}

pub fn px_to_dp(px: f32) -> f32 {
    let scale = density().scale;
    if scale > 0.0 { px / scale } else { px }
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local<T: 'static>(v: T) {
    LOCALS_STACK.with(|st| {
        let mut st = st.borrow_mut();
        if st.is_empty() {
            st.push(HashMap::new());
        }
        if let Some(top) = st.last_mut() {
            top.insert(TypeId::of::<T>(), Box::new(v));
        }
    });
}

fn local<T: Copy + Default + 'static>() -> T {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return *t;
            }
        }
        T::default()
    })
}

/// Colors used by the picker and the primitive widgets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Scene clear color.
    pub background: Color,
    /// Default text color.
    pub on_surface: Color,
    /// Track behind all segments.
    pub picker_track: Color,
    /// Fill of the selection highlight.
    pub highlight: Color,
    /// Drop shadow under the highlight.
    pub highlight_shadow: Color,
    /// Stroke of the `Stroked` highlight style.
    pub highlight_stroke: Color,
    /// Separators between segments.
    pub divider: Color,
    /// Underline rule and other accents.
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_hex("#121212"),
            on_surface: Color::from_hex("#DDDDDD"),
            picker_track: Color::from_hex("#8E8E9333"),
            highlight: Color::from_hex("#FFFFFFCC"),
            highlight_shadow: Color::from_hex("#00000026"),
            highlight_stroke: Color::from_hex("#FFFFFF99"),
            divider: Color::from_hex("#8E8E9366"),
            accent: Color::from_hex("#0A84FF"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density {
    pub scale: f32, // dp→px multiplier
}
impl Default for Density {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

pub fn with_theme<R>(theme: Theme, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local(theme);
        f()
    })
}

pub fn with_density<R>(density: Density, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local(density);
        f()
    })
}

pub fn theme() -> Theme {
    local::<Theme>()
}

pub fn density() -> Density {
    local::<Density>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_scopes_nest_and_unwind() {
        assert_eq!(dp_to_px(10.0), 10.0);
        with_density(Density { scale: 2.0 }, || {
            assert_eq!(dp_to_px(10.0), 20.0);
            with_density(Density { scale: 3.0 }, || {
                assert_eq!(px_to_dp(30.0), 10.0);
            });
            assert_eq!(dp_to_px(1.5), 3.0);
        });
        assert_eq!(density(), Density::default());
    }
}
