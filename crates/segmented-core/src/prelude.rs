pub use crate::alignment::{
    AlignmentId, AlignmentKey, HorizontalAlignment, HorizontalCenterAlignment, VerticalAlignment,
    VerticalCenterAlignment,
};
pub use crate::animation::*;
pub use crate::color::Color;
pub use crate::error::{UiError, UiResult};
pub use crate::geometry::{Rect, Size, Vec2};
pub use crate::locals::{
    Density, Dp, Theme, density, dp_to_px, px_to_dp, theme, with_density, with_theme,
};
pub use crate::modifier::{Modifier, PaddingValues};
pub use crate::runtime::{
    ComposeGuard, Frame, HitRegion, Scheduler, SemNode, forget_with_prefix, peek_with_key,
    remember_with_key, request_animation_frame, request_relayout,
};
pub use crate::semantics::{Role, Semantics};
pub use crate::signal::{Binding, Signal, signal};
pub use crate::view::{Scene, SceneNode, View, ViewId, ViewKind};
pub use taffy::{AlignItems, AlignSelf, JustifyContent};
