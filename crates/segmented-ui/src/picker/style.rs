use std::fmt;
use std::rc::Rc;

use segmented_core::*;

use crate::{Box, Column, ViewExt};

/// Produces an arbitrary view for the highlight; `None` draws nothing.
pub type SelectionRenderer = Rc<dyn Fn() -> Option<View>>;

pub const HIGHLIGHT_RADIUS: f32 = 6.0;
pub const UNDERLINE_THICKNESS: f32 = 2.0;
pub const STROKE_WIDTH: f32 = 1.0;

/// Shape drawn behind the active segment.
///
/// Every variant fills the highlight bounds; sizing and placement are the
/// picker's job.
#[derive(Clone, Default)]
pub enum SelectionStyle {
    /// Filled rounded rectangle with a soft shadow.
    #[default]
    Regular,
    /// Thin rule along the bottom edge.
    Underlined,
    /// Outlined rounded rectangle with a soft shadow.
    Stroked,
    /// Fully rounded fill.
    Capsule,
    Custom(SelectionRenderer),
}

impl SelectionStyle {
    pub fn custom(f: impl Fn() -> Option<View> + 'static) -> Self {
        SelectionStyle::Custom(Rc::new(f))
    }

    /// Renders the shape for a highlight of the given height (dp).
    pub fn render(&self, height: f32) -> Option<View> {
        let th = theme();
        let shadowed = |m: Modifier| m.shadow(th.highlight_shadow, 4.0, 1.0);
        match self {
            SelectionStyle::Regular => Some(Box(shadowed(
                Modifier::new()
                    .fill_max_size()
                    .background(th.highlight)
                    .clip_rounded(HIGHLIGHT_RADIUS),
            ))),
            SelectionStyle::Underlined => Some(
                Column(
                    Modifier::new()
                        .fill_max_size()
                        .justify_content(JustifyContent::FlexEnd),
                )
                .child(Box(Modifier::new()
                    .fill_max_width()
                    .height(UNDERLINE_THICKNESS)
                    .background(th.accent))),
            ),
            SelectionStyle::Stroked => Some(Box(shadowed(Modifier::new().fill_max_size().border(
                STROKE_WIDTH,
                th.highlight_stroke,
                HIGHLIGHT_RADIUS,
            )))),
            SelectionStyle::Capsule => Some(Box(shadowed(
                Modifier::new()
                    .fill_max_size()
                    .background(th.highlight)
                    .clip_rounded(height.max(0.0) * 0.5),
            ))),
            SelectionStyle::Custom(f) => f(),
        }
    }
}

impl fmt::Debug for SelectionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionStyle::Regular => f.write_str("Regular"),
            SelectionStyle::Underlined => f.write_str("Underlined"),
            SelectionStyle::Stroked => f.write_str("Stroked"),
            SelectionStyle::Capsule => f.write_str("Capsule"),
            SelectionStyle::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_is_a_rounded_fill() {
        let v = SelectionStyle::Regular.render(28.0).unwrap();
        assert_eq!(v.modifier.clip_rounded, Some(HIGHLIGHT_RADIUS));
        assert_eq!(v.modifier.background, Some(theme().highlight));
        assert!(v.modifier.shadow.is_some());
    }

    #[test]
    fn underline_sits_at_the_bottom() {
        let v = SelectionStyle::Underlined.render(28.0).unwrap();
        assert_eq!(v.kind, ViewKind::Column);
        assert_eq!(v.modifier.justify_content, Some(JustifyContent::FlexEnd));
        assert_eq!(v.children.len(), 1);
        assert_eq!(v.children[0].modifier.height, Some(UNDERLINE_THICKNESS));
        assert_eq!(v.children[0].modifier.background, Some(theme().accent));
    }

    #[test]
    fn stroked_has_a_border_and_no_fill() {
        let v = SelectionStyle::Stroked.render(28.0).unwrap();
        let border = v.modifier.border.clone().unwrap();
        assert_eq!(border.width, STROKE_WIDTH);
        assert_eq!(border.radius, HIGHLIGHT_RADIUS);
        assert_eq!(v.modifier.background, None);
    }

    #[test]
    fn capsule_radius_is_half_the_height() {
        let v = SelectionStyle::Capsule.render(28.0).unwrap();
        assert_eq!(v.modifier.clip_rounded, Some(14.0));
        let v = SelectionStyle::Capsule.render(-4.0).unwrap();
        assert_eq!(v.modifier.clip_rounded, Some(0.0));
    }

    #[test]
    fn custom_may_draw_nothing() {
        assert!(SelectionStyle::custom(|| None).render(28.0).is_none());
        let v = SelectionStyle::custom(|| Some(Box(Modifier::new().padding(1.0))))
            .render(28.0)
            .unwrap();
        assert_eq!(v.modifier.padding, Some(1.0));
        assert_eq!(format!("{:?}", SelectionStyle::custom(|| None)), "Custom(..)");
    }
}
