//! Alignment anchors.
//!
//! An anchor resolves to an offset inside an extent (a width or a height).
//! Two views are aligned on an anchor by moving the child so that its anchor
//! lands on the container's anchor:
//!
//! ```rust
//! use segmented_core::alignment::*;
//!
//! // A 60dp wide child centered in a 100dp container starts at x = 20.
//! let dx = HorizontalAlignment::Custom(AlignmentKey::HorizontalCenter).align_offset(100.0, 60.0);
//! assert_eq!(dx, 20.0);
//! ```
//!
//! The named anchors below resolve exactly like the built-in center, but
//! being separate keys they let a layout opt a single child into a shared
//! alignment (the picker aligns its highlight to the active segment only).

/// A named alignment anchor with a default value derived from an extent.
pub trait AlignmentId {
    fn default_value(extent: f32) -> f32;
}

pub struct HorizontalCenterAlignment;

impl AlignmentId for HorizontalCenterAlignment {
    fn default_value(extent: f32) -> f32 {
        extent * 0.5
    }
}

pub struct VerticalCenterAlignment;

impl AlignmentId for VerticalCenterAlignment {
    fn default_value(extent: f32) -> f32 {
        extent * 0.5
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlignmentKey {
    HorizontalCenter,
    VerticalCenter,
}

impl AlignmentKey {
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            AlignmentKey::HorizontalCenter => HorizontalCenterAlignment::default_value(extent),
            AlignmentKey::VerticalCenter => VerticalCenterAlignment::default_value(extent),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    Leading,
    #[default]
    Center,
    Trailing,
    Custom(AlignmentKey),
}

impl HorizontalAlignment {
    pub fn resolve(self, width: f32) -> f32 {
        match self {
            HorizontalAlignment::Leading => 0.0,
            HorizontalAlignment::Center => width * 0.5,
            HorizontalAlignment::Trailing => width,
            HorizontalAlignment::Custom(key) => key.resolve(width),
        }
    }

    /// Offset of a child of width `child` so its anchor meets the container's.
    pub fn align_offset(self, container: f32, child: f32) -> f32 {
        self.resolve(container) - self.resolve(child)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
    Custom(AlignmentKey),
}

impl VerticalAlignment {
    pub fn resolve(self, height: f32) -> f32 {
        match self {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Center => height * 0.5,
            VerticalAlignment::Bottom => height,
            VerticalAlignment::Custom(key) => key.resolve(height),
        }
    }

    pub fn align_offset(self, container: f32, child: f32) -> f32 {
        self.resolve(container) - self.resolve(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_anchors_resolve_to_center() {
        for extent in [0.0, 1.0, 32.0, 117.5] {
            assert_eq!(HorizontalCenterAlignment::default_value(extent), extent / 2.0);
            assert_eq!(VerticalCenterAlignment::default_value(extent), extent / 2.0);
            assert_eq!(
                HorizontalAlignment::Custom(AlignmentKey::HorizontalCenter).resolve(extent),
                HorizontalAlignment::Center.resolve(extent)
            );
            assert_eq!(
                VerticalAlignment::Custom(AlignmentKey::VerticalCenter).resolve(extent),
                VerticalAlignment::Center.resolve(extent)
            );
        }
    }

    #[test]
    fn vertical_offsets_for_inset_child() {
        assert_eq!(VerticalAlignment::Top.align_offset(32.0, 28.0), 0.0);
        assert_eq!(VerticalAlignment::Center.align_offset(32.0, 28.0), 2.0);
        assert_eq!(VerticalAlignment::Bottom.align_offset(32.0, 28.0), 4.0);
    }
}
