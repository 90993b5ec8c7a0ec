use std::rc::Rc;

use taffy::{AlignItems, AlignSelf, JustifyContent};

use crate::{Color, Rect, Size};

#[derive(Clone, Debug, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
    pub offset_y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaddingValues {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl PaddingValues {
    pub fn vertical(v: f32) -> Self {
        Self {
            top: v,
            bottom: v,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PositionType {
    Relative,
    Absolute,
}

/// Layout, paint and input attributes of a view. All lengths are dp.
#[derive(Clone, Default)]
pub struct Modifier {
    pub size: Option<Size>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill_max_w: bool,
    pub fill_max_h: bool,
    pub padding: Option<f32>,
    pub padding_values: Option<PaddingValues>,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub background: Option<Color>,
    pub border: Option<Border>,
    pub shadow: Option<Shadow>,
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub flex_basis: Option<f32>,
    pub align_self: Option<AlignSelf>,
    pub justify_content: Option<JustifyContent>,
    pub align_items_container: Option<AlignItems>,
    pub clip_rounded: Option<f32>,
    /// Works for hit-testing only, draw order is not changed.
    pub z_index: f32,
    pub on_tap: Option<Rc<dyn Fn()>>,
    /// Called after layout with the view's global bounds in dp.
    pub on_layout: Option<Rc<dyn Fn(Rect)>>,
    pub alpha: Option<f32>,
    pub position_type: Option<PositionType>,
    pub offset_left: Option<f32>,
    pub offset_top: Option<f32>,
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier")
            .field("size", &self.size)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fill_max_w", &self.fill_max_w)
            .field("fill_max_h", &self.fill_max_h)
            .field("padding", &self.padding)
            .field("padding_values", &self.padding_values)
            .field("background", &self.background)
            .field("border", &self.border)
            .field("shadow", &self.shadow)
            .field("flex_grow", &self.flex_grow)
            .field("align_self", &self.align_self)
            .field("clip_rounded", &self.clip_rounded)
            .field("z_index", &self.z_index)
            .field("on_tap", &self.on_tap.as_ref().map(|_| "..."))
            .field("on_layout", &self.on_layout.as_ref().map(|_| "..."))
            .field("alpha", &self.alpha)
            .field("position_type", &self.position_type)
            .field("offset_left", &self.offset_left)
            .field("offset_top", &self.offset_top)
            .finish()
    }
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Size {
            width: w,
            height: h,
        });
        self
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }
    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }
    pub fn fill_max_size(mut self) -> Self {
        self.fill_max_w = true;
        self.fill_max_h = true;
        self
    }
    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_w = true;
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(v);
        self
    }
    pub fn padding_values(mut self, padding: PaddingValues) -> Self {
        self.padding_values = Some(padding);
        self
    }
    pub fn min_width(mut self, w: f32) -> Self {
        self.min_width = Some(w);
        self
    }
    pub fn min_height(mut self, h: f32) -> Self {
        self.min_height = Some(h);
        self
    }
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
    pub fn border(mut self, width: f32, color: Color, radius: f32) -> Self {
        self.border = Some(Border {
            width,
            color,
            radius,
        });
        self
    }
    pub fn shadow(mut self, color: Color, blur: f32, offset_y: f32) -> Self {
        self.shadow = Some(Shadow {
            color,
            blur,
            offset_y,
        });
        self
    }
    pub fn flex_grow(mut self, v: f32) -> Self {
        self.flex_grow = Some(v);
        self
    }
    pub fn flex_shrink(mut self, v: f32) -> Self {
        self.flex_shrink = Some(v);
        self
    }
    pub fn flex_basis(mut self, v: f32) -> Self {
        self.flex_basis = Some(v);
        self
    }
    /// Share the main axis equally with other weighted siblings.
    pub fn weight(self, w: f32) -> Self {
        self.flex_grow(w).flex_shrink(1.0).flex_basis(0.0)
    }
    pub fn align_self_center(mut self) -> Self {
        self.align_self = Some(AlignSelf::Center);
        self
    }
    pub fn justify_content(mut self, j: JustifyContent) -> Self {
        self.justify_content = Some(j);
        self
    }
    pub fn align_items(mut self, a: AlignItems) -> Self {
        self.align_items_container = Some(a);
        self
    }
    pub fn clip_rounded(mut self, radius: f32) -> Self {
        self.clip_rounded = Some(radius);
        self
    }
    pub fn z_index(mut self, z: f32) -> Self {
        self.z_index = z;
        self
    }
    pub fn on_tap(mut self, f: impl Fn() + 'static) -> Self {
        self.on_tap = Some(Rc::new(f));
        self
    }
    pub fn on_layout(mut self, f: impl Fn(Rect) + 'static) -> Self {
        self.on_layout = Some(Rc::new(f));
        self
    }
    pub fn alpha(mut self, a: f32) -> Self {
        self.alpha = Some(a);
        self
    }
    pub fn absolute(mut self) -> Self {
        self.position_type = Some(PositionType::Absolute);
        self
    }
    pub fn offset(mut self, left: f32, top: f32) -> Self {
        self.offset_left = Some(left);
        self.offset_top = Some(top);
        self
    }
}
