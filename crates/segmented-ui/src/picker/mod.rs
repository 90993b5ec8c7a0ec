//! Segmented picker: a row of mutually exclusive segments with an animated
//! highlight behind the active one.
//!
//! The picker does not own its selection. It reads it through a
//! `Binding<Option<usize>>` and reports taps to the host's action callback,
//! which decides the next selection (see `Action`).
//!
//! Composition is two-phase. Each segment reports its bounds through
//! `on_layout` into a keyed `FrameStore`; when a bound changes the picker
//! requests a relayout and the next pass places the highlight against the
//! measured segment.
//!
//! ```rust
//! use segmented_core::*;
//! use segmented_ui::*;
//!
//! let selection = signal(Some(0));
//! let binding = Binding::from_signal(&selection);
//! let mut sched = Scheduler::with_size(320, 64);
//!
//! let frame = sched
//!     .compose(
//!         |_| {
//!             SegmentedPicker::new(
//!                 vec!["Day", "Week", "Month"],
//!                 binding.clone(),
//!                 Action::Toggle.bind(binding.clone()),
//!                 |title: &&str, _selected| Text(*title),
//!             )
//!             .key("docs:range")
//!             .view()
//!         },
//!         layout_and_paint,
//!     )
//!     .unwrap();
//!
//! assert_eq!(frame.hit_regions.len(), 3);
//! frame.tap(frame.hit_regions[0].rect.center());
//! assert_eq!(selection.get(), None);
//! ```

pub mod action;
pub mod frames;
pub mod style;

use std::rc::Rc;

use segmented_core::*;

use crate::anim::animate;
use crate::{Box, Divider, Row, Spacer, ViewExt};

pub use action::{Action, CustomPolicy, PolicyFn, custom, normal, toggle};
pub use frames::FrameStore;
pub use style::{SelectionRenderer, SelectionStyle};

pub const DEFAULT_KEY: &str = "segmented_picker";
pub const DEFAULT_HEIGHT: f32 = 32.0;
/// Gap between a segment's bounds and its highlight, split evenly on both
/// sides.
pub const HIGHLIGHT_INSET: f32 = 4.0;
pub const SEGMENT_PADDING_V: f32 = 12.0;
pub const CORNER_RADIUS: f32 = 8.0;

const HIGHLIGHT_SPEED: f32 = 1.2;
const DIVIDER_SPEED: f32 = 2.2;

/// Size of the highlight for `selected`, or `None` when nothing valid is
/// selected.
pub fn highlight_size(frames: &[Rect], selected: Option<usize>, height: f32) -> Option<Size> {
    let frame = frames.get(selected?)?;
    Some(Size::new(
        (frame.w - HIGHLIGHT_INSET).max(0.0),
        (height - HIGHLIGHT_INSET).max(0.0),
    ))
}

/// Dividers touching the active segment disappear.
pub fn divider_opacity(index: usize, selected: Option<usize>) -> f32 {
    match selected {
        Some(s) if s == index || s == index + 1 => 0.0,
        _ => 1.0,
    }
}

/// Target geometry of a picker for one pass, before animation.
#[derive(Clone, Debug, PartialEq)]
pub struct PickerGeometry {
    /// Highlight bounds relative to the picker's top-left corner.
    pub highlight: Option<Rect>,
    /// One target opacity per divider.
    pub dividers: Vec<f32>,
}

impl PickerGeometry {
    /// `frames` and `origin` are global; the highlight comes out local to
    /// `origin`. A segment that has not been measured yet gets no highlight.
    pub fn derive(
        frames: &[Rect],
        origin: Rect,
        selected: Option<usize>,
        height: f32,
        alignment: VerticalAlignment,
    ) -> Self {
        let highlight = selected
            .and_then(|i| frames.get(i))
            .filter(|f| f.w > 0.0)
            .zip(highlight_size(frames, selected, height))
            .map(|(frame, size)| {
                let anchor = HorizontalAlignment::Custom(AlignmentKey::HorizontalCenter);
                Rect::new(
                    frame.x - origin.x + anchor.align_offset(frame.w, size.width),
                    alignment.align_offset(height, size.height),
                    size.width,
                    size.height,
                )
            });

        let dividers = (0..frames.len().saturating_sub(1))
            .map(|i| divider_opacity(i, selected))
            .collect();

        Self {
            highlight,
            dividers,
        }
    }
}

fn frames_key(key: &str) -> String {
    format!("{key}:frames")
}

/// Drops the frames and animations remembered for the picker keyed `key`
/// (call when the host stops showing it). Returns how many slots were freed.
pub fn release(key: &str) -> usize {
    let freed = forget_with_prefix(&format!("{key}:"));
    log::debug!("picker '{key}': released {freed} slots");
    freed
}

/// Frames remembered for the picker keyed `key`, if it has been composed.
pub fn measured_frames(key: &str) -> Option<Vec<Rect>> {
    peek_with_key::<FrameStore>(&frames_key(key)).map(|s| s.snapshot().to_vec())
}

type Content<T> = Rc<dyn Fn(&T, bool) -> View>;
type Label<T> = Rc<dyn Fn(&T) -> String>;

/// First text found depth-first in `view`.
fn text_of(view: &View) -> Option<String> {
    match &view.kind {
        ViewKind::Text { text, .. } => Some(text.clone()),
        _ => view.children.iter().find_map(text_of),
    }
}

pub struct SegmentedPicker<T: 'static> {
    key: String,
    options: Vec<T>,
    selection: Binding<Option<usize>>,
    action: Rc<dyn Fn(usize)>,
    content: Content<T>,
    height: f32,
    alignment: VerticalAlignment,
    style: SelectionStyle,
    decoration: Option<SelectionRenderer>,
    label: Option<Label<T>>,
}

impl<T: 'static> SegmentedPicker<T> {
    pub fn new(
        options: Vec<T>,
        selection: Binding<Option<usize>>,
        action: impl Fn(usize) + 'static,
        content: impl Fn(&T, bool) -> View + 'static,
    ) -> Self {
        Self {
            key: DEFAULT_KEY.to_string(),
            options,
            selection,
            action: Rc::new(action),
            content: Rc::new(content),
            height: DEFAULT_HEIGHT,
            alignment: VerticalAlignment::Center,
            style: SelectionStyle::Regular,
            decoration: None,
            label: None,
        }
    }

    /// Namespace for the picker's remembered state. Pickers shown at the
    /// same time need distinct keys.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height.max(0.0);
        self
    }

    /// Vertical anchor of the highlight within the picker.
    pub fn alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn style(mut self, style: SelectionStyle) -> Self {
        self.style = style;
        self
    }

    /// Extra view layered under the highlight shape.
    pub fn decoration(mut self, f: impl Fn() -> Option<View> + 'static) -> Self {
        self.decoration = Some(Rc::new(f));
        self
    }

    /// Accessibility label per option. Without one, a tab is labelled with
    /// the first text in its content.
    pub fn label(mut self, f: impl Fn(&T) -> String + 'static) -> Self {
        self.label = Some(Rc::new(f));
        self
    }

    pub fn view(&self) -> View {
        let n = self.options.len();
        let store = remember_with_key(frames_key(&self.key), || FrameStore::new(n));
        if store.sync_len(n) {
            log::debug!("picker '{}': {n} options, frames reset", self.key);
        }

        let selected = match self.selection.get() {
            Some(i) if i >= n => {
                log::debug!(
                    "picker '{}': selection {i} out of range for {n} options",
                    self.key
                );
                None
            }
            s => s,
        };

        let geometry = PickerGeometry::derive(
            &store.snapshot(),
            store.origin(),
            selected,
            self.height,
            self.alignment,
        );

        let highlight = geometry.highlight.map(|target| {
            animate(
                format!("{}:highlight", self.key),
                target,
                AnimationSpec::spring().speed(HIGHLIGHT_SPEED),
            )
        });
        let dividers: Vec<f32> = geometry
            .dividers
            .iter()
            .enumerate()
            .map(|(i, &target)| {
                animate(
                    format!("{}:divider:{i}", self.key),
                    target,
                    AnimationSpec::spring().speed(DIVIDER_SPEED),
                )
            })
            .collect();

        self.compose(&store, selected, highlight, &dividers)
    }

    fn compose(
        &self,
        store: &Rc<FrameStore>,
        selected: Option<usize>,
        highlight: Option<Rect>,
        dividers: &[f32],
    ) -> View {
        let th = theme();
        let h = self.height;

        let mut row = Vec::with_capacity(self.options.len() * 2);
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                let mut divider = Divider(h * 0.5);
                let alpha = dividers.get(i - 1).copied().unwrap_or(1.0);
                divider.modifier.alpha = Some(alpha.clamp(0.0, 1.0));
                row.push(divider);
            }
            row.push(self.segment(store, i, option, selected == Some(i)));
        }

        let origin_store = store.clone();
        Box(Modifier::new()
            .fill_max_width()
            .height(h)
            .background(th.picker_track)
            .clip_rounded(CORNER_RADIUS)
            .on_layout(move |r| {
                if origin_store.set_origin(r) {
                    request_relayout();
                }
            }))
        .semantics(Semantics::new(Role::TabList))
        .child((
            self.highlight_layer(highlight),
            Row(Modifier::new().fill_max_width().height(h)).child(row),
        ))
    }

    fn highlight_layer(&self, highlight: Option<Rect>) -> View {
        let Some(r) = highlight else {
            return Box(Modifier::new().absolute());
        };
        let decoration = self.decoration.as_ref().and_then(|f| f()).map(|d| {
            Box(Modifier::new().absolute().offset(0.0, 0.0).size(r.w, r.h)).child(d)
        });
        Box(Modifier::new().absolute().offset(r.x, r.y).size(r.w, r.h))
            .child((decoration, self.style.render(r.h)))
    }

    fn segment(&self, store: &Rc<FrameStore>, index: usize, option: &T, selected: bool) -> View {
        let action = self.action.clone();
        let store = store.clone();
        let key = self.key.clone();
        let content = (self.content)(option, selected);
        let label = match &self.label {
            Some(f) => Some(f(option)),
            None => text_of(&content),
        };
        let mut semantics = Semantics::new(Role::Tab).selected(selected);
        if let Some(label) = label {
            semantics = semantics.label(label);
        }
        Row(Modifier::new()
            .weight(1.0)
            .height(self.height)
            .padding_values(PaddingValues::vertical(SEGMENT_PADDING_V))
            .align_items(AlignItems::Center)
            .on_tap(move || action(index))
            .on_layout(move |r| match store.record(index, r) {
                Ok(true) => request_relayout(),
                Ok(false) => {}
                Err(e) => log::debug!("picker '{key}': dropping stale measurement: {e}"),
            }))
        .semantics(semantics)
        .child((Spacer(), content, Spacer()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: usize, w: f32) -> Vec<Rect> {
        (0..n)
            .map(|i| Rect::new(10.0 + i as f32 * (w + 1.0), 20.0, w, 32.0))
            .collect()
    }

    #[test]
    fn highlight_is_inset_from_its_segment() {
        let f = frames(3, 50.0);
        assert_eq!(highlight_size(&f, Some(1), 32.0), Some(Size::new(46.0, 28.0)));
        assert_eq!(highlight_size(&f, None, 32.0), None);
        assert_eq!(highlight_size(&f, Some(3), 32.0), None);

        let narrow = [Rect::new(0.0, 0.0, 3.0, 32.0)];
        assert_eq!(highlight_size(&narrow, Some(0), 2.0), Some(Size::ZERO));
    }

    #[test]
    fn dividers_next_to_the_selection_hide() {
        for n in 2..6usize {
            for s in (0..n).map(Some).chain([None]) {
                for i in 0..n - 1 {
                    let hidden = s == Some(i) || s == Some(i + 1);
                    assert_eq!(divider_opacity(i, s), if hidden { 0.0 } else { 1.0 });
                }
            }
        }
    }

    #[test]
    fn geometry_centers_highlight_on_the_segment() {
        let f = frames(3, 50.0);
        let origin = Rect::new(10.0, 20.0, 152.0, 32.0);
        let g = PickerGeometry::derive(&f, origin, Some(2), 32.0, VerticalAlignment::Center);
        assert_eq!(g.highlight, Some(Rect::new(104.0, 2.0, 46.0, 28.0)));
        assert_eq!(g.dividers, vec![1.0, 0.0]);

        let top = PickerGeometry::derive(&f, origin, Some(0), 32.0, VerticalAlignment::Top);
        assert_eq!(top.highlight.map(|r| r.y), Some(0.0));
        let bottom = PickerGeometry::derive(&f, origin, Some(0), 32.0, VerticalAlignment::Bottom);
        assert_eq!(bottom.highlight.map(|r| r.y), Some(4.0));
    }

    #[test]
    fn geometry_waits_for_measurement() {
        let unmeasured = vec![Rect::ZERO; 3];
        let g = PickerGeometry::derive(
            &unmeasured,
            Rect::ZERO,
            Some(1),
            32.0,
            VerticalAlignment::Center,
        );
        assert_eq!(g.highlight, None);
        assert_eq!(g.dividers.len(), 2);
    }

    #[test]
    fn label_comes_from_the_first_text() {
        let content = Row(Modifier::new()).child((
            Box(Modifier::new()),
            crate::Column(Modifier::new()).child((crate::Text("Week"), crate::Text("7 days"))),
        ));
        assert_eq!(text_of(&content), Some("Week".to_string()));
        assert_eq!(text_of(&Box(Modifier::new())), None);
    }

    #[test]
    fn empty_options_have_no_geometry() {
        let g = PickerGeometry::derive(&[], Rect::ZERO, Some(0), 32.0, VerticalAlignment::Center);
        assert_eq!(g.highlight, None);
        assert!(g.dividers.is_empty());
    }
}
