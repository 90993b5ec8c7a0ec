//! Layout and paint.
//!
//! The view tree is mirrored into a taffy flexbox tree, laid out against the
//! surface size, then walked once to emit scene nodes, hit regions and
//! semantics nodes. Modifiers are in dp; everything emitted is in px.
//! `on_layout` observers are called last, with global bounds in dp.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;

use segmented_core::*;
use taffy::NodeId;
use taffy::prelude::{
    AvailableSpace, Display, FlexDirection, Position, Style, TaffyTree, auto, length, percent,
};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Clone)]
enum NodeCtx {
    Text { text: String, font_dp: f32 },
    Container,
}

/// Rough single-line text metrics: average glyph advance of 0.6em, line
/// height of 1.3em.
pub fn estimate_text_px(text: &str, font_px: f32) -> (f32, f32) {
    let glyphs = text.graphemes(true).count() as f32;
    (glyphs * font_px * 0.6, font_px * 1.3)
}

fn style_from_modifier(m: &Modifier, kind: &ViewKind) -> Style {
    let px = dp_to_px;
    let mut s = Style {
        display: Display::Flex,
        ..Style::default()
    };

    let is_row = matches!(kind, ViewKind::Row);
    s.flex_direction = if is_row {
        FlexDirection::Row
    } else {
        FlexDirection::Column
    };

    s.align_items = if matches!(kind, ViewKind::Text { .. }) {
        Some(AlignItems::FlexStart)
    } else {
        Some(AlignItems::Stretch)
    };
    s.justify_content = Some(JustifyContent::FlexStart);
    if let Some(a) = m.align_items_container {
        s.align_items = Some(a);
    }
    if let Some(j) = m.justify_content {
        s.justify_content = Some(j);
    }

    if let Some(g) = m.flex_grow {
        s.flex_grow = g;
    }
    if let Some(sh) = m.flex_shrink {
        s.flex_shrink = sh;
    }
    if let Some(b_dp) = m.flex_basis {
        s.flex_basis = length(px(b_dp.max(0.0)));
    }
    if let Some(a) = m.align_self {
        s.align_self = Some(a);
    }

    if let Some(PositionType::Absolute) = m.position_type {
        s.position = Position::Absolute;
        s.inset = taffy::geometry::Rect {
            left: m.offset_left.map(|v| length(px(v))).unwrap_or_else(auto),
            right: auto(),
            top: m.offset_top.map(|v| length(px(v))).unwrap_or_else(auto),
            bottom: auto(),
        };
    }

    if let Some(pv_dp) = m.padding_values {
        s.padding = taffy::geometry::Rect {
            left: length(px(pv_dp.left)),
            right: length(px(pv_dp.right)),
            top: length(px(pv_dp.top)),
            bottom: length(px(pv_dp.bottom)),
        };
    } else if let Some(p_dp) = m.padding {
        let v = length(px(p_dp));
        s.padding = taffy::geometry::Rect {
            left: v,
            right: v,
            top: v,
            bottom: v,
        };
    }

    // Explicit size wins
    let mut width_set = false;
    let mut height_set = false;
    if let Some(sz_dp) = m.size {
        if sz_dp.width.is_finite() {
            s.size.width = length(px(sz_dp.width.max(0.0)));
            width_set = true;
        }
        if sz_dp.height.is_finite() {
            s.size.height = length(px(sz_dp.height.max(0.0)));
            height_set = true;
        }
    }
    if let Some(w_dp) = m.width {
        s.size.width = length(px(w_dp.max(0.0)));
        width_set = true;
    }
    if let Some(h_dp) = m.height {
        s.size.height = length(px(h_dp.max(0.0)));
        height_set = true;
    }

    // Main axis fill -> weight (flex: 1 1 0%), cross axis fill -> tight 100%.
    // The main axis is the parent's; a row's children are assumed to live in
    // a column unless they say otherwise via `weight`.
    if m.fill_max_h && !height_set {
        s.flex_grow = s.flex_grow.max(1.0);
        s.flex_shrink = s.flex_shrink.max(1.0);
        s.flex_basis = length(0.0);
        s.min_size.height = length(0.0);
    }
    if m.fill_max_w && !width_set {
        s.min_size.width = percent(1.0);
        s.max_size.width = percent(1.0);
    }

    if let Some(v_dp) = m.min_width {
        s.min_size.width = length(px(v_dp.max(0.0)));
    }
    if let Some(v_dp) = m.min_height {
        s.min_size.height = length(px(v_dp.max(0.0)));
    }

    s
}

fn build_node(
    v: &View,
    t: &mut TaffyTree<NodeCtx>,
    nodes_map: &mut HashMap<ViewId, NodeId>,
) -> UiResult<NodeId> {
    let style = style_from_modifier(&v.modifier, &v.kind);

    let node = match &v.kind {
        ViewKind::Text {
            text,
            font_size: font_dp,
            ..
        } => t.new_leaf_with_context(
            style,
            NodeCtx::Text {
                text: text.clone(),
                font_dp: *font_dp,
            },
        )?,
        _ => {
            let children = v
                .children
                .iter()
                .map(|c| build_node(c, t, nodes_map))
                .collect::<UiResult<Vec<_>>>()?;
            let n = t.new_with_children(style, &children)?;
            t.set_node_context(n, Some(NodeCtx::Container))?;
            n
        }
    };

    nodes_map.insert(v.id, node);
    Ok(node)
}

struct PaintCtx<'a> {
    taffy: &'a TaffyTree<NodeCtx>,
    nodes: &'a HashMap<ViewId, NodeId>,
    scene: &'a mut Scene,
    hits: &'a mut Vec<HitRegion>,
    sems: &'a mut Vec<SemNode>,
    observers: &'a mut Vec<(Rc<dyn Fn(Rect)>, Rect)>,
}

fn walk(v: &View, cx: &mut PaintCtx<'_>, parent_offset_px: (f32, f32), alpha: f32) -> UiResult<()> {
    let node = cx
        .nodes
        .get(&v.id)
        .copied()
        .ok_or(UiError::IndexOutOfRange {
            index: v.id as usize,
            len: cx.nodes.len(),
        })?;
    let l = cx.taffy.layout(node)?;
    let rect = Rect {
        x: parent_offset_px.0 + l.location.x,
        y: parent_offset_px.1 + l.location.y,
        w: l.size.width,
        h: l.size.height,
    };

    let alpha = (alpha * v.modifier.alpha.unwrap_or(1.0)).clamp(0.0, 1.0);
    let radius = v.modifier.clip_rounded.map(dp_to_px).unwrap_or(0.0);
    let mut painted = Vec::new();

    if let Some(sh) = v.modifier.shadow {
        painted.push(SceneNode::Shadow {
            rect: rect.translate(0.0, dp_to_px(sh.offset_y)),
            color: sh.color.multiply_alpha(alpha),
            radius,
            blur: dp_to_px(sh.blur),
        });
    }

    if let Some(bg) = v.modifier.background {
        painted.push(SceneNode::Rect {
            rect,
            color: bg.multiply_alpha(alpha),
            radius,
        });
    }

    if let Some(b) = &v.modifier.border {
        painted.push(SceneNode::Border {
            rect,
            color: b.color.multiply_alpha(alpha),
            width: dp_to_px(b.width),
            radius: dp_to_px(b.radius).max(radius),
        });
    }

    if let ViewKind::Text {
        text,
        color,
        font_size,
    } = &v.kind
    {
        let size_px = dp_to_px(*font_size);
        let (_, line_h) = estimate_text_px(text, size_px);
        // Single line, vertically centered in the box.
        let dy = ((rect.h - line_h) * 0.5).max(0.0);
        painted.push(SceneNode::Text {
            rect: Rect {
                x: rect.x,
                y: rect.y + dy,
                w: rect.w,
                h: line_h,
            },
            text: text.clone(),
            color: color.multiply_alpha(alpha),
            size: size_px,
        });
    }

    if alpha > 0.0 {
        cx.scene.nodes.extend(painted);
    }

    if let Some(on_tap) = &v.modifier.on_tap {
        cx.hits.push(HitRegion {
            id: v.id,
            rect,
            on_tap: Some(on_tap.clone()),
            z_index: v.modifier.z_index,
        });
    }

    if let Some(s) = &v.semantics {
        cx.sems.push(SemNode {
            id: v.id,
            role: s.role,
            label: s.label.clone().or_else(|| match &v.kind {
                ViewKind::Text { text, .. } => Some(text.clone()),
                _ => None,
            }),
            rect,
            selected: s.selected,
            enabled: s.enabled,
        });
    }

    if let Some(obs) = &v.modifier.on_layout {
        let scale = density().scale.max(f32::EPSILON);
        cx.observers.push((obs.clone(), rect.scale(1.0 / scale)));
    }

    for c in &v.children {
        walk(c, cx, (rect.x, rect.y), alpha)?;
    }
    Ok(())
}

/// Lays out `root` on a surface of `size_px` and paints it.
pub fn layout_and_paint(root: &View, size_px: (u32, u32)) -> UiResult<LayoutOutput> {
    // Assign ids
    fn stamp(mut v: View, id: &mut u64) -> View {
        v.id = *id;
        *id += 1;
        v.children = v.children.into_iter().map(|c| stamp(c, id)).collect();
        v
    }
    let mut next_id = 1u64;
    let root = stamp(root.clone(), &mut next_id);

    let mut taffy: TaffyTree<NodeCtx> = TaffyTree::new();
    let mut nodes_map = HashMap::new();
    let root_node = build_node(&root, &mut taffy, &mut nodes_map)?;

    let mut rs = taffy.style(root_node)?.clone();
    rs.size.width = length(size_px.0 as f32);
    rs.size.height = length(size_px.1 as f32);
    taffy.set_style(root_node, rs)?;

    let available = taffy::geometry::Size {
        width: AvailableSpace::Definite(size_px.0 as f32),
        height: AvailableSpace::Definite(size_px.1 as f32),
    };

    taffy.compute_layout_with_measure(
        root_node,
        available,
        |known, _avail, _node, ctx, _style| match ctx {
            Some(NodeCtx::Text { text, font_dp }) => {
                let (w, h) = estimate_text_px(text, dp_to_px(*font_dp));
                taffy::geometry::Size {
                    width: known.width.unwrap_or(w),
                    height: known.height.unwrap_or(h),
                }
            }
            Some(NodeCtx::Container) | None => taffy::geometry::Size::ZERO,
        },
    )?;

    let mut scene = Scene {
        clear_color: theme().background,
        nodes: vec![],
    };
    let mut hits = vec![];
    let mut sems = vec![];
    let mut observers = vec![];

    {
        let mut cx = PaintCtx {
            taffy: &taffy,
            nodes: &nodes_map,
            scene: &mut scene,
            hits: &mut hits,
            sems: &mut sems,
            observers: &mut observers,
        };
        walk(&root, &mut cx, (0.0, 0.0), 1.0)?;
    }

    for (obs, rect_dp) in observers {
        obs(rect_dp);
    }

    // Low z first; topmost is found by iter().rev().
    hits.sort_by(|a, b| a.z_index.partial_cmp(&b.z_index).unwrap_or(Ordering::Equal));

    log::trace!(
        "layout_and_paint: {} views, {} scene nodes, {} hit regions",
        nodes_map.len(),
        scene.nodes.len(),
        hits.len()
    );

    Ok((scene, hits, sems))
}
