use crate::{Color, Modifier, Rect};

pub type ViewId = u64;

#[derive(Clone, Debug, PartialEq)]
pub enum ViewKind {
    Box,
    Row,
    Column,
    Text {
        text: String,
        color: Color,
        font_size: f32,
    },
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub modifier: Modifier,
    pub children: Vec<View>,
    pub semantics: Option<crate::semantics::Semantics>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            modifier: Modifier::default(),
            children: vec![],
            semantics: None,
        }
    }
    pub fn modifier(mut self, m: Modifier) -> Self {
        self.modifier = m;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn semantics(mut self, s: crate::semantics::Semantics) -> Self {
        self.semantics = Some(s);
        self
    }

    /// Indented one-line-per-view outline, used by tests and debug logging.
    pub fn outline(&self) -> String {
        fn go(v: &View, depth: usize, out: &mut String) {
            let name = match &v.kind {
                ViewKind::Box => "Box".to_string(),
                ViewKind::Row => "Row".to_string(),
                ViewKind::Column => "Column".to_string(),
                ViewKind::Text { text, .. } => format!("Text({text:?})"),
            };
            out.push_str(&"  ".repeat(depth));
            out.push_str(&name);
            if let Some(s) = &v.semantics {
                out.push_str(&format!(" [{:?}", s.role));
                if s.selected {
                    out.push_str(", selected");
                }
                out.push(']');
            }
            out.push('\n');
            for c in &v.children {
                go(c, depth + 1, out);
            }
        }
        let mut out = String::new();
        go(self, 0, &mut out);
        out
    }
}

/// Renderable scene
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Rect {
        rect: Rect,
        color: Color,
        radius: f32,
    },
    Border {
        rect: Rect,
        color: Color,
        width: f32,
        radius: f32,
    },
    Shadow {
        rect: Rect,
        color: Color,
        radius: f32,
        blur: f32,
    },
    Text {
        rect: Rect,
        text: String,
        color: Color,
        size: f32,
    },
}
