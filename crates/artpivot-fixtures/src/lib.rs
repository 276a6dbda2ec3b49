//! Test support: an in-memory scene implementing `SceneHost`.
//!
//! Scenes are built through the builder methods or loaded from a JSON
//! description with [`scene_from_json`]. The scene records dialogs, undo
//! brackets and attribute writes so tests can assert on everything a run did
//! to the host.

use std::cell::RefCell;

use anyhow::{Context, Result};
use hashbrown::HashMap;
use serde::Deserialize;

use artpivot_core::{
    ArtBox, ArtLayer, NodeHandle, NodeKind, PivotError, Point2, SceneHost,
};

#[derive(Debug, Clone)]
struct NodeRecord {
    kind: NodeKind,
    children: Vec<NodeHandle>,
    parent: Option<NodeHandle>,
    source: Option<NodeHandle>,
    bool_attrs: HashMap<String, bool>,
    text_attrs: HashMap<String, String>,
    layer_boxes: HashMap<usize, ArtBox>,
    embedded_pivot: Point2,
}

impl NodeRecord {
    fn new(kind: NodeKind) -> Self {
        NodeRecord {
            kind,
            children: Vec::new(),
            parent: None,
            source: None,
            bool_attrs: HashMap::new(),
            text_attrs: HashMap::new(),
            layer_boxes: HashMap::new(),
            embedded_pivot: Point2::default(),
        }
    }
}

/// One recorded `set_text_attr` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrWrite {
    pub node: NodeHandle,
    pub attr: String,
    pub value: String,
}

/// One recorded undo-bracket event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoEvent {
    Begin(String),
    End,
}

/// In-memory stand-in for the host application's scene.
#[derive(Debug)]
pub struct InMemoryScene {
    nodes: HashMap<NodeHandle, NodeRecord>,
    selection: Vec<NodeHandle>,
    frame: u32,
    /// Field units per OGL unit, per axis. 1.0 makes both spaces coincide.
    field_per_ogl: (f64, f64),
    dialogs: RefCell<Vec<String>>,
    undo_events: Vec<UndoEvent>,
    writes: Vec<AttrWrite>,
}

impl Default for InMemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryScene {
    pub fn new() -> Self {
        InMemoryScene {
            nodes: HashMap::new(),
            selection: Vec::new(),
            frame: 1,
            field_per_ogl: (1.0, 1.0),
            dialogs: RefCell::new(Vec::new()),
            undo_events: Vec::new(),
            writes: Vec::new(),
        }
    }

    pub fn with_field_scale(mut self, x: f64, y: f64) -> Self {
        self.field_per_ogl = (x, y);
        self
    }

    pub fn set_frame(&mut self, frame: u32) {
        self.frame = frame;
    }

    pub fn add_node(&mut self, name: &str, kind: NodeKind) -> NodeHandle {
        let handle: NodeHandle = name.to_string();
        self.nodes.insert(handle.clone(), NodeRecord::new(kind));
        handle
    }

    pub fn add_drawing(&mut self, name: &str) -> NodeHandle {
        self.add_node(name, NodeKind::Drawing)
    }

    pub fn add_peg(&mut self, name: &str) -> NodeHandle {
        self.add_node(name, NodeKind::Peg)
    }

    pub fn add_group(&mut self, name: &str, children: &[NodeHandle]) -> NodeHandle {
        let handle = self.add_node(name, NodeKind::Group);
        for child in children {
            if let Some(record) = self.nodes.get_mut(child) {
                record.parent = Some(handle.clone());
            }
        }
        if let Some(record) = self.nodes.get_mut(&handle) {
            record.children = children.to_vec();
        }
        handle
    }

    /// Link `node`'s port-0 upstream source to `source`.
    pub fn connect(&mut self, node: &NodeHandle, source: &NodeHandle) {
        if let Some(record) = self.nodes.get_mut(node) {
            record.source = Some(source.clone());
        }
    }

    pub fn select(&mut self, nodes: &[NodeHandle]) {
        self.selection = nodes.to_vec();
    }

    pub fn set_bool(&mut self, node: &NodeHandle, attr: &str, value: bool) {
        if let Some(record) = self.nodes.get_mut(node) {
            record.bool_attrs.insert(attr.to_string(), value);
        }
    }

    pub fn set_text(&mut self, node: &NodeHandle, attr: &str, value: &str) {
        if let Some(record) = self.nodes.get_mut(node) {
            record
                .text_attrs
                .insert(attr.to_string(), value.to_string());
        }
    }

    pub fn set_layer_box(&mut self, drawing: &NodeHandle, layer: ArtLayer, art_box: ArtBox) {
        if let Some(record) = self.nodes.get_mut(drawing) {
            record.layer_boxes.insert(layer.index(), art_box);
        }
    }

    pub fn set_embedded_pivot(&mut self, drawing: &NodeHandle, pivot: Point2) {
        if let Some(record) = self.nodes.get_mut(drawing) {
            record.embedded_pivot = pivot;
        }
    }

    /// Current stored value of a text attribute, if any.
    pub fn text_value(&self, node: &NodeHandle, attr: &str) -> Option<String> {
        self.nodes
            .get(node)
            .and_then(|record| record.text_attrs.get(attr))
            .cloned()
    }

    pub fn dialogs(&self) -> Vec<String> {
        self.dialogs.borrow().clone()
    }

    pub fn undo_events(&self) -> &[UndoEvent] {
        &self.undo_events
    }

    pub fn attr_writes(&self) -> &[AttrWrite] {
        &self.writes
    }
}

impl SceneHost for InMemoryScene {
    fn selection(&self) -> Vec<NodeHandle> {
        self.selection.clone()
    }

    fn node_kind(&self, node: &NodeHandle) -> NodeKind {
        self.nodes
            .get(node)
            .map(|record| record.kind)
            .unwrap_or(NodeKind::Other)
    }

    fn children(&self, group: &NodeHandle) -> Vec<NodeHandle> {
        self.nodes
            .get(group)
            .map(|record| record.children.clone())
            .unwrap_or_default()
    }

    fn child_count(&self, group: &NodeHandle) -> usize {
        self.nodes
            .get(group)
            .map(|record| record.children.len())
            .unwrap_or(0)
    }

    fn source(&self, node: &NodeHandle, port: usize) -> Option<NodeHandle> {
        if port != 0 {
            return None;
        }
        self.nodes.get(node).and_then(|record| record.source.clone())
    }

    fn parent_group(&self, node: &NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(node).and_then(|record| record.parent.clone())
    }

    fn current_frame(&self) -> u32 {
        self.frame
    }

    fn bool_attr(&self, node: &NodeHandle, attr: &str, _frame: u32) -> bool {
        self.nodes
            .get(node)
            .and_then(|record| record.bool_attrs.get(attr))
            .copied()
            .unwrap_or(false)
    }

    fn text_attr(&self, node: &NodeHandle, attr: &str, _frame: u32) -> String {
        self.nodes
            .get(node)
            .and_then(|record| record.text_attrs.get(attr))
            .cloned()
            .unwrap_or_default()
    }

    fn set_text_attr(
        &mut self,
        node: &NodeHandle,
        attr: &str,
        _frame: u32,
        value: &str,
    ) -> Result<(), PivotError> {
        let Some(record) = self.nodes.get_mut(node) else {
            return Err(PivotError::AttributeWrite {
                node: node.clone(),
                attr: attr.to_string(),
                reason: "no such node".to_string(),
            });
        };
        record
            .text_attrs
            .insert(attr.to_string(), value.to_string());
        self.writes.push(AttrWrite {
            node: node.clone(),
            attr: attr.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn art_layer_box(&self, drawing: &NodeHandle, _frame: u32, layer: ArtLayer) -> Option<ArtBox> {
        self.nodes
            .get(drawing)
            .and_then(|record| record.layer_boxes.get(&layer.index()))
            .copied()
    }

    fn embedded_pivot(&self, drawing: &NodeHandle, _frame: u32) -> Point2 {
        self.nodes
            .get(drawing)
            .map(|record| record.embedded_pivot)
            .unwrap_or_default()
    }

    fn to_ogl(&self, p: Point2) -> Point2 {
        Point2::new(p.x / self.field_per_ogl.0, p.y / self.field_per_ogl.1)
    }

    fn from_ogl(&self, p: Point2) -> Point2 {
        Point2::new(p.x * self.field_per_ogl.0, p.y * self.field_per_ogl.1)
    }

    fn begin_undo(&mut self, name: &str) {
        self.undo_events.push(UndoEvent::Begin(name.to_string()));
    }

    fn end_undo(&mut self) {
        self.undo_events.push(UndoEvent::End);
    }

    fn info_dialog(&self, message: &str) {
        self.dialogs.borrow_mut().push(message.to_string());
    }
}

// --- JSON scene descriptions ---------------------------------------------

#[derive(Debug, Deserialize)]
struct SceneDoc {
    #[serde(default)]
    frame: u32,
    nodes: Vec<NodeDoc>,
    #[serde(default)]
    selection: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct NodeDoc {
    name: String,
    kind: NodeKind,
    #[serde(default)]
    children: Vec<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    can_animate: bool,
    #[serde(default)]
    pivot_mode: Option<String>,
    #[serde(default)]
    boxes: HashMap<ArtLayer, [f64; 4]>,
    #[serde(default)]
    embedded_pivot: Option<[f64; 2]>,
}

/// Build an [`InMemoryScene`] from a JSON description.
pub fn scene_from_json(raw: &str) -> Result<InMemoryScene> {
    let doc: SceneDoc = serde_json::from_str(raw).context("failed to parse scene JSON")?;

    let mut scene = InMemoryScene::new();
    scene.set_frame(doc.frame);
    for node in &doc.nodes {
        scene.add_node(&node.name, node.kind);
    }
    for node in &doc.nodes {
        let handle: NodeHandle = node.name.clone();
        if node.can_animate {
            scene.set_bool(&handle, "can_animate", true);
        }
        if let Some(mode) = &node.pivot_mode {
            scene.set_text(&handle, "use_drawing_pivot", mode);
        }
        if let Some(source) = &node.source {
            scene.connect(&handle, source);
        }
        for (layer, b) in &node.boxes {
            scene.set_layer_box(&handle, *layer, ArtBox::new(b[0], b[1], b[2], b[3]));
        }
        if let Some([x, y]) = node.embedded_pivot {
            scene.set_embedded_pivot(&handle, Point2::new(x, y));
        }
        if !node.children.is_empty() {
            let children: Vec<NodeHandle> = node.children.clone();
            for child in &children {
                if let Some(record) = scene.nodes.get_mut(child) {
                    record.parent = Some(handle.clone());
                }
            }
            if let Some(record) = scene.nodes.get_mut(&handle) {
                record.children = children;
            }
        }
    }
    scene.select(&doc.selection);
    Ok(scene)
}
