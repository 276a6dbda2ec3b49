//! Selection expansion: groups flatten into the drawings they contain.

use crate::host::SceneHost;
use crate::types::{NodeHandle, NodeKind};

/// Flatten `nodes` into the drawings they contain, expanding groups
/// depth-first and preserving order. Non-drawing, non-group nodes drop out.
pub fn collect_drawings(host: &dyn SceneHost, nodes: &[NodeHandle]) -> Vec<NodeHandle> {
    let mut drawings = Vec::new();
    for node in nodes {
        match host.node_kind(node) {
            NodeKind::Drawing => drawings.push(node.clone()),
            NodeKind::Group => {
                let children = host.children(node);
                drawings.extend(collect_drawings(host, &children));
            }
            NodeKind::Peg | NodeKind::Other => {}
        }
    }
    drawings
}
