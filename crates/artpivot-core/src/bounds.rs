//! Bounding-box union across a drawing's four art layers.

use crate::host::SceneHost;
use crate::types::{ArtLayer, NodeHandle, Point2, BOX_UNITS_PER_OGL};

/// Union bounding box of all non-empty art layers at `frame`, as
/// (bottom-left, top-right) in OGL units. `None` when every layer is empty.
pub fn union_art_box(
    host: &dyn SceneHost,
    drawing: &NodeHandle,
    frame: u32,
) -> Option<(Point2, Point2)> {
    let mut bounds: Option<(Point2, Point2)> = None;
    for layer in ArtLayer::ALL {
        let Some(art_box) = host.art_layer_box(drawing, frame, layer) else {
            continue;
        };
        let (bottom_left, top_right) = art_box.corners();
        let bottom_left = bottom_left.div(BOX_UNITS_PER_OGL);
        let top_right = top_right.div(BOX_UNITS_PER_OGL);
        log::debug!(
            "{drawing} layer {:?}: bl=({}, {}) tr=({}, {})",
            layer,
            bottom_left.x,
            bottom_left.y,
            top_right.x,
            top_right.y
        );
        bounds = Some(match bounds {
            None => (bottom_left, top_right),
            Some((min, max)) => (min.min(bottom_left), max.max(top_right)),
        });
    }
    bounds
}
