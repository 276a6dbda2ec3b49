//! Pivot target resolution: the drawing itself, or its nearest ancestor peg.

use hashbrown::HashSet;

use crate::host::SceneHost;
use crate::types::{EmbeddedPivotMode, NodeHandle, NodeKind, PivotTarget, SkipReason};

/// Attribute holding the drawing's animatable flag.
pub const ATTR_CAN_ANIMATE: &str = "can_animate";
/// Attribute holding the embedded-pivot mode string.
pub const ATTR_USE_DRAWING_PIVOT: &str = "use_drawing_pivot";

/// Read and decode the drawing's embedded-pivot mode.
pub fn embedded_pivot_mode(host: &dyn SceneHost, drawing: &NodeHandle, frame: u32) -> EmbeddedPivotMode {
    EmbeddedPivotMode::from_attr(&host.text_attr(drawing, ATTR_USE_DRAWING_PIVOT, frame))
}

/// Decide which node receives the computed pivot.
///
/// An animatable drawing keeps its own pivot unless its embedded pivot is
/// applied on the parent peg. Otherwise the pivot belongs on the nearest peg
/// found by walking the port-0 upstream chain, skipping non-peg nodes. A
/// visited set guards against source-link cycles; a chain that ends without a
/// peg resolves to [`SkipReason::NoPivotTarget`].
pub fn resolve_target(
    host: &dyn SceneHost,
    drawing: &NodeHandle,
    frame: u32,
) -> Result<PivotTarget, SkipReason> {
    let animatable = host.bool_attr(drawing, ATTR_CAN_ANIMATE, frame);
    let mode = embedded_pivot_mode(host, drawing, frame);

    if animatable && mode != EmbeddedPivotMode::ParentPeg {
        return Ok(PivotTarget {
            node: drawing.clone(),
            on_drawing: true,
        });
    }

    let mut visited: HashSet<NodeHandle> = HashSet::new();
    visited.insert(drawing.clone());
    let mut current = drawing.clone();
    while let Some(upstream) = host.source(&current, 0) {
        if !visited.insert(upstream.clone()) {
            log::warn!("source-link cycle at {upstream} while searching a peg for {drawing}");
            break;
        }
        if host.node_kind(&upstream) == NodeKind::Peg {
            return Ok(PivotTarget {
                node: upstream,
                on_drawing: false,
            });
        }
        log::trace!("skipping non-peg {upstream} above {drawing}");
        current = upstream;
    }
    Err(SkipReason::NoPivotTarget)
}
