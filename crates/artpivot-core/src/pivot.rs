//! Center computation and the pivot attribute write.

use crate::error::PivotError;
use crate::host::SceneHost;
use crate::resolve::embedded_pivot_mode;
use crate::types::{EmbeddedPivotMode, NodeHandle, PivotTarget, PivotWrite, Point2};

pub const ATTR_PIVOT_X: &str = "pivot.x";
pub const ATTR_PIVOT_Y: &str = "pivot.y";

/// The host stores pivot attributes as text with fixed fractional precision.
fn format_coord(v: f64) -> String {
    format!("{v:.20}")
}

/// True when the embedded pivot is applied on the node the write is aimed at,
/// in which case the written pivot must be compensated for it.
fn needs_compensation(target: &PivotTarget, mode: EmbeddedPivotMode) -> bool {
    (!target.on_drawing && mode == EmbeddedPivotMode::ParentPeg)
        || (target.on_drawing && mode == EmbeddedPivotMode::DrawingLayer)
}

/// Compute the midpoint of the union box corners and write it as `target`'s
/// pivot, inverse-compensating for a non-zero embedded pivot when the host
/// applies that pivot on the same node.
pub fn write_center_pivot(
    host: &mut dyn SceneHost,
    drawing: &NodeHandle,
    target: &PivotTarget,
    corners: (Point2, Point2),
    frame: u32,
) -> Result<PivotWrite, PivotError> {
    let (bottom_left, top_right) = corners;
    let mut center = bottom_left.midpoint(top_right);

    let mode = embedded_pivot_mode(host, drawing, frame);
    if needs_compensation(target, mode) {
        // Zero the target's pivot first so the host resolves the embedded
        // pivot without the stale offset.
        host.set_text_attr(&target.node, ATTR_PIVOT_X, frame, "0")?;
        host.set_text_attr(&target.node, ATTR_PIVOT_Y, frame, "0")?;
        let embedded = host.to_ogl(host.embedded_pivot(drawing, frame));
        if !embedded.is_zero() {
            center = center.sub(embedded);
        }
    }

    let field = host.from_ogl(center);
    host.set_text_attr(&target.node, ATTR_PIVOT_X, frame, &format_coord(field.x))?;
    host.set_text_attr(&target.node, ATTR_PIVOT_Y, frame, &format_coord(field.y))?;
    log::debug!(
        "pivot of {} set to ({}, {}) for drawing {drawing}",
        target.node,
        center.x,
        center.y
    );

    Ok(PivotWrite {
        node: target.node.clone(),
        pivot: center,
    })
}
