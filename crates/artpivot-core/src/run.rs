//! Batch driver: one undo bracket around the whole selection.

use crate::bounds::union_art_box;
use crate::collect::collect_drawings;
use crate::error::PivotError;
use crate::host::SceneHost;
use crate::pivot::write_center_pivot;
use crate::resolve::resolve_target;
use crate::types::{RunReport, SkipReason};

/// Name of the undo/redo group wrapping a run.
pub const UNDO_GROUP: &str = "Center Pivot on Drawings";

const EMPTY_SELECTION_MESSAGE: &str =
    "Select at least one drawing layer (or a group containing one).";

/// Reposition the pivot of every selected drawing to the center of its
/// visible artwork at the current frame.
///
/// Groups in the selection expand into their drawings. Drawings with no
/// resolvable pivot target or no visible artwork are skipped with a logged
/// notice and the batch continues. An empty expanded selection raises one
/// informational dialog and returns before any mutation; otherwise the whole
/// batch runs inside a single undo/redo group.
pub fn center_pivots(host: &mut dyn SceneHost) -> Result<RunReport, PivotError> {
    let selection = host.selection();
    let drawings = collect_drawings(&*host, &selection);
    if drawings.is_empty() {
        host.info_dialog(EMPTY_SELECTION_MESSAGE);
        return Ok(RunReport::default());
    }

    let frame = host.current_frame();
    let mut report = RunReport::default();

    host.begin_undo(UNDO_GROUP);
    for drawing in &drawings {
        let target = match resolve_target(&*host, drawing, frame) {
            Ok(target) => target,
            Err(reason) => {
                log::warn!("skipping {drawing}: {reason}");
                report.skipped.push((drawing.clone(), reason));
                continue;
            }
        };
        let Some(corners) = union_art_box(&*host, drawing, frame) else {
            let reason = SkipReason::EmptyAtFrame;
            log::warn!("skipping {drawing}: {reason}");
            report.skipped.push((drawing.clone(), reason));
            continue;
        };
        match write_center_pivot(host, drawing, &target, corners, frame) {
            Ok(write) => report.written.push(write),
            Err(err) => {
                // Close the bracket so the host never sees it dangling.
                host.end_undo();
                return Err(err);
            }
        }
    }
    host.end_undo();

    log::debug!(
        "centered {} pivot(s), skipped {}",
        report.written.len(),
        report.skipped.len()
    );
    Ok(report)
}
