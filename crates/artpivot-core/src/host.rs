//! The host application surface consumed by the pivot setter.
//!
//! The scripting API of the host is ambient global state; here it is an
//! explicit, object-safe service injected into every operation. Reads are
//! infallible because the host API reports nothing on a bad handle beyond its
//! empty sentinels; the attribute write is the one mutation and is fallible.

use crate::error::PivotError;
use crate::types::{ArtBox, ArtLayer, NodeHandle, NodeKind, Point2};

pub trait SceneHost {
    /// Ordered list of currently selected nodes.
    fn selection(&self) -> Vec<NodeHandle>;

    fn node_kind(&self, node: &NodeHandle) -> NodeKind;

    /// Ordered children of a group node. Empty for non-groups.
    fn children(&self, group: &NodeHandle) -> Vec<NodeHandle>;

    fn child_count(&self, group: &NodeHandle) -> usize;

    /// Immediate upstream source link at `port`, or `None` at the chain end.
    fn source(&self, node: &NodeHandle, port: usize) -> Option<NodeHandle>;

    /// Enclosing group, or `None` at the top level.
    fn parent_group(&self, node: &NodeHandle) -> Option<NodeHandle>;

    fn current_frame(&self) -> u32;

    fn bool_attr(&self, node: &NodeHandle, attr: &str, frame: u32) -> bool;

    fn text_attr(&self, node: &NodeHandle, attr: &str, frame: u32) -> String;

    fn set_text_attr(
        &mut self,
        node: &NodeHandle,
        attr: &str,
        frame: u32,
        value: &str,
    ) -> Result<(), PivotError>;

    /// Bounding box of one art layer at `frame`, in native box units.
    /// `None` when the layer holds no artwork at that frame.
    fn art_layer_box(&self, drawing: &NodeHandle, frame: u32, layer: ArtLayer) -> Option<ArtBox>;

    /// The drawing's resolved embedded pivot at `frame`, in native field units.
    fn embedded_pivot(&self, drawing: &NodeHandle, frame: u32) -> Point2;

    /// Native field units to OGL unit space, per axis.
    fn to_ogl(&self, p: Point2) -> Point2;

    /// OGL unit space back to native field units, per axis.
    fn from_ogl(&self, p: Point2) -> Point2;

    /// Open a named undo/redo group. Every write until [`SceneHost::end_undo`]
    /// collapses into one user-visible edit.
    fn begin_undo(&mut self, name: &str);

    fn end_undo(&mut self);

    /// Blocking informational dialog.
    fn info_dialog(&self, message: &str);
}
