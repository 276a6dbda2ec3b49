//! artpivot-core: reposition drawing-layer pivots to the geometric center of
//! their visible artwork at the current frame.
//!
//! The host application's scripting surface (selection, node graph,
//! attributes, geometry queries, undo brackets) sits behind the
//! [`SceneHost`](host::SceneHost) trait; everything else is the pipeline
//! Collect → Resolve Target → Aggregate Box → Compute Center → Write, driven
//! by [`center_pivots`](run::center_pivots).

pub mod bounds;
pub mod collect;
pub mod error;
pub mod host;
pub mod pivot;
pub mod resolve;
pub mod run;
pub mod types;

pub use bounds::union_art_box;
pub use collect::collect_drawings;
pub use error::PivotError;
pub use host::SceneHost;
pub use pivot::write_center_pivot;
pub use resolve::resolve_target;
pub use run::{center_pivots, UNDO_GROUP};
pub use types::*;
