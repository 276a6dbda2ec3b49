use serde::{Deserialize, Serialize};

/// Opaque host node reference.
pub type NodeHandle = String;

/// Conversion factor from the host's bounding-box query units to OGL unit
/// space. Box corners divide by this before any geometry is done.
pub const BOX_UNITS_PER_OGL: f64 = 1875.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Drawing,
    Group,
    Peg,
    Other,
}

/// The four art layers of a drawing, in host index order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ArtLayer {
    Underlay,
    ColorArt,
    LineArt,
    Overlay,
}

impl ArtLayer {
    pub const ALL: [ArtLayer; 4] = [
        ArtLayer::Underlay,
        ArtLayer::ColorArt,
        ArtLayer::LineArt,
        ArtLayer::Overlay,
    ];

    pub fn index(self) -> usize {
        match self {
            ArtLayer::Underlay => 0,
            ArtLayer::ColorArt => 1,
            ArtLayer::LineArt => 2,
            ArtLayer::Overlay => 3,
        }
    }
}

/// Where a drawing's embedded pivot is applied, decoded from the host's
/// `use_drawing_pivot` text attribute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddedPivotMode {
    DrawingLayer,
    ParentPeg,
    Other,
}

impl EmbeddedPivotMode {
    /// Decode the host attribute value. Anything unrecognised maps to
    /// [`EmbeddedPivotMode::Other`].
    pub fn from_attr(value: &str) -> Self {
        match value {
            "Apply Embedded Pivot on Drawing Layer" => EmbeddedPivotMode::DrawingLayer,
            "Apply Embedded Pivot on Parent Peg" => EmbeddedPivotMode::ParentPeg,
            _ => EmbeddedPivotMode::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }

    /// Component-wise minimum.
    pub fn min(self, other: Point2) -> Point2 {
        Point2 {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Point2) -> Point2 {
        Point2 {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    pub fn midpoint(self, other: Point2) -> Point2 {
        Point2 {
            x: self.x + (other.x - self.x) * 0.5,
            y: self.y + (other.y - self.y) * 0.5,
        }
    }

    pub fn sub(self, other: Point2) -> Point2 {
        Point2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    pub fn div(self, divisor: f64) -> Point2 {
        Point2 {
            x: self.x / divisor,
            y: self.y / divisor,
        }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// One art layer's bounding box in native box units, as returned by the
/// host's geometry query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ArtBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ArtBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        ArtBox { x1, y1, x2, y2 }
    }

    /// Bottom-left and top-right corners.
    pub fn corners(self) -> (Point2, Point2) {
        (Point2::new(self.x1, self.y1), Point2::new(self.x2, self.y2))
    }
}

/// The node a computed pivot will be written to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PivotTarget {
    pub node: NodeHandle,
    /// True when the target is the drawing itself rather than an ancestor peg.
    pub on_drawing: bool,
}

/// Why a drawing was skipped without a pivot write.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Not animatable and no ancestor peg on the upstream chain.
    NoPivotTarget,
    /// All four art layers were empty at the current frame.
    EmptyAtFrame,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoPivotTarget => write!(f, "no animatable target and no ancestor peg"),
            SkipReason::EmptyAtFrame => write!(f, "no visible artwork at the current frame"),
        }
    }
}

/// One pivot write performed during a run, in OGL units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PivotWrite {
    pub node: NodeHandle,
    pub pivot: Point2,
}

/// Outcome of a full batch run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunReport {
    pub written: Vec<PivotWrite>,
    pub skipped: Vec<(NodeHandle, SkipReason)>,
}
