use crate::foundation::core::Point;
use crate::foundation::error::{MotionError, MotionResult};
use kurbo::{BezPath, PathEl};

/// One drawing command of a [`Path`](crate::Path).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    /// Start a new subpath at the point.
    Move(Point),
    /// Straight line to the point.
    Line(Point),
    /// Quadratic bezier.
    Quad {
        /// Control point.
        ctrl: Point,
        /// End point.
        to: Point,
    },
    /// Cubic bezier.
    Cubic {
        /// First control point.
        ctrl1: Point,
        /// Second control point.
        ctrl2: Point,
        /// End point.
        to: Point,
    },
    /// Straight line back to the current subpath's start; ends the subpath.
    Close,
}

/// Segment kind tag used when segments arrive as a kind plus a point list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// [`PathSegment::Move`]
    Move,
    /// [`PathSegment::Line`]
    Line,
    /// [`PathSegment::Quad`]
    Quad,
    /// [`PathSegment::Cubic`]
    Cubic,
    /// [`PathSegment::Close`]
    Close,
}

impl SegmentKind {
    /// Number of points the segment needs, control points first, end point last.
    pub fn point_count(self) -> usize {
        match self {
            Self::Close => 0,
            Self::Move | Self::Line => 1,
            Self::Quad => 2,
            Self::Cubic => 3,
        }
    }
}

impl PathSegment {
    /// Build a segment from its kind and `[controls..., end]` points.
    pub fn from_points(kind: SegmentKind, points: &[Point]) -> MotionResult<Self> {
        let expected = kind.point_count();
        if points.len() != expected {
            return Err(MotionError::validation(format!(
                "{kind:?} segment needs {expected} point(s), got {}",
                points.len()
            )));
        }
        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            return Err(MotionError::validation(format!(
                "{kind:?} segment has non-finite point ({}, {})",
                p.x, p.y
            )));
        }
        Ok(match kind {
            SegmentKind::Move => Self::Move(points[0]),
            SegmentKind::Line => Self::Line(points[0]),
            SegmentKind::Quad => Self::Quad {
                ctrl: points[0],
                to: points[1],
            },
            SegmentKind::Cubic => Self::Cubic {
                ctrl1: points[0],
                ctrl2: points[1],
                to: points[2],
            },
            SegmentKind::Close => Self::Close,
        })
    }

    /// Kind tag of this segment.
    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::Move(_) => SegmentKind::Move,
            Self::Line(_) => SegmentKind::Line,
            Self::Quad { .. } => SegmentKind::Quad,
            Self::Cubic { .. } => SegmentKind::Cubic,
            Self::Close => SegmentKind::Close,
        }
    }
}

/// Parse SVG path data (`M 0 0 L 10 0 Q ... Z`) into segments.
pub fn segments_from_svg(d: &str) -> MotionResult<Vec<PathSegment>> {
    let path = BezPath::from_svg(d)
        .map_err(|e| MotionError::validation(format!("invalid SVG path data: {e}")))?;
    Ok(path
        .elements()
        .iter()
        .map(|el| match *el {
            PathEl::MoveTo(p) => PathSegment::Move(p),
            PathEl::LineTo(p) => PathSegment::Line(p),
            PathEl::QuadTo(ctrl, to) => PathSegment::Quad { ctrl, to },
            PathEl::CurveTo(ctrl1, ctrl2, to) => PathSegment::Cubic { ctrl1, ctrl2, to },
            PathEl::ClosePath => PathSegment::Close,
        })
        .collect())
}

/// Cubic segments of a Catmull-Rom spline through `points`.
///
/// `control1` and `control2` stand in for the neighbours the first and last anchors lack.
/// Lower `tension` gives longer tangents.
pub fn segments_from_catmull_rom(
    points: &[Point],
    control1: Point,
    control2: Point,
    tension: f64,
) -> MotionResult<Vec<PathSegment>> {
    if !(tension > 0.0 && tension.is_finite()) {
        return Err(MotionError::validation(format!(
            "tension must be strictly positive, got {tension}"
        )));
    }
    let [first, .., _] = points else {
        return Err(MotionError::validation(format!(
            "a smooth path needs at least 2 points, got {}",
            points.len()
        )));
    };

    let scale = 1.0 / (tension * 6.0);
    let last = points.len() - 2;
    let mut segments = Vec::with_capacity(points.len());
    segments.push(PathSegment::Move(*first));
    for (i, pair) in points.windows(2).enumerate() {
        let p0 = if i == 0 { control1 } else { points[i - 1] };
        let p3 = if i == last { control2 } else { points[i + 2] };
        let (p1, p2) = (pair[0], pair[1]);
        let ctrl1 = p1 + (p2 - p0) * scale;
        let ctrl2 = p2 - (p3 - p1) * scale;
        segments.push(PathSegment::from_points(SegmentKind::Cubic, &[ctrl1, ctrl2, p2])?);
    }
    Ok(segments)
}
