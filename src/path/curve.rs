use crate::foundation::core::Point;
use crate::foundation::error::{MotionError, MotionResult};
use crate::path::segment::{PathSegment, segments_from_svg};
use crate::path::table::ArcTable;
use kurbo::{CubicBez, Line, ParamCurve, PathSeg, QuadBez};
use std::sync::OnceLock;

/// Upper bound for [`Sampling::newton_iterations`].
pub const MAX_NEWTON_ITERATIONS: u32 = 16;

/// How `u` in `[0, 1]` is mapped onto a path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// `u` picks a drawing segment and its local bezier parameter directly.
    Parametric,
    /// `u` is the normalized distance travelled along the path (constant speed).
    #[default]
    ArcLength,
}

/// Arc-length table resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sampling {
    /// Table intervals per curved segment (lines always use one).
    pub precision: u32,
    /// Newton refinement steps per lookup; 0 keeps the linear estimate.
    pub newton_iterations: u32,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            precision: 64,
            newton_iterations: 4,
        }
    }
}

impl Sampling {
    /// Check bounds.
    pub fn validate(&self) -> MotionResult<()> {
        if self.precision < 1 {
            return Err(MotionError::validation("path precision must be >= 1"));
        }
        if self.newton_iterations > MAX_NEWTON_ITERATIONS {
            return Err(MotionError::validation(format!(
                "newton iterations must be <= {MAX_NEWTON_ITERATIONS}, got {}",
                self.newton_iterations
            )));
        }
        Ok(())
    }
}

/// Immutable piecewise bezier path, possibly made of several subpaths.
///
/// The arc-length table is built on first arc-length lookup and shared by every later one.
#[derive(Clone, Debug)]
pub struct Path {
    segments: Vec<PathSegment>,
    pieces: Vec<PathSeg>,
    origin: Point,
    sampling: Sampling,
    table: OnceLock<ArcTable>,
}

impl Path {
    /// Build from a segment list starting with [`PathSegment::Move`].
    pub fn new(segments: Vec<PathSegment>, sampling: Sampling) -> MotionResult<Self> {
        sampling.validate()?;
        let origin = match segments.first() {
            None => return Err(MotionError::validation("path has no segments")),
            Some(PathSegment::Move(p)) => *p,
            Some(other) => {
                return Err(MotionError::validation(format!(
                    "path must start with a move, found {:?}",
                    other.kind()
                )));
            }
        };

        let mut pieces = Vec::with_capacity(segments.len());
        let mut cursor = origin;
        let mut start = origin;
        for seg in &segments {
            let piece = match *seg {
                PathSegment::Move(p) => {
                    cursor = p;
                    start = p;
                    continue;
                }
                PathSegment::Line(to) => PathSeg::Line(Line::new(cursor, to)),
                PathSegment::Quad { ctrl, to } => PathSeg::Quad(QuadBez::new(cursor, ctrl, to)),
                PathSegment::Cubic { ctrl1, ctrl2, to } => {
                    PathSeg::Cubic(CubicBez::new(cursor, ctrl1, ctrl2, to))
                }
                PathSegment::Close => PathSeg::Line(Line::new(cursor, start)),
            };
            cursor = piece.end();
            pieces.push(piece);
        }

        Ok(Self {
            segments,
            pieces,
            origin,
            sampling,
            table: OnceLock::new(),
        })
    }

    /// Build from SVG path data.
    pub fn from_svg(d: &str, sampling: Sampling) -> MotionResult<Self> {
        Self::new(segments_from_svg(d)?, sampling)
    }

    /// Segments as declared.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Point at `u = 0`.
    pub fn start_point(&self) -> Point {
        self.pieces.first().map_or(self.origin, |p| p.start())
    }

    /// Point at `u = 1`: the end of the last drawing segment (the subpath start after a close).
    pub fn end_point(&self) -> Point {
        self.pieces.last().map_or(self.origin, |p| p.end())
    }

    /// Total drawn length, move gaps excluded.
    pub fn length(&self) -> f64 {
        if self.pieces.is_empty() {
            return 0.0;
        }
        self.table().total()
    }

    /// Sample the path at `u`, clamped to `[0, 1]`.
    pub fn evaluate(&self, u: f64, mode: PathMode) -> Point {
        if self.pieces.is_empty() {
            return self.origin;
        }
        let u = u.clamp(0.0, 1.0);
        match mode {
            PathMode::Parametric => {
                let n = self.pieces.len();
                let s = u * n as f64;
                let i = (s.floor() as usize).min(n - 1);
                self.pieces[i].eval(s - i as f64)
            }
            PathMode::ArcLength => {
                let table = self.table();
                if table.total() <= 0.0 || u <= 0.0 {
                    return self.start_point();
                }
                if u >= 1.0 {
                    return self.end_point();
                }
                let (piece, t) = table.locate(
                    &self.pieces,
                    u * table.total(),
                    self.sampling.newton_iterations,
                );
                self.pieces[piece].eval(t)
            }
        }
    }

    fn table(&self) -> &ArcTable {
        self.table
            .get_or_init(|| ArcTable::build(&self.pieces, self.sampling.precision))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/curve.rs"]
mod tests;
