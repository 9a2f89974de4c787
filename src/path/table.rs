use crate::foundation::core::Vec2;
use crate::foundation::math::{clamp, mix};
use kurbo::PathSeg;

// 5-point Gauss-Legendre on [-1, 1].
const GAUSS_NODES: [(f64, f64); 5] = [
    (0.0, 0.568_888_888_888_888_9),
    (-0.538_469_310_105_683_1, 0.478_628_670_499_366_5),
    (0.538_469_310_105_683_1, 0.478_628_670_499_366_5),
    (-0.906_179_845_938_664, 0.236_926_885_056_189_1),
    (0.906_179_845_938_664, 0.236_926_885_056_189_1),
];

const NEWTON_EPS: f64 = 1e-14;

/// One interval of a piece's parameter range and the cumulative distance it spans.
#[derive(Clone, Copy, Debug)]
struct Step {
    piece: u32,
    t0: f64,
    t1: f64,
    d0: f64,
    d1: f64,
}

/// Cumulative arc-length lookup over all drawing pieces of a path.
///
/// Subpaths are laid end to end: the gap jumped by a move contributes no distance.
#[derive(Clone, Debug)]
pub(crate) struct ArcTable {
    steps: Vec<Step>,
    total: f64,
}

impl ArcTable {
    pub(crate) fn build(pieces: &[PathSeg], precision: u32) -> Self {
        let mut steps = Vec::new();
        let mut acc = 0.0;
        for (i, seg) in pieces.iter().enumerate() {
            let n = match seg {
                PathSeg::Line(_) => 1,
                _ => precision.max(1),
            };
            for k in 0..n {
                let t0 = f64::from(k) / f64::from(n);
                let t1 = f64::from(k + 1) / f64::from(n);
                let len = match seg {
                    PathSeg::Line(l) => (l.p1 - l.p0).hypot(),
                    _ => arc_length(seg, t0, t1),
                };
                steps.push(Step {
                    piece: i as u32,
                    t0,
                    t1,
                    d0: acc,
                    d1: acc + len,
                });
                acc += len;
            }
        }
        Self { steps, total: acc }
    }

    pub(crate) fn total(&self) -> f64 {
        self.total
    }

    /// Piece index and bezier parameter at cumulative distance `target`.
    pub(crate) fn locate(
        &self,
        pieces: &[PathSeg],
        target: f64,
        newton_iterations: u32,
    ) -> (usize, f64) {
        let last = self.steps.len() - 1;
        let i = self.steps.partition_point(|s| s.d1 < target).min(last);
        let s = self.steps[i];
        let piece = s.piece as usize;

        let span = s.d1 - s.d0;
        if span <= 0.0 {
            return (piece, s.t0);
        }
        let ratio = clamp((target - s.d0) / span, 0.0, 1.0);
        let mut t = mix(s.t0, s.t1, ratio);

        let seg = &pieces[piece];
        if matches!(seg, PathSeg::Line(_)) {
            return (piece, t);
        }

        let local = target - s.d0;
        for _ in 0..newton_iterations {
            let err = arc_length(seg, s.t0, t) - local;
            let speed = derivative(seg, t).hypot();
            if speed <= NEWTON_EPS {
                break;
            }
            let next = clamp(t - err / speed, s.t0, s.t1);
            let done = (next - t).abs() <= NEWTON_EPS;
            t = next;
            if done {
                break;
            }
        }
        (piece, t)
    }
}

/// Length of `seg` between parameters `t0` and `t1`.
pub(crate) fn arc_length(seg: &PathSeg, t0: f64, t1: f64) -> f64 {
    let half = (t1 - t0) / 2.0;
    let mid = (t1 + t0) / 2.0;
    let sum: f64 = GAUSS_NODES
        .iter()
        .map(|&(x, w)| w * derivative(seg, mid + half * x).hypot())
        .sum();
    sum * half
}

/// First derivative of `seg` with respect to its parameter.
pub(crate) fn derivative(seg: &PathSeg, t: f64) -> Vec2 {
    let mt = 1.0 - t;
    match seg {
        PathSeg::Line(l) => l.p1 - l.p0,
        PathSeg::Quad(q) => (q.p1 - q.p0) * (2.0 * mt) + (q.p2 - q.p1) * (2.0 * t),
        PathSeg::Cubic(c) => {
            (c.p1 - c.p0) * (3.0 * mt * mt)
                + (c.p2 - c.p1) * (6.0 * mt * t)
                + (c.p3 - c.p2) * (3.0 * t * t)
        }
    }
}
