use crate::foundation::error::{MotionError, MotionResult};

/// Where a clock value sits relative to a [`TimeRange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Before,
    Active,
    After,
}

/// What a gate does with its subtree before the range starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeforePolicy {
    /// Leave the subtree out of the snapshot.
    #[default]
    Skip,
    /// Show the subtree as it is at the range start.
    HoldFirst,
}

/// What a gate does with its subtree once the range has ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterPolicy {
    /// Leave the subtree out of the snapshot.
    #[default]
    Skip,
    /// Keep the subtree, frozen at its last active instant.
    Freeze,
}

/// Half-open interval `[start, end)`; no `end` means the range never ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeRange {
    start: f64,
    end: Option<f64>,
}

impl TimeRange {
    pub fn new(start: f64, end: Option<f64>) -> MotionResult<Self> {
        if start.is_nan() || end.is_some_and(f64::is_nan) {
            return Err(MotionError::validation("time range bounds must not be NaN"));
        }
        if let Some(end) = end
            && end < start
        {
            return Err(MotionError::validation(format!(
                "time range end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }

    /// A NaN clock compares as neither before nor after, so it counts as active.
    pub fn state(&self, t: f64) -> GateState {
        if t < self.start {
            GateState::Before
        } else if self.end.is_some_and(|end| t >= end) {
            GateState::After
        } else {
            GateState::Active
        }
    }

    /// Largest clock value that is still active: just below `end`, never below `start`.
    pub fn last_active(&self) -> Option<f64> {
        self.end.map(|end| end.next_down().max(self.start))
    }
}

/// Outcome of gating one clock value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateResolution {
    pub state: GateState,
    /// Clock the subtree resolves at, or `None` when it is excluded.
    pub clock: Option<f64>,
}

impl GateResolution {
    pub fn is_included(&self) -> bool {
        self.clock.is_some()
    }
}

/// Time-range gate over one subtree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gate {
    range: TimeRange,
    before: BeforePolicy,
    after: AfterPolicy,
    render_time: Option<f64>,
}

impl Gate {
    pub fn new(
        range: TimeRange,
        before: BeforePolicy,
        after: AfterPolicy,
        render_time: Option<f64>,
    ) -> MotionResult<Self> {
        if render_time.is_some_and(|t| !t.is_finite()) {
            return Err(MotionError::validation("render_time must be finite"));
        }
        Ok(Self {
            range,
            before,
            after,
            render_time,
        })
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Gate clock `t`.
    ///
    /// While active the subtree sees `t` (or the pinned `render_time`). Held and frozen
    /// subtrees see the first and last active instants.
    pub fn resolve(&self, t: f64) -> GateResolution {
        let state = self.range.state(t);
        let clock = match state {
            GateState::Active => Some(t),
            GateState::Before => match self.before {
                BeforePolicy::Skip => None,
                BeforePolicy::HoldFirst => Some(self.range.start),
            },
            GateState::After => match self.after {
                AfterPolicy::Skip => None,
                AfterPolicy::Freeze => self.range.last_active(),
            },
        };
        GateResolution {
            state,
            clock: clock.map(|c| self.render_time.unwrap_or(c)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/gate.rs"]
mod tests;
