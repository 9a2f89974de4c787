use crate::foundation::error::MotionResult;
use crate::path::curve::Sampling;

/// Evaluation knobs carried in a scene description under `settings`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EvalSettings {
    /// Arc-length table intervals per curved path segment.
    pub path_precision: u32,
    /// Newton refinement steps per arc-length lookup.
    pub newton_iterations: u32,
}

impl Default for EvalSettings {
    fn default() -> Self {
        let s = Sampling::default();
        Self {
            path_precision: s.precision,
            newton_iterations: s.newton_iterations,
        }
    }
}

impl EvalSettings {
    pub fn sampling(&self) -> Sampling {
        Sampling {
            precision: self.path_precision,
            newton_iterations: self.newton_iterations,
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        self.sampling()
            .validate()
            .map_err(|e| e.in_node("<settings>", "settings"))
    }
}
