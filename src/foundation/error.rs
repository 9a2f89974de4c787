use crate::expression::ExprError;

/// Crate-wide result alias.
pub type MotionResult<T> = Result<T, MotionError>;

/// Errors raised while building or querying a scene graph.
///
/// Evaluation itself never fails: once a [`Graph`](crate::Graph) is built every frame resolves to
/// plain values, with numeric domain problems surfacing as NaN/Inf.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// A value, range or setting failed validation outside of any node context.
    #[error("validation error: {0}")]
    Validation(String),

    /// A node declaration is malformed.
    #[error("construction error in node \"{node}\" ({field}): {message}")]
    Construction {
        /// Id of the offending node.
        node: String,
        /// Field of the node declaration that failed.
        field: String,
        /// Human readable reason.
        message: String,
    },

    /// Node references form a cycle. `path` starts and ends with the same node id.
    #[error("cycle detected: {}", path.join(" -> "))]
    Cycle {
        /// Node ids along the cycle.
        path: Vec<String>,
    },

    /// An expression failed to parse or bind.
    #[error("expression error in node \"{node}\" ({field}): {source}")]
    Expression {
        /// Id of the node declaring the expression.
        node: String,
        /// Field holding the expression text.
        field: String,
        /// Underlying parse/bind error.
        source: ExprError,
    },

    /// Scene description (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else (IO at the edges, mostly).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Construction`].
    pub fn construction(
        node: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Construction {
            node: node.into(),
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Build a [`MotionError::Expression`].
    pub fn expression(node: impl Into<String>, field: impl Into<String>, source: ExprError) -> Self {
        Self::Expression {
            node: node.into(),
            field: field.into(),
            source,
        }
    }

    /// Build a [`MotionError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Attach node/field context to a context-free validation error.
    ///
    /// Errors that already carry context are returned unchanged.
    pub fn in_node(self, node: &str, field: &str) -> Self {
        match self {
            Self::Validation(message) => Self::construction(node, field, message),
            other => other,
        }
    }
}
