use std::fmt;

/// Which compile stage rejected the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprStage {
    /// Tokenizing or parsing.
    Syntax,
    /// Resolving names, components and call arities against declared resources.
    Bind,
}

/// Expression compile failure, located by byte offset into the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprError {
    /// Stage that rejected the text.
    pub stage: ExprStage,
    /// Byte offset of the offending token.
    pub offset: usize,
    /// Human readable reason, without the location.
    pub message: String,
}

impl ExprError {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Self {
            stage: ExprStage::Syntax,
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn bind(offset: usize, message: impl Into<String>) -> Self {
        Self {
            stage: ExprStage::Bind,
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            ExprStage::Syntax => "syntax",
            ExprStage::Bind => "bind",
        };
        write!(f, "{stage} error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for ExprError {}
