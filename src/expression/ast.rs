/// Parsed, unbound expression tree. Offsets point into the source text for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Lit(f64),
    Ident {
        name: String,
        offset: usize,
    },
    /// Trailing single-letter selector: `pos.x`, `tint.a`.
    Component {
        base: Box<Expr>,
        selector: String,
        offset: usize,
    },
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        func: String,
        args: Vec<Expr>,
        offset: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    #[inline]
    pub(crate) fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }
}
