use crate::expression::ast::BinaryOp;
use crate::expression::builtins::{Builtin, MAX_ARGS};
use crate::foundation::core::{Value, ValueType};
use crate::foundation::error::{MotionError, MotionResult};

/// Bound expression node. Resource reads are slot indices into the declared resource list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Literal(f64),
    Resource(u16),
    Component { slot: u16, index: u8 },
    Neg(Box<Node>),
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Call {
        func: Builtin,
        args: Box<[Node]>,
    },
}

impl Node {
    fn eval(&self, resources: &[Value]) -> f64 {
        match self {
            Self::Literal(v) => *v,
            Self::Resource(slot) => read(resources, *slot, 0),
            Self::Component { slot, index } => read(resources, *slot, usize::from(*index)),
            Self::Neg(e) => -e.eval(resources),
            Self::Binary { op, left, right } => op.apply(left.eval(resources), right.eval(resources)),
            Self::Call { func, args } => {
                let mut a = [0.0; MAX_ARGS];
                for (dst, arg) in a.iter_mut().zip(args.iter()) {
                    *dst = arg.eval(resources);
                }
                func.call(&a)
            }
        }
    }
}

// A missing slot reads as NaN so misuse shows up in the output rather than panicking.
#[inline]
fn read(resources: &[Value], slot: u16, index: usize) -> f64 {
    resources
        .get(usize::from(slot))
        .and_then(|v| v.component(index))
        .unwrap_or(f64::NAN)
}

/// A compiled scalar expression.
///
/// Evaluation takes resource values in the order they were declared to [`compile`](crate::expression::compile),
/// and performs no allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    pub(crate) root: Node,
    pub(crate) resource_count: usize,
}

impl CompiledExpr {
    /// Number of resources this expression was compiled against.
    pub fn resource_count(&self) -> usize {
        self.resource_count
    }

    /// Evaluate against resource values given in declaration order.
    pub fn evaluate(&self, resources: &[Value]) -> f64 {
        self.root.eval(resources)
    }
}

/// Vector-valued expression assembled from one scalar expression per component.
///
/// Fewer expressions than components repeat the last one's value.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorExpr {
    ty: ValueType,
    components: Vec<CompiledExpr>,
}

impl VectorExpr {
    /// Assemble a `ty` value from one to `ty.arity()` component expressions.
    pub fn new(ty: ValueType, components: Vec<CompiledExpr>) -> MotionResult<Self> {
        if components.is_empty() {
            return Err(MotionError::validation(format!(
                "{ty} expression needs at least one component"
            )));
        }
        if components.len() > ty.arity() {
            return Err(MotionError::validation(format!(
                "{ty} expression has {} components, at most {} allowed",
                components.len(),
                ty.arity()
            )));
        }
        Ok(Self { ty, components })
    }

    /// Type of the assembled value.
    pub fn value_type(&self) -> ValueType {
        self.ty
    }

    /// Component expressions as declared.
    pub fn components(&self) -> &[CompiledExpr] {
        &self.components
    }

    /// Evaluate every component and pad the missing ones with the last value.
    pub fn evaluate(&self, resources: &[Value]) -> Value {
        let mut out = [0.0; 4];
        let mut last = 0.0;
        for (i, slot) in out.iter_mut().enumerate().take(self.ty.arity()) {
            if let Some(e) = self.components.get(i) {
                last = e.evaluate(resources);
            }
            *slot = last;
        }
        Value::from_padded(self.ty, out)
    }
}
