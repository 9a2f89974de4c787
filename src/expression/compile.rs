use crate::expression::ast::Expr;
use crate::expression::builtins::{self, Builtin};
use crate::expression::error::ExprError;
use crate::expression::parser::parse_expr;
use crate::expression::program::{CompiledExpr, Node};
use crate::foundation::core::ValueType;

/// Compile `src` against named, typed resources. Slot `i` at evaluation is `resources[i]`.
///
/// Every name and call is resolved here; evaluation cannot fail.
pub fn compile(src: &str, resources: &[(&str, ValueType)]) -> Result<CompiledExpr, ExprError> {
    if resources.len() > usize::from(u16::MAX) {
        return Err(ExprError::bind(0, "too many resources"));
    }
    let ast = parse_expr(src)?;
    let root = Binder { resources }.bind(&ast)?;
    Ok(CompiledExpr {
        root,
        resource_count: resources.len(),
    })
}

struct Binder<'a> {
    resources: &'a [(&'a str, ValueType)],
}

impl Binder<'_> {
    fn lookup(&self, name: &str) -> Option<(u16, ValueType)> {
        let slot = self.resources.iter().position(|(n, _)| *n == name)?;
        // bounded by the check in `compile`
        let slot = u16::try_from(slot).ok()?;
        Some((slot, self.resources[usize::from(slot)].1))
    }

    fn bind(&self, e: &Expr) -> Result<Node, ExprError> {
        match e {
            Expr::Lit(v) => Ok(Node::Literal(*v)),
            Expr::Ident { name, offset } => self.bind_ident(name, *offset),
            Expr::Component {
                base,
                selector,
                offset,
            } => self.bind_component(base, selector, *offset),
            Expr::Neg(inner) => Ok(Node::Neg(Box::new(self.bind(inner)?))),
            Expr::Binary { op, left, right } => Ok(Node::Binary {
                op: *op,
                left: Box::new(self.bind(left)?),
                right: Box::new(self.bind(right)?),
            }),
            Expr::Call { func, args, offset } => {
                let Some(builtin) = Builtin::lookup(func) else {
                    return Err(ExprError::bind(*offset, format!("unknown function `{func}`")));
                };
                if args.len() != builtin.arity() {
                    return Err(ExprError::bind(
                        *offset,
                        format!(
                            "`{}` takes {} argument(s), got {}",
                            builtin.name(),
                            builtin.arity(),
                            args.len()
                        ),
                    ));
                }
                let args = args
                    .iter()
                    .map(|a| self.bind(a))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::Call {
                    func: builtin,
                    args: args.into_boxed_slice(),
                })
            }
        }
    }

    fn bind_ident(&self, name: &str, offset: usize) -> Result<Node, ExprError> {
        match self.lookup(name) {
            Some((slot, ValueType::Float)) => Ok(Node::Resource(slot)),
            Some((_, ty)) => Err(ExprError::bind(
                offset,
                format!("`{name}` is a {ty}; select a component such as `{name}.x`"),
            )),
            None => builtins::constant(name)
                .map(Node::Literal)
                .ok_or_else(|| ExprError::bind(offset, format!("unknown identifier `{name}`"))),
        }
    }

    fn bind_component(&self, base: &Expr, selector: &str, offset: usize) -> Result<Node, ExprError> {
        let Expr::Ident { name, offset: base_offset } = base else {
            return Err(ExprError::bind(
                offset,
                "component access needs a resource name on the left",
            ));
        };
        let Some((slot, ty)) = self.lookup(name) else {
            let what = if builtins::constant(name).is_some() {
                "a constant"
            } else {
                "an unknown identifier"
            };
            return Err(ExprError::bind(
                *base_offset,
                format!("component access on {what} `{name}`"),
            ));
        };
        if ty == ValueType::Float {
            return Err(ExprError::bind(
                offset,
                format!("`{name}` is a float and has no components"),
            ));
        }
        let mut chars = selector.chars();
        let index = match (chars.next(), chars.next()) {
            (Some(c), None) => ty.component_index(c),
            _ => None,
        };
        let Some(index) = index else {
            return Err(ExprError::bind(
                offset,
                format!("`{name}` ({ty}) has no component `{selector}`"),
            ));
        };
        Ok(Node::Component {
            slot,
            // arity is at most 4
            index: index as u8,
        })
    }
}
