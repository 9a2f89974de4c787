use crate::expression::ast::{BinaryOp, Expr};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Token, TokenKind, lex};

/// Parse one component expression. Grammar, loosest first:
///
/// ```text
/// expr    := term
/// term    := factor (('+' | '-') factor)*
/// factor  := unary (('*' | '/') unary)*
/// unary   := ('-' | '+') unary | postfix
/// postfix := primary ('.' ident)*
/// primary := number | ident | ident '(' args? ')' | '(' expr ')'
/// ```
///
/// Signs, parentheses and calls may nest at most [`MAX_DEPTH`] levels.
pub(crate) fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let tokens = lex(src)?;
    let mut p = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = p.parse_term()?;
    p.expect(&TokenKind::Eof)?;
    Ok(expr)
}

pub(crate) const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        // Eof is sticky
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn unexpected(&self, wanted: &str) -> ExprError {
        let t = self.peek();
        ExprError::syntax(
            t.offset,
            format!("expected {wanted}, found {}", t.kind.describe()),
        )
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ExprError> {
        if &self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected(&kind.describe()))
        }
    }

    /// Descend one nesting level opened by the token at `offset`.
    fn enter(&mut self, offset: usize) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::syntax(
                offset,
                format!("expression nests deeper than {MAX_DEPTH} levels"),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_factor()?;
        loop {
            let op = if self.consume(&TokenKind::Plus) {
                BinaryOp::Add
            } else if self.consume(&TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                break;
            };
            let r = self.parse_factor()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_factor(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_unary()?;
        loop {
            let op = if self.consume(&TokenKind::Star) {
                BinaryOp::Mul
            } else if self.consume(&TokenKind::Slash) {
                BinaryOp::Div
            } else {
                break;
            };
            let r = self.parse_unary()?;
            e = Expr::Binary {
                op,
                left: Box::new(e),
                right: Box::new(r),
            };
        }
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        let offset = self.peek().offset;
        let negate = if self.consume(&TokenKind::Minus) {
            true
        } else if self.consume(&TokenKind::Plus) {
            false
        } else {
            return self.parse_postfix();
        };
        self.enter(offset)?;
        let e = self.parse_unary()?;
        self.leave();
        Ok(if negate { Expr::Neg(Box::new(e)) } else { e })
    }

    fn parse_postfix(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_primary()?;
        while self.consume(&TokenKind::Dot) {
            let t = self.bump();
            let TokenKind::Ident(selector) = t.kind else {
                return Err(ExprError::syntax(
                    t.offset,
                    format!("expected component after '.', found {}", t.kind.describe()),
                ));
            };
            e = Expr::Component {
                base: Box::new(e),
                selector,
                offset: t.offset,
            };
        }
        Ok(e)
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.consume(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_term()?);
            if self.consume(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RParen)?;
            return Ok(args);
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let t = self.bump();
        match t.kind {
            TokenKind::Number(v) => Ok(Expr::Lit(v)),
            TokenKind::Ident(name) => {
                if self.consume(&TokenKind::LParen) {
                    self.enter(t.offset)?;
                    let args = self.parse_args()?;
                    self.leave();
                    Ok(Expr::Call {
                        func: name,
                        args,
                        offset: t.offset,
                    })
                } else {
                    Ok(Expr::Ident {
                        name,
                        offset: t.offset,
                    })
                }
            }
            TokenKind::LParen => {
                self.enter(t.offset)?;
                let e = self.parse_term()?;
                self.expect(&TokenKind::RParen)?;
                self.leave();
                Ok(e)
            }
            other => Err(ExprError::syntax(
                t.offset,
                format!("expected a value, found {}", other.describe()),
            )),
        }
    }
}
