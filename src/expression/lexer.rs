use crate::expression::error::ExprError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Number(f64),

    LParen,
    RParen,
    Comma,
    Dot,

    Plus,
    Minus,
    Star,
    Slash,

    Eof,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Ident(s) => format!("identifier `{s}`"),
            Self::Number(v) => format!("number {v}"),
            Self::LParen => "`(`".to_owned(),
            Self::RParen => "`)`".to_owned(),
            Self::Comma => "`,`".to_owned(),
            Self::Dot => "`.`".to_owned(),
            Self::Plus => "`+`".to_owned(),
            Self::Minus => "`-`".to_owned(),
            Self::Star => "`*`".to_owned(),
            Self::Slash => "`/`".to_owned(),
            Self::Eof => "end of input".to_owned(),
        }
    }
}

fn digits_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

pub(crate) fn lex(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        let next_is_digit = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);

        // [0-9]+(.[0-9]*)?([eE][+-]?[0-9]+)? or .[0-9]+(...)
        if c.is_ascii_digit() || (c == b'.' && next_is_digit) {
            i = digits_end(bytes, i);
            // a dot followed by a letter is a component selector, not a fraction
            if bytes.get(i) == Some(&b'.') && !bytes.get(i + 1).is_some_and(u8::is_ascii_alphabetic)
            {
                i = digits_end(bytes, i + 1);
            }
            if matches!(bytes.get(i), Some(b'e' | b'E')) {
                let e_pos = i;
                i += 1;
                if matches!(bytes.get(i), Some(b'+' | b'-')) {
                    i += 1;
                }
                let exp_start = i;
                i = digits_end(bytes, i);
                if exp_start == i {
                    return Err(ExprError::syntax(e_pos, "exponent needs digits"));
                }
            }

            let v: f64 = input[start..i]
                .parse()
                .map_err(|_| ExprError::syntax(start, "malformed number"))?;
            out.push(Token {
                kind: TokenKind::Number(v),
                offset: start,
            });
            continue;
        }

        if c.is_ascii_alphabetic() || c == b'_' {
            i += 1;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            out.push(Token {
                kind: TokenKind::Ident(input[start..i].to_owned()),
                offset: start,
            });
            continue;
        }

        let kind = match c {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            _ => {
                let ch = input[start..].chars().next().unwrap_or('?');
                return Err(ExprError::syntax(start, format!("unexpected character '{ch}'")));
            }
        };
        i += 1;
        out.push(Token {
            kind,
            offset: start,
        });
    }

    out.push(Token {
        kind: TokenKind::Eof,
        offset: input.len(),
    });

    Ok(out)
}
