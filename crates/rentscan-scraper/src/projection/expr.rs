//! Path expressions over JSON trees: a small closed subset of JMESPath.
//!
//! ```text
//! expr  := term ('.' term)* ( '[*]' ('.' expr)? )?
//! term  := ident | '{' ident ':' expr (',' ident ':' expr)* '}'
//! ident := [A-Za-z_][A-Za-z0-9_]* | '"' any-but-quote '"'
//! ```
//!
//! A leading `[*]` projects over the root. Whitespace is allowed between
//! tokens.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    /// The current node.
    Identity,
    /// Key lookup on an object.
    Field(String),
    /// Evaluate the left side, then the right side against its result.
    Subexpr(Box<Expr>, Box<Expr>),
    /// Evaluate the left side to an array and apply the right side to each
    /// element, dropping null results.
    Project(Box<Expr>, Box<Expr>),
    /// Build an object from named sub-expressions of the current node.
    Hash(Vec<(String, Expr)>),
}

impl Expr {
    /// Evaluates the expression. Any segment that does not resolve yields
    /// `Value::Null`; evaluation never fails.
    pub(crate) fn eval(&self, node: &Value) -> Value {
        match self {
            Expr::Identity => node.clone(),
            Expr::Field(key) => node.get(key).cloned().unwrap_or(Value::Null),
            Expr::Subexpr(lhs, rhs) => match lhs.eval(node) {
                Value::Null => Value::Null,
                inner => rhs.eval(&inner),
            },
            Expr::Project(lhs, rhs) => match lhs.eval(node) {
                Value::Array(items) => Value::Array(
                    items
                        .iter()
                        .map(|item| rhs.eval(item))
                        .filter(|v| !v.is_null())
                        .collect(),
                ),
                _ => Value::Null,
            },
            Expr::Hash(pairs) => {
                if node.is_null() {
                    return Value::Null;
                }
                let object: Map<String, Value> = pairs
                    .iter()
                    .map(|(key, expr)| (key.clone(), expr.eval(node)))
                    .collect();
                Value::Object(object)
            }
        }
    }
}

/// Parse failure: byte position in the path and a short reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    pub position: usize,
    pub reason: String,
}

pub(crate) fn parse(path: &str) -> Result<Expr, SyntaxError> {
    let mut parser = Parser { src: path, pos: 0 };
    parser.skip_ws();
    if parser.at_end() {
        return Err(parser.error("empty path"));
    }
    let expr = parser.parse_chain()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn error(&self, reason: &str) -> SyntaxError {
        SyntaxError {
            position: self.pos,
            reason: reason.to_owned(),
        }
    }

    fn parse_chain(&mut self) -> Result<Expr, SyntaxError> {
        self.skip_ws();
        let mut expr = if self.rest().starts_with("[*]") {
            Expr::Identity
        } else {
            self.parse_term()?
        };

        loop {
            self.skip_ws();
            if self.eat("[*]") {
                self.skip_ws();
                let rhs = if self.eat(".") {
                    self.parse_chain()?
                } else {
                    Expr::Identity
                };
                return Ok(Expr::Project(Box::new(expr), Box::new(rhs)));
            }
            if self.eat(".") {
                self.skip_ws();
                let rhs = self.parse_term()?;
                expr = Expr::Subexpr(Box::new(expr), Box::new(rhs));
                continue;
            }
            return Ok(expr);
        }
    }

    fn parse_term(&mut self) -> Result<Expr, SyntaxError> {
        if self.eat("{") {
            return self.parse_hash();
        }
        self.parse_ident().map(Expr::Field)
    }

    fn parse_hash(&mut self) -> Result<Expr, SyntaxError> {
        let mut pairs: Vec<(String, Expr)> = Vec::new();
        loop {
            self.skip_ws();
            let key = self.parse_ident()?;
            if pairs.iter().any(|(existing, _)| *existing == key) {
                return Err(self.error("duplicate key in {...}"));
            }
            self.skip_ws();
            if !self.eat(":") {
                return Err(self.error("expected ':'"));
            }
            let value = self.parse_chain()?;
            pairs.push((key, value));

            self.skip_ws();
            if self.eat(",") {
                continue;
            }
            if self.eat("}") {
                return Ok(Expr::Hash(pairs));
            }
            return Err(self.error("expected ',' or '}'"));
        }
    }

    fn parse_ident(&mut self) -> Result<String, SyntaxError> {
        if self.eat("\"") {
            let Some(len) = self.rest().find('"') else {
                return Err(self.error("unterminated quoted identifier"));
            };
            let ident = self.rest()[..len].to_owned();
            self.pos += len + 1;
            return Ok(ident);
        }

        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return Err(self.error("expected identifier")),
        }
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(self.rest().len());
        let ident = self.rest()[..len].to_owned();
        self.pos += len;
        Ok(ident)
    }
}
