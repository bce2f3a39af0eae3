//! Arithmetic for the calculator panel.
//!
//! Input is first reduced to digits, `+ - * / ( ) .` and whitespace, then
//! evaluated by a small recursive-descent parser over `f64`.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::AppError;

const MAX_INPUT_LEN: usize = 1024;
const MAX_DEPTH: usize = 64;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9+\-*/().\s]").expect("Invalid regex: calculator charset"));

/// Drops every character the calculator does not understand.
pub fn sanitize(input: &str) -> String {
    DISALLOWED.replace_all(input, "").into_owned()
}

/// Evaluates an arithmetic expression after sanitizing it.
pub fn evaluate(input: &str) -> Result<f64, AppError> {
    if input.len() > MAX_INPUT_LEN {
        return Err(AppError::Validation(format!(
            "Expression longer than {} characters",
            MAX_INPUT_LEN
        )));
    }
    let cleaned = sanitize(input);
    let tokens = tokenize(&cleaned)?;
    if tokens.is_empty() {
        return Err(AppError::Validation("Empty expression".to_string()));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;
    if parser.pos != parser.tokens.len() {
        return Err(AppError::Validation(format!(
            "Unexpected token at position {}",
            parser.pos
        )));
    }
    if !value.is_finite() {
        return Err(AppError::Validation("Division by zero".to_string()));
    }
    Ok(value)
}

/// Renders a result the way the panel shows it: integers without a fraction.
pub fn format_result(value: f64) -> String {
    value.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Open,
    Close,
}

fn tokenize(input: &str) -> Result<Vec<Token>, AppError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let number = literal
                    .parse::<f64>()
                    .map_err(|_| AppError::Validation(format!("Invalid number: {}", literal)))?;
                tokens.push(Token::Number(number));
            }
            _ => {
                let token = match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '(' => Token::Open,
                    ')' => Token::Close,
                    other => {
                        return Err(AppError::Validation(format!("Unexpected character: {}", other)))
                    }
                };
                tokens.push(token);
                chars.next();
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    // Nesting of parentheses and unary signs; bounds recursion.
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, AppError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, AppError> {
        let mut value = self.factor()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = if op == Token::Star { value * rhs } else { value / rhs };
        }
        Ok(value)
    }

    // factor := ('+' | '-') factor | number | '(' expression ')'
    fn factor(&mut self) -> Result<f64, AppError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(AppError::Validation("Expression too deeply nested".to_string()));
        }
        let value = self.primary();
        self.depth -= 1;
        value
    }

    fn primary(&mut self) -> Result<f64, AppError> {
        match self.next() {
            Some(Token::Plus) => self.factor(),
            Some(Token::Minus) => Ok(-self.factor()?),
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Open) => {
                let value = self.expression()?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(AppError::Validation("Missing closing parenthesis".to_string())),
                }
            }
            Some(token) => Err(AppError::Validation(format!("Unexpected token: {:?}", token))),
            None => Err(AppError::Validation("Unexpected end of expression".to_string())),
        }
    }
}
