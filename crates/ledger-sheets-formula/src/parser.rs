//! Formula parser
//!
//! A recursive descent parser with conventional operator precedence:
//! add/subtract below multiply/divide below power below unary minus.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use ledger_sheets_core::Coord;

/// Parse a formula string into an AST
///
/// # Example
/// ```rust
/// use ledger_sheets_formula::parse_formula;
///
/// let ast = parse_formula("=1+2*3").unwrap();
/// let ast = parse_formula("=SUM(A1:A10)").unwrap();
/// let ast = parse_formula("=B2*(1+C3)").unwrap();
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<Expr> {
    let formula = formula.trim();

    let body = formula
        .strip_prefix('=')
        .ok_or_else(|| FormulaError::Parse("Formula must start with '='".into()))?;

    let mut parser = Parser::new(body);
    let expr = parser.parse_expression()?;

    if let Some(e) = parser.error.take() {
        return Err(e);
    }
    if parser.current != Token::Eof {
        return Err(FormulaError::Parse(format!(
            "Unexpected token after expression: {:?}",
            parser.current
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    CellRef(Coord),
    Identifier(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Colon,
    Comma,
    LeftParen,
    RightParen,

    Eof,
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    current: Token,
    error: Option<FormulaError>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let mut parser = Self {
            input,
            pos: 0,
            current: Token::Eof,
            error: None,
        };
        parser.advance();
        parser
    }

    // === Token scanning ===

    fn advance(&mut self) {
        match self.scan_token() {
            Ok(tok) => self.current = tok,
            Err(e) => {
                // Surface the scan error at the next token read
                self.error = Some(e);
                self.current = Token::Eof;
            }
        }
    }

    fn take(&mut self) -> FormulaResult<Token> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        let tok = self.current.clone();
        self.advance();
        Ok(tok)
    }

    fn expect(&mut self, expected: Token) -> FormulaResult<()> {
        let tok = self.take()?;
        if tok != expected {
            return Err(FormulaError::Parse(format!(
                "Expected {:?}, found {:?}",
                expected, tok
            )));
        }
        Ok(())
    }

    fn scan_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();

        let Some(c) = self.peek_char() else {
            return Ok(Token::Eof);
        };

        match c {
            '+' => {
                self.pos += 1;
                Ok(Token::Plus)
            }
            '-' => {
                self.pos += 1;
                Ok(Token::Minus)
            }
            '*' => {
                self.pos += 1;
                Ok(Token::Star)
            }
            '/' => {
                self.pos += 1;
                Ok(Token::Slash)
            }
            '^' => {
                self.pos += 1;
                Ok(Token::Caret)
            }
            ':' => {
                self.pos += 1;
                Ok(Token::Colon)
            }
            ',' => {
                self.pos += 1;
                Ok(Token::Comma)
            }
            '(' => {
                self.pos += 1;
                Ok(Token::LeftParen)
            }
            ')' => {
                self.pos += 1;
                Ok(Token::RightParen)
            }
            c if c.is_ascii_digit() || c == '.' => self.scan_number(),
            c if c.is_ascii_alphabetic() => self.scan_word(),
            c => Err(FormulaError::Parse(format!("Unexpected character '{}'", c))),
        }
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        let mut seen_dot = false;

        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'0'..=b'9' => self.pos += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    self.pos += 1;
                }
                _ => break,
            }
        }

        let text = &self.input[start..self.pos];
        let n: f64 = text
            .parse()
            .map_err(|_| FormulaError::Parse(format!("Invalid number '{}'", text)))?;
        Ok(Token::Number(n))
    }

    /// Scan letters optionally followed by digits: a cell reference if digits
    /// follow (A1, ZZ30), otherwise an identifier (SUM, AVERAGE).
    fn scan_word(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        let bytes = self.input.as_bytes();

        while self.pos < bytes.len() && bytes[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        let letters_end = self.pos;
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }

        let text = &self.input[start..self.pos];
        if self.pos > letters_end {
            let coord = Coord::parse(text)
                .map_err(|_| FormulaError::Parse(format!("Invalid cell reference '{}'", text)))?;
            Ok(Token::CellRef(coord))
        } else {
            Ok(Token::Identifier(text.to_ascii_uppercase()))
        }
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    // === Grammar ===

    fn parse_expression(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };
            self.take()?;
            let right = self.parse_term()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_power()?;

        loop {
            let op = match self.current {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };
            self.take()?;
            let right = self.parse_power()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_power(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_unary()?;

        while self.current == Token::Caret {
            self.take()?;
            let right = self.parse_unary()?;
            left = Expr::BinaryOp {
                op: BinaryOperator::Power,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<Expr> {
        match self.current {
            Token::Minus => {
                self.take()?;
                let operand = self.parse_unary()?;
                Ok(Expr::UnaryOp {
                    op: UnaryOperator::Negate,
                    operand: Box::new(operand),
                })
            }
            Token::Plus => {
                self.take()?;
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> FormulaResult<Expr> {
        match self.take()? {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::CellRef(start) => {
                if self.current == Token::Colon {
                    self.take()?;
                    match self.take()? {
                        Token::CellRef(end) => Ok(Expr::RangeRef(start, end)),
                        tok => Err(FormulaError::Parse(format!(
                            "Expected cell reference after ':', found {:?}",
                            tok
                        ))),
                    }
                } else {
                    Ok(Expr::CellRef(start))
                }
            }
            Token::Identifier(name) => {
                self.expect(Token::LeftParen)?;
                let args = self.parse_args()?;
                Ok(Expr::Function { name, args })
            }
            Token::LeftParen => {
                let expr = self.parse_expression()?;
                self.expect(Token::RightParen)?;
                Ok(expr)
            }
            Token::Eof => Err(FormulaError::Parse("Unexpected end of formula".into())),
            tok => Err(FormulaError::Parse(format!("Unexpected token {:?}", tok))),
        }
    }

    fn parse_args(&mut self) -> FormulaResult<Vec<Expr>> {
        let mut args = Vec::new();

        if self.current == Token::RightParen {
            self.take()?;
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            match self.take()? {
                Token::Comma => continue,
                Token::RightParen => break,
                tok => {
                    return Err(FormulaError::Parse(format!(
                        "Expected ',' or ')' in argument list, found {:?}",
                        tok
                    )))
                }
            }
        }

        Ok(args)
    }
}
