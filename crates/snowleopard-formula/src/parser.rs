//! Formula parser
//!
//! A recursive descent parser for `NAME(section; section; ...)` calls, where
//! each section is a comma-separated operand list.

use crate::ast::FormulaExpr;
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionName;

/// Parse a formula string into an AST
///
/// # Example
/// ```rust
/// use snowleopard_formula::{parse_formula, FormulaExpr};
///
/// let ast = parse_formula("SUMDROP(1; Quiz1, Quiz2, Quiz3)").unwrap();
/// let ast = parse_formula("BOUND(0; 100; \"Quiz 1\")").unwrap();
/// assert_eq!(parse_formula("42").unwrap(), FormulaExpr::Number(42.0));
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    let formula = formula.trim();
    let mut parser = FormulaParser::new(formula);

    if parser.current_token() == &Token::Eof {
        return Err(parser.error(0, "Empty formula"));
    }

    let expr = parser.parse_operand()?;

    // Make sure we consumed all input
    if parser.current_token() != &Token::Eof {
        return Err(parser.unexpected("end of formula"));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    // Literals
    Number(f64),

    // Names
    Identifier(String), // Function name or bare column name
    QuotedName(String), // "Column with spaces"

    // Signs
    Plus,
    Minus,

    // Delimiters
    Comma,
    Semicolon,
    LeftParen,
    RightParen,

    // Unscannable input, with the reason
    Invalid(String),

    // End of input
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Identifier(name) => format!("'{}'", name),
            Token::QuotedName(name) => format!("\"{}\"", name),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Comma => "','".into(),
            Token::Semicolon => "';'".into(),
            Token::LeftParen => "'('".into(),
            Token::RightParen => "')'".into(),
            Token::Invalid(reason) => reason.clone(),
            Token::Eof => "end of formula".into(),
        }
    }
}

/// Operands of one `;`-separated section, with their positions
struct Section {
    start: usize,
    operands: Vec<(usize, FormulaExpr)>,
}

impl Section {
    fn new(start: usize) -> Self {
        Self {
            start,
            operands: Vec::new(),
        }
    }
}

/// Formula parser
struct FormulaParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Option<Token>,
    /// Byte offset where the current token starts
    token_start: usize,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> Self {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: None,
            token_start: 0,
        };
        parser.advance_token();
        parser
    }

    // === Token scanning ===

    fn advance_token(&mut self) {
        self.skip_whitespace();
        self.token_start = self.pos;
        self.current_token = Some(self.scan_token());
    }

    fn scan_token(&mut self) -> Token {
        let c = match self.peek_char() {
            Some(c) => c,
            None => return Token::Eof,
        };

        // Single-character tokens
        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            ',' => Some(Token::Comma),
            ';' => Some(Token::Semicolon),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return token;
        }

        // Quoted column name
        if c == '"' {
            return self.scan_quoted();
        }

        // Number
        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        // Function or column name
        if c.is_alphabetic() || c == '_' {
            return self.scan_identifier();
        }

        self.advance();
        Token::Invalid(format!("Unexpected character '{}'", c))
    }

    fn scan_quoted(&mut self) -> Token {
        self.advance(); // Skip opening quote

        let mut name = String::new();
        loop {
            match self.peek_char() {
                None => return Token::Invalid("Unterminated quoted column name".into()),
                Some('"') => {
                    // Check for escaped quote ("")
                    if self.peek_char_at(1) == Some('"') {
                        name.push('"');
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        return Token::QuotedName(name);
                    }
                }
                Some(c) => {
                    name.push(c);
                    self.advance();
                }
            }
        }
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;

        // Integer part
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent part
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek_char().map_or(false, |c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let num_str = &self.input[start..self.pos];
        match num_str.parse::<f64>() {
            Ok(num) if num.is_finite() => Token::Number(num),
            Ok(_) => Token::Invalid(format!("Number '{}' is out of range", num_str)),
            Err(_) => Token::Invalid(format!("Invalid number '{}'", num_str)),
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            self.advance();
        }
        Token::Identifier(self.input[start..self.pos].to_string())
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn current_token(&self) -> &Token {
        self.current_token.as_ref().unwrap_or(&Token::Eof)
    }

    fn consume(&mut self) -> Token {
        let token = self.current_token.take().unwrap_or(Token::Eof);
        self.advance_token();
        token
    }

    fn error<S: Into<String>>(&self, position: usize, reason: S) -> FormulaError {
        FormulaError::Syntax {
            formula: self.input.to_string(),
            position,
            reason: reason.into(),
        }
    }

    /// Error for the current token, which is not what the grammar allows here
    fn unexpected(&self, expected: &str) -> FormulaError {
        match self.current_token() {
            Token::Invalid(reason) => self.error(self.token_start, reason.clone()),
            other => self.error(
                self.token_start,
                format!("Expected {}, found {}", expected, other.describe()),
            ),
        }
    }

    // === Grammar ===
    // formula  := operand EOF
    // operand  := number | sign number | name | quoted | call
    // call     := NAME '(' section (';' section)* ')'
    // section  := operand (',' operand)*

    fn parse_operand(&mut self) -> FormulaResult<FormulaExpr> {
        let start = self.token_start;

        match self.current_token().clone() {
            Token::Number(n) => {
                self.consume();
                Ok(FormulaExpr::Number(n))
            }
            Token::Plus | Token::Minus => {
                let negative = self.consume() == Token::Minus;
                match *self.current_token() {
                    Token::Number(n) => {
                        self.consume();
                        Ok(FormulaExpr::Number(if negative { -n } else { n }))
                    }
                    _ => Err(self.unexpected("number after sign")),
                }
            }
            Token::QuotedName(name) => {
                self.consume();
                Ok(FormulaExpr::ColumnRef(name))
            }
            Token::Identifier(name) => {
                self.consume();
                if self.current_token() == &Token::LeftParen {
                    self.parse_call(&name, start)
                } else {
                    Ok(FormulaExpr::ColumnRef(name))
                }
            }
            _ => Err(self.unexpected("operand")),
        }
    }

    fn parse_call(&mut self, name: &str, name_start: usize) -> FormulaResult<FormulaExpr> {
        let function: FunctionName = name.parse().map_err(|_| {
            self.error(
                name_start,
                format!("Unknown function '{}' (expected SUMDROP or BOUND)", name),
            )
        })?;

        let open = self.token_start;
        self.consume(); // '('
        let sections = self.parse_sections(open)?;

        match function {
            FunctionName::SumDrop => self.build_sum_drop(sections, name_start),
            FunctionName::Bound => self.build_bound(sections, name_start),
        }
    }

    fn parse_sections(&mut self, open: usize) -> FormulaResult<Vec<Section>> {
        let mut sections = Vec::new();
        let mut current = Section::new(self.token_start);

        loop {
            if self.current_token() == &Token::Eof {
                return Err(self.error(open, "Unclosed '('"));
            }

            let start = self.token_start;
            let expr = self.parse_operand()?;
            current.operands.push((start, expr));

            match self.current_token() {
                Token::Comma => {
                    self.consume();
                }
                Token::Semicolon => {
                    self.consume();
                    let next = Section::new(self.token_start);
                    sections.push(std::mem::replace(&mut current, next));
                }
                Token::RightParen => {
                    self.consume();
                    sections.push(current);
                    return Ok(sections);
                }
                Token::Eof => return Err(self.error(open, "Unclosed '('")),
                _ => return Err(self.unexpected("',', ';' or ')'")),
            }
        }
    }

    fn build_sum_drop(&self, sections: Vec<Section>, name_start: usize) -> FormulaResult<FormulaExpr> {
        let count = sections.len();
        let mut sections = sections.into_iter();
        let (Some(k_section), Some(value_section)) = (sections.next(), sections.next()) else {
            return Err(self.error(
                name_start,
                format!("SUMDROP expects 'k; values', got {} section(s)", count),
            ));
        };
        let weight_section = sections.next();
        if let Some(extra) = sections.next() {
            return Err(self.error(
                extra.start,
                format!("SUMDROP expects at most 3 sections, got {}", count),
            ));
        }

        let drop = match k_section.operands.as_slice() {
            [(_, FormulaExpr::Number(n))]
                if *n >= 0.0 && n.fract() == 0.0 && *n <= f64::from(u32::MAX) =>
            {
                *n as usize
            }
            [(pos, _)] => {
                return Err(self.error(*pos, "SUMDROP k must be a non-negative integer literal"))
            }
            _ => {
                return Err(self.error(
                    k_section.start,
                    "SUMDROP takes exactly one k before ';'",
                ))
            }
        };

        let operands: Vec<FormulaExpr> = value_section.operands.into_iter().map(|(_, e)| e).collect();
        if operands.len() <= drop {
            return Err(self.error(
                value_section.start,
                format!(
                    "SUMDROP cannot drop {} of {} value(s)",
                    drop,
                    operands.len()
                ),
            ));
        }

        let weights = match weight_section {
            None => None,
            Some(section) => {
                let kept = operands.len() - drop;
                if section.operands.len() != kept {
                    return Err(self.error(
                        section.start,
                        format!(
                            "SUMDROP expects {} weight(s) for the kept values, got {}",
                            kept,
                            section.operands.len()
                        ),
                    ));
                }
                let mut weights = Vec::with_capacity(kept);
                for (pos, expr) in section.operands {
                    match expr {
                        FormulaExpr::Number(w) => weights.push(w),
                        _ => return Err(self.error(pos, "SUMDROP weights must be numeric literals")),
                    }
                }
                Some(weights)
            }
        };

        Ok(FormulaExpr::SumDrop {
            drop,
            operands,
            weights,
        })
    }

    fn build_bound(&self, sections: Vec<Section>, name_start: usize) -> FormulaResult<FormulaExpr> {
        let shape: Vec<usize> = sections.iter().map(|s| s.operands.len()).collect();
        let arity_error = || {
            self.error(
                name_start,
                "BOUND expects 'lower; upper; value' or 'lower, upper; value'",
            )
        };

        if !matches!(shape.as_slice(), [1, 1, 1] | [2, 1]) {
            return Err(arity_error());
        }

        let operands: Vec<FormulaExpr> = sections
            .into_iter()
            .flat_map(|s| s.operands)
            .map(|(_, e)| e)
            .collect();
        let [lower, upper, value]: [FormulaExpr; 3] =
            operands.try_into().map_err(|_| arity_error())?;

        Ok(FormulaExpr::Bound {
            lower: Box::new(lower),
            upper: Box::new(upper),
            value: Box::new(value),
        })
    }
}
