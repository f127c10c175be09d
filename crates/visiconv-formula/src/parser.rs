//! VisiCalc formula parser
//!
//! A backtracking recursive descent parser for the VisiCalc cell grammar.
//! The source language has no operator precedence, so instead of
//! precedence climbing the parser collects each run of binary operators
//! into a single left-to-right [`Expr::Chain`]. Alternatives are tried in
//! grammar order and the position is restored on failure; numeric literals
//! and identifiers use longest match.

use crate::ast::{BinaryOperator, CellContent, Expr, UnaryOperator};
use crate::error::{ParseError, ParseResult};

/// Parse one cell's raw text into [`CellContent`]
///
/// Text whose first character is a letter, apostrophe, or quotation mark
/// falls back to a [`CellContent::Label`] when it does not match the
/// expression grammar as a whole. Anything else must parse as an
/// expression or the whole parse fails.
///
/// # Example
/// ```rust
/// use visiconv_formula::parse_cell;
///
/// let content = parse_cell("@SUM(1,3+4,B5)").unwrap();
/// assert_eq!(content.to_modern(), "=SUM(1,3+4,B5)");
///
/// let content = parse_cell("GROSS MARGIN").unwrap();
/// assert_eq!(content.to_modern(), "GROSS MARGIN");
/// ```
pub fn parse_cell(text: &str) -> ParseResult<CellContent> {
    let mut parser = Parser::new(text);
    match parser.parse_all() {
        Ok(expr) => Ok(CellContent::Value(expr)),
        Err(err) => {
            if starts_like_label(text) {
                Ok(CellContent::Label(label_text(text)))
            } else {
                Err(err)
            }
        }
    }
}

fn starts_like_label(text: &str) -> bool {
    matches!(
        text.as_bytes().first(),
        Some(c) if c.is_ascii_alphabetic() || *c == b'\'' || *c == b'"'
    )
}

/// A leading `"` is VisiCalc's escape for literal text that would otherwise
/// be taken for a value (e.g. `"1985`) and is stripped from the stored
/// label; a leading `'` is ordinary label text and kept verbatim.
fn label_text(text: &str) -> String {
    match text.strip_prefix('"') {
        Some(rest) => rest.to_string(),
        None => text.to_string(),
    }
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Furthest offset any alternative reached before failing
    furthest: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            furthest: 0,
        }
    }

    /// Parse a complete expression; the whole input must be consumed
    fn parse_all(&mut self) -> ParseResult<Expr> {
        let result = self.expression().and_then(|expr| {
            if self.at_end() {
                Ok(expr)
            } else {
                Err(self.mismatch())
            }
        });
        // Report the deepest position reached across all backtracked
        // alternatives, not wherever the last alternative gave up.
        result.map_err(|_| ParseError {
            offset: self.furthest,
        })
    }

    // === Grammar rules, in ordered-choice order ===

    /// `expression := atom (operator atom)*`, greedy
    fn expression(&mut self) -> ParseResult<Expr> {
        let first = self.atom()?;

        let mut rest = Vec::new();
        loop {
            let save = self.pos;
            let Ok(op) = self.binary_operator() else {
                break;
            };
            match self.atom() {
                Ok(operand) => rest.push((op, operand)),
                Err(_) => {
                    self.pos = save;
                    break;
                }
            }
        }

        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Chain {
                first: Box::new(first),
                rest,
            })
        }
    }

    /// `atom := cell_range | cell | number | unary | parens | function`
    fn atom(&mut self) -> ParseResult<Expr> {
        let save = self.pos;

        if let Ok(expr) = self.cell_range() {
            return Ok(expr);
        }
        self.pos = save;

        if let Ok(expr) = self.cell() {
            return Ok(expr);
        }
        self.pos = save;

        if let Ok(expr) = self.number() {
            return Ok(expr);
        }
        self.pos = save;

        if let Ok(expr) = self.unary() {
            return Ok(expr);
        }
        self.pos = save;

        if let Ok(expr) = self.parens() {
            return Ok(expr);
        }
        self.pos = save;

        if let Ok(expr) = self.function() {
            return Ok(expr);
        }
        self.pos = save;

        Err(self.mismatch())
    }

    /// `cell_range := letters digits '.'{1,3} letters digits`
    ///
    /// One to three separator dots are accepted; truncated legacy files
    /// were observed with fewer dots than VisiCalc's canonical three.
    fn cell_range(&mut self) -> ParseResult<Expr> {
        let start_col = self.letters()?;
        let start_row = self.digits()?;

        let mut dots = 0;
        while dots < 3 && self.peek() == Some(b'.') {
            self.pos += 1;
            dots += 1;
        }
        if dots == 0 {
            return Err(self.mismatch());
        }

        let end_col = self.letters()?;
        let end_row = self.digits()?;

        Ok(Expr::CellRange {
            start_col: start_col.to_string(),
            start_row: start_row.to_string(),
            end_col: end_col.to_string(),
            end_row: end_row.to_string(),
        })
    }

    /// `cell := letters digits`
    fn cell(&mut self) -> ParseResult<Expr> {
        let col = self.letters()?;
        let row = self.digits()?;
        Ok(Expr::Cell {
            col: col.to_string(),
            row: row.to_string(),
        })
    }

    /// `number := mantissa (('e'|'E') ('+'|'-')? digits+)?`
    ///
    /// The matched text is kept verbatim; numeric literal syntax is
    /// identical in both languages.
    fn number(&mut self) -> ParseResult<Expr> {
        let start = self.pos;

        // mantissa := digits+ '.'? digits* | '.' digits+
        if self.take_digits() > 0 {
            if self.peek() == Some(b'.') {
                self.pos += 1;
                self.take_digits();
            }
        } else if self.peek() == Some(b'.') {
            self.pos += 1;
            if self.take_digits() == 0 {
                return Err(self.mismatch());
            }
        } else {
            return Err(self.mismatch());
        }

        // Optional exponent; rolled back if incomplete ("1e" is the number
        // 1 followed by other text, not a malformed literal).
        let save = self.pos;
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            if self.take_digits() == 0 {
                self.pos = save;
            }
        }

        Ok(Expr::Number(self.input[start..self.pos].to_string()))
    }

    /// `unary := ('+' | '-') expression`
    fn unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek() {
            Some(b'+') => UnaryOperator::Plus,
            Some(b'-') => UnaryOperator::Minus,
            _ => return Err(self.mismatch()),
        };
        self.pos += 1;

        let operand = self.expression()?;
        Ok(Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    /// `parens := '(' expression (')' | end-of-input)`
    ///
    /// A missing closing parenthesis at end of input is tolerated; legacy
    /// files turn up with truncated formulas.
    fn parens(&mut self) -> ParseResult<Expr> {
        self.expect(b'(')?;
        let expr = self.expression()?;

        if self.peek() == Some(b')') {
            self.pos += 1;
        } else if !self.at_end() {
            return Err(self.mismatch());
        }

        Ok(expr)
    }

    /// `function := '@' letters+ ('(' expression (',' expression)* ')')?`
    fn function(&mut self) -> ParseResult<Expr> {
        self.expect(b'@')?;
        let name = self.letters()?.to_string();

        let mut args = Vec::new();
        let save = self.pos;
        if self.peek() == Some(b'(') {
            self.pos += 1;
            match self.function_args() {
                Ok(list) => args = list,
                Err(_) => self.pos = save,
            }
        }

        Ok(Expr::Function { name, args })
    }

    fn function_args(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = vec![self.expression()?];
        while self.peek() == Some(b',') {
            self.pos += 1;
            args.push(self.expression()?);
        }
        self.expect(b')')?;
        Ok(args)
    }

    fn binary_operator(&mut self) -> ParseResult<BinaryOperator> {
        let op = match self.peek() {
            Some(b'+') => BinaryOperator::Add,
            Some(b'-') => BinaryOperator::Subtract,
            Some(b'*') => BinaryOperator::Multiply,
            Some(b'/') => BinaryOperator::Divide,
            _ => return Err(self.mismatch()),
        };
        self.pos += 1;
        Ok(op)
    }

    // === Scanning helpers ===

    fn letters(&mut self) -> ParseResult<&'a str> {
        let start = self.pos;
        while matches!(self.bytes.get(self.pos), Some(c) if c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        if self.pos == start {
            Err(self.mismatch())
        } else {
            Ok(&self.input[start..self.pos])
        }
    }

    fn digits(&mut self) -> ParseResult<&'a str> {
        let start = self.pos;
        if self.take_digits() == 0 {
            Err(self.mismatch())
        } else {
            Ok(&self.input[start..self.pos])
        }
    }

    fn take_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.bytes.get(self.pos), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn expect(&mut self, byte: u8) -> ParseResult<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.mismatch())
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn mismatch(&mut self) -> ParseError {
        self.furthest = self.furthest.max(self.pos);
        ParseError {
            offset: self.furthest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn modern(input: &str) -> String {
        parse_cell(input).unwrap().to_modern()
    }

    #[test]
    fn test_numeric_literals_round_trip() {
        for text in ["123", ".6", "3.14", "1.7e6", "1.7E6", "0.5", "2e10"] {
            assert_eq!(modern(text), text);
        }
    }

    #[test]
    fn test_signed_numbers_stay_literals() {
        assert_eq!(modern("-3.14"), "-3.14");
        assert_eq!(modern("-1.7E6"), "-1.7E6");
        // A leading '+' only forced value interpretation; it is dropped.
        assert_eq!(modern("+8"), "8");
    }

    #[test]
    fn test_left_to_right_chain_reparenthesized() {
        assert_eq!(modern("1-2*3"), "=(1-2)*3");
        assert_eq!(modern("1+2"), "=1+2");
        assert_eq!(modern("1+2*3-4/5"), "=(((1+2)*3)-4)/5");
        assert_eq!(modern("B1+B2+B3"), "=(B1+B2)+B3");
    }

    #[test]
    fn test_explicit_parens_preserved_in_chain() {
        assert_eq!(modern("(1+2)*3"), "=(1+2)*3");
        assert_eq!(modern("2*(1+2)"), "=2*(1+2)");
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(modern("-B6"), "=-B6");
        assert_eq!(modern("-(1+2)"), "=-(1+2)");
    }

    #[test]
    fn test_unary_plus_forces_value() {
        assert_eq!(modern("+B6"), "=B6");
        assert_eq!(modern("+B6*12"), "=B6*12");
    }

    #[test]
    fn test_cell_and_range() {
        assert_eq!(modern("-B6"), "=-B6");
        assert_eq!(modern("@SUM(A1...A10)"), "=SUM(A1:A10)");
        // Truncated separators are tolerated.
        assert_eq!(modern("@SUM(A1.A10)"), "=SUM(A1:A10)");
        assert_eq!(modern("@SUM(A1..A10)"), "=SUM(A1:A10)");
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(modern("@SUM(1,3+4,B5)"), "=SUM(1,3+4,B5)");
        assert_eq!(modern("@NA"), "=NA()");
        assert_eq!(modern("@AVERAGE(B1...B9)/2"), "=AVERAGE(B1:B9)/2");
        assert_eq!(modern("@SUM(@SUM(A1...A2),1)"), "=SUM(SUM(A1:A2),1)");
    }

    #[test]
    fn test_truncated_parens_tolerated() {
        assert_eq!(modern("((1"), "1");
        assert_eq!(modern("(1+2"), "=1+2");
        assert_eq!(modern("((1))"), "1");
    }

    #[test]
    fn test_labels() {
        assert_eq!(parse_cell("hello").unwrap(), CellContent::Label("hello".into()));
        assert_eq!(modern("HELLO"), "HELLO");
        // Apostrophes are label text and kept.
        assert_eq!(modern("'hello"), "'hello");
        // A leading quotation mark escapes literal text and is stripped.
        assert_eq!(modern("\"hello"), "hello");
        assert_eq!(modern("\"1985"), "1985");
        // Letter-initial text that does not fully match the grammar.
        assert_eq!(modern("B6 TOTAL"), "B6 TOTAL");
        assert_eq!(modern("GROSS MARGIN"), "GROSS MARGIN");
    }

    #[test]
    fn test_letter_initial_expression_is_a_value() {
        assert_eq!(modern("B6"), "=B6");
        assert_eq!(modern("B6*2"), "=B6*2");
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_cell("").is_err());
        assert!(parse_cell("=1+2").is_err());
        assert!(parse_cell("#VALUE").is_err());
        assert!(parse_cell("1+").is_err());

        // The offset points at the furthest position any alternative reached.
        let err = parse_cell("=1").unwrap_err();
        assert_eq!(err.offset, 0);
        let err = parse_cell("1..2").unwrap_err();
        assert!(err.offset >= 1);
    }

    #[test]
    fn test_output_is_never_retranslatable() {
        // Modern formula syntax is not part of the legacy grammar, so a
        // second pass over pipeline output either fails outright or is a
        // no-op (bare literals and labels).
        for input in ["1-2*3", "-B6", "@SUM(1,3+4,B5)", "A1...B2"] {
            let translated = modern(input);
            assert!(parse_cell(&translated).is_err(), "{translated}");
        }
        for input in ["+8", "-3.14", "'hello"] {
            let translated = modern(input);
            assert_eq!(modern(&translated), translated);
        }
    }
}
