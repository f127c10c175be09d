//! Formula Abstract Syntax Tree types and rendering
//!
//! Each node renders itself into modern formula syntax. Literal text is
//! carried verbatim from the source: numbers and cell references have
//! identical syntax in both languages, so nothing is re-formatted that
//! does not have to be.

use std::fmt;

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal, preserved verbatim (digits, decimal point, exponent)
    Number(String),

    /// Single cell reference, column letters and row digits as matched
    Cell { col: String, row: String },

    /// Range between two cell endpoints
    CellRange {
        start_col: String,
        start_row: String,
        end_col: String,
        end_row: String,
    },

    /// Prefix sign applied to a sub-expression
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },

    /// Left-to-right chain of binary operators with no explicit grouping
    ///
    /// `rest` is never empty: a chain of length zero is just its operand
    /// and is never wrapped in this variant.
    Chain {
        first: Box<Expr>,
        rest: Vec<(BinaryOperator, Expr)>,
    },

    /// Function call (`@SUM(...)` in the source), possibly without arguments
    Function { name: String, args: Vec<Expr> },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// The operator's single-character spelling (same in both languages)
    pub fn as_char(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

/// Parsed content of one cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// An expression to be rendered as a formula (or bare numeric literal)
    Value(Expr),
    /// Free text, rendered unchanged
    Label(String),
}

impl Expr {
    /// Render this expression into modern formula syntax
    pub fn render(&self) -> String {
        match self {
            Expr::Number(text) => text.clone(),

            Expr::Cell { col, row } => format!("{col}{row}"),

            // The range separator is normalized to a single colon no matter
            // how many dots the source spelled it with.
            Expr::CellRange {
                start_col,
                start_row,
                end_col,
                end_row,
            } => format!("{start_col}{start_row}:{end_col}{end_row}"),

            Expr::UnaryOp { op, operand } => match op {
                // VisiCalc used a leading '+' to force formula interpretation
                // of text that would otherwise parse as a label. The '='
                // marker already serves that purpose, so the sign is dropped.
                UnaryOperator::Plus => operand.render(),
                UnaryOperator::Minus => {
                    if matches!(**operand, Expr::Chain { .. }) {
                        // Negation must bind tighter than the chain.
                        format!("-({})", operand.render())
                    } else {
                        format!("-{}", operand.render())
                    }
                }
            },

            Expr::Chain { first, rest } => render_chain(first, rest),

            Expr::Function { name, args } => {
                let args: Vec<String> = args.iter().map(Expr::render).collect();
                format!("{}({})", name, args.join(","))
            }
        }
    }
}

/// Render a left-to-right operator chain with explicit grouping
///
/// VisiCalc evaluated chained operators strictly left to right; the target
/// language applies standard precedence. Opening `rest.len() - 1`
/// parentheses up front and closing one after every operand except the
/// last forces left-to-right evaluation regardless of which operators
/// appear: `a+b*c-d` becomes `((a+b)*c)-d`.
fn render_chain(first: &Expr, rest: &[(BinaryOperator, Expr)]) -> String {
    // The parser never builds an empty chain; degenerate input still
    // renders sensibly rather than panicking.
    let Some((last, inner)) = rest.split_last() else {
        return render_operand(first);
    };

    let mut out = String::new();

    if rest.len() > 1 {
        for _ in 0..rest.len() - 1 {
            out.push('(');
        }
    }

    out.push_str(&render_operand(first));

    for (op, operand) in inner {
        out.push(op.as_char());
        out.push_str(&render_operand(operand));
        out.push(')');
    }

    out.push(last.0.as_char());
    out.push_str(&render_operand(&last.1));
    out
}

/// Render a chain operand, restoring explicit grouping
///
/// An operand that is itself a chain can only have come from parentheses
/// in the source text, so the parentheses are re-emitted around it.
fn render_operand(operand: &Expr) -> String {
    if matches!(operand, Expr::Chain { .. }) {
        format!("({})", operand.render())
    } else {
        operand.render()
    }
}

impl CellContent {
    /// Render this cell's content into modern spreadsheet syntax
    ///
    /// A bare number (optionally behind a single prefix sign) stays a plain
    /// literal; everything else becomes a formula prefixed with `=`.
    pub fn to_modern(&self) -> String {
        match self {
            CellContent::Label(text) => text.clone(),
            CellContent::Value(expr) => {
                if expr.is_numeric_literal() {
                    expr.render()
                } else {
                    format!("={}", expr.render())
                }
            }
        }
    }
}

impl Expr {
    /// A bare number, or a prefix sign directly on a number
    ///
    /// These render as plain literals: a leading sign on a pure number did
    /// not force formula mode in VisiCalc either.
    fn is_numeric_literal(&self) -> bool {
        match self {
            Expr::Number(_) => true,
            Expr::UnaryOp { operand, .. } => matches!(**operand, Expr::Number(_)),
            _ => false,
        }
    }
}
