//! # visiconv-formula
//!
//! VisiCalc formula parser and modern-syntax renderer.
//!
//! This crate provides:
//! - Formula parsing (VisiCalc cell text → AST)
//! - Rendering (AST → modern `=`-prefixed formula text)
//!
//! VisiCalc evaluates chained binary operators strictly left to right with
//! no precedence; modern formula languages apply conventional precedence.
//! The renderer re-parenthesizes every operator chain so the modern
//! evaluator reproduces the VisiCalc result exactly.
//!
//! ## Example
//!
//! ```rust
//! use visiconv_formula::parse_cell;
//!
//! let content = parse_cell("1-2*3").unwrap();
//! assert_eq!(content.to_modern(), "=(1-2)*3");
//! ```

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{BinaryOperator, CellContent, Expr, UnaryOperator};
pub use error::{ParseError, ParseResult};
pub use parser::parse_cell;
