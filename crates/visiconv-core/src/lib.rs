//! # visiconv-core
//!
//! Core coordinate types for the visiconv VisiCalc-to-modern-spreadsheet
//! translator.
//!
//! This crate provides:
//! - [`CellCoord`] - A 1-based (column, row) cell coordinate
//! - Base-26 column letter conversion (`A` = 1, `Z` = 26, `AA` = 27, ...)
//!
//! ## Example
//!
//! ```rust
//! use visiconv_core::CellCoord;
//!
//! let coord = CellCoord::from_parts("AA", "12").unwrap();
//! assert_eq!(coord, CellCoord::new(27, 12));
//! assert_eq!(coord.to_string(), "AA12");
//! ```

pub mod coord;
pub mod error;

pub use coord::{column_to_letters, letters_to_column, CellCoord};
pub use error::{Error, Result};
