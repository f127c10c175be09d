//! # visiconv-doc
//!
//! VisiCalc worksheet-dump parser and document model.
//!
//! A dump is a linear keystroke-style command stream: cursor moves
//! (`>A1:`), cell entries, and menu commands (`/GF$`). This crate parses
//! the stream into [`Command`] records, replays them against a mutable
//! [`Document`] grid, and batch-translates every populated cell into
//! modern formula syntax via `visiconv-formula`.
//!
//! ## Example
//!
//! ```rust
//! use visiconv_doc::{parse_dump, Document};
//! use visiconv_core::CellCoord;
//!
//! let commands = parse_dump(">A1\n1+1\n").unwrap();
//! let mut doc = Document::new();
//! doc.replay(&commands).unwrap();
//!
//! let translated = doc.translate_all();
//! assert_eq!(translated[&CellCoord::new(1, 1)], "=1+1");
//! ```

pub mod command;
pub mod document;
pub mod error;

pub use command::{parse_dump, Command};
pub use document::Document;
pub use error::{Error, Result};
