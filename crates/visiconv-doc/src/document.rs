//! The document model: a mutable grid behind a floating cursor
//!
//! Replaying a dump is a teletype-style fold: navigation commands move the
//! cursor, entry commands write raw text under it. Once the stream has
//! been replayed the grid is frozen and translated cell by cell.

use ahash::AHashMap;
use visiconv_core::CellCoord;
use visiconv_formula::parse_cell;

use crate::command::Command;
use crate::error::Result;

/// A worksheet being rebuilt from a command stream
///
/// One `Document` per translation job; the grid holds raw, untranslated
/// cell text until [`Document::translate_all`] is called.
#[derive(Debug)]
pub struct Document {
    cursor: CellCoord,
    cells: AHashMap<CellCoord, String>,
}

impl Document {
    /// Create an empty document with the cursor at `A1`
    pub fn new() -> Self {
        Self {
            cursor: CellCoord::new(1, 1),
            cells: AHashMap::new(),
        }
    }

    /// Apply a single command to the document
    ///
    /// Menu commands never touch the grid; they are recognized but not
    /// understood, so they are reported at warning level and dropped.
    pub fn apply(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Goto { col, row } => {
                self.cursor = CellCoord::from_parts(col, row)?;
            }
            Command::Entry(text) => {
                self.cells.insert(self.cursor, text.clone());
            }
            Command::Menu(name) => {
                log::warn!("ignoring unhandled menu command /{name}");
            }
        }
        Ok(())
    }

    /// Apply a command stream in order
    pub fn replay(&mut self, commands: &[Command]) -> Result<()> {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }

    /// Raw text of a cell, if populated
    pub fn get(&self, coord: CellCoord) -> Option<&str> {
        self.cells.get(&coord).map(String::as_str)
    }

    /// Number of populated cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell has been populated
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over populated cells and their raw text
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, &str)> {
        self.cells.iter().map(|(&coord, raw)| (coord, raw.as_str()))
    }

    /// Translate every populated cell into modern formula syntax
    ///
    /// A cell whose text does not parse keeps its raw text in the output
    /// and the failure is logged; one bad cell never aborts the batch. The
    /// grid itself is not mutated.
    pub fn translate_all(&self) -> AHashMap<CellCoord, String> {
        let mut translated = AHashMap::with_capacity(self.cells.len());

        for (&coord, raw) in &self.cells {
            let output = match parse_cell(raw) {
                Ok(content) => content.to_modern(),
                Err(err) => {
                    log::error!("cell {coord}: {err}; keeping raw text {raw:?}");
                    raw.clone()
                }
            };
            translated.insert(coord, output);
        }

        translated
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_dump;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cursor_starts_at_a1() {
        let mut doc = Document::new();
        doc.apply(&Command::Entry("5".into())).unwrap();
        assert_eq!(doc.get(CellCoord::new(1, 1)), Some("5"));
    }

    #[test]
    fn test_goto_decodes_base26_columns() {
        let mut doc = Document::new();
        doc.apply(&Command::Goto {
            col: "AA".into(),
            row: "12".into(),
        })
        .unwrap();
        doc.apply(&Command::Entry("7".into())).unwrap();
        assert_eq!(doc.get(CellCoord::new(27, 12)), Some("7"));
    }

    #[test]
    fn test_entry_overwrites_cell() {
        let mut doc = Document::new();
        doc.apply(&Command::Entry("1".into())).unwrap();
        doc.apply(&Command::Entry("2".into())).unwrap();
        assert_eq!(doc.get(CellCoord::new(1, 1)), Some("2"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_menu_leaves_grid_untouched() {
        let mut doc = Document::new();
        doc.apply(&Command::Menu("GF$".into())).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_replay_and_translate() {
        let commands = parse_dump(">A1\n5\n>A2\n/X\n>A3\n1+1\n").unwrap();
        let mut doc = Document::new();
        doc.replay(&commands).unwrap();

        // The menu command moved nothing into A2.
        assert_eq!(doc.get(CellCoord::new(1, 1)), Some("5"));
        assert_eq!(doc.get(CellCoord::new(1, 2)), None);
        assert_eq!(doc.get(CellCoord::new(1, 3)), Some("1+1"));
        assert_eq!(doc.len(), 2);

        let translated = doc.translate_all();
        assert_eq!(translated[&CellCoord::new(1, 1)], "5");
        assert_eq!(translated[&CellCoord::new(1, 3)], "=1+1");
        assert_eq!(translated.len(), 2);
    }

    #[test]
    fn test_translate_all_keeps_unparseable_cells_raw() {
        let mut doc = Document::new();
        doc.apply(&Command::Entry("#err".into())).unwrap();
        doc.apply(&Command::Goto {
            col: "B".into(),
            row: "1".into(),
        })
        .unwrap();
        doc.apply(&Command::Entry("1+1".into())).unwrap();

        let translated = doc.translate_all();
        assert_eq!(translated[&CellCoord::new(1, 1)], "#err");
        assert_eq!(translated[&CellCoord::new(2, 1)], "=1+1");
    }

    #[test]
    fn test_cells_iterates_populated_grid() {
        let commands = parse_dump(">A1\n5\n>B2\n1+1\n").unwrap();
        let mut doc = Document::new();
        doc.replay(&commands).unwrap();

        let mut cells: Vec<_> = doc.cells().collect();
        cells.sort_by_key(|&(coord, _)| coord);
        assert_eq!(
            cells,
            vec![(CellCoord::new(1, 1), "5"), (CellCoord::new(2, 2), "1+1")]
        );
    }

    #[test]
    fn test_translate_all_does_not_mutate_grid() {
        let mut doc = Document::new();
        doc.apply(&Command::Entry("1+1".into())).unwrap();
        let _ = doc.translate_all();
        assert_eq!(doc.get(CellCoord::new(1, 1)), Some("1+1"));
    }

    #[test]
    fn test_goto_with_bad_row_fails() {
        let mut doc = Document::new();
        let result = doc.apply(&Command::Goto {
            col: "A".into(),
            row: "0".into(),
        });
        assert!(result.is_err());
    }
}
