//! Worksheet-dump command records and parser
//!
//! A dump is parsed as a character stream, not line by line: a `Goto`
//! terminated by `:` may be followed by an entry or menu command on the
//! same physical line (`>A1:"TITLE`), which real VisiCalc files rely on.

use crate::error::{Error, Result};

/// One command from a worksheet dump
///
/// Commands are pure data; applying one to the grid is the document
/// model's job, since the model owns mutation rights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor to a cell (`>A1:`)
    Goto {
        /// Column letters as written
        col: String,
        /// Row digits as written
        row: String,
    },
    /// Write raw text into the cell under the cursor
    Entry(String),
    /// A menu/control command this translator does not interpret (`/GF$`)
    Menu(String),
}

/// Parse the full text of a worksheet dump into an ordered command stream
///
/// Trailing NUL/whitespace/control characters are stripped first. Blank
/// lines are dropped. Any input that matches no command form fails the
/// whole parse: a silently skipped line would corrupt the cursor state for
/// every cell that follows.
pub fn parse_dump(text: &str) -> Result<Vec<Command>> {
    let trimmed = text.trim_end_matches(&['\0', '\r', '\n', '\t', ' '][..]);
    let bytes = trimmed.as_bytes();

    let mut commands = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'>' => {
                let (command, next) = parse_goto(trimmed, pos)?;
                commands.push(command);
                pos = next;
            }
            b'/' => {
                let (command, next) = parse_menu(trimmed, pos)?;
                commands.push(command);
                pos = next;
            }
            b'\n' => pos += 1,
            b'\r' => {
                pos += 1;
                if bytes.get(pos) == Some(&b'\n') {
                    pos += 1;
                }
            }
            c if is_entry_start(c) => {
                let (command, next) = parse_entry(trimmed, pos);
                commands.push(command);
                pos = next;
            }
            _ => return Err(Error::Dump { offset: pos }),
        }
    }

    Ok(commands)
}

/// `goto := '>' letters+ digits+ (':' | end-of-line)`
fn parse_goto(text: &str, start: usize) -> Result<(Command, usize)> {
    let bytes = text.as_bytes();
    let mut pos = start + 1;

    let col_start = pos;
    while matches!(bytes.get(pos), Some(c) if c.is_ascii_alphabetic()) {
        pos += 1;
    }
    if pos == col_start {
        return Err(Error::Dump { offset: pos });
    }
    let col = &text[col_start..pos];

    let row_start = pos;
    while matches!(bytes.get(pos), Some(c) if c.is_ascii_digit()) {
        pos += 1;
    }
    if pos == row_start {
        return Err(Error::Dump { offset: pos });
    }
    let row = &text[row_start..pos];

    // ':' hands the rest of the line to the next command; a newline or the
    // end of input also terminates.
    match bytes.get(pos) {
        Some(b':') => pos += 1,
        Some(b'\r') | Some(b'\n') | None => {}
        Some(_) => return Err(Error::Dump { offset: pos }),
    }

    Ok((
        Command::Goto {
            col: col.to_string(),
            row: row.to_string(),
        },
        pos,
    ))
}

/// `menu := '/' (letter | '-') (letter | digit | '$' | '*')*`
fn parse_menu(text: &str, start: usize) -> Result<(Command, usize)> {
    let bytes = text.as_bytes();
    let mut pos = start + 1;

    match bytes.get(pos) {
        Some(c) if c.is_ascii_alphabetic() || *c == b'-' => pos += 1,
        _ => return Err(Error::Dump { offset: pos }),
    }
    while matches!(bytes.get(pos), Some(c) if c.is_ascii_alphanumeric() || *c == b'$' || *c == b'*')
    {
        pos += 1;
    }

    Ok((Command::Menu(text[start + 1..pos].to_string()), pos))
}

/// `entry := entry_start <rest of line>`, captured verbatim
fn parse_entry(text: &str, start: usize) -> (Command, usize) {
    let bytes = text.as_bytes();
    let mut pos = start;

    while matches!(bytes.get(pos), Some(c) if *c != b'\r' && *c != b'\n') {
        pos += 1;
    }

    (Command::Entry(text[start..pos].to_string()), pos)
}

fn is_entry_start(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'"' | b'\'' | b'+' | b'-' | b'(' | b'#' | b'@')
}
