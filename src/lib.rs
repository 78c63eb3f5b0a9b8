#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::{
    ast::ast::CompilationUnit,
    errors::errors::{Error, ErrorTip},
    parser::parser::parse_compilation_unit,
    type_checker::{context::CompilerContext, type_checker::resolve_types},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod symbols;
pub mod type_checker;

extern crate regex;

/// A point in a source file. `offset` is a byte offset, `line` and `column` start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32, file: Rc<String>) -> Self {
        Position {
            offset,
            line,
            column,
            file,
        }
    }

    pub fn null() -> Self {
        Position::new(0, 1, 1, Rc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Half-open source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn point(position: Position) -> Self {
        Span {
            start: position.clone(),
            end: position,
        }
    }

    /// Span running from the start of `first` to the end of `last`.
    pub fn between(first: &Span, last: &Span) -> Self {
        Span {
            start: first.start.clone(),
            end: last.end.clone(),
        }
    }

    pub fn null() -> Self {
        Span::point(Position::null())
    }
}

/// Runs the whole front-end over `source`: lexing, parsing and type resolution.
///
/// On failure every diagnostic collected by the failing stage is returned, in report order.
pub fn compile(
    source: &str,
    file: &str,
    context: &CompilerContext,
) -> Result<CompilationUnit, Vec<Error>> {
    let mut unit = parse_compilation_unit(source, file)?;
    resolve_types(&mut unit, context)?;
    Ok(unit)
}

/// Returns the 1-based line number, the line text and the 0-based column of `offset`.
pub fn get_line_at_position(content: &str, offset: u32) -> Option<(usize, String, usize)> {
    let pos = offset as usize;
    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // offsets at the very end (EOF) point past the last character
    if pos == content.len() {
        let line_start = content.rfind('\n').map_or(0, |i| i + 1);
        let line_number = content[..line_start].matches('\n').count() + 1;
        return Some((line_number, content[line_start..].to_string(), pos - line_start));
    }

    None
}

pub fn display_error(error: &Error, source: &str) {
    /*
        Error: UnresolvedReference (Unresolved reference: foo)
        -> main.jk
           |
        20 | val a = foo;
           | --------^
    */

    let position = error.get_position();

    match error.get_tip() {
        ErrorTip::None => println!("Error: {}", error.get_error_name()),
        tip => println!("Error: {} ({})", error.get_error_name(), tip),
    }
    println!("-> {}", position);

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.offset) else {
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use super::get_line_at_position;

    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nfoo\nbar\nTesting { }\n";

        let (line_number, line, line_pos) = get_line_at_position(content, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = get_line_at_position(content, 30).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let content = "val x = 1";
        let (line_number, _, line_pos) = get_line_at_position(content, 9).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line_pos, 9);

        assert!(get_line_at_position(content, 42).is_none());
    }
}
