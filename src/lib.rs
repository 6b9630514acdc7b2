#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod evaluator;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod optimizer;
pub mod parser;
pub mod pipeline;
pub mod symbols;

extern crate regex;

/// A 1-based line/column location inside a source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: &Rc<String>) -> Self {
        Position {
            line,
            column,
            file: Rc::clone(file),
        }
    }

    pub fn null() -> Self {
        Position {
            line: 0,
            column: 0,
            file: Rc::new(String::from("<null>")),
        }
    }

    pub fn is_null(&self) -> bool {
        self.line == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn line(&self) -> u32 {
        self.start.line
    }

    pub fn begin_column(&self) -> u32 {
        self.start.column
    }

    pub fn end_column(&self) -> u32 {
        self.end.column
    }
}

/// Returns the text of the given 1-based line, without its line terminator.
pub fn get_line_at_position(content: &str, line: u32) -> Option<String> {
    if line == 0 {
        return None;
    }

    content
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.trim_end_matches('\r').to_string())
}


pub fn display_error(error: &Error, source: &str) {
    /*
        Error: message
        -> test0.d
           |
        20 | var a := #;
           | ---------^
    */

    let position = error.get_position();

    if let ErrorTip::None = error.get_tip() {
        eprintln!("{}: {}", error.category(), error.get_error_name());
    } else {
        eprintln!("{}: {} ({})", error.category(), error.get_error_name(), error.get_tip());
    }

    let Some(line_text) = get_line_at_position(source, position.line) else {
        return;
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    eprintln!("-> {}", position.file);
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
