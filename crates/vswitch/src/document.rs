// Copyright (c) Contributors to the vswitch project.
// SPDX-License-Identifier: Apache-2.0

//! Section-oriented key/value text format used for the registry file.
//!
//! ```ini
//! [general]
//! path = /home/me/bin
//!
//! [envs]
//! tools = /home/me/tools/venv
//!
//! [exposed]
//! tools.black = /home/me/bin/black
//! ```
//!
//! Keys are compared case-sensitively. `:` is accepted as a separator when
//! reading, but `=` is always written.

use indexmap::IndexMap;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{take_till1, take_while};
use nom::character::complete::{char, one_of, space0};
use nom::combinator::{all_consuming, map, rest, value};
use nom::sequence::{delimited, preceded, separated_pair};

#[cfg(test)]
#[path = "./document_test.rs"]
mod document_test;

/// Entries of a single section, in file order.
pub type Section = IndexMap<String, String>;

/// A parsed document: named sections, each holding ordered entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: IndexMap<String, Section>,
}

/// A syntax problem found while parsing, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Header(&'a str),
    Entry(&'a str, &'a str),
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from text.
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        let mut doc = Self::new();
        let mut current: Option<String> = None;

        for (idx, raw) in input.lines().enumerate() {
            let lineno = idx + 1;
            let line = match parse_line(raw) {
                Ok((_, line)) => line,
                Err(_) => {
                    return Err(SyntaxError {
                        line: lineno,
                        message: format!("malformed line {:?}", raw.trim()),
                    });
                }
            };
            match line {
                Line::Blank => {}
                Line::Header(name) => {
                    let name = name.trim();
                    if doc.sections.contains_key(name) {
                        return Err(SyntaxError {
                            line: lineno,
                            message: format!("duplicate section [{name}]"),
                        });
                    }
                    doc.sections.insert(name.to_string(), Section::new());
                    current = Some(name.to_string());
                }
                Line::Entry(key, val) => {
                    let Some(section) = current.as_ref().and_then(|s| doc.sections.get_mut(s))
                    else {
                        return Err(SyntaxError {
                            line: lineno,
                            message: format!("entry {key:?} outside of any section"),
                        });
                    };
                    if section.contains_key(key) {
                        return Err(SyntaxError {
                            line: lineno,
                            message: format!("duplicate key {key:?}"),
                        });
                    }
                    section.insert(key.to_string(), val.to_string());
                }
            }
        }

        Ok(doc)
    }

    /// Render every section, including empty ones, in insertion order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, entries) in &self.sections {
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");
            for (key, val) in entries {
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(val);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Remove and return a section, leaving an empty map if it was absent.
    pub fn take_section(&mut self, name: &str) -> Section {
        self.sections.shift_remove(name).unwrap_or_default()
    }

    /// Get a section for modification, creating it at the end if missing.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

fn is_comment_start(c: char) -> bool {
    c == '#' || c == ';'
}

fn blank(input: &str) -> IResult<&str, Line<'_>> {
    value(
        Line::Blank,
        all_consuming(preceded(
            space0,
            alt((
                preceded(one_of("#;"), rest),
                take_while(|c: char| c.is_whitespace()),
            )),
        )),
    )(input)
}

fn header(input: &str) -> IResult<&str, Line<'_>> {
    map(
        all_consuming(delimited(
            space0,
            delimited(char('['), take_till1(|c: char| c == ']'), char(']')),
            space0,
        )),
        Line::Header,
    )(input)
}

fn entry(input: &str) -> IResult<&str, Line<'_>> {
    let key = preceded(
        space0,
        take_till1(|c: char| c == '=' || c == ':' || c == '[' || is_comment_start(c)),
    );
    map(
        all_consuming(separated_pair(key, one_of("=:"), rest)),
        |(key, val): (&str, &str)| Line::Entry(key.trim(), val.trim()),
    )(input)
}

fn parse_line(input: &str) -> IResult<&str, Line<'_>> {
    alt((blank, header, entry))(input)
}
