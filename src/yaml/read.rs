//! YAML reading.
//!
//! The input is split into lines up front; block structure is recovered from
//! each line's indentation (an indent increase opens a nested scope, an
//! equal-or-lesser indent closes it). Flow collections and quoted scalars
//! within a line are handled by the shared [`Scanner`], with flow text joined
//! across lines until its brackets balance.
//!
//! Anchors are collected into a name table as they parse. In
//! [`AnchorMode::Resolve`] an alias substitutes the anchored value at read
//! time; in [`AnchorMode::Preserve`] anchors and aliases stay as wrapper
//! elements. Either way an alias to an unknown name is a syntax error.

use super::YamlElement;
use crate::config::{AnchorMode, YamlConfig};
use crate::error::{Result, SyntaxError};
use crate::map::ElementMap;
use crate::scan::{EscapeStyle, Number, NumberStyle, Scanner};
use std::collections::HashMap;

const NUMBER_STYLE: NumberStyle = NumberStyle {
    underscores: false,
    radix_prefixes: true,
    leading_plus: true,
    overflow_to_float: true,
};

/// Block-scalar trailing-newline handling.
#[derive(Clone, Copy, PartialEq)]
enum Chomp {
    Strip,
    Clip,
    Keep,
}

/// One physical line: 1-based number, indent width, comment-stripped
/// content, and the raw text for block-scalar bodies.
struct Line<'a> {
    number: usize,
    indent: usize,
    content: &'a str,
    raw: &'a str,
    tab_indent: bool,
}

/// A single-use YAML parser over a borrowed input string.
pub struct YamlReader<'a> {
    config: YamlConfig,
    lines: Vec<Line<'a>>,
    pos: usize,
    anchors: HashMap<String, YamlElement>,
}

impl<'a> YamlReader<'a> {
    /// Creates a reader with the default config.
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, YamlConfig::new())
    }

    /// Creates a reader with an explicit config.
    pub fn with_config(input: &'a str, config: YamlConfig) -> Self {
        YamlReader {
            config,
            lines: split_lines(input),
            pos: 0,
            anchors: HashMap::new(),
        }
    }

    /// Parses one document, consuming the reader.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] on the first structural violation.
    pub fn read_yaml(mut self) -> Result<YamlElement> {
        self.skip_blank_lines();
        if self.line_content() == Some("---") {
            self.pos += 1;
        }

        self.skip_blank_lines();
        let root = if self.line_content().is_some() {
            self.parse_node(0)?
        } else {
            YamlElement::Null
        };

        self.skip_blank_lines();
        if self.line_content() == Some("...") {
            self.pos += 1;
        }
        if self.config.strict {
            self.skip_blank_lines();
            if let Some(line) = self.lines.get(self.pos) {
                return Err(SyntaxError::TrailingContent {
                    line: line.number,
                    column: line.indent + 1,
                });
            }
        }
        Ok(root)
    }

    fn skip_blank_lines(&mut self) {
        while self
            .lines
            .get(self.pos)
            .is_some_and(|l| l.content.is_empty())
        {
            self.pos += 1;
        }
    }

    fn line_content(&self) -> Option<&'a str> {
        self.lines.get(self.pos).map(|l| l.content)
    }

    /// Checks the current line is usable as block structure.
    fn check_structural(&self) -> Result<()> {
        if let Some(line) = self.lines.get(self.pos) {
            if line.tab_indent {
                return Err(SyntaxError::indentation(
                    line.number,
                    1,
                    "tab character in indentation",
                ));
            }
        }
        Ok(())
    }

    /// Parses the node starting at the current line, which must be indented
    /// at least `min_indent`; a shallower line means the node is absent.
    fn parse_node(&mut self, min_indent: usize) -> Result<YamlElement> {
        self.skip_blank_lines();
        let Some(line) = self.lines.get(self.pos) else {
            return Ok(YamlElement::Null);
        };
        if line.content == "---" || line.content == "..." || line.indent < min_indent {
            return Ok(YamlElement::Null);
        }
        self.check_structural()?;

        let indent = line.indent;
        if is_sequence_item(line.content) {
            self.parse_block_sequence(indent)
        } else if split_key(line.content).is_some() {
            self.parse_block_mapping(indent)
        } else {
            let (content, number) = (line.content, line.number);
            self.pos += 1;
            self.parse_value_text(content, number, indent)
        }
    }

    fn parse_block_sequence(&mut self, indent: usize) -> Result<YamlElement> {
        let mut sequence = Vec::new();

        loop {
            self.skip_blank_lines();
            let Some(line) = self.lines.get(self.pos) else {
                break;
            };
            if line.content == "---" || line.content == "..." || line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(SyntaxError::indentation(
                    line.number,
                    line.indent + 1,
                    "line indented deeper than its sequence",
                ));
            }
            if !is_sequence_item(line.content) {
                break;
            }
            self.check_structural()?;

            let content = line.content;
            if content == "-" {
                self.pos += 1;
                sequence.push(self.parse_node(indent + 1)?);
            } else {
                // Rewrite the line as the item body, indented past the dash,
                // and let the node parser see it in place
                let rest = content[1..].trim_start();
                let offset = content.len() - rest.len();
                let line = &mut self.lines[self.pos];
                line.indent = indent + offset;
                line.content = rest;
                sequence.push(self.parse_node(indent + 1)?);
            }
        }

        Ok(YamlElement::Sequence(sequence))
    }

    fn parse_block_mapping(&mut self, indent: usize) -> Result<YamlElement> {
        let mut mapping = ElementMap::new();

        loop {
            self.skip_blank_lines();
            let Some(line) = self.lines.get(self.pos) else {
                break;
            };
            if line.content == "---" || line.content == "..." || line.indent < indent {
                break;
            }
            if line.indent > indent {
                return Err(SyntaxError::indentation(
                    line.number,
                    line.indent + 1,
                    "line indented deeper than its mapping",
                ));
            }
            self.check_structural()?;

            let (content, number) = (line.content, line.number);
            let Some((key_text, rest)) = split_key(content) else {
                return Err(SyntaxError::unexpected(
                    number,
                    indent + 1,
                    "expected 'key:' in block mapping",
                ));
            };
            let key = self.parse_key(key_text, number)?;
            self.pos += 1;

            let value = if rest.is_empty() {
                // A sequence may sit at the same indent as its key
                self.skip_blank_lines();
                match self.lines.get(self.pos) {
                    Some(next) if next.indent == indent && is_sequence_item(next.content) => {
                        self.parse_block_sequence(indent)?
                    }
                    _ => self.parse_node(indent + 1)?,
                }
            } else {
                self.parse_value_text(rest, number, indent)?
            };

            if mapping.insert(key.clone(), value).is_some() && !self.config.allow_duplicate_keys {
                return Err(SyntaxError::duplicate_key(number, indent + 1, key));
            }
        }

        Ok(YamlElement::Mapping(mapping))
    }

    fn parse_key(&self, text: &str, number: usize) -> Result<String> {
        match text.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let mut scanner = Scanner::new(text);
                let key = scanner.read_quoted(q, EscapeStyle::Yaml)?;
                scanner.skip_spaces();
                if !scanner.at_end() {
                    return Err(SyntaxError::unexpected(
                        number,
                        scanner.column(),
                        "content after quoted key",
                    ));
                }
                Ok(key)
            }
            _ => Ok(text.to_string()),
        }
    }

    /// Parses the value text that follows a `key:` or `-` on the same line:
    /// an anchor/alias, a quoted scalar, a block-scalar header, a flow
    /// collection, or a plain scalar.
    fn parse_value_text(
        &mut self,
        text: &str,
        number: usize,
        parent_indent: usize,
    ) -> Result<YamlElement> {
        let text = text.trim();
        match text.chars().next() {
            None => Ok(YamlElement::Null),
            Some('&') => {
                let name = anchor_name(&text[1..]);
                if name.is_empty() {
                    return Err(SyntaxError::unexpected(number, 1, "empty anchor name"));
                }
                let rest = text[1 + name.len()..].trim_start();
                let value = if rest.is_empty() {
                    self.parse_node(parent_indent + 1)?
                } else {
                    self.parse_value_text(rest, number, parent_indent)?
                };
                Ok(self.finish_anchor(name.to_string(), value))
            }
            Some('*') => {
                let name = anchor_name(&text[1..]);
                self.resolve_alias(name, number, parent_indent + 1)
            }
            Some(q @ ('"' | '\'')) => {
                let mut scanner = Scanner::new(text);
                let value = scanner.read_quoted(q, EscapeStyle::Yaml)?;
                scanner.skip_spaces();
                if !scanner.at_end() {
                    return Err(SyntaxError::unexpected(
                        number,
                        scanner.column(),
                        "content after quoted scalar",
                    ));
                }
                Ok(YamlElement::String(value))
            }
            Some(c @ ('|' | '>')) => {
                let chomp = match text.get(1..2) {
                    Some("-") => Chomp::Strip,
                    Some("+") => Chomp::Keep,
                    _ => Chomp::Clip,
                };
                let header_len = if chomp == Chomp::Clip { 1 } else { 2 };
                if !text[header_len..].trim().is_empty() {
                    return Err(SyntaxError::unexpected(
                        number,
                        1,
                        "content after block scalar indicator",
                    ));
                }
                self.parse_block_scalar(c == '>', chomp, parent_indent)
            }
            Some('[' | '{') => self.parse_flow_text(text, number),
            _ => Ok(sniff_scalar(text)),
        }
    }

    fn finish_anchor(&mut self, name: String, value: YamlElement) -> YamlElement {
        match self.config.anchors {
            AnchorMode::Resolve => {
                self.anchors.insert(name, value.clone());
                value
            }
            AnchorMode::Preserve => {
                self.anchors.insert(name.clone(), value.clone());
                YamlElement::Anchor(name, Box::new(value))
            }
        }
    }

    fn resolve_alias(&self, name: &str, line: usize, column: usize) -> Result<YamlElement> {
        let Some(value) = self.anchors.get(name) else {
            return Err(SyntaxError::unknown_anchor(line, column, name));
        };
        Ok(match self.config.anchors {
            AnchorMode::Resolve => value.clone(),
            AnchorMode::Preserve => YamlElement::Alias(name.to_string()),
        })
    }

    /// Reads the more-indented lines following a `|` or `>` header.
    fn parse_block_scalar(
        &mut self,
        folded: bool,
        chomp: Chomp,
        parent_indent: usize,
    ) -> Result<YamlElement> {
        let mut collected: Vec<&str> = Vec::new();
        let mut block_indent: Option<usize> = None;

        while let Some(line) = self.lines.get(self.pos) {
            if line.raw.trim().is_empty() {
                collected.push("");
                self.pos += 1;
                continue;
            }
            if line.indent <= parent_indent {
                break;
            }
            let width = *block_indent.get_or_insert(line.indent);
            if line.indent < width {
                break;
            }
            collected.push(line.raw[width..].trim_end_matches('\r'));
            self.pos += 1;
        }
        while collected.last() == Some(&"") && chomp != Chomp::Keep {
            collected.pop();
        }

        let body = if folded {
            let mut joined = String::new();
            let mut previous_text = false;
            for piece in &collected {
                if piece.is_empty() {
                    joined.push('\n');
                    previous_text = false;
                } else {
                    if previous_text {
                        joined.push(' ');
                    }
                    joined.push_str(piece);
                    previous_text = true;
                }
            }
            joined
        } else {
            collected.join("\n")
        };

        let text = match chomp {
            Chomp::Strip => body.trim_end_matches('\n').to_string(),
            Chomp::Clip => {
                let trimmed = body.trim_end_matches('\n');
                if trimmed.is_empty() {
                    String::new()
                } else {
                    format!("{trimmed}\n")
                }
            }
            Chomp::Keep => format!("{body}\n"),
        };
        Ok(YamlElement::String(text))
    }

    /// Joins lines until the flow brackets balance, then parses the result.
    fn parse_flow_text(&mut self, start: &str, number: usize) -> Result<YamlElement> {
        let mut text = start.to_string();
        while flow_depth(&text) > 0 {
            let Some(line) = self.lines.get(self.pos) else {
                return Err(SyntaxError::unexpected_eof(
                    number,
                    1,
                    "closing bracket of flow collection",
                ));
            };
            text.push(' ');
            text.push_str(line.content);
            self.pos += 1;
        }

        let mut scanner = Scanner::new(&text);
        let element = self.parse_flow(&mut scanner, number)?;
        scanner.skip_whitespace();
        if !scanner.at_end() {
            return Err(SyntaxError::unexpected(
                number,
                scanner.column(),
                "content after flow collection",
            ));
        }
        Ok(element)
    }

    fn parse_flow(&mut self, scanner: &mut Scanner, number: usize) -> Result<YamlElement> {
        scanner.skip_whitespace();
        match scanner.peek() {
            Some('[') => {
                scanner.next();
                let mut sequence = Vec::new();
                loop {
                    scanner.skip_whitespace();
                    if scanner.eat(']') {
                        break;
                    }
                    sequence.push(self.parse_flow(scanner, number)?);
                    scanner.skip_whitespace();
                    if !scanner.eat(',') {
                        scanner.expect(']')?;
                        break;
                    }
                }
                Ok(YamlElement::Sequence(sequence))
            }
            Some('{') => {
                scanner.next();
                let mut mapping = ElementMap::new();
                loop {
                    scanner.skip_whitespace();
                    if scanner.eat('}') {
                        break;
                    }
                    let key = self.parse_flow_key(scanner, number)?;
                    scanner.skip_whitespace();
                    scanner.expect(':')?;
                    scanner.skip_whitespace();
                    let value = match scanner.peek() {
                        Some(',') | Some('}') => YamlElement::Null,
                        _ => self.parse_flow(scanner, number)?,
                    };
                    if mapping.insert(key.clone(), value).is_some()
                        && !self.config.allow_duplicate_keys
                    {
                        return Err(SyntaxError::duplicate_key(number, scanner.column(), key));
                    }
                    scanner.skip_whitespace();
                    if !scanner.eat(',') {
                        scanner.expect('}')?;
                        break;
                    }
                }
                Ok(YamlElement::Mapping(mapping))
            }
            Some(q @ ('"' | '\'')) => Ok(YamlElement::String(
                scanner.read_quoted(q, EscapeStyle::Yaml)?,
            )),
            Some('&') => {
                scanner.next();
                let name = scanner
                    .take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                    .to_string();
                scanner.skip_whitespace();
                let value = self.parse_flow(scanner, number)?;
                Ok(self.finish_anchor(name, value))
            }
            Some('*') => {
                scanner.next();
                let column = scanner.column();
                let name = scanner
                    .take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                    .to_string();
                self.resolve_alias(&name, number, column)
            }
            Some(_) => {
                let plain = scanner.take_while(|c| !matches!(c, ',' | ']' | '}'));
                Ok(sniff_scalar(plain.trim()))
            }
            None => Err(scanner.eof("a flow value")),
        }
    }

    fn parse_flow_key(&mut self, scanner: &mut Scanner, number: usize) -> Result<String> {
        match scanner.peek() {
            Some(q @ ('"' | '\'')) => scanner.read_quoted(q, EscapeStyle::Yaml),
            Some(_) => {
                let plain = scanner.take_while(|c| !matches!(c, ':' | ',' | '}'));
                Ok(plain.trim().to_string())
            }
            None => Err(SyntaxError::unexpected_eof(number, 1, "a flow mapping key")),
        }
    }
}

fn is_sequence_item(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

fn anchor_name(text: &str) -> &str {
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(text.len());
    &text[..end]
}

/// Splits a block mapping line at the first top-level `: ` (or trailing `:`),
/// skipping colons inside quotes or flow brackets.
fn split_key(content: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;

    for (i, c) in content.char_indices() {
        if in_double {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_double = false;
            }
        } else if in_single {
            if c == '\'' {
                in_single = false;
            }
        } else {
            match c {
                '"' => in_double = true,
                '\'' => in_single = true,
                '[' | '{' => depth += 1,
                ']' | '}' => depth = depth.saturating_sub(1),
                ':' if depth == 0 => {
                    let next = content[i + 1..].chars().next();
                    if next.is_none() || next == Some(' ') {
                        return Some((content[..i].trim(), content[i + 1..].trim()));
                    }
                }
                _ => {}
            }
        }
    }
    None
}

/// Net bracket depth of a flow fragment, ignoring brackets inside quotes.
fn flow_depth(text: &str) -> i64 {
    let mut depth = 0i64;
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_double {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_double = false;
            }
        } else if in_single {
            if c == '\'' {
                in_single = false;
            }
        } else {
            match c {
                '"' => in_double = true,
                '\'' => in_single = true,
                '[' | '{' => depth += 1,
                ']' | '}' => depth -= 1,
                _ => {}
            }
        }
    }
    depth
}

/// Types a plain scalar: null/bool spellings, `.inf`/`.nan`, numbers
/// (including radix prefixes), and otherwise a string.
pub(crate) fn sniff_scalar(text: &str) -> YamlElement {
    match text {
        "" | "~" | "null" | "Null" | "NULL" => return YamlElement::Null,
        "true" | "True" | "TRUE" => return YamlElement::Bool(true),
        "false" | "False" | "FALSE" => return YamlElement::Bool(false),
        ".inf" | "+.inf" => return YamlElement::Float(f64::INFINITY),
        "-.inf" => return YamlElement::Float(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => return YamlElement::Float(f64::NAN),
        _ => {}
    }

    let first = text.chars().next().expect("non-empty after match");
    if first.is_ascii_digit() || first == '-' || first == '+' {
        let mut scanner = Scanner::new(text);
        if let Ok(number) = scanner.read_number(NUMBER_STYLE) {
            if scanner.at_end() {
                return match number {
                    Number::Integer(i) => YamlElement::Integer(i),
                    Number::Float(f) => YamlElement::Float(f),
                };
            }
        }
    }
    YamlElement::String(text.to_string())
}

fn split_lines(input: &str) -> Vec<Line> {
    input
        .lines()
        .enumerate()
        .map(|(i, raw)| {
            let mut indent = 0;
            let mut tab_indent = false;
            for c in raw.chars() {
                match c {
                    ' ' => indent += 1,
                    '\t' => {
                        tab_indent = true;
                        indent += 1;
                    }
                    _ => break,
                }
            }
            let content = strip_comment(&raw[indent..]).trim_end();
            Line {
                number: i + 1,
                indent,
                content,
                raw,
                tab_indent,
            }
        })
        .collect()
}

/// Cuts a `#` comment, but only outside quotes and only when the `#` starts
/// the line or follows whitespace.
fn strip_comment(text: &str) -> &str {
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;
    let mut after_space = true;

    for (i, c) in text.char_indices() {
        if in_double {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_double = false;
            }
        } else if in_single {
            if c == '\'' {
                in_single = false;
            }
        } else {
            match c {
                '"' => in_double = true,
                '\'' => in_single = true,
                '#' if after_space => return &text[..i],
                _ => {}
            }
        }
        after_space = c == ' ' || c == '\t';
    }
    text
}
