//! YAML writing.
//!
//! Output is block style: mappings as `key: value` lines, sequences as
//! `- item` lines, nesting by the configured indent width. Collections at or
//! below the `simplify` threshold whose entries are all scalar render in
//! flow style on one line. Strings that would re-read as another type, or
//! that carry characters significant to the grammar, are double-quoted.
//!
//! Repeated [`YamlWriter::write_yaml`] calls emit `---` separated documents.

use super::read::sniff_scalar;
use super::YamlElement;
use crate::config::YamlConfig;
use crate::error::Result;
use std::io::Write;

/// A YAML serializer over any byte sink.
pub struct YamlWriter<W: Write> {
    out: W,
    config: YamlConfig,
    documents: usize,
}

impl<W: Write> YamlWriter<W> {
    /// Creates a writer with the default config.
    pub fn new(out: W) -> Self {
        Self::with_config(out, YamlConfig::new())
    }

    /// Creates a writer with an explicit config.
    pub fn with_config(out: W, config: YamlConfig) -> Self {
        YamlWriter {
            out,
            config,
            documents: 0,
        }
    }

    /// Releases the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Serializes one document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SyntaxError::Io`] if the underlying write fails.
    pub fn write_yaml(&mut self, element: &YamlElement) -> Result<()> {
        if self.documents > 0 {
            self.out.write_all(b"---\n")?;
        }
        self.documents += 1;

        match element {
            YamlElement::Mapping(map) if !map.is_empty() => self.write_block_mapping(map, 0),
            YamlElement::Sequence(seq) if !seq.is_empty() => self.write_block_sequence(seq, 0),
            other => {
                let text = self.scalar_text(other);
                writeln!(self.out, "{text}")?;
                Ok(())
            }
        }
    }

    fn write_block_mapping(
        &mut self,
        map: &crate::ElementMap<YamlElement>,
        depth: usize,
    ) -> Result<()> {
        for (key, value) in map.iter() {
            self.write_indent(depth)?;
            let key_text = self.string_text(key);
            if self.fits_inline(value) {
                let text = self.scalar_text(value);
                writeln!(self.out, "{key_text}: {text}")?;
            } else {
                match value {
                    YamlElement::Anchor(name, inner) => {
                        writeln!(self.out, "{key_text}: &{name}")?;
                        self.write_block_value(inner, depth + 1)?;
                    }
                    _ => {
                        writeln!(self.out, "{key_text}:")?;
                        self.write_block_value(value, depth + 1)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn write_block_sequence(&mut self, seq: &[YamlElement], depth: usize) -> Result<()> {
        for item in seq {
            self.write_indent(depth)?;
            if self.fits_inline(item) {
                let text = self.scalar_text(item);
                writeln!(self.out, "- {text}")?;
            } else {
                match item {
                    YamlElement::Anchor(name, inner) => {
                        writeln!(self.out, "- &{name}")?;
                        self.write_block_value(inner, depth + 1)?;
                    }
                    _ => {
                        self.out.write_all(b"-\n")?;
                        self.write_block_value(item, depth + 1)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn write_block_value(&mut self, value: &YamlElement, depth: usize) -> Result<()> {
        match value {
            YamlElement::Mapping(map) => self.write_block_mapping(map, depth),
            YamlElement::Sequence(seq) => self.write_block_sequence(seq, depth),
            other => {
                self.write_indent(depth)?;
                let text = self.scalar_text(other);
                writeln!(self.out, "{text}")?;
                Ok(())
            }
        }
    }

    /// Whether a node renders on the same line as its key or dash: scalars
    /// always, collections when empty or within the flow threshold with all
    /// scalar entries.
    fn fits_inline(&self, element: &YamlElement) -> bool {
        match element {
            YamlElement::Sequence(seq) => {
                seq.is_empty()
                    || (seq.len() <= self.config.simplify && seq.iter().all(is_plain))
            }
            YamlElement::Mapping(map) => {
                map.is_empty()
                    || (map.len() <= self.config.simplify && map.values().all(is_plain))
            }
            YamlElement::Anchor(_, inner) => is_plain(inner),
            _ => true,
        }
    }

    fn scalar_text(&self, element: &YamlElement) -> String {
        match element {
            YamlElement::Null => "null".to_string(),
            YamlElement::Bool(true) => "true".to_string(),
            YamlElement::Bool(false) => "false".to_string(),
            YamlElement::Integer(i) => i.to_string(),
            YamlElement::Float(f) => float_text(*f),
            YamlElement::String(s) => self.string_text(s),
            YamlElement::Alias(name) => format!("*{name}"),
            YamlElement::Anchor(name, inner) => {
                format!("&{name} {}", self.scalar_text(inner))
            }
            YamlElement::Sequence(seq) => {
                let items: Vec<String> = seq.iter().map(|v| self.scalar_text(v)).collect();
                format!("[{}]", items.join(", "))
            }
            YamlElement::Mapping(map) => {
                let pairs: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", self.string_text(k), self.scalar_text(v)))
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
        }
    }

    fn string_text(&self, s: &str) -> String {
        if plain_safe(s) {
            return s.to_string();
        }
        let mut quoted = String::with_capacity(s.len() + 2);
        quoted.push('"');
        for ch in s.chars() {
            match ch {
                '"' => quoted.push_str("\\\""),
                '\\' => quoted.push_str("\\\\"),
                '\n' => quoted.push_str("\\n"),
                '\r' => quoted.push_str("\\r"),
                '\t' => quoted.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    quoted.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => quoted.push(c),
            }
        }
        quoted.push('"');
        quoted
    }

    fn write_indent(&mut self, depth: usize) -> Result<()> {
        for _ in 0..depth * self.config.indent {
            self.out.write_all(b" ")?;
        }
        Ok(())
    }
}

fn is_plain(element: &YamlElement) -> bool {
    !matches!(
        element,
        YamlElement::Sequence(_) | YamlElement::Mapping(_) | YamlElement::Anchor(..)
    )
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f == f64::INFINITY {
        ".inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-.inf".to_string()
    } else {
        format!("{f:?}")
    }
}

/// A string may stay unquoted only if rereading it as a plain scalar yields
/// the same string and none of its characters can be mistaken for structure.
fn plain_safe(s: &str) -> bool {
    if s.is_empty() || s.starts_with(' ') || s.ends_with(' ') {
        return false;
    }
    if !matches!(sniff_scalar(s), YamlElement::String(_)) {
        return false;
    }
    let first = s.chars().next().expect("non-empty");
    if matches!(
        first,
        '-' | '?' | '!' | '|' | '>' | '%' | '@' | '`' | '&' | '*' | '\'' | '"' | '['
            | ']' | '{' | '}' | ','
    ) {
        return false;
    }
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' | '\t' | '#' | '[' | ']' | '{' | '}' | ',' => return false,
            ':' if matches!(chars.peek(), None | Some(' ')) => return false,
            _ => {}
        }
    }
    true
}
