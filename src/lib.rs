//! # polyform
//!
//! Readers, writers and combinator codecs for JSON, TOML and YAML over a
//! shared element-tree model.
//!
//! ## What is polyform?
//!
//! Each format gets a hand-written recursive-descent reader, a
//! configuration-driven writer and a typed element tree ([`JsonElement`],
//! [`TomlElement`], [`YamlElement`]). On top of the trees sits a generic
//! [`codec`] layer: composable codecs that map typed Rust values to and from
//! elements through a pluggable [`codec::TypeProvider`], so the same codec
//! definition works against any element family that implements the provider.
//!
//! ## Key Features
//!
//! - **Three grammars, one scanner**: escape decoding and numeric-literal
//!   parsing live in a single [`scan::Scanner`] primitive that all three
//!   readers share
//! - **Typed trees**: TOML date-times stay `chrono` values, YAML anchors are
//!   first-class nodes, integers and floats never collapse into each other
//! - **Round-trip aware writers**: configurable strictness, indentation and
//!   one-line simplification of small containers
//! - **Combinator codecs**: record codecs of up to 16 fields, enums, lists,
//!   maps, alternatives, constraint chains and lazy recursion
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! polyform = "0.1"
//! ```
//!
//! ### Parsing and writing documents
//!
//! ```rust
//! use polyform::{json, toml, yaml};
//!
//! let doc = json::from_str(r#"{"name": "demo", "size": 3}"#).unwrap();
//! assert_eq!(json::to_string(&doc), "{\n  \"name\": \"demo\",\n  \"size\": 3\n}");
//!
//! let table = toml::from_str("title = \"demo\"\n\n[owner]\nid = 7").unwrap();
//! assert_eq!(
//!     table.get("owner").and_then(|v| v.as_table()).and_then(|t| t.get("id")).and_then(|v| v.as_i64()),
//!     Some(7)
//! );
//!
//! let doc = yaml::from_str("items:\n  - 1\n  - 2").unwrap();
//! assert_eq!(
//!     doc.as_mapping().unwrap().get("items").and_then(|v| v.as_sequence()).map(Vec::len),
//!     Some(2)
//! );
//! ```
//!
//! ### Mapping typed values with codecs
//!
//! ```rust
//! use polyform::codec::{field, group2, Codec, JsonProvider, LONG, STRING};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Server {
//!     host: String,
//!     port: i64,
//! }
//!
//! let codec = group2(
//!     field("host", STRING, |s: &Server| s.host.clone()),
//!     field("port", LONG.in_range(1, 65535), |s: &Server| s.port),
//!     |host, port| Some(Server { host, port }),
//! );
//!
//! let provider = JsonProvider;
//! let server = Server { host: "localhost".into(), port: 8080 };
//! let element = codec.encode(&provider, &server).unwrap();
//! assert_eq!(codec.decode(&provider, &element).unwrap(), server);
//! ```

pub mod codec;
mod config;
mod error;
pub mod json;
mod macros;
mod map;
pub mod scan;
pub mod toml;
pub mod yaml;

pub use config::{AnchorMode, DateTimeStyle, JsonConfig, TomlConfig, YamlConfig};
pub use error::{Result, SyntaxError};
pub use json::{JsonElement, JsonReader, JsonWriter};
pub use map::ElementMap;
pub use toml::{TomlArray, TomlElement, TomlReader, TomlTable, TomlWriter};
pub use yaml::{YamlElement, YamlReader, YamlWriter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_surface_round_trip() {
        let element = json::from_str(r#"{"a": [1, 2], "b": null}"#).unwrap();
        let text = json::to_string(&element);
        assert_eq!(json::from_str(&text).unwrap(), element);
    }

    #[test]
    fn test_error_type_is_shared_across_formats() {
        fn line_of(err: SyntaxError) -> Option<usize> {
            match err {
                SyntaxError::Unexpected { line, .. }
                | SyntaxError::UnexpectedEof { line, .. }
                | SyntaxError::DuplicateKey { line, .. } => Some(line),
                _ => None,
            }
        }

        assert!(line_of(json::from_str("[1,").unwrap_err()).is_some());
        assert!(line_of(toml::from_str("a = 1\na = 2").unwrap_err()).is_some());
        assert!(line_of(yaml::from_str("a: 1\na: 2").unwrap_err()).is_some());
    }
}
