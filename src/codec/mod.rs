//! Combinator codecs mapping typed values to and from element trees.
//!
//! A [`Codec`] converts between a Rust value and the element family of some
//! [`TypeProvider`]; [`JsonProvider`] is the shipped provider. Codecs are
//! immutable after construction and safe to share across threads, since
//! every operation takes the element being built or read as an explicit
//! parameter.
//!
//! Failures travel through [`CodecError`], a message-only error channel
//! separate from the parse-time [`crate::SyntaxError`]. Programmer errors
//! (binding a [`LazyCodec`] twice, using it before binding) panic instead.
//!
//! ## Examples
//!
//! ```rust
//! use polyform::codec::{field, group2, JsonProvider, Codec, LONG, STRING};
//! use polyform::{json, JsonConfig};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct User {
//!     name: String,
//!     id: i64,
//! }
//!
//! let codec = group2(
//!     field("name", STRING, |u: &User| u.name.clone()),
//!     field("id", LONG, |u: &User| u.id),
//!     |name, id| Some(User { name, id }),
//! );
//!
//! let provider = JsonProvider;
//! let user = User { name: "ada".into(), id: 1 };
//! let element = codec.encode(&provider, &user).unwrap();
//! assert_eq!(
//!     json::to_string_with(&element, &JsonConfig::compact()),
//!     r#"{"name":"ada","id":1}"#
//! );
//! assert_eq!(codec.decode(&provider, &element).unwrap(), user);
//! ```

mod builder;
mod combinators;
mod constraints;
mod field;
mod primitives;
mod provider;

pub use builder::{
    group1, group2, group3, group4, group5, group6, group7, group8, group9, group10, group11,
    group12, group13, group14, group15, group16,
};
pub use combinators::{
    bounded_list, either, flat_xmap, list, map, non_empty_list, optional, pair, validate,
    with_alternative, xmap, EitherCodec, ListCodec, MapCodec, OptionalCodec, PairCodec,
};
pub use constraints::{
    bounded_string, formatted_string, non_empty_string, Constrained,
};
pub use field::{field, field_with_aliases, optional_field, Field, FieldCodec, NamedCodec};
pub use primitives::{
    enum_by_name, enum_by_ordinal, enum_dynamic, enum_with_names, unit, BoolCodec, DateTimeCodec,
    EnumCodec, F32Codec, F64Codec, I8Codec, I16Codec, I32Codec, I64Codec, StringCodec, U8Codec,
    U16Codec, U32Codec, UnitCodec, BOOL, BYTE, DATE_TIME, DOUBLE, FLOAT, INT, LONG, SHORT,
    STRING, UNSIGNED_BYTE, UNSIGNED_INT, UNSIGNED_SHORT,
};
pub use provider::{JsonProvider, TypeProvider};

use once_cell::sync::OnceCell;
use std::sync::Arc;

/// A decode or encode failure, carrying only a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CodecError {
    message: String,
}

impl CodecError {
    pub fn new(message: impl Into<String>) -> Self {
        CodecError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// A bidirectional mapping between a typed value and the element family of a
/// provider `P`.
///
/// Object safe, so `Box<dyn Codec<P, Value = T>>` works; [`LazyCodec`] relies
/// on that for recursive structures.
pub trait Codec<P: TypeProvider> {
    type Value;

    /// Converts a value into an element.
    fn encode(&self, provider: &P, value: &Self::Value) -> CodecResult<P::Element>;

    /// Converts an element back into a value.
    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<Self::Value>;
}

/// A codec whose values can also serve as map keys, via a string form.
pub trait KeyableCodec<P: TypeProvider>: Codec<P> {
    fn encode_key(&self, value: &Self::Value) -> CodecResult<String>;
    fn decode_key(&self, key: &str) -> CodecResult<Self::Value>;
}

/// The result of [`either`]: a value decoded by the left or right codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Either<A, B> {
    Left(A),
    Right(B),
}

/// A late-bound codec for recursive structures.
///
/// Create it first, reference clones of it inside the definition, then
/// [`LazyCodec::bind`] the finished codec exactly once. Binding twice or
/// using an unbound instance is a programmer error and panics.
///
/// ## Examples
///
/// ```rust
/// use polyform::codec::{
///     field, group2, list, Codec, JsonProvider, LazyCodec, STRING,
/// };
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Node {
///     name: String,
///     children: Vec<Node>,
/// }
///
/// let lazy: LazyCodec<JsonProvider, Node> = LazyCodec::new();
/// let codec = group2(
///     field("name", STRING, |n: &Node| n.name.clone()),
///     field("children", list(lazy.clone()), |n: &Node| n.children.clone()),
///     |name, children| Some(Node { name, children }),
/// );
/// lazy.bind(codec);
///
/// let provider = JsonProvider;
/// let tree = Node {
///     name: "root".into(),
///     children: vec![Node { name: "leaf".into(), children: vec![] }],
/// };
/// let element = lazy.encode(&provider, &tree).unwrap();
/// assert_eq!(lazy.decode(&provider, &element).unwrap(), tree);
/// ```
pub struct LazyCodec<P: TypeProvider, T> {
    inner: Arc<OnceCell<Box<dyn Codec<P, Value = T> + Send + Sync>>>,
}

impl<P: TypeProvider, T> LazyCodec<P, T> {
    #[must_use]
    pub fn new() -> Self {
        LazyCodec {
            inner: Arc::new(OnceCell::new()),
        }
    }

    /// Supplies the definition. Panics if already bound.
    pub fn bind(&self, codec: impl Codec<P, Value = T> + Send + Sync + 'static) {
        let bound = self.inner.set(Box::new(codec)).is_ok();
        assert!(bound, "lazy codec bound twice");
    }

    fn get(&self) -> &(dyn Codec<P, Value = T> + Send + Sync) {
        self.inner
            .get()
            .expect("lazy codec used before binding")
            .as_ref()
    }
}

impl<P: TypeProvider, T> Default for LazyCodec<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TypeProvider, T> Clone for LazyCodec<P, T> {
    fn clone(&self) -> Self {
        LazyCodec {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: TypeProvider, T> Codec<P> for LazyCodec<P, T> {
    type Value = T;

    fn encode(&self, provider: &P, value: &T) -> CodecResult<P::Element> {
        self.get().encode(provider, value)
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<T> {
        self.get().decode(provider, element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_message() {
        let err = CodecError::new("expected a boolean, found null");
        assert_eq!(err.message(), "expected a boolean, found null");
        assert_eq!(err.to_string(), "expected a boolean, found null");
    }

    #[test]
    #[should_panic(expected = "lazy codec used before binding")]
    fn test_unbound_lazy_codec_panics() {
        let lazy: LazyCodec<JsonProvider, i64> = LazyCodec::new();
        let _ = lazy.encode(&JsonProvider, &1);
    }

    #[test]
    #[should_panic(expected = "lazy codec bound twice")]
    fn test_double_bind_panics() {
        let lazy: LazyCodec<JsonProvider, i64> = LazyCodec::new();
        lazy.bind(LONG);
        lazy.bind(LONG);
    }
}
