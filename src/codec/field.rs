//! Named fields of record codecs.
//!
//! [`NamedCodec`] is the single-field primitive: its value lives under a key
//! (plus optional aliases) of a map element. [`FieldCodec`] adds the accessor
//! that pulls the field's value out of the record during encoding; group
//! codecs in [`super::builder`] compose field codecs into whole records.
//!
//! Decoding looks up the primary name first, then each alias in declared
//! order; the first present key wins. A missing field names every attempted
//! key in its error.

use super::provider::TypeProvider;
use super::{Codec, CodecError, CodecResult};
use std::sync::Arc;

/// One encode/decode slot of a record: a field of some group codec.
///
/// `Out` is what the slot contributes to the composing function; for an
/// optional field that is `Option<T>` rather than `T`.
pub trait Field<P: TypeProvider, O> {
    type Out;

    /// Encodes this field of `object` into the map being built.
    fn encode_into(&self, provider: &P, object: &O, target: &mut P::Element) -> CodecResult<()>;

    /// Decodes this field from the map being read.
    fn decode_from(&self, provider: &P, element: &P::Element) -> CodecResult<Self::Out>;
}

fn lookup<'e, P: TypeProvider>(
    provider: &P,
    element: &'e P::Element,
    name: &str,
    aliases: &[String],
) -> CodecResult<&'e P::Element> {
    if !provider.is_map(element) {
        return Err(CodecError::new(format!(
            "expected a map with key '{name}', found {}",
            provider.describe(element)
        )));
    }
    if let Some(found) = provider.get_field(element, name) {
        return Ok(found);
    }
    for alias in aliases {
        if let Some(found) = provider.get_field(element, alias) {
            return Ok(found);
        }
    }
    Err(CodecError::new(missing_keys(name, aliases)))
}

fn missing_keys(name: &str, aliases: &[String]) -> String {
    if aliases.is_empty() {
        format!("name '{name}' not found")
    } else {
        format!("name '{name}' and aliases [{}] not found", aliases.join(", "))
    }
}

/// Wraps a codec so its value lives under a key of a map element.
///
/// Encoding produces a fresh single-entry map; decoding requires a map and
/// performs the name-then-aliases lookup.
#[derive(Clone, Debug)]
pub struct NamedCodec<C> {
    name: String,
    aliases: Vec<String>,
    codec: C,
}

impl<C> NamedCodec<C> {
    pub fn new(name: impl Into<String>, codec: C) -> Self {
        NamedCodec {
            name: name.into(),
            aliases: Vec::new(),
            codec,
        }
    }

    pub fn with_aliases(name: impl Into<String>, aliases: &[&str], codec: C) -> Self {
        NamedCodec {
            name: name.into(),
            aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
            codec,
        }
    }
}

impl<P: TypeProvider, C: Codec<P>> Codec<P> for NamedCodec<C> {
    type Value = C::Value;

    fn encode(&self, provider: &P, value: &Self::Value) -> CodecResult<P::Element> {
        let mut target = provider.empty_map();
        let encoded = self.codec.encode(provider, value)?;
        provider.set_field(&mut target, &self.name, encoded)?;
        Ok(target)
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<Self::Value> {
        let found = lookup(provider, element, &self.name, &self.aliases)?;
        self.codec.decode(provider, found)
    }
}

/// A required field: key, inner codec and the accessor used when encoding.
pub struct FieldCodec<C, O, T> {
    name: String,
    aliases: Vec<String>,
    codec: C,
    getter: Arc<dyn Fn(&O) -> T + Send + Sync>,
}

impl<C: Clone, O, T> Clone for FieldCodec<C, O, T> {
    fn clone(&self) -> Self {
        FieldCodec {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            codec: self.codec.clone(),
            getter: Arc::clone(&self.getter),
        }
    }
}

impl<C, O, T> FieldCodec<C, O, T> {
    /// Adds fallback keys consulted when the primary name is absent.
    #[must_use]
    pub fn aliased(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| (*a).to_string()).collect();
        self
    }
}

impl<P, C, O, T> Field<P, O> for FieldCodec<C, O, T>
where
    P: TypeProvider,
    C: Codec<P, Value = T>,
{
    type Out = T;

    fn encode_into(&self, provider: &P, object: &O, target: &mut P::Element) -> CodecResult<()> {
        let value = (self.getter)(object);
        let encoded = self.codec.encode(provider, &value)?;
        provider.set_field(target, &self.name, encoded)
    }

    fn decode_from(&self, provider: &P, element: &P::Element) -> CodecResult<T> {
        let found = lookup(provider, element, &self.name, &self.aliases)?;
        self.codec.decode(provider, found)
    }
}

/// A required field of a group codec.
pub fn field<C, O, T>(
    name: impl Into<String>,
    codec: C,
    getter: impl Fn(&O) -> T + Send + Sync + 'static,
) -> FieldCodec<C, O, T> {
    FieldCodec {
        name: name.into(),
        aliases: Vec::new(),
        codec,
        getter: Arc::new(getter),
    }
}

/// A required field with fallback keys.
pub fn field_with_aliases<C, O, T>(
    name: impl Into<String>,
    aliases: &[&str],
    codec: C,
    getter: impl Fn(&O) -> T + Send + Sync + 'static,
) -> FieldCodec<C, O, T> {
    field(name, codec, getter).aliased(aliases)
}

/// A field that may be absent: a missing or null key decodes to `None`, and
/// `None` encodes to no key at all.
pub struct OptionalFieldCodec<C, O, T> {
    name: String,
    codec: C,
    getter: Arc<dyn Fn(&O) -> Option<T> + Send + Sync>,
}

impl<P, C, O, T> Field<P, O> for OptionalFieldCodec<C, O, T>
where
    P: TypeProvider,
    C: Codec<P, Value = T>,
{
    type Out = Option<T>;

    fn encode_into(&self, provider: &P, object: &O, target: &mut P::Element) -> CodecResult<()> {
        if let Some(value) = (self.getter)(object) {
            let encoded = self.codec.encode(provider, &value)?;
            provider.set_field(target, &self.name, encoded)?;
        }
        Ok(())
    }

    fn decode_from(&self, provider: &P, element: &P::Element) -> CodecResult<Option<T>> {
        if !provider.is_map(element) {
            return Err(CodecError::new(format!(
                "expected a map with key '{}', found {}",
                self.name,
                provider.describe(element)
            )));
        }
        match provider.get_field(element, &self.name) {
            None => Ok(None),
            Some(found) if provider.is_null(found) => Ok(None),
            Some(found) => Ok(Some(self.codec.decode(provider, found)?)),
        }
    }
}

/// An optional field of a group codec.
pub fn optional_field<C, O, T>(
    name: impl Into<String>,
    codec: C,
    getter: impl Fn(&O) -> Option<T> + Send + Sync + 'static,
) -> OptionalFieldCodec<C, O, T> {
    OptionalFieldCodec {
        name: name.into(),
        codec,
        getter: Arc::new(getter),
    }
}
