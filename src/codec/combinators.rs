//! Combinators that build new codecs out of existing ones.

use super::provider::TypeProvider;
use super::{Codec, CodecError, CodecResult, Either, KeyableCodec};
use indexmap::IndexMap;
use std::hash::Hash;

/// Maps a codec to a related type through total functions.
///
/// Use when the conversion cannot fail; fallible conversions belong in
/// [`flat_xmap`].
pub struct XMap<C, F, G> {
    codec: C,
    post_decode: F,
    pre_encode: G,
}

impl<P, C, T, U, F, G> Codec<P> for XMap<C, F, G>
where
    P: TypeProvider,
    C: Codec<P, Value = T>,
    F: Fn(T) -> U,
    G: Fn(&U) -> T,
{
    type Value = U;

    fn encode(&self, provider: &P, value: &U) -> CodecResult<P::Element> {
        let inner = (self.pre_encode)(value);
        self.codec.encode(provider, &inner)
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<U> {
        let inner = self.codec.decode(provider, element)?;
        Ok((self.post_decode)(inner))
    }
}

pub fn xmap<C, T, U>(
    codec: C,
    post_decode: impl Fn(T) -> U,
    pre_encode: impl Fn(&U) -> T,
) -> XMap<C, impl Fn(T) -> U, impl Fn(&U) -> T> {
    XMap {
        codec,
        post_decode,
        pre_encode,
    }
}

/// Like [`xmap`] but the conversions route failures through the error
/// channel.
pub struct FlatXMap<C, F, G> {
    codec: C,
    post_decode: F,
    pre_encode: G,
}

impl<P, C, T, U, F, G> Codec<P> for FlatXMap<C, F, G>
where
    P: TypeProvider,
    C: Codec<P, Value = T>,
    F: Fn(T) -> CodecResult<U>,
    G: Fn(&U) -> CodecResult<T>,
{
    type Value = U;

    fn encode(&self, provider: &P, value: &U) -> CodecResult<P::Element> {
        let inner = (self.pre_encode)(value)?;
        self.codec.encode(provider, &inner)
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<U> {
        let inner = self.codec.decode(provider, element)?;
        (self.post_decode)(inner)
    }
}

pub fn flat_xmap<C, T, U>(
    codec: C,
    post_decode: impl Fn(T) -> CodecResult<U>,
    pre_encode: impl Fn(&U) -> CodecResult<T>,
) -> FlatXMap<C, impl Fn(T) -> CodecResult<U>, impl Fn(&U) -> CodecResult<T>> {
    FlatXMap {
        codec,
        post_decode,
        pre_encode,
    }
}

/// Runs a predicate before encoding and after decoding, short-circuiting to
/// an error without touching the element on failure.
pub struct Validate<C, F> {
    codec: C,
    check: F,
}

impl<P, C, F> Codec<P> for Validate<C, F>
where
    P: TypeProvider,
    C: Codec<P>,
    F: Fn(&C::Value) -> CodecResult<()>,
{
    type Value = C::Value;

    fn encode(&self, provider: &P, value: &Self::Value) -> CodecResult<P::Element> {
        (self.check)(value)?;
        self.codec.encode(provider, value)
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<Self::Value> {
        let value = self.codec.decode(provider, element)?;
        (self.check)(&value)?;
        Ok(value)
    }
}

pub fn validate<C, T>(
    codec: C,
    check: impl Fn(&T) -> CodecResult<()>,
) -> Validate<C, impl Fn(&T) -> CodecResult<()>> {
    Validate { codec, check }
}

/// Tries the left codec, then the right; both failures are reported when
/// neither matches.
pub struct EitherCodec<L, R> {
    left: L,
    right: R,
}

impl<P, L, R> Codec<P> for EitherCodec<L, R>
where
    P: TypeProvider,
    L: Codec<P>,
    R: Codec<P>,
{
    type Value = Either<L::Value, R::Value>;

    fn encode(&self, provider: &P, value: &Self::Value) -> CodecResult<P::Element> {
        match value {
            Either::Left(left) => self.left.encode(provider, left),
            Either::Right(right) => self.right.encode(provider, right),
        }
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<Self::Value> {
        let left_err = match self.left.decode(provider, element) {
            Ok(value) => return Ok(Either::Left(value)),
            Err(err) => err,
        };
        let right_err = match self.right.decode(provider, element) {
            Ok(value) => return Ok(Either::Right(value)),
            Err(err) => err,
        };
        Err(CodecError::new(format!(
            "neither alternative matched: {}; {}",
            left_err.message(),
            right_err.message()
        )))
    }
}

pub fn either<L, R>(left: L, right: R) -> EitherCodec<L, R> {
    EitherCodec { left, right }
}

/// Decodes with the primary codec, retrying with the alternative on
/// failure. Encoding always uses the primary.
pub struct WithAlternative<C, A> {
    primary: C,
    alternative: A,
}

impl<P, C, A> Codec<P> for WithAlternative<C, A>
where
    P: TypeProvider,
    C: Codec<P>,
    A: Codec<P, Value = C::Value>,
{
    type Value = C::Value;

    fn encode(&self, provider: &P, value: &Self::Value) -> CodecResult<P::Element> {
        self.primary.encode(provider, value)
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<Self::Value> {
        self.primary
            .decode(provider, element)
            .or_else(|_| self.alternative.decode(provider, element))
    }
}

pub fn with_alternative<C, A>(primary: C, alternative: A) -> WithAlternative<C, A> {
    WithAlternative {
        primary,
        alternative,
    }
}

/// A homogeneous list, optionally size-bounded. A bound violation is a
/// [`CodecError`], on encode as well as decode.
pub struct ListCodec<C> {
    element: C,
    min: Option<usize>,
    max: Option<usize>,
}

impl<C> ListCodec<C> {
    fn check_len(&self, len: usize) -> CodecResult<()> {
        if let Some(min) = self.min {
            if len < min {
                return Err(CodecError::new(format!(
                    "list size {len} below minimum {min}"
                )));
            }
        }
        if let Some(max) = self.max {
            if len > max {
                return Err(CodecError::new(format!(
                    "list size {len} above maximum {max}"
                )));
            }
        }
        Ok(())
    }
}

impl<P, C> Codec<P> for ListCodec<C>
where
    P: TypeProvider,
    C: Codec<P>,
{
    type Value = Vec<C::Value>;

    fn encode(&self, provider: &P, value: &Self::Value) -> CodecResult<P::Element> {
        self.check_len(value.len())?;
        let mut items = Vec::with_capacity(value.len());
        for item in value {
            items.push(self.element.encode(provider, item)?);
        }
        Ok(provider.list(items))
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<Self::Value> {
        let items = provider.as_list(element).ok_or_else(|| {
            CodecError::new(format!(
                "expected a list, found {}",
                provider.describe(element)
            ))
        })?;
        self.check_len(items.len())?;
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            values.push(self.element.decode(provider, item)?);
        }
        Ok(values)
    }
}

pub fn list<C>(element: C) -> ListCodec<C> {
    ListCodec {
        element,
        min: None,
        max: None,
    }
}

pub fn bounded_list<C>(element: C, min: usize, max: usize) -> ListCodec<C> {
    ListCodec {
        element,
        min: Some(min),
        max: Some(max),
    }
}

pub fn non_empty_list<C>(element: C) -> ListCodec<C> {
    ListCodec {
        element,
        min: Some(1),
        max: None,
    }
}

/// A homogeneous map; keys go through a [`KeyableCodec`]'s string form.
pub struct MapCodec<K, V> {
    key: K,
    value: V,
}

impl<P, K, V> Codec<P> for MapCodec<K, V>
where
    P: TypeProvider,
    K: KeyableCodec<P>,
    K::Value: Hash + Eq,
    V: Codec<P>,
{
    type Value = IndexMap<K::Value, V::Value>;

    fn encode(&self, provider: &P, value: &Self::Value) -> CodecResult<P::Element> {
        let mut target = provider.empty_map();
        for (k, v) in value {
            let key = self.key.encode_key(k)?;
            let encoded = self.value.encode(provider, v)?;
            provider.set_field(&mut target, &key, encoded)?;
        }
        Ok(target)
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<Self::Value> {
        let entries = provider.map_entries(element).ok_or_else(|| {
            CodecError::new(format!(
                "expected a map, found {}",
                provider.describe(element)
            ))
        })?;
        let mut decoded = IndexMap::with_capacity(entries.len());
        for (key, value) in entries {
            decoded.insert(self.key.decode_key(key)?, self.value.decode(provider, value)?);
        }
        Ok(decoded)
    }
}

pub fn map<K, V>(key: K, value: V) -> MapCodec<K, V> {
    MapCodec { key, value }
}

/// `None` encodes to a null element; a null or missing value decodes to
/// `None`.
pub struct OptionalCodec<C> {
    inner: C,
}

impl<P, C> Codec<P> for OptionalCodec<C>
where
    P: TypeProvider,
    C: Codec<P>,
{
    type Value = Option<C::Value>;

    fn encode(&self, provider: &P, value: &Self::Value) -> CodecResult<P::Element> {
        match value {
            None => Ok(provider.null()),
            Some(inner) => self.inner.encode(provider, inner),
        }
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<Self::Value> {
        if provider.is_null(element) {
            return Ok(None);
        }
        Ok(Some(self.inner.decode(provider, element)?))
    }
}

pub fn optional<C>(inner: C) -> OptionalCodec<C> {
    OptionalCodec { inner }
}

/// A 2-tuple stored as a two-field map.
pub struct PairCodec<A, B> {
    first: A,
    second: B,
}

impl<P, A, B> Codec<P> for PairCodec<A, B>
where
    P: TypeProvider,
    A: Codec<P>,
    B: Codec<P>,
{
    type Value = (A::Value, B::Value);

    fn encode(&self, provider: &P, value: &Self::Value) -> CodecResult<P::Element> {
        let mut target = provider.empty_map();
        provider.set_field(&mut target, "first", self.first.encode(provider, &value.0)?)?;
        provider.set_field(
            &mut target,
            "second",
            self.second.encode(provider, &value.1)?,
        )?;
        Ok(target)
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<Self::Value> {
        let first = provider.get_field(element, "first").ok_or_else(|| {
            CodecError::new(format!(
                "expected a pair with key 'first', found {}",
                provider.describe(element)
            ))
        })?;
        let second = provider.get_field(element, "second").ok_or_else(|| {
            CodecError::new(format!(
                "expected a pair with key 'second', found {}",
                provider.describe(element)
            ))
        })?;
        Ok((
            self.first.decode(provider, first)?,
            self.second.decode(provider, second)?,
        ))
    }
}

pub fn pair<A, B>(first: A, second: B) -> PairCodec<A, B> {
    PairCodec { first, second }
}
