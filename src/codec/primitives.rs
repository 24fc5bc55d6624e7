//! Codecs for primitive values, enums and constants.
//!
//! Every primitive has a unit struct and a matching constant, so call sites
//! read like a vocabulary: `field("id", LONG, …)`, `list(STRING)`. Narrow
//! integer codecs range-check the decoded `i64` and report an out-of-range
//! value as a [`CodecError`], not a panic.

use super::provider::TypeProvider;
use super::{Codec, CodecError, CodecResult, KeyableCodec};
use chrono::NaiveDateTime;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

macro_rules! integer_codec {
    ($struct:ident, $ty:ty, $constant:ident, $name:literal) => {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $struct;

        impl<P: TypeProvider> Codec<P> for $struct {
            type Value = $ty;

            fn encode(&self, provider: &P, value: &$ty) -> CodecResult<P::Element> {
                Ok(provider.integer(i64::from(*value)))
            }

            fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<$ty> {
                let raw = provider.as_integer(element).ok_or_else(|| {
                    CodecError::new(format!(
                        concat!("expected ", $name, ", found {}"),
                        provider.describe(element)
                    ))
                })?;
                <$ty>::try_from(raw).map_err(|_| {
                    CodecError::new(format!(concat!($name, " out of range: {}"), raw))
                })
            }
        }

        impl<P: TypeProvider> KeyableCodec<P> for $struct {
            fn encode_key(&self, value: &$ty) -> CodecResult<String> {
                Ok(value.to_string())
            }

            fn decode_key(&self, key: &str) -> CodecResult<$ty> {
                key.parse().map_err(|_| {
                    CodecError::new(format!(concat!("invalid ", $name, " key: '{}'"), key))
                })
            }
        }

        pub const $constant: $struct = $struct;
    };
}

integer_codec!(I8Codec, i8, BYTE, "a byte");
integer_codec!(I16Codec, i16, SHORT, "a short");
integer_codec!(I32Codec, i32, INT, "an int");
integer_codec!(I64Codec, i64, LONG, "a long");
integer_codec!(U8Codec, u8, UNSIGNED_BYTE, "an unsigned byte");
integer_codec!(U16Codec, u16, UNSIGNED_SHORT, "an unsigned short");
integer_codec!(U32Codec, u32, UNSIGNED_INT, "an unsigned int");

#[derive(Clone, Copy, Debug, Default)]
pub struct BoolCodec;

impl<P: TypeProvider> Codec<P> for BoolCodec {
    type Value = bool;

    fn encode(&self, provider: &P, value: &bool) -> CodecResult<P::Element> {
        Ok(provider.bool(*value))
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<bool> {
        provider.as_bool(element).ok_or_else(|| {
            CodecError::new(format!(
                "expected a boolean, found {}",
                provider.describe(element)
            ))
        })
    }
}

pub const BOOL: BoolCodec = BoolCodec;

#[derive(Clone, Copy, Debug, Default)]
pub struct F32Codec;

impl<P: TypeProvider> Codec<P> for F32Codec {
    type Value = f32;

    fn encode(&self, provider: &P, value: &f32) -> CodecResult<P::Element> {
        Ok(provider.float(f64::from(*value)))
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<f32> {
        let raw = provider.as_float(element).ok_or_else(|| {
            CodecError::new(format!(
                "expected a float, found {}",
                provider.describe(element)
            ))
        })?;
        Ok(raw as f32)
    }
}

pub const FLOAT: F32Codec = F32Codec;

#[derive(Clone, Copy, Debug, Default)]
pub struct F64Codec;

impl<P: TypeProvider> Codec<P> for F64Codec {
    type Value = f64;

    fn encode(&self, provider: &P, value: &f64) -> CodecResult<P::Element> {
        Ok(provider.float(*value))
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<f64> {
        provider.as_float(element).ok_or_else(|| {
            CodecError::new(format!(
                "expected a double, found {}",
                provider.describe(element)
            ))
        })
    }
}

pub const DOUBLE: F64Codec = F64Codec;

#[derive(Clone, Copy, Debug, Default)]
pub struct StringCodec;

impl<P: TypeProvider> Codec<P> for StringCodec {
    type Value = String;

    fn encode(&self, provider: &P, value: &String) -> CodecResult<P::Element> {
        Ok(provider.string(value))
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<String> {
        provider
            .as_string(element)
            .map(str::to_string)
            .ok_or_else(|| {
                CodecError::new(format!(
                    "expected a string, found {}",
                    provider.describe(element)
                ))
            })
    }
}

impl<P: TypeProvider> KeyableCodec<P> for StringCodec {
    fn encode_key(&self, value: &String) -> CodecResult<String> {
        Ok(value.clone())
    }

    fn decode_key(&self, key: &str) -> CodecResult<String> {
        Ok(key.to_string())
    }
}

pub const STRING: StringCodec = StringCodec;

/// RFC 3339-style date-time stored as a string element.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateTimeCodec;

impl<P: TypeProvider> Codec<P> for DateTimeCodec {
    type Value = NaiveDateTime;

    fn encode(&self, provider: &P, value: &NaiveDateTime) -> CodecResult<P::Element> {
        Ok(provider.string(&value.format(DATE_TIME_FORMAT).to_string()))
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<NaiveDateTime> {
        let text = provider.as_string(element).ok_or_else(|| {
            CodecError::new(format!(
                "expected a date-time string, found {}",
                provider.describe(element)
            ))
        })?;
        NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT)
            .map_err(|_| CodecError::new(format!("invalid date-time: '{text}'")))
    }
}

pub const DATE_TIME: DateTimeCodec = DateTimeCodec;

/// Encodes nothing and decodes a fixed value, ignoring the element.
#[derive(Clone, Debug)]
pub struct UnitCodec<T: Clone> {
    value: T,
}

impl<P: TypeProvider, T: Clone> Codec<P> for UnitCodec<T> {
    type Value = T;

    fn encode(&self, provider: &P, _value: &T) -> CodecResult<P::Element> {
        Ok(provider.empty_map())
    }

    fn decode(&self, _provider: &P, _element: &P::Element) -> CodecResult<T> {
        Ok(self.value.clone())
    }
}

/// A codec for a constant.
pub fn unit<T: Clone>(value: T) -> UnitCodec<T> {
    UnitCodec { value }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EnumLookup {
    ByName,
    ByOrdinal,
    /// Case-insensitive name, or ordinal when the element is an integer.
    Dynamic,
}

/// An enum codec over an explicit `(name, value)` table; declaration order
/// defines the ordinals.
#[derive(Clone, Debug)]
pub struct EnumCodec<T: Clone + PartialEq> {
    entries: Vec<(String, T)>,
    lookup: EnumLookup,
}

impl<T: Clone + PartialEq> EnumCodec<T> {
    fn position(&self, value: &T) -> CodecResult<usize> {
        self.entries
            .iter()
            .position(|(_, v)| v == value)
            .ok_or_else(|| CodecError::new("value missing from enum table"))
    }

    fn by_name(&self, name: &str, ignore_case: bool) -> Option<&T> {
        self.entries
            .iter()
            .find(|(n, _)| {
                if ignore_case {
                    n.eq_ignore_ascii_case(name)
                } else {
                    n == name
                }
            })
            .map(|(_, v)| v)
    }

    fn by_ordinal(&self, ordinal: i64) -> CodecResult<&T> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| self.entries.get(i))
            .map(|(_, v)| v)
            .ok_or_else(|| {
                CodecError::new(format!(
                    "enum ordinal {ordinal} outside [0, {})",
                    self.entries.len()
                ))
            })
    }

    fn known_names(&self) -> String {
        let names: Vec<&str> = self.entries.iter().map(|(n, _)| n.as_str()).collect();
        names.join(", ")
    }
}

impl<P: TypeProvider, T: Clone + PartialEq> Codec<P> for EnumCodec<T> {
    type Value = T;

    fn encode(&self, provider: &P, value: &T) -> CodecResult<P::Element> {
        let index = self.position(value)?;
        Ok(match self.lookup {
            EnumLookup::ByOrdinal => provider.integer(index as i64),
            EnumLookup::ByName | EnumLookup::Dynamic => provider.string(&self.entries[index].0),
        })
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<T> {
        match self.lookup {
            EnumLookup::ByName => {
                let name = provider.as_string(element).ok_or_else(|| {
                    CodecError::new(format!(
                        "expected an enum name, found {}",
                        provider.describe(element)
                    ))
                })?;
                self.by_name(name, false).cloned().ok_or_else(|| {
                    CodecError::new(format!(
                        "unknown enum name '{name}', expected one of: {}",
                        self.known_names()
                    ))
                })
            }
            EnumLookup::ByOrdinal => {
                let ordinal = provider.as_integer(element).ok_or_else(|| {
                    CodecError::new(format!(
                        "expected an enum ordinal, found {}",
                        provider.describe(element)
                    ))
                })?;
                self.by_ordinal(ordinal).cloned()
            }
            EnumLookup::Dynamic => {
                if let Some(name) = provider.as_string(element) {
                    return self.by_name(name, true).cloned().ok_or_else(|| {
                        CodecError::new(format!(
                            "unknown enum name '{name}', expected one of: {}",
                            self.known_names()
                        ))
                    });
                }
                if let Some(ordinal) = provider.as_integer(element) {
                    return self.by_ordinal(ordinal).cloned();
                }
                Err(CodecError::new(format!(
                    "expected an enum name or ordinal, found {}",
                    provider.describe(element)
                )))
            }
        }
    }
}

impl<P: TypeProvider, T: Clone + PartialEq> KeyableCodec<P> for EnumCodec<T> {
    fn encode_key(&self, value: &T) -> CodecResult<String> {
        let index = self.position(value)?;
        Ok(match self.lookup {
            EnumLookup::ByOrdinal => index.to_string(),
            EnumLookup::ByName | EnumLookup::Dynamic => self.entries[index].0.clone(),
        })
    }

    fn decode_key(&self, key: &str) -> CodecResult<T> {
        match self.lookup {
            EnumLookup::ByOrdinal => {
                let ordinal: i64 = key
                    .parse()
                    .map_err(|_| CodecError::new(format!("invalid enum ordinal key: '{key}'")))?;
                self.by_ordinal(ordinal).cloned()
            }
            EnumLookup::ByName => self.by_name(key, false).cloned().ok_or_else(|| {
                CodecError::new(format!(
                    "unknown enum name '{key}', expected one of: {}",
                    self.known_names()
                ))
            }),
            EnumLookup::Dynamic => self.by_name(key, true).cloned().ok_or_else(|| {
                CodecError::new(format!(
                    "unknown enum name '{key}', expected one of: {}",
                    self.known_names()
                ))
            }),
        }
    }
}

fn entry_table<T: Clone + PartialEq>(entries: &[(&str, T)]) -> Vec<(String, T)> {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

/// Enum codec matching names exactly.
pub fn enum_by_name<T: Clone + PartialEq>(entries: &[(&str, T)]) -> EnumCodec<T> {
    EnumCodec {
        entries: entry_table(entries),
        lookup: EnumLookup::ByName,
    }
}

/// Enum codec over declaration-order ordinals.
pub fn enum_by_ordinal<T: Clone + PartialEq>(entries: &[(&str, T)]) -> EnumCodec<T> {
    EnumCodec {
        entries: entry_table(entries),
        lookup: EnumLookup::ByOrdinal,
    }
}

/// Enum codec accepting a case-insensitive name or an ordinal.
pub fn enum_dynamic<T: Clone + PartialEq>(entries: &[(&str, T)]) -> EnumCodec<T> {
    EnumCodec {
        entries: entry_table(entries),
        lookup: EnumLookup::Dynamic,
    }
}

/// Enum codec whose names come from a friendly-name function.
pub fn enum_with_names<T: Clone + PartialEq>(
    values: impl IntoIterator<Item = T>,
    name: impl Fn(&T) -> String,
) -> EnumCodec<T> {
    EnumCodec {
        entries: values.into_iter().map(|v| (name(&v), v)).collect(),
        lookup: EnumLookup::ByName,
    }
}
