//! Predicate constraints layered over base codecs.
//!
//! A [`Constrained`] codec checks its chain before encoding and after
//! decoding. Constraints are keyed by kind: re-applying the same kind
//! replaces the earlier one, so `min_length(10).min_length(2)` leaves only
//! the `min_length(2)` check in effect. A violation reports the constraint's
//! message, e.g. "Violated even constraint".

use super::provider::TypeProvider;
use super::{Codec, CodecError, CodecResult};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::Arc;

use super::primitives::{DateTimeCodec, F64Codec, I64Codec, StringCodec, STRING};

struct Constraint<T> {
    kind: &'static str,
    message: String,
    test: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Clone for Constraint<T> {
    fn clone(&self) -> Self {
        Constraint {
            kind: self.kind,
            message: self.message.clone(),
            test: Arc::clone(&self.test),
        }
    }
}

/// A base codec plus a chain of keyed predicate constraints.
pub struct Constrained<C, T> {
    base: C,
    constraints: Vec<Constraint<T>>,
}

impl<C: Clone, T> Clone for Constrained<C, T> {
    fn clone(&self) -> Self {
        Constrained {
            base: self.base.clone(),
            constraints: self.constraints.clone(),
        }
    }
}

impl<C, T> Constrained<C, T> {
    pub(crate) fn new(base: C) -> Self {
        Constrained {
            base,
            constraints: Vec::new(),
        }
    }

    /// Appends a constraint, replacing any earlier one of the same kind.
    fn push(
        mut self,
        kind: &'static str,
        message: impl Into<String>,
        test: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.constraints.retain(|c| c.kind != kind);
        self.constraints.push(Constraint {
            kind,
            message: message.into(),
            test: Arc::new(test),
        });
        self
    }

    fn check(&self, value: &T) -> CodecResult<()> {
        for constraint in &self.constraints {
            if !(constraint.test)(value) {
                return Err(CodecError::new(format!(
                    "Violated {} constraint",
                    constraint.message
                )));
            }
        }
        Ok(())
    }
}

impl<P, C, T> Codec<P> for Constrained<C, T>
where
    P: TypeProvider,
    C: Codec<P, Value = T>,
{
    type Value = T;

    fn encode(&self, provider: &P, value: &T) -> CodecResult<P::Element> {
        self.check(value)?;
        self.base.encode(provider, value)
    }

    fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<T> {
        let value = self.base.decode(provider, element)?;
        self.check(&value)?;
        Ok(value)
    }
}

impl<C> Constrained<C, i64> {
    #[must_use]
    pub fn positive(self) -> Self {
        self.push("positive", "positive", |v| *v > 0)
    }

    #[must_use]
    pub fn negative(self) -> Self {
        self.push("negative", "negative", |v| *v < 0)
    }

    #[must_use]
    pub fn even(self) -> Self {
        self.push("even", "even", |v| v % 2 == 0)
    }

    #[must_use]
    pub fn odd(self) -> Self {
        self.push("odd", "odd", |v| v % 2 != 0)
    }

    #[must_use]
    pub fn divisible_by(self, divisor: i64) -> Self {
        assert!(divisor != 0, "zero divisor");
        self.push(
            "divisible_by",
            format!("divisible by {divisor}"),
            move |v| v % divisor == 0,
        )
    }

    #[must_use]
    pub fn power_of_two(self) -> Self {
        self.push("power_of_two", "power of two", |v| {
            *v > 0 && v & (v - 1) == 0
        })
    }

    #[must_use]
    pub fn in_range(self, min: i64, max: i64) -> Self {
        self.push("range", format!("range [{min}, {max}]"), move |v| {
            (min..=max).contains(v)
        })
    }

    #[must_use]
    pub fn min(self, min: i64) -> Self {
        self.push("min", format!("minimum {min}"), move |v| *v >= min)
    }

    #[must_use]
    pub fn max(self, max: i64) -> Self {
        self.push("max", format!("maximum {max}"), move |v| *v <= max)
    }
}

impl I64Codec {
    pub fn positive(self) -> Constrained<I64Codec, i64> {
        Constrained::<_, i64>::new(self).positive()
    }

    pub fn negative(self) -> Constrained<I64Codec, i64> {
        Constrained::<_, i64>::new(self).negative()
    }

    pub fn even(self) -> Constrained<I64Codec, i64> {
        Constrained::new(self).even()
    }

    pub fn odd(self) -> Constrained<I64Codec, i64> {
        Constrained::new(self).odd()
    }

    pub fn divisible_by(self, divisor: i64) -> Constrained<I64Codec, i64> {
        Constrained::new(self).divisible_by(divisor)
    }

    pub fn power_of_two(self) -> Constrained<I64Codec, i64> {
        Constrained::new(self).power_of_two()
    }

    pub fn in_range(self, min: i64, max: i64) -> Constrained<I64Codec, i64> {
        Constrained::<_, i64>::new(self).in_range(min, max)
    }

    pub fn min(self, min: i64) -> Constrained<I64Codec, i64> {
        Constrained::new(self).min(min)
    }

    pub fn max(self, max: i64) -> Constrained<I64Codec, i64> {
        Constrained::new(self).max(max)
    }
}

impl<C> Constrained<C, f64> {
    #[must_use]
    pub fn positive(self) -> Self {
        self.push("positive", "positive", |v| *v > 0.0)
    }

    #[must_use]
    pub fn negative(self) -> Self {
        self.push("negative", "negative", |v| *v < 0.0)
    }

    #[must_use]
    pub fn in_range(self, min: f64, max: f64) -> Self {
        self.push("range", format!("range [{min}, {max}]"), move |v| {
            *v >= min && *v <= max
        })
    }
}

impl F64Codec {
    pub fn positive(self) -> Constrained<F64Codec, f64> {
        Constrained::<_, f64>::new(self).positive()
    }

    pub fn negative(self) -> Constrained<F64Codec, f64> {
        Constrained::<_, f64>::new(self).negative()
    }

    pub fn in_range(self, min: f64, max: f64) -> Constrained<F64Codec, f64> {
        Constrained::<_, f64>::new(self).in_range(min, max)
    }
}

impl<C> Constrained<C, String> {
    #[must_use]
    pub fn min_length(self, min: usize) -> Self {
        self.push("min_length", "minimum length", move |s: &String| {
            s.chars().count() >= min
        })
    }

    #[must_use]
    pub fn max_length(self, max: usize) -> Self {
        self.push("max_length", "maximum length", move |s: &String| {
            s.chars().count() <= max
        })
    }
}

impl StringCodec {
    pub fn min_length(self, min: usize) -> Constrained<StringCodec, String> {
        Constrained::new(self).min_length(min)
    }

    pub fn max_length(self, max: usize) -> Constrained<StringCodec, String> {
        Constrained::new(self).max_length(max)
    }
}

impl<C> Constrained<C, NaiveDateTime> {
    #[must_use]
    pub fn after(self, bound: NaiveDateTime) -> Self {
        self.push("after", format!("after {bound}"), move |v| *v > bound)
    }

    #[must_use]
    pub fn before(self, bound: NaiveDateTime) -> Self {
        self.push("before", format!("before {bound}"), move |v| *v < bound)
    }
}

impl DateTimeCodec {
    pub fn after(self, bound: NaiveDateTime) -> Constrained<DateTimeCodec, NaiveDateTime> {
        Constrained::new(self).after(bound)
    }

    pub fn before(self, bound: NaiveDateTime) -> Constrained<DateTimeCodec, NaiveDateTime> {
        Constrained::new(self).before(bound)
    }
}

/// A string whose length must fall within `[min, max]`.
pub fn bounded_string(min: usize, max: usize) -> Constrained<StringCodec, String> {
    STRING.min_length(min).max_length(max)
}

/// A string with at least one character.
pub fn non_empty_string() -> Constrained<StringCodec, String> {
    STRING.min_length(1)
}

/// A string matching a regular expression.
///
/// Panics on an invalid pattern; the pattern is part of the codec
/// definition, not user data.
pub fn formatted_string(pattern: &str) -> Constrained<StringCodec, String> {
    let regex = Regex::new(pattern).expect("invalid format pattern");
    Constrained::new(STRING).push("format", format!("format /{pattern}/"), move |s: &String| {
        regex.is_match(s)
    })
}
