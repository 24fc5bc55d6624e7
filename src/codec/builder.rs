//! Record codecs composed from fields.
//!
//! `group1` through `group16` take that many [`Field`]s plus a matching
//! constructor-like function. Encoding runs every field against the same map
//! element; decoding runs every field against the same input element and
//! hands the results to the composing function, which returns `None` to
//! reject the combination.

use super::provider::TypeProvider;
use super::{Codec, CodecError, CodecResult, Field};
use std::marker::PhantomData;

macro_rules! group_codec {
    ($fn_name:ident, $struct:ident, $($f:ident: $F:ident),+ $(,)?) => {
        /// A record codec built from fields and a composing function.
        pub struct $struct<O, $($F,)+ Func> {
            $($f: $F,)+
            compose: Func,
            _out: PhantomData<fn() -> O>,
        }

        /// Composes field codecs into a record codec.
        pub fn $fn_name<O, $($F,)+ Func>($($f: $F,)+ compose: Func) -> $struct<O, $($F,)+ Func> {
            $struct { $($f,)+ compose, _out: PhantomData }
        }

        impl<P, O, $($F,)+ Func> Codec<P> for $struct<O, $($F,)+ Func>
        where
            P: TypeProvider,
            $($F: Field<P, O>,)+
            Func: Fn($($F::Out),+) -> Option<O>,
        {
            type Value = O;

            fn encode(&self, provider: &P, value: &O) -> CodecResult<P::Element> {
                let mut target = provider.empty_map();
                $(self.$f.encode_into(provider, value, &mut target)?;)+
                Ok(target)
            }

            fn decode(&self, provider: &P, element: &P::Element) -> CodecResult<O> {
                (self.compose)($(self.$f.decode_from(provider, element)?),+).ok_or_else(|| {
                    CodecError::new("unable to create object with composing function")
                })
            }
        }
    };
}

group_codec!(group1, Group1, f1: F1);
group_codec!(group2, Group2, f1: F1, f2: F2);
group_codec!(group3, Group3, f1: F1, f2: F2, f3: F3);
group_codec!(group4, Group4, f1: F1, f2: F2, f3: F3, f4: F4);
group_codec!(group5, Group5, f1: F1, f2: F2, f3: F3, f4: F4, f5: F5);
group_codec!(group6, Group6, f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6);
group_codec!(group7, Group7, f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7);
group_codec!(group8, Group8, f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7, f8: F8);
group_codec!(
    group9, Group9,
    f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7, f8: F8, f9: F9
);
group_codec!(
    group10, Group10,
    f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7, f8: F8, f9: F9, f10: F10
);
group_codec!(
    group11, Group11,
    f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7, f8: F8, f9: F9, f10: F10,
    f11: F11
);
group_codec!(
    group12, Group12,
    f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7, f8: F8, f9: F9, f10: F10,
    f11: F11, f12: F12
);
group_codec!(
    group13, Group13,
    f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7, f8: F8, f9: F9, f10: F10,
    f11: F11, f12: F12, f13: F13
);
group_codec!(
    group14, Group14,
    f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7, f8: F8, f9: F9, f10: F10,
    f11: F11, f12: F12, f13: F13, f14: F14
);
group_codec!(
    group15, Group15,
    f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7, f8: F8, f9: F9, f10: F10,
    f11: F11, f12: F12, f13: F13, f14: F14, f15: F15
);
group_codec!(
    group16, Group16,
    f1: F1, f2: F2, f3: F3, f4: F4, f5: F5, f6: F6, f7: F7, f8: F8, f9: F9, f10: F10,
    f11: F11, f12: F12, f13: F13, f14: F14, f15: F15, f16: F16
);

#[cfg(test)]
mod tests {
    use super::super::{field, optional_field, JsonProvider, BOOL, LONG, STRING};
    use super::*;
    use crate::json;

    #[derive(Clone, Debug, PartialEq)]
    struct Account {
        name: String,
        id: i64,
        admin: bool,
        nick: Option<String>,
    }

    fn account_codec() -> impl Codec<JsonProvider, Value = Account> {
        group4(
            field("name", STRING, |a: &Account| a.name.clone()),
            field("id", LONG, |a: &Account| a.id),
            field("admin", BOOL, |a: &Account| a.admin),
            optional_field("nick", STRING, |a: &Account| a.nick.clone()),
            |name, id, admin, nick| {
                Some(Account {
                    name,
                    id,
                    admin,
                    nick,
                })
            },
        )
    }

    #[test]
    fn test_group_round_trip() {
        let p = JsonProvider;
        let codec = account_codec();
        let account = Account {
            name: "ada".to_string(),
            id: 7,
            admin: true,
            nick: None,
        };

        let element = codec.encode(&p, &account).unwrap();
        assert_eq!(
            json::to_string(&element),
            "{\n  \"name\": \"ada\",\n  \"id\": 7,\n  \"admin\": true\n}"
        );
        assert_eq!(codec.decode(&p, &element).unwrap(), account);
    }

    #[test]
    fn test_group_decode_reports_missing_field() {
        let p = JsonProvider;
        let codec = account_codec();
        let element = json::from_str(r#"{"name": "ada", "admin": true}"#).unwrap();
        let err = codec.decode(&p, &element).unwrap_err();
        assert_eq!(err.message(), "name 'id' not found");
    }

    #[test]
    fn test_composing_function_may_reject() {
        let p = JsonProvider;
        let codec = group1(field("id", LONG, |v: &i64| *v), |id| {
            if id > 0 {
                Some(id)
            } else {
                None
            }
        });

        let valid = json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(codec.decode(&p, &valid).unwrap(), 3);

        let rejected = json::from_str(r#"{"id": -3}"#).unwrap();
        let err = codec.decode(&p, &rejected).unwrap_err();
        assert_eq!(
            err.message(),
            "unable to create object with composing function"
        );
    }

    #[test]
    fn test_group16_at_full_arity() {
        let p = JsonProvider;
        let codec = group16(
            field("f1", LONG, |v: &[i64; 16]| v[0]),
            field("f2", LONG, |v: &[i64; 16]| v[1]),
            field("f3", LONG, |v: &[i64; 16]| v[2]),
            field("f4", LONG, |v: &[i64; 16]| v[3]),
            field("f5", LONG, |v: &[i64; 16]| v[4]),
            field("f6", LONG, |v: &[i64; 16]| v[5]),
            field("f7", LONG, |v: &[i64; 16]| v[6]),
            field("f8", LONG, |v: &[i64; 16]| v[7]),
            field("f9", LONG, |v: &[i64; 16]| v[8]),
            field("f10", LONG, |v: &[i64; 16]| v[9]),
            field("f11", LONG, |v: &[i64; 16]| v[10]),
            field("f12", LONG, |v: &[i64; 16]| v[11]),
            field("f13", LONG, |v: &[i64; 16]| v[12]),
            field("f14", LONG, |v: &[i64; 16]| v[13]),
            field("f15", LONG, |v: &[i64; 16]| v[14]),
            field("f16", LONG, |v: &[i64; 16]| v[15]),
            |a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, q| {
                Some([a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, q])
            },
        );

        let value: [i64; 16] = std::array::from_fn(|i| i as i64);
        let element = codec.encode(&p, &value).unwrap();
        assert_eq!(codec.decode(&p, &element).unwrap(), value);
    }

    #[test]
    fn test_field_order_is_declaration_order() {
        let p = JsonProvider;
        let codec = group2(
            field("b", LONG, |v: &(i64, i64)| v.1),
            field("a", LONG, |v: &(i64, i64)| v.0),
            |b, a| Some((a, b)),
        );
        let element = codec.encode(&p, &(1, 2)).unwrap();
        let compact = crate::JsonConfig::compact();
        assert_eq!(json::to_string_with(&element, &compact), r#"{"b":2,"a":1}"#);
    }
}
