//! Property-based tests covering the write-then-read round trip for each
//! format over generated element trees. Non-finite floats are excluded
//! because NaN never compares equal; their fixed spellings are covered by
//! unit tests.

use polyform::{json, toml, yaml, ElementMap, JsonConfig, JsonElement, TomlElement, YamlElement};
use proptest::prelude::*;

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |f| f.is_finite())
}

fn json_element() -> impl Strategy<Value = JsonElement> {
    let leaf = prop_oneof![
        Just(JsonElement::Null),
        any::<bool>().prop_map(JsonElement::Bool),
        any::<i64>().prop_map(JsonElement::Integer),
        finite_f64().prop_map(JsonElement::Float),
        ".*".prop_map(JsonElement::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(JsonElement::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4).prop_map(|entries| {
                let mut object = ElementMap::new();
                for (key, value) in entries {
                    object.insert(key, value);
                }
                JsonElement::Object(object)
            }),
        ]
    })
}

fn yaml_element() -> impl Strategy<Value = YamlElement> {
    let leaf = prop_oneof![
        Just(YamlElement::Null),
        any::<bool>().prop_map(YamlElement::Bool),
        any::<i64>().prop_map(YamlElement::Integer),
        finite_f64().prop_map(YamlElement::Float),
        "[ -~]{0,16}".prop_map(YamlElement::from),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(YamlElement::Sequence),
            prop::collection::btree_map("[a-z]{1,8}", inner, 1..4).prop_map(|entries| {
                let mut mapping = ElementMap::new();
                for (key, value) in entries {
                    mapping.insert(key, value);
                }
                YamlElement::Mapping(mapping)
            }),
        ]
    })
}

fn toml_scalar() -> impl Strategy<Value = TomlElement> {
    prop_oneof![
        any::<bool>().prop_map(TomlElement::Bool),
        any::<i64>().prop_map(TomlElement::Integer),
        finite_f64().prop_map(TomlElement::Float),
        ".*".prop_map(TomlElement::from),
    ]
}

proptest! {
    #[test]
    fn prop_json_round_trip(element in json_element()) {
        let text = json::to_string(&element);
        let reparsed = json::from_str(&text)
            .unwrap_or_else(|e| panic!("reparse failed: {e}\n{text}"));
        prop_assert_eq!(reparsed, element);
    }

    #[test]
    fn prop_json_compact_round_trip(element in json_element()) {
        let config = JsonConfig::compact();
        let text = json::to_string_with(&element, &config);
        prop_assert!(!text.contains('\n'));
        let reparsed = json::from_str(&text)
            .unwrap_or_else(|e| panic!("reparse failed: {e}\n{text}"));
        prop_assert_eq!(reparsed, element);
    }

    #[test]
    fn prop_json_strings_survive_escaping(s in ".*") {
        let element = JsonElement::from(s.clone());
        let reparsed = json::from_str(&json::to_string(&element)).unwrap();
        prop_assert_eq!(reparsed.as_str(), Some(s.as_str()));
    }

    #[test]
    fn prop_yaml_round_trip(element in yaml_element()) {
        let text = yaml::to_string(&element);
        let reparsed = yaml::from_str(&text)
            .unwrap_or_else(|e| panic!("reparse failed: {e}\n{text}"));
        prop_assert_eq!(reparsed, element);
    }

    #[test]
    fn prop_toml_flat_table_round_trip(
        entries in prop::collection::btree_map("[a-z][a-z0-9_-]{0,8}", toml_scalar(), 0..8)
    ) {
        let mut table = polyform::TomlTable::new();
        for (key, value) in entries {
            table.insert(key, value);
        }
        let text = toml::to_string(&table);
        let reparsed = toml::from_str(&text)
            .unwrap_or_else(|e| panic!("reparse failed: {e}\n{text}"));
        prop_assert_eq!(reparsed, table);
    }

    #[test]
    fn prop_integers_keep_their_type(n in any::<i64>()) {
        let parsed = json::from_str(&n.to_string()).unwrap();
        prop_assert_eq!(parsed, JsonElement::Integer(n));
    }

    #[test]
    fn prop_finite_floats_keep_their_value(f in finite_f64()) {
        let element = JsonElement::Float(f);
        let reparsed = json::from_str(&json::to_string(&element)).unwrap();
        prop_assert_eq!(reparsed.as_f64(), Some(f));
    }
}
