/// Builds a [`JsonElement`](crate::JsonElement) from an inline literal.
///
/// ```rust
/// use polyform::json;
///
/// let doc = json!({ "name": "demo", "sizes": [1, 2, 3], "extra": null });
/// ```
#[macro_export]
macro_rules! json {
    (null) => {
        $crate::JsonElement::Null
    };

    (true) => {
        $crate::JsonElement::Bool(true)
    };

    (false) => {
        $crate::JsonElement::Bool(false)
    };

    ([]) => {
        $crate::JsonElement::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::JsonElement::Array(vec![$($crate::json!($elem)),*])
    };

    ({}) => {
        $crate::JsonElement::Object($crate::ElementMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ElementMap::new();
        $(
            object.insert($key.to_string(), $crate::json!($value));
        )*
        $crate::JsonElement::Object(object)
    }};

    // Anything else goes through the From conversions on JsonElement
    ($e:expr) => {
        $crate::JsonElement::from($e)
    };
}

#[cfg(test)]
mod tests {
    use crate::{ElementMap, JsonElement};

    #[test]
    fn test_json_macro_primitives() {
        assert_eq!(json!(null), JsonElement::Null);
        assert_eq!(json!(true), JsonElement::Bool(true));
        assert_eq!(json!(false), JsonElement::Bool(false));
        assert_eq!(json!(42), JsonElement::Integer(42));
        assert_eq!(json!(3.5), JsonElement::Float(3.5));
        assert_eq!(json!("hello"), JsonElement::String("hello".to_string()));
    }

    #[test]
    fn test_json_macro_arrays() {
        assert_eq!(json!([]), JsonElement::Array(vec![]));

        let arr = json!([1, 2, 3]);
        match arr {
            JsonElement::Array(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], JsonElement::Integer(1));
                assert_eq!(items[2], JsonElement::Integer(3));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn test_json_macro_objects() {
        assert_eq!(json!({}), JsonElement::Object(ElementMap::new()));

        let obj = json!({
            "name": "demo",
            "count": 2,
            "nested": { "flag": true },
            "items": [1, 2],
        });
        let map = obj.as_object().unwrap();
        assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("demo"));
        assert_eq!(map.get("count"), Some(&JsonElement::Integer(2)));
        assert_eq!(
            map.get("nested")
                .and_then(|v| v.as_object())
                .and_then(|m| m.get("flag")),
            Some(&JsonElement::Bool(true))
        );
        assert_eq!(
            map.get("items").and_then(|v| v.as_array()).map(Vec::len),
            Some(2)
        );
    }

    #[test]
    fn test_json_macro_round_trips_through_text() {
        let element = json!({ "a": [1, true, null] });
        let text = crate::json::to_string(&element);
        assert_eq!(crate::json::from_str(&text).unwrap(), element);
    }
}
