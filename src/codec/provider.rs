//! The seam between the codec algebra and a concrete element family.

use super::{CodecError, CodecResult};
use crate::json::JsonElement;
use crate::map::ElementMap;

/// Build-and-inspect hooks over one element family.
///
/// Codecs never name a concrete element type; everything goes through these
/// hooks, so a TOML or YAML provider can back the same codecs by
/// implementing this trait.
pub trait TypeProvider {
    type Element: Clone;

    fn null(&self) -> Self::Element;
    fn bool(&self, value: bool) -> Self::Element;
    fn integer(&self, value: i64) -> Self::Element;
    fn float(&self, value: f64) -> Self::Element;
    fn string(&self, value: &str) -> Self::Element;
    fn list(&self, items: Vec<Self::Element>) -> Self::Element;
    fn empty_map(&self) -> Self::Element;

    /// Adds or replaces one field of a map element.
    ///
    /// # Errors
    ///
    /// Fails when `target` is not a map.
    fn set_field(
        &self,
        target: &mut Self::Element,
        key: &str,
        value: Self::Element,
    ) -> CodecResult<()>;

    fn get_field<'e>(&self, source: &'e Self::Element, key: &str) -> Option<&'e Self::Element>;

    fn map_entries<'e>(
        &self,
        element: &'e Self::Element,
    ) -> Option<Vec<(&'e str, &'e Self::Element)>>;

    fn as_bool(&self, element: &Self::Element) -> Option<bool>;
    fn as_integer(&self, element: &Self::Element) -> Option<i64>;
    fn as_float(&self, element: &Self::Element) -> Option<f64>;
    fn as_string<'e>(&self, element: &'e Self::Element) -> Option<&'e str>;
    fn as_list<'e>(&self, element: &'e Self::Element) -> Option<&'e [Self::Element]>;
    fn is_null(&self, element: &Self::Element) -> bool;
    fn is_map(&self, element: &Self::Element) -> bool;

    /// A short phrase naming the element's type and value, for error
    /// messages.
    fn describe(&self, element: &Self::Element) -> String;
}

/// [`TypeProvider`] over [`JsonElement`] trees.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonProvider;

impl TypeProvider for JsonProvider {
    type Element = JsonElement;

    fn null(&self) -> JsonElement {
        JsonElement::Null
    }

    fn bool(&self, value: bool) -> JsonElement {
        JsonElement::Bool(value)
    }

    fn integer(&self, value: i64) -> JsonElement {
        JsonElement::Integer(value)
    }

    fn float(&self, value: f64) -> JsonElement {
        JsonElement::Float(value)
    }

    fn string(&self, value: &str) -> JsonElement {
        JsonElement::String(value.to_string())
    }

    fn list(&self, items: Vec<JsonElement>) -> JsonElement {
        JsonElement::Array(items)
    }

    fn empty_map(&self) -> JsonElement {
        JsonElement::Object(ElementMap::new())
    }

    fn set_field(
        &self,
        target: &mut JsonElement,
        key: &str,
        value: JsonElement,
    ) -> CodecResult<()> {
        let Some(object) = target.as_object_mut() else {
            return Err(CodecError::new(format!(
                "cannot set field '{key}' on {}",
                self.describe(target)
            )));
        };
        object.insert(key.to_string(), value);
        Ok(())
    }

    fn get_field<'e>(&self, source: &'e JsonElement, key: &str) -> Option<&'e JsonElement> {
        source.as_object().and_then(|object| object.get(key))
    }

    fn map_entries<'e>(
        &self,
        element: &'e JsonElement,
    ) -> Option<Vec<(&'e str, &'e JsonElement)>> {
        element
            .as_object()
            .map(|object| object.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }

    fn as_bool(&self, element: &JsonElement) -> Option<bool> {
        element.as_bool()
    }

    fn as_integer(&self, element: &JsonElement) -> Option<i64> {
        match element {
            JsonElement::Integer(i) => Some(*i),
            _ => None,
        }
    }

    fn as_float(&self, element: &JsonElement) -> Option<f64> {
        element.as_f64()
    }

    fn as_string<'e>(&self, element: &'e JsonElement) -> Option<&'e str> {
        element.as_str()
    }

    fn as_list<'e>(&self, element: &'e JsonElement) -> Option<&'e [JsonElement]> {
        element.as_array().map(Vec::as_slice)
    }

    fn is_null(&self, element: &JsonElement) -> bool {
        element.is_null()
    }

    fn is_map(&self, element: &JsonElement) -> bool {
        element.is_object()
    }

    fn describe(&self, element: &JsonElement) -> String {
        match element {
            JsonElement::Null => "null".to_string(),
            JsonElement::Bool(b) => format!("a boolean ({b})"),
            JsonElement::Integer(i) => format!("an integer ({i})"),
            JsonElement::Float(f) => format!("a float ({f})"),
            JsonElement::String(s) => format!("a string (\"{s}\")"),
            JsonElement::Array(_) => "an array".to_string(),
            JsonElement::Object(_) => "an object".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_inspect() {
        let p = JsonProvider;
        assert_eq!(p.as_integer(&p.integer(7)), Some(7));
        assert_eq!(p.as_float(&p.integer(7)), Some(7.0));
        assert_eq!(p.as_string(&p.string("x")), Some("x"));
        assert!(p.is_null(&p.null()));
        assert!(p.is_map(&p.empty_map()));
        assert_eq!(p.as_list(&p.list(vec![p.bool(true)])).map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_field_access() {
        let p = JsonProvider;
        let mut map = p.empty_map();
        p.set_field(&mut map, "a", p.integer(1)).unwrap();
        p.set_field(&mut map, "a", p.integer(2)).unwrap();
        assert_eq!(p.get_field(&map, "a"), Some(&JsonElement::Integer(2)));
        assert_eq!(p.map_entries(&map).map(|e| e.len()), Some(1));

        let mut not_a_map = p.null();
        assert!(p.set_field(&mut not_a_map, "a", p.integer(1)).is_err());
    }

    #[test]
    fn test_describe() {
        let p = JsonProvider;
        assert_eq!(p.describe(&p.null()), "null");
        assert_eq!(p.describe(&p.bool(true)), "a boolean (true)");
        assert_eq!(p.describe(&p.string("x")), "a string (\"x\")");
    }
}
