use std::fmt::Write;

/// A single property value as handed over by the parser. Only string values
/// participate in font-name extraction; the other variants exist so that
/// numeric or boolean styling attributes survive in the bag unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Str(String),
    Int(i64),
    Double(f64),
    Bool(bool),
}

impl PropertyValue {
    fn render(&self, out: &mut String) {
        match self {
            PropertyValue::Str(s) => out.push_str(s),
            PropertyValue::Int(i) => {
                let _ = write!(out, "{}", i);
            }
            PropertyValue::Double(d) => {
                let _ = write!(out, "{}", d);
            }
            PropertyValue::Bool(b) => {
                let _ = write!(out, "{}", b);
            }
        }
    }
}

/// Insertion-ordered key/value bag attached to style-defining events.
///
/// Lookups degrade rather than fail: a missing key or a non-string value
/// both answer `None` from [`get_str`](PropertyBag::get_str). The serialized
/// form produced by [`prop_string`](PropertyBag::prop_string) is what the
/// fallback font-name scan operates on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyBag {
    pub fn new() -> PropertyBag {
        PropertyBag::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.entries.push((key.into(), value));
    }

    pub fn insert_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key, PropertyValue::Str(value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// String value for `key`, or `None` if the key is absent or the value
    /// is not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(PropertyValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialized `key: value, key: value` textual form, in insertion order.
    pub fn prop_string(&self) -> String {
        let mut out = String::new();
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(k);
            out.push_str(": ");
            v.render(&mut out);
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> PropertyBag {
        let mut bag = PropertyBag::new();
        for (k, v) in iter {
            bag.insert_str(k, v);
        }
        bag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_str_ignores_non_string_values() {
        let mut bag = PropertyBag::new();
        bag.insert("size", PropertyValue::Int(12));
        bag.insert_str("font", "Courier");
        assert_eq!(bag.get_str("size"), None);
        assert_eq!(bag.get_str("font"), Some("Courier"));
        assert_eq!(bag.get_str("missing"), None);
    }

    #[test]
    fn prop_string_preserves_insertion_order() {
        let mut bag = PropertyBag::new();
        bag.insert_str("style:font-name", "Times New Roman");
        bag.insert("bold", PropertyValue::Bool(true));
        bag.insert("margin", PropertyValue::Double(1.5));
        assert_eq!(
            bag.prop_string(),
            "style:font-name: Times New Roman, bold: true, margin: 1.5"
        );
    }

    #[test]
    fn empty_bag_serializes_to_empty_string() {
        assert_eq!(PropertyBag::new().prop_string(), "");
        assert!(PropertyBag::new().is_empty());
    }

    #[test]
    fn from_iterator_of_string_pairs() {
        let bag: PropertyBag = [("font", "Arial"), ("lang", "en")].into_iter().collect();
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.get_str("lang"), Some("en"));
    }
}
