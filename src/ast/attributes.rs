use std::fmt::{self, Display, Formatter};
use std::str;

/// An untyped attribute value.
///
/// Attribute storage is shared by every extension that touches a node, so a
/// key may hold a value of any shape. Consumers that need text must go
/// through [`AttrValue::as_text`] and cope with `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<String>),
    Number(i64),
    Flag(bool),
}

impl AttrValue {
    /// Return the value as text if it is text-shaped: a string, or bytes that
    /// are valid UTF-8.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Bytes(b) => str::from_utf8(b).ok(),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<Vec<u8>> for AttrValue {
    fn from(b: Vec<u8>) -> Self {
        AttrValue::Bytes(b)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Flag(b)
    }
}

impl Display for AttrValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            AttrValue::List(items) => f.write_str(&items.join(" ")),
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// Ordered name/value attribute storage attached to a node.
///
/// Names are unique; setting an existing name replaces its value in place so
/// iteration order is the order names were first added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: Vec<(String, AttrValue)>,
}

impl AttributeSet {
    pub fn new() -> Self {
        AttributeSet {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn set<N, V>(&mut self, name: N, value: V) -> &mut Self
    where
        N: Into<String>,
        V: Into<AttrValue>,
    {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `id` attribute, if present and text-shaped.
    pub fn id(&self) -> Option<&str> {
        self.get("id").and_then(AttrValue::as_text)
    }
}
