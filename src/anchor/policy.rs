use crate::error::Error;
use once_cell::sync::Lazy;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub(crate) static DEFAULT_TEXTER: Text = Text::from_static("¶");

pub(crate) static DEFAULT_ATTRIBUTER: Lazy<Attributes> =
    Lazy::new(|| Attributes::new().with("class", "anchor"));

/// Information about a heading for which an anchor is being considered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderInfo<'a> {
    /// Level of the heading, 1 through 6.
    pub level: usize,

    /// Identifier for the heading on the page. This will typically become
    /// part of the URL fragment.
    pub id: &'a str,
}

/// Determines the anchor text.
///
/// This is the clickable text displayed next to the heading which tells
/// readers they can use it as a link to the heading. Defaults to `¶`.
pub trait Texter: Send + Sync {
    /// Anchor text for the given heading. Returning an empty string means no
    /// anchor is generated for this heading.
    fn anchor_text<'a>(&'a self, info: &HeaderInfo<'_>) -> Cow<'a, str>;
}

/// A [`Texter`] that uses the same text for every heading.
///
/// ```
/// use pulldown_cmark_anchor::anchor::{Extender, Text};
///
/// let ext = Extender::new().texter(Text::new("#"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text(Cow<'static, str>);

impl Text {
    pub fn new(s: impl Into<Cow<'static, str>>) -> Self {
        Text(s.into())
    }

    pub const fn from_static(s: &'static str) -> Self {
        Text(Cow::Borrowed(s))
    }
}

impl Texter for Text {
    fn anchor_text<'a>(&'a self, _: &HeaderInfo<'_>) -> Cow<'a, str> {
        Cow::Borrowed(&self.0)
    }
}

/// A [`Texter`] computed by a closure. Build one with [`text_fn`].
#[derive(Clone)]
pub struct TextFn<F>(F);

/// Compute anchor text per heading.
///
/// ```
/// use pulldown_cmark_anchor::anchor::{Extender, text_fn};
///
/// // "#" for h1, "##" for h2, ...
/// let ext = Extender::new().texter(text_fn(|info| "#".repeat(info.level)));
/// ```
pub fn text_fn<F>(f: F) -> TextFn<F>
where
    F: Fn(&HeaderInfo<'_>) -> String + Send + Sync,
{
    TextFn(f)
}

impl<F> Texter for TextFn<F>
where
    F: Fn(&HeaderInfo<'_>) -> String + Send + Sync,
{
    fn anchor_text<'a>(&'a self, info: &HeaderInfo<'_>) -> Cow<'a, str> {
        Cow::Owned((self.0)(info))
    }
}

/// Determines the attributes attached to an anchor node.
///
/// Defaults to `class="anchor"`.
pub trait Attributer: Send + Sync {
    /// Attributes for the anchor of the given heading. An empty map means no
    /// attributes.
    fn anchor_attributes<'a>(&'a self, info: &HeaderInfo<'_>)
    -> Cow<'a, BTreeMap<String, String>>;
}

/// An [`Attributer`] that uses the same attributes for every anchor.
///
/// ```
/// use pulldown_cmark_anchor::anchor::{Attributes, Extender};
///
/// let ext = Extender::new().attributer(Attributes::new().with("class", "permalink"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Attributes(BTreeMap::new())
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }
}

impl From<BTreeMap<String, String>> for Attributes {
    fn from(map: BTreeMap<String, String>) -> Self {
        Attributes(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attributes(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Attributer for Attributes {
    fn anchor_attributes<'a>(&'a self, _: &HeaderInfo<'_>) -> Cow<'a, BTreeMap<String, String>> {
        Cow::Borrowed(&self.0)
    }
}

/// An [`Attributer`] computed by a closure. Build one with [`attributes_fn`].
#[derive(Clone)]
pub struct AttributesFn<F>(F);

pub fn attributes_fn<F>(f: F) -> AttributesFn<F>
where
    F: Fn(&HeaderInfo<'_>) -> BTreeMap<String, String> + Send + Sync,
{
    AttributesFn(f)
}

impl<F> Attributer for AttributesFn<F>
where
    F: Fn(&HeaderInfo<'_>) -> BTreeMap<String, String> + Send + Sync,
{
    fn anchor_attributes<'a>(&'a self, info: &HeaderInfo<'_>) -> Cow<'a, BTreeMap<String, String>> {
        Cow::Owned((self.0)(info))
    }
}

/// Where inside a heading the anchor goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Position {
    /// After the heading text. This is the default.
    #[default]
    After,

    /// Before the heading text.
    Before,
}

impl Position {
    /// Integer form used by serialised configuration: 0 is `After`, 1 is
    /// `Before`.
    pub fn index(self) -> i64 {
        match self {
            Position::After => 0,
            Position::Before => 1,
        }
    }

    /// Read the integer form. Unknown values are accepted as `After`.
    pub fn from_index(n: i64) -> Position {
        match n {
            0 => Position::After,
            1 => Position::Before,
            other => {
                tracing::warn!(
                    position = %format!("Position({})", other),
                    "unrecognized anchor position, placing anchors after the heading text"
                );
                Position::After
            }
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::After => f.write_str("After"),
            Position::Before => f.write_str("Before"),
        }
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("after") {
            Ok(Position::After)
        } else if s.eq_ignore_ascii_case("before") {
            Ok(Position::Before)
        } else {
            Err(Error::InvalidPosition(s.to_string()))
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            Position::After => "after",
            Position::Before => "before",
        })
    }
}

struct PositionVisitor;

impl Visitor<'_> for PositionVisitor {
    type Value = Position;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"before\", \"after\" or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Position, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Position, E> {
        Ok(Position::from_index(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Position, E> {
        Ok(Position::from_index(i64::try_from(v).unwrap_or(i64::MAX)))
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PositionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const INFO: HeaderInfo<'static> = HeaderInfo {
        level: 2,
        id: "bar",
    };

    #[rstest]
    #[case(Position::Before, "Before")]
    #[case(Position::After, "After")]
    fn position_display(#[case] give: Position, #[case] want: &str) {
        assert_eq!(give.to_string(), want);
    }

    #[rstest]
    #[case("before", Position::Before)]
    #[case("BEFORE", Position::Before)]
    #[case("after", Position::After)]
    #[case("After", Position::After)]
    fn position_from_str(#[case] give: &str, #[case] want: Position) {
        assert_eq!(give.parse::<Position>().unwrap(), want);
    }

    #[test]
    fn position_from_str_rejects_unknown() {
        let err = "sideways".parse::<Position>().unwrap_err();
        assert!(matches!(err, Error::InvalidPosition(ref s) if s == "sideways"));
    }

    #[rstest]
    #[case("before", Position::Before)]
    #[case("after", Position::After)]
    #[case("0", Position::After)]
    #[case("1", Position::Before)]
    #[case("42", Position::After)]
    #[case("-3", Position::After)]
    fn position_deserializes(#[case] yaml: &str, #[case] want: Position) {
        let got: Position = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(got, want);
    }

    #[test]
    fn position_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Position::Before).unwrap(), "\"before\"");
        assert_eq!(Position::Before.index(), 1);
        assert_eq!(Position::from_index(Position::After.index()), Position::After);
    }

    #[test]
    fn constant_text_ignores_input() {
        let t = Text::new("#");
        assert_eq!(t.anchor_text(&INFO), "#");
        assert_eq!(DEFAULT_TEXTER.anchor_text(&INFO), "¶");
    }

    #[test]
    fn computed_text_sees_header_info() {
        let t = text_fn(|info| format!("{}:{}", info.level, info.id));
        assert_eq!(t.anchor_text(&INFO), "2:bar");
    }

    #[test]
    fn constant_attributes_ignore_input() {
        let attrs: Attributes = [("class", "permalink"), ("aria-hidden", "true")]
            .into_iter()
            .collect();
        let got = attrs.anchor_attributes(&INFO);
        let names: Vec<_> = got.keys().map(String::as_str).collect();
        assert_eq!(names, ["aria-hidden", "class"]);
        assert_eq!(
            DEFAULT_ATTRIBUTER.anchor_attributes(&INFO).get("class").map(String::as_str),
            Some("anchor")
        );
    }

    #[test]
    fn computed_attributes_see_header_info() {
        let a = attributes_fn(|info| {
            BTreeMap::from([("data-level".to_string(), info.level.to_string())])
        });
        assert_eq!(a.anchor_attributes(&INFO)["data-level"], "2");
    }
}
