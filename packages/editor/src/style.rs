//! # Style Vocabulary
//!
//! Presentation properties attached to every element.
//!
//! Keys come from a fixed, enumerated vocabulary so that exporters and the
//! property panel agree on what each key means. Keys outside the vocabulary
//! are carried through as [`StyleProperty::Custom`] but nothing interprets them.
//!
//! A missing key means "unset", never zero.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

macro_rules! style_properties {
    ($($variant:ident => $name:literal,)*) => {
        /// A presentation key, named in camelCase on the wire.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum StyleProperty {
            $($variant,)*
            /// A key outside the known vocabulary, stored verbatim
            Custom(String),
        }

        impl StyleProperty {
            /// Every property of the known vocabulary, in declaration order
            pub const KNOWN: &'static [StyleProperty] = &[$(StyleProperty::$variant,)*];

            /// camelCase name as used in element JSON and JSX style objects
            pub fn name(&self) -> &str {
                match self {
                    $(StyleProperty::$variant => $name,)*
                    StyleProperty::Custom(name) => name,
                }
            }

            /// Resolve a camelCase name, falling back to a custom key
            pub fn parse(name: &str) -> Self {
                match name {
                    $($name => StyleProperty::$variant,)*
                    other => StyleProperty::Custom(other.to_string()),
                }
            }
        }
    };
}

style_properties! {
    BackgroundColor => "backgroundColor",
    Background => "background",
    BackgroundImage => "backgroundImage",
    Padding => "padding",
    Margin => "margin",
    Border => "border",
    BorderRadius => "borderRadius",
    Color => "color",
    FontSize => "fontSize",
    FontWeight => "fontWeight",
    FontFamily => "fontFamily",
    LineHeight => "lineHeight",
    TextAlign => "textAlign",
    Width => "width",
    Height => "height",
    MinHeight => "minHeight",
    MaxWidth => "maxWidth",
    Position => "position",
    Left => "left",
    Top => "top",
    ZIndex => "zIndex",
    BoxShadow => "boxShadow",
    Opacity => "opacity",
    Display => "display",
    FlexDirection => "flexDirection",
    JustifyContent => "justifyContent",
    AlignItems => "alignItems",
    Gap => "gap",
    Flex => "flex",
    ObjectFit => "objectFit",
}

impl StyleProperty {
    /// Hyphenated CSS name (`fontSize` → `font-size`)
    pub fn css_name(&self) -> String {
        let name = self.name();
        let mut out = String::with_capacity(name.len() + 4);
        for ch in name.chars() {
            if ch.is_ascii_uppercase() {
                out.push('-');
                out.push(ch.to_ascii_lowercase());
            } else {
                out.push(ch);
            }
        }
        out
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, StyleProperty::Custom(_))
    }
}

impl From<String> for StyleProperty {
    fn from(name: String) -> Self {
        StyleProperty::parse(&name)
    }
}

impl From<&str> for StyleProperty {
    fn from(name: &str) -> Self {
        StyleProperty::parse(name)
    }
}

impl From<StyleProperty> for String {
    fn from(property: StyleProperty) -> Self {
        match property {
            StyleProperty::Custom(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of a style entry. Numbers only show up for `zIndex`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(i64),
    Text(String),
}

impl StyleValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(text) => Some(text),
            StyleValue::Number(_) => None,
        }
    }

    /// Shift a numeric value by `delta`, keeping a trailing `px` unit.
    ///
    /// Returns `None` for values that are not a plain or pixel number
    /// (`auto`, `50%`, `calc(..)`).
    pub fn offset(&self, delta: i64) -> Option<StyleValue> {
        match self {
            StyleValue::Number(n) => n.checked_add(delta).map(StyleValue::Number),
            StyleValue::Text(text) => {
                let trimmed = text.trim();
                let (digits, unit) = match trimmed.strip_suffix("px") {
                    Some(digits) => (digits, "px"),
                    None => (trimmed, ""),
                };
                if let Ok(n) = digits.parse::<i64>() {
                    let shifted = n.checked_add(delta)?;
                    return Some(StyleValue::Text(format!("{}{}", shifted, unit)));
                }
                // Fractional positions come back from resize handles
                let n = digits.parse::<f64>().ok().filter(|n| n.is_finite())?;
                Some(StyleValue::Text(format!("{}{}", n + delta as f64, unit)))
            }
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(text: &str) -> Self {
        StyleValue::Text(text.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(text: String) -> Self {
        StyleValue::Text(text)
    }
}

impl From<i64> for StyleValue {
    fn from(n: i64) -> Self {
        StyleValue::Number(n)
    }
}

/// Style map of an element, ordered by property so output is deterministic
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<StyleProperty, StyleValue>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, property: impl Into<StyleProperty>, value: impl Into<StyleValue>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<StyleProperty>, value: impl Into<StyleValue>) -> Option<StyleValue> {
        self.0.insert(property.into(), value.into())
    }

    pub fn get(&self, property: &StyleProperty) -> Option<&StyleValue> {
        self.0.get(property)
    }

    pub fn remove(&mut self, property: &StyleProperty) -> Option<StyleValue> {
        self.0.remove(property)
    }

    pub fn contains(&self, property: &StyleProperty) -> bool {
        self.0.contains_key(property)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, StyleProperty, StyleValue> {
        self.0.iter()
    }

    /// Shallow merge: every entry of `other` overwrites the same key here,
    /// keys only present here survive.
    pub fn merge(&mut self, other: &Style) {
        for (property, value) in &other.0 {
            self.0.insert(property.clone(), value.clone());
        }
    }

    pub fn merged(&self, other: &Style) -> Style {
        let mut out = self.clone();
        out.merge(other);
        out
    }

    /// Shift a positional entry by `delta` if it is present and numeric.
    /// Returns whether anything changed.
    pub fn offset(&mut self, property: &StyleProperty, delta: i64) -> bool {
        let Some(shifted) = self.0.get(property).and_then(|v| v.offset(delta)) else {
            return false;
        };
        self.0.insert(property.clone(), shifted);
        true
    }
}

impl<'a> IntoIterator for &'a Style {
    type Item = (&'a StyleProperty, &'a StyleValue);
    type IntoIter = btree_map::Iter<'a, StyleProperty, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<StyleProperty>, V: Into<StyleValue>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Style(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_name_hyphenates_camel_case() {
        assert_eq!(StyleProperty::FontSize.css_name(), "font-size");
        assert_eq!(StyleProperty::BackgroundColor.css_name(), "background-color");
        assert_eq!(StyleProperty::ZIndex.css_name(), "z-index");
        assert_eq!(StyleProperty::Color.css_name(), "color");
        assert_eq!(StyleProperty::parse("webkitLineClamp").css_name(), "webkit-line-clamp");
    }

    #[test]
    fn test_parse_known_and_custom() {
        assert_eq!(StyleProperty::parse("padding"), StyleProperty::Padding);
        assert_eq!(
            StyleProperty::parse("letterSpacing"),
            StyleProperty::Custom("letterSpacing".to_string())
        );
        for property in StyleProperty::KNOWN {
            assert_eq!(&StyleProperty::parse(property.name()), property);
        }
    }

    #[test]
    fn test_merge_keeps_untouched_keys() {
        let mut style = Style::new().with("fontSize", "48px").with("padding", "8px");
        style.merge(&Style::new().with("color", "#ff0000").with("padding", "16px"));

        assert_eq!(style.len(), 3);
        assert_eq!(style.get(&StyleProperty::FontSize), Some(&StyleValue::from("48px")));
        assert_eq!(style.get(&StyleProperty::Padding), Some(&StyleValue::from("16px")));
        assert_eq!(style.get(&StyleProperty::Color), Some(&StyleValue::from("#ff0000")));
    }

    #[test]
    fn test_offset_values() {
        assert_eq!(StyleValue::from("100px").offset(20), Some(StyleValue::from("120px")));
        assert_eq!(StyleValue::from("-5").offset(20), Some(StyleValue::from("15")));
        assert_eq!(StyleValue::from("10.5px").offset(20), Some(StyleValue::from("30.5px")));
        assert_eq!(StyleValue::Number(3).offset(20), Some(StyleValue::Number(23)));
        assert_eq!(StyleValue::from("auto").offset(20), None);
        assert_eq!(StyleValue::from("50%").offset(20), None);
    }

    #[test]
    fn test_offset_out_of_range_is_untouched() {
        assert_eq!(StyleValue::from("9223372036854775800px").offset(20), None);
        assert_eq!(StyleValue::Number(i64::MAX).offset(1), None);
        assert_eq!(StyleValue::from("infpx").offset(20), None);

        let mut style = Style::new().with("left", "9223372036854775800px");
        assert!(!style.offset(&StyleProperty::Left, 20));
        assert_eq!(
            style.get(&StyleProperty::Left),
            Some(&StyleValue::from("9223372036854775800px"))
        );
    }

    #[test]
    fn test_json_shape() {
        let style = Style::new()
            .with("fontSize", "48px")
            .with("zIndex", 4i64)
            .with("letterSpacing", "1px");
        let json = serde_json::to_value(&style).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "fontSize": "48px", "zIndex": 4, "letterSpacing": "1px" })
        );

        let back: Style = serde_json::from_value(json).unwrap();
        assert_eq!(back, style);
    }
}
