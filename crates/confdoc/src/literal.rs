//! Literal default values and their canonical representation.
//!
//! Setting defaults are shown in the reference using the literal grammar of
//! the scripting dialect the configuration file is written in, so that a
//! reader can paste the value straight back into a config file: strings are
//! quoted, `None`/`True`/`False` are bare, floats always carry a `.` or an
//! exponent.

use std::fmt::{self, Write};

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

/// A static default value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Literal {
    #[default]
    None,
    Bool(bool),
    /// Wide enough for every signed and unsigned 64-bit export value.
    Int(i128),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    /// Key/value pairs in declaration order.
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    /// Whether this is the empty string (rendered distinctly from "unset").
    pub fn is_empty_str(&self) -> bool {
        matches!(self, Literal::Str(s) if s.is_empty())
    }

    /// Canonical representation, e.g. `'127.0.0.1:8000'`, `2048`, `True`.
    pub fn repr(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => f.write_str("None"),
            Literal::Bool(true) => f.write_str("True"),
            Literal::Bool(false) => f.write_str("False"),
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Float(x) => f.write_str(&float_repr(*x)),
            Literal::Str(s) => write_str_repr(f, s),
            Literal::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Literal::Dict(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Str(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value.into())
    }
}

impl From<u64> for Literal {
    fn from(value: u64) -> Self {
        Literal::Int(value.into())
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

/// Shortest round-trip float form, with exponents written as `e+16` / `e-05`.
fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Debug output switches to scientific notation below 1e-4 and from 1e16 up.
    let debug = format!("{x:?}");
    match debug.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => debug,
    }
}

fn write_str_repr(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if !is_printable(c) => {
                let code = c as u32;
                if code <= 0xff {
                    write!(f, "\\x{code:02x}")?;
                } else if code <= 0xffff {
                    write!(f, "\\u{code:04x}")?;
                } else {
                    write!(f, "\\U{code:08x}")?;
                }
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

/// Printable means every letter, mark, number, punctuation and symbol, plus
/// the ASCII space. Other separators and the `C*` categories are escaped.
fn is_printable(c: char) -> bool {
    c == ' '
        || !matches!(
            c.general_category_group(),
            GeneralCategoryGroup::Separator | GeneralCategoryGroup::Other
        )
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LiteralVisitor)
    }
}

struct LiteralVisitor;

impl<'de> Visitor<'de> for LiteralVisitor {
    type Value = Literal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a literal default value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Literal, E> {
        Ok(Literal::None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Literal, E> {
        Ok(Literal::None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Literal, D::Error>
    where
        D: Deserializer<'de>,
    {
        Literal::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Literal, E> {
        Ok(Literal::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Literal, E> {
        Ok(Literal::Int(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Literal, E> {
        Ok(Literal::Int(v.into()))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Literal, E> {
        Ok(Literal::Int(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Literal, E> {
        i128::try_from(v)
            .map(Literal::Int)
            .map_err(|_| E::invalid_value(de::Unexpected::Other("integer above i128::MAX"), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Literal, E> {
        Ok(Literal::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Literal, E> {
        Ok(Literal::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Literal, E> {
        Ok(Literal::Str(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Literal, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Literal::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Literal, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::new();
        while let Some(entry) = map.next_entry()? {
            entries.push(entry);
        }
        Ok(Literal::Dict(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_repr() {
        assert_eq!(Literal::None.repr(), "None");
        assert_eq!(Literal::Bool(true).repr(), "True");
        assert_eq!(Literal::Bool(false).repr(), "False");
        assert_eq!(Literal::Int(2048).repr(), "2048");
        assert_eq!(Literal::Int(-1).repr(), "-1");
    }

    #[test]
    fn test_float_repr() {
        assert_eq!(Literal::Float(1.0).repr(), "1.0");
        assert_eq!(Literal::Float(0.1).repr(), "0.1");
        assert_eq!(Literal::Float(30.5).repr(), "30.5");
        assert_eq!(Literal::Float(1e16).repr(), "1e+16");
        assert_eq!(Literal::Float(1e-5).repr(), "1e-05");
        assert_eq!(Literal::Float(f64::INFINITY).repr(), "inf");
        assert_eq!(Literal::Float(f64::NAN).repr(), "nan");
    }

    #[test]
    fn test_string_quoting() {
        assert_eq!(Literal::from("127.0.0.1:8000").repr(), "'127.0.0.1:8000'");
        assert_eq!(Literal::from("it's").repr(), "\"it's\"");
        assert_eq!(Literal::from("say \"hi\" it's").repr(), "'say \"hi\" it\\'s'");
        assert_eq!(Literal::from("a\\b").repr(), "'a\\\\b'");
        assert_eq!(Literal::from("line\nbreak\t").repr(), "'line\\nbreak\\t'");
        assert_eq!(Literal::from("\u{1}").repr(), "'\\x01'");
        assert_eq!(Literal::from("").repr(), "''");
    }

    #[test]
    fn test_non_printable_characters_are_escaped() {
        assert_eq!(Literal::from("a\u{a0}b").repr(), "'a\\xa0b'");
        assert_eq!(Literal::from("a\u{200b}b").repr(), "'a\\u200bb'");
        assert_eq!(Literal::from("\u{2028}").repr(), "'\\u2028'");
        assert_eq!(Literal::from("\u{e000}").repr(), "'\\ue000'");
        assert_eq!(Literal::from("\u{378}").repr(), "'\\u0378'");
        assert_eq!(Literal::from("\u{f0000}").repr(), "'\\U000f0000'");
        assert_eq!(Literal::from("\u{7f}").repr(), "'\\x7f'");
    }

    #[test]
    fn test_printable_unicode_kept() {
        assert_eq!(Literal::from("café").repr(), "'café'");
        assert_eq!(Literal::from("日本 語").repr(), "'日本 語'");
        assert_eq!(Literal::from("\u{1f600}").repr(), "'\u{1f600}'");
    }

    #[test]
    fn test_collection_repr() {
        let list = Literal::List(vec![Literal::from("127.0.0.1"), Literal::Int(1)]);
        assert_eq!(list.repr(), "['127.0.0.1', 1]");
        assert_eq!(Literal::List(vec![]).repr(), "[]");

        let dict = Literal::Dict(vec![
            (Literal::from("X-FORWARDED-PROTOCOL"), Literal::from("ssl")),
            (Literal::from("X-FORWARDED-SSL"), Literal::from("on")),
        ]);
        assert_eq!(
            dict.repr(),
            "{'X-FORWARDED-PROTOCOL': 'ssl', 'X-FORWARDED-SSL': 'on'}"
        );
    }

    #[test]
    fn test_scalar_repr_round_trips() {
        for value in [0_i128, 2048, -30, i64::MIN.into(), u64::MAX.into()] {
            assert_eq!(Literal::Int(value).repr().parse::<i128>().unwrap(), value);
        }
        for value in [0.1_f64, 1.5, 1e16, 1e-5, 123456.789] {
            assert_eq!(Literal::Float(value).repr().parse::<f64>().unwrap(), value);
        }
    }

    #[test]
    fn test_unsigned_64_bit_values_stay_integers() {
        let value: Literal = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(value, Literal::from(u64::MAX));
        assert_eq!(value.repr(), "18446744073709551615");

        let value: Literal = serde_yaml::from_str("-9223372036854775808").unwrap();
        assert_eq!(value.repr(), "-9223372036854775808");
    }

    #[test]
    fn test_is_empty_str() {
        assert!(Literal::from("").is_empty_str());
        assert!(!Literal::from(" ").is_empty_str());
        assert!(!Literal::None.is_empty_str());
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = "[null, true, 3, 0.5, text, [1], {a: 1, b: two}]";
        let value: Literal = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            value,
            Literal::List(vec![
                Literal::None,
                Literal::Bool(true),
                Literal::Int(3),
                Literal::Float(0.5),
                Literal::from("text"),
                Literal::List(vec![Literal::Int(1)]),
                Literal::Dict(vec![
                    (Literal::from("a"), Literal::Int(1)),
                    (Literal::from("b"), Literal::from("two")),
                ]),
            ])
        );
    }

    #[test]
    fn test_deserialize_preserves_dict_order() {
        let value: Literal = serde_json::from_str(r#"{"z": 1, "a": 2}"#).unwrap();
        assert_eq!(value.repr(), "{'z': 1, 'a': 2}");
    }
}
