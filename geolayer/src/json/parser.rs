use crate::error::SyntaxError;
use crate::json::{JsonObject, JsonValue};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default limit of nested arrays and objects.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options of the JSON parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParseOptions {
    /// Maximum nesting depth of arrays and objects. Deeper documents are rejected with a
    /// [`SyntaxError`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parses JSON text into a [`JsonValue`] with default [`ParseOptions`].
///
/// The whole text must be a single JSON value optionally surrounded by whitespace.
///
/// ```
/// use geolayer::json::{parse, JsonValue};
///
/// let value = parse(r#"{"coordinates": [30, 10]}"#)?;
/// assert_eq!(
///     value.as_object().and_then(|o| o.get("coordinates")),
///     Some(&JsonValue::Array(vec![JsonValue::Number(30.0), JsonValue::Number(10.0)]))
/// );
/// # Ok::<(), geolayer::error::SyntaxError>(())
/// ```
pub fn parse(text: &str) -> Result<JsonValue, SyntaxError> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parses JSON text into a [`JsonValue`].
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<JsonValue, SyntaxError> {
    let mut parser = Parser {
        text,
        bytes: text.as_bytes(),
        pos: 0,
        depth: 0,
        max_depth: options.max_depth,
    };

    parser.skip_whitespace();
    let value = parser.parse_value()?;
    parser.skip_whitespace();

    if parser.pos < parser.bytes.len() {
        return Err(parser.error("unexpected characters after the end of the JSON value"));
    }

    Ok(value)
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, reason: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.pos, reason)
    }

    fn unexpected(&self, expected: &str) -> SyntaxError {
        // Outside of string bodies the position is always at a char boundary.
        match self.text.get(self.pos..).and_then(|rest| rest.chars().next()) {
            Some(c) => self.error(format!("unexpected character {c:?}, expected {expected}")),
            None => self.error(format!("unexpected end of input, expected {expected}")),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error(format!(
                "nesting depth exceeds the limit of {}",
                self.max_depth
            )));
        }

        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> Result<JsonValue, SyntaxError> {
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => Ok(JsonValue::String(self.parse_string()?)),
            Some(b't') => self.parse_literal("true", JsonValue::Bool(true)),
            Some(b'f') => self.parse_literal("false", JsonValue::Bool(false)),
            Some(b'n') => self.parse_literal("null", JsonValue::Null),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            _ => Err(self.unexpected("a JSON value")),
        }
    }

    fn parse_literal(&mut self, word: &str, value: JsonValue) -> Result<JsonValue, SyntaxError> {
        if self.bytes[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            Ok(value)
        } else {
            Err(self.error(format!("invalid literal, expected `{word}`")))
        }
    }

    fn parse_object(&mut self) -> Result<JsonValue, SyntaxError> {
        self.enter()?;
        self.pos += 1;

        let mut object = JsonObject::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.leave();
            return Ok(JsonValue::Object(object));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.unexpected("a string key"));
            }
            let key = self.parse_string()?;

            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.unexpected("':' after an object key"));
            }
            self.pos += 1;

            self.skip_whitespace();
            let value = self.parse_value()?;
            object.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }

        self.leave();
        Ok(JsonValue::Object(object))
    }

    fn parse_array(&mut self) -> Result<JsonValue, SyntaxError> {
        self.enter()?;
        self.pos += 1;

        let mut items = vec![];
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.leave();
            return Ok(JsonValue::Array(items));
        }

        loop {
            self.skip_whitespace();
            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }

        self.leave();
        Ok(JsonValue::Array(items))
    }

    fn parse_string(&mut self) -> Result<String, SyntaxError> {
        self.pos += 1;
        let mut result = String::new();

        loop {
            let start = self.pos;
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' || b < 0x20 {
                    break;
                }
                self.pos += 1;
            }
            // Stop bytes are ASCII, so both ends of the run are char boundaries.
            result.push_str(&self.text[start..self.pos]);

            match self.peek() {
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(result);
                }
                Some(b'\\') => result.push(self.parse_escape()?),
                Some(_) => return Err(self.error("unescaped control character in a string")),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char, SyntaxError> {
        let escape_start = self.pos;
        self.pos += 1;

        let c = match self.peek() {
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{08}',
            Some(b'f') => '\u{0C}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => {
                self.pos += 1;
                return self.parse_unicode_escape(escape_start);
            }
            _ => {
                return Err(SyntaxError::new(escape_start, "invalid escape sequence"));
            }
        };

        self.pos += 1;
        Ok(c)
    }

    fn parse_unicode_escape(&mut self, escape_start: usize) -> Result<char, SyntaxError> {
        let high = self.parse_hex4()?;
        let code = match high {
            0xD800..=0xDBFF => {
                if !self.bytes[self.pos..].starts_with(b"\\u") {
                    return Err(SyntaxError::new(escape_start, "unpaired surrogate escape"));
                }
                self.pos += 2;
                let low = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(SyntaxError::new(escape_start, "unpaired surrogate escape"));
                }
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(SyntaxError::new(escape_start, "unpaired surrogate escape"));
            }
            _ => high,
        };

        char::from_u32(code)
            .ok_or_else(|| SyntaxError::new(escape_start, "invalid unicode escape"))
    }

    fn parse_hex4(&mut self) -> Result<u32, SyntaxError> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = self
                .peek()
                .and_then(|b| (b as char).to_digit(16))
                .ok_or_else(|| self.error("expected a hexadecimal digit"))?;
            code = code * 16 + digit;
            self.pos += 1;
        }

        Ok(code)
    }

    fn parse_number(&mut self) -> Result<JsonValue, SyntaxError> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.unexpected("a digit")),
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.expect_digits()?;
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            self.expect_digits()?;
        }

        let literal = &self.text[start..self.pos];
        let value: f64 = literal
            .parse()
            .map_err(|_| SyntaxError::new(start, format!("invalid number `{literal}`")))?;

        if !value.is_finite() {
            return Err(SyntaxError::new(
                start,
                format!("number `{literal}` is out of range"),
            ));
        }

        Ok(JsonValue::Number(value))
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
    }

    fn expect_digits(&mut self) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(b'0'..=b'9') => {
                self.skip_digits();
                Ok(())
            }
            _ => Err(self.unexpected("a digit")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn num(v: f64) -> JsonValue {
        JsonValue::Number(v)
    }

    #[test]
    fn scalars() {
        assert_eq!(parse("null").unwrap(), JsonValue::Null);
        assert_eq!(parse(" true ").unwrap(), JsonValue::Bool(true));
        assert_eq!(parse("\tfalse\r\n").unwrap(), JsonValue::Bool(false));
        assert_eq!(
            parse(r#""text""#).unwrap(),
            JsonValue::String("text".into())
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(parse("0").unwrap(), num(0.0));
        assert_eq!(parse("-0").unwrap(), num(-0.0));
        assert_eq!(parse("-122.265185").unwrap(), num(-122.265185));
        assert_eq!(parse("47.609466").unwrap(), num(47.609466));
        assert_eq!(parse("1e3").unwrap(), num(1000.0));
        assert_eq!(parse("2.5E-1").unwrap(), num(0.25));
        assert_eq!(parse("1e+2").unwrap(), num(100.0));
    }

    #[test]
    fn invalid_numbers() {
        assert_matches!(parse("01"), Err(SyntaxError { offset: 1, .. }));
        assert_matches!(parse("-"), Err(SyntaxError { offset: 1, .. }));
        assert_matches!(parse("1."), Err(SyntaxError { offset: 2, .. }));
        assert_matches!(parse(".5"), Err(SyntaxError { offset: 0, .. }));
        assert_matches!(parse("1e"), Err(SyntaxError { offset: 2, .. }));
        assert_matches!(parse("+1"), Err(SyntaxError { offset: 0, .. }));
        assert_matches!(parse("NaN"), Err(SyntaxError { offset: 0, .. }));
        assert_matches!(parse("Infinity"), Err(SyntaxError { offset: 0, .. }));
    }

    #[test]
    fn overflowing_number_is_rejected() {
        let err = parse("[1, 1e400]").unwrap_err();
        assert_eq!(err.offset, 4);
        assert!(err.reason.contains("out of range"));
    }

    #[test]
    fn escapes() {
        assert_eq!(
            parse(r#""a\"b\\c\/d\b\f\n\r\t""#).unwrap(),
            JsonValue::String("a\"b\\c/d\u{8}\u{c}\n\r\t".into())
        );
        assert_eq!(
            parse(r#""\u00e9\u4E2D""#).unwrap(),
            JsonValue::String("\u{e9}\u{4e2d}".into())
        );
        assert_eq!(
            parse(r#""\ud83d\ude00""#).unwrap(),
            JsonValue::String("\u{1f600}".into())
        );
        assert_eq!(
            parse("\"unicode é 中\"").unwrap(),
            JsonValue::String("unicode é 中".into())
        );
    }

    #[test]
    fn invalid_strings() {
        assert_matches!(parse(r#""abc"#), Err(SyntaxError { offset: 4, .. }));
        assert_matches!(parse(r#""a\x""#), Err(SyntaxError { offset: 2, .. }));
        assert_matches!(parse(r#""\u12""#), Err(SyntaxError { offset: 5, .. }));
        assert_matches!(parse(r#""\ud83d""#), Err(SyntaxError { offset: 1, .. }));
        assert_matches!(parse(r#""\ude00""#), Err(SyntaxError { offset: 1, .. }));
        assert_matches!(parse("\"a\nb\""), Err(SyntaxError { offset: 2, .. }));
    }

    #[test]
    fn nested_structures() {
        let value = parse(r#"{"a": [1, {"b": null}], "c": {}}"#).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a", "c"]);

        let a = object.get("a").unwrap().as_array().unwrap();
        assert_eq!(a[0], num(1.0));
        assert_eq!(a[1].as_object().unwrap().get("b"), Some(&JsonValue::Null));
        assert_eq!(
            object.get("c"),
            Some(&JsonValue::Object(JsonObject::new()))
        );
        assert_eq!(parse("[]").unwrap(), JsonValue::Array(vec![]));
    }

    #[test]
    fn duplicate_keys_keep_first_position_and_last_value() {
        let value = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(object.get("a"), Some(&num(3.0)));
    }

    #[test]
    fn structural_errors() {
        assert_matches!(parse(""), Err(SyntaxError { offset: 0, .. }));
        assert_matches!(parse("   "), Err(SyntaxError { offset: 3, .. }));
        assert_matches!(parse("[1, 2"), Err(SyntaxError { offset: 5, .. }));
        assert_matches!(parse("[1, 2,]"), Err(SyntaxError { offset: 6, .. }));
        assert_matches!(parse("[1 2]"), Err(SyntaxError { offset: 3, .. }));
        assert_matches!(parse(r#"{"a" 1}"#), Err(SyntaxError { offset: 5, .. }));
        assert_matches!(parse(r#"{"a": 1,}"#), Err(SyntaxError { offset: 8, .. }));
        assert_matches!(parse(r#"{a: 1}"#), Err(SyntaxError { offset: 1, .. }));
        assert_matches!(parse("nul"), Err(SyntaxError { offset: 0, .. }));
        assert_matches!(parse("{}"), Ok(_));
    }

    #[test]
    fn trailing_garbage() {
        let err = parse(r#"{"type": "Point"} x"#).unwrap_err();
        assert_eq!(err.offset, 18);
        assert_matches!(parse("truex"), Err(SyntaxError { offset: 4, .. }));
        assert_matches!(parse("[] []"), Err(SyntaxError { offset: 3, .. }));
    }

    #[test]
    fn error_message_names_unexpected_character() {
        let err = parse("[1, é]").unwrap_err();
        assert_eq!(err.offset, 4);
        assert_eq!(err.reason, "unexpected character 'é', expected a JSON value");
    }

    #[test]
    fn depth_limit() {
        let options = ParseOptions { max_depth: 3 };
        assert!(parse_with_options("[[[1]]]", &options).is_ok());
        assert_matches!(
            parse_with_options("[[[[1]]]]", &options),
            Err(SyntaxError { offset: 3, .. })
        );

        let deep = "[".repeat(DEFAULT_MAX_DEPTH + 1) + &"]".repeat(DEFAULT_MAX_DEPTH + 1);
        assert!(parse(&deep).is_err());
    }
}
